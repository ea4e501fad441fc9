//! Math Wizard command-line shell.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mathwizard::config::Config;
use mathwizard::export::{DEFAULT_EXPORT_FILE, ExportRecord, share};
use mathwizard::expression::{
    Bindings, SurfaceDomain, evaluate, format_expression, format_value, sample_surface,
    validate_expression,
};
use mathwizard::keypad;
use mathwizard::operation::Operation;
use mathwizard::remote::NewtonClient;
use mathwizard::state::{Session, StateStore};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mathwizard")]
#[command(about = "Validate, analyze and visualize mathematical expressions")]
#[command(version)]
struct Cli {
    /// Path to the config file (default: <config dir>/mathwizard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the state file holding history and theme
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check whether an expression is well-formed
    Validate { expression: String },
    /// Rewrite words and operators into symbolic form
    Format { expression: String },
    /// Evaluate an expression with the sandboxed evaluator
    Eval {
        expression: String,
        #[arg(long, allow_negative_numbers = true)]
        x: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        z: Option<f64>,
    },
    /// Apply a symbolic operation through the remote API
    Analyze {
        expression: String,
        #[arg(long, value_enum, default_value_t = Operation::Simplify)]
        op: Operation,
    },
    /// Sample y = f(x, z) over a grid and print it as JSON
    Surface {
        expression: String,
        #[arg(long, value_enum, default_value_t = SurfaceDomain::Scene)]
        domain: SurfaceDomain,
        /// Samples per axis (default from config)
        #[arg(long)]
        resolution: Option<usize>,
    },
    /// Show or clear the history of analyzed expressions
    History {
        #[arg(long)]
        clear: bool,
    },
    /// Show or toggle the dark/light theme flag
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Export expression, operation and result as JSON
    Export {
        expression: String,
        #[arg(long, value_enum, default_value_t = Operation::Simplify)]
        op: Operation,
        /// Result to include (default: latest matching history entry)
        #[arg(long)]
        result: Option<String>,
        #[arg(long, short, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },
    /// Copy an expression to the clipboard
    Share { expression: String },
    /// List example expressions, constants and templates
    Examples,
    /// Show the virtual keypad layout
    Keypad,
    /// List the available operations
    Operations,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "mathwizard=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Ok(Config::load(&path)?),
        None => Ok(Config::default()),
    }
}

fn state_store(cli: &Cli, config: &Config) -> Result<StateStore> {
    cli.state
        .clone()
        .or_else(|| config.state_path.clone())
        .or_else(StateStore::default_path)
        .map(StateStore::new)
        .context("No data directory found. Pass --state to choose a state file.")
}

/// Load persisted state into a session.
fn open_session(store: &StateStore, config: &Config) -> Session {
    Session::with_history_limit(store.load(), config.history_limit)
}

/// Save the session's persisted state if it changed.
fn close_session(store: &StateStore, session: Session) -> Result<()> {
    if session.is_dirty() {
        store
            .save(&session.into_state())
            .context("Failed to save state")?;
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    tracing::debug!(?config, "loaded config");

    match &cli.command {
        Commands::Validate { expression } => {
            if validate_expression(expression) {
                println!("valid");
            } else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Format { expression } => {
            println!("{}", format_expression(expression));
        }
        Commands::Eval { expression, x, z } => {
            let bindings = Bindings { x: *x, z: *z };
            let value = evaluate(expression, &bindings)
                .with_context(|| format!("Failed to evaluate '{expression}'"))?;
            println!("{}", format_value(value));
        }
        Commands::Analyze { expression, op } => {
            let store = state_store(&cli, &config)?;
            let mut session = open_session(&store, &config);
            session.set_input(expression.as_str());
            session.select_operation(*op);

            let client = NewtonClient::new(&config.api_url, config.timeout())?;
            let outcome = session.analyze(&client).await;
            close_session(&store, session)?;

            match outcome {
                Ok(result) => println!("{result}"),
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Surface {
            expression,
            domain,
            resolution,
        } => {
            let resolution = resolution.unwrap_or(config.surface_resolution);
            let grid = sample_surface(expression, *domain, resolution);
            println!("{}", serde_json::to_string_pretty(&grid)?);
        }
        Commands::History { clear } => {
            let store = state_store(&cli, &config)?;
            let mut session = open_session(&store, &config);
            if *clear {
                session.clear_history();
                println!("History cleared.");
            } else if session.history().is_empty() {
                println!("No history yet.");
            } else {
                for entry in session.history() {
                    println!("{}", entry.summary());
                }
            }
            close_session(&store, session)?;
        }
        Commands::Theme { toggle } => {
            let store = state_store(&cli, &config)?;
            let mut session = open_session(&store, &config);
            if *toggle {
                session.toggle_dark_mode();
            }
            println!("{}", if session.dark_mode() { "dark" } else { "light" });
            close_session(&store, session)?;
        }
        Commands::Export {
            expression,
            op,
            result,
            output,
        } => {
            let result = match result {
                Some(result) => result.clone(),
                None => {
                    let store = state_store(&cli, &config)?;
                    let session = open_session(&store, &config);
                    session
                        .history()
                        .iter()
                        .find(|entry| entry.expression == *expression && entry.operation == *op)
                        .map(|entry| entry.result.clone())
                        .unwrap_or_default()
                }
            };
            ExportRecord::new(expression.as_str(), *op, result).write_to(output)?;
            println!("Exported to {}", output.display());
        }
        Commands::Share { expression } => {
            share(expression)?;
            println!("Copied to clipboard.");
        }
        Commands::Examples => {
            println!("Examples:");
            for example in keypad::EXAMPLES {
                println!("  {:<16} {}", example.expression, example.description);
            }
            println!("Constants:");
            for constant in keypad::CONSTANTS {
                println!(
                    "  {:<4} {:<18} {}",
                    constant.symbol, constant.value, constant.description
                );
            }
            println!("Templates:");
            for template in keypad::TEMPLATES {
                println!("  {:<14} {}", template.label, template.value);
            }
        }
        Commands::Keypad => print_keypad(),
        Commands::Operations => {
            for op in Operation::ALL {
                println!("{:<10} {:<18} {}", op.keyword(), op.label(), op.description());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_keypad() {
    println!("Basic:");
    for key in keypad::BASIC_KEYS {
        println!("  {:<6} -> {}", key.label, key.value);
    }
    for constant in keypad::CONSTANTS {
        println!(
            "  {:<6} -> {:<18} {}",
            constant.symbol, constant.value, constant.description
        );
    }

    println!("Numbers:");
    for row in keypad::NUMBER_KEYS.chunks(4) {
        let cells: Vec<String> = row
            .iter()
            .map(|key| format!("{key}={}", keypad::translate_key(key)))
            .collect();
        println!("  {}", cells.join("  "));
    }

    for (group, keys) in keypad::FUNCTION_GROUPS {
        println!("{group}:");
        for key in *keys {
            println!("  {:<6} -> {}", key.label, key.value);
        }
    }
}
