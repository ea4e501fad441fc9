//! Application state container.
//!
//! All user-visible state lives here and changes only through the methods
//! below: input produces a verdict, the verdict gates analysis, and a
//! finished analysis updates result, error and history.

use super::history::{DEFAULT_HISTORY_LIMIT, HistoryEntry};
use super::store::PersistedState;
use crate::expression::{format_expression, validate_expression};
use crate::keypad::translate_key;
use crate::operation::Operation;
use crate::remote::{ComputeError, ComputeService};
use thiserror::Error;

/// Shown when validation fails and the remote call is suppressed.
pub const INVALID_EXPRESSION_MESSAGE: &str = "Invalid expression. Please check your input.";

/// Validation state of the current input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing entered yet; no error is shown.
    Empty,
    Valid,
    Invalid,
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Invalid expression. Please check your input.")]
    InvalidExpression,
    #[error("an analysis is already in progress")]
    Busy,
    #[error(transparent)]
    Compute(#[from] ComputeError),
}

/// What to send to the computation service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub expression: String,
    pub operation: Operation,
}

#[derive(Debug)]
pub struct Session {
    input: String,
    verdict: Verdict,
    operation: Operation,
    result: Option<String>,
    error: Option<String>,
    loading: bool,
    show_graph: bool,
    show_keypad: bool,
    state: PersistedState,
    history_limit: usize,
    dirty: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PersistedState::default())
    }
}

impl Session {
    /// Start a session from previously persisted state.
    pub fn new(state: PersistedState) -> Self {
        Self::with_history_limit(state, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(mut state: PersistedState, history_limit: usize) -> Self {
        state.history.truncate(history_limit);
        Self {
            input: String::new(),
            verdict: Verdict::Empty,
            operation: Operation::default(),
            result: None,
            error: None,
            loading: false,
            show_graph: false,
            show_keypad: false,
            state,
            history_limit,
            dirty: false,
        }
    }

    /// Replace the input text and recompute the verdict.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.verdict = if self.input.trim().is_empty() {
            Verdict::Empty
        } else if validate_expression(&self.input) {
            Verdict::Valid
        } else {
            Verdict::Invalid
        };
    }

    /// Append a keypad key, then run the formatter over the whole input.
    pub fn press_key(&mut self, key: &str) {
        let next = format!("{}{}", self.input, translate_key(key));
        self.set_input(format_expression(&next));
    }

    /// Append a template or example verbatim.
    pub fn insert_template(&mut self, template: &str) {
        let next = format!("{}{}", self.input, template);
        self.set_input(next);
    }

    pub fn select_operation(&mut self, operation: Operation) {
        self.operation = operation;
    }

    /// Whether the analyze action should be enabled.
    pub fn can_analyze(&self) -> bool {
        !self.loading && !self.input.is_empty()
    }

    /// Start an analysis.
    ///
    /// Clears the previous result and error. If the input is not valid the
    /// error message is set and no request is produced.
    pub fn begin_analyze(&mut self) -> Result<AnalyzeRequest, AnalyzeError> {
        if self.loading {
            return Err(AnalyzeError::Busy);
        }

        self.result = None;
        self.error = None;

        if self.verdict != Verdict::Valid {
            self.error = Some(INVALID_EXPRESSION_MESSAGE.to_string());
            return Err(AnalyzeError::InvalidExpression);
        }

        self.loading = true;
        Ok(AnalyzeRequest {
            expression: self.input.clone(),
            operation: self.operation,
        })
    }

    /// Record the outcome of a request produced by [`Self::begin_analyze`].
    pub fn finish_analyze(
        &mut self,
        request: AnalyzeRequest,
        outcome: &Result<String, ComputeError>,
    ) {
        self.loading = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result.clone());
                self.state.history.push(
                    HistoryEntry::new(request.expression, request.operation, result.clone()),
                    self.history_limit,
                );
                self.dirty = true;
            }
            Err(e) => {
                tracing::warn!(error = %e, "analysis failed");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Validate, call `service`, and record the outcome.
    pub async fn analyze<S: ComputeService>(
        &mut self,
        service: &S,
    ) -> Result<String, AnalyzeError> {
        let request = self.begin_analyze()?;
        let outcome = service
            .compute(request.operation, &request.expression)
            .await;
        self.finish_analyze(request, &outcome);
        Ok(outcome?)
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.state.dark_mode = !self.state.dark_mode;
        self.dirty = true;
        self.state.dark_mode
    }

    pub fn toggle_graph(&mut self) -> bool {
        self.show_graph = !self.show_graph;
        self.show_graph
    }

    pub fn toggle_keypad(&mut self) -> bool {
        self.show_keypad = !self.show_keypad;
        self.show_keypad
    }

    pub fn clear_history(&mut self) {
        if !self.state.history.is_empty() {
            self.state.history.clear();
            self.dirty = true;
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn show_graph(&self) -> bool {
        self.show_graph
    }

    pub fn show_keypad(&self) -> bool {
        self.show_keypad
    }

    pub fn dark_mode(&self) -> bool {
        self.state.dark_mode
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.state.history.entries()
    }

    /// Whether persisted state changed since the session started.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Hand the persisted part back for saving.
    pub fn into_state(self) -> PersistedState {
        self.state
    }
}
