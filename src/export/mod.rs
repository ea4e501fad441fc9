//! Exporting and sharing the current expression.

mod clipboard;

pub use clipboard::{copy_to_clipboard, share};

use crate::operation::Operation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default file name used when exporting.
pub const DEFAULT_EXPORT_FILE: &str = "math-expression.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to access clipboard: {0}")]
    ClipboardUnavailable(#[source] arboard::Error),
    #[error("failed to copy to clipboard: {0}")]
    ClipboardWrite(#[source] arboard::Error),
    #[error("failed to encode export: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Snapshot of the current expression, operation and result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub expression: String,
    pub operation: Operation,
    pub result: String,
    pub timestamp: DateTime<Utc>,
}

impl ExportRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        expression: impl Into<String>,
        operation: Operation,
        result: impl Into<String>,
    ) -> Self {
        Self::at(expression, operation, result, Utc::now())
    }

    pub fn at(
        expression: impl Into<String>,
        operation: Operation,
        result: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            expression: expression.into(),
            operation,
            result: result.into(),
            timestamp,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON form to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "exported expression");
        Ok(())
    }
}
