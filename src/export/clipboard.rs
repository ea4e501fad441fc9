//! Sharing an expression through the system clipboard.

use super::ExportError;
use arboard::Clipboard;

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ExportError> {
    let mut clipboard = Clipboard::new().map_err(ExportError::ClipboardUnavailable)?;

    clipboard
        .set_text(text.to_string())
        .map_err(ExportError::ClipboardWrite)
}

/// Share the current expression by placing it on the clipboard.
pub fn share(expression: &str) -> Result<(), ExportError> {
    copy_to_clipboard(expression)?;
    tracing::debug!(expression, "copied expression to clipboard");
    Ok(())
}
