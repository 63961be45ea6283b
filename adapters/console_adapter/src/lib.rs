use chat_export_core::domain::ConversationExport;
use chat_export_core::error::ExportError;
use chat_export_core::ports::{PreviewReporter, Result};
use chat_export_core::utils::{format_preview_line, separator};
use std::io::Write;
use tracing::debug;

/// Prints the conversion summary and a one-line preview per message to stdout
#[derive(Debug, Default)]
pub struct ConsolePreviewReporter;

impl ConsolePreviewReporter {
    pub fn new() -> Self {
        Self
    }

    /// Formats the summary header and every preview line for a finished export
    pub fn format_preview(&self, export: &ConversationExport, location: &str) -> Result<String> {
        let rule = separator();

        let mut output = String::new();
        output.push_str(&format!("Total messages: {}\n", export.chat_messages.len()));
        output.push_str(&format!("\nSanitized and sorted messages saved to: {}\n", location));
        output.push_str("\nPreview of chronological order:\n");
        output.push_str(&rule);
        output.push('\n');

        for message in &export.chat_messages {
            output.push_str(&format_preview_line(message)?);
            output.push('\n');
            output.push_str(&rule);
            output.push('\n');
        }

        Ok(output)
    }
}

impl PreviewReporter for ConsolePreviewReporter {
    fn report(&self, export: &ConversationExport, location: &str) -> Result<()> {
        let preview = self.format_preview(export, location)?;
        debug!(lines = preview.lines().count(), "printing preview");

        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(preview.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|err| ExportError::io("print preview to", "stdout", err))
    }
}
