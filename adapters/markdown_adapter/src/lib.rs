use chat_export_core::domain::{ConversationExport, SanitizedAttachment, SanitizedMessage};
use chat_export_core::error::ExportError;
use chat_export_core::ports::{ExportWriter, Result};
use chat_export_core::utils::format_timestamp_to_local;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Markdown transcript writer adapter implementation
pub struct MarkdownTranscriptWriter {
    output_path: PathBuf,
}

impl MarkdownTranscriptWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    /// Formats a whole export as a Markdown transcript
    pub fn format_markdown(&self, export: &ConversationExport) -> String {
        let mut output = String::new();
        output.push_str(&format!("# {}\n\n", export.name));

        let created = export
            .created_at
            .as_deref()
            .map(format_timestamp_to_local)
            .unwrap_or_else(|| "unknown".to_string());
        output.push_str(&format!("*Created: {}*\n\n", created));
        output.push_str(&format!("*{} messages*\n\n", export.chat_messages.len()));
        output.push_str("---\n\n");

        for message in &export.chat_messages {
            self.format_message(&mut output, message);
            output.push_str("---\n\n");
        }

        output
    }

    fn format_message(&self, output: &mut String, message: &SanitizedMessage) {
        // Format message header with sender label and timestamp
        output.push_str(&format!(
            "**{}** *{}*\n\n",
            sender_label(&message.sender),
            format_timestamp_to_local(&message.created_at)
        ));

        if !message.text.trim().is_empty() {
            output.push_str(&format_message_text(&message.text));
            output.push_str("\n\n");
        } else {
            output.push_str("*[No content]*\n\n");
        }

        let attachments = match message.attachments.as_deref() {
            Some(attachments) if !attachments.is_empty() => attachments,
            _ => return,
        };

        let plural = if attachments.len() == 1 { "" } else { "s" };
        output.push_str(&format!("**{} Attachment{}**\n\n", attachments.len(), plural));

        for attachment in attachments {
            self.format_attachment(output, attachment);
        }
    }

    fn format_attachment(&self, output: &mut String, attachment: &SanitizedAttachment) {
        output.push_str(&format!(
            "`{}` ({})\n\n",
            attachment.file_name,
            format_file_size(&attachment.file_size)
        ));

        // Extracted text stays collapsed until the reader opens it
        if let Value::String(content) = &attachment.extracted_content {
            if !content.is_empty() {
                let fence = code_fence(content);
                output.push_str("<details>\n<summary>Show content</summary>\n\n");
                output.push_str(&format!("{fence}\n{content}\n{fence}\n\n"));
                output.push_str("</details>\n\n");
            }
        }
    }
}

impl ExportWriter for MarkdownTranscriptWriter {
    fn write(&self, export: &ConversationExport) -> Result<()> {
        let markdown_content = self.format_markdown(export);

        // Create output directory if it doesn't exist
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| ExportError::io("create directory", parent, err))?;
            }
        }

        debug!(path = %self.output_path.display(), bytes = markdown_content.len(), "writing transcript");
        fs::write(&self.output_path, markdown_content)
            .map_err(|err| ExportError::io("write", &self.output_path, err))
    }

    fn location(&self) -> String {
        self.output_path.display().to_string()
    }
}

fn sender_label(sender: &str) -> &'static str {
    if sender == "human" {
        "Human"
    } else {
        "Assistant"
    }
}

/// Keeps paragraphs apart and turns single newlines into hard line breaks
fn format_message_text(text: &str) -> String {
    text.split("\n\n")
        .map(|paragraph| paragraph.split('\n').collect::<Vec<_>>().join("  \n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Rounds a byte count to whole kilobytes; zero, missing or non-numeric sizes are unknown
fn format_file_size(file_size: &Value) -> String {
    let bytes = match file_size {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match bytes {
        Some(bytes) if bytes.is_finite() && bytes != 0.0 => {
            format!("{}kb", (bytes / 1024.0).round())
        }
        _ => "size unknown".to_string(),
    }
}

/// A backtick fence longer than any backtick run inside the content
fn code_fence(content: &str) -> String {
    let longest_run = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest_run.max(2) + 1)
}
