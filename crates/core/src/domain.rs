use serde::{Deserialize, Serialize};
use crate::error::ExportError;
use crate::ports::Result;
use serde_json::{Map, Value};

/// Title written into every export envelope
pub const EXPORT_NAME: &str = "Chat Export";

/// An unfiltered record exactly as it appears in the source export
pub type RawRecord = Map<String, Value>;

/// A message reduced to the allow-listed fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizedMessage {
    pub text: String,
    pub sender: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<SanitizedAttachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<SanitizedFile>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizedAttachment {
    pub file_name: String,
    pub file_type: String,
    /// Copied verbatim; `null` when the source had no size
    #[serde(default)]
    pub file_size: Value,
    /// Copied verbatim; `null` when the source had no extracted text
    #[serde(default)]
    pub extracted_content: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizedFile {
    pub file_name: String,
}

/// Output envelope wrapping the chronologically ordered messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationExport {
    pub name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub chat_messages: Vec<SanitizedMessage>,
}

impl ConversationExport {
    /// Wraps already sorted messages.
    ///
    /// Both envelope timestamps come from `created_at`: the first message's for
    /// `created_at` and the last message's for `updated_at`.
    pub fn from_sorted(chat_messages: Vec<SanitizedMessage>) -> Self {
        let created_at = chat_messages.first().map(|m| m.created_at.clone());
        let updated_at = chat_messages.last().map(|m| m.created_at.clone());
        Self {
            name: EXPORT_NAME.to_string(),
            created_at,
            updated_at,
            chat_messages,
        }
    }

    /// Reads back an export document in the envelope layout.
    /// Extra keys are ignored; messages keep the order they are stored in.
    pub fn from_document(document: Value) -> Result<Self> {
        serde_json::from_value(document)
            .map_err(|err| ExportError::MalformedDocument(format!("not a chat export: {err}")))
    }
}

/// Outcome of one successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub message_count: usize,
    pub output_location: String,
}
