use crate::domain::{RawRecord, SanitizedAttachment, SanitizedFile, SanitizedMessage};
use crate::error::ExportError;
use crate::ports::Result;
use serde_json::Value;
use tracing::debug;

const MESSAGE: &str = "message";
const ATTACHMENT: &str = "attachment";
const FILE: &str = "file";

/// Returns the raw message list of an export document.
///
/// A document without `chat_messages` has no messages.
pub fn raw_messages(document: &Value) -> Result<&[Value]> {
    let root = document.as_object().ok_or_else(|| {
        ExportError::MalformedDocument("top-level value is not an object".to_string())
    })?;

    match root.get("chat_messages") {
        None => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(ExportError::MalformedDocument(
            "`chat_messages` is not an array".to_string(),
        )),
    }
}

/// Sanitizes every message in document order, stopping at the first failure
pub fn sanitize_all(raw: &[Value]) -> Result<Vec<SanitizedMessage>> {
    let messages = raw
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let record = value.as_object().ok_or_else(|| {
                ExportError::MalformedDocument(format!("chat_messages[{index}] is not an object"))
            })?;
            sanitize(record)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(count = messages.len(), "sanitized messages");
    Ok(messages)
}

/// Keeps only the allow-listed fields of a single message
pub fn sanitize(raw: &RawRecord) -> Result<SanitizedMessage> {
    let text = required_str(raw, MESSAGE, "text")?;
    let sender = required_str(raw, MESSAGE, "sender")?;
    let created_at = required_str(raw, MESSAGE, "created_at")?;
    let updated_at = required_str(raw, MESSAGE, "updated_at")?;

    let attachments = optional_list(raw, MESSAGE, "attachments")?
        .map(|items| {
            items
                .iter()
                .map(|item| sanitize_attachment(as_record(item, ATTACHMENT, "attachments")?))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    let files = optional_list(raw, MESSAGE, "files")?
        .map(|items| {
            items
                .iter()
                .map(|item| sanitize_file(as_record(item, FILE, "files")?))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    Ok(SanitizedMessage {
        text,
        sender,
        created_at,
        updated_at,
        attachments,
        files,
    })
}

fn sanitize_attachment(raw: &RawRecord) -> Result<SanitizedAttachment> {
    Ok(SanitizedAttachment {
        file_name: required_str(raw, ATTACHMENT, "file_name")?,
        file_type: required_str(raw, ATTACHMENT, "file_type")?,
        file_size: optional_value(raw, "file_size"),
        extracted_content: optional_value(raw, "extracted_content"),
    })
}

fn sanitize_file(raw: &RawRecord) -> Result<SanitizedFile> {
    Ok(SanitizedFile {
        file_name: required_str(raw, FILE, "file_name")?,
    })
}

fn required_str(raw: &RawRecord, record: &'static str, field: &'static str) -> Result<String> {
    match raw.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ExportError::InvalidField {
            record,
            field,
            expected: "a string",
        }),
        None => Err(ExportError::FieldMissing { record, field }),
    }
}

fn optional_value(raw: &RawRecord, field: &str) -> Value {
    raw.get(field).cloned().unwrap_or(Value::Null)
}

fn optional_list<'a>(
    raw: &'a RawRecord,
    record: &'static str,
    field: &'static str,
) -> Result<Option<&'a Vec<Value>>> {
    match raw.get(field) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(_) => Err(ExportError::InvalidField {
            record,
            field,
            expected: "an array",
        }),
    }
}

fn as_record<'a>(
    value: &'a Value,
    record: &'static str,
    field: &'static str,
) -> Result<&'a RawRecord> {
    value.as_object().ok_or(ExportError::InvalidField {
        record,
        field,
        expected: "an array of objects",
    })
}
