use crate::domain::SanitizedMessage;
use crate::error::ExportError;
use crate::ports::Result;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Characters of message text shown in a preview line
pub const PREVIEW_TEXT_LIMIT: usize = 100;

/// Minimum width of the sender column in a preview line
pub const SENDER_COLUMN_WIDTH: usize = 9;

/// Width of the dashed separator between preview lines
pub const SEPARATOR_WIDTH: usize = 120;

/// Timestamp layouts that carry an explicit offset, tried after RFC 3339
const OFFSET_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M%z",
];

/// Timestamp layouts without an offset
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A parsed export timestamp, remembering whether the source carried an offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Offset(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl Timestamp {
    /// Comparable instant; naive values are read as UTC
    pub fn instant(&self) -> DateTime<FixedOffset> {
        match self {
            Timestamp::Offset(dt) => *dt,
            Timestamp::Naive(naive_dt) => naive_dt.and_utc().fixed_offset(),
        }
    }

    /// ISO 8601 text as the preview shows it, e.g. "2024-01-01T00:00:00+00:00"
    /// Microseconds are only printed when non-zero; naive values print no offset
    pub fn to_preview_string(&self) -> String {
        match self {
            Timestamp::Offset(dt) if dt.timestamp_subsec_micros() == 0 => {
                dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
            }
            Timestamp::Offset(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string(),
            Timestamp::Naive(naive_dt) if naive_dt.and_utc().timestamp_subsec_micros() == 0 => {
                naive_dt.format("%Y-%m-%dT%H:%M:%S").to_string()
            }
            Timestamp::Naive(naive_dt) => naive_dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }
    }
}

/// Parses an export timestamp
/// Supports various formats: RFC 3339 with `Z` or an explicit offset, minute precision,
/// naive ISO 8601, date only
pub fn parse_timestamp(value: &str) -> Result<Timestamp> {
    // A trailing Zulu designator becomes an explicit offset
    let normalized = match value.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => value.to_string(),
    };

    // Try parsing as RFC 3339 (e.g., "2025-12-16T10:30:00+00:00" or "2025-12-16T10:30:00.123+02:00")
    let rfc3339_err = match DateTime::parse_from_rfc3339(&normalized) {
        Ok(dt) => return Ok(Timestamp::Offset(dt)),
        Err(err) => err,
    };

    // Try compact offsets and minute precision (e.g., "2025-12-16T10:30:00+0200", "2025-12-16T10:30+02:00")
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Ok(Timestamp::Offset(dt));
        }
    }

    // Try parsing as ISO 8601 without timezone
    for format in NAIVE_FORMATS {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(Timestamp::Naive(naive_dt));
        }
    }

    // Try parsing as date only (e.g., "2025-12-16") - treat as midnight
    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        return Ok(Timestamp::Naive(date.and_time(NaiveTime::MIN)));
    }

    Err(ExportError::TimestampParse {
        value: value.to_string(),
        source: rfc3339_err,
    })
}

/// Parses a timestamp string and converts it to local timezone
/// Falls back to the original string when it cannot be parsed
pub fn format_timestamp_to_local(timestamp_str: &str) -> String {
    match parse_timestamp(timestamp_str) {
        Ok(timestamp) => timestamp
            .instant()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string(),
        Err(_) => timestamp_str.to_string(),
    }
}

/// Cuts text down to the preview limit, marking the cut with "..."
pub fn truncate_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_TEXT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Formats one message as `<timestamp> | <sender> | <text preview>`
pub fn format_preview_line(message: &SanitizedMessage) -> Result<String> {
    let timestamp = parse_timestamp(&message.created_at)?;
    Ok(format!(
        "{} | {:<width$} | {}",
        timestamp.to_preview_string(),
        message.sender,
        truncate_preview(&message.text),
        width = SENDER_COLUMN_WIDTH,
    ))
}

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}
