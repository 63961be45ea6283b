use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a conversion run.
///
/// No variant is recovered from: the first error ends the run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed export document: {0}")]
    MalformedDocument(String),

    #[error("{record} is missing required field `{field}`")]
    FieldMissing {
        record: &'static str,
        field: &'static str,
    },

    #[error("{record} field `{field}` must be {expected}")]
    InvalidField {
        record: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid timestamp {value:?}")]
    TimestampParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("failed to serialize export")]
    Serialize(#[source] serde_json::Error),
}

impl ExportError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
