use chat_export_core::domain::ConversationExport;
use chat_export_core::error::ExportError;
use chat_export_core::ports::{ExportSource, ExportWriter, Result};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// JSON file implementation of the ExportSource trait
pub struct JsonFileSource {
    input_path: PathBuf,
}

impl JsonFileSource {
    /// Creates a new JsonFileSource reading from the given path
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
        }
    }
}

impl ExportSource for JsonFileSource {
    fn load_document(&self) -> Result<Value> {
        let contents = fs::read_to_string(&self.input_path)
            .map_err(|err| ExportError::io("read", &self.input_path, err))?;
        debug!(path = %self.input_path.display(), bytes = contents.len(), "read export");

        serde_json::from_str(&contents).map_err(|source| ExportError::Parse {
            path: self.input_path.clone(),
            source,
        })
    }
}

/// Writes the export as 2-space indented JSON, replacing any existing file
pub struct JsonFileWriter {
    output_path: PathBuf,
}

impl JsonFileWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }
}

impl ExportWriter for JsonFileWriter {
    fn write(&self, export: &ConversationExport) -> Result<()> {
        // Serialize fully before touching the file
        let rendered = serde_json::to_string_pretty(export).map_err(ExportError::Serialize)?;

        fs::write(&self.output_path, rendered)
            .map_err(|err| ExportError::io("write", &self.output_path, err))
    }

    fn location(&self) -> String {
        self.output_path.display().to_string()
    }
}
