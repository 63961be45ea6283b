use crate::domain::ConversationExport;
use crate::error::ExportError;
use serde_json::Value;

pub type Result<T> = std::result::Result<T, ExportError>;

pub trait ExportSource {
    // Reads the whole source document into an untyped JSON value
    fn load_document(&self) -> Result<Value>;
}

/// Trait for persisting the sanitized export
/// This is a port (interface) that defines how the core communicates with output adapters
pub trait ExportWriter: Send + Sync {
    fn write(&self, export: &ConversationExport) -> Result<()>;

    /// Human-readable location of the written export, used in the summary
    fn location(&self) -> String;
}

/// Trait for presenting a finished export to the user
pub trait PreviewReporter: Send + Sync {
    fn report(&self, export: &ConversationExport, location: &str) -> Result<()>;
}
