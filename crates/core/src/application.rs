use crate::domain::{ConversationExport, ConversionSummary};
use crate::ports::{ExportSource, ExportWriter, PreviewReporter, Result};
use crate::sanitizer::{raw_messages, sanitize_all};
use crate::sorter::sort_messages;
use tracing::{debug, info};

/// Application service that turns a raw chat export into a sanitized, chronological one
pub struct ConversionServiceImpl {
    export_source: Box<dyn ExportSource>,
    export_writer: Box<dyn ExportWriter>,
    preview_reporter: Box<dyn PreviewReporter>,
}

impl ConversionServiceImpl {
    /// Creates a new ConversionServiceImpl with the given dependencies
    pub fn new(
        export_source: Box<dyn ExportSource>,
        export_writer: Box<dyn ExportWriter>,
        preview_reporter: Box<dyn PreviewReporter>,
    ) -> Self {
        Self {
            export_source,
            export_writer,
            preview_reporter,
        }
    }

    /// Executes the conversion: load, sanitize, sort, write, then report.
    ///
    /// Nothing is written unless every message sanitizes and sorts cleanly.
    pub fn execute_conversion(&self) -> Result<ConversionSummary> {
        let document = self.export_source.load_document()?;
        let sanitized = sanitize_all(raw_messages(&document)?)?;
        let sorted = sort_messages(sanitized)?;
        let export = ConversationExport::from_sorted(sorted);

        let location = self.export_writer.location();
        self.export_writer.write(&export)?;
        debug!(%location, "export written");

        self.preview_reporter.report(&export, &location)?;

        info!(messages = export.chat_messages.len(), %location, "conversion finished");
        Ok(ConversionSummary {
            message_count: export.chat_messages.len(),
            output_location: location,
        })
    }
}

/// Application service that renders a written export as a readable transcript
pub struct TranscriptServiceImpl {
    export_source: Box<dyn ExportSource>,
    transcript_writer: Box<dyn ExportWriter>,
}

impl TranscriptServiceImpl {
    pub fn new(
        export_source: Box<dyn ExportSource>,
        transcript_writer: Box<dyn ExportWriter>,
    ) -> Self {
        Self {
            export_source,
            transcript_writer,
        }
    }

    /// Loads an export in the envelope layout and hands it to the transcript writer
    pub fn execute_rendering(&self) -> Result<ConversionSummary> {
        let document = self.export_source.load_document()?;
        let export = ConversationExport::from_document(document)?;

        let location = self.transcript_writer.location();
        self.transcript_writer.write(&export)?;

        info!(messages = export.chat_messages.len(), %location, "transcript rendered");
        Ok(ConversionSummary {
            message_count: export.chat_messages.len(),
            output_location: location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    struct StaticSource(Value);

    impl ExportSource for StaticSource {
        fn load_document(&self) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    #[derive(Clone, Default)]
    struct Recorder {
        written: Arc<Mutex<Vec<ConversationExport>>>,
        reported: Arc<Mutex<Vec<(usize, String)>>>,
    }

    impl ExportWriter for Recorder {
        fn write(&self, export: &ConversationExport) -> Result<()> {
            self.written.lock().unwrap().push(export.clone());
            Ok(())
        }

        fn location(&self) -> String {
            "memory://export.json".to_string()
        }
    }

    impl PreviewReporter for Recorder {
        fn report(&self, export: &ConversationExport, location: &str) -> Result<()> {
            self.reported
                .lock()
                .unwrap()
                .push((export.chat_messages.len(), location.to_string()));
            Ok(())
        }
    }

    fn service(document: Value) -> (ConversionServiceImpl, Recorder) {
        let recorder = Recorder::default();
        let service = ConversionServiceImpl::new(
            Box::new(StaticSource(document)),
            Box::new(recorder.clone()),
            Box::new(recorder.clone()),
        );
        (service, recorder)
    }

    #[test]
    fn test_execute_conversion_sorts_and_wraps() {
        let (service, recorder) = service(json!({"chat_messages": [
            {"text": "hi", "sender": "bob", "created_at": "2024-01-02T00:00:00Z", "updated_at": "2024-01-02T00:00:00Z"},
            {"text": "yo", "sender": "amy", "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"}
        ]}));

        let summary = service.execute_conversion().unwrap();
        assert_eq!(summary.message_count, 2);
        assert_eq!(summary.output_location, "memory://export.json");

        let written = recorder.written.lock().unwrap();
        let export = &written[0];
        let senders: Vec<&str> = export.chat_messages.iter().map(|m| m.sender.as_str()).collect();
        assert_eq!(senders, ["amy", "bob"]);
        assert_eq!(export.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(export.updated_at.as_deref(), Some("2024-01-02T00:00:00Z"));

        let reported = recorder.reported.lock().unwrap();
        assert_eq!(*reported, [(2, "memory://export.json".to_string())]);
    }

    #[test]
    fn test_execute_conversion_missing_field_writes_nothing() {
        let (service, recorder) = service(json!({"chat_messages": [
            {"text": "hi", "created_at": "2024-01-02T00:00:00Z", "updated_at": "2024-01-02T00:00:00Z"}
        ]}));

        let err = service.execute_conversion().unwrap_err();
        assert!(matches!(
            err,
            ExportError::FieldMissing {
                field: "sender",
                ..
            }
        ));
        assert!(recorder.written.lock().unwrap().is_empty());
        assert!(recorder.reported.lock().unwrap().is_empty());
    }

    #[test]
    fn test_execute_conversion_bad_timestamp_writes_nothing() {
        let (service, recorder) = service(json!({"chat_messages": [
            {"text": "hi", "sender": "bob", "created_at": "soon", "updated_at": "soon"}
        ]}));

        assert!(matches!(
            service.execute_conversion(),
            Err(ExportError::TimestampParse { .. })
        ));
        assert!(recorder.written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_execute_conversion_without_messages() {
        let (service, recorder) = service(json!({"name": "Empty chat"}));

        let summary = service.execute_conversion().unwrap();
        assert_eq!(summary.message_count, 0);

        let written = recorder.written.lock().unwrap();
        assert_eq!(written[0], ConversationExport::from_sorted(Vec::new()));
    }

    #[test]
    fn test_execute_rendering_keeps_stored_order() {
        let recorder = Recorder::default();
        let service = TranscriptServiceImpl::new(
            Box::new(StaticSource(json!({
                "name": "Chat Export",
                "created_at": "2024-01-02T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "chat_messages": [
                    {"text": "hi", "sender": "bob", "created_at": "2024-01-02T00:00:00Z", "updated_at": "2024-01-02T00:00:00Z"},
                    {"text": "yo", "sender": "amy", "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"}
                ]
            }))),
            Box::new(recorder.clone()),
        );

        let summary = service.execute_rendering().unwrap();
        assert_eq!(summary.message_count, 2);

        let written = recorder.written.lock().unwrap();
        let senders: Vec<&str> = written[0].chat_messages.iter().map(|m| m.sender.as_str()).collect();
        assert_eq!(senders, ["bob", "amy"]);
    }

    #[test]
    fn test_execute_rendering_rejects_non_export() {
        let recorder = Recorder::default();
        let service = TranscriptServiceImpl::new(
            Box::new(StaticSource(json!({"chat_messages": "nope"}))),
            Box::new(recorder.clone()),
        );

        assert!(matches!(
            service.execute_rendering(),
            Err(ExportError::MalformedDocument(_))
        ));
        assert!(recorder.written.lock().unwrap().is_empty());
    }
}
