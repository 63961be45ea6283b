use anyhow::Context;
use chat_export_core::application::ConversionServiceImpl;
use chat_export_core::domain::ConversionSummary;
use chat_export_core::ports::{ExportSource, ExportWriter, PreviewReporter};
use clap::Parser;
use console_adapter::ConsolePreviewReporter;
use json_adapter::{JsonFileSource, JsonFileWriter};
use std::path::PathBuf;

/// CLI tool to strip sensitive fields from a chat export and sort it chronologically
#[derive(Parser, Debug)]
#[command(name = "chat-sanitize", version)]
#[command(about = "Process a chat JSON file to sort messages and remove sensitive data")]
struct Cli {
    /// Path to the input JSON file containing chat messages
    input_file: PathBuf,

    /// Path where the processed JSON file will be saved
    output_file: PathBuf,
}

fn main() {
    cli::init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<ConversionSummary> {
    // Instantiate concrete implementations of secondary adapters
    let export_source: Box<dyn ExportSource> = Box::new(JsonFileSource::new(&cli.input_file));
    let export_writer: Box<dyn ExportWriter> = Box::new(JsonFileWriter::new(&cli.output_file));
    let preview_reporter: Box<dyn PreviewReporter> = Box::new(ConsolePreviewReporter::new());

    // Instantiate the core business service with dependency injection
    let service = ConversionServiceImpl::new(export_source, export_writer, preview_reporter);

    let summary = service
        .execute_conversion()
        .with_context(|| format!("failed to convert {}", cli.input_file.display()))?;

    tracing::debug!(messages = summary.message_count, "done");
    Ok(summary)
}
