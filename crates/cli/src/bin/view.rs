use anyhow::Context;
use chat_export_core::application::TranscriptServiceImpl;
use chat_export_core::ports::{ExportSource, ExportWriter};
use clap::Parser;
use json_adapter::JsonFileSource;
use markdown_adapter::MarkdownTranscriptWriter;
use std::path::PathBuf;

/// CLI tool to render a sanitized chat export as a Markdown transcript
#[derive(Parser, Debug)]
#[command(name = "chat-view", version)]
#[command(about = "Render a chat export JSON file as a readable Markdown transcript")]
struct Cli {
    /// Path to the chat export JSON file (as written by chat-sanitize)
    export_file: PathBuf,

    /// Path where the Markdown transcript will be written
    output_file: PathBuf,
}

fn main() {
    cli::init_logging();

    let cli = Cli::parse();

    let export_source: Box<dyn ExportSource> = Box::new(JsonFileSource::new(&cli.export_file));
    let transcript_writer: Box<dyn ExportWriter> =
        Box::new(MarkdownTranscriptWriter::new(&cli.output_file));
    let service = TranscriptServiceImpl::new(export_source, transcript_writer);

    match service
        .execute_rendering()
        .with_context(|| format!("failed to render {}", cli.export_file.display()))
    {
        Ok(summary) => {
            println!(
                "Rendered {} messages to {}",
                summary.message_count, summary.output_location
            );
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
