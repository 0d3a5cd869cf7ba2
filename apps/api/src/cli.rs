use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::batch::{list_directory, BatchProcessor, DirectoryProvider, Document, ResumeRecord};
use crate::config::Config;
use crate::export::{write_csv_file, write_records};

#[derive(Debug, Parser)]
#[command(name = "resume-parser", version, about = "Extract candidate names and emails from resumes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the upload web UI and JSON API (default)
    Serve,
    /// Parse every PDF/DOCX directly under a directory
    Scan {
        dir: PathBuf,
        /// Write CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse the given files, in argument order
    Parse {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run_scan(config: &Config, dir: &Path, output: Option<&Path>) -> Result<()> {
    let filenames = list_directory(dir)
        .with_context(|| format!("Failed to list directory '{}'", dir.display()))?;
    info!(dir = %dir.display(), files = filenames.len(), "scanning resume directory");

    let processor = BatchProcessor::new(config.inference);
    let records = processor.process_from(&filenames, &DirectoryProvider::new(dir));
    emit(&records, output)
}

pub fn run_parse(config: &Config, files: &[PathBuf], output: Option<&Path>) -> Result<()> {
    let documents: Vec<Document> = files.iter().map(Document::from_path).collect();
    let records = BatchProcessor::new(config.inference).process(&documents);
    emit(&records, output)
}

fn emit(records: &[ResumeRecord], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_csv_file(path, records)?;
            info!(path = %path.display(), records = records.len(), "CSV written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_records(&mut stdout, records)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
