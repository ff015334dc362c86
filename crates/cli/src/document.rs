//! Reading and writing diagnostics documents

use anyhow::{Context, Result};
use diagnostics_lib::{ApplicationDiagnostics, DiagnosticsLogger};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Path value meaning "read from stdin"
pub const STDIN: &str = "-";

/// Read the raw document text from a file or stdin
pub fn read_source(path: &str) -> Result<String> {
    if path == STDIN {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read document from stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read document {}", path))
}

/// Parse document text, logging the outcome against its source
pub fn parse(path: &str, content: &str) -> Result<ApplicationDiagnostics> {
    let logger = DiagnosticsLogger::new(path);

    match ApplicationDiagnostics::from_document(content) {
        Ok(diagnostics) => {
            logger.log_document_loaded(&diagnostics.summary());
            Ok(diagnostics)
        }
        Err(e) => {
            logger.log_document_rejected(&e);
            Err(anyhow::Error::new(e).context(format!("Invalid diagnostics document {}", path)))
        }
    }
}

/// Read and parse a document
pub fn load(path: &str) -> Result<ApplicationDiagnostics> {
    let content = read_source(path)?;
    debug!(source = %path, bytes = content.len(), "Read diagnostics document");
    parse(path, &content)
}

/// Write a document to a file, or stdout when no file is given
pub fn write(source: &str, document: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(output) => {
            std::fs::write(output, document)
                .with_context(|| format!("Failed to write document {}", output.display()))?;
            DiagnosticsLogger::new(source)
                .log_document_written(&output.display().to_string(), document.len());
        }
        None => println!("{}", document),
    }

    Ok(())
}
