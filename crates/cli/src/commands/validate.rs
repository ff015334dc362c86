//! Document validation and normalization commands

use anyhow::Result;
use std::path::Path;

use super::show::print_summary_json;
use crate::document;
use crate::output::{print_success, print_warning, OutputFormat};

/// Parse a document and report what it contains
pub fn validate(path: &str, format: OutputFormat) -> Result<()> {
    let diagnostics = document::load(path)?;

    match format {
        OutputFormat::Json => print_summary_json(&diagnostics)?,
        OutputFormat::Table => {
            let summary = diagnostics.summary();
            print_success(&format!(
                "Valid diagnostics document: {} containers, {} recently failed",
                summary.container_count, summary.failed_container_count
            ));

            let orphaned = summary.failed_container_count - summary.failed_with_records;
            if orphaned > 0 {
                print_warning(&format!(
                    "{} failed container(s) have no container record",
                    orphaned
                ));
            }
        }
    }

    Ok(())
}

/// Re-emit a document in canonical form
pub fn normalize(path: &str, output: Option<&Path>) -> Result<()> {
    let diagnostics = document::load(path)?;
    let canonical = diagnostics.to_document()?;
    document::write(path, &canonical, output)
}
