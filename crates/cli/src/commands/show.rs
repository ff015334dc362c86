//! Document overview command

use anyhow::Result;
use colored::Colorize;
use diagnostics_lib::ApplicationDiagnostics;

use super::containers::ContainerRow;
use crate::output::{color_status, or_dash, print_info, print_json, print_table, OutputFormat};

/// Show terminal outcome, counts and containers of a document
pub fn show_overview(diagnostics: &ApplicationDiagnostics, format: OutputFormat) -> Result<()> {
    let summary = diagnostics.summary();

    match format {
        OutputFormat::Json => {
            let document = diagnostics.to_document()?;
            println!("{}", document);
        }
        OutputFormat::Table => {
            println!("{}", "Application Diagnostics".bold());
            println!("{}", "=".repeat(60));
            println!("Final Status:      {}", color_status(summary.final_status));
            println!("Exit Reason:       {}", or_dash(summary.exit_reason));
            println!(
                "Final Message:     {}",
                or_dash(summary.final_message.as_deref())
            );
            println!("Containers:        {}", summary.container_count);
            println!(
                "Recently Failed:   {}",
                if summary.failed_container_count > 0 {
                    summary.failed_container_count.to_string().red().to_string()
                } else {
                    "0".to_string()
                }
            );
            println!();

            let failed = diagnostics.recent_failed_containers();
            let rows: Vec<ContainerRow> = diagnostics
                .containers()
                .iter()
                .map(|c| ContainerRow::new(c, failed.contains(&c.container_id)))
                .collect();
            print_table(rows, "No containers recorded");

            let unknown: Vec<&str> = failed
                .iter()
                .filter(|id| diagnostics.container(id).is_none())
                .map(String::as_str)
                .collect();
            if !unknown.is_empty() {
                println!();
                print_info(&format!(
                    "Failed containers without records: {}",
                    unknown.join(", ")
                ));
            }

            if !diagnostics.is_finalized() {
                println!();
                print_info("Application has not reported a final status yet");
            }
        }
    }

    Ok(())
}

/// Summary only, used by `validate --format json`
pub fn print_summary_json(diagnostics: &ApplicationDiagnostics) -> Result<()> {
    print_json(&diagnostics.summary())
}
