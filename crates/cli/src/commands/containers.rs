//! Container listing and detail commands

use anyhow::Result;
use colored::Colorize;
use diagnostics_lib::{ApplicationDiagnostics, ContainerInformation, DiagnosticsLogger};
use tabled::Tabled;

use crate::output::{
    color_exit_code, format_timestamp, or_dash, print_json, print_table, OutputFormat,
};

/// Row for containers table
#[derive(Tabled)]
pub struct ContainerRow {
    #[tabled(rename = "Container")]
    container_id: String,
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "State")]
    state: i32,
    #[tabled(rename = "Exit Code")]
    exit_code: String,
    #[tabled(rename = "Started")]
    started: String,
    #[tabled(rename = "Failed")]
    failed: String,
}

impl ContainerRow {
    pub fn new(container: &ContainerInformation, failed: bool) -> Self {
        Self {
            container_id: container.container_id.clone(),
            component: or_dash(container.component.as_deref()),
            host: or_dash(container.host.as_deref()),
            state: container.state,
            exit_code: color_exit_code(container.exit_code),
            started: format_timestamp(container.started_at()),
            failed: if failed {
                "yes".red().to_string()
            } else {
                String::new()
            },
        }
    }
}

/// Containers matching the listing filters, in identifier order
pub fn select_containers<'a>(
    diagnostics: &'a ApplicationDiagnostics,
    failed_only: bool,
    component: Option<&str>,
) -> Vec<&'a ContainerInformation> {
    diagnostics
        .containers()
        .iter()
        .filter(|c| !failed_only || diagnostics.recent_failed_containers().contains(&c.container_id))
        .filter(|c| component.map_or(true, |name| c.component.as_deref() == Some(name)))
        .collect()
}

/// List containers in a document
pub fn list_containers(
    diagnostics: &ApplicationDiagnostics,
    failed_only: bool,
    component: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let selected = select_containers(diagnostics, failed_only, component);

    match format {
        OutputFormat::Json => print_json(&selected)?,
        OutputFormat::Table => {
            let failed = diagnostics.recent_failed_containers();
            let rows: Vec<ContainerRow> = selected
                .iter()
                .map(|c| ContainerRow::new(c, failed.contains(&c.container_id)))
                .collect();
            let total = rows.len();

            print_table(rows, "No containers found");
            if total > 0 {
                println!("\nTotal: {} containers", total);
            }
        }
    }

    Ok(())
}

/// Show one container in detail
pub fn show_container(
    diagnostics: &ApplicationDiagnostics,
    source: &str,
    container_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let Some(container) = diagnostics.container(container_id) else {
        DiagnosticsLogger::new(source).log_container_missing(container_id);
        anyhow::bail!("Container {} not found in {}", container_id, source);
    };
    let failed = diagnostics.recent_failed_containers().contains(container_id);

    match format {
        OutputFormat::Json => print_json(container)?,
        OutputFormat::Table => {
            println!("{}", "Container".bold());
            println!("{}", "=".repeat(60));
            println!("ID:           {}", container.container_id.cyan());
            println!("Component:    {}", or_dash(container.component.as_deref()));
            println!("App Version:  {}", or_dash(container.app_version.as_deref()));
            println!("Host:         {}", or_dash(container.host.as_deref()));
            println!("Host URL:     {}", or_dash(container.host_url.as_deref()));
            println!("Placement:    {}", or_dash(container.placement.as_deref()));
            println!("State:        {}", container.state);
            println!("Released:     {}", or_dash(container.released));
            println!("Exit Code:    {}", color_exit_code(container.exit_code));
            println!("Created:      {}", format_timestamp(container.created_at()));
            println!("Started:      {}", format_timestamp(container.started_at()));
            println!("Log Link:     {}", or_dash(container.log_link.as_deref()));
            if failed {
                println!("Recent Fail:  {}", "yes".red());
            }

            if let Some(text) = &container.diagnostics {
                println!();
                println!("{}", "Diagnostics".bold());
                println!("{}", "-".repeat(60));
                println!("{}", text);
            }

            if let Some(output) = container.output.as_ref().filter(|o| !o.is_empty()) {
                println!();
                println!("{}", "Output".bold());
                println!("{}", "-".repeat(60));
                for line in output {
                    println!("{}", line);
                }
            }
        }
    }

    Ok(())
}
