//! Application Diagnostics CLI
//!
//! A command-line tool for inspecting the diagnostics documents an
//! application master reports about itself and its containers.

mod commands;
mod config;
mod document;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{containers, show, validate};
use diagnostics_lib::observability::{init_tracing, LogFormat};
use std::path::PathBuf;
use std::process::ExitCode;

/// Application Diagnostics CLI
#[derive(Parser)]
#[command(name = "appdiag")]
#[command(author, version, about = "CLI for Application Diagnostics documents", long_about = None)]
pub struct Cli {
    /// Output format (defaults to the configured format, then table)
    #[arg(long, short, global = true)]
    pub format: Option<output::OutputFormat>,

    /// Path to a configuration file (can also be set via APPDIAG_CONFIG env var)
    #[arg(long, env = "APPDIAG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show an overview of a diagnostics document
    Show {
        /// Document path, or - for stdin
        path: String,
    },

    /// List the containers in a diagnostics document
    Containers {
        /// Document path, or - for stdin
        path: String,

        /// Only list recently failed containers
        #[arg(long)]
        failed_only: bool,

        /// Filter by component name
        #[arg(long, short)]
        component: Option<String>,
    },

    /// Show a single container in detail
    Container {
        /// Document path, or - for stdin
        path: String,

        /// Container ID
        id: String,
    },

    /// Check that a document parses
    Validate {
        /// Document path, or - for stdin
        path: String,
    },

    /// Rewrite a document in canonical indented form
    Normalize {
        /// Document path, or - for stdin
        path: String,

        /// Output file path (stdout if not specified)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load(cli.config.as_deref())?;

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    init_tracing(LogFormat::from_name(&config.log_format), level);

    let format = cli.format.unwrap_or_else(|| config.output_format());

    match cli.command {
        Commands::Show { path } => {
            let diagnostics = document::load(&path)?;
            show::show_overview(&diagnostics, format)?;
        }
        Commands::Containers {
            path,
            failed_only,
            component,
        } => {
            let diagnostics = document::load(&path)?;
            containers::list_containers(&diagnostics, failed_only, component.as_deref(), format)?;
        }
        Commands::Container { path, id } => {
            let diagnostics = document::load(&path)?;
            containers::show_container(&diagnostics, &path, &id, format)?;
        }
        Commands::Validate { path } => {
            validate::validate(&path, format)?;
        }
        Commands::Normalize { path, output } => {
            validate::normalize(&path, output.as_deref())?;
        }
    }

    Ok(())
}
