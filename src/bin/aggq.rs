//! aggq — The aggregation query builder CLI
//!
//! Build aggregation queries from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Build a query step by step
//! aggq build select "fields region" "sum amount" "from sales"
//!
//! # Run a script of builder commands
//! aggq run monthly.aggq
//!
//! # Interactive mode
//! aggq repl
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use aggq::config::{Config, OutputFormat};
use aggq::prelude::*;

#[derive(Parser)]
#[command(name = "aggq")]
#[command(version)]
#[command(about = "Aggregation query builder CLI", long_about = None)]
#[command(after_help = "EXAMPLES:
    aggq build select 'fields A,B,C' 'sum D,E' 'from T'
    aggq build select 'count id' 'from orders' --format json
    aggq cast price numeric")]
struct Cli {
    /// Output format (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Path to a config file
    #[arg(long, env = "AGGQ_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply builder commands in order and print the query
    Build {
        /// One builder command per argument, e.g. "fields a,b"
        steps: Vec<String>,
    },
    /// Run a script file with one builder command per line
    Run {
        /// The script to run
        file: PathBuf,
    },
    /// Interactive REPL mode
    Repl,
    /// Render a standalone CAST expression
    Cast {
        field: String,
        target_type: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "aggq=debug" } else { "aggq=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    if !config.output.color {
        colored::control::set_override(false);
    }
    let format = cli.format.unwrap_or(config.output.format);

    match &cli.command {
        Some(Commands::Build { steps }) => build_query(steps, format),
        Some(Commands::Run { file }) => run_script(file, format),
        Some(Commands::Repl) => {
            aggq::repl::run_repl(&config);
            Ok(())
        }
        Some(Commands::Cast { field, target_type }) => {
            println!("{}", cast(field.as_str(), target_type.as_str()).to_sql());
            Ok(())
        }
        None => {
            println!("{}", "aggq — Aggregation Query Builder".cyan().bold());
            println!();
            println!("Usage: aggq <COMMAND> [OPTIONS]");
            println!();
            println!("Try: aggq --help");
            Ok(())
        }
    }
}

fn build_query(steps: &[String], format: OutputFormat) -> anyhow::Result<()> {
    let mut session = Session::new();
    for (i, step) in steps.iter().enumerate() {
        tracing::debug!(step = i + 1, %step, "applying step");
        if let Some(output) = session
            .execute_line(step)
            .with_context(|| format!("step {} ('{}') failed", i + 1, step))?
        {
            println!("{}", output.dimmed());
        }
    }

    let builder = session
        .builder()
        .ok_or(QueryError::InvalidBuilder)?;

    match format {
        OutputFormat::Sql => println!("{}", builder.build().white()),
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "sql": builder.build(),
                "query": builder,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

fn run_script(file: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let script = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;

    let outputs = Session::new().run_script(&script)?;

    match format {
        OutputFormat::Sql => {
            for output in &outputs {
                println!("{}", output.white());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outputs)?),
    }
    Ok(())
}
