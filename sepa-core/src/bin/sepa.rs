//! SEPA command line tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sepa_core::{iban, Batch, BankToCustomerStatement, BuilderOptions, Config};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sepa")]
#[command(about = "Build SEPA payment initiations and read bank statements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a batch file as pain.001 or pain.008 XML
    Render {
        /// Batch description (TOML)
        #[arg(value_name = "BATCH")]
        batch: PathBuf,

        /// Output file; defaults to `<output_dir>/<batch name>.xml`
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Configuration file; environment variables override it
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print a camt.053 statement as JSON
    Statement {
        /// camt.053.001.02 document
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Clean, format and check an IBAN
    Iban {
        /// IBAN, separators allowed
        value: String,
    },
}

fn main() -> Result<()> {
    // stdout carries command output, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            batch,
            output,
            config,
        } => render(&batch, output, config.as_deref()),
        Command::Statement { file } => statement(&file),
        Command::Iban { value } => check_iban(&value),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            let mut config = Config::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            config.apply_env()?;
            config
        }
        None => Config::from_env()?,
    };
    Ok(config)
}

fn render(batch_path: &Path, output: Option<PathBuf>, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let batch = Batch::from_file(batch_path)
        .with_context(|| format!("Failed to read batch {}", batch_path.display()))?;

    tracing::info!(
        service = %config.service_name,
        kind = ?batch.kind,
        groups = batch.groups.len(),
        transactions = batch.transaction_count(),
        "rendering batch"
    );

    let now = chrono::Local::now().naive_local();
    let xml = batch
        .render(&BuilderOptions::from(&config), now)
        .with_context(|| format!("Batch {} rejected", batch_path.display()))?;

    let target = match output {
        Some(path) => path,
        None => {
            std::fs::create_dir_all(&config.output_dir).with_context(|| {
                format!("Failed to create {}", config.output_dir.display())
            })?;
            let stem = batch_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "message".to_string());
            config.output_dir.join(format!("{}.xml", stem))
        }
    };

    std::fs::write(&target, &xml)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    tracing::info!(path = %target.display(), bytes = xml.len(), "message written");
    println!("{}", target.display());
    Ok(())
}

fn statement(path: &Path) -> Result<()> {
    let statement = BankToCustomerStatement::read_file(path)
        .with_context(|| format!("Failed to read statement {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(&statement)?);
    Ok(())
}

fn check_iban(value: &str) -> Result<()> {
    let cleaned = iban::clean(value);
    println!("iban:        {}", cleaned);
    println!("readable:    {}", iban::format_readable(&cleaned));
    println!("well-formed: {}", iban::is_well_formed_iban(&cleaned));
    println!("checksum:    {}", iban::is_valid_iban(&cleaned));
    Ok(())
}
