mod cli;
mod config;
mod embedding;
mod flatten;
mod matching;
mod tabular;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fieldmap",
    version,
    about = "Semantic schema field mapper — matches source fields to target fields by embedding similarity"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Match source schema fields against target schema fields
    Map {
        /// Source schema listing (CSV: table,source_system,field_name,description)
        #[arg(long)]
        source: PathBuf,
        /// Target schema listing (CSV: table,field_name,description)
        #[arg(long)]
        target: PathBuf,
        /// Output path for the match report
        #[arg(long, default_value = "matches.csv")]
        output: PathBuf,
        /// Minimum combined score for a pairing to be reported
        #[arg(long)]
        threshold: Option<f32>,
        /// Weight of the description similarity signal
        #[arg(long)]
        desc_weight: Option<f32>,
        /// Weight of the field-name similarity signal
        #[arg(long)]
        field_weight: Option<f32>,
    },
    /// Flatten a YAML schema's definitions into a CSV field listing
    Flatten {
        /// Input YAML schema file
        input: PathBuf,
        /// Output CSV path (defaults to <info.title>.csv)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Manage the embedding model
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },
    /// Check configuration and model file health
    Doctor,
}

#[derive(Subcommand)]
enum ModelAction {
    /// Download the embedding model to ~/.fieldmap/models/
    Download,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::FieldmapConfig::load()?;

    // Initialize tracing with the configured log level, to stderr so stdout
    // stays clean for command output.
    let filter = EnvFilter::try_new(&config.logging.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Map {
            source,
            target,
            output,
            threshold,
            desc_weight,
            field_weight,
        } => {
            let options = cli::map::MapOptions {
                desc_weight,
                field_weight,
                threshold,
            };
            cli::map::map(&config, &source, &target, &output, &options).await?;
        }
        Command::Flatten { input, output } => {
            cli::flatten::flatten(&input, output)?;
        }
        Command::Model { action } => match action {
            ModelAction::Download => {
                cli::model_download(&config.embedding).await?;
            }
        },
        Command::Doctor => {
            cli::doctor::doctor(&config)?;
        }
    }

    Ok(())
}
