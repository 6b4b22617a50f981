//! Mica CLI - build metadata import files from source trees
//!
//! Usage:
//!   mica run --config mica.toml --input tree.json [--output-dir out/]
//!   mica validate --config mica.toml
//!
//! Examples:
//!   mica run --config oracle.toml --input exports/orcl.json
//!   mica validate --config oracle.toml

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use mica::config::Settings;
use mica::output::{LocalDirStore, ObjectStore};
use mica::pipeline;
use mica::source;

#[derive(Parser)]
#[command(name = "mica")]
#[command(about = "Mica - builds metadata import graphs for catalog ingestion")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline over a source tree file
    Run {
        /// Path to the TOML configuration
        #[arg(short, long)]
        config: PathBuf,

        /// Path to the JSON source tree export
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the generated JSONL file
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,

        /// Directory to mirror the upload into (defaults to no upload)
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },

    /// Load and validate a configuration without running
    Validate {
        /// Path to the TOML configuration
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Run {
            config,
            input,
            output_dir,
            store_dir,
        } => {
            let settings = Settings::load(&config).map_err(|e| e.to_string())?;
            let static_source = source::file::load(&input)
                .await
                .map_err(|e| e.to_string())?;

            let store = store_dir.map(LocalDirStore::new);
            let store_ref = store.as_ref().map(|s| s as &dyn ObjectStore);

            // The run stamp names the remote folder; the core itself is
            // wall-clock free.
            let stamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs().to_string())
                .unwrap_or_else(|_| "0".to_string());

            let summary =
                pipeline::run(&settings, &static_source, store_ref, &output_dir, &stamp)
                    .await
                    .map_err(|e| e.to_string())?;

            println!(
                "{} entries written to {} ({} databases, {} schemas, {} datasets, {} with lineage)",
                summary.entries,
                summary.output_file.display(),
                summary.databases,
                summary.schemas,
                summary.datasets,
                summary.lineage_merged,
            );
            if !summary.warnings.is_empty() {
                println!("{} lineage warning(s):", summary.warnings.len());
                for warning in &summary.warnings {
                    println!("  {warning}");
                }
            }
            Ok(())
        }

        Commands::Validate { config } => {
            let settings = Settings::load(&config).map_err(|e| e.to_string())?;
            let system = settings.source.system().map_err(|e| e.to_string())?;
            println!(
                "configuration valid: system={}, target {}/{}/{}",
                system.as_str(),
                settings.target.project,
                settings.target.location,
                settings.target.entry_group,
            );
            Ok(())
        }
    }
}
