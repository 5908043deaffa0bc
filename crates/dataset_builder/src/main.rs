//! Dataset Builder CLI
//!
//! Scenario JSON or seeded batch → JSONL / MessagePack+LZ4 dataset

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use dataset_builder::{BatchSpec, DatasetFormat, DatasetMetadata, DatasetSource};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "dataset_builder")]
#[command(about = "Build training datasets from simulated matches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Run a scenario request and export its events
    Script {
        /// Scenario request JSON file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output dataset file path
        #[arg(long)]
        out: PathBuf,

        /// jsonl or packed
        #[arg(long, default_value = "jsonl")]
        format: DatasetFormat,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Generate seeded matches in parallel and export their events
    Batch {
        #[arg(long, default_value_t = 100)]
        matches: usize,

        /// Actions per match
        #[arg(long, default_value_t = 200)]
        steps: usize,

        /// Seed of the first match
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Output dataset file path
        #[arg(long)]
        out: PathBuf,

        /// jsonl or packed
        #[arg(long, default_value = "jsonl")]
        format: DatasetFormat,

        /// Simulation preset (default, strict, permissive); falls back to PITCH_SIM_PROFILE
        #[arg(long)]
        profile: Option<String>,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Check a dataset against its SHA256 checksum
    Verify {
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        checksum: String,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Script {
            r#in,
            out,
            format,
            metadata,
        } => {
            println!("🔨 Running scenario...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {} ({})", out.display(), format);

            let meta = dataset_builder::build_dataset(&DatasetSource::Script(r#in), &out, format)?;
            finish(&meta, metadata.as_deref())?;
        }

        Commands::Batch {
            matches,
            steps,
            seed,
            out,
            format,
            profile,
            metadata,
        } => {
            let config = match profile {
                Some(name) => pitch_core::SimConfig::from_profile(&name)
                    .ok_or_else(|| anyhow::anyhow!("Unknown profile: {}", name))?,
                None => pitch_core::SimConfig::from_env_or_default(),
            };

            println!("🔨 Generating batch...");
            println!("   Matches: {} x {} steps (seed {})", matches, steps, seed);
            println!("   Output:  {} ({})", out.display(), format);

            let spec = BatchSpec {
                matches,
                steps,
                seed,
                config,
            };
            let meta = dataset_builder::build_dataset(&DatasetSource::Batch(spec), &out, format)?;
            finish(&meta, metadata.as_deref())?;
        }

        Commands::Verify { file, checksum } => {
            println!("🔍 Verifying dataset integrity...");
            if dataset_builder::verify_dataset(&file, &checksum)? {
                println!("✅ Dataset verification passed");
            } else {
                anyhow::bail!("❌ Dataset verification failed - checksum mismatch!")
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn finish(meta: &DatasetMetadata, metadata_path: Option<&Path>) -> Result<()> {
    println!("\n✅ Dataset built successfully!");
    println!("   Matches:  {}", meta.matches);
    println!("   Events:   {}", meta.events);
    println!("   Size:     {} bytes ({:.2} KB)", meta.bytes, meta.bytes as f64 / 1024.0);
    println!("   Checksum: {}", meta.checksum);
    println!("   Created:  {}", meta.created_at);

    if let Some(path) = metadata_path {
        let metadata_json = serde_json::to_string_pretty(meta)?;
        std::fs::write(path, metadata_json)?;
        println!("\n📄 Metadata saved to: {}", path.display());
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("dataset_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
