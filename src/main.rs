//! Stable hold-out split management for tabular ML experiments.
//!
//! # Examples
//!
//! ```bash
//! cargo run -- split --data-path data --file users.csv
//! cargo run -- load --data-path data --file users.csv
//! cargo run -- stats --data-path data --file users.csv
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use ml_datasplit::{ensure_split, load_full, load_split, Dataset, SplitConfig, SplitOutcome};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "ml_datasplit")]
#[command(about = "Stable stratified hold-out splits for tabular datasets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split the source table into visible and hold-out portions
    Split {
        /// Directory containing the source table
        #[arg(short, long, default_value = "data")]
        data_path: PathBuf,

        /// Source filename inside the data directory
        #[arg(short, long, default_value = "dataset.csv")]
        file: String,

        /// Fraction of rows routed to the hold-out portion
        #[arg(short, long, default_value = "0.2")]
        test_size: f64,

        /// Keep the table order instead of shuffling rows
        #[arg(long)]
        no_shuffle: bool,

        /// Report per-class row counts
        #[arg(short, long)]
        verbose: bool,
    },

    /// Load a portion and print its shape and class balance
    Load {
        /// Directory containing the source table
        #[arg(short, long, default_value = "data")]
        data_path: PathBuf,

        /// Source filename inside the data directory
        #[arg(short, long, default_value = "dataset.csv")]
        file: String,

        /// Load the unsplit source table instead of the split portions
        #[arg(long)]
        full: bool,

        /// Report per-class row counts
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show row counts and class balance for the persisted portions
    Stats {
        /// Directory containing the source table
        #[arg(short, long, default_value = "data")]
        data_path: PathBuf,

        /// Source filename inside the data directory
        #[arg(short, long, default_value = "dataset.csv")]
        file: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            data_path,
            file,
            test_size,
            no_shuffle,
            verbose,
        } => {
            let config = SplitConfig {
                data_path,
                source_file: file,
                test_size,
                shuffle: !no_shuffle,
                verbose,
            };

            let outcome = ensure_split(&config)
                .with_context(|| format!("Failed to split {:?}", config.source_path()))?;

            match outcome {
                SplitOutcome::Created => info!(
                    "Split created: {:?} / {:?}",
                    config.visible_path(),
                    config.hidden_path()
                ),
                SplitOutcome::Reused => info!("Split artifacts already exist, nothing to do"),
            }
        }

        Commands::Load {
            data_path,
            file,
            full,
            verbose,
        } => {
            let config = SplitConfig {
                data_path,
                source_file: file,
                verbose,
                ..SplitConfig::default()
            };

            if full {
                let dataset = load_full(&config)
                    .with_context(|| format!("Failed to load {:?}", config.source_path()))?;
                print_portion("full", &dataset);
            } else {
                ensure_split(&config)
                    .with_context(|| format!("Failed to split {:?}", config.source_path()))?;
                let (visible, hidden) = load_split(&config).context("Failed to load split portions")?;
                print_portion("visible", &visible);
                print_portion("hold-out", &hidden);
            }
        }

        Commands::Stats { data_path, file } => {
            let config = SplitConfig {
                data_path,
                source_file: file,
                ..SplitConfig::default()
            };

            let (visible, hidden) = load_split(&config)
                .context("Failed to load split portions; run `split` first")?;

            println!("\nSplit Portions");
            println!("==============");
            println!(
                "{:<10} {:>8} {:>9} {:>9} {:>9}",
                "Portion", "Rows", "Class 0", "Class 1", "Balance"
            );
            println!("{:-<48}", "");
            for (name, dataset) in [("visible", &visible), ("hold-out", &hidden)] {
                let (zeros, ones) = dataset.label_counts();
                println!(
                    "{:<10} {:>8} {:>9} {:>9} {:>9.3}",
                    name,
                    dataset.n_samples(),
                    zeros,
                    ones,
                    dataset.class_balance()
                );
            }

            let total = visible.n_samples() + hidden.n_samples();
            println!(
                "\nHold-out fraction: {:.3}",
                hidden.n_samples() as f64 / total as f64
            );
        }
    }

    Ok(())
}

fn print_portion(name: &str, dataset: &Dataset) {
    let (zeros, ones) = dataset.label_counts();
    println!(
        "{}: {} samples x {} features (class 0: {}, class 1: {})",
        name,
        dataset.n_samples(),
        dataset.n_features(),
        zeros,
        ones
    );
}
