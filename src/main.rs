use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use lineage::config::Config;
use lineage::metrics::traits::DistanceKind;
use lineage::output::terminal;
use lineage::pipeline::{batch, evaluate, extract};

/// Lineage: taxonomy lineage distance and topic scoring.
///
/// Ranks the taxonomy classes and lineages of classified documents, maps
/// topics to the sentences that mention them, and compares lineages
/// against labeled reference paths.
#[derive(Parser)]
#[command(name = "lineage", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a lineage with a labeled path (both `/`-delimited)
    Similarity {
        /// Extracted lineage, e.g. Animal/Mammal/Dog
        lineage: String,
        /// Labeled reference path, e.g. Animal/Mammal/Cat
        labeled: String,
        /// Metric to use (default: every metric)
        #[arg(long, value_enum)]
        metric: Option<DistanceKind>,
        /// Disable token-level (fuzzy) leaf matching
        #[arg(long)]
        strict: bool,
    },

    /// Extract the topics of one classified document (JSON)
    Topics {
        document: PathBuf,
        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Propagate object weights along lineages before scoring
        #[arg(long)]
        propagate: bool,
    },

    /// Evaluate a document's relevant lineages against labeled paths
    Evaluate {
        document: PathBuf,
        /// One or more labeled reference paths
        #[arg(required = true)]
        labeled: Vec<String>,
        /// Score with every metric instead of LINEAGE_DISTANCE
        #[arg(long)]
        all_metrics: bool,
    },

    /// Extract topics from every *.json document in a directory
    Batch {
        dir: PathBuf,
        /// Number of documents processed in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,
        /// Write the full batch report as JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lineage=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Similarity {
            lineage,
            labeled,
            metric,
            strict,
        } => {
            if strict {
                config.fuzzy_match = false;
            }
            let kinds = match metric {
                Some(kind) => vec![kind],
                None => DistanceKind::ALL.to_vec(),
            };
            let scores = evaluate::compare(&lineage, &labeled, &kinds, &config)?;
            terminal::display_similarities(&lineage, &labeled, &scores);
        }

        Commands::Topics {
            document,
            json,
            propagate,
        } => {
            if propagate {
                config.propagate_weights = true;
            }
            let doc = batch::load_document(&document).await?;
            let report = extract::run(doc, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_report(&report);
            }
        }

        Commands::Evaluate {
            document,
            labeled,
            all_metrics,
        } => {
            let kinds = if all_metrics {
                DistanceKind::ALL.to_vec()
            } else {
                vec![config.distance]
            };
            let doc = batch::load_document(&document).await?;
            let report = extract::run(doc, &config)?;
            let evaluations = evaluate::evaluate(&report.lineages, &labeled, &kinds, &config);
            terminal::display_evaluations(&evaluations);
        }

        Commands::Batch {
            dir,
            concurrency,
            out,
        } => {
            let summary = batch::run(&dir, &config, concurrency, true).await?;
            terminal::display_batch_summary(&summary);

            if let Some(out) = out {
                let json = serde_json::to_string_pretty(&summary)?;
                tokio::fs::write(&out, json).await?;
                info!(path = %out.display(), "Wrote batch report");
                println!("{}", format!("Report written to {}", out.display()).dimmed());
            }
        }
    }

    Ok(())
}
