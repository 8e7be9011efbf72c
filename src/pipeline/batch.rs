// Batch pipeline: run the extraction pass over a directory of documents.
//
// Every document gets its own scoring and topics map instances, so
// documents are processed concurrently with no shared mutable state.
// Documents that fail to load or score are logged and skipped.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::extract::{self, TopicsReport};
use crate::config::Config;
use crate::taxonomy::document::Document;

/// Report for one successfully processed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    pub document: String,
    pub report: TopicsReport,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Reports ordered by document file name
    pub reports: Vec<DocumentReport>,
    /// Documents that could not be processed, with the reason
    pub failed: Vec<(String, String)>,
}

/// List the `*.json` document files of a directory, sorted by name.
pub async fn document_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Cannot read document directory {}", dir.display()))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load one document from a JSON file.
pub async fn load_document(path: &Path) -> Result<Document> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid document {}", path.display()))
}

/// Process every document in `dir`, `concurrency` at a time.
pub async fn run(
    dir: &Path,
    config: &Config,
    concurrency: usize,
    show_progress: bool,
) -> Result<BatchSummary> {
    let files = document_files(dir).await?;
    info!(documents = files.len(), concurrency, "Starting batch extraction");

    let pb = if show_progress {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Documents [{bar:30}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<(String, Result<TopicsReport>)> = stream::iter(files.into_iter().map(|path| {
        let pb = &pb;
        async move {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let result = match load_document(&path).await {
                Ok(document) => extract::run(document, config),
                Err(e) => Err(e),
            };
            pb.inc(1);
            (name, result)
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;
    pb.finish_and_clear();

    let mut summary = BatchSummary::default();
    for (document, result) in results {
        match result {
            Ok(report) => summary.reports.push(DocumentReport { document, report }),
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(
                    document = document.as_str(),
                    error = reason.as_str(),
                    "Failed to process document, skipping"
                );
                summary.failed.push((document, reason));
            }
        }
    }
    summary.reports.sort_by(|a, b| a.document.cmp(&b.document));
    summary.failed.sort();

    info!(
        processed = summary.reports.len(),
        failed = summary.failed.len(),
        "Batch extraction finished"
    );

    Ok(summary)
}
