// Coloured terminal output for topic reports and similarity tables.
//
// This module handles all terminal-specific formatting. The main.rs
// command handlers delegate here.

use colored::Colorize;

use crate::pipeline::batch::BatchSummary;
use crate::pipeline::evaluate::{LineageEvaluation, MetricScore};
use crate::pipeline::extract::TopicsReport;

const PATH_WIDTH: usize = 60;

/// Display the top classes, lineages and topic buckets of one document.
pub fn display_report(report: &TopicsReport) {
    println!("\n{}", "=== Top Classes ===".bold());
    for (i, node) in report.top_nodes.iter().enumerate() {
        println!("  {:>2}. {:<40} {:.3}", i + 1, node.label.bold(), node.weight);
    }

    println!(
        "\n{}",
        format!("=== Relevant Lineages ({}) ===", report.lineages.len()).bold()
    );
    if report.lineages.is_empty() {
        println!("  {}", "No lineage passes through a top class.".dimmed());
    }
    for (i, lineage) in report.lineages.iter().enumerate() {
        let path = super::truncate_chars(&lineage.to_string(), PATH_WIDTH);
        println!("  {:>2}. {:<62} {:.3}", i + 1, path, lineage.score);
    }

    println!("\n{}", "=== Topics ===".bold());
    for bucket in &report.topics {
        println!("  {}", format!("{:.3}", bucket.weight).bright_green());
        for path in &bucket.paths {
            let sentences = path
                .rsplit('/')
                .next()
                .and_then(|leaf| report.node_sentences.get(leaf))
                .map(|indices| format!("{indices:?}"))
                .unwrap_or_default();
            println!("      {} {}", path, sentences.dimmed());
        }
    }
    println!();
}

/// Display per-metric similarities of one lineage pair.
pub fn display_similarities(lineage: &str, labeled: &str, scores: &[MetricScore]) {
    println!("\n  {}  {}", "Lineage:".dimmed(), lineage);
    println!("  {}  {}", "Labeled:".dimmed(), labeled);
    println!();
    for score in scores {
        println!(
            "  {:<16} {:<4} {}  class {}",
            score.metric.to_string(),
            score.tag.dimmed(),
            colorize_similarity(score.similarity),
            score.class
        );
    }
    println!();
}

/// Display the evaluation of every relevant lineage of a document.
pub fn display_evaluations(evaluations: &[LineageEvaluation]) {
    if evaluations.is_empty() {
        println!("No relevant lineages to evaluate.");
        return;
    }

    println!("\n{}", "=== Lineage Evaluation ===".bold());
    for evaluation in evaluations {
        println!("  {}", super::truncate_chars(&evaluation.lineage, PATH_WIDTH));
        let row: Vec<String> = evaluation
            .scores
            .iter()
            .map(|s| format!("{} {}", s.tag.dimmed(), colorize_similarity(s.similarity)))
            .collect();
        println!("      {}", row.join("   "));
    }
    println!();
}

/// Display a one-line-per-document batch summary.
pub fn display_batch_summary(summary: &BatchSummary) {
    println!(
        "\n{}",
        format!(
            "=== Batch ({} processed, {} failed) ===",
            summary.reports.len(),
            summary.failed.len()
        )
        .bold()
    );
    for entry in &summary.reports {
        let best = entry
            .report
            .lineages
            .first()
            .map(|l| super::truncate_chars(&l.to_string(), PATH_WIDTH))
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<32} {}", entry.document, best);
    }
    for (document, reason) in &summary.failed {
        println!("  {:<32} {}", document.red(), reason.dimmed());
    }
    println!();
}

/// Colour a similarity by strength.
fn colorize_similarity(similarity: f64) -> colored::ColoredString {
    let text = format!("{similarity:.3}");
    if similarity >= 0.75 {
        text.bright_green()
    } else if similarity >= 0.4 {
        text.bright_yellow()
    } else if similarity > 0.0 {
        text.bright_blue()
    } else {
        text.dimmed()
    }
}
