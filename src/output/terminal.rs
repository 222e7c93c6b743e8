// Colored terminal output for a finished analysis.
//
// The text report on disk is plain and fixed-format; this is the quick view
// printed at the end of a run.

use colored::Colorize;

use crate::scoring::deduction::{Deduction, MAX_DEDUCTION};
use crate::scoring::pairs::SimilarPair;
use crate::scoring::Analysis;

/// Widest file name shown before truncation.
const NAME_WIDTH: usize = 40;

/// Display the summary, flagged pairs and per-file deductions.
pub fn display_analysis(analysis: &Analysis) {
    println!(
        "\n{}",
        format!(
            "=== Similarity Summary ({} files) ===",
            analysis.matrix.len()
        )
        .bold()
    );
    println!(
        "  Average {:.2}%  |  Max {:.2}%  |  Min {:.2}%  {}",
        analysis.summary.mean,
        analysis.summary.max,
        analysis.summary.min,
        "(diagonal included)".dimmed(),
    );

    display_pairs(&analysis.high_similarity);

    println!("\n{}", "=== Deductions ===".bold());
    println!();
    println!(
        "  {:<42} {:>8}  {:>6}",
        "File".dimmed(),
        "Max sim".dimmed(),
        "Points".dimmed(),
    );
    println!("  {}", "-".repeat(60).dimmed());

    for file in &analysis.deductions {
        let name = super::truncate_chars(&file.filename, NAME_WIDTH);
        println!(
            "  {:<42} {:>7.2}%  {:>6}",
            name,
            file.max_similarity,
            colorize_deduction(file.deduction),
        );
    }

    let flagged = analysis
        .deductions
        .iter()
        .filter(|d| d.deduction.points() >= 4)
        .count();
    println!();
    if flagged > 0 {
        println!(
            "  {} {} file(s) at 80% or more similarity to another submission",
            "!!".red().bold(),
            flagged
        );
    } else {
        println!("  {}", "No submission reaches 80% similarity.".green());
    }
}

fn display_pairs(pairs: &[SimilarPair]) {
    println!("\n{}", "=== High Similarity Pairs (>70%) ===".bold());
    if pairs.is_empty() {
        println!("  {}", "None".dimmed());
        return;
    }

    for pair in pairs {
        let score = format!("{:.2}%", pair.score);
        let score = if pair.score > crate::scoring::pairs::PLAGIARISM_THRESHOLD {
            score.red().bold()
        } else {
            score.yellow()
        };
        println!(
            "  {} vs {}: {}",
            super::truncate_chars(&pair.first, NAME_WIDTH),
            super::truncate_chars(&pair.second, NAME_WIDTH),
            score,
        );
    }
}

/// Colorize a deduction by severity.
fn colorize_deduction(deduction: Deduction) -> colored::ColoredString {
    let text = deduction.to_string();
    match deduction.points() {
        MAX_DEDUCTION => text.red().bold(),
        4 => text.bright_red(),
        3 => text.yellow(),
        0 => text.green(),
        _ => text.normal(),
    }
}
