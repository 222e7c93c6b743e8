// Plain-text similarity report (similarity_report.txt).
//
// Section headings, separator lengths and number formats are fixed; other
// tools read this file line by line.

use crate::scoring::Analysis;
use crate::similarity::matrix::SimilarityMatrix;

/// Render the full report for `analysis` of the files in `folder`.
pub fn render_report(folder: &str, analysis: &Analysis) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("DETAILED SIMILARITY REPORT FOR PPTX FILES".to_string());
    lines.push("=".repeat(50));
    lines.push(String::new());
    lines.push(format!("Folder: {folder}"));
    lines.push(format!("Number of files: {}", analysis.matrix.len()));
    lines.push(String::new());

    lines.push("SUMMARY STATISTICS:".to_string());
    lines.push("-".repeat(20));
    lines.push(format!("Average similarity: {:.2}%", analysis.summary.mean));
    lines.push(format!("Max similarity: {:.2}%", analysis.summary.max));
    lines.push(format!("Min similarity: {:.2}%", analysis.summary.min));
    lines.push(String::new());

    lines.push("HIGH SIMILARITY PAIRS (>70%):".to_string());
    lines.push("-".repeat(30));
    for pair in &analysis.high_similarity {
        lines.push(format!("{} vs {}: {:.2}%", pair.first, pair.second, pair.score));
    }
    if analysis.high_similarity.is_empty() {
        lines.push("No pairs with similarity > 70%".to_string());
    }
    lines.push(String::new());

    lines.push("POTENTIAL PLAGIARISM CONCERNS (>80%):".to_string());
    lines.push("-".repeat(35));
    for pair in &analysis.plagiarism_concerns {
        lines.push(format!(
            "{} vs {}: {:.2}% - HIGH RISK",
            pair.first, pair.second, pair.score
        ));
    }
    if analysis.plagiarism_concerns.is_empty() {
        lines.push("No pairs with similarity > 80%".to_string());
    }
    lines.push(String::new());

    lines.push("DEDUCTION POINTS (0-5) BASED ON MAX SIMILARITY:".to_string());
    lines.push("-".repeat(45));
    for file in &analysis.deductions {
        lines.push(format!(
            "{}: Max similarity {:.2}% -> Deduction: {} points",
            file.filename, file.max_similarity, file.deduction
        ));
    }
    lines.push(String::new());

    lines.push("FULL SIMILARITY MATRIX (%):".to_string());
    lines.push("-".repeat(25));
    lines.extend(matrix_table(&analysis.matrix));

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

/// The matrix as an aligned text table.
///
/// Blank top-left corner, row labels left-aligned, column headers and values
/// right-aligned, two spaces between columns.
pub fn matrix_table(matrix: &SimilarityMatrix) -> Vec<String> {
    let labels = matrix.labels();
    let cells: Vec<Vec<String>> = matrix
        .rows()
        .iter()
        .map(|row| row.iter().map(|v| format!("{v:.2}")).collect())
        .collect();

    let index_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let widths: Vec<usize> = labels
        .iter()
        .enumerate()
        .map(|(j, label)| {
            let widest_cell = cells.iter().map(|row| row[j].len()).max().unwrap_or(0);
            label.chars().count().max(widest_cell)
        })
        .collect();

    let mut header = " ".repeat(index_width);
    for (label, width) in labels.iter().zip(&widths) {
        header.push_str(&format!("  {label:>width$}"));
    }

    let mut table = vec![header];
    for (label, row) in labels.iter().zip(&cells) {
        let mut line = format!("{label:<index_width$}");
        for (cell, width) in row.iter().zip(&widths) {
            line.push_str(&format!("  {cell:>width$}"));
        }
        table.push(line);
    }
    table
}
