// Output formatting: terminal display, the text report, and matrix exports.

pub mod export;
pub mod report;
pub mod terminal;

/// Excel export of the similarity matrix.
pub const XLSX_FILE: &str = "pptx_similarity.xlsx";
/// CSV export of the similarity matrix.
pub const CSV_FILE: &str = "pptx_similarity.csv";
/// Human-readable report.
pub const REPORT_FILE: &str = "similarity_report.txt";

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&name[..40]`), this respects UTF-8 character boundaries,
/// which matters for submission file names with accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
