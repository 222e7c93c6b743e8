// Deduction points from a file's highest similarity to any other file.
//
// Bands are half-open on the upper end:
//
//   [0, 20) -> 0   [20, 40) -> 1   [40, 60) -> 2
//   [60, 80) -> 3  [80, 90) -> 4   [90, ...) -> 5

use serde::Serialize;

use crate::similarity::matrix::SimilarityMatrix;

/// Inclusive lower bound of each band that costs points, highest first.
/// Anything below the last bound costs nothing.
pub const DEDUCTION_BANDS: [(f64, u8); 5] = [(90.0, 5), (80.0, 4), (60.0, 3), (40.0, 2), (20.0, 1)];

/// Largest possible deduction.
pub const MAX_DEDUCTION: u8 = 5;

/// Penalty points for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Deduction(pub u8);

impl Deduction {
    /// Classify a similarity percentage.
    ///
    /// Total over f64: negatives and NaN fall through to 0, anything at or
    /// above 90 (including values past 100) is 5.
    pub fn from_score(score: f64) -> Self {
        let points = DEDUCTION_BANDS
            .iter()
            .find(|(lower, _)| score >= *lower)
            .map_or(0, |(_, points)| *points);
        Deduction(points)
    }

    pub fn points(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Deduction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file's deduction together with the score that caused it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileDeduction {
    pub filename: String,
    /// Highest similarity to any other file (percent)
    pub max_similarity: f64,
    pub deduction: Deduction,
}

/// One deduction per file, in matrix order.
pub fn deductions(matrix: &SimilarityMatrix) -> Vec<FileDeduction> {
    matrix
        .labels()
        .iter()
        .enumerate()
        .map(|(i, filename)| {
            let max_similarity = matrix.max_off_diagonal(i);
            FileDeduction {
                filename: filename.clone(),
                max_similarity,
                deduction: Deduction::from_score(max_similarity),
            }
        })
        .collect()
}
