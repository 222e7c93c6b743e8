// Scoring: everything derived from a finished similarity matrix.

pub mod deduction;
pub mod pairs;
pub mod summary;

use serde::Serialize;

use crate::similarity::matrix::SimilarityMatrix;
use deduction::FileDeduction;
use pairs::SimilarPair;
use summary::Summary;

/// The complete result of comparing one folder of submissions.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub matrix: SimilarityMatrix,
    pub summary: Summary,
    /// Pairs above 70%
    pub high_similarity: Vec<SimilarPair>,
    /// Pairs above 80%, a subset of `high_similarity`
    pub plagiarism_concerns: Vec<SimilarPair>,
    /// One entry per file, in matrix order
    pub deductions: Vec<FileDeduction>,
}

impl Analysis {
    pub fn from_matrix(matrix: SimilarityMatrix) -> Self {
        let summary = Summary::from_matrix(&matrix);
        let high_similarity = pairs::high_similarity_pairs(&matrix);
        let plagiarism_concerns = pairs::plagiarism_concerns(&high_similarity);
        let deductions = deduction::deductions(&matrix);

        Self {
            matrix,
            summary,
            high_similarity,
            plagiarism_concerns,
            deductions,
        }
    }
}
