// Flagged file pairs: high similarity and likely plagiarism.
//
// Both thresholds are strict: a pair scoring exactly 70.00 is not "high".

use serde::Serialize;

use crate::similarity::matrix::SimilarityMatrix;

/// Pairs scoring above this are listed as high similarity.
pub const HIGH_SIMILARITY_THRESHOLD: f64 = 70.0;

/// High-similarity pairs scoring above this are a plagiarism concern.
pub const PLAGIARISM_THRESHOLD: f64 = 80.0;

/// Two distinct files and their similarity (percent).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarPair {
    pub first: String,
    pub second: String,
    pub score: f64,
}

/// Every pair `i < j` scoring above `threshold`, in row-major order.
pub fn pairs_above(matrix: &SimilarityMatrix, threshold: f64) -> Vec<SimilarPair> {
    let labels = matrix.labels();
    let mut pairs = Vec::new();
    for i in 0..matrix.len() {
        for j in (i + 1)..matrix.len() {
            let score = matrix.get(i, j);
            if score > threshold {
                pairs.push(SimilarPair {
                    first: labels[i].clone(),
                    second: labels[j].clone(),
                    score,
                });
            }
        }
    }
    pairs
}

/// Pairs above [`HIGH_SIMILARITY_THRESHOLD`].
pub fn high_similarity_pairs(matrix: &SimilarityMatrix) -> Vec<SimilarPair> {
    pairs_above(matrix, HIGH_SIMILARITY_THRESHOLD)
}

/// The subset of `pairs` above [`PLAGIARISM_THRESHOLD`], order preserved.
pub fn plagiarism_concerns(pairs: &[SimilarPair]) -> Vec<SimilarPair> {
    pairs
        .iter()
        .filter(|pair| pair.score > PLAGIARISM_THRESHOLD)
        .cloned()
        .collect()
}
