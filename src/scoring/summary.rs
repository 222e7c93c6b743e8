// Aggregate statistics over the similarity matrix.
//
// The diagonal (100.00 self-similarity) is part of the population, so the
// mean is inflated and the max is always 100.

use serde::Serialize;

use crate::similarity::matrix::SimilarityMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl Summary {
    /// Mean, max and min over every cell, diagonal included.
    pub fn from_matrix(matrix: &SimilarityMatrix) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;

        for value in matrix.iter_values() {
            count += 1;
            sum += value;
            max = max.max(value);
            min = min.min(value);
        }

        if count == 0 {
            return Self {
                mean: 0.0,
                max: 0.0,
                min: 0.0,
            };
        }

        Self {
            mean: sum / count as f64,
            max,
            min,
        }
    }
}
