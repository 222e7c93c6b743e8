// The pairwise similarity matrix, in percent.
//
// Invariants held by every constructor:
//   - square, one row and one column per label, aligned by index
//   - symmetric: each unordered pair is computed once and mirrored
//   - diagonal is exactly 100.00
//   - every entry is in [0, 100] and rounded to two decimals

use anyhow::Result;
use serde::Serialize;

use super::cosine::cosine_similarity;

/// Score of a document against itself.
pub const SELF_SIMILARITY: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Score every pair of feature vectors.
    ///
    /// `labels[i]` names `rows[i]`. Entries are cosine x 100, rounded to two
    /// decimals. A zero row scores 0.00 against everything but itself.
    pub fn from_vectors(labels: Vec<String>, rows: &[Vec<f64>]) -> Self {
        debug_assert_eq!(labels.len(), rows.len(), "one label per vector");

        let n = rows.len();
        let mut values = vec![vec![0.0; n]; n];
        for i in 0..n {
            values[i][i] = SELF_SIMILARITY;
            for j in (i + 1)..n {
                let score = round2(cosine_similarity(&rows[i], &rows[j]) * 100.0);
                values[i][j] = score;
                values[j][i] = score;
            }
        }

        Self { labels, values }
    }

    /// Build a matrix from precomputed percentages.
    ///
    /// Fails unless the input is square, labelled, symmetric and in range.
    /// Values are rounded to two decimals and the diagonal is reset to 100.
    pub fn from_scores(labels: Vec<String>, mut values: Vec<Vec<f64>>) -> Result<Self> {
        let n = labels.len();
        if values.len() != n || values.iter().any(|row| row.len() != n) {
            anyhow::bail!("similarity matrix must be {n}x{n} to match its labels");
        }

        for i in 0..n {
            for j in 0..n {
                let v = values[i][j];
                if !(0.0..=100.0).contains(&v) {
                    anyhow::bail!("similarity {v} at ({i}, {j}) is outside 0-100");
                }
                if (v - values[j][i]).abs() > 1e-9 {
                    anyhow::bail!("similarity matrix is not symmetric at ({i}, {j})");
                }
            }
        }

        for (i, row) in values.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = if i == j { SELF_SIMILARITY } else { round2(*v) };
            }
        }

        Ok(Self { labels, values })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Every entry, row by row, diagonal included.
    pub fn iter_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied()
    }

    /// Highest score of document `i` against any other document.
    ///
    /// Skips the diagonal by index, never by label. 0.0 when there is no
    /// other document.
    pub fn max_off_diagonal(&self, i: usize) -> f64 {
        self.values[i]
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, v)| *v)
            .fold(0.0, f64::max)
    }
}

/// Round to two decimal places, ties to even (12.125 -> 12.12).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
