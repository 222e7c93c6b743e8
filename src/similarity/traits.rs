// Vectorizer trait: swap-ready abstraction over the weighting scheme.
//
// Scoring only cares that angular closeness between rows tracks lexical
// similarity between documents. TF-IDF is the default; anything that maps an
// ordered set of texts to aligned vectors can replace it.

use super::tfidf::TfIdfMatrix;
use crate::error::AnalysisError;

/// Trait for turning a corpus of texts into one feature vector per text.
pub trait Vectorizer {
    /// Fit a vocabulary on `texts` and return one row per text, in order.
    fn fit_transform(&self, texts: &[String]) -> Result<TfIdfMatrix, AnalysisError>;
}
