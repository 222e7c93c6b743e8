// Similarity scoring: TF-IDF vectorization and the cosine similarity matrix.

pub mod cosine;
pub mod matrix;
pub mod tfidf;
pub mod traits;
