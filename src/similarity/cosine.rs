// Cosine similarity between two feature vectors.
//
//   cos(a, b) = (a . b) / (||a|| * ||b||)
//
// Undefined when either vector has zero length, which is exactly what an
// empty presentation produces. That case returns 0.0 instead of NaN.

/// Magnitude below which a vector is treated as the zero vector.
pub const COSINE_EPSILON: f64 = 1e-12;

/// Compute the cosine similarity of two equal-length vectors.
///
/// Returns a value in [0.0, 1.0]. TF-IDF weights are never negative, so the
/// lower clamp only absorbs floating point noise.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must share a vocabulary");

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|y| y * y).sum::<f64>().sqrt();

    if norm_a < COSINE_EPSILON || norm_b < COSINE_EPSILON {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}
