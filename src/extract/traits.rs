// Text extractor trait: the swap-ready seam between file formats and scoring.
//
// The pipeline only needs "path in, text out". The default implementation
// reads .pptx archives directly; other formats can slot in behind the same
// trait without touching vectorization or reporting.

use std::path::Path;

use crate::error::ExtractionError;

/// Trait for pulling the visible text out of a single document.
pub trait TextExtractor {
    /// Extract all text runs from the file at `path`, in reading order.
    ///
    /// Failures are scoped to this one file. Callers substitute empty text
    /// and keep going.
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}
