// Typed error taxonomy for a similarity run.
//
// Two scopes: an ExtractionError belongs to a single file and is recovered by
// the pipeline (the file scores as empty text), while an AnalysisError aborts
// the whole run before any output file is written.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to pull text out of one presentation.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a valid .pptx archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("malformed XML in {part}: {message}")]
    Xml { part: String, message: String },

    #[error("missing part {0}")]
    MissingPart(String),
}

impl ExtractionError {
    pub(crate) fn xml(part: &str, err: impl std::fmt::Display) -> Self {
        ExtractionError::Xml {
            part: part.to_string(),
            message: err.to_string(),
        }
    }
}

/// Failure that stops the run as a whole.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("need at least 2 documents to compare, found {0}")]
    NotEnoughDocuments(usize),

    #[error("empty vocabulary; every document is empty or contains no words")]
    EmptyCorpus,

    #[error("invalid token pattern: {0}")]
    TokenPattern(#[from] regex::Error),

    #[error("failed to export results: {0}")]
    Export(String),
}

impl From<csv::Error> for AnalysisError {
    fn from(err: csv::Error) -> Self {
        AnalysisError::Export(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AnalysisError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AnalysisError::Export(err.to_string())
    }
}
