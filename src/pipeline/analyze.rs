// Folder analysis pipeline.
//
// Strategy: list the .pptx files, extract each one's text (a failure costs
// only that file, which then scores as empty), vectorize the corpus, score
// every pair, derive deductions, then render and write the outputs. Steps run
// once, in order, with no retries.

use std::path::{Path, PathBuf};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::corpus::{Corpus, Document};
use crate::error::AnalysisError;
use crate::extract::pptx::PptxExtractor;
use crate::extract::traits::TextExtractor;
use crate::extract::{display_name, list_presentations};
use crate::output::export::RenderedOutputs;
use crate::output::{CSV_FILE, REPORT_FILE, XLSX_FILE};
use crate::scoring::Analysis;
use crate::similarity::matrix::SimilarityMatrix;
use crate::similarity::tfidf::TfIdfVectorizer;
use crate::similarity::traits::Vectorizer;

/// Knobs for one run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Where the xlsx/csv/report files go
    pub output_dir: PathBuf,
    /// Write similarity_report.txt alongside the matrix exports
    pub emit_report: bool,
    /// Drop common English words before vectorizing
    pub stop_words: bool,
    /// Suppress progress lines on stdout (errors are still logged)
    pub quiet: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            emit_report: true,
            stop_words: false,
            quiet: false,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub analysis: Analysis,
    /// Output files in the order they were written
    pub written: Vec<PathBuf>,
}

/// Extract every file, in order, into a corpus.
///
/// A file that fails to extract is reported and kept with empty text, so the
/// corpus always has one document per input path.
pub fn extract_corpus(paths: &[PathBuf], extractor: &dyn TextExtractor, quiet: bool) -> Corpus {
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(paths.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Extracting [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let filename = display_name(path);
        let text = match extractor.extract(path) {
            Ok(text) => {
                if !quiet {
                    pb.suspend(|| {
                        println!("Extracted {} chars from {}", text.chars().count(), filename)
                    });
                }
                text
            }
            Err(e) => {
                warn!(file = %filename, error = %e, "Extraction failed, scoring as empty");
                if !quiet {
                    pb.suspend(|| println!("Error extracting from {filename}: {e}"));
                }
                String::new()
            }
        };
        documents.push(Document::new(filename, text));
        pb.inc(1);
    }
    pb.finish_and_clear();

    Corpus::new(documents)
}

/// Vectorize and score a corpus.
///
/// Needs at least two documents and at least one with text; anything less
/// aborts the run before any output is produced.
pub fn score_corpus(corpus: &Corpus, vectorizer: &dyn Vectorizer) -> Result<Analysis, AnalysisError> {
    if corpus.len() < 2 {
        return Err(AnalysisError::NotEnoughDocuments(corpus.len()));
    }
    if corpus.non_empty_count() == 0 {
        return Err(AnalysisError::EmptyCorpus);
    }

    let vectors = vectorizer.fit_transform(&corpus.texts())?;
    let matrix = SimilarityMatrix::from_vectors(corpus.filenames(), &vectors.rows);
    let analysis = Analysis::from_matrix(matrix);

    info!(
        files = corpus.len(),
        high_similarity = analysis.high_similarity.len(),
        plagiarism_concerns = analysis.plagiarism_concerns.len(),
        "Scored corpus"
    );

    Ok(analysis)
}

/// Run the whole pipeline over `folder`.
///
/// Errors from listing the folder come back as plain `anyhow` errors; every
/// failure after that is an [`AnalysisError`] and leaves no output files.
pub fn run(folder: &Path, options: &AnalysisOptions) -> Result<RunOutcome> {
    let paths = list_presentations(folder)?;
    let names: Vec<String> = paths.iter().map(|p| display_name(p)).collect();
    info!(folder = %folder.display(), files = paths.len(), "Listed presentations");
    if !options.quiet {
        println!("Found {} PPTX files: {:?}", names.len(), names);
    }

    let corpus = extract_corpus(&paths, &PptxExtractor, options.quiet);
    if !options.quiet {
        println!("Total texts: {}", corpus.len());
    }

    let vectorizer = TfIdfVectorizer {
        stop_words: options.stop_words,
        ..Default::default()
    };
    let analysis = score_corpus(&corpus, &vectorizer)?;

    let outputs = RenderedOutputs::render(
        &folder.display().to_string(),
        &analysis,
        options.emit_report,
    )?;
    let written = outputs.write_to(&options.output_dir)?;

    if !options.quiet {
        println!("Similarity comparison table saved as {XLSX_FILE} and {CSV_FILE}");
        if options.emit_report {
            println!("Detailed report saved as {REPORT_FILE}");
        }
    }

    Ok(RunOutcome { analysis, written })
}
