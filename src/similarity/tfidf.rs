// TF-IDF vectorization of a corpus.
//
// Defaults:
//
//   - lowercase, tokens are runs of 2+ word characters (letters, digits, `_`)
//   - raw term counts as term frequency
//   - smooth IDF: ln((1 + n) / (1 + df)) + 1
//   - every row L2-normalized (an empty document stays the zero vector)
//
// The vocabulary comes from this run's texts only and is sorted, so column
// `j` is always `vocabulary[j]` regardless of hash order.

use std::collections::{BTreeSet, HashMap, HashSet};

use regex::Regex;
use stop_words::{get, LANGUAGE};
use tracing::info;

use super::traits::Vectorizer;
use crate::error::AnalysisError;

/// Dense document-term weights, one row per input text.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

/// TF-IDF vectorizer with an optional English stop-word filter.
pub struct TfIdfVectorizer {
    /// Shortest token (in characters) that counts as a word
    pub min_token_chars: usize,
    /// Drop common English words before weighting
    pub stop_words: bool,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self {
            min_token_chars: 2,
            stop_words: false,
        }
    }
}

impl TfIdfVectorizer {
    /// Split `text` into lowercase word tokens.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>, AnalysisError> {
        let pattern = self.token_pattern()?;
        let stop_words = self.stop_word_set();
        Ok(self.tokenize_with(text, &pattern, &stop_words))
    }

    /// Maximal runs of word characters: letters, numbers and `_`.
    ///
    /// Combining marks (Mn/Mc) are not word characters, so a Devanagari vowel
    /// sign splits a word the same way Python's `\w` does.
    fn token_pattern(&self) -> Result<Regex, AnalysisError> {
        let min = self.min_token_chars.max(1);
        Ok(Regex::new(&format!(r"[\p{{L}}\p{{N}}_]{{{min},}}"))?)
    }

    fn tokenize_with(
        &self,
        text: &str,
        pattern: &Regex,
        stop_words: &HashSet<String>,
    ) -> Vec<String> {
        let lowered = text.to_lowercase();
        pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }

    fn stop_word_set(&self) -> HashSet<String> {
        if self.stop_words {
            get(LANGUAGE::English).into_iter().collect()
        } else {
            HashSet::new()
        }
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn fit_transform(&self, texts: &[String]) -> Result<TfIdfMatrix, AnalysisError> {
        if texts.len() < 2 {
            return Err(AnalysisError::NotEnoughDocuments(texts.len()));
        }

        let pattern = self.token_pattern()?;
        let stop_words = self.stop_word_set();
        let documents: Vec<Vec<String>> = texts
            .iter()
            .map(|text| self.tokenize_with(text, &pattern, &stop_words))
            .collect();

        let vocabulary: Vec<String> = documents
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if vocabulary.is_empty() {
            return Err(AnalysisError::EmptyCorpus);
        }

        let columns: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        // Document frequency: in how many documents each term appears
        let mut df = vec![0usize; vocabulary.len()];
        for tokens in &documents {
            let unique: HashSet<usize> = tokens.iter().map(|t| columns[t.as_str()]).collect();
            for col in unique {
                df[col] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let rows = documents
            .iter()
            .map(|tokens| {
                let mut row = vec![0.0; vocabulary.len()];
                for token in tokens {
                    row[columns[token.as_str()]] += 1.0;
                }
                for (weight, idf) in row.iter_mut().zip(&idf) {
                    *weight *= idf;
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        info!(
            documents = documents.len(),
            vocabulary = vocabulary.len(),
            stop_words = self.stop_words,
            "Fitted TF-IDF vocabulary"
        );

        Ok(TfIdfMatrix { vocabulary, rows })
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for w in row.iter_mut() {
            *w /= norm;
        }
    }
}
