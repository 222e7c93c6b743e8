// Corpus model: the ordered set of documents compared in one run.
//
// Order matters. Row and column `i` of the similarity matrix always belong to
// `documents[i]`, so nothing downstream looks a document up by name.

use serde::Serialize;

/// One presentation and the text pulled out of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// File name only (no directory), unique within a run
    pub filename: String,
    /// Extracted text; empty when the file could not be read
    pub text: String,
}

impl Document {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Documents in listing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Corpus {
    pub documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of documents with any extracted text at all.
    pub fn non_empty_count(&self) -> usize {
        self.documents.iter().filter(|d| !d.is_empty()).count()
    }

    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.text.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_count() {
        let corpus = Corpus::new(vec![
            Document::new("a.pptx", "hello world"),
            Document::new("b.pptx", ""),
            Document::new("c.pptx", "x"),
        ]);
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.non_empty_count(), 2);
        assert_eq!(corpus.filenames(), vec!["a.pptx", "b.pptx", "c.pptx"]);
    }
}
