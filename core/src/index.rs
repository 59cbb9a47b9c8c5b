use std::collections::{BTreeMap, BTreeSet};

use crate::error::{EngineError, Result};
use crate::stopwords::StopWords;
use crate::{DocId, Term};

/// Term -> (document -> term frequency) postings plus the document count.
///
/// Built once, then only read: stop words first, then every document, then
/// queries. Documents cannot be updated or removed.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<Term, BTreeMap<DocId, f64>>,
    stop_words: StopWords,
    doc_ids: BTreeSet<DocId>,
    num_docs: usize,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn with_stop_words(text: &str) -> Self {
        let mut index = Self::new();
        index.set_stop_words(text);
        index
    }

    /// Add the words of `text` to the stop-word set.
    ///
    /// Documents inserted before this call keep the frequencies they were
    /// indexed with.
    pub fn set_stop_words(&mut self, text: &str) {
        if self.num_docs > 0 {
            tracing::warn!(num_docs = self.num_docs, "stop words changed after documents were indexed");
        }
        self.stop_words.extend_from_text(text);
    }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    /// Index one document under a caller-chosen id.
    ///
    /// Each occurrence of a term adds `1 / L` to its frequency, where `L` is
    /// the number of tokens left after stop-word removal. On error the index
    /// is unchanged.
    pub fn insert_document(&mut self, document_id: DocId, text: &str) -> Result<()> {
        if self.doc_ids.contains(&document_id) {
            return Err(EngineError::DuplicateId { id: document_id });
        }
        let words = self.stop_words.split_no_stop(text);
        if words.is_empty() {
            return Err(EngineError::InvalidDocument { id: document_id });
        }

        let term_frequency = 1.0 / words.len() as f64;
        for word in &words {
            *self
                .postings
                .entry((*word).to_string())
                .or_default()
                .entry(document_id)
                .or_insert(0.0) += term_frequency;
        }
        self.doc_ids.insert(document_id);
        self.num_docs += 1;
        tracing::debug!(document_id, tokens = words.len(), num_terms = self.postings.len(), "indexed document");
        Ok(())
    }

    /// Number of documents containing `term`; zero for unknown terms.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, BTreeMap::len)
    }

    pub fn total_document_count(&self) -> usize { self.num_docs }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn contains_term(&self, term: &str) -> bool { self.postings.contains_key(term) }

    pub fn contains_document(&self, document_id: DocId) -> bool { self.doc_ids.contains(&document_id) }

    /// Documents containing `term` with their term frequencies, ordered by id.
    pub fn postings(&self, term: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.postings.get(term)
    }

    pub fn term_frequency(&self, term: &str, document_id: DocId) -> Option<f64> {
        self.postings.get(term)?.get(&document_id).copied()
    }

    /// `ln(N / df)` for a known term. A known term always has `df > 0`.
    pub fn inverse_document_frequency(&self, term: &str) -> Option<f64> {
        let docs = self.postings.get(term)?;
        let idf = (self.num_docs as f64 / docs.len() as f64).ln();
        tracing::trace!(term, df = docs.len(), idf, "inverse document frequency");
        Some(idf)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }
}
