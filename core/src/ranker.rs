use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::InvertedIndex;
use crate::query::ParsedQuery;
use crate::DocId;

/// Default number of results returned by a search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document_id: DocId,
    pub relevance: f64,
}

/// Score every document matching `query`, ordered by id.
///
/// Each required term adds `tf * idf` to the documents containing it. Any
/// document containing an excluded term is then dropped whatever its score.
pub fn find_all_documents(index: &InvertedIndex, query: &ParsedQuery) -> Vec<ScoredDocument> {
    let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();

    for plus_word in &query.required {
        let (Some(postings), Some(idf)) = (index.postings(plus_word), index.inverse_document_frequency(plus_word)) else {
            continue;
        };
        for (&document_id, &term_frequency) in postings {
            *document_to_relevance.entry(document_id).or_insert(0.0) += term_frequency * idf;
        }
    }

    for minus_word in &query.excluded {
        if let Some(postings) = index.postings(minus_word) {
            for document_id in postings.keys() {
                document_to_relevance.remove(document_id);
            }
        }
    }

    document_to_relevance
        .into_iter()
        .map(|(document_id, relevance)| ScoredDocument { document_id, relevance })
        .collect()
}

/// Best `k` matches by descending relevance; equal scores keep ascending id order.
pub fn find_top_documents(index: &InvertedIndex, query: &ParsedQuery, k: usize) -> Vec<ScoredDocument> {
    let mut scored = find_all_documents(index, query);
    let total_hits = scored.len();
    scored.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.document_id.cmp(&b.document_id))
    });
    scored.truncate(k);
    tracing::debug!(total_hits, returned = scored.len(), k, "ranked documents");
    scored
}

impl InvertedIndex {
    /// Parse `raw_query` with this index's stop words and rank the matches.
    pub fn search(&self, raw_query: &str, k: usize) -> Result<Vec<ScoredDocument>> {
        let query = ParsedQuery::parse(raw_query, self.stop_words())?;
        Ok(find_top_documents(self, &query, k))
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.search(raw_query, MAX_RESULT_DOCUMENT_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn index_of(docs: &[&str]) -> InvertedIndex {
        let mut index = InvertedIndex::new();
        for (id, text) in docs.iter().enumerate() {
            index.insert_document(id as DocId, text).unwrap();
        }
        index
    }

    #[test]
    fn empty_index_finds_nothing() {
        let index = InvertedIndex::new();
        assert!(index.search("anything -at all", 5).unwrap().is_empty());
    }

    #[test]
    fn ties_are_ordered_by_id() {
        let index = index_of(&["x", "y", "x", "z", "x y"]);
        let ids: Vec<DocId> = index.search("z", 5).unwrap().iter().map(|d| d.document_id).collect();
        assert_eq!(ids, vec![3]);
        let top = index.search("x", 5).unwrap();
        let ids: Vec<DocId> = top.iter().map(|d| d.document_id).collect();
        assert_eq!(ids, vec![0, 2, 4]);
        assert_eq!(top[0].relevance, top[1].relevance);
    }

    #[test]
    fn truncates_to_k() {
        let docs: Vec<String> = (0..12).map(|i| format!("common word{i}")).collect();
        let refs: Vec<&str> = docs.iter().map(String::as_str).collect();
        let mut index = index_of(&refs);
        index.insert_document(100, "rare").unwrap();
        assert_eq!(index.search("common", 5).unwrap().len(), 5);
        assert_eq!(index.find_top_documents("common").unwrap().len(), MAX_RESULT_DOCUMENT_COUNT);
        assert_eq!(index.search("common", 20).unwrap().len(), 12);
        assert!(index.search("common", 0).unwrap().is_empty());
    }

    #[test]
    fn term_in_every_document_scores_zero() {
        let index = index_of(&["cat sat", "cat ran"]);
        let top = index.search("cat", 5).unwrap();
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|d| d.relevance == 0.0));
    }

    #[test]
    fn exclusion_beats_required_match() {
        let index = index_of(&["cat dog", "dog", "bird"]);
        let query = ParsedQuery::parse("cat -cat dog", index.stop_words()).unwrap();
        let all = find_all_documents(&index, &query);
        assert_eq!(all.iter().map(|d| d.document_id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn unknown_excluded_term_is_ignored() {
        let index = index_of(&["cat", "dog"]);
        let top = index.search("cat -unicorn", 5).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].document_id, 0);
    }

    #[test]
    fn invalid_query_propagates() {
        let index = index_of(&["cat"]);
        assert!(matches!(index.search("cat -", 5), Err(EngineError::InvalidQuery { .. })));
    }
}
