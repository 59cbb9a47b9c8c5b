use std::collections::BTreeSet;

use crate::error::{EngineError, Result};
use crate::stopwords::StopWords;
use crate::Term;

/// Prefix that turns a query word into an excluded ("minus") term.
pub const MINUS_MARKER: char = '-';

/// Query words split into terms that score documents and terms that
/// remove them. The two sets may overlap; exclusion wins when ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub required: BTreeSet<Term>,
    pub excluded: BTreeSet<Term>,
}

impl ParsedQuery {
    /// Tokenize and stop-word filter `raw_query` like a document, then sort
    /// each word into `required` or `excluded`.
    ///
    /// Stop words are matched before the marker is stripped, so `-the` is an
    /// excluded `the` even when `the` is a stop word. A bare `-` is rejected.
    pub fn parse(raw_query: &str, stop_words: &StopWords) -> Result<Self> {
        let mut query = Self::default();
        for word in stop_words.split_no_stop(raw_query) {
            match word.strip_prefix(MINUS_MARKER) {
                Some("") => return Err(EngineError::InvalidQuery { token: word.to_string() }),
                Some(minus_word) => {
                    query.excluded.insert(minus_word.to_string());
                }
                None => {
                    query.required.insert(word.to_string());
                }
            }
        }
        tracing::debug!(required = query.required.len(), excluded = query.excluded.len(), "parsed query");
        Ok(query)
    }

    pub fn is_empty(&self) -> bool { self.required.is_empty() && self.excluded.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<Term> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn splits_required_and_excluded() {
        let stop = StopWords::from_text("the");
        let query = ParsedQuery::parse("white -cat long the tali", &stop).unwrap();
        assert_eq!(query.required, set(&["long", "tali", "white"]));
        assert_eq!(query.excluded, set(&["cat"]));
    }

    #[test]
    fn deduplicates_terms() {
        let query = ParsedQuery::parse("cat cat -dog -dog cat", &StopWords::new()).unwrap();
        assert_eq!(query.required, set(&["cat"]));
        assert_eq!(query.excluded, set(&["dog"]));
    }

    #[test]
    fn sets_may_overlap() {
        let query = ParsedQuery::parse("cat -cat", &StopWords::new()).unwrap();
        assert!(query.required.contains("cat"));
        assert!(query.excluded.contains("cat"));
    }

    #[test]
    fn only_first_marker_is_stripped() {
        let query = ParsedQuery::parse("--x", &StopWords::new()).unwrap();
        assert_eq!(query.excluded, set(&["-x"]));
    }

    #[test]
    fn stop_words_are_checked_before_stripping() {
        let stop = StopWords::from_text("the");
        let query = ParsedQuery::parse("the -the", &stop).unwrap();
        assert!(query.required.is_empty());
        assert_eq!(query.excluded, set(&["the"]));
    }

    #[test]
    fn bare_marker_is_rejected() {
        let err = ParsedQuery::parse("cat - dog", &StopWords::new()).unwrap_err();
        assert_eq!(err, EngineError::InvalidQuery { token: "-".into() });
    }

    #[test]
    fn blank_query_is_empty() {
        assert!(ParsedQuery::parse("   ", &StopWords::new()).unwrap().is_empty());
    }
}
