use std::collections::BTreeSet;

use crate::tokenizer::tokenize;
use crate::Term;

/// Words dropped from both documents and queries. Matching is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<Term>,
}

impl StopWords {
    pub fn new() -> Self { Self::default() }

    pub fn from_text(text: &str) -> Self {
        let mut stop_words = Self::new();
        stop_words.extend_from_text(text);
        stop_words
    }

    /// Tokenize `text` and add every word to the set.
    pub fn extend_from_text(&mut self, text: &str) {
        self.words.extend(tokenize(text).into_iter().map(str::to_string));
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Drop stop words from `tokens`, keeping the original order.
    pub fn filter<'a>(&self, tokens: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        tokens.into_iter().filter(|token| !self.contains(token)).collect()
    }

    /// Tokenize `text` and drop stop words.
    pub fn split_no_stop<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.filter(tokenize(text))
    }
}
