//! Stopword filtering
//!
//! English stopwords from the `stop-words` crate. Summarizers run without
//! a stopword list unless stopword filtering is switched on.

use std::collections::HashSet;
use stop_words::{get, LANGUAGE};

/// A filter for removing stopwords from normalized (lowercase) words
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    stopwords: HashSet<String>,
}

impl StopwordFilter {
    /// English stopword list
    pub fn english() -> Self {
        Self {
            stopwords: get(LANGUAGE::English)
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Check if a normalized word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::english();
        assert!(!filter.is_empty());
        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("and"));
        assert!(!filter.is_stopword("cats"));
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = StopwordFilter::empty();
        assert!(filter.is_empty());
        assert!(!filter.is_stopword("the"));
    }

    #[test]
    fn test_custom_list_is_lowercased() {
        let filter = StopwordFilter::from_list(&["Cats", "DOGS"]);
        assert_eq!(filter.len(), 2);
        assert!(filter.is_stopword("cats"));
        assert!(filter.is_stopword("dogs"));
    }
}
