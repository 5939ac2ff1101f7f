//! Text statistics.
//!
//! Word, character and sentence counts shown before and after summarization.
//! The sentence count is a punctuation heuristic, not a sentence-boundary
//! detector: it counts every `.`, `!`, `?` and `؟` in the text, so
//! abbreviations and decimal numbers inflate it. Displays depend on the
//! exact numbers, so the heuristic is kept as is.

use crate::model::TextStatistics;

/// Characters counted as sentence terminators.
pub const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', '؟'];

/// Compute word, character and estimated sentence counts for `text`.
pub fn compute_statistics(text: &str) -> TextStatistics {
    TextStatistics {
        words: text.split_whitespace().count(),
        characters: text.chars().count(),
        sentences: text
            .chars()
            .filter(|c| SENTENCE_TERMINATORS.contains(c))
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let stats = compute_statistics("");
        assert_eq!(stats, TextStatistics::default());
    }

    #[test]
    fn test_whitespace_runs_are_one_separator() {
        let stats = compute_statistics("  one\t\ttwo \n\n three  ");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.characters, 21);
    }

    #[test]
    fn test_characters_are_not_bytes() {
        let stats = compute_statistics("héllo wörld");
        assert_eq!(stats.characters, 11);
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn test_sentence_heuristic_counts_every_terminator() {
        let stats = compute_statistics("Really?! Mr. Smith paid 3.50. هل أنت بخير؟");
        // ?, !, the abbreviation, both dots of "3.50." and the Arabic mark
        assert_eq!(stats.sentences, 6);
    }

    #[test]
    fn test_cats_example() {
        let text = "Cats are mammals. Cats sleep a lot. Cats hunt at night. Cats are independent.";
        let stats = compute_statistics(text);
        assert_eq!(stats.words, 14);
        assert_eq!(stats.characters, 77);
        assert_eq!(stats.sentences, 4);
    }
}
