//! Luhn summarization
//!
//! Significant words are the words used more than once in the document.
//! Each sentence is scanned for chunks: a chunk opens at a significant word
//! and closes after `max_gap_size` consecutive insignificant words. A chunk
//! with `s` significant words over `n` words (trailing insignificant words
//! dropped) rates `s² / n`, or 0 when `s == 1`. A sentence rates as its best
//! chunk.

use super::{normalize_word, SentenceRanker, SummarizeError};
use crate::nlp::{Document, StopwordFilter};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct Luhn {
    /// Insignificant words that close a chunk
    pub max_gap_size: usize,
    /// Share of the document's word count considered before the frequency cut
    pub significant_percentage: f64,
}

impl Default for Luhn {
    fn default() -> Self {
        Self {
            max_gap_size: 4,
            significant_percentage: 1.0,
        }
    }
}

impl Luhn {
    /// Normalized words that appear more than once among the most frequent terms
    pub fn significant_words(
        &self,
        document: &Document,
        stopwords: &StopwordFilter,
    ) -> HashSet<String> {
        let words: Vec<String> = document
            .words()
            .map(normalize_word)
            .filter(|w| !stopwords.is_stopword(w))
            .collect();

        // frequency table, remembering first occurrence for a stable order
        let mut frequencies: HashMap<&str, (usize, usize)> = HashMap::new();
        for (position, word) in words.iter().enumerate() {
            frequencies.entry(word.as_str()).or_insert((0, position)).0 += 1;
        }

        let mut terms: Vec<(&str, usize, usize)> = frequencies
            .into_iter()
            .map(|(term, (count, first))| (term, count, first))
            .collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let best = (words.len() as f64 * self.significant_percentage) as usize;
        if best > 0 {
            terms.truncate(best);
        }

        terms
            .into_iter()
            .filter(|&(_, count, _)| count > 1)
            .map(|(term, _, _)| term.to_string())
            .collect()
    }

    /// Rate one sentence's words against the significant set
    pub fn rate_words(&self, words: &[String], significant: &HashSet<String>) -> f64 {
        let mut chunks: Vec<Vec<bool>> = Vec::new();
        let mut in_chunk = false;

        for word in words {
            let is_significant = significant.contains(&normalize_word(word));
            if is_significant && !in_chunk {
                in_chunk = true;
                chunks.push(vec![true]);
            } else if in_chunk {
                if let Some(chunk) = chunks.last_mut() {
                    chunk.push(is_significant);
                }
            }

            if let Some(chunk) = chunks.last() {
                if chunk.len() >= self.max_gap_size
                    && chunk[chunk.len() - self.max_gap_size..].iter().all(|s| !s)
                {
                    in_chunk = false;
                }
            }
        }

        chunks
            .iter()
            .map(|chunk| Self::rate_chunk(chunk))
            .fold(0.0, f64::max)
    }

    fn rate_chunk(chunk: &[bool]) -> f64 {
        let length = chunk.iter().rposition(|&s| s).map_or(0, |last| last + 1);
        let significant = chunk[..length].iter().filter(|&&s| s).count();

        if significant <= 1 {
            0.0
        } else {
            (significant * significant) as f64 / length as f64
        }
    }
}

impl SentenceRanker for Luhn {
    fn rate(
        &self,
        document: &Document,
        stopwords: &StopwordFilter,
    ) -> Result<Vec<f64>, SummarizeError> {
        let significant = self.significant_words(document, stopwords);

        Ok(document
            .sentences()
            .map(|sentence| self.rate_words(&sentence.words, &significant))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::Tokenizer;
    use crate::summarizers::tests::CATS;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_significant_words_appear_more_than_once() {
        let doc = Document::parse(CATS, &Tokenizer::english());
        let significant = Luhn::default().significant_words(&doc, &StopwordFilter::empty());

        let expected: HashSet<String> = ["cats", "are"].iter().map(|s| s.to_string()).collect();
        assert_eq!(significant, expected);
    }

    #[test]
    fn test_stopwords_are_never_significant() {
        let doc = Document::parse(CATS, &Tokenizer::english());
        let stopwords = StopwordFilter::from_list(&["are"]);
        let significant = Luhn::default().significant_words(&doc, &stopwords);

        assert!(significant.contains("cats"));
        assert!(!significant.contains("are"));
    }

    #[test]
    fn test_chunk_rating() {
        let luhn = Luhn::default();
        let significant: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();

        // chunk [a x b] -> 2² / 3
        let rating = luhn.rate_words(&words("a x b y"), &significant);
        assert!((rating - 4.0 / 3.0).abs() < 1e-12);

        // a lone significant word scores nothing
        assert_eq!(luhn.rate_words(&words("x a y z"), &significant), 0.0);
        assert_eq!(luhn.rate_words(&words("x y z"), &significant), 0.0);
    }

    #[test]
    fn test_gap_closes_chunk() {
        let luhn = Luhn::default();
        let significant: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();

        // four insignificant words split the chunk in two single-word chunks
        assert_eq!(luhn.rate_words(&words("a w x y z b"), &significant), 0.0);
        // three keep it open: [a w x y b] -> 2² / 5
        let rating = luhn.rate_words(&words("a w x y b"), &significant);
        assert!((rating - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_sentence_ratings() {
        let doc = Document::parse(CATS, &Tokenizer::english());
        let ratings = Luhn::default().rate(&doc, &StopwordFilter::empty()).unwrap();
        assert_eq!(ratings, vec![2.0, 0.0, 0.0, 2.0]);
    }
}
