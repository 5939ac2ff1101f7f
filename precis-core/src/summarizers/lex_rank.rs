//! LexRank summarization
//!
//! Sentences are linked when their idf-modified cosine similarity exceeds a
//! threshold. Each row of the resulting adjacency matrix is divided by the
//! sentence's degree and the stationary scores are found by power
//! iteration.

use super::power::PowerIteration;
use super::{sentence_terms, SentenceRanker, SummarizeError};
use crate::nlp::{Document, StopwordFilter};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct LexRank {
    /// Minimum cosine similarity for an edge
    pub threshold: f64,
    pub power: PowerIteration,
}

impl Default for LexRank {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            power: PowerIteration::new(0.1),
        }
    }
}

type TermWeights = HashMap<String, f64>;

impl LexRank {
    /// Term frequency of each sentence, scaled by its most frequent term
    fn term_frequencies(sentences: &[Vec<String>]) -> Vec<TermWeights> {
        sentences
            .iter()
            .map(|terms| {
                let mut counts: HashMap<&str, usize> = HashMap::new();
                for term in terms {
                    *counts.entry(term.as_str()).or_insert(0) += 1;
                }
                let max = counts.values().copied().max().unwrap_or(1) as f64;
                counts
                    .into_iter()
                    .map(|(term, count)| (term.to_string(), count as f64 / max))
                    .collect()
            })
            .collect()
    }

    /// `ln(N / (1 + sentences containing term))`
    fn inverse_document_frequencies(sentences: &[Vec<String>]) -> TermWeights {
        let total = sentences.len() as f64;
        let mut containing: HashMap<&str, usize> = HashMap::new();
        for terms in sentences {
            let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *containing.entry(term).or_insert(0) += 1;
            }
        }

        containing
            .into_iter()
            .map(|(term, n)| (term.to_string(), (total / (1.0 + n as f64)).ln()))
            .collect()
    }

    /// Idf-modified cosine similarity between two sentences
    pub fn cosine_similarity(tf1: &TermWeights, tf2: &TermWeights, idf: &TermWeights) -> f64 {
        let idf_of = |term: &str| idf.get(term).copied().unwrap_or(0.0);

        let numerator: f64 = tf1
            .iter()
            .filter_map(|(term, w1)| tf2.get(term).map(|w2| w1 * w2 * idf_of(term).powi(2)))
            .sum();
        let norm = |tf: &TermWeights| -> f64 {
            tf.iter()
                .map(|(term, w)| (w * idf_of(term)).powi(2))
                .sum::<f64>()
        };
        let (denominator1, denominator2) = (norm(tf1), norm(tf2));

        if denominator1 > 0.0 && denominator2 > 0.0 {
            numerator / (denominator1.sqrt() * denominator2.sqrt())
        } else {
            0.0
        }
    }

    /// Degree-normalized adjacency matrix
    fn transition_matrix(&self, sentences: &[Vec<String>]) -> Vec<Vec<f64>> {
        let tf = Self::term_frequencies(sentences);
        let idf = Self::inverse_document_frequencies(sentences);
        let n = sentences.len();

        let mut matrix = vec![vec![0.0; n]; n];
        for (row, tf_row) in tf.iter().enumerate() {
            let mut degree = 0usize;
            for (col, tf_col) in tf.iter().enumerate() {
                if Self::cosine_similarity(tf_row, tf_col, &idf) > self.threshold {
                    matrix[row][col] = 1.0;
                    degree += 1;
                }
            }

            let degree = degree.max(1) as f64;
            for value in matrix[row].iter_mut() {
                *value /= degree;
            }
        }

        matrix
    }
}

impl SentenceRanker for LexRank {
    fn rate(
        &self,
        document: &Document,
        stopwords: &StopwordFilter,
    ) -> Result<Vec<f64>, SummarizeError> {
        let sentences: Vec<Vec<String>> = document
            .sentences()
            .map(|s| sentence_terms(s, stopwords))
            .collect();
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let matrix = self.transition_matrix(&sentences);
        Ok(self.power.run(&matrix).scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_term_frequencies_are_max_normalized() {
        let tf = LexRank::term_frequencies(&[terms("cat cat dog")]);
        assert_eq!(tf[0]["cat"], 1.0);
        assert_eq!(tf[0]["dog"], 0.5);
    }

    #[test]
    fn test_idf() {
        let sentences = vec![terms("cat dog"), terms("cat"), terms("bird"), terms("fish")];
        let idf = LexRank::inverse_document_frequencies(&sentences);
        assert!((idf["cat"] - (4.0f64 / 3.0).ln()).abs() < 1e-12);
        assert!((idf["bird"] - 2.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity() {
        let sentences = vec![
            terms("cat dog"),
            terms("cat dog"),
            terms("bird fish"),
            terms("owl"),
            terms("eel"),
        ];
        let tf = LexRank::term_frequencies(&sentences);
        let idf = LexRank::inverse_document_frequencies(&sentences);

        let same = LexRank::cosine_similarity(&tf[0], &tf[1], &idf);
        assert!((same - 1.0).abs() < 1e-12);
        assert_eq!(LexRank::cosine_similarity(&tf[0], &tf[2], &idf), 0.0);
    }

    #[test]
    fn test_rows_are_divided_by_degree() {
        let sentences = vec![
            terms("cat dog"),
            terms("cat dog"),
            terms("bird fish"),
            terms("owl"),
            terms("eel"),
        ];
        let matrix = LexRank::default().transition_matrix(&sentences);

        assert_eq!(matrix[0], vec![0.5, 0.5, 0.0, 0.0, 0.0]);
        assert_eq!(matrix[2], vec![0.0, 0.0, 1.0, 0.0, 0.0]);
        for row in &matrix {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
    }
}
