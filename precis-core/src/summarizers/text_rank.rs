//! TextRank summarization
//!
//! Edges are weighted by word overlap normalized by the log lengths of the
//! two sentences. Rows are normalized, mixed with a uniform jump
//! probability and ranked by power iteration.

use super::power::PowerIteration;
use super::{sentence_terms, SentenceRanker, SummarizeError};
use crate::nlp::{Document, StopwordFilter};

const ZERO_DIVISION_PREVENTION: f64 = 1e-7;

#[derive(Debug, Clone)]
pub struct TextRank {
    /// Probability of following an edge rather than jumping
    pub damping: f64,
    pub power: PowerIteration,
}

impl Default for TextRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            power: PowerIteration::new(1e-4),
        }
    }
}

impl TextRank {
    /// Overlap weight between two sentences' word lists
    pub fn edge_weight(words1: &[String], words2: &[String]) -> f64 {
        let overlap: usize = words1
            .iter()
            .map(|w| words2.iter().filter(|other| *other == w).count())
            .sum();
        if overlap == 0 {
            return 0.0;
        }

        let norm = (words1.len() as f64).ln() + (words2.len() as f64).ln();
        if norm.abs() < 1e-8 {
            // both sentences are a single word
            overlap as f64
        } else {
            overlap as f64 / norm
        }
    }

    fn transition_matrix(&self, sentences: &[Vec<String>]) -> Vec<Vec<f64>> {
        let n = sentences.len();
        let mut weights = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i..n {
                let weight = Self::edge_weight(&sentences[i], &sentences[j]);
                weights[i][j] = weight;
                weights[j][i] = weight;
            }
        }

        let jump = (1.0 - self.damping) / n as f64;
        weights
            .into_iter()
            .map(|row| {
                let total = row.iter().sum::<f64>() + ZERO_DIVISION_PREVENTION;
                row.into_iter()
                    .map(|w| jump + self.damping * w / total)
                    .collect()
            })
            .collect()
    }
}

impl SentenceRanker for TextRank {
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
    fn test_edge_weight() {
        assert_eq!(TextRank::edge_weight(&terms("a b"), &terms("c d")), 0.0);
        assert_eq!(TextRank::edge_weight(&terms("a"), &terms("a")), 1.0);

        let weight = TextRank::edge_weight(&terms("a b"), &terms("b c b"));
        assert!((weight - 2.0 / (2f64.ln() + 3f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_edge_weight_is_symmetric_in_overlap() {
        let a = terms("cats sleep a lot");
        let b = terms("cats hunt at night");
        assert_eq!(TextRank::edge_weight(&a, &b), TextRank::edge_weight(&b, &a));
    }

    #[test]
    fn test_transition_rows_sum_to_one() {
        let sentences = vec![terms("cats are mammals"), terms("cats sleep"), terms("dogs bark")];
        let matrix = TextRank::default().transition_matrix(&sentences);
        for row in &matrix {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_isolated_sentence_keeps_only_jump_mass() {
        let sentences = vec![terms("cats purr"), terms("cats meow"), terms("")];
        let matrix = TextRank::default().transition_matrix(&sentences);
        let jump = 0.15 / 3.0;
        assert!(matrix[2].iter().all(|v| (v - jump).abs() < 1e-12));
    }
}
