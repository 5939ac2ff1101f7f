//! Extractive summarization.
//!
//! A [`Summarizer`] parses text into sentences, asks one of four
//! [`SentenceRanker`] strategies to rate every sentence, keeps the best
//! rated ones and joins them with a single space. Ties keep document order
//! and the selected sentences are returned in document order.

pub mod lex_rank;
pub mod lsa;
pub mod luhn;
pub mod power;
pub mod text_rank;

use crate::model::{Algorithm, SentenceCount, SummaryRequest};
use crate::nlp::{Document, Sentence, StopwordFilter, Tokenizer};
use thiserror::Error;
use tracing::{debug, info};

pub use lex_rank::LexRank;
pub use lsa::Lsa;
pub use luhn::Luhn;
pub use power::{PowerIteration, PowerResult};
pub use text_rank::TextRank;

/// Errors that can occur during summarization
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("No text to summarize")]
    EmptyInput,

    #[error("{algorithm} failed: {reason}")]
    RankingFailed {
        algorithm: Algorithm,
        reason: String,
    },
}

/// A sentence rating strategy
pub trait SentenceRanker {
    /// Rate every sentence of `document`, in document order.
    ///
    /// An empty vector means there is nothing to rate and selects no sentence.
    fn rate(
        &self,
        document: &Document,
        stopwords: &StopwordFilter,
    ) -> Result<Vec<f64>, SummarizeError>;
}

/// Tuning for all four strategies
#[derive(Debug, Clone, Default)]
pub struct SummarizerOptions {
    /// Drop English stopwords before ranking
    pub stop_words: bool,
    pub lsa: Lsa,
    pub luhn: Luhn,
    pub lex_rank: LexRank,
    pub text_rank: TextRank,
}

impl SummarizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stop_words(mut self, stop_words: bool) -> Self {
        self.stop_words = stop_words;
        self
    }
}

/// Extractive summarizer
#[derive(Debug, Clone)]
pub struct Summarizer {
    tokenizer: Tokenizer,
    stopwords: StopwordFilter,
    options: SummarizerOptions,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(SummarizerOptions::default())
    }
}

impl Summarizer {
    pub fn new(options: SummarizerOptions) -> Self {
        let stopwords = if options.stop_words {
            StopwordFilter::english()
        } else {
            StopwordFilter::empty()
        };

        Self {
            tokenizer: Tokenizer::english(),
            stopwords,
            options,
        }
    }

    fn ranker(&self, algorithm: Algorithm) -> &dyn SentenceRanker {
        match algorithm {
            Algorithm::Lsa => &self.options.lsa,
            Algorithm::Luhn => &self.options.luhn,
            Algorithm::LexRank => &self.options.lex_rank,
            Algorithm::TextRank => &self.options.text_rank,
        }
    }

    /// Summarize `text` into at most `count` sentences joined by a single space
    pub fn summarize(
        &self,
        text: &str,
        algorithm: Algorithm,
        count: SentenceCount,
    ) -> Result<String, SummarizeError> {
        Ok(self.select_sentences(text, algorithm, count)?.join(" "))
    }

    /// Summarize a [`SummaryRequest`]
    pub fn summarize_request(&self, request: &SummaryRequest) -> Result<String, SummarizeError> {
        self.summarize(&request.text, request.algorithm, request.sentence_count)
    }

    /// The selected sentences, in document order
    pub fn select_sentences(
        &self,
        text: &str,
        algorithm: Algorithm,
        count: SentenceCount,
    ) -> Result<Vec<String>, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }

        let document = Document::parse(text, &self.tokenizer);
        let sentences: Vec<&Sentence> = document.sentences().collect();
        debug!(
            "Parsed {} sentences in {} paragraphs",
            sentences.len(),
            document.paragraphs.len()
        );

        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let ratings = self.ranker(algorithm).rate(&document, &self.stopwords)?;
        if ratings.is_empty() {
            debug!("{} found nothing to rate", algorithm);
            return Ok(Vec::new());
        }
        if ratings.len() != sentences.len() {
            return Err(SummarizeError::RankingFailed {
                algorithm,
                reason: format!(
                    "rated {} sentences, expected {}",
                    ratings.len(),
                    sentences.len()
                ),
            });
        }
        if ratings.iter().any(|r| !r.is_finite()) {
            return Err(SummarizeError::RankingFailed {
                algorithm,
                reason: "sentence rating is not a finite number".to_string(),
            });
        }

        let selected = select_best(&ratings, count.get());
        info!(
            "{} selected {} of {} sentences",
            algorithm,
            selected.len(),
            sentences.len()
        );

        Ok(selected
            .into_iter()
            .map(|i| sentences[i].text.clone())
            .collect())
    }
}

/// Indices of the `count` best ratings, returned in ascending index order.
///
/// The sort is stable, so equal ratings favour earlier sentences.
pub fn select_best(ratings: &[f64], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..ratings.len()).collect();
    order.sort_by(|&a, &b| ratings[b].total_cmp(&ratings[a]));
    order.truncate(count);
    order.sort_unstable();
    order
}

/// Lowercased words of a sentence with stopwords removed
pub(crate) fn sentence_terms(sentence: &Sentence, stopwords: &StopwordFilter) -> Vec<String> {
    sentence
        .words
        .iter()
        .map(|w| normalize_word(w))
        .filter(|w| !stopwords.is_stopword(w))
        .collect()
}

pub(crate) fn normalize_word(word: &str) -> String {
    word.to_lowercase()
}
