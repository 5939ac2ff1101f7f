//! Shared data models for Precis.
//!
//! This module contains the request, result and statistics types passed
//! between the summarizers, the controller and the front-ends.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use thiserror::Error;

/// Extractive summarization algorithms
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, utoipa::ToSchema,
)]
pub enum Algorithm {
    /// Latent Semantic Analysis
    #[default]
    #[serde(rename = "LSA", alias = "lsa")]
    Lsa,
    #[serde(alias = "luhn")]
    Luhn,
    #[serde(alias = "lexrank", alias = "lex_rank")]
    LexRank,
    #[serde(alias = "textrank", alias = "text_rank")]
    TextRank,
}

impl Algorithm {
    /// All algorithms, in the order they are offered to users
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Lsa,
        Algorithm::Luhn,
        Algorithm::LexRank,
        Algorithm::TextRank,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Lsa => "LSA",
            Algorithm::Luhn => "Luhn",
            Algorithm::LexRank => "LexRank",
            Algorithm::TextRank => "TextRank",
        }
    }

    /// One-line explanation shown next to the algorithm selector
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Lsa => "Extracts important sentences based on the latent topics in the text.",
            Algorithm::Luhn => {
                "Focuses on sentences with high-frequency significant words, ignoring less important ones."
            }
            Algorithm::LexRank => "Uses a graph-based approach to rank sentences by their importance.",
            Algorithm::TextRank => {
                "Similar to LexRank but with different scoring based on sentence relationships."
            }
        }
    }

    /// Long name of the technique
    pub fn long_name(&self) -> &'static str {
        match self {
            Algorithm::Lsa => "Latent Semantic Analysis",
            Algorithm::Luhn => "Luhn",
            Algorithm::LexRank => "LexRank",
            Algorithm::TextRank => "TextRank",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// Unknown algorithm name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown summarization algorithm '{0}' (expected one of: LSA, Luhn, LexRank, TextRank)")]
pub struct ParseAlgorithmError(pub String);

impl std::str::FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "lsa" => Ok(Algorithm::Lsa),
            "luhn" => Ok(Algorithm::Luhn),
            "lexrank" | "lex_rank" | "lex-rank" => Ok(Algorithm::LexRank),
            "textrank" | "text_rank" | "text-rank" => Ok(Algorithm::TextRank),
            _ => Err(ParseAlgorithmError(value.to_string())),
        }
    }
}

/// Invalid sentence count
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SentenceCountError {
    #[error("Sentence count must be a positive integer")]
    Zero,
    #[error("Invalid sentence count '{0}'")]
    Invalid(String),
}

/// Number of sentences to keep in a summary (always at least one)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SentenceCount(NonZeroUsize);

impl SentenceCount {
    /// Counts offered by the interactive selectors
    pub const PRESETS: [usize; 4] = [5, 10, 20, 30];

    pub fn new(count: usize) -> Result<Self, SentenceCountError> {
        NonZeroUsize::new(count)
            .map(SentenceCount)
            .ok_or(SentenceCountError::Zero)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for SentenceCount {
    fn default() -> Self {
        // 1 + 4 = 5, the first preset
        SentenceCount(NonZeroUsize::MIN.saturating_add(4))
    }
}

impl TryFrom<usize> for SentenceCount {
    type Error = SentenceCountError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        SentenceCount::new(count)
    }
}

impl From<SentenceCount> for usize {
    fn from(count: SentenceCount) -> Self {
        count.get()
    }
}

impl std::str::FromStr for SentenceCount {
    type Err = SentenceCountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let count: usize = value
            .trim()
            .parse()
            .map_err(|_| SentenceCountError::Invalid(value.to_string()))?;
        SentenceCount::new(count)
    }
}

impl std::fmt::Display for SentenceCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A single summarization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub text: String,
    pub algorithm: Algorithm,
    pub sentence_count: SentenceCount,
}

impl SummaryRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            algorithm: Algorithm::default(),
            sentence_count: SentenceCount::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_sentence_count(mut self, count: SentenceCount) -> Self {
        self.sentence_count = count;
        self
    }
}

/// Word, character and estimated sentence counts of a text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TextStatistics {
    pub words: usize,
    pub characters: usize,
    pub sentences: usize,
}

/// Where the summarized text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    /// Text extracted from an uploaded document
    Document,
    /// Text entered directly
    Typed,
}

/// A file offered for download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Download {
    pub file_name: String,
    pub media_type: String,
    pub content: String,
}

impl Download {
    pub const SUMMARY_FILE_NAME: &'static str = "summary.txt";
    pub const PLAIN_TEXT: &'static str = "text/plain";

    /// The summary as `summary.txt`
    pub fn summary(content: impl Into<String>) -> Self {
        Self {
            file_name: Self::SUMMARY_FILE_NAME.to_string(),
            media_type: Self::PLAIN_TEXT.to_string(),
            content: content.into(),
        }
    }
}

/// Everything shown after a successful summarization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SummaryReport {
    pub algorithm: Algorithm,
    #[schema(value_type = usize)]
    pub sentence_count: SentenceCount,
    pub source: InputSource,
    /// Statistics of the original text
    pub before: TextStatistics,
    pub summary: String,
    /// Statistics of the summary
    pub after: TextStatistics,
    pub download: Download,
}

/// Algorithm listing entry
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AlgorithmInfo {
    pub name: String,
    pub long_name: String,
    pub description: String,
}

impl From<Algorithm> for AlgorithmInfo {
    fn from(algorithm: Algorithm) -> Self {
        Self {
            name: algorithm.name().to_string(),
            long_name: algorithm.long_name().to_string(),
            description: algorithm.description().to_string(),
        }
    }
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiErrorDetail {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                message: message.into(),
                r#type: error_type.into(),
                code: None,
            },
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.error.code = Some(code.into());
        self
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(message, "invalid_request_error")
    }

    pub fn blank_input(message: impl Into<String>) -> Self {
        Self::new(message, "invalid_request_error").with_code("blank_input")
    }

    pub fn summarization_failed(message: impl Into<String>) -> Self {
        Self::new(message, "summarization_error")
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(message, "invalid_request_error").with_code("payload_too_large")
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(message, "internal_error")
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_display_and_parse() {
        for algorithm in Algorithm::ALL {
            let parsed: Algorithm = algorithm.to_string().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
        assert_eq!("lex-rank".parse::<Algorithm>().unwrap(), Algorithm::LexRank);
        assert_eq!(" TEXTRANK ".parse::<Algorithm>().unwrap(), Algorithm::TextRank);
        assert!("bart".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_algorithm_serde_names() {
        assert_eq!(serde_json::to_string(&Algorithm::Lsa).unwrap(), "\"LSA\"");
        assert_eq!(serde_json::to_string(&Algorithm::LexRank).unwrap(), "\"LexRank\"");
        let parsed: Algorithm = serde_json::from_str("\"text_rank\"").unwrap();
        assert_eq!(parsed, Algorithm::TextRank);
    }

    #[test]
    fn test_sentence_count_rejects_zero() {
        assert_eq!(SentenceCount::new(0), Err(SentenceCountError::Zero));
        assert_eq!(SentenceCount::default().get(), 5);
        assert_eq!("10".parse::<SentenceCount>().unwrap().get(), 10);
        assert!("ten".parse::<SentenceCount>().is_err());
        assert!(serde_json::from_str::<SentenceCount>("0").is_err());
    }

    #[test]
    fn test_download_is_plain_text_summary() {
        let download = Download::summary("Short.");
        assert_eq!(download.file_name, "summary.txt");
        assert_eq!(download.media_type, "text/plain");
        assert_eq!(download.content, "Short.");
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::blank_input("Please enter some text first.");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("invalid_request_error"));
        assert!(json.contains("blank_input"));
    }
}
