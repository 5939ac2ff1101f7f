//! # Precis Core
//!
//! Core library for Precis - an extractive text summarizer.
//!
//! This crate provides:
//! - Configuration management
//! - PDF text extraction
//! - Text statistics
//! - Sentence and word tokenization
//! - LSA, Luhn, LexRank and TextRank summarizers
//! - Submission handling shared by every front-end
//! - HTTP server (web tool and JSON API)
//! - Shared data models

pub mod config;
pub mod controller;
pub mod model;
pub mod nlp;
pub mod pdf;
pub mod server;
pub mod stats;
pub mod summarizers;

pub use config::{Config, ConfigError};
pub use controller::{Controller, Outcome, Processed, Submission};
pub use model::*;
pub use pdf::{PdfDocument, PdfError};
pub use stats::compute_statistics;
pub use summarizers::{SummarizeError, Summarizer, SummarizerOptions};
