//! Natural Language Processing components
//!
//! Sentence and word tokenization, stop-word filtering and the plain-text
//! document model the summarizers rank.

pub mod document;
pub mod stopwords;
pub mod tokenizer;

pub use document::{Document, Paragraph, Sentence};
pub use stopwords::StopwordFilter;
pub use tokenizer::Tokenizer;
