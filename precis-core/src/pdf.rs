//! PDF text extraction.
//!
//! Turns an uploaded PDF into plain text by concatenating the text of each
//! page in page order. No separator is inserted between pages.

use lopdf::Document;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during PDF processing
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Not a readable PDF document: {0}")]
    Parse(String),
}

/// A single page from a PDF document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfPage {
    /// Page index (0-based)
    pub index: u32,
    /// Extracted plain text
    pub text: String,
}

impl PdfPage {
    pub fn new(index: u32, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// PDF metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub page_count: u32,
}

/// A PDF document reduced to its page texts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfDocument {
    /// Pages in document order
    pub pages: Vec<PdfPage>,
    /// Document metadata
    pub metadata: PdfMetadata,
}

impl PdfDocument {
    /// Parse a PDF held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfError> {
        debug!("Parsing PDF from {} bytes", bytes.len());

        let doc = Document::load_mem(bytes).map_err(|e| PdfError::Parse(e.to_string()))?;
        Ok(Self::from_document(&doc))
    }

    fn from_document(doc: &Document) -> Self {
        let page_numbers = doc.get_pages();
        let page_count = page_numbers.len() as u32;
        debug!("PDF has {} pages", page_count);

        let metadata = Self::extract_metadata(doc, page_count);

        // get_pages is keyed by 1-based page number, so iteration is in page order
        let pages = page_numbers
            .keys()
            .map(|&page_num| Self::extract_page(doc, page_num))
            .collect();

        PdfDocument { pages, metadata }
    }

    /// Extract metadata from the document info dictionary
    fn extract_metadata(doc: &Document, page_count: u32) -> PdfMetadata {
        let mut metadata = PdfMetadata {
            page_count,
            ..Default::default()
        };

        let info = doc
            .trailer
            .get(b"Info")
            .and_then(|info| info.as_reference())
            .and_then(|info_ref| doc.get_dictionary(info_ref));

        if let Ok(info_dict) = info {
            let field = |key: &[u8]| {
                info_dict
                    .get(key)
                    .ok()
                    .and_then(|value| value.as_string().ok())
                    .map(|s| s.to_string())
            };
            metadata.title = field(b"Title");
            metadata.author = field(b"Author");
            metadata.subject = field(b"Subject");
            metadata.creator = field(b"Creator");
        }

        metadata
    }

    /// Extract a single page; undecodable pages contribute no text
    fn extract_page(doc: &Document, page_num: u32) -> PdfPage {
        let text = match doc.extract_text(&[page_num]) {
            Ok(text) => text,
            Err(e) => {
                debug!("No text extracted from page {}: {}", page_num, e);
                String::new()
            }
        };

        PdfPage::new(page_num - 1, text)
    }

    /// All page texts concatenated in page order, without separators
    pub fn full_text(&self) -> String {
        self.pages.iter().map(|p| p.text.as_str()).collect()
    }

    /// Get the number of pages
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }
}

/// Extract plain text from an optional uploaded PDF.
///
/// Returns an empty string when no document is supplied.
pub fn extract(document: Option<&[u8]>) -> Result<String, PdfError> {
    match document {
        None => Ok(String::new()),
        Some(bytes) => {
            let doc = PdfDocument::from_bytes(bytes)?;
            debug!(
                "Extracted {} pages (title: {})",
                doc.page_count(),
                doc.metadata.title.as_deref().unwrap_or("none")
            );
            Ok(doc.full_text())
        }
    }
}
