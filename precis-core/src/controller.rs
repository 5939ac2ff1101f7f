//! Submission handling shared by the web tool, the JSON API and the CLI.
//!
//! A [`Submission`] is resolved into the text to summarize (an uploaded
//! document wins over typed text when it yields any text), measured,
//! summarized and measured again.

use crate::model::{Algorithm, Download, InputSource, SentenceCount, SummaryReport, SummaryRequest};
use crate::pdf;
use crate::stats::compute_statistics;
use crate::summarizers::{Summarizer, SummarizerOptions};
use tracing::{debug, info, warn};

/// Message shown when there is nothing to summarize
pub const BLANK_INPUT_WARNING: &str = "Please enter some text first.";

/// One user submission
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Raw bytes of an uploaded PDF
    pub document: Option<Vec<u8>>,
    pub typed_text: String,
    pub algorithm: Algorithm,
    pub sentence_count: SentenceCount,
}

impl Submission {
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            typed_text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_document(mut self, bytes: Vec<u8>) -> Self {
        self.document = Some(bytes);
        self
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

/// Result of processing a submission
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Summarized(SummaryReport),
    /// Nothing to summarize
    Warning(String),
    /// Summarization failed
    Failed(String),
}

/// An outcome plus the upload error, if the document could not be read
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    pub upload_error: Option<String>,
    pub outcome: Outcome,
}

/// The text to summarize and where it came from.
///
/// Returns `None` when both inputs are blank.
pub fn resolve_input<'a>(document_text: &'a str, typed_text: &'a str) -> Option<(&'a str, InputSource)> {
    if !document_text.trim().is_empty() {
        Some((document_text, InputSource::Document))
    } else if !typed_text.trim().is_empty() {
        Some((typed_text, InputSource::Typed))
    } else {
        None
    }
}

/// Stateless submission processor
#[derive(Debug, Clone, Default)]
pub struct Controller {
    summarizer: Summarizer,
}

impl Controller {
    pub fn new(options: SummarizerOptions) -> Self {
        Self {
            summarizer: Summarizer::new(options),
        }
    }

    pub fn process(&self, submission: &Submission) -> Processed {
        let (document_text, upload_error) = match pdf::extract(submission.document.as_deref()) {
            Ok(text) => (text, None),
            Err(e) => {
                warn!("Could not read uploaded document: {}", e);
                (String::new(), Some(e.to_string()))
            }
        };

        let outcome = self.summarize_input(&document_text, submission);
        Processed {
            upload_error,
            outcome,
        }
    }

    fn summarize_input(&self, document_text: &str, submission: &Submission) -> Outcome {
        let Some((text, source)) = resolve_input(document_text, &submission.typed_text) else {
            debug!("Blank submission");
            return Outcome::Warning(BLANK_INPUT_WARNING.to_string());
        };

        let before = compute_statistics(text);
        debug!(
            "Summarizing {} words from {:?} with {}",
            before.words, source, submission.algorithm
        );

        let request = SummaryRequest::new(text)
            .with_algorithm(submission.algorithm)
            .with_sentence_count(submission.sentence_count);
        let summary = match self.summarizer.summarize_request(&request) {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summarization failed: {}", e);
                return Outcome::Failed(e.to_string());
            }
        };

        let after = compute_statistics(&summary);
        info!(
            "Summarized {} sentences down to {} with {}",
            before.sentences, after.sentences, submission.algorithm
        );

        Outcome::Summarized(SummaryReport {
            algorithm: submission.algorithm,
            sentence_count: submission.sentence_count,
            source,
            before,
            download: Download::summary(summary.clone()),
            summary,
            after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextStatistics;
    use crate::pdf::tests::build_pdf;
    use crate::summarizers::tests::{broken_text_rank, CATS};

    fn report(processed: Processed) -> SummaryReport {
        match processed.outcome {
            Outcome::Summarized(report) => report,
            other => panic!("expected a summary, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_input_prefers_document() {
        assert_eq!(
            resolve_input("From the PDF.", "Typed."),
            Some(("From the PDF.", InputSource::Document))
        );
        assert_eq!(
            resolve_input(" \n ", "Typed."),
            Some(("Typed.", InputSource::Typed))
        );
        assert_eq!(resolve_input("", "\t"), None);
    }

    #[test]
    fn test_cats_end_to_end() {
        let submission = Submission::typed(CATS)
            .with_algorithm(Algorithm::Luhn)
            .with_sentence_count(SentenceCount::new(2).unwrap());
        let processed = Controller::default().process(&submission);
        assert_eq!(processed.upload_error, None);

        let report = report(processed);
        assert_eq!(report.source, InputSource::Typed);
        assert_eq!(
            report.before,
            TextStatistics {
                words: 14,
                characters: 77,
                sentences: 4
            }
        );
        assert_eq!(report.summary, "Cats are mammals. Cats are independent.");
        assert_eq!(report.after.sentences, 2);
        assert_eq!(report.download, Download::summary(report.summary.clone()));
    }

    #[test]
    fn test_blank_input_warns_without_report() {
        let processed = Controller::default().process(&Submission::typed("   \n\n  "));
        assert_eq!(processed.upload_error, None);
        assert_eq!(
            processed.outcome,
            Outcome::Warning("Please enter some text first.".to_string())
        );
    }

    #[test]
    fn test_document_takes_priority_over_typed_text() {
        let submission = Submission::typed("Dogs bark loudly.")
            .with_document(build_pdf(&["Cats are mammals.", "Cats hunt at night."]));
        let report = report(Controller::default().process(&submission));

        assert_eq!(report.source, InputSource::Document);
        assert!(report.summary.contains("Cats"));
        assert!(!report.summary.contains("Dogs"));
    }

    #[test]
    fn test_unreadable_document_falls_back_to_typed_text() {
        let submission =
            Submission::typed("Dogs bark loudly.").with_document(b"not a pdf".to_vec());
        let processed = Controller::default().process(&submission);

        assert!(processed.upload_error.is_some());
        let report = report(processed);
        assert_eq!(report.source, InputSource::Typed);
        assert_eq!(report.summary, "Dogs bark loudly.");
    }

    #[test]
    fn test_unreadable_document_and_blank_text_warns() {
        let submission = Submission::typed("").with_document(Vec::new());
        let processed = Controller::default().process(&submission);

        assert!(processed.upload_error.is_some());
        assert!(matches!(processed.outcome, Outcome::Warning(_)));
    }

    #[test]
    fn test_ranking_failure_is_reported() {
        let submission = Submission::typed(CATS).with_algorithm(Algorithm::TextRank);
        let processed = Controller::new(broken_text_rank()).process(&submission);

        assert_eq!(processed.upload_error, None);
        match processed.outcome {
            Outcome::Failed(message) => assert!(message.starts_with("TextRank failed"), "{message}"),
            other => panic!("expected a failure, got {other:?}"),
        }
    }
}
