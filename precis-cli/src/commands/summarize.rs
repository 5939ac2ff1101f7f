//! `precis summarize` command - Summarize text or a PDF

use super::load_input;
use crate::SummarizeArgs;
use anyhow::{bail, Result};
use precis_core::{Config, Controller, Outcome, Submission, SummaryReport, TextStatistics};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(config: Config, args: SummarizeArgs) -> Result<()> {
    let input = load_input(&args.input)?;

    let mut options = config.summarizer_options();
    if args.stop_words {
        options = options.with_stop_words(true);
    }

    let mut submission = Submission::typed(input.text)
        .with_algorithm(args.algorithm.unwrap_or(config.summarizer.algorithm))
        .with_sentence_count(args.sentences.unwrap_or(config.summarizer.sentence_count));
    submission.document = input.document;

    let processed = Controller::new(options).process(&submission);

    if let Some(error) = &processed.upload_error {
        eprintln!("❌ Could not read the PDF: {}", error);
    }

    let report = match processed.outcome {
        Outcome::Summarized(report) => report,
        Outcome::Warning(message) => {
            eprintln!("⚠️  {}", message);
            return Ok(());
        }
        Outcome::Failed(message) => bail!("Summarization failed: {}", message),
    };

    if let Some(out) = &args.out {
        let path = output_path(out, &report.download.file_name);
        std::fs::write(&path, &report.download.content)?;
        info!("Wrote {} bytes to {}", report.download.content.len(), path.display());
        eprintln!("💾 Summary saved to: {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// `out` itself, or the download's file name inside it when `out` is a directory
fn output_path(out: &Path, file_name: &str) -> PathBuf {
    if out.is_dir() {
        out.join(file_name)
    } else {
        out.to_path_buf()
    }
}

fn print_statistics(stats: &TextStatistics, sentences_label: &str) {
    println!("   - Words: {}", stats.words);
    println!("   - Characters: {}", stats.characters);
    println!("   - {}: {}", sentences_label, stats.sentences);
}

fn print_report(report: &SummaryReport) {
    println!("📊 Text Statistics (Before Summarization):");
    print_statistics(&report.before, "Sentences (estimated)");

    println!("\n📄 Text Summary ({}, {} sentences):", report.algorithm, report.sentence_count);
    println!("{}", "─".repeat(60));
    println!("{}", report.summary);
    println!("{}", "─".repeat(60));

    println!("\n📊 Text Statistics (After Summarization):");
    print_statistics(&report.after, "Sentences");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            output_path(dir.path(), "summary.txt"),
            dir.path().join("summary.txt")
        );

        let file = dir.path().join("cats.txt");
        assert_eq!(output_path(&file, "summary.txt"), file);
    }
}
