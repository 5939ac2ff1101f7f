//! CLI command implementations

pub mod algorithms;
pub mod config;
pub mod serve;
pub mod stats;
pub mod status;
pub mod summarize;

use crate::InputArgs;
use anyhow::{bail, Context, Result};
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Text and PDF bytes gathered from the command line
#[derive(Debug, Default)]
pub struct Input {
    pub document: Option<Vec<u8>>,
    pub text: String,
}

/// Read text from stdin if it is piped
fn read_stdin() -> Result<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        // Stdin is a terminal, not piped
        return Ok(None);
    }

    let text = read_text(io::stdin().lock())?;
    Ok((!text.is_empty()).then_some(text))
}

/// Read everything from `reader` unchanged; the bytes must be UTF-8
fn read_text(mut reader: impl Read) -> Result<String> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("Failed to read standard input as UTF-8 text")?;
    Ok(text)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Gather the input from the argument, `--file` and stdin.
///
/// A PDF is kept as raw bytes so the controller can apply its precedence
/// rules; other files are read as text when no text argument is given.
pub fn load_input(args: &InputArgs) -> Result<Input> {
    let mut input = Input {
        text: args.text.clone().unwrap_or_default(),
        ..Input::default()
    };

    if let Some(path) = &args.file {
        if !path.exists() {
            bail!("File not found: {}", path.display());
        }

        if is_pdf(path) {
            let bytes =
                std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            debug!("Read {} bytes from {}", bytes.len(), path.display());
            input.document = Some(bytes);
        } else if args.text.is_none() {
            input.text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
    }

    if args.text.is_none() && args.file.is_none() {
        match read_stdin()? {
            Some(text) => input.text = text,
            None => bail!(
                "No text provided. Usage: precis summarize \"your text\", precis summarize --file doc.pdf or cat notes.txt | precis summarize"
            ),
        }
    }

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(text: Option<&str>, file: Option<PathBuf>) -> InputArgs {
        InputArgs {
            text: text.map(str::to_string),
            file,
        }
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Path::new("book.pdf")));
        assert!(is_pdf(Path::new("BOOK.PDF")));
        assert!(!is_pdf(Path::new("notes.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }

    #[test]
    fn test_text_argument() {
        let input = load_input(&args(Some("Cats purr."), None)).unwrap();
        assert_eq!(input.text, "Cats purr.");
        assert!(input.document.is_none());
    }

    #[test]
    fn test_text_file_is_read_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Cats purr. Dogs bark.").unwrap();

        let input = load_input(&args(None, Some(path))).unwrap();
        assert_eq!(input.text, "Cats purr. Dogs bark.");
        assert!(input.document.is_none());
    }

    #[test]
    fn test_pdf_file_is_kept_as_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.5").unwrap();

        let input = load_input(&args(Some("Typed."), Some(path))).unwrap();
        assert_eq!(input.document.as_deref(), Some(&b"%PDF-1.5"[..]));
        assert_eq!(input.text, "Typed.");
    }

    #[test]
    fn test_piped_text_is_read_verbatim() {
        let text = read_text(&b"Cats purr.\r\nDogs bark.\r\n"[..]).unwrap();
        assert_eq!(text, "Cats purr.\r\nDogs bark.\r\n");
        assert_eq!(text.chars().count(), 24);
    }

    #[test]
    fn test_piped_invalid_utf8_is_an_error() {
        assert!(read_text(&b"Cats purr.\n\xff\xfe\n"[..]).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_input(&args(None, Some(PathBuf::from("/nonexistent/doc.pdf")))).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
