//! Plain-text document model.
//!
//! Blank lines separate paragraphs. A line whose cased letters are all
//! uppercase is a heading and is never offered as a summary sentence. The
//! lines between two headings are joined with spaces and split into
//! sentences, so no sentence spans a heading.

use super::tokenizer::Tokenizer;

/// A sentence with its word tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub words: Vec<String>,
    pub is_heading: bool,
}

impl Sentence {
    fn new(text: String, tokenizer: &Tokenizer, is_heading: bool) -> Self {
        let words = tokenizer.to_words(&text);
        Self {
            text,
            words,
            is_heading,
        }
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A block of text between blank lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub headings: Vec<Sentence>,
    pub sentences: Vec<Sentence>,
}

impl Paragraph {
    fn push_text(&mut self, text: &str, tokenizer: &Tokenizer) {
        self.sentences.extend(
            tokenizer
                .to_sentences(text)
                .into_iter()
                .map(|s| Sentence::new(s, tokenizer, false)),
        );
    }
}

/// A parsed plain-text document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Parse plain text into paragraphs, headings and sentences
    pub fn parse(text: &str, tokenizer: &Tokenizer) -> Self {
        let mut paragraphs = Vec::new();
        let mut lines: Vec<&str> = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                if !lines.is_empty() {
                    paragraphs.push(Self::parse_paragraph(&lines, tokenizer));
                    lines.clear();
                }
            } else {
                lines.push(line);
            }
        }
        if !lines.is_empty() {
            paragraphs.push(Self::parse_paragraph(&lines, tokenizer));
        }

        Document { paragraphs }
    }

    fn parse_paragraph(lines: &[&str], tokenizer: &Tokenizer) -> Paragraph {
        let mut paragraph = Paragraph::default();
        let mut pending: Vec<&str> = Vec::new();

        for &line in lines {
            if is_heading(line) {
                paragraph.push_text(&pending.join(" "), tokenizer);
                pending.clear();
                paragraph
                    .headings
                    .push(Sentence::new(line.to_string(), tokenizer, true));
            } else {
                pending.push(line);
            }
        }
        paragraph.push_text(&pending.join(" "), tokenizer);

        paragraph
    }

    /// All non-heading sentences in document order
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.paragraphs.iter().flat_map(|p| p.sentences.iter())
    }

    /// Words of every sentence, headings included
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.headings.iter().chain(p.sentences.iter()))
            .flat_map(|s| s.words.iter().map(String::as_str))
    }

    pub fn sentence_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.sentences.len()).sum()
    }
}

/// A line with cased letters, all of them uppercase
fn is_heading(line: &str) -> bool {
    let mut cased = line
        .chars()
        .filter(|c| c.is_lowercase() || c.is_uppercase())
        .peekable();
    cased.peek().is_some() && cased.all(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_and_headings() {
        let text = "INTRODUCTION\nCats are mammals. Cats sleep\na lot.\n\n\nCHAPTER 2\nCats hunt at night.";
        let doc = Document::parse(text, &Tokenizer::english());

        assert_eq!(doc.paragraphs.len(), 2);
        let headings: Vec<_> = doc
            .paragraphs
            .iter()
            .flat_map(|p| p.headings.iter())
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(headings, vec!["INTRODUCTION", "CHAPTER 2"]);

        let sentences: Vec<_> = doc.sentences().map(|s| s.text.as_str()).collect();
        assert_eq!(
            sentences,
            vec!["Cats are mammals.", "Cats sleep a lot.", "Cats hunt at night."]
        );
        assert_eq!(doc.sentence_count(), 3);
    }

    #[test]
    fn test_words_include_headings() {
        let doc = Document::parse("CATS\nCats purr.", &Tokenizer::english());
        let words: Vec<_> = doc.words().collect();
        assert_eq!(words, vec!["CATS", "Cats", "purr"]);
        assert!(doc.paragraphs[0].headings.iter().all(|s| s.is_heading));
    }

    #[test]
    fn test_heading_splits_surrounding_text() {
        let text = "Cats hunt at night\nSECTION TWO\nDogs bark.";
        let doc = Document::parse(text, &Tokenizer::english());

        assert_eq!(doc.paragraphs.len(), 1);
        let sentences: Vec<_> = doc.sentences().map(|s| s.text.as_str()).collect();
        assert_eq!(sentences, vec!["Cats hunt at night", "Dogs bark."]);
        assert_eq!(doc.paragraphs[0].headings[0].text, "SECTION TWO");
    }

    #[test]
    fn test_heading_detection() {
        assert!(is_heading("PART ONE: THE BEGINNING"));
        assert!(!is_heading("Part one"));
        assert!(!is_heading("1999 - 2004"));
    }

    #[test]
    fn test_empty_text() {
        let doc = Document::parse(" \n\n \n", &Tokenizer::english());
        assert!(doc.paragraphs.is_empty());
        assert_eq!(doc.sentences().count(), 0);
    }
}
