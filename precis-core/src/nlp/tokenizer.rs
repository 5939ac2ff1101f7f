//! English sentence and word tokenization
//!
//! Sentences end at `.`, `!`, `?` or `…` (plus any closing quotes or
//! brackets) when followed by whitespace and something that can start a
//! new sentence. Periods after common abbreviations and single-letter
//! initials do not end a sentence.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

/// A word starts with a letter and continues with letters, apostrophes or hyphens
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\W\d_](?:[^\W\d_]|['’-])*$").unwrap());

const TERMINATORS: [char; 4] = ['.', '!', '?', '…'];
const CLOSERS: [char; 7] = ['"', '\'', '”', '’', ')', ']', '}'];
const OPENERS: [char; 6] = ['"', '\'', '“', '‘', '(', '['];

const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "e.g", "i.e", "cf",
    "al", "approx", "dept", "est", "fig", "figs", "inc", "ltd", "co", "corp", "no", "nos",
    "vol", "vols", "ed", "eds", "gen", "gov", "sen", "rep", "rev", "capt", "col", "lt", "sgt",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "u.s",
    "u.k", "a.m", "p.m", "ph.d", "b.c", "a.d",
];

/// English-aware tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    abbreviations: HashSet<&'static str>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Tokenizer {
    pub fn english() -> Self {
        Self {
            abbreviations: ENGLISH_ABBREVIATIONS.iter().copied().collect(),
        }
    }

    /// Split a paragraph into trimmed, non-empty sentences
    pub fn to_sentences(&self, text: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (_, c) = chars[i];
            if !TERMINATORS.contains(&c) {
                i += 1;
                continue;
            }

            // Swallow repeated terminators and closing punctuation: `?!`, `."`, `.)`
            let mut end = i + 1;
            while end < chars.len()
                && (TERMINATORS.contains(&chars[end].1) || CLOSERS.contains(&chars[end].1))
            {
                end += 1;
            }

            let boundary = end == chars.len()
                || (chars[end].1.is_whitespace()
                    && self.starts_sentence(&chars[end..])
                    && !(c == '.' && self.is_abbreviation(text, start, chars[i].0)));

            if boundary {
                let end_byte = chars.get(end).map_or(text.len(), |&(pos, _)| pos);
                push_trimmed(&mut sentences, &text[start..end_byte]);
                start = end_byte;
            }
            i = end;
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }

    /// Split a sentence into words (letters, apostrophes and hyphens only)
    pub fn to_words(&self, sentence: &str) -> Vec<String> {
        sentence
            .unicode_words()
            .filter(|w| WORD_PATTERN.is_match(w))
            .map(str::to_string)
            .collect()
    }

    /// Whether the text after a terminator begins a new sentence
    fn starts_sentence(&self, rest: &[(usize, char)]) -> bool {
        match rest.iter().map(|&(_, c)| c).find(|c| !c.is_whitespace()) {
            None => true,
            Some(c) => c.is_uppercase() || c.is_numeric() || OPENERS.contains(&c),
        }
    }

    /// Whether the period at byte `dot` closes an abbreviation or an initial
    fn is_abbreviation(&self, text: &str, sentence_start: usize, dot: usize) -> bool {
        let before = &text[sentence_start..dot];
        let token = before
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| OPENERS.contains(&c));

        if token.is_empty() {
            return false;
        }

        let mut letters = token.chars();
        let single_initial = matches!((letters.next(), letters.next()), (Some(c), None) if c.is_alphabetic());

        single_initial || self.abbreviations.contains(token.to_lowercase().as_str())
    }
}

fn push_trimmed(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_sentences() {
        let tokenizer = Tokenizer::english();
        let sentences =
            tokenizer.to_sentences("Cats are mammals. Cats sleep a lot! Do cats hunt? Yes.");
        assert_eq!(
            sentences,
            vec!["Cats are mammals.", "Cats sleep a lot!", "Do cats hunt?", "Yes."]
        );
    }

    #[test]
    fn test_abbreviations_and_initials_do_not_split() {
        let tokenizer = Tokenizer::english();
        let sentences = tokenizer
            .to_sentences("Dr. Watson met Mr. Holmes at 221B. J. R. R. Tolkien wrote books.");
        assert_eq!(
            sentences,
            vec![
                "Dr. Watson met Mr. Holmes at 221B.",
                "J. R. R. Tolkien wrote books."
            ]
        );
    }

    #[test]
    fn test_decimals_and_lowercase_continuations() {
        let tokenizer = Tokenizer::english();
        let sentences = tokenizer.to_sentences("It costs 3.50 dollars, e.g. today. it is cheap.");
        assert_eq!(sentences, vec!["It costs 3.50 dollars, e.g. today. it is cheap."]);
    }

    #[test]
    fn test_closing_quotes_stay_with_sentence() {
        let tokenizer = Tokenizer::english();
        let sentences = tokenizer.to_sentences("He said \"Stop.\" Then he left?! \"Why?\" she asked.");
        assert_eq!(
            sentences,
            vec!["He said \"Stop.\"", "Then he left?!", "\"Why?\" she asked."]
        );
    }

    #[test]
    fn test_trailing_text_without_terminator() {
        let tokenizer = Tokenizer::english();
        let sentences = tokenizer.to_sentences("  First one.   second part without end  ");
        assert_eq!(sentences, vec!["First one.   second part without end"]);

        let sentences = tokenizer.to_sentences("First one.  Second part without end");
        assert_eq!(sentences, vec!["First one.", "Second part without end"]);
        assert!(tokenizer.to_sentences("   ").is_empty());
    }

    #[test]
    fn test_words_keep_only_alphabetic_tokens() {
        let tokenizer = Tokenizer::english();
        let words = tokenizer.to_words("Cats don't pay $3.50 for 2 fish, do they?");
        assert_eq!(words, vec!["Cats", "don't", "pay", "for", "fish", "do", "they"]);
    }
}
