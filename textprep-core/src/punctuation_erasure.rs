//! Removes pure-punctuation tokens.

use crate::error::PreprocessError;
use crate::preprocessing::{RunContext, StringPreprocessing, TermPreprocessing};
use crate::term::Term;

/// Punctuation outside the ASCII range that still counts as punctuation.
const EXTRA_PUNCTUATION: &[char] = &[
    '«', '»', '„', '“', '”', '‘', '’', '‚', '–', '—', '…', '¿', '¡', '·',
];

fn is_punctuation_char(c: char) -> bool {
    c.is_ascii_punctuation() || EXTRA_PUNCTUATION.contains(&c)
}

/// Whether a token consists of punctuation characters only.
pub fn is_punctuation(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_punctuation_char)
}

/// Removes words recognized as pure punctuation from a term; words that
/// merely contain punctuation are not altered. A term left with no words
/// is dropped. Applying the erasure twice yields the same result as
/// applying it once.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationErasure;

impl PunctuationErasure {
    pub fn new() -> Self {
        Self
    }
}

impl TermPreprocessing for PunctuationErasure {
    fn name(&self) -> &'static str {
        "punctuation_erasure"
    }

    fn preprocess(
        &self,
        term: Term,
        _ctx: &RunContext,
    ) -> Result<Option<Term>, PreprocessError> {
        if term.words().iter().all(|w| !is_punctuation(w.text())) {
            return Ok(Some(term));
        }
        let words: Vec<_> = term
            .words()
            .iter()
            .filter(|w| !is_punctuation(w.text()))
            .cloned()
            .collect();
        if words.is_empty() {
            return Ok(None);
        }
        Ok(Some(term.with_words(words)))
    }
}

impl StringPreprocessing for PunctuationErasure {
    fn preprocess_str(&self, text: &str) -> Option<String> {
        if is_punctuation(text) {
            None
        } else {
            Some(text.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Term, Word};

    #[test]
    fn test_pure_punctuation_detection() {
        assert!(is_punctuation("."));
        assert!(is_punctuation("!?"));
        assert!(is_punctuation("—"));
        assert!(!is_punctuation("co-op"));
        assert!(!is_punctuation(""));
    }

    #[test]
    fn test_erases_punctuation_words_only() {
        let ctx = RunContext::new();
        let term = Term::new(
            vec![
                Word::with_suffix("well", ""),
                Word::with_suffix("-", ""),
                Word::with_suffix("known", " "),
            ],
            Vec::new(),
            false,
        );
        let out = PunctuationErasure::new()
            .preprocess(term, &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(out.words().len(), 2);
        assert_eq!(out.text(), "wellknown");
    }

    #[test]
    fn test_drops_all_punctuation_term() {
        let ctx = RunContext::new();
        let out = PunctuationErasure::new()
            .preprocess(Term::from_word("..."), &ctx)
            .unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_idempotent() {
        let ctx = RunContext::new();
        let erasure = PunctuationErasure::new();
        let term = Term::new(
            vec![Word::with_suffix("a", " "), Word::new(";")],
            Vec::new(),
            false,
        );
        let once = erasure.preprocess(term, &ctx).unwrap().unwrap();
        let twice = erasure.preprocess(once.clone(), &ctx).unwrap().unwrap();
        assert_eq!(once, twice);
    }
}
