//! Regex-driven term filtering and replacement.
//!
//! Both transformations compile their pattern once at construction;
//! pattern errors are configuration errors and never surface mid-run.

use regex::Regex;

use crate::error::{ConfigError, PreprocessError};
use crate::preprocessing::{RunContext, StringPreprocessing, TermPreprocessing};
use crate::term::Term;

/// Drops a term (or raw string) if the pattern matches anywhere within its
/// text. A partial match is enough; this is match, not full-match.
#[derive(Debug, Clone)]
pub struct RegexFilter {
    pattern: Regex,
}

impl RegexFilter {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl TermPreprocessing for RegexFilter {
    fn name(&self) -> &'static str {
        "regex_filter"
    }

    fn preprocess(
        &self,
        term: Term,
        _ctx: &RunContext,
    ) -> Result<Option<Term>, PreprocessError> {
        if self.pattern.is_match(&term.text()) {
            Ok(None)
        } else {
            Ok(Some(term))
        }
    }
}

impl StringPreprocessing for RegexFilter {
    fn preprocess_str(&self, text: &str) -> Option<String> {
        if self.pattern.is_match(text) {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Replaces every match of the pattern inside each word's text with a
/// configured replacement. Never drops the term.
#[derive(Debug, Clone)]
pub struct RegexReplacer {
    pattern: Regex,
    replacement: String,
}

impl RegexReplacer {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }
}

impl TermPreprocessing for RegexReplacer {
    fn name(&self) -> &'static str {
        "regex_replacer"
    }

    fn preprocess(
        &self,
        term: Term,
        _ctx: &RunContext,
    ) -> Result<Option<Term>, PreprocessError> {
        let words = term
            .words()
            .iter()
            .map(|w| {
                w.with_text(
                    self.pattern
                        .replace_all(w.text(), self.replacement.as_str())
                        .into_owned(),
                )
            })
            .collect();
        Ok(Some(term.with_words(words)))
    }
}

impl StringPreprocessing for RegexReplacer {
    fn preprocess_str(&self, text: &str) -> Option<String> {
        Some(
            self.pattern
                .replace_all(text, self.replacement.as_str())
                .into_owned(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    #[test]
    fn test_invalid_pattern_is_config_error() {
        assert!(matches!(
            RegexFilter::new("["),
            Err(ConfigError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_filter_drops_on_partial_match() {
        let ctx = RunContext::new();
        let filter = RegexFilter::new(r"\d").unwrap();
        assert!(filter
            .preprocess(Term::from_word("covid19"), &ctx)
            .unwrap()
            .is_none());
        assert!(filter
            .preprocess(Term::from_word("covid"), &ctx)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_replacer_never_drops() {
        let ctx = RunContext::new();
        let replacer = RegexReplacer::new(r"\d+", "#").unwrap();
        let out = replacer
            .preprocess(Term::from_word("area51"), &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(out.text(), "area#");
    }

    #[test]
    fn test_filter_and_empty_replacement_converge() {
        // For a matching term, the filter drops it while replacing all
        // matches with "" leaves exactly the text with matches removed.
        let pattern = r"\d+";
        let ctx = RunContext::new();

        let filter = RegexFilter::new(pattern).unwrap();
        assert!(filter
            .preprocess(Term::from_word("a1b2"), &ctx)
            .unwrap()
            .is_none());

        let replacer = RegexReplacer::new(pattern, "").unwrap();
        let out = replacer
            .preprocess(Term::from_word("a1b2"), &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(out.text(), "ab");
    }

    #[test]
    fn test_string_variants() {
        let filter = RegexFilter::new("^foo$").unwrap();
        assert!(filter.preprocess_str("foo").is_none());
        assert_eq!(filter.preprocess_str("food").as_deref(), Some("food"));

        let replacer = RegexReplacer::new("o", "0").unwrap();
        assert_eq!(replacer.preprocess_str("foo").as_deref(), Some("f00"));
    }
}
