//! Strips leading numbers from words.

use serde::{Deserialize, Serialize};

use crate::error::PreprocessError;
use crate::preprocessing::{RunContext, StringPreprocessing, TermPreprocessing};
use crate::term::Term;

/// What to do with a term once number stripping leaves a word empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyWordPolicy {
    /// Drop the whole term (the historical behavior).
    #[default]
    DropTerm,
    /// Keep the term with the emptied word removed.
    KeepTerm,
}

/// Strips an optional sign followed by a run of digits, dots and commas
/// from the front of every word. `"-12.5"` becomes `""`, `"abc"` stays
/// `"abc"`, `"3rd"` becomes `"rd"`.
#[derive(Debug, Clone, Copy)]
pub struct NumberFilter {
    policy: EmptyWordPolicy,
}

impl NumberFilter {
    pub fn new(policy: EmptyWordPolicy) -> Self {
        Self { policy }
    }
}

impl Default for NumberFilter {
    fn default() -> Self {
        Self::new(EmptyWordPolicy::default())
    }
}

/// Removes the longest `[-+]?[0-9.,]+` prefix; anything else is returned
/// unchanged.
fn strip_leading_number(text: &str) -> &str {
    let body_start = match text.chars().next() {
        Some('+') | Some('-') => 1,
        _ => 0,
    };
    let mut end = body_start;
    for (i, c) in text[body_start..].char_indices() {
        if c.is_ascii_digit() || c == '.' || c == ',' {
            end = body_start + i + c.len_utf8();
        } else {
            break;
        }
    }
    if end > body_start {
        &text[end..]
    } else {
        text
    }
}

impl TermPreprocessing for NumberFilter {
    fn name(&self) -> &'static str {
        "number_filter"
    }

    fn preprocess(
        &self,
        term: Term,
        _ctx: &RunContext,
    ) -> Result<Option<Term>, PreprocessError> {
        let mut words = Vec::with_capacity(term.words().len());
        for word in term.words() {
            let stripped = strip_leading_number(word.text());
            if stripped.is_empty() {
                match self.policy {
                    EmptyWordPolicy::DropTerm => return Ok(None),
                    EmptyWordPolicy::KeepTerm => continue,
                }
            }
            words.push(word.with_text(stripped));
        }
        if words.is_empty() {
            return Ok(None);
        }
        Ok(Some(term.with_words(words)))
    }
}

impl StringPreprocessing for NumberFilter {
    fn preprocess_str(&self, text: &str) -> Option<String> {
        let stripped = strip_leading_number(text);
        if stripped.is_empty() {
            None
        } else {
            Some(stripped.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Term, Word};

    #[test]
    fn test_strip_pure_number() {
        assert_eq!(strip_leading_number("-12.5"), "");
        assert_eq!(strip_leading_number("+1,000"), "");
        assert_eq!(strip_leading_number("42"), "");
    }

    #[test]
    fn test_strip_leaves_words_alone() {
        assert_eq!(strip_leading_number("abc"), "abc");
        assert_eq!(strip_leading_number("-abc"), "-abc");
    }

    #[test]
    fn test_strip_mixed_prefix() {
        assert_eq!(strip_leading_number("3rd"), "rd");
        assert_eq!(strip_leading_number("12,5kg"), "kg");
    }

    #[test]
    fn test_drop_term_policy() {
        let ctx = RunContext::new();
        let filter = NumberFilter::new(EmptyWordPolicy::DropTerm);
        let out = filter.preprocess(Term::from_word("-12.5"), &ctx).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_keep_term_policy_removes_emptied_word() {
        let ctx = RunContext::new();
        let filter = NumberFilter::new(EmptyWordPolicy::KeepTerm);
        let term = Term::new(
            vec![Word::with_suffix("12", " "), Word::new("rivers")],
            Vec::new(),
            false,
        );
        let out = filter.preprocess(term, &ctx).unwrap().unwrap();
        assert_eq!(out.text(), "rivers");
    }

    #[test]
    fn test_non_numeric_term_unchanged() {
        let ctx = RunContext::new();
        let out = NumberFilter::default()
            .preprocess(Term::from_word("abc"), &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(out.text(), "abc");
    }
}
