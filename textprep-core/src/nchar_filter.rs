//! Minimum-length term filtering.

use crate::error::PreprocessError;
use crate::preprocessing::{RunContext, StringPreprocessing, TermPreprocessing};
use crate::term::Term;

/// Drops terms whose surface text is shorter than a configured number of
/// characters. Length is counted in characters, not bytes.
#[derive(Debug, Clone, Copy)]
pub struct NCharFilter {
    min_chars: usize,
}

impl NCharFilter {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

impl TermPreprocessing for NCharFilter {
    fn name(&self) -> &'static str {
        "n_char_filter"
    }

    fn preprocess(
        &self,
        term: Term,
        _ctx: &RunContext,
    ) -> Result<Option<Term>, PreprocessError> {
        if term.text().chars().count() < self.min_chars {
            Ok(None)
        } else {
            Ok(Some(term))
        }
    }
}

impl StringPreprocessing for NCharFilter {
    fn preprocess_str(&self, text: &str) -> Option<String> {
        if text.chars().count() < self.min_chars {
            None
        } else {
            Some(text.to_string())
        }
    }
}
