//! Case conversion over terms and raw strings.

use serde::{Deserialize, Serialize};

use crate::error::PreprocessError;
use crate::preprocessing::{RunContext, StringPreprocessing, TermPreprocessing};
use crate::term::Term;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    Upper,
    Lower,
}

/// Maps every word's text to upper or lower case; whitespace suffixes are
/// untouched, so the transformation is non-destructive with respect to the
/// source layout.
#[derive(Debug, Clone, Copy)]
pub struct CaseConverter {
    mode: CaseMode,
}

impl CaseConverter {
    pub fn new(mode: CaseMode) -> Self {
        Self { mode }
    }

    fn convert(&self, text: &str) -> String {
        match self.mode {
            CaseMode::Upper => text.to_uppercase(),
            CaseMode::Lower => text.to_lowercase(),
        }
    }
}

impl TermPreprocessing for CaseConverter {
    fn name(&self) -> &'static str {
        "case_converter"
    }

    fn preprocess(
        &self,
        term: Term,
        _ctx: &RunContext,
    ) -> Result<Option<Term>, PreprocessError> {
        let words = term
            .words()
            .iter()
            .map(|w| w.with_text(self.convert(w.text())))
            .collect();
        Ok(Some(term.with_words(words)))
    }
}

impl StringPreprocessing for CaseConverter {
    fn preprocess_str(&self, text: &str) -> Option<String> {
        Some(self.convert(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Term, Word};

    #[test]
    fn test_lower_case_keeps_suffixes() {
        let term = Term::new(
            vec![
                Word::with_suffix("New", " "),
                Word::with_suffix("York", "  "),
            ],
            Vec::new(),
            false,
        );
        let ctx = RunContext::new();
        let out = CaseConverter::new(CaseMode::Lower)
            .preprocess(term, &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(out.raw_text(), "new york  ");
    }

    #[test]
    fn test_upper_case_string() {
        let out = CaseConverter::new(CaseMode::Upper).preprocess_str("river");
        assert_eq!(out.as_deref(), Some("RIVER"));
    }
}
