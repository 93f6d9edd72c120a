//! Splits terms by modifiability.

use crate::error::PreprocessError;
use crate::preprocessing::{RunContext, TermPreprocessing};
use crate::term::Term;

/// Keeps either the modifiable or the unmodifiable (already-recognized
/// entity) side of a term sequence, dropping the other.
///
/// This filter exists to act on the `unmodifiable` flag, so it runs on
/// unmodifiable terms even when the chain is configured to skip them.
#[derive(Debug, Clone, Copy)]
pub struct EntityFilter {
    keep_modifiable: bool,
}

impl EntityFilter {
    /// `keep_modifiable = true` keeps ordinary terms and drops recognized
    /// entities; `false` keeps only the entities.
    pub fn new(keep_modifiable: bool) -> Self {
        Self { keep_modifiable }
    }
}

impl TermPreprocessing for EntityFilter {
    fn name(&self) -> &'static str {
        "entity_filter"
    }

    fn preprocess(
        &self,
        term: Term,
        _ctx: &RunContext,
    ) -> Result<Option<Term>, PreprocessError> {
        if term.is_unmodifiable() == self.keep_modifiable {
            Ok(None)
        } else {
            Ok(Some(term))
        }
    }

    fn applies_to_unmodifiable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Term, Word};

    fn entity() -> Term {
        Term::new(vec![Word::new("Amazon")], Vec::new(), true)
    }

    fn plain() -> Term {
        Term::from_word("river")
    }

    #[test]
    fn test_keep_modifiable() {
        let ctx = RunContext::new();
        let filter = EntityFilter::new(true);
        assert!(filter.preprocess(plain(), &ctx).unwrap().is_some());
        assert!(filter.preprocess(entity(), &ctx).unwrap().is_none());
    }

    #[test]
    fn test_keep_unmodifiable() {
        let ctx = RunContext::new();
        let filter = EntityFilter::new(false);
        assert!(filter.preprocess(plain(), &ctx).unwrap().is_none());
        assert!(filter.preprocess(entity(), &ctx).unwrap().is_some());
    }
}
