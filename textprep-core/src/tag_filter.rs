//! # Tag-based term filtering
//!
//! Keeps or removes terms according to their tags of one type. The
//! configured set of valid tag values is validated against the type's
//! full vocabulary when the filter is built, so a typo is rejected up
//! front instead of surfacing on some row in the middle of a run.
//!
//! ## Matching
//!
//! Per term, only the tags of the configured type are considered.
//!
//! - **Strict**: the term matches iff *every* such tag is in the valid
//!   set.
//! - **Lenient**: the term matches iff *at least one* such tag is in the
//!   valid set.
//!
//! A term with zero tags of the type matches only if
//! `empty_term_matches` is set; observed practice does not pin this down,
//! so it is an explicit configuration choice.
//!
//! `keep_matching` selects the polarity: matching terms are kept and the
//! rest dropped, or the other way around.
//!
//! The filter holds no per-term state, so terms can be evaluated
//! independently and in parallel.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PreprocessError};
use crate::preprocessing::{RunContext, TermPreprocessing};
use crate::tag::TagRegistry;
use crate::term::Term;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    Strict,
    Lenient,
}

/// Keep/remove filter over one tag type. Build with [`TagFilter::new`],
/// which fails fast on an unknown tag type or a value outside the type's
/// vocabulary.
#[derive(Debug, Clone)]
pub struct TagFilter {
    tag_type: String,
    valid: HashSet<String>,
    mode: MatchMode,
    keep_matching: bool,
    empty_term_matches: bool,
}

impl TagFilter {
    pub fn new<I, S>(
        registry: &TagRegistry,
        tag_type: impl Into<String>,
        valid_values: I,
        mode: MatchMode,
        keep_matching: bool,
        empty_term_matches: bool,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tag_type = tag_type.into();
        let builder = registry
            .get(&tag_type)
            .ok_or_else(|| ConfigError::UnknownTagType(tag_type.clone()))?;

        let mut valid = HashSet::new();
        for value in valid_values {
            let value = value.into();
            if !builder.contains(&value) {
                return Err(ConfigError::InvalidTagValue {
                    tag_type: tag_type.clone(),
                    value,
                });
            }
            valid.insert(value);
        }

        Ok(Self {
            tag_type,
            valid,
            mode,
            keep_matching,
            empty_term_matches,
        })
    }

    /// Whether `term` matches the configured rule, before polarity is
    /// applied.
    pub fn matches(&self, term: &Term) -> bool {
        let mut seen_any = false;
        let mut all_valid = true;
        let mut any_valid = false;
        for tag in term.tags_of_type(&self.tag_type) {
            seen_any = true;
            if self.valid.contains(tag.value()) {
                any_valid = true;
            } else {
                all_valid = false;
            }
        }
        if !seen_any {
            return self.empty_term_matches;
        }
        match self.mode {
            MatchMode::Strict => all_valid,
            MatchMode::Lenient => any_valid,
        }
    }
}

impl TermPreprocessing for TagFilter {
    fn name(&self) -> &'static str {
        "tag_filter"
    }

    fn preprocess(
        &self,
        term: Term,
        _ctx: &RunContext,
    ) -> Result<Option<Term>, PreprocessError> {
        if self.matches(&term) == self.keep_matching {
            Ok(Some(term))
        } else {
            Ok(None)
        }
    }
}
