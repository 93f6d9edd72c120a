//! # Error taxonomy
//!
//! Two failure classes with different lifetimes:
//!
//! - [`ConfigError`] — rejected before processing begins (invalid tag set
//!   against a vocabulary, invalid regex pattern, malformed chain
//!   configuration). Never discovered mid-run.
//! - [`PreprocessError`] / [`StepFailure`] / [`RowError`] — fatal per-row
//!   conditions, surfaced as typed failures identifying the offending row
//!   and the failing transformation step. Whether a failed row aborts the
//!   whole run or is skipped is the host's call.
//!
//! Recoverable conditions (a term lacking an expected tag under the skip
//! policy) are not errors: they go to the run context's warning sink.
//! Unrecognized tag values are not errors either: they resolve to the
//! `UNKNOWN` tag.

use thiserror::Error;

/// A configuration rejected at build time, before any row is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown tag type `{0}`")]
    UnknownTagType(String),

    #[error("`{value}` is not a member of the {tag_type} tag vocabulary")]
    InvalidTagValue { tag_type: String, value: String },

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A fatal condition raised by a single transformation on a single term.
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("term `{term}` carries no usable part-of-speech tag")]
    MissingPosTag { term: String },
}

/// A [`PreprocessError`] attributed to the step that raised it.
#[derive(Debug, Error)]
#[error("step `{step}` failed: {source}")]
pub struct StepFailure {
    pub step: String,
    #[source]
    pub source: PreprocessError,
}

/// A [`StepFailure`] attributed to the row it occurred in. Other rows may
/// still complete; the host decides whether to abort or skip.
#[derive(Debug, Error)]
#[error("row {row}: {source}")]
pub struct RowError {
    pub row: usize,
    #[source]
    pub source: StepFailure,
}
