//! # Chain configuration
//!
//! A declarative, serializable description of a preprocessing chain.
//! `build` compiles every step up front — regex patterns, tag-set
//! validation — so a bad configuration is rejected as a whole before the
//! first row is processed.
//!
//! ```rust
//! use textprep_core::config::ChainConfig;
//! use textprep_core::tag::TagRegistry;
//!
//! let config = ChainConfig::from_json(
//!     r#"{
//!         "steps": [
//!             { "step": "case_converter", "mode": "lower" },
//!             { "step": "punctuation_erasure" },
//!             { "step": "tag_filter", "tag_type": "POS",
//!               "valid_tags": ["NN", "NNS"], "mode": "lenient",
//!               "keep_matching": true }
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let registry = TagRegistry::builtin();
//! let chain = config.build(&registry).unwrap();
//! assert_eq!(chain.len(), 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::case_converter::{CaseConverter, CaseMode};
use crate::entity_filter::EntityFilter;
use crate::error::ConfigError;
use crate::lemmatizer::{Lemmatizer, MissingTagPolicy};
use crate::nchar_filter::NCharFilter;
use crate::number_filter::{EmptyWordPolicy, NumberFilter};
use crate::preprocessing::PreprocessingChain;
use crate::punctuation_erasure::PunctuationErasure;
use crate::regex_filter::{RegexFilter, RegexReplacer};
use crate::stopword_filter::StopWordFilter;
use crate::tag::TagRegistry;
use crate::tag_filter::{MatchMode, TagFilter};

/// One step of a configured chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepConfig {
    CaseConverter {
        mode: CaseMode,
    },
    NumberFilter {
        #[serde(default)]
        empty_word_policy: EmptyWordPolicy,
    },
    RegexFilter {
        pattern: String,
    },
    RegexReplacer {
        pattern: String,
        replacement: String,
    },
    PunctuationErasure,
    StopWordFilter {
        #[serde(default)]
        words: Vec<String>,
        #[serde(default)]
        use_builtin_list: bool,
        #[serde(default)]
        case_sensitive: bool,
    },
    NCharFilter {
        min_chars: usize,
    },
    Lemmatizer {
        #[serde(default)]
        missing_tag_policy: MissingTagPolicy,
    },
    EntityFilter {
        keep_modifiable: bool,
    },
    TagFilter {
        tag_type: String,
        valid_tags: Vec<String>,
        mode: MatchMode,
        keep_matching: bool,
        #[serde(default)]
        empty_term_matches: bool,
    },
}

/// A whole chain: the ordered steps plus whether unmodifiable terms are
/// preprocessed too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(default)]
    pub process_unmodifiable: bool,
    pub steps: Vec<StepConfig>,
}

impl ChainConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Compiles the configuration into a runnable chain, validating every
    /// step against `registry`. Fails fast: nothing is compiled lazily.
    pub fn build(&self, registry: &TagRegistry) -> Result<PreprocessingChain, ConfigError> {
        let mut chain =
            PreprocessingChain::new().process_unmodifiable(self.process_unmodifiable);
        for step in &self.steps {
            chain = match step {
                StepConfig::CaseConverter { mode } => chain.add(CaseConverter::new(*mode)),
                StepConfig::NumberFilter { empty_word_policy } => {
                    chain.add(NumberFilter::new(*empty_word_policy))
                }
                StepConfig::RegexFilter { pattern } => chain.add(RegexFilter::new(pattern)?),
                StepConfig::RegexReplacer {
                    pattern,
                    replacement,
                } => chain.add(RegexReplacer::new(pattern, replacement.clone())?),
                StepConfig::PunctuationErasure => chain.add(PunctuationErasure::new()),
                StepConfig::StopWordFilter {
                    words,
                    use_builtin_list,
                    case_sensitive,
                } => {
                    let mut filter = if *use_builtin_list {
                        StopWordFilter::builtin_english()
                    } else {
                        StopWordFilter::empty()
                    };
                    filter = filter.with_case_sensitive(*case_sensitive);
                    filter.add_words(words);
                    chain.add(filter)
                }
                StepConfig::NCharFilter { min_chars } => chain.add(NCharFilter::new(*min_chars)),
                StepConfig::Lemmatizer { missing_tag_policy } => {
                    chain.add(Lemmatizer::new(*missing_tag_policy))
                }
                StepConfig::EntityFilter { keep_modifiable } => {
                    chain.add(EntityFilter::new(*keep_modifiable))
                }
                StepConfig::TagFilter {
                    tag_type,
                    valid_tags,
                    mode,
                    keep_matching,
                    empty_term_matches,
                } => chain.add(TagFilter::new(
                    registry,
                    tag_type.clone(),
                    valid_tags.iter().cloned(),
                    *mode,
                    *keep_matching,
                    *empty_term_matches,
                )?),
            };
        }
        Ok(chain)
    }
}
