//! # textprep-core — Linguistic Annotation & Preprocessing Pipeline
//!
//! This crate annotates natural-language documents with structural and
//! linguistic tags (part-of-speech, named-entity, biomedical, custom tag
//! sets) and applies a pipeline of composable text transformations to
//! prepare the text for downstream analysis.
//!
//! ## Architecture
//!
//! Data flows through the system in a straight line:
//!
//! 1.  **Input**: raw text (String).
//! 2.  **Segmentation** ([`tokenizer`]): text is split into sentences and
//!     words; each word keeps the exact whitespace that followed it, so
//!     nothing is lost.
//! 3.  **Annotation** ([`term`], [`tag`]): terms are built by attaching
//!     zero or more tags to a word sequence. Tag vocabularies live in a
//!     read-only registry; unrecognized values resolve to `UNKNOWN`
//!     instead of failing.
//! 4.  **Preprocessing** ([`preprocessing`] and the step modules): each
//!     term flows through a configured chain of transformations — case
//!     conversion, number/punctuation stripping, regex filtering and
//!     replacement, stop-word and length filtering, lemmatization,
//!     tag-based filtering — each producing a new term or dropping it.
//! 5.  **Output** ([`pipeline`]): filtered and transformed terms are
//!     reassembled into a [`Document`], per row or over parallel batches.
//!
//! ## Example
//!
//! ```rust
//! use textprep_core::case_converter::{CaseConverter, CaseMode};
//! use textprep_core::pipeline::DocumentProcessor;
//! use textprep_core::preprocessing::{PreprocessingChain, RunContext};
//! use textprep_core::stopword_filter::StopWordFilter;
//! use textprep_core::term::{Document, Sentence, Term};
//! use textprep_core::tokenizer::{
//!     words_from_text, SentenceTokenizer, Tokenizer, WordTokenizer,
//! };
//!
//! // 1. Segment raw text into sentences and words.
//! let text = "The Amazon River carries more water than any other river.";
//! let sentence_tokenizer = SentenceTokenizer::new();
//! let word_tokenizer = WordTokenizer::new();
//!
//! let sentences: Vec<Sentence> = sentence_tokenizer
//!     .tokenize(text)
//!     .iter()
//!     .map(|sentence| {
//!         let terms = words_from_text(&word_tokenizer, sentence)
//!             .into_iter()
//!             .map(|word| Term::new(vec![word], Vec::new(), false))
//!             .collect();
//!         Sentence::new(terms)
//!     })
//!     .collect();
//! let document = Document::from_sentences(sentences);
//!
//! // 2. Run a preprocessing chain over the document.
//! let chain = PreprocessingChain::new()
//!     .add(CaseConverter::new(CaseMode::Lower))
//!     .add(StopWordFilter::builtin_english());
//! let processor = DocumentProcessor::new(chain);
//! let ctx = RunContext::new();
//!
//! let processed = processor.process_document(&document, &ctx).unwrap();
//! assert!(processed.term_count() < document.term_count());
//! ```
//!
//! ## Main modules
//!
//! - [`tag`]: tag sets, the `UNKNOWN` resolution rule and the registry.
//! - [`term`]: the Word/Term/Sentence/Document value objects.
//! - [`tokenizer`]: pluggable word/sentence/character tokenizers.
//! - [`preprocessing`]: the transformation capabilities and the chain.
//! - [`tag_filter`]: strict/lenient, keep/remove filtering by tag.
//! - [`config`]: declarative chain configuration, validated up front.
//! - [`pipeline`]: per-row and parallel batch execution.

pub mod case_converter;
pub mod config;
pub mod entity_filter;
pub mod error;
pub mod lemmatizer;
pub mod nchar_filter;
pub mod number_filter;
pub mod pipeline;
pub mod preprocessing;
pub mod punctuation_erasure;
pub mod regex_filter;
pub mod stopword_filter;
pub mod tag;
pub mod tag_filter;
pub mod term;
pub mod tokenizer;

pub use config::{ChainConfig, StepConfig};
pub use error::{ConfigError, PreprocessError, RowError, StepFailure};
pub use pipeline::DocumentProcessor;
pub use preprocessing::{
    PreprocessingChain, RunContext, StringPreprocessing, TermPreprocessing,
};
pub use tag::{Tag, TagBuilder, TagRegistry};
pub use term::{Document, DocumentMetadata, Sentence, Term, Word};
pub use tokenizer::{Tokenizer, TokenizerFactory, TokenizerRegistry};
