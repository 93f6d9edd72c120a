//! # Words, Terms and Documents
//!
//! The annotated-text data model. A [`Word`] is an atomic token together
//! with the exact whitespace that followed it in the source text, so a
//! sequence of words reconstructs its source slice without losing a single
//! character. A [`Term`] groups one or more words with zero or more tags;
//! a [`Document`] is an ordered sequence of [`Sentence`]s of terms.
//!
//! Everything here is an immutable value object: preprocessing never
//! mutates a term in place, it produces a new term (or drops it) from an
//! existing one.

use serde::{Deserialize, Serialize};

use crate::tag::Tag;

/// An atomic token plus the whitespace that followed it in the source.
///
/// Keeping the suffix on the word (rather than discarding it at
/// tokenization time) is what makes non-destructive transformations such
/// as case conversion fully reversible: `text + whitespace_suffix`
/// concatenated across a sentence reproduces the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    text: String,
    whitespace_suffix: String,
}

impl Word {
    /// A word with no trailing whitespace.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            whitespace_suffix: String::new(),
        }
    }

    /// A word with the exact whitespace that followed it in the source.
    pub fn with_suffix(text: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            whitespace_suffix: suffix.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn whitespace_suffix(&self) -> &str {
        &self.whitespace_suffix
    }

    /// A copy of this word with `text` replaced and the suffix kept.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            whitespace_suffix: self.whitespace_suffix.clone(),
        }
    }
}

/// An annotated span: one or more words plus zero or more tags.
///
/// A term with zero tags is legal. The `unmodifiable` flag marks terms
/// (typically recognized named entities) that altering transformations
/// must leave untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    words: Vec<Word>,
    tags: Vec<Tag>,
    unmodifiable: bool,
}

impl Term {
    pub fn new(words: Vec<Word>, tags: Vec<Tag>, unmodifiable: bool) -> Self {
        Self {
            words,
            tags,
            unmodifiable,
        }
    }

    /// A single-word term with no tags, the common case in tests and in
    /// pipelines that run before any tagger.
    pub fn from_word(text: impl Into<String>) -> Self {
        Self::new(vec![Word::new(text)], Vec::new(), false)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn is_unmodifiable(&self) -> bool {
        self.unmodifiable
    }

    /// The term's surface text: word texts joined by their whitespace
    /// suffixes, without the suffix of the final word.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, word) in self.words.iter().enumerate() {
            out.push_str(word.text());
            if i + 1 < self.words.len() {
                out.push_str(word.whitespace_suffix());
            }
        }
        out
    }

    /// The exact source slice this term covers, trailing whitespace
    /// included.
    pub fn raw_text(&self) -> String {
        let mut out = String::new();
        for word in &self.words {
            out.push_str(word.text());
            out.push_str(word.whitespace_suffix());
        }
        out
    }

    /// A copy of this term with `words` replaced and tags plus the
    /// `unmodifiable` flag carried over.
    pub fn with_words(&self, words: Vec<Word>) -> Self {
        Self {
            words,
            tags: self.tags.clone(),
            unmodifiable: self.unmodifiable,
        }
    }

    /// All tags of the given type, in annotation order.
    pub fn tags_of_type<'a>(&'a self, tag_type: &'a str) -> impl Iterator<Item = &'a Tag> {
        self.tags.iter().filter(move |t| t.tag_type() == tag_type)
    }

    /// The first tag of the given type, if any.
    pub fn first_tag_of_type(&self, tag_type: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.tag_type() == tag_type)
    }
}

/// An ordered sequence of terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    terms: Vec<Term>,
}

impl Sentence {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The exact source slice this sentence covers.
    pub fn raw_text(&self) -> String {
        self.terms.iter().map(Term::raw_text).collect()
    }

    /// The sentence's surface text, trailing whitespace trimmed.
    pub fn text(&self) -> String {
        let raw = self.raw_text();
        raw.trim_end().to_string()
    }
}

/// Document-level metadata carried alongside the sentence sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub source: String,
}

/// An ordered sequence of sentences plus document-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    metadata: DocumentMetadata,
    sentences: Vec<Sentence>,
}

impl Document {
    pub fn new(metadata: DocumentMetadata, sentences: Vec<Sentence>) -> Self {
        Self {
            metadata,
            sentences,
        }
    }

    /// A document with empty metadata, convenient in tests.
    pub fn from_sentences(sentences: Vec<Sentence>) -> Self {
        Self::new(DocumentMetadata::default(), sentences)
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Total number of terms across all sentences.
    pub fn term_count(&self) -> usize {
        self.sentences.iter().map(|s| s.terms().len()).sum()
    }

    /// The exact source text of the whole document.
    pub fn raw_text(&self) -> String {
        self.sentences.iter().map(Sentence::raw_text).collect()
    }
}
