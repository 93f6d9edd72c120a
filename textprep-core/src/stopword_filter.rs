//! Stop-word filtering.

use std::collections::HashSet;

use crate::error::PreprocessError;
use crate::preprocessing::{RunContext, StringPreprocessing, TermPreprocessing};
use crate::term::Term;

/// A compact English stop-word list for hosts that do not supply one.
const BUILTIN_ENGLISH: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from",
    "had", "has", "have", "he", "her", "his", "i", "in", "is", "it", "its",
    "it's", "no", "not", "of", "on", "or", "she", "that", "the", "their",
    "them", "they", "this", "to", "was", "were", "which", "will", "with",
    "you",
];

/// Drops terms made up entirely of stop words.
///
/// Matching is case-insensitive unless constructed otherwise; a term is
/// dropped only when *every* word is a stop word, so multi-word terms like
/// "the Amazon" survive.
#[derive(Debug, Clone)]
pub struct StopWordFilter {
    stopwords: HashSet<String>,
    case_sensitive: bool,
}

impl StopWordFilter {
    /// Filter over the built-in English list.
    pub fn builtin_english() -> Self {
        Self::from_list(BUILTIN_ENGLISH.iter().copied())
    }

    /// A filter with no words, to be populated via [`add_words`].
    ///
    /// [`add_words`]: StopWordFilter::add_words
    pub fn empty() -> Self {
        Self {
            stopwords: HashSet::new(),
            case_sensitive: false,
        }
    }

    /// Filter over a custom word list.
    pub fn from_list<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
            case_sensitive: false,
        }
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.stopwords.insert(if self.case_sensitive {
                word.as_ref().to_string()
            } else {
                word.as_ref().to_lowercase()
            });
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        if self.case_sensitive {
            self.stopwords.contains(word)
        } else {
            self.stopwords.contains(&word.to_lowercase())
        }
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

impl TermPreprocessing for StopWordFilter {
    fn name(&self) -> &'static str {
        "stop_word_filter"
    }

    fn preprocess(
        &self,
        term: Term,
        _ctx: &RunContext,
    ) -> Result<Option<Term>, PreprocessError> {
        if !term.words().is_empty()
            && term.words().iter().all(|w| self.is_stopword(w.text()))
        {
            Ok(None)
        } else {
            Ok(Some(term))
        }
    }
}

impl StringPreprocessing for StopWordFilter {
    fn preprocess_str(&self, text: &str) -> Option<String> {
        if self.is_stopword(text) {
            None
        } else {
            Some(text.to_string())
        }
    }
}
