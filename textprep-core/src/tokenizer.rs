//! # Tokenizers
//!
//! Splits raw text into ordered substrings, at word or sentence
//! granularity. Every tokenizer is a [`Tokenizer`] capability; discovery
//! and registration go through [`TokenizerFactory`] instances held by a
//! [`TokenizerRegistry`] that is resolved once at startup.
//!
//! ## Implementations
//!
//! - **Word**: Unicode word boundaries with abbreviation-aware handling of
//!   the trailing period ("Dr." stays one token).
//! - **Sentence**: splits on sentence-final punctuation, guarded by an
//!   abbreviation list so "Dr. Smith" does not end a sentence. Can be
//!   backed by a segmentation model loaded from disk.
//! - **Character**: every non-whitespace character is a token.
//!
//! ## Missing models
//!
//! A model-backed tokenizer whose model file cannot be loaded is
//! constructed into an *unusable* state instead of failing: `tokenize`
//! then returns an empty sequence. A missing optional language model must
//! never crash the surrounding pipeline.
//!
//! ## Example
//!
//! ```rust
//! use textprep_core::tokenizer::{Tokenizer, WordTokenizer};
//!
//! let tokenizer = WordTokenizer::new();
//! let tokens = tokenizer.tokenize("Dr. Smith arrived.");
//! assert_eq!(tokens, ["Dr.", "Smith", "arrived", "."]);
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::term::Word;

/// Abbreviations whose trailing period does not end a token or a sentence.
const ABBREVIATIONS: &[&str] = &[
    "Dr", "Mr", "Mrs", "Ms", "Prof", "Sr", "Jr", "St", "Gen", "Rep", "Sen",
    "Gov", "Capt", "Col", "Sgt", "Fig", "Eq", "No", "vol", "pp", "ca", "cf",
    "al", "etc", "vs", "Inc", "Ltd", "Co", "Corp",
];

/// Sentence-final punctuation of the built-in segmentation model.
const SENTENCE_TERMINATORS: &str = ".!?";

/// The tokenization capability: text in, ordered substrings out.
///
/// Instances are reusable across calls and safe to call from multiple
/// threads: the backing model is read-only after construction and
/// `tokenize` holds no mutable scratch state between calls.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Describes and constructs one tokenizer, for discovery by name.
pub trait TokenizerFactory: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn description_link(&self) -> &str {
        ""
    }
    fn tokenizer(&self) -> Arc<dyn Tokenizer>;
}

/// Maps a tokenizer name to its factory, resolved once at startup.
pub struct TokenizerRegistry {
    factories: HashMap<String, Arc<dyn TokenizerFactory>>,
}

impl TokenizerRegistry {
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry holding the built-in word, sentence and character
    /// tokenizers.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(WordTokenizerFactory::new()));
        registry.register(Arc::new(SentenceTokenizerFactory::new()));
        registry.register(Arc::new(CharTokenizerFactory::new()));
        registry
    }

    pub fn register(&mut self, factory: Arc<dyn TokenizerFactory>) {
        debug!(name = factory.name(), "registering tokenizer factory");
        self.factories.insert(factory.name().to_string(), factory);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn TokenizerFactory>> {
        self.factories.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn into_shared(self) -> Arc<TokenizerRegistry> {
        Arc::new(self)
    }
}

impl Default for TokenizerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Word-level tokenizer over Unicode word boundaries.
///
/// Whitespace runs are discarded (they are re-attached as word suffixes by
/// [`words_from_text`]); a period directly following a known abbreviation
/// is folded back into the token.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    abbreviations: Vec<String>,
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        let mut gap_before = true;
        for piece in text.split_word_bounds() {
            if piece.chars().all(char::is_whitespace) {
                gap_before = true;
                continue;
            }
            if piece == "." && !gap_before {
                let after_abbreviation = tokens
                    .last()
                    .map(|last| self.abbreviations.iter().any(|a| a == last))
                    .unwrap_or(false);
                if after_abbreviation {
                    if let Some(last) = tokens.last_mut() {
                        last.push('.');
                    }
                    gap_before = false;
                    continue;
                }
            }
            tokens.push(piece.to_string());
            gap_before = false;
        }
        tokens
    }
}

/// Character-level tokenizer: every non-whitespace character is a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharTokenizer;

impl CharTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for CharTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_string())
            .collect()
    }
}

/// On-disk segmentation model backing the sentence tokenizer.
///
/// ```json
/// { "abbreviations": ["Dr", "Prof"], "terminators": ".!?" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationModel {
    pub abbreviations: Vec<String>,
    #[serde(default = "SegmentationModel::default_terminators")]
    pub terminators: String,
}

impl SegmentationModel {
    fn default_terminators() -> String {
        SENTENCE_TERMINATORS.to_string()
    }

    /// The built-in English model.
    pub fn builtin() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
            terminators: SENTENCE_TERMINATORS.to_string(),
        }
    }
}

/// Sentence-level tokenizer driven by a [`SegmentationModel`].
///
/// A period after a known abbreviation, or a terminator followed by a
/// non-whitespace character (as in "3.14"), does not end a sentence.
///
/// When constructed from a model path that cannot be read or parsed, the
/// tokenizer is *unusable*: `tokenize` returns an empty sequence and
/// [`is_usable`](SentenceTokenizer::is_usable) reports `false`.
#[derive(Debug, Clone)]
pub struct SentenceTokenizer {
    model: Option<SegmentationModel>,
}

impl SentenceTokenizer {
    /// Sentence tokenizer over the built-in model.
    pub fn new() -> Self {
        Self {
            model: Some(SegmentationModel::builtin()),
        }
    }

    /// Loads the segmentation model from `path`. A missing or malformed
    /// model yields an unusable tokenizer, never a construction failure.
    pub fn from_model_path(path: &Path) -> Self {
        let model = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| {
                serde_json::from_str::<SegmentationModel>(&raw).map_err(|e| e.to_string())
            });
        match model {
            Ok(model) => Self { model: Some(model) },
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "segmentation model could not be loaded; tokenizer is unusable"
                );
                Self { model: None }
            }
        }
    }

    pub fn is_usable(&self) -> bool {
        self.model.is_some()
    }
}

impl Default for SentenceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for SentenceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let model = match &self.model {
            Some(model) => model,
            None => return Vec::new(),
        };

        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0usize;
        let mut i = 0usize;

        while i < chars.len() {
            let (pos, ch) = chars[i];
            if !model.terminators.contains(ch) {
                i += 1;
                continue;
            }

            // Consume a run of terminators ("..." or "?!") as one ending.
            let mut j = i;
            while j + 1 < chars.len() && model.terminators.contains(chars[j + 1].1) {
                j += 1;
            }
            let end = chars[j].0 + chars[j].1.len_utf8();

            let next_is_break = chars
                .get(j + 1)
                .map(|(_, c)| c.is_whitespace())
                .unwrap_or(true);
            let after_abbreviation =
                ch == '.' && j == i && is_abbreviation(&text[start..pos], &model.abbreviations);

            if next_is_break && !after_abbreviation {
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                let mut k = j + 1;
                while k < chars.len() && chars[k].1.is_whitespace() {
                    k += 1;
                }
                start = chars.get(k).map(|(p, _)| *p).unwrap_or(text.len());
                i = k;
            } else {
                i = j + 1;
            }
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
        sentences
    }
}

/// Whether the word immediately preceding a period is a known abbreviation.
fn is_abbreviation(preceding: &str, abbreviations: &[String]) -> bool {
    let last = preceding
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphanumeric());
    !last.is_empty() && abbreviations.iter().any(|a| a == last)
}

/// Factory for [`WordTokenizer`].
pub struct WordTokenizerFactory {
    tokenizer: Arc<WordTokenizer>,
}

impl WordTokenizerFactory {
    pub fn new() -> Self {
        Self {
            tokenizer: Arc::new(WordTokenizer::new()),
        }
    }
}

impl Default for WordTokenizerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenizerFactory for WordTokenizerFactory {
    fn name(&self) -> &str {
        "word"
    }

    fn description(&self) -> &str {
        "Unicode word-boundary tokenizer with abbreviation handling"
    }

    fn description_link(&self) -> &str {
        "https://unicode.org/reports/tr29/"
    }

    fn tokenizer(&self) -> Arc<dyn Tokenizer> {
        self.tokenizer.clone()
    }
}

/// Factory for [`SentenceTokenizer`], optionally backed by an on-disk
/// segmentation model. The model is loaded at factory construction so
/// processing never blocks on I/O.
pub struct SentenceTokenizerFactory {
    tokenizer: Arc<SentenceTokenizer>,
}

impl SentenceTokenizerFactory {
    pub fn new() -> Self {
        Self {
            tokenizer: Arc::new(SentenceTokenizer::new()),
        }
    }

    pub fn from_model_path(path: &Path) -> Self {
        Self {
            tokenizer: Arc::new(SentenceTokenizer::from_model_path(path)),
        }
    }
}

impl Default for SentenceTokenizerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenizerFactory for SentenceTokenizerFactory {
    fn name(&self) -> &str {
        "sentence"
    }

    fn description(&self) -> &str {
        "Sentence splitter guarded by an abbreviation model"
    }

    fn tokenizer(&self) -> Arc<dyn Tokenizer> {
        self.tokenizer.clone()
    }
}

/// Factory for [`CharTokenizer`].
pub struct CharTokenizerFactory;

impl CharTokenizerFactory {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CharTokenizerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenizerFactory for CharTokenizerFactory {
    fn name(&self) -> &str {
        "character"
    }

    fn description(&self) -> &str {
        "Character-level tokenizer"
    }

    fn tokenizer(&self) -> Arc<dyn Tokenizer> {
        Arc::new(CharTokenizer)
    }
}

/// Pairs each token with the exact whitespace that follows it in `text`,
/// producing [`Word`]s that reconstruct the source losslessly.
///
/// Tokens must be verbatim substrings of `text` in order (every built-in
/// tokenizer guarantees this); a token that cannot be located degrades to
/// an empty suffix.
pub fn attach_whitespace(text: &str, tokens: &[String]) -> Vec<Word> {
    let mut spans: Vec<(usize, usize)> = Vec::with_capacity(tokens.len());
    let mut cursor = 0usize;
    for token in tokens {
        match text[cursor..].find(token.as_str()) {
            Some(offset) => {
                let start = cursor + offset;
                spans.push((start, start + token.len()));
                cursor = start + token.len();
            }
            None => spans.push((cursor, cursor)),
        }
    }

    let mut words = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        let end = spans[i].1;
        let suffix_end = match spans.get(i + 1) {
            Some(&(next_start, _)) => next_start,
            None => {
                let tail = &text[end..];
                end + (tail.len() - tail.trim_start().len())
            }
        };
        words.push(Word::with_suffix(token.clone(), &text[end..suffix_end]));
    }
    words
}

/// Tokenizes `text` and attaches whitespace suffixes in one step.
pub fn words_from_text(tokenizer: &dyn Tokenizer, text: &str) -> Vec<Word> {
    attach_whitespace(text, &tokenizer.tokenize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_tokenizer_basic() {
        let tokens = WordTokenizer::new().tokenize("The river rose in 2021.");
        assert_eq!(tokens, ["The", "river", "rose", "in", "2021", "."]);
    }

    #[test]
    fn test_word_tokenizer_keeps_abbreviations() {
        let tokens = WordTokenizer::new().tokenize("Dr. Smith vs. the board.");
        assert_eq!(tokens, ["Dr.", "Smith", "vs.", "the", "board", "."]);
    }

    #[test]
    fn test_word_tokenizer_reusable_across_calls() {
        let tokenizer = WordTokenizer::new();
        assert_eq!(tokenizer.tokenize("one two").len(), 2);
        assert_eq!(tokenizer.tokenize("three four five").len(), 3);
    }

    #[test]
    fn test_char_tokenizer() {
        let tokens = CharTokenizer::new().tokenize("ab c");
        assert_eq!(tokens, ["a", "b", "c"]);
    }

    #[test]
    fn test_sentence_tokenizer_basic() {
        let tokens = SentenceTokenizer::new().tokenize("Hello world! How are you?");
        assert_eq!(tokens, ["Hello world!", "How are you?"]);
    }

    #[test]
    fn test_sentence_tokenizer_abbreviation_guard() {
        let tokens = SentenceTokenizer::new().tokenize("Dr. Smith arrived. It rained.");
        assert_eq!(tokens, ["Dr. Smith arrived.", "It rained."]);
    }

    #[test]
    fn test_sentence_tokenizer_decimal_guard() {
        let tokens = SentenceTokenizer::new().tokenize("Pi is 3.14 roughly. Yes.");
        assert_eq!(tokens, ["Pi is 3.14 roughly.", "Yes."]);
    }

    #[test]
    fn test_sentence_tokenizer_ellipsis_run() {
        let tokens = SentenceTokenizer::new().tokenize("Wait... go on.");
        assert_eq!(tokens, ["Wait...", "go on."]);
    }

    #[test]
    fn test_sentence_tokenizer_no_terminator_tail() {
        let tokens = SentenceTokenizer::new().tokenize("no punctuation at all");
        assert_eq!(tokens, ["no punctuation at all"]);
    }

    #[test]
    fn test_unusable_tokenizer_returns_empty() {
        let tokenizer =
            SentenceTokenizer::from_model_path(Path::new("/nonexistent/model.json"));
        assert!(!tokenizer.is_usable());
        assert!(tokenizer.tokenize("Some text. More text.").is_empty());
    }

    #[test]
    fn test_model_loaded_from_path() {
        let path = std::env::temp_dir().join("textprep-segmentation-model-test.json");
        fs::write(
            &path,
            r#"{ "abbreviations": ["Abk"], "terminators": ".!?" }"#,
        )
        .unwrap();

        let tokenizer = SentenceTokenizer::from_model_path(&path);
        assert!(tokenizer.is_usable());
        let tokens = tokenizer.tokenize("Abk. Meier kam. Es regnete.");
        assert_eq!(tokens, ["Abk. Meier kam.", "Es regnete."]);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_attach_whitespace_round_trip() {
        let text = "Dr. Smith  arrived.\n";
        let words = words_from_text(&WordTokenizer::new(), text);
        let rebuilt: String = words
            .iter()
            .map(|w| format!("{}{}", w.text(), w.whitespace_suffix()))
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_round_trip_preserves_sentence_boundaries() {
        let text = "Dr. Smith arrived. It rained.";
        let sentence_tokenizer = SentenceTokenizer::new();
        let before = sentence_tokenizer.tokenize(text);

        let words = words_from_text(&WordTokenizer::new(), text);
        let rebuilt: String = words
            .iter()
            .map(|w| format!("{}{}", w.text(), w.whitespace_suffix()))
            .collect();
        let after = sentence_tokenizer.tokenize(&rebuilt);
        assert_eq!(before, after);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = TokenizerRegistry::builtin();
        let factory = registry.get("word").unwrap();
        assert_eq!(factory.name(), "word");
        assert!(!factory.description().is_empty());
        assert!(registry.get("missing").is_none());

        let tokens = factory.tokenizer().tokenize("a b");
        assert_eq!(tokens.len(), 2);
    }
}
