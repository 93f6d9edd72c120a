//! # Morphological lemmatization
//!
//! Reduces each word of a term to its lemma, driven by the term's
//! part-of-speech tag: the first tag whose type is the part-of-speech
//! type and whose value is not `UNKNOWN` selects the rule class. A term
//! without such a tag is either passed through with a recorded warning or
//! treated as a fatal per-row condition, depending on the configured
//! policy.
//!
//! Lemmas come from an exception dictionary first (irregular forms such as
//! "went" → "go") and from suffix rules otherwise ("running" → "run",
//! "rivers" → "river", "happier" → "happy"). Whitespace suffixes, tags
//! and the unmodifiable flag of the term are preserved.

use serde::{Deserialize, Serialize};

use crate::error::PreprocessError;
use crate::preprocessing::{RunContext, TermPreprocessing};
use crate::tag::POS_TAG_TYPE;
use crate::term::Term;

/// Irregular verb forms.
const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("am", "be"), ("are", "be"), ("is", "be"), ("was", "be"), ("were", "be"),
    ("been", "be"), ("has", "have"), ("had", "have"), ("did", "do"),
    ("done", "do"), ("went", "go"), ("gone", "go"), ("said", "say"),
    ("made", "make"), ("took", "take"), ("taken", "take"), ("taking", "take"),
    ("came", "come"), ("saw", "see"), ("seen", "see"), ("got", "get"),
    ("gave", "give"), ("given", "give"), ("found", "find"), ("knew", "know"),
    ("known", "know"), ("thought", "think"), ("told", "tell"),
    ("became", "become"), ("left", "leave"), ("felt", "feel"),
    ("brought", "bring"), ("wrote", "write"), ("written", "write"),
    ("bought", "buy"), ("meant", "mean"), ("held", "hold"),
    ("stood", "stand"), ("heard", "hear"), ("kept", "keep"), ("ran", "run"),
];

/// Irregular noun plurals.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"), ("women", "woman"), ("children", "child"),
    ("people", "person"), ("feet", "foot"), ("teeth", "tooth"),
    ("mice", "mouse"), ("geese", "goose"), ("lives", "life"),
    ("wolves", "wolf"), ("knives", "knife"),
];

/// Irregular comparatives and superlatives.
const IRREGULAR_GRADES: &[(&str, &str)] = &[
    ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
    ("more", "many"), ("most", "many"), ("less", "little"),
    ("least", "little"), ("further", "far"), ("furthest", "far"),
];

/// What to do with a term that carries no usable part-of-speech tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTagPolicy {
    /// Pass the term through unchanged and record a warning.
    #[default]
    Skip,
    /// Raise a fatal per-row failure.
    Fail,
}

/// Dictionary-and-rules lemmatizer.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    pos_type: String,
    policy: MissingTagPolicy,
}

impl Lemmatizer {
    /// Lemmatizer over the built-in part-of-speech tag type.
    pub fn new(policy: MissingTagPolicy) -> Self {
        Self::with_pos_type(POS_TAG_TYPE, policy)
    }

    /// Lemmatizer over a host-supplied part-of-speech tag type.
    pub fn with_pos_type(pos_type: impl Into<String>, policy: MissingTagPolicy) -> Self {
        Self {
            pos_type: pos_type.into(),
            policy,
        }
    }

    /// The lemma of `word` under part-of-speech `pos`.
    pub fn lemma(word: &str, pos: &str) -> String {
        let lower = word.to_lowercase();
        if pos.starts_with("VB") {
            if let Some(lemma) = lookup(IRREGULAR_VERBS, &lower) {
                return lemma;
            }
            return verb_lemma(&lower);
        }
        if pos.starts_with("NN") {
            if let Some(lemma) = lookup(IRREGULAR_NOUNS, &lower) {
                return lemma;
            }
            // Only plural forms carry a suffix to strip.
            if pos.ends_with('S') {
                return noun_singular(&lower);
            }
            return lower;
        }
        if pos.starts_with("JJ") || pos.starts_with("RB") {
            if let Some(lemma) = lookup(IRREGULAR_GRADES, &lower) {
                return lemma;
            }
            if pos.ends_with('R') || pos.ends_with('S') {
                return graded_base(&lower);
            }
            return lower;
        }
        lower
    }
}

impl TermPreprocessing for Lemmatizer {
    fn name(&self) -> &'static str {
        "lemmatizer"
    }

    fn preprocess(
        &self,
        term: Term,
        ctx: &RunContext,
    ) -> Result<Option<Term>, PreprocessError> {
        let tag = term
            .tags()
            .iter()
            .find(|t| t.tag_type() == self.pos_type && !t.is_unknown());
        let tag = match tag {
            Some(tag) => tag,
            None => match self.policy {
                MissingTagPolicy::Skip => {
                    ctx.warn(format!(
                        "term `{}` has no part-of-speech tag; lemmatization skipped",
                        term.text()
                    ));
                    return Ok(Some(term));
                }
                MissingTagPolicy::Fail => {
                    return Err(PreprocessError::MissingPosTag { term: term.text() })
                }
            },
        };

        let pos = tag.value().to_string();
        let words = term
            .words()
            .iter()
            .map(|w| w.with_text(Self::lemma(w.text(), &pos)))
            .collect();
        Ok(Some(term.with_words(words)))
    }
}

fn lookup(table: &[(&str, &str)], word: &str) -> Option<String> {
    table
        .iter()
        .find(|(form, _)| *form == word)
        .map(|(_, lemma)| lemma.to_string())
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Undoubles a trailing consonant produced by gemination ("runn" → "run").
/// 'l', 's' and 'z' stay doubled ("fall", "miss", "buzz").
fn undouble(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() >= 2 {
        let last = chars[chars.len() - 1];
        if last == chars[chars.len() - 2] && !is_vowel(last) && !matches!(last, 'l' | 's' | 'z')
        {
            return stem[..stem.len() - last.len_utf8()].to_string();
        }
    }
    stem.to_string()
}

fn verb_lemma(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ing") {
        if stem.chars().count() >= 2 {
            return undouble(stem);
        }
    }
    if let Some(stem) = word.strip_suffix("ied") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("ed") {
        if stem.chars().count() >= 2 {
            return undouble(stem);
        }
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        if stem.ends_with('s')
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with('o')
            || stem.ends_with("ch")
            || stem.ends_with("sh")
        {
            return stem.to_string();
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        if !stem.ends_with('s') && !stem.is_empty() {
            return stem.to_string();
        }
    }
    word.to_string()
}

fn noun_singular(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        if stem.ends_with('s')
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with('o')
            || stem.ends_with("ch")
            || stem.ends_with("sh")
        {
            return stem.to_string();
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        if !stem.ends_with('s') && !stem.ends_with('u') && !stem.is_empty() {
            return stem.to_string();
        }
    }
    word.to_string()
}

fn graded_base(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("iest") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("ier") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("est") {
        if stem.chars().count() >= 2 {
            return undouble(stem);
        }
    }
    if let Some(stem) = word.strip_suffix("er") {
        if stem.chars().count() >= 2 {
            return undouble(stem);
        }
    }
    word.to_string()
}
