//! # Tags, Tag Sets and the Tag Registry
//!
//! A [`Tag`] is a `(value, type)` pair drawn from a registered vocabulary.
//! Each vocabulary is owned by a [`TagBuilder`], which constructs canonical
//! tags and resolves anything it does not recognize to its reserved
//! `UNKNOWN` tag instead of failing. This keeps loading of annotated
//! documents robust against tag-set evolution: a stale or malformed value
//! degrades to `UNKNOWN`, it never aborts.
//!
//! ## Built-in tag sets
//!
//! | Type     | Contents                                        |
//! |----------|-------------------------------------------------|
//! | `POS`    | Penn-Treebank-style part-of-speech tags          |
//! | `NE`     | Named-entity categories (PERSON, LOCATION, ...)  |
//! | `BIOMED` | Biomedical entity categories (GENE, DISEASE, ...)|
//!
//! Additional sets can be declared as data (see [`TagSetSpec`]) and
//! registered before the [`TagRegistry`] is frozen and shared.
//!
//! ## Example
//!
//! ```rust
//! use textprep_core::tag::TagRegistry;
//!
//! let registry = TagRegistry::builtin();
//! let pos = registry.get("POS").unwrap();
//!
//! let noun = pos.build_tag("NN");
//! assert_eq!(noun.value(), "NN");
//!
//! // Unrecognized values resolve to UNKNOWN, they never fail.
//! let stale = pos.build_tag("NOT_A_TAG");
//! assert_eq!(stale.value(), "UNKNOWN");
//! assert_eq!(stale.tag_type(), "POS");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reserved value every tag set resolves unrecognized strings to.
pub const UNKNOWN_TAG_VALUE: &str = "UNKNOWN";

/// Type string of the built-in part-of-speech tag set.
pub const POS_TAG_TYPE: &str = "POS";

/// Type string of the built-in named-entity tag set.
pub const NE_TAG_TYPE: &str = "NE";

/// Type string of the built-in biomedical tag set.
pub const BIOMED_TAG_TYPE: &str = "BIOMED";

/// Penn-Treebank-style part-of-speech vocabulary (declaration order).
const POS_VALUES: &[&str] = &[
    "CC", "CD", "DT", "EX", "FW", "IN", "JJ", "JJR", "JJS", "LS", "MD", "NN",
    "NNS", "NNP", "NNPS", "PDT", "POS", "PRP", "PRP$", "RB", "RBR", "RBS",
    "RP", "SYM", "TO", "UH", "VB", "VBD", "VBG", "VBN", "VBP", "VBZ", "WDT",
    "WP", "WP$", "WRB",
];

/// Named-entity categories.
const NE_VALUES: &[&str] = &[
    "PERSON", "ORGANIZATION", "LOCATION", "DATE", "TIME", "MONEY",
    "PERCENTAGE", "MISC",
];

/// Biomedical entity categories.
const BIOMED_VALUES: &[&str] = &[
    "GENE", "PROTEIN", "DNA", "RNA", "CELL_TYPE", "CELL_LINE", "DISEASE",
    "CHEMICAL", "DRUG", "SPECIES",
];

/// A linguistic annotation: a value drawn from the vocabulary of one tag
/// type.
///
/// Two tags are equal iff both the value and the type match. Tags are
/// immutable once constructed; they are produced either by a [`TagBuilder`]
/// (canonical, validated) or directly via [`Tag::new`] when the caller
/// already knows value and type (e.g. when attaching tagger output).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    value: String,
    tag_type: String,
}

impl Tag {
    pub fn new(value: impl Into<String>, tag_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tag_type: tag_type.into(),
        }
    }

    /// The tag value (e.g. `"NN"`, `"PERSON"`).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The tag type this value belongs to (e.g. `"POS"`, `"NE"`).
    pub fn tag_type(&self) -> &str {
        &self.tag_type
    }

    /// Whether this is the reserved `UNKNOWN` tag of its type.
    pub fn is_unknown(&self) -> bool {
        self.value == UNKNOWN_TAG_VALUE
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tag_type, self.value)
    }
}

/// Owns the vocabulary of one tag type and constructs tags of that type.
///
/// `build_tag` is total: a value outside the vocabulary yields the set's
/// reserved `UNKNOWN` tag. `UNKNOWN` is itself enumerated by [`tags`] and
/// [`as_string_list`] so consumers can distinguish "recognized but unknown"
/// from "absent".
///
/// [`tags`]: TagBuilder::tags
/// [`as_string_list`]: TagBuilder::as_string_list
#[derive(Debug, Clone)]
pub struct TagBuilder {
    tag_type: String,
    values: Vec<String>,
    tags: Vec<Tag>,
    index: HashMap<String, usize>,
    unknown: Tag,
}

impl TagBuilder {
    /// Builds a tag set of `tag_type` from `values` in declaration order.
    ///
    /// `UNKNOWN` is appended to the vocabulary unless already declared, so
    /// the enumeration always contains it.
    pub fn new<I, S>(tag_type: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tag_type = tag_type.into();
        let mut list: Vec<String> = Vec::new();
        let mut index = HashMap::new();
        for value in values {
            let value = value.into();
            if !index.contains_key(&value) {
                index.insert(value.clone(), list.len());
                list.push(value);
            }
        }
        if !index.contains_key(UNKNOWN_TAG_VALUE) {
            index.insert(UNKNOWN_TAG_VALUE.to_string(), list.len());
            list.push(UNKNOWN_TAG_VALUE.to_string());
        }
        let tags: Vec<Tag> = list
            .iter()
            .map(|v| Tag::new(v.clone(), tag_type.clone()))
            .collect();
        let unknown = Tag::new(UNKNOWN_TAG_VALUE, tag_type.clone());
        Self {
            tag_type,
            values: list,
            tags,
            index,
            unknown,
        }
    }

    /// The type string identifying this set (e.g. `"POS"`).
    pub fn tag_type(&self) -> &str {
        &self.tag_type
    }

    /// Returns the canonical tag for `value`, or the set's `UNKNOWN` tag if
    /// the value is not a member. Never fails.
    pub fn build_tag(&self, value: &str) -> Tag {
        match self.index.get(value) {
            Some(&i) => self.tags[i].clone(),
            None => self.unknown.clone(),
        }
    }

    /// Whether `value` is a member of this vocabulary.
    pub fn contains(&self, value: &str) -> bool {
        self.index.contains_key(value)
    }

    /// All tag values in declaration order, `UNKNOWN` included.
    pub fn as_string_list(&self) -> &[String] {
        &self.values
    }

    /// All tags of this type in declaration order, `UNKNOWN` included.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

/// Declaration of a custom tag set, deserializable from JSON.
///
/// ```json
/// { "tag_type": "SENTIMENT", "values": ["POSITIVE", "NEGATIVE", "NEUTRAL"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSetSpec {
    pub tag_type: String,
    pub values: Vec<String>,
}

impl TagSetSpec {
    /// Compiles the declaration into a [`TagBuilder`].
    pub fn into_builder(self) -> TagBuilder {
        TagBuilder::new(self.tag_type, self.values)
    }
}

/// Process-wide read-only registry mapping tag type → [`TagBuilder`].
///
/// Populated once at startup (built-in sets plus any custom declarations)
/// and then frozen behind an `Arc`; reads are lock-free and safe from any
/// number of threads.
#[derive(Debug)]
pub struct TagRegistry {
    builders: HashMap<String, TagBuilder>,
}

impl TagRegistry {
    /// An empty registry, for hosts that supply every tag set themselves.
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Registry holding the built-in `POS`, `NE` and `BIOMED` sets.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(TagBuilder::new(POS_TAG_TYPE, POS_VALUES.iter().copied()));
        registry.register(TagBuilder::new(NE_TAG_TYPE, NE_VALUES.iter().copied()));
        registry.register(TagBuilder::new(
            BIOMED_TAG_TYPE,
            BIOMED_VALUES.iter().copied(),
        ));
        registry
    }

    /// Registers a tag set, replacing any previous set of the same type.
    pub fn register(&mut self, builder: TagBuilder) {
        debug!(
            tag_type = builder.tag_type(),
            size = builder.tags().len(),
            "registering tag set"
        );
        self.builders.insert(builder.tag_type().to_string(), builder);
    }

    /// Registers a custom tag set from its JSON declaration.
    pub fn register_spec(&mut self, spec: TagSetSpec) {
        self.register(spec.into_builder());
    }

    pub fn get(&self, tag_type: &str) -> Option<&TagBuilder> {
        self.builders.get(tag_type)
    }

    /// All registered type strings (no ordering guarantee).
    pub fn tag_types(&self) -> Vec<&str> {
        self.builders.keys().map(String::as_str).collect()
    }

    /// Freezes the registry for sharing across worker threads.
    pub fn into_shared(self) -> Arc<TagRegistry> {
        Arc::new(self)
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tag_known_value() {
        let builder = TagBuilder::new("POS", ["NN", "VB", "JJ"]);
        let tag = builder.build_tag("VB");
        assert_eq!(tag.value(), "VB");
        assert_eq!(tag.tag_type(), "POS");
        assert!(!tag.is_unknown());
    }

    #[test]
    fn test_build_tag_unknown_value() {
        let builder = TagBuilder::new("POS", ["NN", "VB", "JJ"]);
        let tag = builder.build_tag("XYZ");
        assert_eq!(tag.value(), UNKNOWN_TAG_VALUE);
        assert_eq!(tag.tag_type(), "POS");
        assert!(tag.is_unknown());
    }

    #[test]
    fn test_tags_and_string_list_are_consistent() {
        let builder = TagBuilder::new("NE", ["PERSON", "LOCATION"]);
        assert_eq!(builder.tags().len(), builder.as_string_list().len());
        for (tag, value) in builder.tags().iter().zip(builder.as_string_list()) {
            assert_eq!(tag.value(), value);
        }
    }

    #[test]
    fn test_unknown_is_enumerated() {
        let builder = TagBuilder::new("NE", ["PERSON"]);
        assert!(builder
            .tags()
            .iter()
            .any(|t| t.value() == UNKNOWN_TAG_VALUE));
        assert!(builder.contains(UNKNOWN_TAG_VALUE));
    }

    #[test]
    fn test_declaration_order_preserved() {
        let builder = TagBuilder::new("POS", ["JJ", "NN", "VB"]);
        let values: Vec<&str> =
            builder.as_string_list().iter().map(String::as_str).collect();
        assert_eq!(values, ["JJ", "NN", "VB", UNKNOWN_TAG_VALUE]);
    }

    #[test]
    fn test_duplicate_values_collapse() {
        let builder = TagBuilder::new("POS", ["NN", "NN", "VB"]);
        // NN, VB, UNKNOWN
        assert_eq!(builder.as_string_list().len(), 3);
    }

    #[test]
    fn test_tag_equality_over_both_fields() {
        assert_eq!(Tag::new("NN", "POS"), Tag::new("NN", "POS"));
        assert_ne!(Tag::new("NN", "POS"), Tag::new("NN", "BIOMED"));
        assert_ne!(Tag::new("NN", "POS"), Tag::new("VB", "POS"));
    }

    #[test]
    fn test_builtin_registry() {
        let registry = TagRegistry::builtin();
        assert!(registry.get(POS_TAG_TYPE).is_some());
        assert!(registry.get(NE_TAG_TYPE).is_some());
        assert!(registry.get(BIOMED_TAG_TYPE).is_some());
        assert!(registry.get("NOPE").is_none());
    }

    #[test]
    fn test_custom_tag_set_from_json() {
        let spec: TagSetSpec = serde_json::from_str(
            r#"{ "tag_type": "SENTIMENT", "values": ["POSITIVE", "NEGATIVE"] }"#,
        )
        .unwrap();
        let mut registry = TagRegistry::builtin();
        registry.register_spec(spec);

        let builder = registry.get("SENTIMENT").unwrap();
        assert_eq!(builder.build_tag("POSITIVE").value(), "POSITIVE");
        assert!(builder.build_tag("MEH").is_unknown());
    }

    #[test]
    fn test_display() {
        assert_eq!(Tag::new("NN", "POS").to_string(), "POS:NN");
    }
}
