//! Interned, attribute-bearing terms.
//!
//! A [`Term`] is the canonical object for one name under one
//! vocabulary. Terms are handed out as `Arc<Term>` and interned per
//! (vocabulary, name) pair: every request for the same pair returns the
//! same allocation for the lifetime of the process, so structural
//! equality degenerates to pointer identity (`Arc::ptr_eq`).
//!
//! Identity (the IRI text) is fixed at construction. The attribute
//! table is not: a vocabulary may declare attributes onto a term that
//! was first reached through a plain lookup.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::iri::Iri;
use crate::registry::Expanded;
use crate::vocabulary::Vocabulary;

// ============================================================================
// Attribute model
// ============================================================================

/// Key of a declared term attribute.
///
/// Seven well-known keys map to fixed predicates during statement
/// projection; anything else is carried verbatim as a
/// namespace-qualified key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    /// Human-readable name (`rdfs:label`).
    Label,
    /// Human-readable description (`rdfs:comment`).
    Comment,
    /// The term's type (`rdf:type`).
    Type,
    /// Superclass relation (`rdfs:subClassOf`).
    SubClassOf,
    /// Superproperty relation (`rdfs:subPropertyOf`).
    SubPropertyOf,
    /// Property domain (`rdfs:domain`).
    Domain,
    /// Property range (`rdfs:range`).
    Range,
    /// Any other key, stored verbatim (usually a compact name).
    Other(String),
}

impl AttributeKey {
    /// The configuration-key spelling of this attribute.
    pub fn as_str(&self) -> &str {
        match self {
            AttributeKey::Label => "label",
            AttributeKey::Comment => "comment",
            AttributeKey::Type => "type",
            AttributeKey::SubClassOf => "subClassOf",
            AttributeKey::SubPropertyOf => "subPropertyOf",
            AttributeKey::Domain => "domain",
            AttributeKey::Range => "range",
            AttributeKey::Other(key) => key,
        }
    }

    /// Whether values under this key name other terms (and are resolved
    /// through compact-name expansion) rather than literal text.
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            AttributeKey::Type
                | AttributeKey::SubClassOf
                | AttributeKey::SubPropertyOf
                | AttributeKey::Domain
                | AttributeKey::Range
        )
    }
}

impl From<&str> for AttributeKey {
    fn from(key: &str) -> Self {
        match key {
            "label" => AttributeKey::Label,
            "comment" => AttributeKey::Comment,
            "type" => AttributeKey::Type,
            "subClassOf" => AttributeKey::SubClassOf,
            "subPropertyOf" => AttributeKey::SubPropertyOf,
            "domain" => AttributeKey::Domain,
            "range" => AttributeKey::Range,
            other => AttributeKey::Other(other.to_string()),
        }
    }
}

impl From<String> for AttributeKey {
    fn from(key: String) -> Self {
        AttributeKey::from(key.as_str())
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AttributeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AttributeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = AttributeKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an attribute key string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<AttributeKey, E> {
                Ok(AttributeKey::from(value))
            }
        }

        deserializer.deserialize_str(KeyVisitor)
    }
}

/// Declared attributes of a term: an insertion-ordered map from key to
/// one or more raw values.
///
/// A value is a raw string whose interpretation depends on the key: a
/// compact name or identifier for relational keys, literal text for
/// `label`/`comment`, either for anything else. Resolution happens at
/// accessor time, not at declaration time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermAttributes(IndexMap<AttributeKey, Vec<String>>);

impl TermAttributes {
    /// An empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a `label` value.
    pub fn label(self, value: impl Into<String>) -> Self {
        self.with(AttributeKey::Label, value)
    }

    /// Set a `comment` value.
    pub fn comment(self, value: impl Into<String>) -> Self {
        self.with(AttributeKey::Comment, value)
    }

    /// Add a `type` value. May be called repeatedly for multi-valued types.
    pub fn ty(self, value: impl Into<String>) -> Self {
        self.with(AttributeKey::Type, value)
    }

    /// Add a `subClassOf` value.
    pub fn sub_class_of(self, value: impl Into<String>) -> Self {
        self.with(AttributeKey::SubClassOf, value)
    }

    /// Add a `subPropertyOf` value.
    pub fn sub_property_of(self, value: impl Into<String>) -> Self {
        self.with(AttributeKey::SubPropertyOf, value)
    }

    /// Add a `domain` value.
    pub fn domain(self, value: impl Into<String>) -> Self {
        self.with(AttributeKey::Domain, value)
    }

    /// Add a `range` value.
    pub fn range(self, value: impl Into<String>) -> Self {
        self.with(AttributeKey::Range, value)
    }

    /// Add a value under an arbitrary (namespace-qualified) key.
    pub fn other(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(AttributeKey::Other(key.into()), value)
    }

    /// Add a value under any key, consuming style.
    pub fn with(mut self, key: AttributeKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a value under any key.
    pub fn insert(&mut self, key: AttributeKey, value: impl Into<String>) {
        self.0.entry(key).or_default().push(value.into());
    }

    /// Values declared under `key`, empty when absent.
    pub fn get(&self, key: &AttributeKey) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether any attribute has been declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate keys and their values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeKey, &Vec<String>)> {
        self.0.iter()
    }

    /// Append every entry of `other`, preserving existing values.
    pub fn merge(&mut self, other: TermAttributes) {
        for (key, values) in other.0 {
            self.0.entry(key).or_default().extend(values);
        }
    }
}

// ============================================================================
// Term
// ============================================================================

/// An interned, attribute-bearing identifier scoped to a vocabulary.
pub struct Term {
    iri: Iri,
    name: String,
    attributes: RwLock<TermAttributes>,
    // Lookup only; the vocabulary owns its terms, never the reverse.
    vocabulary: Weak<Vocabulary>,
}

/// A relational attribute value after compact-name expansion.
#[derive(Debug, Clone)]
pub enum Resolved {
    /// Expansion found a matching vocabulary and interned the term.
    Term(Arc<Term>),
    /// No registered prefix matched; the raw declared value, kept as a
    /// literal identifier string.
    Raw(String),
}

impl Resolved {
    /// The string form of the value either way.
    pub fn as_str(&self) -> &str {
        match self {
            Resolved::Term(term) => term.iri().as_str(),
            Resolved::Raw(raw) => raw,
        }
    }
}

impl Term {
    pub(crate) fn new(iri: Iri, name: impl Into<String>, vocabulary: Weak<Vocabulary>) -> Self {
        Self {
            iri,
            name: name.into(),
            attributes: RwLock::new(TermAttributes::new()),
            vocabulary,
        }
    }

    /// The term's full identifier.
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// The local name under the owning vocabulary.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owning vocabulary, if it is still alive.
    pub fn vocabulary(&self) -> Option<Arc<Vocabulary>> {
        self.vocabulary.upgrade()
    }

    /// Snapshot of the declared attributes.
    pub fn attributes(&self) -> TermAttributes {
        self.attributes.read().clone()
    }

    /// Raw declared values under `key`, empty when absent.
    pub fn attribute(&self, key: &AttributeKey) -> Vec<String> {
        self.attributes.read().get(key).to_vec()
    }

    /// Whether this term has any declared attributes.
    pub fn is_declared(&self) -> bool {
        !self.attributes.read().is_empty()
    }

    pub(crate) fn merge_attributes(&self, attributes: TermAttributes) {
        self.attributes.write().merge(attributes);
    }

    /// Whether the term's textual form matches the identifier grammar.
    ///
    /// Construction never rejects input; this is the explicit validity
    /// query, and it never panics.
    pub fn is_valid(&self) -> bool {
        self.iri.is_valid()
    }

    // ========================================================================
    // Attribute accessors
    // ========================================================================

    /// Declared `label`, falling back to the trailing path/fragment
    /// segment of the identifier.
    pub fn label(&self) -> String {
        self.attribute(&AttributeKey::Label)
            .into_iter()
            .next()
            .unwrap_or_else(|| self.iri.local_name().to_string())
    }

    /// Declared `comment`, falling back to the empty string.
    pub fn comment(&self) -> String {
        self.attribute(&AttributeKey::Comment)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// Resolved `type` values; empty when undeclared.
    pub fn ty(&self) -> Vec<Resolved> {
        self.resolve_relational(&AttributeKey::Type)
    }

    /// Resolved `subClassOf` values; empty when undeclared.
    pub fn sub_class_of(&self) -> Vec<Resolved> {
        self.resolve_relational(&AttributeKey::SubClassOf)
    }

    /// Resolved `subPropertyOf` values; empty when undeclared.
    pub fn sub_property_of(&self) -> Vec<Resolved> {
        self.resolve_relational(&AttributeKey::SubPropertyOf)
    }

    /// Resolved `domain` values; empty when undeclared.
    pub fn domain(&self) -> Vec<Resolved> {
        self.resolve_relational(&AttributeKey::Domain)
    }

    /// Resolved `range` values; empty when undeclared.
    pub fn range(&self) -> Vec<Resolved> {
        self.resolve_relational(&AttributeKey::Range)
    }

    /// Resolve each raw value under a relational key through
    /// compact-name expansion, element-wise. Values whose prefix is not
    /// registered come back as [`Resolved::Raw`].
    fn resolve_relational(&self, key: &AttributeKey) -> Vec<Resolved> {
        let registry = self.vocabulary().and_then(|v| v.registry());
        self.attribute(key)
            .into_iter()
            .map(|raw| {
                match registry.as_ref().and_then(|r| r.expand_curie(&raw)) {
                    Some(Expanded::Term(term)) => Resolved::Term(term),
                    Some(Expanded::Namespace(base)) => Resolved::Raw(base.to_string()),
                    None => Resolved::Raw(raw),
                }
            })
            .collect()
    }

    // ========================================================================
    // Classification predicates
    // ========================================================================

    /// Whether any resolved `type` value's string form contains
    /// `"Class"`.
    ///
    /// Deliberately a loose substring match, not an identity check;
    /// downstream consumers depend on the loose behavior.
    pub fn is_class(&self) -> bool {
        self.type_contains("Class")
    }

    /// Whether any resolved `type` value's string form contains
    /// `"Property"`.
    pub fn is_property(&self) -> bool {
        self.type_contains("Property")
    }

    /// Whether any resolved `type` value's string form contains
    /// `"Datatype"`.
    pub fn is_datatype(&self) -> bool {
        self.type_contains("Datatype")
    }

    /// Whether the term is none of class, property, or datatype.
    pub fn is_other(&self) -> bool {
        !(self.is_class() || self.is_property() || self.is_datatype())
    }

    fn type_contains(&self, needle: &str) -> bool {
        self.ty().iter().any(|value| value.as_str().contains(needle))
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Term")
            .field("iri", &self.iri)
            .field("attributes", &*self.attributes.read())
            .finish()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iri.as_str())
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.iri == other.iri
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iri.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::vocabulary::{Policy, Vocabulary};

    fn example_vocabulary(registry: &Registry) -> Arc<Vocabulary> {
        Vocabulary::builder("http://example/ns#")
            .name("EX")
            .policy(Policy::Open)
            .register(registry)
    }

    #[test]
    fn test_attribute_key_round_trips_through_strings() {
        for key in ["label", "comment", "type", "subClassOf", "domain"] {
            assert_eq!(AttributeKey::from(key).as_str(), key);
        }
        assert_eq!(
            AttributeKey::from("ex:custom"),
            AttributeKey::Other("ex:custom".to_string())
        );
    }

    #[test]
    fn test_label_falls_back_to_local_name() {
        let registry = Registry::new();
        let vocab = example_vocabulary(&registry);
        let term = vocab.resolve("Widget").unwrap();
        assert_eq!(term.label(), "Widget");
        assert_eq!(term.comment(), "");

        vocab.declare("Widget", TermAttributes::new().label("A widget"));
        assert_eq!(term.label(), "A widget");
    }

    #[test]
    fn test_relational_values_resolve_through_registry() {
        let registry = Registry::with_core_vocabularies();
        let vocab = example_vocabulary(&registry);
        let term = vocab.declare("Widget", TermAttributes::new().ty("rdfs:Class"));

        let types = term.ty();
        assert_eq!(types.len(), 1);
        assert_eq!(
            types[0].as_str(),
            "http://www.w3.org/2000/01/rdf-schema#Class"
        );
        assert!(matches!(types[0], Resolved::Term(_)));
    }

    #[test]
    fn test_unregistered_prefix_stays_raw() {
        let registry = Registry::new();
        let vocab = example_vocabulary(&registry);
        let term = vocab.declare("Widget", TermAttributes::new().ty("mystery:Class"));

        let types = term.ty();
        assert!(matches!(&types[0], Resolved::Raw(raw) if raw == "mystery:Class"));
        // Substring classification still fires on the raw form.
        assert!(term.is_class());
    }

    #[test]
    fn test_classification_is_substring_based() {
        let registry = Registry::with_core_vocabularies();
        let vocab = example_vocabulary(&registry);

        let class = vocab.declare("Widget", TermAttributes::new().ty("rdfs:Class"));
        assert!(class.is_class());
        assert!(!class.is_property());
        assert!(!class.is_other());

        let property = vocab.declare("size", TermAttributes::new().ty("rdf:Property"));
        assert!(property.is_property());
        assert!(!property.is_class());

        let datatype = vocab.declare("Size", TermAttributes::new().ty("rdfs:Datatype"));
        assert!(datatype.is_datatype());

        // The loose match classifies anything containing "Class".
        let loose = vocab.declare(
            "odd",
            TermAttributes::new().ty("ex:SubClassOfThing"),
        );
        assert!(loose.is_class());

        let plain = vocab.declare("plain", TermAttributes::new().label("no type at all"));
        assert!(plain.is_other());
    }

    #[test]
    fn test_validity_query_never_panics() {
        let registry = Registry::new();
        let vocab = Vocabulary::builder("not an iri ")
            .name("BAD")
            .register(&registry);
        let term = vocab.resolve("x").unwrap();
        assert!(!term.is_valid());

        let good = example_vocabulary(&registry).resolve("x").unwrap();
        assert!(good.is_valid());
    }
}
