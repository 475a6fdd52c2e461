//! Statement triples and the external graph boundary.
//!
//! A [`Statement`] is the fixed external representation unit this crate
//! projects vocabularies to and from. The triple structure itself is
//! owned by the external graph collaborator; this module only defines
//! the shape exchanged at the boundary, plus the [`Graph`] trait a
//! statement source must implement to feed [`load`](crate::projector::load).

use serde::{Deserialize, Serialize};

use crate::iri::Iri;

/// A subject–predicate–object triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// The term the statement describes.
    pub subject: Iri,
    /// The attribute being stated.
    pub predicate: Iri,
    /// The stated value.
    pub object: Object,
}

impl Statement {
    /// Build a statement from its three components.
    pub fn new(subject: impl Into<Iri>, predicate: impl Into<Iri>, object: Object) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }
}

/// The object position of a statement: either another identifier or a
/// literal text value, optionally tagged with a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Object {
    /// An identifier-valued object.
    Iri(Iri),
    /// A literal text value.
    Literal {
        /// The literal text.
        value: String,
        /// Language tag, if any. Only untagged literals are accepted
        /// into term attributes during import.
        language: Option<String>,
    },
}

impl Object {
    /// An identifier-valued object.
    pub fn iri(value: impl Into<Iri>) -> Self {
        Object::Iri(value.into())
    }

    /// An untagged literal object.
    pub fn literal(value: impl Into<String>) -> Self {
        Object::Literal {
            value: value.into(),
            language: None,
        }
    }

    /// A language-tagged literal object.
    pub fn literal_with_language(value: impl Into<String>, language: impl Into<String>) -> Self {
        Object::Literal {
            value: value.into(),
            language: Some(language.into()),
        }
    }
}

/// A source of statements, the external store collaborator.
///
/// Implementations yield every statement whose subject lies under the
/// given base identifier. Retrieval (local store, remote graph) is
/// entirely the implementor's concern.
pub trait Graph {
    /// Statements whose subject is prefixed by `base`.
    fn statements(&self, base: &Iri) -> Vec<Statement>;
}

impl Graph for Vec<Statement> {
    fn statements(&self, base: &Iri) -> Vec<Statement> {
        self.as_slice().statements(base)
    }
}

impl Graph for [Statement] {
    fn statements(&self, base: &Iri) -> Vec<Statement> {
        self.iter()
            .filter(|s| s.subject.strip_base(base.as_str()).is_some())
            .cloned()
            .collect()
    }
}
