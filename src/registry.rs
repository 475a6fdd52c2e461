//! Process-wide catalogue of vocabularies.
//!
//! The registry indexes every vocabulary at construction time and
//! answers the cross-vocabulary questions: compact-name (CURIE)
//! expansion, reverse identifier-to-term lookup, and enumeration.
//!
//! A [`Registry`] is an injectable value (clone-cheap handle over
//! shared state) so tests and embedders can isolate their own
//! catalogue; [`Registry::global`] offers the conventional process-wide
//! instance, pre-seeded with the core RDF/RDFS vocabularies.
//!
//! # Concurrency
//!
//! Individual operations are internally locked, but the registry
//! assumes a single writer performs declarations and registrations
//! (typically at load time) while readers resolve concurrently. Lazy
//! materialization counts as a write. That cross-operation contract is
//! documented, not enforced.

use std::sync::{Arc, LazyLock, Weak};

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::iri::Iri;
use crate::rdf;
use crate::term::Term;
use crate::vocabulary::Vocabulary;

/// A vocabulary constructor, materialized on first lookup and memoized.
///
/// Lazy registration replaces load-on-touch side effects: a vocabulary
/// known by name but not yet needed costs nothing until an enumeration
/// or expansion forces it into existence.
pub type VocabularyFactory = Box<dyn Fn(&Registry) -> Arc<Vocabulary> + Send + Sync>;

/// Result of compact-name expansion.
#[derive(Debug, Clone)]
pub enum Expanded {
    /// `prefix:name` resolved to a term.
    Term(Arc<Term>),
    /// `prefix:` with an empty suffix: the bare base identifier.
    Namespace(Iri),
}

impl Expanded {
    /// The identifier text either way.
    pub fn as_str(&self) -> &str {
        match self {
            Expanded::Term(term) => term.iri().as_str(),
            Expanded::Namespace(base) => base.as_str(),
        }
    }

    /// The resolved term, when expansion produced one.
    pub fn term(self) -> Option<Arc<Term>> {
        match self {
            Expanded::Term(term) => Some(term),
            Expanded::Namespace(_) => None,
        }
    }
}

pub(crate) struct RegistryInner {
    /// Registration order; first registered wins prefix tie-breaks.
    vocabularies: RwLock<Vec<Arc<Vocabulary>>>,
    /// Pending lazy vocabularies, keyed by their compact-name prefix.
    pending: RwLock<IndexMap<String, VocabularyFactory>>,
}

/// Catalogue of all known vocabularies.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

impl Registry {
    /// An empty registry with no vocabularies, not even the core ones.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                vocabularies: RwLock::new(Vec::new()),
                pending: RwLock::new(IndexMap::new()),
            }),
        }
    }

    /// An empty registry seeded with lazy factories for the built-in
    /// `rdf` and `rdfs` vocabularies.
    pub fn with_core_vocabularies() -> Self {
        let registry = Self::new();
        registry.register_factory(rdf::RESERVED_PREFIX, rdf::rdf_vocabulary);
        registry.register_factory("rdfs", rdf::rdfs_vocabulary);
        registry
    }

    /// The process-wide default registry.
    pub fn global() -> &'static Registry {
        static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::with_core_vocabularies);
        &GLOBAL
    }

    pub(crate) fn from_inner(inner: Arc<RegistryInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<RegistryInner> {
        Arc::downgrade(&self.inner)
    }

    /// Index a vocabulary. Called exactly once per vocabulary, from
    /// [`VocabularyBuilder::register`](crate::vocabulary::VocabularyBuilder::register);
    /// entries live for the registry's lifetime.
    pub(crate) fn register(&self, vocabulary: Arc<Vocabulary>) {
        debug!(
            base = %vocabulary.to_iri(),
            prefix = vocabulary.prefix(),
            "registering vocabulary"
        );
        self.inner.vocabularies.write().push(vocabulary);
    }

    /// Add a lazy, memoized vocabulary factory under the given
    /// compact-name prefix.
    pub fn register_factory<F>(&self, prefix: impl Into<String>, factory: F)
    where
        F: Fn(&Registry) -> Arc<Vocabulary> + Send + Sync + 'static,
    {
        self.inner
            .pending
            .write()
            .insert(prefix.into(), Box::new(factory));
    }

    /// Expand a compact name (`prefix:suffix`).
    ///
    /// The reserved `rdf` prefix resolves directly against the core RDF
    /// vocabulary; any other prefix is matched against the derived
    /// prefixes of all known vocabularies, materializing pending ones
    /// first. An empty suffix yields the bare base identifier. Returns
    /// `None` when no vocabulary matches — an absent result, not an
    /// error, so callers can apply their own fallback.
    pub fn expand_curie(&self, text: &str) -> Option<Expanded> {
        let (prefix, suffix) = text.split_once(':')?;
        if prefix == rdf::RESERVED_PREFIX {
            self.materialize(rdf::RESERVED_PREFIX);
        } else {
            self.materialize_all();
        }
        let vocabulary = {
            let vocabularies = self.inner.vocabularies.read();
            vocabularies.iter().find(|v| v.prefix() == prefix).cloned()
        }?;
        if suffix.is_empty() {
            Some(Expanded::Namespace(vocabulary.to_iri().clone()))
        } else {
            vocabulary.resolve(suffix).ok().map(Expanded::Term)
        }
    }

    /// The first-registered vocabulary whose base identifier is a
    /// string prefix of `identifier`.
    ///
    /// When several bases prefix the same identifier, the first
    /// registered wins; the tie-break is deliberate and stable across
    /// calls.
    pub fn find_vocabulary(&self, identifier: &str) -> Option<Arc<Vocabulary>> {
        self.materialize_all();
        let vocabularies = self.inner.vocabularies.read();
        vocabularies
            .iter()
            .find(|v| {
                !v.to_iri().is_empty() && identifier.starts_with(v.to_iri().as_str())
            })
            .cloned()
    }

    /// Resolve a raw identifier back to its interned term: find the
    /// owning vocabulary, strip its base, resolve the remainder.
    pub fn find_term(&self, identifier: &str) -> Option<Arc<Term>> {
        let vocabulary = self.find_vocabulary(identifier)?;
        let name = Iri::new(identifier);
        let local = name.strip_base(vocabulary.to_iri().as_str())?;
        vocabulary.resolve(local).ok()
    }

    /// Every known vocabulary, in registration order.
    ///
    /// Forces materialization of all pending factories first; without
    /// that, vocabularies known only by name would be silently
    /// invisible to universal enumeration.
    pub fn vocabularies(&self) -> Vec<Arc<Vocabulary>> {
        self.materialize_all();
        self.inner.vocabularies.read().clone()
    }

    /// Materialize a single pending factory by prefix, if present.
    fn materialize(&self, prefix: &str) {
        let factory = self.inner.pending.write().shift_remove(prefix);
        if let Some(factory) = factory {
            debug!(prefix, "materializing pending vocabulary");
            factory(self);
        }
    }

    /// Materialize every pending factory, in registration order.
    fn materialize_all(&self) {
        let factories: Vec<(String, VocabularyFactory)> = {
            let mut pending = self.inner.pending.write();
            if pending.is_empty() {
                return;
            }
            pending.drain(..).collect()
        };
        for (prefix, factory) in factories {
            debug!(prefix = %prefix, "materializing pending vocabulary");
            factory(self);
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("vocabularies", &self.inner.vocabularies.read().len())
            .field("pending", &self.inner.pending.read().len())
            .finish()
    }
}
