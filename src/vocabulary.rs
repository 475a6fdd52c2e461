//! Vocabularies: named collections of declared terms under one base
//! identifier.
//!
//! A vocabulary owns its term table and is the only interning point for
//! terms under its base. Whether an *undeclared* name resolves is the
//! vocabulary's resolution policy: open vocabularies intern anything on
//! demand, closed vocabularies fail the lookup.

use std::fmt;
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{LexiconError, Result};
use crate::iri::Iri;
use crate::registry::Registry;
use crate::term::{AttributeKey, Term, TermAttributes};

/// Resolution policy for undeclared names.
///
/// An explicit field rather than a type distinction: `resolve` checks
/// the declaration table first and only falls through to on-demand
/// interning when the policy is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Any name under the base resolves, declared or not.
    #[default]
    Open,
    /// Only pre-declared names resolve; anything else is an error.
    Closed,
}

/// A named collection of declared terms sharing a base identifier.
///
/// Constructed through [`Vocabulary::builder`] and registered into a
/// [`Registry`] exactly once, at construction. Declarations may be
/// added any time afterward.
pub struct Vocabulary {
    me: Weak<Vocabulary>,
    base: Iri,
    name: String,
    prefix: String,
    policy: Policy,
    registry: Weak<crate::registry::RegistryInner>,
    terms: RwLock<IndexMap<String, Arc<Term>>>,
}

impl Vocabulary {
    /// Start building a vocabulary with the given base identifier.
    pub fn builder(base: impl Into<Iri>) -> VocabularyBuilder {
        VocabularyBuilder {
            base: base.into(),
            name: None,
            policy: Policy::default(),
            terms: Vec::new(),
        }
    }

    /// The base identifier, as an opaque identifier value.
    pub fn to_iri(&self) -> &Iri {
        &self.base
    }

    /// The human-assigned vocabulary name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The derived compact-name prefix. Derived once at construction
    /// from the vocabulary's own name, lower-cased; stable thereafter.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The resolution policy for undeclared names.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// The registry this vocabulary was registered into, if it is
    /// still alive.
    pub fn registry(&self) -> Option<Registry> {
        self.registry.upgrade().map(Registry::from_inner)
    }

    /// Declare a term with the given attributes.
    ///
    /// Interns the term (or re-uses the existing instance) and merges
    /// the attributes into its table. Declaring with an empty attribute
    /// map is a pure intern/lookup. Never fails; malformed attribute
    /// values are stored as-is and only interpreted at accessor time.
    pub fn declare(&self, name: impl Into<String>, attributes: TermAttributes) -> Arc<Term> {
        let name = name.into();
        let term = self.intern(&name);
        if !attributes.is_empty() {
            debug!(vocabulary = %self.base, term = %name, "declaring term");
            let newly_declared = !term.is_declared();
            term.merge_attributes(attributes);
            if newly_declared {
                // The table is in intern order; a term interned by a
                // plain lookup before its declaration would otherwise
                // enumerate too early. Move it to the back so `terms`
                // follows declaration order.
                let mut table = self.terms.write();
                if let Some(entry) = table.shift_remove(&name) {
                    table.insert(name, entry);
                }
            }
        }
        term
    }

    /// The term literally named `"property"` under this vocabulary's
    /// identity.
    ///
    /// A lookup accessor, not a declaration; it bypasses the resolution
    /// policy so the name stays reachable even on closed vocabularies.
    pub fn property(&self) -> Arc<Term> {
        self.intern("property")
    }

    /// Resolve a name to its interned term.
    ///
    /// The declaration table is checked first. An open vocabulary then
    /// interns the name on demand; a closed one fails with
    /// [`LexiconError::ClosedVocabulary`]. A vocabulary with an empty
    /// base identifier rejects every resolution.
    pub fn resolve(&self, name: &str) -> Result<Arc<Term>> {
        if self.base.is_empty() {
            return Err(LexiconError::EmptyBase);
        }
        if let Some(term) = self.terms.read().get(name) {
            return Ok(term.clone());
        }
        match self.policy {
            Policy::Open => Ok(self.intern(name)),
            Policy::Closed => Err(LexiconError::ClosedVocabulary {
                vocabulary: self.base.to_string(),
                name: name.to_string(),
            }),
        }
    }

    /// The declared terms (those with a non-empty attribute table), in
    /// declaration order.
    pub fn terms(&self) -> Vec<Arc<Term>> {
        self.terms
            .read()
            .values()
            .filter(|term| term.is_declared())
            .cloned()
            .collect()
    }

    /// Declared `label` of the named term, or empty string if the name
    /// does not resolve or carries no label.
    pub fn label_for(&self, name: &str) -> String {
        self.declared_attribute(name, &AttributeKey::Label)
    }

    /// Declared `comment` of the named term, or empty string.
    pub fn comment_for(&self, name: &str) -> String {
        self.declared_attribute(name, &AttributeKey::Comment)
    }

    fn declared_attribute(&self, name: &str, key: &AttributeKey) -> String {
        self.resolve(name)
            .ok()
            .and_then(|term| term.attribute(key).into_iter().next())
            .unwrap_or_default()
    }

    /// Intern a name, returning the canonical term instance for it.
    fn intern(&self, name: &str) -> Arc<Term> {
        if let Some(term) = self.terms.read().get(name) {
            return term.clone();
        }
        let mut table = self.terms.write();
        // Raced writers may have interned it between the locks.
        if let Some(term) = table.get(name) {
            return term.clone();
        }
        let term = Arc::new(Term::new(self.base.join(name), name, self.me.clone()));
        table.insert(name.to_string(), term.clone());
        term
    }
}

impl fmt::Debug for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vocabulary")
            .field("base", &self.base)
            .field("prefix", &self.prefix)
            .field("policy", &self.policy)
            .field("terms", &self.terms.read().len())
            .finish()
    }
}

/// Builder for [`Vocabulary`], the single construction path.
#[derive(Debug)]
pub struct VocabularyBuilder {
    base: Iri,
    name: Option<String>,
    policy: Policy,
    terms: Vec<(String, TermAttributes)>,
}

impl VocabularyBuilder {
    /// Set the human-assigned vocabulary name, used to derive the
    /// compact-name prefix.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the resolution policy (default: open).
    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Seed a term declaration to apply at registration.
    pub fn term(mut self, name: impl Into<String>, attributes: TermAttributes) -> Self {
        self.terms.push((name.into(), attributes));
        self
    }

    /// Construct the vocabulary and register it.
    ///
    /// Registration happens exactly once, here; the registry indexes
    /// every vocabulary as it comes into existence.
    pub fn register(self, registry: &Registry) -> Arc<Vocabulary> {
        let name = self
            .name
            .unwrap_or_else(|| derive_name_from_base(&self.base));
        let prefix = name.to_lowercase();
        let vocabulary = Arc::new_cyclic(|me| Vocabulary {
            me: me.clone(),
            base: self.base,
            name,
            prefix,
            policy: self.policy,
            registry: registry.downgrade(),
            terms: RwLock::new(IndexMap::new()),
        });
        for (term_name, attributes) in self.terms {
            vocabulary.declare(term_name, attributes);
        }
        registry.register(vocabulary.clone());
        vocabulary
    }
}

/// Fallback vocabulary name for builders without an explicit one: the
/// trailing token of the base identifier.
fn derive_name_from_base(base: &Iri) -> String {
    let trimmed = base.as_str().trim_end_matches(['#', '/', ':']);
    Iri::new(trimmed).local_name().to_string()
}
