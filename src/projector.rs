//! Statement projection: the bridge between vocabularies and the
//! external graph representation.
//!
//! [`export`] walks a vocabulary's declared terms and emits one
//! statement per (term, predicate, value) combination; [`import`] is
//! the structural inverse, reconstructing term declarations from an
//! externally supplied statement stream. Exporting a vocabulary and
//! importing the result under the same base reconstructs the original
//! declarations (modulo compact-form vs. resolved-form spelling).

use std::collections::VecDeque;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::trace;

use crate::iri::Iri;
use crate::rdf;
use crate::registry::Registry;
use crate::statement::{Graph, Object, Statement};
use crate::term::{AttributeKey, Term, TermAttributes};
use crate::vocabulary::Vocabulary;

// ============================================================================
// Export
// ============================================================================

/// Project a vocabulary's declared terms into statements.
///
/// Lazy and single-pass: the declared-term list is snapshotted up
/// front, statements are produced per term as the iterator advances.
/// Re-invoke to iterate again.
pub fn export(vocabulary: &Vocabulary) -> Export {
    Export {
        registry: vocabulary.registry(),
        terms: vocabulary.terms().into_iter(),
        buffer: VecDeque::new(),
    }
}

/// Iterator over a vocabulary's statements. See [`export`].
pub struct Export {
    registry: Option<Registry>,
    terms: std::vec::IntoIter<Arc<Term>>,
    buffer: VecDeque<Statement>,
}

impl Iterator for Export {
    type Item = Statement;

    fn next(&mut self) -> Option<Statement> {
        loop {
            if let Some(statement) = self.buffer.pop_front() {
                return Some(statement);
            }
            let term = self.terms.next()?;
            self.buffer = statements_for(self.registry.as_ref(), &term);
        }
    }
}

fn statements_for(registry: Option<&Registry>, term: &Term) -> VecDeque<Statement> {
    let mut out = VecDeque::new();
    let subject = term.iri().clone();
    for (key, values) in term.attributes().iter() {
        // Well-known keys map to fixed predicates; anything else must
        // itself expand to an identifier or the entry is skipped.
        let predicate = match rdf::canonical_predicate(key) {
            Some(predicate) => Iri::new(predicate),
            None => {
                match registry.and_then(|r| r.expand_curie(key.as_str())) {
                    Some(expanded) => Iri::new(expanded.as_str()),
                    None => {
                        trace!(key = %key, "skipping unresolvable predicate key");
                        continue;
                    }
                }
            }
        };
        for value in values {
            let object = object_for(registry, key, value);
            out.push_back(Statement::new(subject.clone(), predicate.clone(), object));
        }
    }
    out
}

fn object_for(registry: Option<&Registry>, key: &AttributeKey, value: &str) -> Object {
    let expanded = || {
        registry
            .and_then(|r| r.expand_curie(value))
            .map(|e| Iri::new(e.as_str()))
    };
    match key {
        // Label and comment values are literal text by definition.
        AttributeKey::Label | AttributeKey::Comment => Object::literal(value),
        // Relational values name terms; an unexpandable value is kept
        // as a raw identifier string.
        key if key.is_relational() => match expanded() {
            Some(iri) => Object::Iri(iri),
            None => Object::iri(value),
        },
        // Anything else: identifier when it expands, literal verbatim
        // otherwise.
        _ => match expanded() {
            Some(iri) => Object::Iri(iri),
            None => Object::literal(value),
        },
    }
}

// ============================================================================
// Import
// ============================================================================

/// Reconstruct term declarations from a statement stream.
///
/// Creates a fresh vocabulary bound to `base` and declares one term per
/// distinct statement subject under `base`. Predicates classify back
/// into the seven well-known attribute keys by exact canonical-IRI
/// match; any other predicate is retained under its compact form (or
/// its full identifier when no registered vocabulary covers it), so
/// unexpected statements survive a round trip. Language-tagged literal
/// objects are dropped.
///
/// `extra` supplies additional term declarations at lower precedence: a
/// name also discovered from the statement stream keeps the discovered
/// attributes.
pub fn import<I>(
    registry: &Registry,
    base: impl Into<Iri>,
    statements: I,
    extra: Vec<(String, TermAttributes)>,
    name: Option<&str>,
) -> Arc<Vocabulary>
where
    I: IntoIterator<Item = Statement>,
{
    let base = base.into();
    let mut pending: IndexMap<String, TermAttributes> = IndexMap::new();

    for statement in statements {
        let Some(local) = statement.subject.strip_base(base.as_str()) else {
            continue;
        };
        if local.is_empty() {
            // A statement about the base identifier itself describes the
            // vocabulary, not a term; there is no local name to declare.
            trace!(subject = %statement.subject, "skipping statement about the base");
            continue;
        }
        let local = local.to_string();
        let key = key_for(registry, &statement.predicate);
        let Some(value) = value_for(registry, &statement.object) else {
            continue;
        };
        pending.entry(local).or_default().insert(key, value);
    }

    for (term_name, attributes) in extra {
        pending.entry(term_name).or_insert(attributes);
    }

    let mut builder = Vocabulary::builder(base);
    if let Some(name) = name {
        builder = builder.name(name);
    }
    let vocabulary = builder.register(registry);
    for (term_name, attributes) in pending {
        vocabulary.declare(term_name, attributes);
    }
    vocabulary
}

/// Classify a predicate into an attribute key.
fn key_for(registry: &Registry, predicate: &Iri) -> AttributeKey {
    if let Some(key) = rdf::well_known_key(predicate.as_str()) {
        return key;
    }
    match compact_form(registry, predicate.as_str()) {
        Some(compact) => AttributeKey::Other(compact),
        None => AttributeKey::Other(predicate.to_string()),
    }
}

/// The raw attribute value for a statement object, `None` when the
/// object contributes nothing to the declaration.
fn value_for(registry: &Registry, object: &Object) -> Option<String> {
    match object {
        // Identifiers under a known vocabulary keep their compact form.
        Object::Iri(iri) => {
            Some(compact_form(registry, iri.as_str()).unwrap_or_else(|| iri.to_string()))
        }
        Object::Literal {
            value,
            language: None,
        } => Some(value.clone()),
        Object::Literal {
            value,
            language: Some(language),
        } => {
            trace!(value = %value, language = %language, "dropping language-tagged literal");
            None
        }
    }
}

/// `prefix:local` spelling of an identifier under a registered
/// vocabulary.
fn compact_form(registry: &Registry, identifier: &str) -> Option<String> {
    let vocabulary = registry.find_vocabulary(identifier)?;
    let local = identifier.strip_prefix(vocabulary.to_iri().as_str())?;
    Some(format!("{}:{}", vocabulary.prefix(), local))
}

// ============================================================================
// Load
// ============================================================================

/// Options for [`load`]: the statement source plus optional extras.
pub struct LoadOptions<G: Graph> {
    /// The external graph supplying statements under the base.
    pub graph: G,
    /// Additional term declarations, merged at lower precedence than
    /// anything discovered in the graph.
    pub extra: Vec<(String, TermAttributes)>,
    /// Human-assigned name for the new vocabulary, from which its
    /// compact-name prefix derives.
    pub name: Option<String>,
}

impl<G: Graph> LoadOptions<G> {
    /// Load from a graph with no extras and a derived name.
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            extra: Vec::new(),
            name: None,
        }
    }

    /// Add a lower-precedence term declaration.
    pub fn extra(mut self, name: impl Into<String>, attributes: TermAttributes) -> Self {
        self.extra.push((name.into(), attributes));
        self
    }

    /// Set the vocabulary name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Load entry point: fetch statements under `base` from an external
/// graph and import them as a new vocabulary.
pub fn load<G: Graph>(
    registry: &Registry,
    base: impl Into<Iri>,
    options: LoadOptions<G>,
) -> Arc<Vocabulary> {
    let base = base.into();
    let statements = options.graph.statements(&base);
    import(
        registry,
        base,
        statements,
        options.extra,
        options.name.as_deref(),
    )
}
