//! Lexicon: a vocabulary and term registry.
//!
//! Identifiers here are first-class, attribute-bearing, cacheable
//! objects instead of opaque strings. Terms are declared on
//! vocabularies, interned per (vocabulary, name) pair, resolved through
//! compact names (`ex:widget`) or raw identifiers, and projected to and
//! from subject–predicate–object statements for exchange with an
//! external graph store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       Registry                           │
//! │   CURIE expansion · reverse lookup · lazy factories      │
//! │  ┌───────────────┐ ┌───────────────┐ ┌───────────────┐  │
//! │  │  Vocabulary   │ │  Vocabulary   │ │  rdf / rdfs   │  │
//! │  │ (open/closed) │ │               │ │  (built-in)   │  │
//! │  │  Term  Term   │ │  Term  Term   │ │  Term  Term   │  │
//! │  └───────────────┘ └───────────────┘ └───────────────┘  │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ export / import / load
//!                      ┌─────┴──────┐
//!                      │ Statements │  (external graph boundary)
//!                      └────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use lexicon::{Policy, Registry, TermAttributes, Vocabulary};
//!
//! let registry = Registry::with_core_vocabularies();
//! let ex = Vocabulary::builder("http://example/ns#")
//!     .name("EX")
//!     .policy(Policy::Open)
//!     .register(&registry);
//!
//! let widget = ex.declare(
//!     "Widget",
//!     TermAttributes::new().label("A widget").ty("rdfs:Class"),
//! );
//! assert!(widget.is_class());
//! assert_eq!(
//!     registry.expand_curie("ex:Widget").unwrap().as_str(),
//!     "http://example/ns#Widget",
//! );
//! ```

pub mod error;
pub mod iri;
pub mod projector;
pub mod rdf;
pub mod registry;
pub mod statement;
pub mod term;
pub mod vocabulary;

pub use error::{LexiconError, Result};
pub use iri::Iri;
pub use projector::{export, import, load, Export, LoadOptions};
pub use registry::{Expanded, Registry, VocabularyFactory};
pub use statement::{Graph, Object, Statement};
pub use term::{AttributeKey, Resolved, Term, TermAttributes};
pub use vocabulary::{Policy, Vocabulary, VocabularyBuilder};
