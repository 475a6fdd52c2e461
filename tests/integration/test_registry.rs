//! Registry-level behavior: interning identity, resolution policies,
//! expansion, and reverse lookup.

use std::sync::Arc;

use lexicon::{LexiconError, Policy, Registry, TermAttributes, Vocabulary};

use crate::init_tracing;

fn example_vocabulary(registry: &Registry) -> Arc<Vocabulary> {
    Vocabulary::builder("http://example/ns#")
        .name("EX")
        .policy(Policy::Open)
        .register(registry)
}

#[test]
fn interning_is_total_across_access_paths() {
    init_tracing();
    let registry = Registry::with_core_vocabularies();
    let vocab = example_vocabulary(&registry);

    let via_resolve = vocab.resolve("widget").unwrap();
    let again = vocab.resolve("widget").unwrap();
    let via_registry = registry.find_term("http://example/ns#widget").unwrap();
    let via_curie = registry
        .expand_curie("ex:widget")
        .unwrap()
        .term()
        .unwrap();

    assert!(Arc::ptr_eq(&via_resolve, &again));
    assert!(Arc::ptr_eq(&via_resolve, &via_registry));
    assert!(Arc::ptr_eq(&via_resolve, &via_curie));
}

#[test]
fn closed_policy_fails_with_the_offending_name() {
    init_tracing();
    let registry = Registry::new();
    let vocab = Vocabulary::builder("http://example/closed#")
        .name("CL")
        .policy(Policy::Closed)
        .term("Class", TermAttributes::new().label("Class"))
        .register(&registry);

    assert!(vocab.resolve("Class").is_ok());
    match vocab.resolve("Bogus") {
        Err(LexiconError::ClosedVocabulary { name, .. }) => assert_eq!(name, "Bogus"),
        other => panic!("expected ClosedVocabulary, got {other:?}"),
    }
}

#[test]
fn open_policy_interns_on_demand() {
    init_tracing();
    let registry = Registry::new();
    let vocab = example_vocabulary(&registry);
    let term = vocab.resolve("anything").unwrap();
    assert_eq!(term.iri().as_str(), "http://example/ns#anything");
    // Undeclared terms do not show up in declared-term enumeration.
    assert!(vocab.terms().is_empty());
}

#[test]
fn compact_name_expansion_covers_the_bare_prefix() {
    init_tracing();
    let registry = Registry::new();
    example_vocabulary(&registry);

    assert_eq!(
        registry.expand_curie("ex:widget").unwrap().as_str(),
        "http://example/ns#widget"
    );
    assert_eq!(
        registry.expand_curie("ex:").unwrap().as_str(),
        "http://example/ns#"
    );
    assert!(registry.expand_curie("unknown:widget").is_none());
}

#[test]
fn fallback_defaults_for_label_and_comment() {
    init_tracing();
    let registry = Registry::new();
    let vocab = example_vocabulary(&registry);
    let term = vocab.declare("Widget", TermAttributes::new().ty("rdfs:Class"));

    assert_eq!(term.label(), "Widget");
    assert_eq!(term.comment(), "");
}

#[test]
fn prefix_tie_break_is_stable() {
    init_tracing();
    let registry = Registry::new();
    let first = Vocabulary::builder("http://a/").name("A").register(&registry);
    let second = Vocabulary::builder("http://a/b/")
        .name("AB")
        .register(&registry);

    for _ in 0..5 {
        let found = registry.find_vocabulary("http://a/b/x").unwrap();
        assert!(Arc::ptr_eq(&first, &found));
        assert!(!Arc::ptr_eq(&second, &found));
    }
}

#[test]
fn lazy_vocabularies_become_visible_to_enumeration() {
    init_tracing();
    let registry = Registry::new();
    example_vocabulary(&registry);
    registry.register_factory("lazy", |r: &Registry| {
        Vocabulary::builder("http://lazy/ns#")
            .name("LAZY")
            .term("Thing", TermAttributes::new().label("Thing"))
            .register(r)
    });

    let prefixes: Vec<_> = registry
        .vocabularies()
        .iter()
        .map(|v| v.prefix().to_string())
        .collect();
    assert_eq!(prefixes, vec!["ex", "lazy"]);
    assert_eq!(
        registry.expand_curie("lazy:Thing").unwrap().as_str(),
        "http://lazy/ns#Thing"
    );
}

#[test]
fn registries_are_isolated() {
    init_tracing();
    let a = Registry::new();
    let b = Registry::new();
    example_vocabulary(&a);

    assert!(a.expand_curie("ex:widget").is_some());
    assert!(b.expand_curie("ex:widget").is_none());
}
