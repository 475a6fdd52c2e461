//! Export/import round-trip contract.

use lexicon::{
    export, import, load, rdf, LoadOptions, Object, Policy, Registry, Statement, TermAttributes,
    Vocabulary,
};

use crate::init_tracing;

const BASE: &str = "http://example/ns#";

#[test]
fn export_then_import_reconstructs_declarations() {
    init_tracing();

    let origin = Registry::with_core_vocabularies();
    let ex = Vocabulary::builder(BASE)
        .name("EX")
        .policy(Policy::Open)
        .register(&origin);
    ex.declare(
        "Widget",
        TermAttributes::new().label("A widget").ty("rdfs:Class"),
    );

    let statements: Vec<Statement> = export(&ex).collect();
    assert_eq!(statements.len(), 2);

    // Import into a separate registry, as a fresh vocabulary under the
    // same base.
    let destination = Registry::with_core_vocabularies();
    let rebuilt = import(&destination, BASE, statements.clone(), Vec::new(), Some("EX"));

    let widget = rebuilt.resolve("Widget").unwrap();
    assert_eq!(widget.label(), "A widget");
    let types = widget.ty();
    assert_eq!(types.len(), 1);
    assert_eq!(
        types[0].as_str(),
        "http://www.w3.org/2000/01/rdf-schema#Class"
    );
    assert!(widget.is_class());

    // Re-exporting the rebuilt vocabulary yields the same statements.
    let re_exported: Vec<Statement> = export(&rebuilt).collect();
    assert_eq!(re_exported, statements);
}

#[test]
fn round_trip_preserves_custom_keys_and_multi_values() {
    init_tracing();

    let origin = Registry::with_core_vocabularies();
    let ex = Vocabulary::builder(BASE)
        .name("EX")
        .register(&origin);
    ex.declare(
        "size",
        TermAttributes::new()
            .label("size")
            .ty("rdf:Property")
            .domain("ex:Widget")
            .range("rdfs:Literal")
            .other("ex:unit", "millimetres"),
    );
    ex.declare(
        "Widget",
        TermAttributes::new()
            .label("A widget")
            .ty("rdfs:Class")
            .sub_class_of("rdfs:Resource")
            .sub_class_of("ex:Thing"),
    );

    let statements: Vec<Statement> = export(&ex).collect();

    // The destination has no `ex` prefix while statements are scanned
    // (the new vocabulary registers only after the scan), so ex-scoped
    // objects are retained under their full identifiers.
    let destination = Registry::with_core_vocabularies();
    let rebuilt = import(&destination, BASE, statements, Vec::new(), Some("EX"));

    let size = rebuilt.resolve("size").unwrap();
    assert!(size.is_property());
    assert_eq!(size.domain().len(), 1);
    assert_eq!(size.range()[0].as_str(), "http://www.w3.org/2000/01/rdf-schema#Literal");

    let widget = rebuilt.resolve("Widget").unwrap();
    assert_eq!(widget.sub_class_of().len(), 2);
    assert_eq!(rebuilt.terms().len(), 2);
}

#[test]
fn load_merges_extras_below_discovered_terms() {
    init_tracing();

    let registry = Registry::with_core_vocabularies();
    let graph = vec![
        Statement::new(
            "http://fresh/v#Gadget",
            rdf::RDFS_LABEL,
            Object::literal("discovered"),
        ),
        Statement::new(
            "http://fresh/v#Gadget",
            rdf::RDF_TYPE,
            Object::iri("http://www.w3.org/2000/01/rdf-schema#Class"),
        ),
    ];
    let vocab = load(
        &registry,
        "http://fresh/v#",
        LoadOptions::new(graph)
            .name("FRESH")
            .extra("Gadget", TermAttributes::new().label("shadowed"))
            .extra("Bare", TermAttributes::new().label("kept")),
    );

    assert_eq!(vocab.label_for("Gadget"), "discovered");
    assert_eq!(vocab.label_for("Bare"), "kept");
    assert!(vocab.resolve("Gadget").unwrap().is_class());

    // Reverse lookup lands on the freshly loaded vocabulary.
    let found = registry.find_term("http://fresh/v#Gadget").unwrap();
    assert!(std::sync::Arc::ptr_eq(
        &found,
        &vocab.resolve("Gadget").unwrap()
    ));
}

#[test]
fn language_tagged_labels_do_not_survive_import() {
    init_tracing();

    let registry = Registry::with_core_vocabularies();
    let statements = vec![
        Statement::new(
            "http://fresh/v#Gadget",
            rdf::RDFS_LABEL,
            Object::literal_with_language("le gadget", "fr"),
        ),
        Statement::new(
            "http://fresh/v#Gadget",
            rdf::RDFS_LABEL,
            Object::literal("gadget"),
        ),
    ];
    let vocab = import(&registry, "http://fresh/v#", statements, Vec::new(), None);
    assert_eq!(vocab.label_for("Gadget"), "gadget");
}
