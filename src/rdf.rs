//! Built-in core RDF and RDFS vocabularies.
//!
//! These two vocabularies back the reserved `rdf:` prefix, the `rdfs:`
//! prefix, and the fixed predicate mapping the statement projector uses
//! for the seven well-known attribute keys. They are closed: the W3C
//! recommendations enumerate their terms exhaustively.

use std::sync::Arc;

use crate::registry::Registry;
use crate::term::{AttributeKey, TermAttributes};
use crate::vocabulary::{Policy, Vocabulary};

/// The reserved compact-name prefix, resolved directly against the core
/// RDF vocabulary during expansion.
pub const RESERVED_PREFIX: &str = "rdf";

/// Base identifier of the core RDF vocabulary.
pub const RDF_BASE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// Base identifier of the RDF Schema vocabulary.
pub const RDFS_BASE: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// Canonical predicate for the `type` attribute key.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// Canonical predicate for the `label` attribute key.
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
/// Canonical predicate for the `comment` attribute key.
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
/// Canonical predicate for the `subClassOf` attribute key.
pub const RDFS_SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
/// Canonical predicate for the `subPropertyOf` attribute key.
pub const RDFS_SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
/// Canonical predicate for the `domain` attribute key.
pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
/// Canonical predicate for the `range` attribute key.
pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

/// The fixed predicate for a well-known attribute key; `None` for
/// arbitrary keys, which expand through the registry instead.
pub fn canonical_predicate(key: &AttributeKey) -> Option<&'static str> {
    match key {
        AttributeKey::Label => Some(RDFS_LABEL),
        AttributeKey::Comment => Some(RDFS_COMMENT),
        AttributeKey::Type => Some(RDF_TYPE),
        AttributeKey::SubClassOf => Some(RDFS_SUB_CLASS_OF),
        AttributeKey::SubPropertyOf => Some(RDFS_SUB_PROPERTY_OF),
        AttributeKey::Domain => Some(RDFS_DOMAIN),
        AttributeKey::Range => Some(RDFS_RANGE),
        AttributeKey::Other(_) => None,
    }
}

/// Classify a predicate back into a well-known attribute key by exact
/// identifier match; `None` for anything outside the seven.
pub fn well_known_key(predicate: &str) -> Option<AttributeKey> {
    match predicate {
        RDFS_LABEL => Some(AttributeKey::Label),
        RDFS_COMMENT => Some(AttributeKey::Comment),
        RDF_TYPE => Some(AttributeKey::Type),
        RDFS_SUB_CLASS_OF => Some(AttributeKey::SubClassOf),
        RDFS_SUB_PROPERTY_OF => Some(AttributeKey::SubPropertyOf),
        RDFS_DOMAIN => Some(AttributeKey::Domain),
        RDFS_RANGE => Some(AttributeKey::Range),
        _ => None,
    }
}

/// Construct and register the core RDF vocabulary.
pub fn rdf_vocabulary(registry: &Registry) -> Arc<Vocabulary> {
    let property = |label: &str| {
        TermAttributes::new()
            .label(label)
            .ty("rdf:Property")
            .other("rdfs:isDefinedBy", "rdf:")
    };
    Vocabulary::builder(RDF_BASE)
        .name("RDF")
        .policy(Policy::Closed)
        .term(
            "type",
            TermAttributes::new()
                .label("type")
                .comment("The subject is an instance of a class.")
                .ty("rdf:Property")
                .range("rdfs:Class"),
        )
        .term(
            "Property",
            TermAttributes::new()
                .label("Property")
                .comment("The class of RDF properties.")
                .ty("rdfs:Class")
                .sub_class_of("rdfs:Resource"),
        )
        .term(
            "Statement",
            TermAttributes::new()
                .label("Statement")
                .comment("The class of RDF statements.")
                .ty("rdfs:Class"),
        )
        .term("subject", property("subject"))
        .term("predicate", property("predicate"))
        .term("object", property("object"))
        .term("value", property("value"))
        .term("first", property("first"))
        .term("rest", property("rest"))
        .term(
            "nil",
            TermAttributes::new()
                .label("nil")
                .comment("The empty list.")
                .ty("rdf:List"),
        )
        .term(
            "List",
            TermAttributes::new().label("List").ty("rdfs:Class"),
        )
        .term("Bag", TermAttributes::new().label("Bag").ty("rdfs:Class"))
        .term("Seq", TermAttributes::new().label("Seq").ty("rdfs:Class"))
        .term("Alt", TermAttributes::new().label("Alt").ty("rdfs:Class"))
        .term(
            "langString",
            TermAttributes::new()
                .label("langString")
                .comment("The datatype of language-tagged string values.")
                .ty("rdfs:Datatype"),
        )
        .term(
            "XMLLiteral",
            TermAttributes::new()
                .label("XMLLiteral")
                .ty("rdfs:Datatype"),
        )
        .term("HTML", TermAttributes::new().label("HTML").ty("rdfs:Datatype"))
        .register(registry)
}

/// Construct and register the RDF Schema vocabulary.
pub fn rdfs_vocabulary(registry: &Registry) -> Arc<Vocabulary> {
    let class = |label: &str, comment: &str| {
        TermAttributes::new()
            .label(label)
            .comment(comment)
            .ty("rdfs:Class")
    };
    let property = |label: &str, comment: &str| {
        TermAttributes::new()
            .label(label)
            .comment(comment)
            .ty("rdf:Property")
    };
    Vocabulary::builder(RDFS_BASE)
        .name("RDFS")
        .policy(Policy::Closed)
        .term("Resource", class("Resource", "The class resource, everything."))
        .term(
            "Class",
            class("Class", "The class of classes.").sub_class_of("rdfs:Resource"),
        )
        .term(
            "Literal",
            class("Literal", "The class of literal values.").sub_class_of("rdfs:Resource"),
        )
        .term(
            "Datatype",
            class("Datatype", "The class of RDF datatypes.").sub_class_of("rdfs:Class"),
        )
        .term("Container", class("Container", "The class of RDF containers."))
        .term(
            "ContainerMembershipProperty",
            class(
                "ContainerMembershipProperty",
                "The class of container membership properties.",
            )
            .sub_class_of("rdf:Property"),
        )
        .term(
            "label",
            property("label", "A human-readable name for the subject.")
                .domain("rdfs:Resource")
                .range("rdfs:Literal"),
        )
        .term(
            "comment",
            property("comment", "A description of the subject resource.")
                .domain("rdfs:Resource")
                .range("rdfs:Literal"),
        )
        .term(
            "subClassOf",
            property("subClassOf", "The subject is a subclass of a class.")
                .domain("rdfs:Class")
                .range("rdfs:Class"),
        )
        .term(
            "subPropertyOf",
            property("subPropertyOf", "The subject is a subproperty of a property.")
                .domain("rdf:Property")
                .range("rdf:Property"),
        )
        .term(
            "domain",
            property("domain", "A domain of the subject property.")
                .domain("rdf:Property")
                .range("rdfs:Class"),
        )
        .term(
            "range",
            property("range", "A range of the subject property.")
                .domain("rdf:Property")
                .range("rdfs:Class"),
        )
        .term("seeAlso", property("seeAlso", "Further information about the subject."))
        .term(
            "isDefinedBy",
            property("isDefinedBy", "The definition of the subject resource.")
                .sub_property_of("rdfs:seeAlso"),
        )
        .term("member", property("member", "A member of the subject resource."))
        .register(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_mapping_round_trips() {
        for key in [
            AttributeKey::Label,
            AttributeKey::Comment,
            AttributeKey::Type,
            AttributeKey::SubClassOf,
            AttributeKey::SubPropertyOf,
            AttributeKey::Domain,
            AttributeKey::Range,
        ] {
            let predicate = canonical_predicate(&key).unwrap();
            assert_eq!(well_known_key(predicate), Some(key));
        }
        assert_eq!(canonical_predicate(&AttributeKey::Other("x:y".into())), None);
        assert_eq!(well_known_key("http://example/ns#custom"), None);
    }

    #[test]
    fn test_core_vocabularies_are_closed_and_populated() {
        let registry = Registry::new();
        let rdf = rdf_vocabulary(&registry);
        let rdfs = rdfs_vocabulary(&registry);

        assert_eq!(rdf.prefix(), "rdf");
        assert_eq!(rdfs.prefix(), "rdfs");
        assert!(rdf.resolve("type").is_ok());
        assert!(rdf.resolve("bogus").is_err());

        let class = rdfs.resolve("Class").unwrap();
        assert!(class.is_class());
        assert_eq!(rdfs.label_for("subClassOf"), "subClassOf");
    }
}
