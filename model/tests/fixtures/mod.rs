//! Shape-graph fixtures for model builder tests.
//!
//! Each constant holds a Turtle body without `@prefix` lines; [`graph`]
//! prepends [`PREFIXES`] before parsing.

#![allow(dead_code, unused_imports)]

mod abstract_classes;
mod individuals;
mod inheritance;
mod invalid;
mod jsonld;
mod properties;

pub use abstract_classes::ABSTRACT_CLASSES;
pub use individuals::{INDIVIDUALS, OUTSIDE_CLASS_IRI};
pub use inheritance::{INHERITANCE, REVERSED_PAIR};
pub use invalid::{
    BAD_COUNT, BAD_NODE_KIND, BROKEN_IN_LIST, CYCLE, MISSING_PATH, MISSING_RANGE,
    PATTERN_ON_CLASS, PATTERN_ON_INTEGER, UNKNOWN_CLASS,
};
pub use jsonld::JSONLD_SCHEMA;
pub use properties::PROPERTIES;

use shaclc_model::{ContextResolver, Graph};

/// Prefixes shared by every fixture.
pub const PREFIXES: &str = r#"
@prefix rdf:  <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix sh:   <http://www.w3.org/ns/shacl#> .
@prefix xsd:  <http://www.w3.org/2001/XMLSchema#> .
@prefix s2c:  <https://jpewdev.github.io/shacl2code/schema#> .
@prefix ex:   <http://example.org/schema/> .
"#;

/// JSON-LD context used alongside the fixtures.
pub const CONTEXT: &str = r#"{
  "@context": {
    "ex": "http://example.org/schema/",
    "xsd": "http://www.w3.org/2001/XMLSchema#",
    "title": {
      "@id": "ex:title",
      "@type": "xsd:string"
    }
  }
}"#;

/// Namespace of the fixture schemas.
pub const EX: &str = "http://example.org/schema/";

/// Returns `EX` + `local`.
pub fn ex(local: &str) -> String {
    format!("{EX}{local}")
}

/// Parses a fixture body.
pub fn graph(body: &str) -> Graph {
    Graph::from_turtle(&format!("{PREFIXES}{body}")).expect("fixture must be valid Turtle")
}

/// A resolver over [`CONTEXT`].
pub fn context() -> ContextResolver {
    let doc: serde_json::Value = serde_json::from_str(CONTEXT).expect("fixture context is JSON");
    ContextResolver::from_json_documents(&[doc]).expect("fixture context is valid")
}
