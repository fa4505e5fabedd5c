//! SHACL/OWL schema compiler core.
//!
//! The `shaclc-model` crate turns a SHACL shape graph layered over an OWL
//! class hierarchy into an ordered, fully resolved intermediate
//! representation that code generators can iterate directly.
//!
//! - [`context`]: JSON-LD term expansion and compaction.
//! - [`graph`]: an owned RDF graph loaded from Turtle or N-Triples.
//! - [`builder`]: lowers the graph into a [`Model`].
//! - [`model`]: the IR types and vocabulary constants.
//!
//! # Entry Point
//!
//! ```
//! use shaclc_model::{build, ContextResolver, Graph};
//!
//! let graph = Graph::from_turtle(r#"
//!     @prefix owl: <http://www.w3.org/2002/07/owl#> .
//!     @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
//!     <http://example.org/A> a owl:Class .
//!     <http://example.org/B> a owl:Class ; rdfs:subClassOf <http://example.org/A> .
//! "#).expect("valid turtle");
//! let context = ContextResolver::new(Vec::new());
//! let model = build(&graph, &context).expect("valid schema");
//! assert_eq!(model.classes[0].id, "http://example.org/A");
//! assert_eq!(model.classes[1].id, "http://example.org/B");
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod builder;
pub mod context;
pub mod error;
pub mod graph;
pub mod model;

pub use builder::build;
pub use context::{ContextDocument, ContextResolver, VocabScope};
pub use error::{ContextError, GraphError, ModelError};
pub use graph::{Graph, Literal, Term};
pub use model::{Class, Model, NamedIndividual, NodeKind, Property, PropertyRange};
