//! Error types for context parsing, graph loading, and model construction.
//!
//! Resolution itself never fails: identifiers with no applicable context
//! entry pass through unchanged. Everything that can go wrong happens while
//! reading inputs or while lowering the shape graph into the IR, and every
//! variant names the IRI a schema author needs to go and fix.

use thiserror::Error;

/// A malformed JSON-LD context document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// The context (or one of its term definitions) has an unsupported shape.
    #[error("invalid context: {message}")]
    Invalid {
        /// What was wrong, including the offending term where known.
        message: String,
    },
}

/// A failure while parsing or walking an RDF graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The Turtle / N-Triples source could not be parsed.
    #[error("failed to parse RDF: {message}")]
    Parse {
        /// Parser diagnostic.
        message: String,
    },

    /// An `rdf:first`/`rdf:rest` collection is broken or cyclic.
    #[error("malformed RDF list at {node}")]
    MalformedList {
        /// The list node where the walk failed.
        node: String,
    },
}

/// A schema-level problem found while building the IR.
///
/// All model errors are fatal to the compiler invocation; no partial model
/// is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// No `sh:class`, `sh:in`, `sh:datatype`, or `rdfs:range` applies.
    #[error("unable to determine range of property {property} in {class}")]
    MissingRange {
        /// Owning class IRI.
        class: String,
        /// Property path IRI.
        property: String,
    },

    /// `sh:class` names something that is not a known class.
    #[error("unknown class {target} referenced by property {property} in {class}")]
    UnknownClass {
        /// Owning class IRI.
        class: String,
        /// Property path IRI.
        property: String,
        /// The `sh:class` target.
        target: String,
    },

    /// `sh:nodeKind` is not one of `sh:IRI`, `sh:BlankNode`, `sh:BlankNodeOrIRI`.
    #[error("unsupported node kind {value} for class {class}")]
    UnsupportedNodeKind {
        /// Class IRI.
        class: String,
        /// The offending value.
        value: String,
    },

    /// `sh:pattern` on a property whose range is not string-like.
    #[error("pattern is not allowed on property {property} in {class} (range {range})")]
    PatternNotAllowed {
        /// Owning class IRI.
        class: String,
        /// Property path IRI.
        property: String,
        /// The resolved range, rendered for display.
        range: String,
    },

    /// A property shape without an IRI `sh:path`.
    #[error("property shape {shape} in {class} has no IRI sh:path")]
    MissingPath {
        /// Owning class IRI.
        class: String,
        /// The shape node.
        shape: String,
    },

    /// A literal that should be an integer or boolean is not.
    #[error("invalid value {value:?} for {predicate} on {subject}")]
    InvalidLiteral {
        /// Subject the literal is attached to.
        subject: String,
        /// Predicate IRI.
        predicate: String,
        /// Lexical form found.
        value: String,
    },

    /// An `sh:in` list could not be walked.
    #[error("malformed sh:in list on property {property} in {class}: {source}")]
    MalformedList {
        /// Owning class IRI.
        class: String,
        /// Property path IRI.
        property: String,
        /// Underlying graph error.
        source: GraphError,
    },

    /// `rdfs:subClassOf` forms a cycle among known classes.
    #[error("inheritance cycle between classes: {}", classes.join(", "))]
    InheritanceCycle {
        /// Classes that could not be ordered.
        classes: Vec<String>,
    },
}
