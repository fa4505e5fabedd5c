//! Intermediate representation types.
//!
//! A [`Model`] is the ordered class list produced by
//! [`build`](crate::builder::build). Every value is owned and fully
//! resolved, so code generators iterate it without touching the graph or
//! the context again. Classes appear in dependency order: each class comes
//! after all of its parents.

use serde::Serialize;

/// How instances of a class are identified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    /// `sh:IRI`: instances must have an IRI.
    Iri,
    /// `sh:BlankNode`: instances are anonymous.
    BlankNode,
    /// `sh:BlankNodeOrIRI`: either. The default.
    #[default]
    BlankNodeOrIri,
}

impl NodeKind {
    /// Maps a SHACL node-kind IRI. Returns `None` for anything else.
    #[must_use]
    pub fn from_iri(iri: &str) -> Option<Self> {
        match iri {
            iris::sh::IRI => Some(NodeKind::Iri),
            iris::sh::BLANK_NODE => Some(NodeKind::BlankNode),
            iris::sh::BLANK_NODE_OR_IRI => Some(NodeKind::BlankNodeOrIri),
            _ => None,
        }
    }

    /// The SHACL IRI for this node kind.
    #[must_use]
    pub fn iri(self) -> &'static str {
        match self {
            NodeKind::Iri => iris::sh::IRI,
            NodeKind::BlankNode => iris::sh::BLANK_NODE,
            NodeKind::BlankNodeOrIri => iris::sh::BLANK_NODE_OR_IRI,
        }
    }
}

/// What values a property holds. Exactly one applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyRange {
    /// References to instances of the class with this IRI.
    Class(String),
    /// One of a closed, sorted set of literal strings.
    Enum(Vec<String>),
    /// Literals of this datatype IRI.
    Datatype(String),
}

/// A property owned by one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    /// Predicate IRI (`sh:path`).
    pub path: String,
    /// Predicate compacted as a vocabulary term, used as the JSON key.
    pub compact_path: String,
    /// Display / variable name (`sh:name`, else the path's local name).
    pub name: String,
    /// Doc comment.
    pub comment: Option<String>,
    /// `sh:minCount`.
    pub min_count: Option<u64>,
    /// `sh:maxCount`; `None` means unbounded.
    pub max_count: Option<u64>,
    /// Resolved range.
    pub range: PropertyRange,
    /// `sh:pattern`, only on string and date-time datatypes.
    pub pattern: Option<String>,
    /// Marked `owl:DeprecatedProperty`.
    pub deprecated: bool,
}

impl Property {
    /// The referenced class IRI, for class-valued properties.
    #[must_use]
    pub fn class_id(&self) -> Option<&str> {
        match &self.range {
            PropertyRange::Class(iri) => Some(iri),
            _ => None,
        }
    }

    /// The closed value set, for enumerated properties.
    #[must_use]
    pub fn enum_values(&self) -> Option<&[String]> {
        match &self.range {
            PropertyRange::Enum(values) => Some(values),
            _ => None,
        }
    }

    /// The datatype IRI, for literal-valued properties.
    #[must_use]
    pub fn datatype(&self) -> Option<&str> {
        match &self.range {
            PropertyRange::Datatype(iri) => Some(iri),
            _ => None,
        }
    }

    /// True unless the property holds at most one value.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.max_count != Some(1)
    }

    /// True if at least one value is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.min_count.is_some_and(|n| n > 0)
    }
}

/// A fixed, enumerable instance of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedIndividual {
    /// Absolute IRI.
    pub id: String,
    /// IRI suffix relative to the class IRI.
    pub name: String,
    /// IRI compacted as a node identifier.
    pub compact_id: String,
    /// Doc comment.
    pub comment: Option<String>,
}

/// A class in the IR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Class {
    /// Absolute IRI.
    pub id: String,
    /// Compacted display name (may contain `:`).
    pub name: String,
    /// Direct parents that are themselves known classes.
    pub parent_ids: Vec<String>,
    /// Direct children, sorted.
    pub derived_ids: Vec<String>,
    /// Properties, sorted by path.
    pub properties: Vec<Property>,
    /// Doc comment.
    pub comment: Option<String>,
    /// Alias for the `@id` key, inherited from the nearest ancestor.
    pub id_property: Option<String>,
    /// Inherited from the nearest ancestor; defaults to `BlankNodeOrIri`.
    pub node_kind: NodeKind,
    /// Tolerates unknown properties. Inherited.
    pub is_extensible: bool,
    /// May not be instantiated directly.
    pub is_abstract: bool,
    /// Typed `owl:DeprecatedClass`.
    pub deprecated: bool,
    /// Named individuals of this class, sorted by IRI.
    pub named_individuals: Vec<NamedIndividual>,
}

impl Class {
    /// The display name split on `:`, for building target identifiers.
    #[must_use]
    pub fn name_parts(&self) -> Vec<&str> {
        self.name.split(':').filter(|part| !part.is_empty()).collect()
    }

    /// Looks up an own property by path IRI.
    #[must_use]
    pub fn find_property(&self, path: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.path == path)
    }
}

/// The complete IR for one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    /// Classes in dependency order.
    pub classes: Vec<Class>,
}

impl Model {
    /// Looks up a class by its IRI. Returns `None` if not found.
    #[must_use]
    pub fn find_class(&self, iri: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == iri)
    }

    /// Position of a class in the dependency order.
    #[must_use]
    pub fn position(&self, iri: &str) -> Option<usize> {
        self.classes.iter().position(|c| c.id == iri)
    }

    /// Returns the number of classes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns the total number of properties across all classes.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.classes.iter().map(|c| c.properties.len()).sum()
    }

    /// Returns the total number of named individuals across all classes.
    #[must_use]
    pub fn individual_count(&self) -> usize {
        self.classes.iter().map(|c| c.named_individuals.len()).sum()
    }
}

/// Longest common prefix of `items`, by characters.
#[must_use]
pub fn common_prefix(items: &[&str]) -> String {
    let Some((first, rest)) = items.split_first() else {
        return String::new();
    };
    let mut len = first.len();
    for item in rest {
        len = first
            .char_indices()
            .zip(item.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((i, a), _)| i + a.len_utf8())
            .min(len);
    }
    first[..len].to_string()
}

/// Extracts the local name from an IRI (the part after the last `/` or `#`).
#[must_use]
pub fn local_name(iri: &str) -> &str {
    iri.rsplit(['/', '#']).next().unwrap_or(iri)
}

/// Vocabulary IRI constants.
pub mod iris {
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// SHACL namespace.
    pub const SH: &str = "http://www.w3.org/ns/shacl#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    /// Compiler extension namespace.
    pub const SHACL2CODE: &str = "https://jpewdev.github.io/shacl2code/schema#";

    /// `rdf:` terms.
    pub mod rdf {
        /// `rdf:type`.
        pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
        /// `rdf:first`.
        pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
        /// `rdf:rest`.
        pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
        /// `rdf:nil`.
        pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    }

    /// `rdfs:` terms.
    pub mod rdfs {
        /// `rdfs:subClassOf`.
        pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
        /// `rdfs:range`.
        pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
        /// `rdfs:comment`.
        pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    }

    /// `owl:` terms.
    pub mod owl {
        /// `owl:Class`.
        pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
        /// `owl:DeprecatedClass`.
        pub const DEPRECATED_CLASS: &str = "http://www.w3.org/2002/07/owl#DeprecatedClass";
        /// `owl:DeprecatedProperty`.
        pub const DEPRECATED_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DeprecatedProperty";
        /// `owl:NamedIndividual`.
        pub const NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";
    }

    /// `sh:` terms.
    pub mod sh {
        /// `sh:property`.
        pub const PROPERTY: &str = "http://www.w3.org/ns/shacl#property";
        /// `sh:path`.
        pub const PATH: &str = "http://www.w3.org/ns/shacl#path";
        /// `sh:name`.
        pub const NAME: &str = "http://www.w3.org/ns/shacl#name";
        /// `sh:class`.
        pub const CLASS: &str = "http://www.w3.org/ns/shacl#class";
        /// `sh:datatype`.
        pub const DATATYPE: &str = "http://www.w3.org/ns/shacl#datatype";
        /// `sh:in`.
        pub const IN: &str = "http://www.w3.org/ns/shacl#in";
        /// `sh:pattern`.
        pub const PATTERN: &str = "http://www.w3.org/ns/shacl#pattern";
        /// `sh:minCount`.
        pub const MIN_COUNT: &str = "http://www.w3.org/ns/shacl#minCount";
        /// `sh:maxCount`.
        pub const MAX_COUNT: &str = "http://www.w3.org/ns/shacl#maxCount";
        /// `sh:nodeKind`.
        pub const NODE_KIND: &str = "http://www.w3.org/ns/shacl#nodeKind";
        /// `sh:not`.
        pub const NOT: &str = "http://www.w3.org/ns/shacl#not";
        /// `sh:hasValue`.
        pub const HAS_VALUE: &str = "http://www.w3.org/ns/shacl#hasValue";
        /// `sh:IRI`.
        pub const IRI: &str = "http://www.w3.org/ns/shacl#IRI";
        /// `sh:BlankNode`.
        pub const BLANK_NODE: &str = "http://www.w3.org/ns/shacl#BlankNode";
        /// `sh:BlankNodeOrIRI`.
        pub const BLANK_NODE_OR_IRI: &str = "http://www.w3.org/ns/shacl#BlankNodeOrIRI";
    }

    /// `xsd:` datatypes.
    pub mod xsd {
        /// `xsd:string`.
        pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
        /// `xsd:anyURI`.
        pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
        /// `xsd:dateTime`.
        pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
        /// `xsd:dateTimeStamp`.
        pub const DATE_TIME_STAMP: &str = "http://www.w3.org/2001/XMLSchema#dateTimeStamp";
        /// `xsd:integer`.
        pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
        /// `xsd:nonNegativeInteger`.
        pub const NON_NEGATIVE_INTEGER: &str =
            "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
        /// `xsd:positiveInteger`.
        pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
        /// `xsd:decimal`.
        pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
        /// `xsd:boolean`.
        pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    }

    /// Extension terms understood by the compiler.
    pub mod shacl2code {
        /// Alias name for the `@id` key of a class's instances.
        pub const ID_PROPERTY_NAME: &str =
            "https://jpewdev.github.io/shacl2code/schema#idPropertyName";
        /// Instances may carry properties the schema does not declare.
        pub const IS_EXTENSIBLE: &str = "https://jpewdev.github.io/shacl2code/schema#isExtensible";
        /// The class may not be instantiated.
        pub const IS_ABSTRACT: &str = "https://jpewdev.github.io/shacl2code/schema#isAbstract";
        /// Legacy type marker for abstract classes.
        pub const ABSTRACT_CLASS: &str =
            "https://jpewdev.github.io/shacl2code/schema#AbstractClass";
    }
}
