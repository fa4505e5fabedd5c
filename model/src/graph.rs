//! A small in-memory triple store for shape graphs.
//!
//! Turtle and N-Triples are parsed with `sophia_turtle`, JSON-LD with
//! `sophia_jsonld` (inline contexts only; remote contexts are not
//! fetched). The triples are
//! then copied into owned [`Term`]s indexed by subject, which is all the
//! model builder needs to answer "objects of (s, p)" and "subjects of
//! (p, o)" queries.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use sophia_api::parser::QuadParser as _;
use sophia_api::quad::Quad as _;
use sophia_api::source::{QuadSource, TripleSource};
use sophia_api::term::TermKind;
use sophia_api::triple::Triple as _;

use crate::error::GraphError;
use crate::model::iris::rdf;

/// An RDF literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    /// Lexical form.
    pub value: String,
    /// Datatype IRI, if the source carried one.
    pub datatype: Option<String>,
    /// Language tag, if any.
    pub language: Option<String>,
}

/// An RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// An absolute IRI.
    Iri(String),
    /// A blank node, by label (without `_:`).
    BlankNode(String),
    /// A literal.
    Literal(Literal),
}

impl Term {
    /// Builds an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Builds a plain string literal.
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: None,
            language: None,
        })
    }

    /// The IRI, if this is an IRI term.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// The literal, if this is a literal term.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// The IRI or lexical form; blank nodes render as `_:label`.
    #[must_use]
    pub fn as_str_lossy(&self) -> String {
        match self {
            Term::Iri(iri) => iri.clone(),
            Term::BlankNode(id) => format!("_:{id}"),
            Term::Literal(lit) => lit.value.clone(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(id) => write!(f, "_:{id}"),
            Term::Literal(lit) => {
                write!(f, "{:?}", lit.value)?;
                if let Some(lang) = &lit.language {
                    write!(f, "@{lang}")
                } else if let Some(dt) = &lit.datatype {
                    write!(f, "^^<{dt}>")
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// An owned RDF graph with a subject index.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: Vec<(Term, String, Term)>,
    by_subject: HashMap<Term, Vec<usize>>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a Turtle document.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Parse`] on syntax errors.
    pub fn from_turtle(source: &str) -> Result<Self, GraphError> {
        let mut graph = Graph::new();
        sophia_turtle::parser::turtle::parse_str(source)
            .for_each_triple(|t| graph.insert_sophia(t.s(), t.p(), t.o()))
            .map_err(|e| GraphError::Parse {
                message: e.to_string(),
            })?;
        tracing::debug!(triples = graph.len(), "parsed turtle");
        Ok(graph)
    }

    /// Parses an N-Triples document.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Parse`] on syntax errors.
    pub fn from_ntriples(source: &str) -> Result<Self, GraphError> {
        let mut graph = Graph::new();
        sophia_turtle::parser::nt::parse_str(source)
            .for_each_triple(|t| graph.insert_sophia(t.s(), t.p(), t.o()))
            .map_err(|e| GraphError::Parse {
                message: e.to_string(),
            })?;
        tracing::debug!(triples = graph.len(), "parsed n-triples");
        Ok(graph)
    }

    /// Parses a JSON-LD document. Quads in named graphs are merged into
    /// the default graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Parse`] on invalid JSON or JSON-LD, including
    /// references to remote contexts.
    pub fn from_jsonld(source: &str) -> Result<Self, GraphError> {
        let mut graph = Graph::new();
        sophia_jsonld::JsonLdParser::new()
            .parse_str(source)
            .for_each_quad(|q| graph.insert_sophia(q.s(), q.p(), q.o()))
            .map_err(|e| GraphError::Parse {
                message: e.to_string(),
            })?;
        tracing::debug!(triples = graph.len(), "parsed json-ld");
        Ok(graph)
    }

    fn insert_sophia<S, P, O>(&mut self, s: S, p: P, o: O)
    where
        S: sophia_api::term::Term,
        P: sophia_api::term::Term,
        O: sophia_api::term::Term,
    {
        let (Some(s), Some(p), Some(o)) = (convert(s), convert(p), convert(o)) else {
            return;
        };
        if let Term::Iri(p) = p {
            self.insert(s, p, o);
        }
    }

    /// Adds a triple. Duplicates are ignored.
    pub fn insert(&mut self, subject: Term, predicate: impl Into<String>, object: Term) {
        let predicate = predicate.into();
        let index = self.by_subject.entry(subject.clone()).or_default();
        if index
            .iter()
            .any(|&i| self.triples[i].1 == predicate && self.triples[i].2 == object)
        {
            return;
        }
        index.push(self.triples.len());
        self.triples.push((subject, predicate, object));
    }

    /// Number of triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the graph holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// All triples, in insertion order.
    pub fn triples(&self) -> impl Iterator<Item = (&Term, &str, &Term)> {
        self.triples.iter().map(|(s, p, o)| (s, p.as_str(), o))
    }

    /// Objects of `(subject, predicate, ?)`, in insertion order.
    pub fn objects<'a, 'p>(
        &'a self,
        subject: &Term,
        predicate: &'p str,
    ) -> impl Iterator<Item = &'a Term> + 'p
    where
        'a: 'p,
    {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .map(move |&i| &self.triples[i])
            .filter(move |(_, p, _)| p == predicate)
            .map(|(_, _, o)| o)
    }

    /// The first object of `(subject, predicate, ?)`.
    #[must_use]
    pub fn value(&self, subject: &Term, predicate: &str) -> Option<&Term> {
        self.objects(subject, predicate).next()
    }

    /// Distinct subjects of `(?, predicate, object)`, sorted.
    #[must_use]
    pub fn subjects(&self, predicate: &str, object: &Term) -> Vec<&Term> {
        let found: BTreeSet<&Term> = self
            .triples
            .iter()
            .filter(|(_, p, o)| p == predicate && o == object)
            .map(|(s, _, _)| s)
            .collect();
        found.into_iter().collect()
    }

    /// Returns true if the triple is present.
    #[must_use]
    pub fn contains(&self, subject: &Term, predicate: &str, object: &Term) -> bool {
        self.objects(subject, predicate).any(|o| o == object)
    }

    /// Walks an `rdf:first`/`rdf:rest` collection starting at `head`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MalformedList`] if a node lacks `rdf:first` or
    /// `rdf:rest`, or if the list loops back on itself.
    pub fn list(&self, head: &Term) -> Result<Vec<Term>, GraphError> {
        let nil = Term::iri(rdf::NIL);
        let mut items = Vec::new();
        let mut seen = BTreeSet::new();
        let mut node = head.clone();
        while node != nil {
            if !seen.insert(node.clone()) {
                return Err(GraphError::MalformedList {
                    node: node.as_str_lossy(),
                });
            }
            let (Some(first), Some(rest)) = (self.value(&node, rdf::FIRST), self.value(&node, rdf::REST))
            else {
                return Err(GraphError::MalformedList {
                    node: node.as_str_lossy(),
                });
            };
            items.push(first.clone());
            node = rest.clone();
        }
        Ok(items)
    }
}

fn convert<T: sophia_api::term::Term>(term: T) -> Option<Term> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| Term::Iri(iri.as_str().to_string())),
        TermKind::BlankNode => term
            .bnode_id()
            .map(|id| Term::BlankNode(id.as_str().to_string())),
        TermKind::Literal => {
            let value = term.lexical_form()?.to_string();
            let language = term.language_tag().map(|tag| tag.as_str().to_string());
            let datatype = term.datatype().map(|dt| dt.as_str().to_string());
            Some(Term::Literal(Literal {
                value,
                datatype,
                language,
            }))
        }
        _ => None,
    }
}
