//! Lowers a SHACL/OWL shape graph into the [`Model`] IR.
//!
//! The builder runs in four passes:
//!
//! 1. Discover classes (`owl:Class`, `owl:DeprecatedClass`) and the named
//!    individuals typed with them.
//! 2. Build each class: parents, inherited attributes, abstractness, and
//!    its property shapes with resolved ranges.
//! 3. Fill `derived_ids` as the inverse of `parent_ids`.
//! 4. Order classes so every parent precedes its children.
//!
//! Any schema problem aborts the build with a [`ModelError`].

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use tracing::{debug, info};

use crate::context::ContextResolver;
use crate::error::ModelError;
use crate::graph::{Graph, Term};
use crate::model::iris::{owl, rdf, rdfs, sh, shacl2code, xsd};
use crate::model::{local_name, Class, Model, NamedIndividual, NodeKind, Property, PropertyRange};

/// Datatypes a `sh:pattern` may constrain.
const PATTERN_DATATYPES: &[&str] = &[
    xsd::STRING,
    xsd::ANY_URI,
    xsd::DATE_TIME,
    xsd::DATE_TIME_STAMP,
];

/// Builds the IR for every class in `graph`.
///
/// Class names and property keys are compacted through `context`; named
/// individual identifiers are compacted as node ids.
///
/// # Errors
///
/// Returns a [`ModelError`] naming the offending class or property when a
/// range cannot be resolved, a node kind or literal is invalid, a pattern
/// sits on a non-string property, or the class hierarchy is cyclic.
pub fn build(graph: &Graph, context: &ContextResolver) -> Result<Model, ModelError> {
    let builder = Builder::new(graph, context);
    let mut individuals = builder.discover_individuals();

    let mut classes = BTreeMap::new();
    for iri in &builder.classes {
        let named = individuals.remove(iri).unwrap_or_default();
        let class = builder.build_class(iri, named)?;
        debug!(
            class = %class.id,
            name = %class.name,
            properties = class.properties.len(),
            "built class"
        );
        classes.insert(iri.clone(), class);
    }

    let mut derived: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for class in classes.values() {
        for parent in &class.parent_ids {
            derived
                .entry(parent.clone())
                .or_default()
                .push(class.id.clone());
        }
    }
    for (parent, mut children) in derived {
        children.sort();
        if let Some(class) = classes.get_mut(&parent) {
            class.derived_ids = children;
        }
    }

    let model = Model {
        classes: dependency_order(classes)?,
    };
    info!(
        classes = model.class_count(),
        properties = model.property_count(),
        individuals = model.individual_count(),
        "built model"
    );
    Ok(model)
}

struct Builder<'a> {
    graph: &'a Graph,
    context: &'a ContextResolver,
    classes: BTreeSet<String>,
}

impl<'a> Builder<'a> {
    fn new(graph: &'a Graph, context: &'a ContextResolver) -> Self {
        let classes = [owl::CLASS, owl::DEPRECATED_CLASS]
            .into_iter()
            .flat_map(|ty| graph.subjects(rdf::TYPE, &Term::iri(ty)))
            .filter_map(Term::as_iri)
            .map(str::to_string)
            .collect();
        Self {
            graph,
            context,
            classes,
        }
    }

    fn is_class(&self, iri: &str) -> bool {
        self.classes.contains(iri)
    }

    /// Named individuals keyed by class IRI, each list sorted by IRI.
    fn discover_individuals(&self) -> BTreeMap<String, Vec<NamedIndividual>> {
        let mut found: BTreeMap<String, Vec<NamedIndividual>> = BTreeMap::new();
        for subject in self
            .graph
            .subjects(rdf::TYPE, &Term::iri(owl::NAMED_INDIVIDUAL))
        {
            let Some(id) = subject.as_iri() else {
                continue;
            };
            for ty in self.graph.objects(subject, rdf::TYPE) {
                let Some(class) = ty.as_iri().filter(|c| self.is_class(c)) else {
                    continue;
                };
                let name = id
                    .strip_prefix(class)
                    .filter(|rest| rest.starts_with(['/', '#']))
                    .map(|rest| rest.trim_start_matches(['/', '#']))
                    .filter(|rest| !rest.is_empty())
                    .unwrap_or_else(|| local_name(id));
                found
                    .entry(class.to_string())
                    .or_default()
                    .push(NamedIndividual {
                        id: id.to_string(),
                        name: name.to_string(),
                        compact_id: self.context.compact_id(id),
                        comment: self.literal(subject, rdfs::COMMENT),
                    });
            }
        }
        // `subjects` is already sorted, so each list is too.
        found
    }

    fn build_class(
        &self,
        iri: &str,
        named_individuals: Vec<NamedIndividual>,
    ) -> Result<Class, ModelError> {
        let node = Term::iri(iri);

        let mut parent_ids: Vec<String> = Vec::new();
        for parent in self.graph.objects(&node, rdfs::SUB_CLASS_OF) {
            if let Some(parent) = parent.as_iri().filter(|p| *p != iri && self.is_class(p)) {
                if !parent_ids.iter().any(|p| p == parent) {
                    parent_ids.push(parent.to_string());
                }
            }
        }

        let node_kind = self
            .inherited(iri, |class| self.node_kind(iri, class))?
            .unwrap_or_default();
        let id_property =
            self.inherited(iri, |class| Ok(self.literal(class, shacl2code::ID_PROPERTY_NAME)))?;
        let is_extensible = self
            .inherited(iri, |class| self.boolean(class, shacl2code::IS_EXTENSIBLE))?
            .unwrap_or(false);

        let mut is_abstract = self.boolean(&node, shacl2code::IS_ABSTRACT)? == Some(true)
            || self
                .graph
                .contains(&node, rdf::TYPE, &Term::iri(shacl2code::ABSTRACT_CLASS));

        let mut properties = Vec::new();
        for shape in self.graph.objects(&node, sh::PROPERTY) {
            let path = match self.graph.value(shape, sh::PATH) {
                Some(Term::Iri(path)) => path.as_str(),
                _ => {
                    return Err(ModelError::MissingPath {
                        class: iri.to_string(),
                        shape: shape.as_str_lossy(),
                    })
                }
            };
            if path == rdf::TYPE {
                is_abstract |= self.forbids_own_type(shape, &node);
                continue;
            }
            properties.push(self.build_property(iri, shape, path)?);
        }
        properties.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(Class {
            id: iri.to_string(),
            name: self.context.compact_vocab(iri, None),
            parent_ids,
            derived_ids: Vec::new(),
            properties,
            comment: self.literal(&node, rdfs::COMMENT),
            id_property,
            node_kind,
            is_extensible,
            is_abstract,
            deprecated: self
                .graph
                .contains(&node, rdf::TYPE, &Term::iri(owl::DEPRECATED_CLASS)),
            named_individuals,
        })
    }

    /// `sh:path rdf:type ; sh:not [ sh:hasValue <own IRI> ]`
    fn forbids_own_type(&self, shape: &Term, class: &Term) -> bool {
        self.graph
            .objects(shape, sh::NOT)
            .any(|not| self.graph.contains(not, sh::HAS_VALUE, class))
    }

    fn build_property(&self, class: &str, shape: &Term, path: &str) -> Result<Property, ModelError> {
        let path_node = Term::iri(path);
        let range = self.resolve_range(class, shape, path)?;

        let pattern = self.literal(shape, sh::PATTERN);
        if pattern.is_some() {
            let eligible = matches!(&range, PropertyRange::Datatype(dt) if PATTERN_DATATYPES.contains(&dt.as_str()));
            if !eligible {
                return Err(ModelError::PatternNotAllowed {
                    class: class.to_string(),
                    property: path.to_string(),
                    range: describe_range(&range),
                });
            }
        }

        Ok(Property {
            path: path.to_string(),
            compact_path: self.context.compact_vocab(path, None),
            name: self
                .literal(shape, sh::NAME)
                .unwrap_or_else(|| local_name(path).to_string()),
            comment: self
                .literal(&path_node, rdfs::COMMENT)
                .or_else(|| self.literal(shape, rdfs::COMMENT)),
            min_count: self.count(shape, sh::MIN_COUNT)?,
            max_count: self.count(shape, sh::MAX_COUNT)?,
            range,
            pattern,
            deprecated: self
                .graph
                .contains(&path_node, rdf::TYPE, &Term::iri(owl::DEPRECATED_PROPERTY)),
        })
    }

    /// `sh:class`, then `sh:in`, then `sh:datatype`, then `rdfs:range`.
    fn resolve_range(
        &self,
        class: &str,
        shape: &Term,
        path: &str,
    ) -> Result<PropertyRange, ModelError> {
        if let Some(target) = self.graph.value(shape, sh::CLASS) {
            return match target.as_iri().filter(|t| self.is_class(t)) {
                Some(target) => Ok(PropertyRange::Class(target.to_string())),
                None => Err(ModelError::UnknownClass {
                    class: class.to_string(),
                    property: path.to_string(),
                    target: target.as_str_lossy(),
                }),
            };
        }

        if let Some(head) = self.graph.value(shape, sh::IN) {
            let items = self
                .graph
                .list(head)
                .map_err(|source| ModelError::MalformedList {
                    class: class.to_string(),
                    property: path.to_string(),
                    source,
                })?;
            let mut values: Vec<String> = items.iter().map(Term::as_str_lossy).collect();
            values.sort();
            values.dedup();
            return Ok(PropertyRange::Enum(values));
        }

        if let Some(datatype) = self.graph.value(shape, sh::DATATYPE).and_then(Term::as_iri) {
            return Ok(PropertyRange::Datatype(datatype.to_string()));
        }

        if let Some(range) = self
            .graph
            .value(&Term::iri(path), rdfs::RANGE)
            .and_then(Term::as_iri)
        {
            return Ok(if self.is_class(range) {
                PropertyRange::Class(range.to_string())
            } else {
                PropertyRange::Datatype(range.to_string())
            });
        }

        Err(ModelError::MissingRange {
            class: class.to_string(),
            property: path.to_string(),
        })
    }

    /// Walks `rdfs:subClassOf` breadth-first from `iri` and returns the
    /// first value `lookup` finds.
    fn inherited<T>(
        &self,
        iri: &str,
        lookup: impl Fn(&Term) -> Result<Option<T>, ModelError>,
    ) -> Result<Option<T>, ModelError> {
        let mut queue = VecDeque::from([Term::iri(iri)]);
        let mut visited = HashSet::new();
        while let Some(class) = queue.pop_front() {
            if !visited.insert(class.clone()) {
                continue;
            }
            if let Some(found) = lookup(&class)? {
                return Ok(Some(found));
            }
            queue.extend(
                self.graph
                    .objects(&class, rdfs::SUB_CLASS_OF)
                    .filter(|parent| parent.as_iri().is_some())
                    .cloned(),
            );
        }
        Ok(None)
    }

    fn node_kind(&self, class: &str, node: &Term) -> Result<Option<NodeKind>, ModelError> {
        let Some(value) = self.graph.value(node, sh::NODE_KIND) else {
            return Ok(None);
        };
        value
            .as_iri()
            .and_then(NodeKind::from_iri)
            .map(Some)
            .ok_or_else(|| ModelError::UnsupportedNodeKind {
                class: class.to_string(),
                value: value.as_str_lossy(),
            })
    }

    fn literal(&self, subject: &Term, predicate: &str) -> Option<String> {
        self.graph
            .value(subject, predicate)
            .and_then(Term::as_literal)
            .map(|lit| lit.value.clone())
    }

    fn boolean(&self, subject: &Term, predicate: &str) -> Result<Option<bool>, ModelError> {
        let Some(value) = self.graph.value(subject, predicate) else {
            return Ok(None);
        };
        match value.as_literal().map(|lit| lit.value.trim()) {
            Some("true" | "1") => Ok(Some(true)),
            Some("false" | "0") => Ok(Some(false)),
            _ => Err(invalid_literal(subject, predicate, value)),
        }
    }

    fn count(&self, subject: &Term, predicate: &str) -> Result<Option<u64>, ModelError> {
        let Some(value) = self.graph.value(subject, predicate) else {
            return Ok(None);
        };
        value
            .as_literal()
            .and_then(|lit| lit.value.trim().parse::<u64>().ok())
            .map(Some)
            .ok_or_else(|| invalid_literal(subject, predicate, value))
    }
}

fn invalid_literal(subject: &Term, predicate: &str, value: &Term) -> ModelError {
    ModelError::InvalidLiteral {
        subject: subject.as_str_lossy(),
        predicate: predicate.to_string(),
        value: value.as_str_lossy(),
    }
}

fn describe_range(range: &PropertyRange) -> String {
    match range {
        PropertyRange::Class(iri) => format!("class {iri}"),
        PropertyRange::Enum(_) => "enumeration".to_string(),
        PropertyRange::Datatype(iri) => iri.clone(),
    }
}

/// Emits classes parents-first, starting from IRI order.
///
/// A class whose parents are not all emitted goes to the back of the
/// queue. A full pass over the queue without emitting anything means the
/// remaining classes inherit from each other.
fn dependency_order(mut classes: BTreeMap<String, Class>) -> Result<Vec<Class>, ModelError> {
    let mut queue: VecDeque<String> = classes.keys().cloned().collect();
    let mut done: HashSet<String> = HashSet::new();
    let mut ordered = Vec::with_capacity(classes.len());
    let mut stalled = 0;

    while let Some(iri) = queue.pop_front() {
        let ready = classes
            .get(&iri)
            .is_some_and(|c| c.parent_ids.iter().all(|p| done.contains(p)));
        if !ready {
            queue.push_back(iri);
            stalled += 1;
            if stalled >= queue.len() {
                let mut stuck: Vec<String> = queue.into_iter().collect();
                stuck.sort();
                return Err(ModelError::InheritanceCycle { classes: stuck });
            }
            continue;
        }

        stalled = 0;
        if let Some(class) = classes.remove(&iri) {
            ordered.push(class);
        }
        done.insert(iri);
    }

    Ok(ordered)
}
