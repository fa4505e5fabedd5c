//! `jsonschema` target: a JSON Schema (2020-12) for JSON-LD documents.
//!
//! Every class `T` produces up to three definitions:
//!
//! - `T_props`: the class's own properties, plus `allOf` references to
//!   its parents' `_props`.
//! - `T_derived`: anything that may appear where a `T` is expected, i.e.
//!   a concrete class at or below `T`, or an IRI reference.
//! - `T`: a concrete instance, with `@type` fixed to the class name.
//!   Omitted for abstract classes.

use std::collections::{BTreeSet, HashMap, VecDeque};

use anyhow::Result;
use serde_json::{json, Map, Value};
use shaclc_model::model::local_name;
use shaclc_model::{Class, Model, NodeKind, Property, PropertyRange};

use crate::emit::normalize_comment;
use crate::mapping::{type_name, xsd_to_json_type};
use crate::RenderOptions;

const DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

struct Names<'a> {
    by_iri: HashMap<&'a str, String>,
}

impl<'a> Names<'a> {
    fn new(model: &'a Model) -> Self {
        Self {
            by_iri: model
                .classes
                .iter()
                .map(|c| (c.id.as_str(), type_name(c)))
                .collect(),
        }
    }

    fn get(&self, iri: &str) -> String {
        self.by_iri
            .get(iri)
            .cloned()
            .unwrap_or_else(|| local_name(iri).to_string())
    }

    fn reference(&self, iri: &str, suffix: &str) -> Value {
        json!({ "$ref": format!("#/$defs/{}{suffix}", self.get(iri)) })
    }
}

/// Renders the schema.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(model: &Model, options: &RenderOptions) -> Result<String> {
    let names = Names::new(model);
    let mut defs = Map::new();
    let mut concrete = Vec::new();

    for class in &model.classes {
        let name = names.get(&class.id);
        defs.insert(format!("{name}_props"), props_schema(class, &names));
        defs.insert(format!("{name}_derived"), derived_schema(model, class, &names));
        if !class.is_abstract {
            defs.insert(name.clone(), class_schema(class, &name));
            concrete.push(json!({ "$ref": format!("#/$defs/{name}") }));
        }
    }

    let mut root = Map::new();
    root.insert("$schema".into(), json!(DRAFT));
    if let Some(id) = &options.id {
        root.insert("$id".into(), json!(id));
    }
    if let Some(title) = &options.title {
        root.insert("title".into(), json!(title));
    }
    root.insert("$defs".into(), Value::Object(defs));
    if !concrete.is_empty() {
        root.insert("anyOf".into(), Value::Array(concrete));
    }

    let mut out = serde_json::to_string_pretty(&Value::Object(root))?;
    out.push('\n');
    Ok(out)
}

fn props_schema(class: &Class, names: &Names<'_>) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    let id_key = class.id_property.as_deref().unwrap_or("@id");
    properties.insert(id_key.to_string(), id_schema(class.node_kind));
    if class.node_kind == NodeKind::Iri {
        required.push(id_key.to_string());
    }

    for prop in &class.properties {
        properties.insert(prop.compact_path.clone(), property_schema(prop, names));
        if prop.is_required() {
            required.push(prop.compact_path.clone());
        }
    }

    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    if let Some(comment) = &class.comment {
        schema.insert("description".into(), json!(normalize_comment(comment)));
    }
    if !class.parent_ids.is_empty() {
        let parents: Vec<Value> = class
            .parent_ids
            .iter()
            .map(|p| names.reference(p, "_props"))
            .collect();
        schema.insert("allOf".into(), Value::Array(parents));
    }
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), json!(required));
    }
    Value::Object(schema)
}

fn id_schema(kind: NodeKind) -> Value {
    match kind {
        NodeKind::Iri => json!({ "type": "string", "format": "iri-reference" }),
        NodeKind::BlankNode => json!({ "type": "string", "pattern": "^_:" }),
        NodeKind::BlankNodeOrIri => json!({ "type": "string" }),
    }
}

fn property_schema(prop: &Property, names: &Names<'_>) -> Value {
    let mut item = match &prop.range {
        PropertyRange::Class(target) => names.reference(target, "_derived"),
        PropertyRange::Enum(values) => json!({ "enum": values }),
        PropertyRange::Datatype(datatype) => {
            let (ty, format) = xsd_to_json_type(datatype);
            let mut schema = Map::new();
            schema.insert("type".into(), json!(ty));
            if let Some(format) = format {
                schema.insert("format".into(), json!(format));
            }
            if let Some(pattern) = &prop.pattern {
                schema.insert("pattern".into(), json!(pattern));
            }
            Value::Object(schema)
        }
    };

    if prop.is_list() {
        let mut array = Map::new();
        array.insert("type".into(), json!("array"));
        array.insert("items".into(), item);
        if let Some(min) = prop.min_count.filter(|n| *n > 0) {
            array.insert("minItems".into(), json!(min));
        }
        if let Some(max) = prop.max_count {
            array.insert("maxItems".into(), json!(max));
        }
        item = Value::Object(array);
    }

    if let Value::Object(schema) = &mut item {
        if let Some(comment) = &prop.comment {
            schema.insert("description".into(), json!(normalize_comment(comment)));
        }
        if prop.deprecated {
            schema.insert("deprecated".into(), json!(true));
        }
    }
    item
}

fn derived_schema(model: &Model, class: &Class, names: &Names<'_>) -> Value {
    let mut concrete = BTreeSet::new();
    let mut queue = VecDeque::from([class]);
    let mut seen = BTreeSet::new();
    while let Some(next) = queue.pop_front() {
        if !seen.insert(next.id.as_str()) {
            continue;
        }
        if !next.is_abstract {
            concrete.insert(names.get(&next.id));
        }
        queue.extend(next.derived_ids.iter().filter_map(|d| model.find_class(d)));
    }

    let mut choices: Vec<Value> = concrete
        .into_iter()
        .map(|name| json!({ "$ref": format!("#/$defs/{name}") }))
        .collect();
    if class.node_kind != NodeKind::BlankNode {
        choices.push(json!({ "type": "string" }));
    }
    match choices.len() {
        0 => Value::Bool(false),
        1 => choices.remove(0),
        _ => json!({ "anyOf": choices }),
    }
}

fn class_schema(class: &Class, name: &str) -> Value {
    let mut schema = Map::new();
    if let Some(comment) = &class.comment {
        schema.insert("description".into(), json!(normalize_comment(comment)));
    }
    schema.insert(
        "allOf".into(),
        json!([{ "$ref": format!("#/$defs/{name}_props") }]),
    );
    schema.insert(
        "properties".into(),
        json!({ "@type": { "const": class.name } }),
    );
    schema.insert("required".into(), json!(["@type"]));
    if class.deprecated {
        schema.insert("deprecated".into(), json!(true));
    }
    if !class.is_extensible {
        schema.insert("unevaluatedProperties".into(), json!(false));
    }
    Value::Object(schema)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn class(id: &str, name: &str) -> Class {
        Class {
            id: id.into(),
            name: name.into(),
            parent_ids: vec![],
            derived_ids: vec![],
            properties: vec![],
            comment: None,
            id_property: None,
            node_kind: NodeKind::default(),
            is_extensible: false,
            is_abstract: false,
            deprecated: false,
            named_individuals: vec![],
        }
    }

    #[test]
    fn abstract_classes_have_no_concrete_definition() {
        let mut base = class("http://example.org/Base", "Base");
        base.is_abstract = true;
        base.derived_ids = vec!["http://example.org/Leaf".into()];
        let mut leaf = class("http://example.org/Leaf", "Leaf");
        leaf.parent_ids = vec![base.id.clone()];
        leaf.is_extensible = true;
        let model = Model {
            classes: vec![base, leaf],
        };

        let out = render(&model, &RenderOptions::default()).unwrap();
        let json: Value = serde_json::from_str(&out).unwrap();
        let defs = &json["$defs"];
        assert!(defs.get("Base").is_none());
        assert_eq!(defs["Leaf"]["properties"]["@type"]["const"], "Leaf");
        assert!(defs["Leaf"].get("unevaluatedProperties").is_none());
        assert_eq!(
            defs["Base_derived"]["anyOf"][0]["$ref"],
            "#/$defs/Leaf"
        );
        assert_eq!(
            defs["Leaf_props"]["allOf"][0]["$ref"],
            "#/$defs/Base_props"
        );
        assert_eq!(json["anyOf"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn blank_node_only_classes_reject_iri_references() {
        let mut c = class("http://example.org/Anon", "Anon");
        c.node_kind = NodeKind::BlankNode;
        let model = Model { classes: vec![c] };
        let json: Value =
            serde_json::from_str(&render(&model, &RenderOptions::default()).unwrap()).unwrap();
        assert_eq!(json["$defs"]["Anon_derived"]["$ref"], "#/$defs/Anon");
        assert_eq!(
            json["$defs"]["Anon_props"]["properties"]["@id"]["pattern"],
            "^_:"
        );
    }
}
