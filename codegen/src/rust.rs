//! `rust` target: one trait per class over a `Primitives` type family.
//!
//! Parents become supertraits. Class-valued properties become associated
//! types bounded by the referenced class's trait. Closed value sets
//! (`sh:in`) and classes with named individuals become enums.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as FmtWrite;

use shaclc_model::model::local_name;
use shaclc_model::{Class, Model, Property, PropertyRange};

use crate::emit::{normalize_comment, SourceFile};
use crate::mapping::{
    to_pascal_case, to_snake_case, type_name, xsd_is_unsized, xsd_to_primitives_type,
};
use crate::RenderOptions;

/// An enum to emit.
struct RustEnum {
    name: String,
    comment: String,
    variants: Vec<Variant>,
}

struct Variant {
    name: String,
    value: String,
    comment: Option<String>,
}

/// Per-model naming decisions shared by the emitters.
struct Layout<'a> {
    model: &'a Model,
    type_names: HashMap<&'a str, String>,
    /// Classes rendered only as an enum of their individuals.
    enum_only: HashSet<&'a str>,
}

impl<'a> Layout<'a> {
    fn new(model: &'a Model) -> Self {
        let type_names = model
            .classes
            .iter()
            .map(|c| (c.id.as_str(), type_name(c)))
            .collect();
        let enum_only = model
            .classes
            .iter()
            .filter(|c| {
                !c.named_individuals.is_empty()
                    && c.properties.is_empty()
                    && c.derived_ids.is_empty()
                    && c.parent_ids.is_empty()
            })
            .map(|c| c.id.as_str())
            .collect();
        Self {
            model,
            type_names,
            enum_only,
        }
    }

    fn type_name(&self, iri: &str) -> String {
        self.type_names
            .get(iri)
            .cloned()
            .unwrap_or_else(|| to_pascal_case(local_name(iri)))
    }

    /// Name of the enum holding a class's individuals.
    fn individual_enum_name(&self, class: &Class) -> String {
        let name = self.type_name(&class.id);
        if self.enum_only.contains(class.id.as_str()) {
            name
        } else {
            format!("{name}Individual")
        }
    }

    /// Name of the enum for a property's closed value set.
    fn value_enum_name(&self, owner: &Class, prop: &Property) -> String {
        format!("{}{}", self.type_name(&owner.id), to_pascal_case(&prop.name))
    }
}

/// Renders the module.
#[must_use]
pub fn render(model: &Model, options: &RenderOptions) -> String {
    let layout = Layout::new(model);

    let mut doc = options
        .title
        .clone()
        .unwrap_or_else(|| "Types generated from a SHACL schema.".to_string());
    if let Some(id) = &options.id {
        let _ = write!(doc, "\n\nSchema: <{id}>");
    }
    let mut f = SourceFile::new(&doc);

    emit_primitives(&mut f);
    for e in detect_enums(&layout) {
        emit_enum(&mut f, &e);
    }
    for class in &model.classes {
        if !layout.enum_only.contains(class.id.as_str()) {
            emit_trait(&mut f, &layout, class);
        }
    }
    f.finish()
}

fn emit_primitives(f: &mut SourceFile) {
    f.doc_comment(
        "Concrete types for schema literals.\n\nImplementors pick the representation of each XSD datatype.",
    );
    f.line("pub trait Primitives {");
    f.indented_doc_comment("`xsd:string`, `xsd:anyURI` and unrecognised datatypes.");
    f.line("    type String: ?Sized;");
    for (name, doc) in [
        ("Integer", "`xsd:integer`."),
        ("NonNegativeInteger", "`xsd:nonNegativeInteger`."),
        ("PositiveInteger", "`xsd:positiveInteger`."),
        ("Decimal", "`xsd:decimal`."),
        ("Boolean", "`xsd:boolean`."),
        ("DateTime", "`xsd:dateTime` and `xsd:dateTimeStamp`."),
    ] {
        f.indented_doc_comment(doc);
        let _ = writeln!(f.buf, "    type {name};");
    }
    f.line("}");
    f.blank();
}

fn detect_enums(layout: &Layout<'_>) -> Vec<RustEnum> {
    let mut enums = Vec::new();
    for class in &layout.model.classes {
        if !class.named_individuals.is_empty() {
            let variants = class
                .named_individuals
                .iter()
                .map(|ind| Variant {
                    name: to_pascal_case(&ind.name),
                    value: ind.id.clone(),
                    comment: ind.comment.as_deref().map(normalize_comment),
                })
                .collect();
            enums.push(RustEnum {
                name: layout.individual_enum_name(class),
                comment: format!("Named individuals of `{}`.", class.name),
                variants: dedupe_variants(variants),
            });
        }
        for prop in &class.properties {
            if let Some(values) = prop.enum_values() {
                let variants = values
                    .iter()
                    .map(|v| Variant {
                        name: to_pascal_case(local_name(v)),
                        value: v.clone(),
                        comment: None,
                    })
                    .collect();
                enums.push(RustEnum {
                    name: layout.value_enum_name(class, prop),
                    comment: format!(
                        "Values allowed for `{}` on `{}`.",
                        prop.compact_path, class.name
                    ),
                    variants: dedupe_variants(variants),
                });
            }
        }
    }
    enums
}

/// Suffixes repeated variant names with their position.
fn dedupe_variants(mut variants: Vec<Variant>) -> Vec<Variant> {
    let mut seen = HashSet::new();
    for (i, v) in variants.iter_mut().enumerate() {
        if !seen.insert(v.name.clone()) {
            v.name = format!("{}{i}", v.name);
            seen.insert(v.name.clone());
        }
    }
    variants
}

fn emit_enum(f: &mut SourceFile, e: &RustEnum) {
    f.doc_comment(&e.comment);
    f.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
    let _ = writeln!(f.buf, "pub enum {} {{", e.name);
    for v in &e.variants {
        f.indented_doc_comment(v.comment.as_deref().unwrap_or(&format!("`{}`", v.value)));
        let _ = writeln!(f.buf, "    {},", v.name);
    }
    f.line("}");
    f.blank();

    let _ = writeln!(f.buf, "impl {} {{", e.name);
    f.indented_doc_comment("Every variant, in schema order.");
    let all: Vec<String> = e.variants.iter().map(|v| format!("Self::{}", v.name)).collect();
    let _ = writeln!(f.buf, "    pub const ALL: &'static [Self] = &[{}];", all.join(", "));
    f.blank();
    f.indented_doc_comment("The value as written in the schema.");
    f.line("    #[must_use]");
    f.line("    pub fn iri(self) -> &'static str {");
    f.line("        match self {");
    for v in &e.variants {
        let _ = writeln!(f.buf, "            Self::{} => {:?},", v.name, v.value);
    }
    f.line("        }");
    f.line("    }");
    f.blank();
    f.indented_doc_comment("Looks up a variant by its schema value.");
    f.line("    #[must_use]");
    f.line("    pub fn from_iri(iri: &str) -> Option<Self> {");
    f.line("        Self::ALL.iter().copied().find(|v| v.iri() == iri)");
    f.line("    }");
    f.line("}");
    f.blank();
}

fn emit_trait(f: &mut SourceFile, layout: &Layout<'_>, class: &Class) {
    let trait_name = layout.type_name(&class.id);
    if let Some(comment) = &class.comment {
        f.doc_comment(&normalize_comment(comment));
        f.doc_comment("");
    }
    let _ = writeln!(f.buf, "/// IRI: <{}>", class.id);
    if class.is_abstract {
        f.doc_comment("");
        f.doc_comment("Abstract: never instantiated directly.");
    }
    if class.deprecated {
        f.line("#[deprecated]");
    }

    let supertraits: Vec<String> = class
        .parent_ids
        .iter()
        .map(|p| format!("{}<P>", layout.type_name(p)))
        .collect();
    if supertraits.is_empty() {
        let _ = write!(f.buf, "pub trait {trait_name}<P: Primitives> {{");
    } else {
        let _ = write!(
            f.buf,
            "pub trait {trait_name}<P: Primitives>: {} {{",
            supertraits.join(" + ")
        );
    }

    if class.properties.is_empty() {
        f.line("}");
        f.blank();
        return;
    }
    f.blank();

    let mut associated_types = HashSet::new();
    let mut methods = HashSet::new();
    for prop in &class.properties {
        let mut method = to_snake_case(&prop.name);
        if !methods.insert(method.clone()) {
            method = to_snake_case(&prop.compact_path);
            methods.insert(method.clone());
        }
        emit_method(
            f,
            layout,
            class,
            &trait_name,
            prop,
            &method,
            &mut associated_types,
        );
    }
    f.line("}");
    f.blank();
}

fn emit_method(
    f: &mut SourceFile,
    layout: &Layout<'_>,
    owner: &Class,
    owner_name: &str,
    prop: &Property,
    method: &str,
    associated_types: &mut HashSet<String>,
) {
    let single = !prop.is_list();
    let required = prop.is_required();

    let value_type = match &prop.range {
        PropertyRange::Enum(_) => ValueType::Owned(layout.value_enum_name(owner, prop)),
        PropertyRange::Class(target) => match layout.model.find_class(target) {
            Some(class) if layout.enum_only.contains(class.id.as_str()) => {
                ValueType::Owned(layout.individual_enum_name(class))
            }
            Some(_) => {
                let target_name = layout.type_name(target);
                let assoc = if target_name == owner_name {
                    format!("{target_name}Target")
                } else {
                    target_name.clone()
                };
                if associated_types.insert(assoc.clone()) {
                    let _ = writeln!(f.buf, "    /// Values of `{}`.", prop.compact_path);
                    let _ = writeln!(f.buf, "    type {assoc}: {target_name}<P>;");
                }
                ValueType::Borrowed(format!("Self::{assoc}"))
            }
            None => ValueType::Unsized("P::String".into()),
        },
        PropertyRange::Datatype(datatype) => {
            let t = xsd_to_primitives_type(datatype).to_string();
            if xsd_is_unsized(datatype) {
                ValueType::Unsized(t)
            } else {
                ValueType::Owned(t)
            }
        }
    };

    let doc = prop
        .comment
        .as_deref()
        .map_or_else(|| format!("`{}`", prop.compact_path), normalize_comment);
    f.indented_doc_comment(&doc);
    if prop.deprecated {
        f.line("    #[deprecated]");
    }

    let signature = match (&value_type, single, required) {
        (ValueType::Owned(t), true, true) => format!("fn {method}(&self) -> {t};"),
        (ValueType::Owned(t), true, false) => format!("fn {method}(&self) -> Option<{t}>;"),
        (ValueType::Borrowed(t) | ValueType::Unsized(t), true, true) => {
            format!("fn {method}(&self) -> &{t};")
        }
        (ValueType::Borrowed(t) | ValueType::Unsized(t), true, false) => {
            format!("fn {method}(&self) -> Option<&{t}>;")
        }
        (ValueType::Owned(t) | ValueType::Borrowed(t), false, _) => {
            format!("fn {method}(&self) -> &[{t}];")
        }
        (ValueType::Unsized(t), false, _) => {
            let _ = writeln!(f.buf, "    fn {method}_count(&self) -> usize;");
            f.indented_doc_comment(&format!("Value `index` of `{}`.", prop.compact_path));
            if prop.deprecated {
                f.line("    #[deprecated]");
            }
            format!("fn {method}(&self, index: usize) -> Option<&{t}>;")
        }
    };
    let _ = writeln!(f.buf, "    {signature}");
}

/// How a property's values are returned.
enum ValueType {
    /// `Copy`-able or sized value, returned by value when single.
    Owned(String),
    /// Sized value returned by reference.
    Borrowed(String),
    /// `?Sized` value; lists use a count plus an indexed getter.
    Unsized(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use shaclc_model::model::iris::xsd;
    use shaclc_model::{NamedIndividual, NodeKind};

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

    fn prop(name: &str, range: PropertyRange, min: Option<u64>, max: Option<u64>) -> Property {
        Property {
            path: format!("http://example.org/{name}"),
            compact_path: name.into(),
            name: name.into(),
            comment: None,
            min_count: min,
            max_count: max,
            range,
            pattern: None,
            deprecated: false,
        }
    }

    #[test]
    fn methods_follow_cardinality() {
        let mut tool = class("http://example.org/Tool", "Tool");
        tool.properties = vec![
            prop("label", PropertyRange::Datatype(xsd::STRING.into()), Some(1), Some(1)),
            prop("size", PropertyRange::Datatype(xsd::INTEGER.into()), None, Some(1)),
            prop("tags", PropertyRange::Datatype(xsd::STRING.into()), None, None),
            prop("weights", PropertyRange::Datatype(xsd::DECIMAL.into()), None, None),
            prop("owner", PropertyRange::Class(tool.id.clone()), None, Some(1)),
        ];
        let out = render(&Model { classes: vec![tool] }, &RenderOptions::default());
        assert!(out.contains("pub trait Tool<P: Primitives> {"));
        assert!(out.contains("    fn label(&self) -> &P::String;"));
        assert!(out.contains("    fn size(&self) -> Option<P::Integer>;"));
        assert!(out.contains("    fn tags_count(&self) -> usize;"));
        assert!(out.contains("    fn tags(&self, index: usize) -> Option<&P::String>;"));
        assert!(out.contains("    fn weights(&self) -> &[P::Decimal];"));
        assert!(out.contains("    type ToolTarget: Tool<P>;"));
        assert!(out.contains("    fn owner(&self) -> Option<&Self::ToolTarget>;"));
    }

    #[test]
    fn individuals_become_enums() {
        let mut algo = class("http://example.org/Algorithm", "Algorithm");
        algo.named_individuals = vec![NamedIndividual {
            id: "http://example.org/Algorithm/sha256".into(),
            name: "sha256".into(),
            compact_id: "ex:Algorithm/sha256".into(),
            comment: None,
        }];
        let mut hash = class("http://example.org/Hash", "Hash");
        hash.properties = vec![prop(
            "algorithm",
            PropertyRange::Class(algo.id.clone()),
            Some(1),
            Some(1),
        )];
        let out = render(
            &Model {
                classes: vec![algo, hash],
            },
            &RenderOptions::default(),
        );
        assert!(out.contains("pub enum Algorithm {"));
        assert!(out.contains("Self::Sha256 => \"http://example.org/Algorithm/sha256\","));
        assert!(!out.contains("pub trait Algorithm"));
        assert!(out.contains("    fn algorithm(&self) -> Algorithm;"));
    }

    #[test]
    fn parents_become_supertraits() {
        let mut base = class("http://example.org/Base", "Base");
        base.derived_ids = vec!["http://example.org/Leaf".into()];
        base.is_abstract = true;
        let mut leaf = class("http://example.org/Leaf", "Leaf");
        leaf.parent_ids = vec![base.id.clone()];
        leaf.deprecated = true;
        let out = render(
            &Model {
                classes: vec![base, leaf],
            },
            &RenderOptions {
                title: Some("Example types.".into()),
                id: None,
            },
        );
        assert!(out.starts_with("//! Example types.\n"));
        assert!(out.contains("pub trait Base<P: Primitives> {}"));
        assert!(out.contains("#[deprecated]\npub trait Leaf<P: Primitives>: Base<P> {}"));
    }

    #[test]
    fn value_sets_become_enums() {
        let mut doc = class("http://example.org/Doc", "Doc");
        doc.properties = vec![prop(
            "status",
            PropertyRange::Enum(vec!["draft".into(), "final".into()]),
            None,
            None,
        )];
        let out = render(&Model { classes: vec![doc] }, &RenderOptions::default());
        assert!(out.contains("pub enum DocStatus {"));
        assert!(out.contains("    Draft,"));
        assert!(out.contains("    fn status(&self) -> &[DocStatus];"));
    }
}
