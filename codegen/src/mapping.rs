//! IR → target identifier mapping.
//!
//! Deterministic conversions from IR names and XSD datatypes to
//! identifiers and types in generated code.

use shaclc_model::model::iris::xsd;
use shaclc_model::Class;

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "yield",
];

/// Converts a camelCase or PascalCase name into a snake_case identifier.
///
/// Non-alphanumeric characters become `_`; keywords get a trailing `_`.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    for ch in s.chars() {
        if ch.is_uppercase() {
            // No break inside runs of capitals ("IRI", "D2n").
            if prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else if ch.is_alphanumeric() {
            result.push(ch);
        } else if !result.is_empty() && !result.ends_with('_') {
            result.push('_');
        }
        prev = Some(ch);
    }
    let mut result = result.trim_end_matches('_').to_string();
    if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    if RUST_KEYWORDS.contains(&result.as_str()) {
        result.push('_');
    }
    result
}

/// Converts a name into PascalCase, splitting on anything non-alphanumeric.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for word in s.split(|c: char| !c.is_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, 'V');
    }
    result
}

/// The generated type name for a class: its name parts, PascalCased and
/// joined.
#[must_use]
pub fn type_name(class: &Class) -> String {
    class
        .name_parts()
        .into_iter()
        .map(to_pascal_case)
        .collect::<String>()
}

/// Maps an XSD IRI to the corresponding `P::` associated type expression.
#[must_use]
pub fn xsd_to_primitives_type(xsd_iri: &str) -> &'static str {
    match xsd_iri {
        xsd::INTEGER => "P::Integer",
        xsd::NON_NEGATIVE_INTEGER => "P::NonNegativeInteger",
        xsd::POSITIVE_INTEGER => "P::PositiveInteger",
        xsd::BOOLEAN => "P::Boolean",
        xsd::DECIMAL => "P::Decimal",
        xsd::DATE_TIME | xsd::DATE_TIME_STAMP => "P::DateTime",
        // strings, URIs and anything unrecognised
        _ => "P::String",
    }
}

/// Returns true if the primitive for this XSD type is `?Sized`.
#[must_use]
pub fn xsd_is_unsized(xsd_iri: &str) -> bool {
    xsd_to_primitives_type(xsd_iri) == "P::String"
}

/// Maps an XSD IRI to a JSON Schema `type` and optional `format`.
#[must_use]
pub fn xsd_to_json_type(xsd_iri: &str) -> (&'static str, Option<&'static str>) {
    match xsd_iri {
        xsd::INTEGER | xsd::NON_NEGATIVE_INTEGER | xsd::POSITIVE_INTEGER => ("integer", None),
        xsd::DECIMAL => ("number", None),
        xsd::BOOLEAN => ("boolean", None),
        xsd::DATE_TIME | xsd::DATE_TIME_STAMP => ("string", Some("date-time")),
        xsd::ANY_URI => ("string", Some("uri")),
        _ => ("string", None),
    }
}
