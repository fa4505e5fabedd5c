//! Schemas the model builder must reject, and the errors it reports.

mod fixtures;

use fixtures::{context, ex, graph};
use shaclc_model::model::iris::{sh, xsd, SH};
use shaclc_model::{build, GraphError, ModelError};

fn build_err(body: &str) -> ModelError {
    build(&graph(body), &context()).expect_err("fixture must be rejected")
}

#[test]
fn pattern_on_class_valued_property() {
    let err = build_err(fixtures::PATTERN_ON_CLASS);
    assert_eq!(
        err,
        ModelError::PatternNotAllowed {
            class: ex("Document"),
            property: ex("author"),
            range: format!("class {}", ex("Agent")),
        }
    );
}

#[test]
fn pattern_on_integer_property() {
    let err = build_err(fixtures::PATTERN_ON_INTEGER);
    assert_eq!(
        err,
        ModelError::PatternNotAllowed {
            class: ex("Document"),
            property: ex("size"),
            range: xsd::INTEGER.to_string(),
        }
    );
    assert!(err.to_string().contains("pattern is not allowed"));
}

#[test]
fn unsupported_node_kind() {
    let err = build_err(fixtures::BAD_NODE_KIND);
    assert_eq!(
        err,
        ModelError::UnsupportedNodeKind {
            class: ex("Thing"),
            value: format!("{SH}Literal"),
        }
    );
}

#[test]
fn missing_range_names_the_property() {
    let err = build_err(fixtures::MISSING_RANGE);
    assert_eq!(
        err,
        ModelError::MissingRange {
            class: ex("Document"),
            property: ex("mystery"),
        }
    );
    assert!(err.to_string().contains(&ex("mystery")));
}

#[test]
fn unknown_sh_class_target() {
    let err = build_err(fixtures::UNKNOWN_CLASS);
    assert_eq!(
        err,
        ModelError::UnknownClass {
            class: ex("Document"),
            property: ex("owner"),
            target: ex("Nowhere"),
        }
    );
}

#[test]
fn inheritance_cycle_is_reported() {
    let err = build_err(fixtures::CYCLE);
    assert_eq!(
        err,
        ModelError::InheritanceCycle {
            classes: vec![ex("A"), ex("B")],
        }
    );
}

#[test]
fn cardinality_must_be_an_integer() {
    let err = build_err(fixtures::BAD_COUNT);
    match err {
        ModelError::InvalidLiteral {
            predicate, value, ..
        } => {
            assert_eq!(predicate, sh::MAX_COUNT);
            assert_eq!(value, "many");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn property_shape_without_path() {
    let err = build_err(fixtures::MISSING_PATH);
    assert!(matches!(err, ModelError::MissingPath { ref class, .. } if *class == ex("Document")));
}

#[test]
fn broken_in_list() {
    let err = build_err(fixtures::BROKEN_IN_LIST);
    match err {
        ModelError::MalformedList {
            class,
            property,
            source,
        } => {
            assert_eq!(class, ex("Document"));
            assert_eq!(property, ex("status"));
            assert!(matches!(source, GraphError::MalformedList { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}
