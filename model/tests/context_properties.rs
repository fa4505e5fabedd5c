//! Property-based tests for the context resolver.

use proptest::prelude::*;
use serde_json::json;
use shaclc_model::ContextResolver;

fn resolver() -> ContextResolver {
    ContextResolver::from_json_documents(&[
        json!({
            "ex": "http://example.org/",
            "foaf": "http://xmlns.com/foaf/0.1/",
            "Person": "foaf:Person",
            "v": {
                "@type": "@vocab",
                "@id": "ex:vocab",
                "@context": {"@vocab": "ex:terms/"}
            }
        }),
        json!({"@base": "http://example.org/ids/"}),
    ])
    .expect("valid context")
}

/// Local names that cannot collide with a declared term.
fn arb_local() -> impl Strategy<Value = String> {
    "[a-z][A-Za-z0-9]{0,15}".prop_map(|s| format!("q{s}"))
}

proptest! {
    #[test]
    fn unknown_terms_pass_through(term in arb_local()) {
        let ctx = resolver();
        prop_assert_eq!(ctx.expand_iri(&term), term.clone());
        prop_assert_eq!(ctx.compact_iri(&term), term);
    }

    #[test]
    fn compaction_round_trips(local in arb_local()) {
        let ctx = resolver();
        for iri in [
            format!("http://example.org/{local}"),
            format!("http://xmlns.com/foaf/0.1/{local}"),
        ] {
            let compact = ctx.compact_iri(&iri);
            prop_assert_ne!(&compact, &iri);
            prop_assert_eq!(ctx.expand_iri(&compact), iri);
        }

        let id = format!("http://example.org/ids/{local}");
        let compact = ctx.compact_id(&id);
        prop_assert_eq!(&compact, &local);
        prop_assert_eq!(ctx.expand_id(&compact), id);

        let term = format!("http://example.org/terms/{local}");
        let vocab = Some("http://example.org/vocab");
        let compact = ctx.compact_vocab(&term, vocab);
        prop_assert_eq!(&compact, &local);
        prop_assert_eq!(ctx.expand_vocab(&compact, vocab), term);
    }

    #[test]
    fn vocab_scope_is_isolated(local in arb_local()) {
        let ctx = resolver();
        let before = (ctx.expand_iri(&local), ctx.expand_id(&local));
        let inside = {
            let scope = ctx.vocab_push(Some("http://example.org/vocab"));
            (scope.expand_iri(&local), scope.expand_id(&local))
        };
        let after = (ctx.expand_iri(&local), ctx.expand_id(&local));
        prop_assert_eq!(&before, &inside);
        prop_assert_eq!(&before, &after);
        prop_assert_eq!(ctx.current_vocab(), None);
    }

    #[test]
    fn memoization_is_stable(local in arb_local()) {
        let ctx = resolver();
        let iri = format!("http://xmlns.com/foaf/0.1/{local}");
        let first = ctx.compact_iri(&iri);
        prop_assert_eq!(ctx.compact_iri(&iri), first.clone());
        prop_assert_eq!(ctx.expand_iri(&first), ctx.expand_iri(&first));
    }
}

#[test]
fn scenario_example_prefix() {
    let ctx = ContextResolver::from_json_documents(&[json!({"ex": "http://example.org/"})])
        .expect("valid context");
    assert_eq!(ctx.expand_iri("ex:Foo"), "http://example.org/Foo");
    assert_eq!(ctx.compact_iri("http://example.org/Foo"), "ex:Foo");
}

#[test]
fn chained_terms_compact_fully() {
    let ctx = resolver();
    assert_eq!(ctx.compact_iri("http://xmlns.com/foaf/0.1/Person"), "Person");
    assert_eq!(ctx.expand_iri("Person"), "http://xmlns.com/foaf/0.1/Person");
}

#[test]
fn base_residue_that_looks_absolute_is_kept_whole() {
    let ctx = ContextResolver::from_json_documents(&[json!({"@base": "http://example.org/ids/"})])
        .expect("valid context");
    let iri = "http://example.org/ids/urn:x";
    let compact = ctx.compact_id(iri);
    assert_eq!(compact, iri);
    assert_eq!(ctx.expand_id(&compact), iri);
}

#[test]
fn base_residue_shadowed_by_a_term_is_kept_whole() {
    let ctx = ContextResolver::from_json_documents(&[json!({
        "@base": "http://example.org/ids/",
        "alice": "http://other/alice"
    })])
    .expect("valid context");
    let iri = "http://example.org/ids/alice";
    let compact = ctx.compact_id(iri);
    assert_eq!(compact, iri);
    assert_eq!(ctx.expand_id(&compact), iri);
    assert_eq!(ctx.compact_id("http://other/alice"), "alice");
    assert_eq!(ctx.compact_id("http://example.org/ids/bob"), "bob");
}
