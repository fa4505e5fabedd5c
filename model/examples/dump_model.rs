//! Builds the IR for a small inline schema and prints it.
//!
//! Run with: `cargo run --example dump_model -p shaclc-model`

use shaclc_model::{build, ContextResolver, Graph};

const SCHEMA: &str = r#"
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix sh:   <http://www.w3.org/ns/shacl#> .
@prefix xsd:  <http://www.w3.org/2001/XMLSchema#> .
@prefix ex:   <http://example.org/> .

ex:Agent a owl:Class, sh:NodeShape ;
    rdfs:comment "Someone who acts." ;
    sh:nodeKind sh:IRI ;
    sh:property [
        sh:path ex:name ;
        sh:datatype xsd:string ;
        sh:maxCount 1
    ] .

ex:Person a owl:Class, sh:NodeShape ;
    rdfs:subClassOf ex:Agent ;
    sh:property [
        sh:path ex:knows ;
        sh:class ex:Agent
    ] .
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let graph = Graph::from_turtle(SCHEMA)?;
    let context = ContextResolver::from_json_documents(&[serde_json::json!({
        "ex": "http://example.org/"
    })])?;
    let model = build(&graph, &context)?;

    println!("Model");
    println!("  Classes:      {}", model.class_count());
    println!("  Properties:   {}", model.property_count());
    println!("  Individuals:  {}", model.individual_count());
    println!();

    for class in &model.classes {
        println!(
            "  {:16} {:>2} properties  node kind {:?}",
            class.name,
            class.properties.len(),
            class.node_kind
        );
        for prop in &class.properties {
            let range = prop
                .class_id()
                .or(prop.datatype())
                .map_or_else(|| "enum".to_string(), |r| context.compact_iri(r));
            let card = if prop.is_list() { "[]" } else { "" };
            println!("    {:14} {range}{card}", prop.name);
        }
    }

    println!();
    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}
