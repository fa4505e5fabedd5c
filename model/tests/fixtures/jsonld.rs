//! A complete JSON-LD shape graph, with its own inline context.

pub const JSONLD_SCHEMA: &str = r#"{
  "@context": {
    "rdfs": "http://www.w3.org/2000/01/rdf-schema#",
    "owl": "http://www.w3.org/2002/07/owl#",
    "sh": "http://www.w3.org/ns/shacl#",
    "xsd": "http://www.w3.org/2001/XMLSchema#",
    "s2c": "https://jpewdev.github.io/shacl2code/schema#",
    "ex": "http://example.org/schema/",
    "sh:path": { "@type": "@id" },
    "sh:datatype": { "@type": "@id" },
    "sh:class": { "@type": "@id" },
    "rdfs:subClassOf": { "@type": "@id" }
  },
  "@graph": [
    {
      "@id": "ex:Agent",
      "@type": ["owl:Class", "sh:NodeShape"],
      "rdfs:subClassOf": "ex:Element",
      "rdfs:comment": "Someone who acts.",
      "sh:property": [
        { "sh:path": "ex:name", "sh:datatype": "xsd:string", "sh:minCount": 1, "sh:maxCount": 1 }
      ]
    },
    {
      "@id": "ex:Element",
      "@type": ["owl:Class", "sh:NodeShape"],
      "s2c:isAbstract": true,
      "sh:property": [
        { "sh:path": "ex:creator", "sh:class": "ex:Agent" }
      ]
    }
  ]
}"#;
