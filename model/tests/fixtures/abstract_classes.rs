//! The three ways a class is marked abstract.

pub const ABSTRACT_CLASSES: &str = r#"
ex:Flagged a owl:Class ;
    s2c:isAbstract true .

ex:Marked a owl:Class, s2c:AbstractClass .

ex:Negated a owl:Class, sh:NodeShape ;
    sh:property [
        sh:path rdf:type ;
        sh:not [ sh:hasValue ex:Negated ]
    ] .

ex:Concrete a owl:Class ;
    rdfs:subClassOf ex:Negated ;
    s2c:isAbstract false .
"#;
