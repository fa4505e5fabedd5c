//! Class hierarchy with inherited node kind, id alias, and extensibility.

/// `Element` carries the inherited attributes; `Agent` overrides the node
/// kind; `Person` inherits from `Agent`. Children are declared before
/// their parents.
pub const INHERITANCE: &str = r#"
ex:Tool a owl:Class, sh:NodeShape ;
    rdfs:subClassOf ex:Element ;
    rdfs:comment "A software tool." .

ex:Person a owl:Class ;
    rdfs:subClassOf ex:Agent .

ex:Agent a owl:Class, sh:NodeShape ;
    rdfs:subClassOf ex:Element ;
    sh:nodeKind sh:BlankNodeOrIRI .

ex:Element a owl:Class, sh:NodeShape ;
    rdfs:subClassOf owl:Thing ;
    sh:nodeKind sh:IRI ;
    s2c:idPropertyName "spdxId" ;
    s2c:isExtensible true .

ex:Legacy a owl:DeprecatedClass ;
    rdfs:subClassOf ex:Legacy .
"#;

/// `B` is declared before its parent `A`. `Alpha` inherits from `Zulu`,
/// so IRI order alone would put the child first.
pub const REVERSED_PAIR: &str = r#"
ex:B a owl:Class ;
    rdfs:subClassOf ex:A .

ex:A a owl:Class .

ex:Alpha a owl:Class ;
    rdfs:subClassOf ex:Zulu .

ex:Zulu a owl:Class .
"#;
