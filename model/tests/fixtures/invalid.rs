//! Schemas the builder must reject.

pub const PATTERN_ON_CLASS: &str = r#"
ex:Agent a owl:Class .
ex:Document a owl:Class ;
    sh:property [
        sh:path ex:author ;
        sh:class ex:Agent ;
        sh:pattern "^x"
    ] .
"#;

pub const PATTERN_ON_INTEGER: &str = r#"
ex:Document a owl:Class ;
    sh:property [
        sh:path ex:size ;
        sh:datatype xsd:integer ;
        sh:pattern "[0-9]+"
    ] .
"#;

pub const BAD_NODE_KIND: &str = r#"
ex:Thing a owl:Class ;
    sh:nodeKind sh:Literal .
"#;

pub const MISSING_RANGE: &str = r#"
ex:Document a owl:Class ;
    sh:property [ sh:path ex:mystery ] .
"#;

pub const UNKNOWN_CLASS: &str = r#"
ex:Document a owl:Class ;
    sh:property [
        sh:path ex:owner ;
        sh:class ex:Nowhere
    ] .
"#;

pub const CYCLE: &str = r#"
ex:A a owl:Class ; rdfs:subClassOf ex:B .
ex:B a owl:Class ; rdfs:subClassOf ex:A .
ex:C a owl:Class .
"#;

pub const BAD_COUNT: &str = r#"
ex:Document a owl:Class ;
    sh:property [
        sh:path ex:title ;
        sh:datatype xsd:string ;
        sh:maxCount "many"
    ] .
"#;

pub const MISSING_PATH: &str = r#"
ex:Document a owl:Class ;
    sh:property [ sh:datatype xsd:string ] .
"#;

pub const BROKEN_IN_LIST: &str = r#"
ex:Document a owl:Class ;
    sh:property [
        sh:path ex:status ;
        sh:in [ rdf:first "final" ]
    ] .
"#;
