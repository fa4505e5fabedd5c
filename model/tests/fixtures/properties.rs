//! Property shapes covering each range source, cardinality, and patterns.

/// One class, `Document`, with a property per range rule.
pub const PROPERTIES: &str = r#"
ex:Agent a owl:Class .

ex:Document a owl:Class, sh:NodeShape ;
    rdfs:comment "A document." ;
    sh:property [
        sh:path ex:author ;
        sh:class ex:Agent ;
        sh:datatype xsd:string
    ] , [
        sh:path ex:title ;
        sh:datatype xsd:string ;
        sh:pattern "^[A-Z]" ;
        sh:minCount 1 ;
        sh:maxCount 1
    ] , [
        sh:path ex:status ;
        sh:in ( "final" "draft" "draft" ) ;
        sh:maxCount 1
    ] , [
        sh:path ex:size ;
        sh:name "byteSize" ;
        sh:maxCount 1
    ] , [
        sh:path ex:created ;
        sh:datatype xsd:dateTimeStamp ;
        sh:pattern "Z$" ;
        rdfs:comment "When the document was created."
    ] , [
        sh:path ex:reviewer
    ] , [
        sh:path ex:oldField ;
        sh:datatype xsd:string
    ] , [
        sh:path rdf:type ;
        sh:in ( ex:Document )
    ] .

ex:size a owl:DatatypeProperty ;
    rdfs:range xsd:nonNegativeInteger ;
    rdfs:comment "Size in bytes." .

ex:reviewer a owl:ObjectProperty ;
    rdfs:range ex:Agent .

ex:oldField a owl:DeprecatedProperty .
"#;
