//! Named individuals of an enumeration-like class.

pub const INDIVIDUALS: &str = r#"
ex:HashAlgorithm a owl:Class ;
    rdfs:comment "A hash algorithm." .

<http://example.org/schema/HashAlgorithm/sha256> a owl:NamedIndividual, ex:HashAlgorithm ;
    rdfs:comment "SHA-2 with a 256-bit digest." .

<http://example.org/schema/HashAlgorithm/md5> a owl:NamedIndividual, ex:HashAlgorithm .

<http://example.org/schema/HashAlgorithm#blake3> a owl:NamedIndividual, ex:HashAlgorithm .

<http://example.org/schema/HashAlgorithm/sha512> a ex:HashAlgorithm .

<http://example.org/schema/unrelated> a owl:NamedIndividual .
"#;

/// Individuals whose IRIs do not sit under their class IRI, one of them
/// sharing a leading character with it.
pub const OUTSIDE_CLASS_IRI: &str = r#"
ex:Tool a owl:Class .

ex:Tab a owl:NamedIndividual, ex:Tool .

<http://example.org/schema/Tools#hammer> a owl:NamedIndividual, ex:Tool .
"#;
