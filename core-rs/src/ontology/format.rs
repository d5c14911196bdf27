/**
 * format.rs
 * Serialization names accepted in import configurations
 */

use oxigraph::io::RdfFormat;

use super::OntologyError;

/// Resolve a declared serialization name to a parser format.
///
/// Accepts the short names ontology configs usually carry (`xml`,
/// `turtle`, `nt`, ...), media types and file extensions.
pub fn parse_format(name: &str) -> Result<RdfFormat, OntologyError> {
    let lowered = name.trim().to_ascii_lowercase();

    let format = match lowered.as_str() {
        "xml" | "rdf" | "rdfxml" | "rdf/xml" | "rdf-xml" | "pretty-xml" | "owl" => Some(RdfFormat::RdfXml),
        "turtle" | "ttl" => Some(RdfFormat::Turtle),
        "nt" | "ntriples" | "n-triples" | "nt11" => Some(RdfFormat::NTriples),
        "n3" => Some(RdfFormat::N3),
        "trig" => Some(RdfFormat::TriG),
        "nquads" | "n-quads" | "nq" => Some(RdfFormat::NQuads),
        other => RdfFormat::from_media_type(other).or_else(|| RdfFormat::from_extension(other)),
    };

    format.ok_or_else(|| OntologyError::UnsupportedFormat(name.to_string()))
}
