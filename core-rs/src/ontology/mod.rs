/**
 * ontology module
 *
 * - session: loads one ontology source into an Oxigraph store and evaluates SPARQL
 * - query: bundled term/metadata queries and query files
 * - row: result rows with named bindings
 * - format: serialization names accepted in import configurations
 */

pub mod format;
pub mod query;
pub mod row;
pub mod session;

use thiserror::Error;

pub use format::parse_format;
pub use query::SparqlQuery;
pub use row::{Binding, ResultRow};
pub use session::{OntologySession, OntologySource, TermRows};

#[derive(Error, Debug)]
pub enum OntologyError {
    #[error("Failed to load ontology: {0}")]
    LoadError(String),

    #[error("Failed to parse RDF: {0}")]
    ParseError(String),

    #[error("Ontology not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Unsupported RDF format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Oxigraph error: {0}")]
    StoreError(String),
}
