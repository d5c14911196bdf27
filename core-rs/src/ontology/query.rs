/**
 * query.rs
 * SPARQL query texts: bundled term/metadata queries and query files
 */

use std::fs;
use std::path::Path;

use super::OntologyError;
use crate::namespaces::NamespaceTable;

const TERMS_QUERY: &str = include_str!("../../resources/queries/terms.rq");
const ONTOLOGY_METADATA_QUERY: &str = include_str!("../../resources/queries/ontology_metadata.rq");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparqlQuery {
    query: String,
}

impl SparqlQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }

    /// Term extraction query used when an import names no query file
    pub fn terms() -> Self {
        Self::new(TERMS_QUERY)
    }

    /// Title/version/description of an ontology document
    pub fn ontology_metadata() -> Self {
        Self::new(ONTOLOGY_METADATA_QUERY)
    }

    /// Read a query file as plain text
    pub fn from_file(path: &Path) -> Result<Self, OntologyError> {
        if !path.exists() {
            return Err(OntologyError::NotFound(format!(
                "Query file not found: {}",
                path.display()
            )));
        }
        Ok(Self::new(fs::read_to_string(path)?))
    }

    /// Query text with a `PREFIX` declaration for every bound prefix.
    ///
    /// Bindings that cannot be written as SPARQL prefix declarations are
    /// left out. Declarations in the query itself come later and win.
    pub fn with_prefixes(&self, namespaces: &NamespaceTable) -> String {
        let mut text = String::new();
        for (prefix, namespace) in namespaces.iter() {
            if is_prefix_name(prefix) && is_iri_ref(namespace) {
                text.push_str(&format!("PREFIX {}: <{}>\n", prefix, namespace));
            }
        }
        text.push_str(&self.query);
        text
    }
}

fn is_prefix_name(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        None => true,
        Some(first) if first.is_ascii_alphabetic() => {
            !prefix.ends_with('.')
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        Some(_) => false,
    }
}

fn is_iri_ref(namespace: &str) -> bool {
    !namespace.is_empty()
        && !namespace
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\'))
}
