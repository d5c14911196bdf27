/**
 * session.rs
 * One ontology loaded into an in-memory store, queried with SPARQL
 */

use std::fs;
use std::path::{Path, PathBuf};

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::sparql::{QueryResults, QuerySolutionIter};
use oxigraph::store::Store;
use tracing::{debug, info};

use super::format::parse_format;
use super::query::SparqlQuery;
use super::row::ResultRow;
use super::OntologyError;
use crate::drivers::HttpFetcher;
use crate::namespaces::NamespaceTable;

/// Where an ontology document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OntologySource {
    File(PathBuf),
    Remote(String),
}

impl OntologySource {
    /// `http(s)://` URIs are remote; `file://` URIs and bare paths are local
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            OntologySource::Remote(source.to_string())
        } else if let Some(path) = source.strip_prefix("file://") {
            OntologySource::File(PathBuf::from(path))
        } else {
            OntologySource::File(PathBuf::from(source))
        }
    }

    fn base_iri(&self) -> Option<String> {
        match self {
            OntologySource::Remote(url) => Some(url.clone()),
            OntologySource::File(path) => fs::canonicalize(path)
                .ok()
                .map(|absolute| format!("file://{}", absolute.display())),
        }
    }
}

impl std::fmt::Display for OntologySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OntologySource::File(path) => write!(f, "{}", path.display()),
            OntologySource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// A loaded ontology graph plus its own copy of the prefix bindings
pub struct OntologySession {
    store: Store,
    source: OntologySource,
    format: RdfFormat,
    prefixes: NamespaceTable,
}

impl OntologySession {
    /// Load `source` in the declared `format`.
    ///
    /// Remote sources are fetched through `fetcher`. Unreachable or
    /// malformed documents fail with a load or parse error.
    pub fn load(
        source: &str,
        format: &str,
        namespaces: &NamespaceTable,
        fetcher: &HttpFetcher,
    ) -> Result<Self, OntologyError> {
        let format = parse_format(format)?;
        let source = OntologySource::parse(source);

        info!(source = %source, format = format.name(), "loading ontology");

        let content = match &source {
            OntologySource::File(path) => read_local(path)?,
            OntologySource::Remote(url) => {
                fetcher
                    .get(url, format.media_type())
                    .map_err(|e| OntologyError::LoadError(e.to_string()))?
                    .body
            }
        };

        Self::from_bytes(source, format, &content, namespaces)
    }

    /// Parse an already-read document
    pub fn from_bytes(
        source: OntologySource,
        format: RdfFormat,
        content: &[u8],
        namespaces: &NamespaceTable,
    ) -> Result<Self, OntologyError> {
        let store = Store::new().map_err(|e| OntologyError::StoreError(e.to_string()))?;

        let parser = source
            .base_iri()
            .and_then(|base| RdfParser::from_format(format).with_base_iri(base).ok())
            .unwrap_or_else(|| RdfParser::from_format(format));

        let mut reader = parser.for_reader(content);
        let mut quads = Vec::new();
        for quad in reader.by_ref() {
            quads.push(quad.map_err(|e| OntologyError::ParseError(format!("{}: {}", source, e)))?);
        }

        // Prefixes are only complete once the whole document is read
        let mut prefixes = namespaces.clone();
        for (prefix, namespace) in reader.prefixes() {
            prefixes.bind(prefix, namespace);
        }

        store
            .extend(quads)
            .map_err(|e| OntologyError::StoreError(e.to_string()))?;

        let session = Self {
            store,
            source,
            format,
            prefixes,
        };
        debug!(
            source = %session.source,
            triples = session.len(),
            prefixes = session.prefixes.len(),
            "ontology loaded"
        );
        Ok(session)
    }

    /// Bind a prefix for this session only, returning the prefix stored
    pub fn bind(&mut self, prefix: &str, namespace: &str) -> String {
        self.prefixes.bind(prefix, namespace)
    }

    pub fn source(&self) -> &OntologySource {
        &self.source
    }

    pub fn format(&self) -> RdfFormat {
        self.format
    }

    /// Prefixes known to this session
    pub fn prefixes(&self) -> &NamespaceTable {
        &self.prefixes
    }

    pub fn prefixes_mut(&mut self) -> &mut NamespaceTable {
        &mut self.prefixes
    }

    /// Number of triples in the graph
    pub fn len(&self) -> usize {
        self.store.len().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate a SELECT query.
    ///
    /// Rows are produced lazily and only once; evaluating again runs the
    /// query again.
    pub fn evaluate(&self, query: &SparqlQuery) -> Result<TermRows, OntologyError> {
        let text = query.with_prefixes(&self.prefixes);

        match self
            .store
            .query(text.as_str())
            .map_err(|e| OntologyError::QueryError(e.to_string()))?
        {
            QueryResults::Solutions(solutions) => Ok(TermRows { solutions }),
            QueryResults::Boolean(_) | QueryResults::Graph(_) => Err(OntologyError::QueryError(
                "expected a SELECT query".to_string(),
            )),
        }
    }
}

fn read_local(path: &Path) -> Result<Vec<u8>, OntologyError> {
    if !path.exists() {
        return Err(OntologyError::NotFound(format!("File not found: {}", path.display())));
    }
    if path.is_dir() {
        return Err(OntologyError::LoadError(format!("Path is a directory: {}", path.display())));
    }
    Ok(fs::read(path)?)
}

/// Single-pass sequence of result rows
pub struct TermRows {
    solutions: QuerySolutionIter,
}

impl Iterator for TermRows {
    type Item = Result<ResultRow, OntologyError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.solutions.next().map(|solution| {
            solution
                .map(|solution| ResultRow::from(&solution))
                .map_err(|e| OntologyError::QueryError(e.to_string()))
        })
    }
}
