//! # onto2smw Core - RDF ontologies to Semantic MediaWiki pages
//!
//! Loads an ontology (RDF/XML, Turtle, N-Triples, ...) from a file or URI,
//! extracts its classes and properties with a SPARQL query and renders one
//! wiki page per term:
//!
//! - classes become `Category:<name>` pages
//! - properties become `Property:<name>` pages typed with an SMW datatype
//!   inferred from their `rdfs:range`
//!
//! Every ontology also gets a `Mediawiki:Smw_import_<prefix>` overview page
//! listing its terms, which is what Semantic MediaWiki reads to import a
//! vocabulary.
//!
//! ## Flow
//!
//! ```text
//! ImportConfig ──► OntologySession ──► TermClassifier ──► TermPage
//!                  (oxigraph store)    (NamespaceTable)       │
//!                                                             ▼
//!                    Report ◄── ReportBuilder ◄── ImportOverview ──► WikiTransport
//! ```

pub mod classify;
pub mod config;
pub mod drivers;
pub mod errors;
pub mod iri;
pub mod namespaces;
pub mod ontology;
pub mod pages;
pub mod pipeline;
pub mod report;

pub use classify::{ClassifiedTerm, PropDatatype, ResourceType, TermClassifier};
pub use config::{ImportConfig, OntologyImport, WikiConfig};
pub use drivers::{EditRequest, HttpFetcher, MediaWikiClient, RetryPolicy, WikiTransport};
pub use errors::{Result, SmwError};
pub use namespaces::{InteractivePrefixResolver, NamespaceTable, PrefixResolver};
pub use ontology::{OntologyError, OntologySession, ResultRow, SparqlQuery};
pub use pages::{ImportOverview, OntologyMetadata, PageRenderer, TermPage, WikiPage};
pub use pipeline::{Pipeline, RunOptions, RunSummary};
pub use report::{Report, ReportBuilder, ReportOptions};

/// Crate version, reported by the CLI and sent as HTTP user agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
