/**
 * import_overview.rs
 * Per-ontology import page listing every classified term
 *
 * Page name: `Mediawiki:Smw_import_<prefix>`. Ontology title, version and
 * description come from the ontology document itself when its namespace
 * URI serves RDF/XML, and fall back to the prefix otherwise.
 */

use serde::Serialize;
use tracing::{debug, warn};

use super::renderer::{PageRenderer, TemplateContext, TemplateKind};
use super::term_page::TermPage;
use super::WikiPage;
use crate::classify::PropDatatype;
use crate::drivers::HttpFetcher;
use crate::errors::Result;
use crate::namespaces::NamespaceTable;
use crate::ontology::{OntologySession, SparqlQuery};

pub const RDF_XML: &str = "application/rdf+xml";

/// Ontology-level descriptive fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyMetadata {
    pub title: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

impl OntologyMetadata {
    /// Title is the prefix; no version or description
    pub fn defaults(prefix: &str) -> Self {
        Self {
            title: prefix.to_string(),
            version: None,
            description: None,
        }
    }
}

/// Looks up ontology metadata at the ontology's namespace URI
pub struct MetadataResolver<'a> {
    /// Short-timeout fetcher deciding whether the URI serves RDF/XML
    pub probe: &'a HttpFetcher,
    /// Fetcher used to load the document once the probe succeeds
    pub loader: &'a HttpFetcher,
    pub namespaces: &'a NamespaceTable,
}

impl MetadataResolver<'_> {
    /// Never fails: anything short of a parsable RDF/XML document yields defaults
    pub fn resolve(&self, ontology_ns: &str, prefix: &str) -> OntologyMetadata {
        let mut metadata = OntologyMetadata::defaults(prefix);

        if !self.probe.probe(ontology_ns, RDF_XML) {
            debug!(ontology_ns, "namespace does not resolve to RDF/XML");
            return metadata;
        }

        let session = match OntologySession::load(ontology_ns, RDF_XML, self.namespaces, self.loader) {
            Ok(session) => session,
            Err(e) => {
                warn!(ontology_ns, error = %e, "could not load ontology document for metadata");
                return metadata;
            }
        };

        let first = session
            .evaluate(&SparqlQuery::ontology_metadata())
            .map(|mut rows| rows.next());

        match first {
            Ok(Some(Ok(row))) => {
                if let Some(title) = row.value("title").filter(|t| !t.is_empty()) {
                    metadata.title = title.to_string();
                }
                metadata.version = row.value("version").map(str::to_string);
                metadata.description = row.value("description").map(str::to_string);
            }
            Ok(None) => debug!(ontology_ns, "no owl:Ontology node in document"),
            Ok(Some(Err(e))) | Err(e) => warn!(ontology_ns, error = %e, "ontology metadata query failed"),
        }

        metadata
    }
}

#[derive(Debug, Serialize)]
struct TermEntry<'a> {
    term: &'a str,
    term_name: &'a str,
    namespace_prefix: &'a str,
    resource_type: &'static str,
    prop_datatype: Option<PropDatatype>,
}

#[derive(Debug, Serialize)]
struct PageInfo<'a> {
    ontology_ns: &'a str,
    ontology_ns_prefix: &'a str,
    ontology_name: &'a str,
    ontology_version: Option<&'a str>,
    ontology_description: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct ImportOverview {
    pub ontology_ns: String,
    pub ontology_ns_prefix: String,
    pub ontology_format: String,
    pub metadata: OntologyMetadata,
    pub terms: Vec<TermPage>,
    name: String,
    content: Option<String>,
}

impl ImportOverview {
    /// Overview whose metadata is looked up through `resolver`
    pub fn build(
        ontology_ns: &str,
        ontology_ns_prefix: &str,
        ontology_format: &str,
        resolver: &MetadataResolver<'_>,
    ) -> Self {
        let metadata = resolver.resolve(ontology_ns, ontology_ns_prefix);
        Self::with_metadata(ontology_ns, ontology_ns_prefix, ontology_format, metadata)
    }

    pub fn with_metadata(
        ontology_ns: &str,
        ontology_ns_prefix: &str,
        ontology_format: &str,
        metadata: OntologyMetadata,
    ) -> Self {
        Self {
            ontology_ns: ontology_ns.to_string(),
            ontology_ns_prefix: ontology_ns_prefix.to_string(),
            ontology_format: ontology_format.to_string(),
            metadata,
            terms: Vec::new(),
            name: format!("Mediawiki:Smw_import_{}", ontology_ns_prefix),
            content: None,
        }
    }

    pub fn push_term(&mut self, page: TermPage) {
        self.terms.push(page);
    }

    pub fn is_rendered(&self) -> bool {
        self.content.is_some()
    }

    /// Render the import page from the terms collected so far
    pub fn create_smw_import(&mut self, renderer: &PageRenderer) -> Result<()> {
        let entries: Vec<TermEntry<'_>> = self
            .terms
            .iter()
            .map(|page| {
                let term = page.term();
                TermEntry {
                    term: &term.term,
                    term_name: &term.term_name,
                    namespace_prefix: &term.namespace_prefix,
                    resource_type: term.resource_type.as_str(),
                    prop_datatype: term.prop_datatype(),
                }
            })
            .collect();

        let content = renderer.render(
            TemplateKind::SmwImport,
            &TemplateContext {
                ns_prefix: &self.ontology_ns_prefix,
                term_dict: &entries,
                term_name: None,
                page_info: Some(PageInfo {
                    ontology_ns: &self.ontology_ns,
                    ontology_ns_prefix: &self.ontology_ns_prefix,
                    ontology_name: &self.metadata.title,
                    ontology_version: self.metadata.version.as_deref(),
                    ontology_description: self.metadata.description.as_deref(),
                }),
                prop_datatype: None,
            },
        )?;

        self.content = Some(content);
        Ok(())
    }
}

impl WikiPage for ImportOverview {
    fn name(&self) -> &str {
        &self.name
    }

    fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}
