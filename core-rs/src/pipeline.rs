/**
 * pipeline.rs
 * One full conversion run over the configured ontology imports
 *
 * Per import: load the ontology, evaluate the term query, classify every
 * term once, render its page, collect the pages into an import overview.
 * Pages are written to the wiki as they are rendered when a transport is
 * set. A failing import (load, parse or query) is skipped unless
 * fail-fast, before any of its pages are recorded or written.
 */

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use tracing::{debug, info, warn};

use crate::classify::TermClassifier;
use crate::config::{ImportConfig, OntologyImport};
use crate::drivers::{HttpFetcher, WikiError, WikiTransport};
use crate::errors::{Result, SmwError};
use crate::namespaces::{NamespaceTable, PrefixResolver};
use crate::ontology::{OntologySession, SparqlQuery};
use crate::pages::{ImportOverview, MetadataResolver, PageRenderer, TermPage, WikiPage};
use crate::report::{Report, ReportBuilder, ReportOptions, DEFAULT_REPORT_FILE};

/// Timeout of the ontology-URI probe for metadata
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(200);

/// Timeout for loading ontology documents
pub const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub write: bool,
    pub verbose: bool,
    pub output: bool,
    /// Abort on the first failing import instead of skipping it
    pub fail_fast: bool,
    pub report_path: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            write: false,
            verbose: false,
            output: false,
            fail_fast: false,
            report_path: PathBuf::from(DEFAULT_REPORT_FILE),
        }
    }
}

impl RunOptions {
    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            write: self.write,
            verbose: self.verbose,
            output: self.output,
        }
    }
}

/// An import that failed and was left out of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedImport {
    pub prefix: String,
    pub source: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct RunSummary {
    pub report: Report,
    pub overviews: Vec<ImportOverview>,
    pub skipped: Vec<SkippedImport>,
}

pub struct Pipeline<'a> {
    namespaces: NamespaceTable,
    renderer: PageRenderer,
    loader: HttpFetcher,
    probe: HttpFetcher,
    resolver: &'a mut dyn PrefixResolver,
    wiki: Option<&'a mut dyn WikiTransport>,
    options: RunOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        namespaces: NamespaceTable,
        renderer: PageRenderer,
        resolver: &'a mut dyn PrefixResolver,
        options: RunOptions,
    ) -> Result<Self> {
        Ok(Self {
            namespaces,
            renderer,
            loader: HttpFetcher::new(LOAD_TIMEOUT)?,
            probe: HttpFetcher::new(PROBE_TIMEOUT)?,
            resolver,
            wiki: None,
            options,
        })
    }

    /// Write pages through `wiki` as they are rendered
    pub fn with_wiki(mut self, wiki: &'a mut dyn WikiTransport) -> Self {
        self.wiki = Some(wiki);
        self
    }

    pub fn with_fetchers(mut self, loader: HttpFetcher, probe: HttpFetcher) -> Self {
        self.loader = loader;
        self.probe = probe;
        self
    }

    /// Run-wide prefix table, including namespaces registered during the run
    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    /// Process every import in order and build the report
    pub fn run(&mut self, config: &ImportConfig) -> Result<RunSummary> {
        let mut report = ReportBuilder::new(self.options.report_options())
            .with_output_path(self.options.report_path.clone());
        let mut overviews = Vec::new();
        let mut skipped = Vec::new();

        for import in &config.imports {
            match self.process_import(import, &mut report) {
                Ok(overview) => overviews.push(overview),
                Err(SmwError::Ontology(e)) if !self.options.fail_fast => {
                    warn!(prefix = %import.prefix, source = %import.source, error = %e, "skipping import");
                    skipped.push(SkippedImport {
                        prefix: import.prefix.clone(),
                        source: import.source.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let article_path = match (self.options.write, self.wiki.as_deref_mut()) {
            (true, Some(wiki)) => Some(wiki.article_path()?),
            _ => None,
        };

        let report = report.finalize(&overviews, article_path.as_deref())?;
        Ok(RunSummary {
            report,
            overviews,
            skipped,
        })
    }

    /// Convert one ontology into its term pages and import overview
    pub fn process_import(&mut self, import: &OntologyImport, report: &mut ReportBuilder) -> Result<ImportOverview> {
        let mut session = OntologySession::load(&import.source, &import.format, &self.namespaces, &self.loader)?;
        session.bind(&import.prefix, &import.namespace);

        let query = match &import.query {
            Some(path) => SparqlQuery::from_file(path)?,
            None => SparqlQuery::terms(),
        };

        let mut overview = ImportOverview::build(
            &import.namespace,
            &import.prefix,
            &import.format,
            &MetadataResolver {
                probe: &self.probe,
                loader: &self.loader,
                namespaces: &self.namespaces,
            },
        );

        // All rows are read before the first page is recorded or written
        let rows = session.evaluate(&query)?.collect::<std::result::Result<Vec<_>, _>>()?;
        let mut classifier = TermClassifier::new(&mut self.namespaces, &mut *self.resolver);
        let mut seen = HashSet::new();

        for row in rows {
            match row.value("term") {
                Some(term) if !seen.insert(term.to_string()) => {
                    debug!(term, "skipping repeated term row");
                    continue;
                }
                _ => {}
            }

            let term = classifier.classify(row, session.prefixes_mut())?;
            let page = TermPage::build(term, &self.renderer)?;

            report.record_page(&page);
            if self.options.write {
                if let Some(wiki) = self.wiki.as_deref_mut() {
                    write_page(&page, wiki)?;
                }
            }
            overview.push_term(page);
        }

        overview.create_smw_import(&self.renderer)?;
        if self.options.write {
            if let Some(wiki) = self.wiki.as_deref_mut() {
                write_page(&overview, wiki)?;
            }
        }

        info!(prefix = %import.prefix, terms = overview.terms.len(), "import processed");
        Ok(overview)
    }
}

/// Persist one page, printing the outcome.
///
/// Rejected edits and request failures are reported and the run goes on;
/// a failed login stops the run.
fn write_page(page: &dyn WikiPage, wiki: &mut dyn WikiTransport) -> Result<()> {
    match page.persist(wiki) {
        Ok(true) => println!("{}", format!("Wrote {} to wiki", page.name()).green()),
        Ok(false) => println!("{}", format!("Failed to write {} to wiki", page.name()).red()),
        Err(SmwError::Wiki(e @ WikiError::Login { .. })) => return Err(e.into()),
        Err(e) => {
            warn!(page = page.name(), error = %e, "wiki write failed");
            println!("{}", format!("Failed to write {} to wiki", page.name()).red());
        }
    }
    Ok(())
}
