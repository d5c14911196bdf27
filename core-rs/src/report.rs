//! Import report
//!
//! One summary line per ontology import. Verbose runs also collect the
//! full content of every rendered page; with `--output` the collected
//! pages and the summary are written to `report.txt`.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::drivers::write_text;
use crate::errors::{Result, SmwError};
use crate::pages::{ImportOverview, WikiPage};

pub const DEFAULT_REPORT_FILE: &str = "report.txt";

const REPORT_HEADER: &str = "\n*********** Import Report: ***********\n";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Pages were written to the live wiki
    pub write: bool,
    /// Record full page content
    pub verbose: bool,
    /// Persist the report to disk
    pub output: bool,
}

/// Finished report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Header plus one summary line per import
    pub text: String,
    /// Rendered pages recorded in verbose mode
    pub pages: String,
    pub written_to: Option<PathBuf>,
}

/// Accumulates page content during a run, then produces a `Report`
#[derive(Debug)]
pub struct ReportBuilder {
    options: ReportOptions,
    cache: String,
    output_path: PathBuf,
}

impl ReportBuilder {
    pub fn new(options: ReportOptions) -> Self {
        Self {
            options,
            cache: String::new(),
            output_path: PathBuf::from(DEFAULT_REPORT_FILE),
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn options(&self) -> ReportOptions {
        self.options
    }

    pub fn cache(&self) -> &str {
        &self.cache
    }

    /// Append a page section to the cache; no-op unless verbose
    pub fn record_page(&mut self, page: &dyn WikiPage) {
        if !self.options.verbose {
            return;
        }
        self.cache.push_str(&section_header(page.name()));
        self.cache.push_str(page.content());
    }

    /// Build the summary and, with `output`, write recorded pages plus summary to disk.
    ///
    /// `article_path` is the wiki base URL prepended to page names; it is
    /// only used in write mode.
    pub fn finalize(mut self, overviews: &[ImportOverview], article_path: Option<&str>) -> Result<Report> {
        let mut text = String::from(REPORT_HEADER);

        for overview in overviews {
            self.record_page(overview);
            text.push_str(&summary_line(overview, self.options.write.then_some(article_path).flatten()));
        }

        let mut written_to = None;
        if self.options.output {
            write_report(&self.output_path, &format!("{}{}", self.cache, text))?;
            info!(path = %self.output_path.display(), "report written");
            written_to = Some(self.output_path);
        }

        Ok(Report {
            text,
            pages: self.cache,
            written_to,
        })
    }
}

fn section_header(name: &str) -> String {
    let rule = "-".repeat(15);
    format!("\n{rule}\n{name}\n{rule}\n")
}

/// `"{prefix} creates {page} with {n} terms\n"`
pub fn summary_line(overview: &ImportOverview, article_path: Option<&str>) -> String {
    format!(
        "{} creates {}{} with {} terms\n",
        overview.ontology_ns_prefix,
        article_path.unwrap_or(""),
        overview.name(),
        overview.terms.len()
    )
}

fn write_report(path: &Path, content: &str) -> Result<()> {
    write_text(path, content).map_err(|source| SmwError::ReportWrite {
        path: path.display().to_string(),
        source,
    })
}
