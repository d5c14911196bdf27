/**
 * pages module
 *
 * - renderer: Handlebars templates for Category, Property and import pages
 * - term_page: one page per classified term
 * - import_overview: the `Mediawiki:Smw_import_<prefix>` page of an ontology
 */

pub mod import_overview;
pub mod renderer;
pub mod term_page;

use chrono::Local;
use tracing::{info, warn};

pub use import_overview::{ImportOverview, MetadataResolver, OntologyMetadata};
pub use renderer::{PageRenderer, TemplateContext, TemplateKind};
pub use term_page::TermPage;

use crate::drivers::{EditRequest, WikiTransport};
use crate::errors::Result;

/// A named, rendered wiki page
pub trait WikiPage {
    fn name(&self) -> &str;

    fn content(&self) -> &str;

    /// Write the page through `wiki`, replacing any existing content.
    ///
    /// Returns whether the wiki accepted the edit.
    fn persist(&self, wiki: &mut dyn WikiTransport) -> Result<bool> {
        let summary = format!("Edited by Bot at {}", Local::now().format("%Y-%m-%dT%H:%M:%S%.6f"));
        let accepted = wiki.edit(&EditRequest {
            page: self.name(),
            content: self.content(),
            summary: &summary,
            append: false,
            newpageonly: false,
        })?;

        if accepted {
            info!(page = self.name(), "page written");
        } else {
            warn!(page = self.name(), "wiki rejected edit");
        }
        Ok(accepted)
    }
}
