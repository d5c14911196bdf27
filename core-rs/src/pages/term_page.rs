/**
 * term_page.rs
 * Category and Property pages built from classified terms
 */

use super::renderer::{PageRenderer, TemplateContext, TemplateKind};
use super::WikiPage;
use crate::classify::{ClassifiedTerm, ResourceType};
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct TermPage {
    name: String,
    content: String,
    term: ClassifiedTerm,
}

impl TermPage {
    /// Render the Category or Property page for `term`
    pub fn build(term: ClassifiedTerm, renderer: &PageRenderer) -> Result<Self> {
        let kind = match term.resource_type {
            ResourceType::Category => TemplateKind::Category,
            ResourceType::Property(_) => TemplateKind::Property,
        };

        let content = renderer.render(
            kind,
            &TemplateContext {
                ns_prefix: &term.namespace_prefix,
                term_dict: &term.row,
                term_name: Some(term.term_name.as_str()),
                page_info: None::<()>,
                prop_datatype: term.prop_datatype(),
            },
        )?;

        Ok(Self {
            name: term.page_name(),
            content,
            term,
        })
    }

    pub fn term(&self) -> &ClassifiedTerm {
        &self.term
    }
}

impl WikiPage for TermPage {
    fn name(&self) -> &str {
        &self.name
    }

    fn content(&self) -> &str {
        &self.content
    }
}
