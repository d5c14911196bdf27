/**
 * renderer.rs
 * Handlebars rendering of Category, Property and import pages
 */

use std::path::Path;

use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde::Serialize;
use tracing::debug;

use crate::classify::PropDatatype;
use crate::errors::Result;
use crate::iri;

/// The three page templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Category,
    Property,
    SmwImport,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [TemplateKind::Category, TemplateKind::Property, TemplateKind::SmwImport];

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Category => "mw_category",
            TemplateKind::Property => "mw_property",
            TemplateKind::SmwImport => "mw_smw_import",
        }
    }

    fn bundled(&self) -> &'static str {
        match self {
            TemplateKind::Category => include_str!("../../resources/templates/mw_category.hbs"),
            TemplateKind::Property => include_str!("../../resources/templates/mw_property.hbs"),
            TemplateKind::SmwImport => include_str!("../../resources/templates/mw_smw_import.hbs"),
        }
    }
}

/// Named values every template receives
#[derive(Debug, Serialize)]
pub struct TemplateContext<'a, T: Serialize, P: Serialize> {
    pub ns_prefix: &'a str,
    pub term_dict: T,
    pub term_name: Option<&'a str>,
    pub page_info: Option<P>,
    pub prop_datatype: Option<PropDatatype>,
}

handlebars_helper!(url_termination_helper: |value: str| iri::url_termination(value).to_string());

pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    /// Renderer with the bundled templates
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        registry.register_helper("url_termination", Box::new(url_termination_helper));

        for kind in TemplateKind::ALL {
            registry.register_template_string(kind.name(), kind.bundled())?;
        }

        Ok(Self { registry })
    }

    /// Bundled templates, replaced by any `<name>.hbs` found in `dir`
    pub fn with_template_dir(dir: &Path) -> Result<Self> {
        let mut renderer = Self::new()?;

        for kind in TemplateKind::ALL {
            let path = dir.join(format!("{}.hbs", kind.name()));
            if path.is_file() {
                debug!(template = kind.name(), path = %path.display(), "using template override");
                renderer.registry.register_template_file(kind.name(), &path)?;
            }
        }

        Ok(renderer)
    }

    pub fn render<T: Serialize, P: Serialize>(
        &self,
        kind: TemplateKind,
        context: &TemplateContext<'_, T, P>,
    ) -> Result<String> {
        Ok(self.registry.render(kind.name(), context)?)
    }
}
