//! Error types for ontology2smw

use thiserror::Error;

use crate::drivers::{FetchError, WikiError};
use crate::ontology::OntologyError;

#[derive(Error, Debug)]
pub enum SmwError {
    #[error("Ontology error: {0}")]
    Ontology(#[from] OntologyError),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Wiki error: {0}")]
    Wiki(#[from] WikiError),

    #[error("HTTP error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Namespace prompt failed: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<handlebars::RenderError> for SmwError {
    fn from(err: handlebars::RenderError) -> Self {
        SmwError::Template(err.to_string())
    }
}

impl From<handlebars::TemplateError> for SmwError {
    fn from(err: handlebars::TemplateError) -> Self {
        SmwError::Template(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SmwError>;
