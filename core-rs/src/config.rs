/**
 * config.rs
 * Parser for import configuration files (YAML format)
 *
 * Format:
 * ```yaml
 * imports:
 *   - source: https://www.w3.org/2004/02/skos/core.rdf
 *     format: xml
 *     namespace: http://www.w3.org/2004/02/skos/core#
 *     prefix: skos
 *   - source: ontologies/local.ttl
 *     format: turtle
 *     namespace: http://example.org/onto#
 *     prefix: ex
 *     query: queries/custom_terms.rq
 * templates: templates/          # optional .hbs overrides
 * wiki:                          # only needed with --write
 *   api: https://wiki.example.org/w/api.php
 *   user: Admin@ontology2smw
 *   password: secret             # or SMW_BOT_PASSWORD
 * ```
 */

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::drivers::read_text;
use crate::errors::{Result, SmwError};
use crate::ontology::{parse_format, OntologySource};

pub const DEFAULT_CONFIG_FILE: &str = "ontology2smw.yaml";

/// Environment variable overriding `wiki.password`
pub const PASSWORD_ENV: &str = "SMW_BOT_PASSWORD";

/// Import configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ImportConfig {
    #[serde(default)]
    pub imports: Vec<OntologyImport>,

    /// Directory holding template overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki: Option<WikiConfig>,
}

/// One ontology to convert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OntologyImport {
    /// Local path, `file://` URI or `http(s)://` URI
    pub source: String,
    /// RDF serialization name, e.g. `xml` or `turtle`
    pub format: String,
    pub namespace: String,
    pub prefix: String,
    /// Term query replacing the bundled one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<PathBuf>,
}

/// MediaWiki API credentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WikiConfig {
    pub api: String,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl WikiConfig {
    /// Password from `SMW_BOT_PASSWORD`, else from the file
    pub fn password(&self) -> Result<String> {
        env::var(PASSWORD_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .or_else(|| self.password.clone())
            .ok_or_else(|| {
                SmwError::Config(format!(
                    "no wiki password: set wiki.password or {}",
                    PASSWORD_ENV
                ))
            })
    }
}

impl ImportConfig {
    /// Load an import configuration from `path`.
    ///
    /// Relative `source`, `query` and `templates` paths are resolved against
    /// the directory containing the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Like `load`, without validation
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_text(path)?;

        let mut config = Self::from_yaml(&content)?;
        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse without validating or resolving paths
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| SmwError::Config(format!("Invalid import configuration YAML: {}", e)))
    }

    /// Configuration holding a single import
    pub fn single(import: OntologyImport) -> Self {
        Self {
            imports: vec![import],
            ..Default::default()
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        for import in &mut self.imports {
            if let OntologySource::File(path) = OntologySource::parse(&import.source) {
                if path.is_relative() && !import.source.starts_with("file://") {
                    import.source = base.join(path).display().to_string();
                }
            }
            if let Some(query) = import.query.as_mut().filter(|q| q.is_relative()) {
                *query = base.join(&*query);
            }
        }
        if let Some(templates) = self.templates.as_mut().filter(|t| t.is_relative()) {
            *templates = base.join(&*templates);
        }
    }

    /// Validate configuration structure
    ///
    /// Ensures:
    /// - at least one import is configured
    /// - source, namespace and prefix are non-empty
    /// - the format is a known RDF serialization
    /// - prefixes are unique
    pub fn validate(&self) -> Result<()> {
        if self.imports.is_empty() {
            return Err(SmwError::ValidationError(
                "imports cannot be empty".to_string(),
            ));
        }

        for (index, import) in self.imports.iter().enumerate() {
            if import.source.trim().is_empty() {
                return Err(SmwError::ValidationError(format!(
                    "imports[{}].source cannot be empty",
                    index
                )));
            }

            if import.namespace.trim().is_empty() {
                return Err(SmwError::ValidationError(format!(
                    "imports[{}].namespace cannot be empty",
                    index
                )));
            }

            if import.prefix.trim().is_empty() {
                return Err(SmwError::ValidationError(format!(
                    "imports[{}].prefix cannot be empty",
                    index
                )));
            }

            parse_format(&import.format).map_err(|e| {
                SmwError::ValidationError(format!("imports[{}].format: {}", index, e))
            })?;

            if self.imports[..index].iter().any(|other| other.prefix == import.prefix) {
                return Err(SmwError::ValidationError(format!(
                    "imports[{}].prefix '{}' is used by an earlier import",
                    index, import.prefix
                )));
            }
        }

        if let Some(wiki) = &self.wiki {
            if wiki.api.trim().is_empty() || wiki.user.trim().is_empty() {
                return Err(SmwError::ValidationError(
                    "wiki.api and wiki.user cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
