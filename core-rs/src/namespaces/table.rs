/**
 * table.rs
 * Ordered prefix -> namespace bindings with scheme-agnostic lookup
 */

use serde_yaml::Mapping;
use tracing::debug;

use crate::errors::{Result, SmwError};
use crate::iri::swap_scheme;

const BUNDLED_NAMESPACES: &str = include_str!("../../resources/namespaces.yaml");

/// A resolved namespace for a term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceMatch {
    pub namespace: String,
    pub prefix: String,
}

/// Prefix bindings in insertion order.
///
/// A prefix may carry a trailing digit when two sources bound the same
/// prefix to different namespaces (`ex`, `ex1`, ...). Lookups always hand
/// back the canonical prefix with that digit removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceTable {
    bindings: Vec<(String, String)>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded from the namespaces bundled with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_yaml(BUNDLED_NAMESPACES)
    }

    /// Parse an ordered YAML mapping of `prefix: namespace`
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mapping: Mapping = serde_yaml::from_str(content)?;
        let mut table = Self::new();

        for (prefix, namespace) in mapping.iter() {
            let prefix = prefix.as_str().ok_or_else(|| {
                SmwError::Config(format!("Namespace prefix must be a string: {:?}", prefix))
            })?;
            let namespace = namespace.as_str().ok_or_else(|| {
                SmwError::Config(format!("Namespace for '{}' must be a string", prefix))
            })?;
            table.bind(prefix, namespace);
        }

        Ok(table)
    }

    /// Bind `prefix` to `namespace`, returning the prefix actually stored.
    ///
    /// Re-binding an identical pair is a no-op. A prefix already taken by a
    /// different namespace is stored with the first free digit suffix.
    pub fn bind(&mut self, prefix: &str, namespace: &str) -> String {
        let mut candidate = prefix.to_string();
        let mut suffix = 0u32;

        loop {
            match self.namespace_of(&candidate) {
                None => break,
                Some(existing) if existing == namespace => return candidate,
                Some(_) => {
                    suffix += 1;
                    candidate = format!("{}{}", prefix, suffix);
                }
            }
        }

        debug!(prefix = %candidate, namespace, "binding namespace");
        self.bindings.push((candidate.clone(), namespace.to_string()));
        candidate
    }

    /// Register a namespace supplied at run time; returns its canonical prefix
    pub fn register(&mut self, prefix: &str, namespace: &str) -> String {
        canonical_prefix(&self.bind(prefix, namespace)).to_string()
    }

    /// Find the namespace a term belongs to.
    ///
    /// A binding matches when its namespace occurs in the term or in the
    /// term's http/https counterpart. The default (empty) prefix never
    /// matches. First match in insertion order wins.
    pub fn lookup(&self, term: &str) -> Option<NamespaceMatch> {
        let swapped = swap_scheme(term);

        self.bindings
            .iter()
            .filter(|(prefix, namespace)| !prefix.is_empty() && !namespace.is_empty())
            .find(|(_, namespace)| term.contains(namespace.as_str()) || swapped.contains(namespace.as_str()))
            .map(|(prefix, namespace)| NamespaceMatch {
                namespace: namespace.clone(),
                prefix: canonical_prefix(prefix).to_string(),
            })
    }

    /// Render an IRI as `prefix:local`, or `<iri>` when no binding covers it
    pub fn compact(&self, iri: &str) -> String {
        for (prefix, namespace) in &self.bindings {
            if prefix.is_empty() || namespace.is_empty() {
                continue;
            }
            if let Some(local) = iri.strip_prefix(namespace.as_str()) {
                if !local.is_empty() && !local.contains(['/', '#']) {
                    return format!("{}:{}", canonical_prefix(prefix), local);
                }
            }
        }
        format!("<{}>", iri)
    }

    pub fn namespace_of(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == prefix)
            .map(|(_, namespace)| namespace.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Strip one trailing disambiguation digit from a prefix
pub fn canonical_prefix(prefix: &str) -> &str {
    match prefix.chars().last() {
        Some(last) if last.is_numeric() => &prefix[..prefix.len() - last.len_utf8()],
        _ => prefix,
    }
}
