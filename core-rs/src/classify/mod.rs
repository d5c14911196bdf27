/**
 * classify module
 *
 * Decides, for each term row of an ontology query, which namespace prefix
 * it belongs to, whether it becomes an SMW Category or Property, and for
 * properties which SMW datatype its range maps to.
 */

pub mod datatype;

use tracing::{info, warn};

pub use datatype::PropDatatype;

use crate::errors::Result;
use crate::iri::{capitalize, url_termination};
use crate::namespaces::{NamespaceMatch, NamespaceTable, PrefixResolver};
use crate::ontology::{Binding, OntologyError, ResultRow};

/// SMW page kind of a term; properties carry their datatype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Category,
    Property(PropDatatype),
}

impl ResourceType {
    /// Wiki namespace of the page: `Category` or `Property`
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Category => "Category",
            ResourceType::Property(_) => "Property",
        }
    }

    pub fn datatype(&self) -> Option<PropDatatype> {
        match self {
            ResourceType::Category => None,
            ResourceType::Property(datatype) => Some(*datatype),
        }
    }
}

/// A result row with its namespace and SMW classification resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedTerm {
    pub term: String,
    pub term_name: String,
    pub namespace: String,
    pub namespace_prefix: String,
    pub resource_type: ResourceType,
    pub row: ResultRow,
}

impl ClassifiedTerm {
    pub fn prop_datatype(&self) -> Option<PropDatatype> {
        self.resource_type.datatype()
    }

    /// `Category:<name>` or `Property:<name>`
    pub fn page_name(&self) -> String {
        format!("{}:{}", self.resource_type.as_str(), self.term_name)
    }
}

/// Classifies rows against a session's prefixes, falling back to the
/// run-wide table and finally to the operator.
pub struct TermClassifier<'a> {
    namespaces: &'a mut NamespaceTable,
    resolver: &'a mut dyn PrefixResolver,
}

impl<'a> TermClassifier<'a> {
    pub fn new(namespaces: &'a mut NamespaceTable, resolver: &'a mut dyn PrefixResolver) -> Self {
        Self { namespaces, resolver }
    }

    pub fn classify(&mut self, row: ResultRow, session_prefixes: &mut NamespaceTable) -> Result<ClassifiedTerm> {
        let term = row
            .value("term")
            .ok_or_else(|| OntologyError::QueryError("result row has no ?term binding".to_string()))?
            .to_string();
        let term_name = url_termination(&term).to_string();

        let NamespaceMatch { namespace, prefix } =
            self.resolve_namespace(&term, &term_name, session_prefixes)?;
        let resource_type = classify_resource(&row, session_prefixes);

        Ok(ClassifiedTerm {
            term,
            term_name,
            namespace,
            namespace_prefix: prefix,
            resource_type,
            row,
        })
    }

    fn resolve_namespace(
        &mut self,
        term: &str,
        term_name: &str,
        session_prefixes: &mut NamespaceTable,
    ) -> Result<NamespaceMatch> {
        if let Some(found) = session_prefixes.lookup(term) {
            return Ok(found);
        }

        if let Some(found) = self.namespaces.lookup(term) {
            session_prefixes.register(&found.prefix, &found.namespace);
            return Ok(found);
        }

        let namespace = term.strip_suffix(term_name).unwrap_or(term).to_string();
        let answer = self.resolver.resolve_unknown(&namespace)?;
        let prefix = self.namespaces.register(&answer, &namespace);
        session_prefixes.register(&answer, &namespace);

        info!(prefix = %prefix, namespace = %namespace, "registered namespace");
        Ok(NamespaceMatch { namespace, prefix })
    }
}

/// Category or Property, with the property datatype.
///
/// An explicit `smw_datatype` binding wins: `Category` means a category,
/// anything else a property. Otherwise a `termType` ending in `Class` is a
/// category and everything else a property.
pub fn classify_resource(row: &ResultRow, prefixes: &NamespaceTable) -> ResourceType {
    let is_category = match row.value("smw_datatype") {
        Some(explicit) => explicit == "Category",
        None => {
            let term_type = row.value("termType").unwrap_or("");
            capitalize(url_termination(term_type)) == "Class"
        }
    };

    if is_category {
        ResourceType::Category
    } else {
        ResourceType::Property(property_datatype(row, prefixes))
    }
}

/// SMW datatype of a property row.
///
/// A declared range is looked up by its prefixed name. Without one,
/// datatype properties default to Text and object properties to Page.
pub fn property_datatype(row: &ResultRow, prefixes: &NamespaceTable) -> PropDatatype {
    if let Some(range) = row.get("range").filter(|range| !range.value().is_empty()) {
        let prefixed = match range {
            Binding::Iri(iri) => prefixes.compact(iri),
            other => other.value().to_string(),
        };
        return datatype::from_range(&prefixed);
    }

    let term_type = row.value("termType").unwrap_or("");
    if term_type.contains("DatatypeProperty") {
        PropDatatype::Text
    } else if term_type.contains("ObjectProperty") {
        PropDatatype::Page
    } else {
        warn!(
            term = row.value("term").unwrap_or(""),
            term_type,
            "property has no range and no datatype/object kind; using Text"
        );
        PropDatatype::Text
    }
}
