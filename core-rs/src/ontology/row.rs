/**
 * row.rs
 * Result rows produced by SPARQL evaluation
 */

use oxigraph::model::Term;
use oxigraph::sparql::QuerySolution;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One bound value in a result row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Iri(String),
    Literal {
        value: String,
        datatype: String,
        language: Option<String>,
    },
    Blank(String),
}

impl Binding {
    /// IRI string, literal lexical form or blank node id
    pub fn value(&self) -> &str {
        match self {
            Binding::Iri(iri) => iri,
            Binding::Literal { value, .. } => value,
            Binding::Blank(id) => id,
        }
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Binding::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Binding::Literal {
            value: value.into(),
            datatype: "http://www.w3.org/2001/XMLSchema#string".to_string(),
            language: None,
        }
    }
}

impl From<&Term> for Binding {
    fn from(term: &Term) -> Self {
        match term {
            Term::NamedNode(node) => Binding::Iri(node.as_str().to_string()),
            Term::BlankNode(node) => Binding::Blank(node.as_str().to_string()),
            Term::Literal(literal) => Binding::Literal {
                value: literal.value().to_string(),
                datatype: literal.datatype().as_str().to_string(),
                language: literal.language().map(str::to_string),
            },
            #[allow(unreachable_patterns)]
            other => Binding::Blank(other.to_string()),
        }
    }
}

/// Named bindings of one solution, in the order the engine reported them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRow {
    bindings: Vec<(String, Binding)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, binding: Binding) -> Self {
        self.insert(name, binding);
        self
    }

    pub fn with_iri(self, name: &str, iri: &str) -> Self {
        self.with(name, Binding::Iri(iri.to_string()))
    }

    pub fn with_literal(self, name: &str, value: &str) -> Self {
        self.with(name, Binding::literal(value))
    }

    pub fn insert(&mut self, name: &str, binding: Binding) {
        match self.bindings.iter_mut().find(|(bound, _)| bound == name) {
            Some((_, existing)) => *existing = binding,
            None => self.bindings.push((name.to_string(), binding)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|(bound, _)| bound == name).map(|(_, b)| b)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(Binding::value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(name, binding)| (name.as_str(), binding))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl From<&QuerySolution> for ResultRow {
    fn from(solution: &QuerySolution) -> Self {
        let mut row = ResultRow::new();
        for (variable, term) in solution.iter() {
            row.insert(variable.as_str(), Binding::from(term));
        }
        row
    }
}

/// Rows reach templates as a plain `name -> value` record
impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bindings.len()))?;
        for (name, binding) in &self.bindings {
            map.serialize_entry(name, binding.value())?;
        }
        map.end()
    }
}
