/**
 * datatype.rs
 * Semantic MediaWiki property datatypes and the XML Schema range table
 */

use serde::{Serialize, Serializer};

/// Value type of an SMW property (`[[Has type::...]]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropDatatype {
    Text,
    Number,
    Boolean,
    Date,
    Url,
    /// Reference to another wiki page
    Page,
}

impl PropDatatype {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropDatatype::Text => "Text",
            PropDatatype::Number => "Number",
            PropDatatype::Boolean => "Boolean",
            PropDatatype::Date => "Date",
            PropDatatype::Url => "URL",
            PropDatatype::Page => "Page",
        }
    }
}

impl std::fmt::Display for PropDatatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PropDatatype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Prefixed literal datatypes with a known SMW counterpart
pub const XSD_TO_SMW: &[(&str, PropDatatype)] = &[
    ("xsd:string", PropDatatype::Text),
    ("rdfs:Literal", PropDatatype::Text),
    ("xsd:Name", PropDatatype::Text),
    ("xsd:normalizedString", PropDatatype::Text),
    ("xsd:decimal", PropDatatype::Number),
    ("xsd:float", PropDatatype::Number),
    ("xsd:integer", PropDatatype::Number),
    ("xsd:nonNegativeInteger", PropDatatype::Number),
    ("xsd:positiveInteger", PropDatatype::Number),
    ("xsd:nonPositiveInteger", PropDatatype::Number),
    ("xsd:negativeInteger", PropDatatype::Number),
    ("xsd:int", PropDatatype::Number),
    ("xsd:double", PropDatatype::Number),
    ("xsd:long", PropDatatype::Number),
    ("xsd:short", PropDatatype::Number),
    ("xsd:unsignedLong", PropDatatype::Number),
    ("xsd:byte", PropDatatype::Number),
    ("xsd:boolean", PropDatatype::Boolean),
    ("xsd:dateTime", PropDatatype::Date),
    ("xsd:time", PropDatatype::Text),
    ("xsd:date", PropDatatype::Date),
    ("xsd:gYearMonth", PropDatatype::Date),
    ("xsd:gYear", PropDatatype::Date),
    ("xsd:gMonthDay", PropDatatype::Text),
    ("xsd:gDay", PropDatatype::Text),
    ("xsd:gMonth", PropDatatype::Text),
    ("xsd:anyURI", PropDatatype::Url),
    ("xsd:language", PropDatatype::Text),
];

pub fn lookup(prefixed_range: &str) -> Option<PropDatatype> {
    XSD_TO_SMW
        .iter()
        .find(|(range, _)| *range == prefixed_range)
        .map(|(_, datatype)| *datatype)
}

/// Datatype for a declared range; unknown ranges are Text
pub fn from_range(prefixed_range: &str) -> PropDatatype {
    lookup(prefixed_range).unwrap_or(PropDatatype::Text)
}
