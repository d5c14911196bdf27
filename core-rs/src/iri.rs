//! IRI helpers shared by the classifier and the page templates

/// Local name of an IRI: the fragment when there is one, otherwise the
/// last path segment.
///
/// ```
/// use onto2smw_core::iri::url_termination;
///
/// assert_eq!(url_termination("http://xmlns.com/foaf/0.1/Person"), "Person");
/// assert_eq!(url_termination("http://www.w3.org/2002/07/owl#Class"), "Class");
/// ```
pub fn url_termination(iri: &str) -> &str {
    let (without_fragment, fragment) = match iri.split_once('#') {
        Some((head, fragment)) => (head, fragment),
        None => (iri, ""),
    };
    if !fragment.is_empty() {
        return fragment;
    }

    let path = without_fragment
        .split_once('?')
        .map(|(head, _)| head)
        .unwrap_or(without_fragment);

    path.rsplit('/').next().unwrap_or("")
}

/// The http/https counterpart of an IRI, used for scheme-agnostic matching.
pub fn swap_scheme(iri: &str) -> String {
    if let Some(rest) = iri.strip_prefix("https") {
        format!("http{}", rest)
    } else if let Some(rest) = iri.strip_prefix("http") {
        format!("https{}", rest)
    } else {
        iri.to_string()
    }
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
