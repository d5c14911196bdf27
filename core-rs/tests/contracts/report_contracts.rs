//! Report Contract Tests
//!
//! The summary line format is read by operators and scripts alike.

use onto2smw_core::classify::{ClassifiedTerm, ResourceType};
use onto2smw_core::report::summary_line;
use onto2smw_core::{
    ImportOverview, OntologyMetadata, PageRenderer, PropDatatype, ReportBuilder, ReportOptions, ResultRow, TermPage,
    WikiPage,
};

fn term_page(renderer: &PageRenderer, name: &str, resource_type: ResourceType) -> TermPage {
    let iri = format!("http://example.org/onto#{}", name);
    TermPage::build(
        ClassifiedTerm {
            term: iri.clone(),
            term_name: name.to_string(),
            namespace: "http://example.org/onto#".to_string(),
            namespace_prefix: "ex".to_string(),
            resource_type,
            row: ResultRow::new().with_iri("term", &iri),
        },
        renderer,
    )
    .unwrap()
}

fn overview_with_three_terms() -> ImportOverview {
    let renderer = PageRenderer::new().unwrap();
    let mut overview = ImportOverview::with_metadata(
        "http://example.org/onto#",
        "ex",
        "turtle",
        OntologyMetadata::defaults("ex"),
    );
    overview.push_term(term_page(&renderer, "Foo", ResourceType::Category));
    overview.push_term(term_page(&renderer, "bar", ResourceType::Property(PropDatatype::Text)));
    overview.push_term(term_page(&renderer, "baz", ResourceType::Property(PropDatatype::Page)));
    overview.create_smw_import(&renderer).unwrap();
    overview
}

/// `{prefix} creates {page} with {N} terms`
#[test]
fn summary_line_format() {
    let overview = overview_with_three_terms();
    assert_eq!(
        summary_line(&overview, None),
        "ex creates Mediawiki:Smw_import_ex with 3 terms\n"
    );
    assert_eq!(overview.terms[0].name(), "Category:Foo");
}

/// The wiki base URL appears only for pages actually written
#[test]
fn article_path_requires_write_mode() {
    let overviews = vec![overview_with_three_terms()];
    let base = "https://wiki.example.org/wiki/";

    let dry = ReportBuilder::new(ReportOptions::default())
        .finalize(&overviews, Some(base))
        .unwrap();
    assert!(dry.text.contains("ex creates Mediawiki:Smw_import_ex with 3 terms\n"));
    assert!(!dry.text.contains(base));

    let live = ReportBuilder::new(ReportOptions {
        write: true,
        ..Default::default()
    })
    .finalize(&overviews, Some(base))
    .unwrap();
    assert!(live
        .text
        .contains("ex creates https://wiki.example.org/wiki/Mediawiki:Smw_import_ex with 3 terms\n"));
}

/// The report always opens with its banner
#[test]
fn report_header() {
    let report = ReportBuilder::new(ReportOptions::default()).finalize(&[], None).unwrap();
    assert_eq!(report.text, "\n*********** Import Report: ***********\n");
}
