//! Integration tests for a complete conversion run
//!
//! Tests the full pipeline including:
//! - Config loading with relative paths
//! - Ontology loading and term classification
//! - Interactive prefix registration
//! - Page writes through a wiki transport
//! - Report persistence

#[path = "../common/http_fixture.rs"]
mod http_fixture;

use std::fs;
use std::time::Duration;

use http_fixture::{FixtureResponse, FixtureServer};
use onto2smw_core::drivers::WikiError;
use onto2smw_core::{
    EditRequest, HttpFetcher, ImportConfig, NamespaceTable, PageRenderer, Pipeline, RetryPolicy, RunOptions,
    SmwError, WikiPage, WikiTransport,
};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingWiki {
    edits: Vec<(String, String, String)>,
}

impl WikiTransport for RecordingWiki {
    fn edit(&mut self, request: &EditRequest<'_>) -> Result<bool, WikiError> {
        self.edits.push((
            request.page.to_string(),
            request.content.to_string(),
            request.summary.to_string(),
        ));
        Ok(true)
    }

    fn article_path(&mut self) -> Result<String, WikiError> {
        Ok("https://wiki.example.org/wiki/".to_string())
    }
}

fn quick_fetcher() -> HttpFetcher {
    HttpFetcher::new(Duration::from_secs(2)).unwrap().with_policy(RetryPolicy {
        retries: 0,
        ..Default::default()
    })
}

fn zoo_ontology(namespace: &str) -> String {
    format!(
        r#"@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix zoo: <{ns}> .

zoo:Animal a owl:Class ;
    rdfs:label "Animal"@en ;
    rdfs:comment "Anything kept at the zoo."@en .
zoo:Keeper a owl:Class .
zoo:Lion a owl:Class ; rdfs:subClassOf zoo:Animal .
zoo:legs a owl:DatatypeProperty ; rdfs:domain zoo:Animal ; rdfs:range xsd:nonNegativeInteger .
zoo:bornOn a owl:DatatypeProperty ; rdfs:range xsd:date .
zoo:caredForBy a owl:ObjectProperty ; rdfs:range zoo:Keeper .
zoo:nickname a owl:DatatypeProperty .
"#,
        ns = namespace
    )
}

const PLANTS: &str = r#"@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

<https://plants.example.org/terms#Tree> a rdfs:Class .
<https://plants.example.org/terms#height> a rdf:Property .
"#;

const PLANTS_QUERY: &str = r#"SELECT ?term ?termType ?smw_datatype
WHERE {
  ?term a ?termType .
  BIND(IF(?termType = rdfs:Class, "Category", "Number") AS ?smw_datatype)
}
ORDER BY ?term
"#;

const ZOO_METADATA: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:owl="http://www.w3.org/2002/07/owl#"
         xmlns:dcterms="http://purl.org/dc/terms/">
  <owl:Ontology rdf:about="http://example.org/zoo">
    <dcterms:title>Zoo Vocabulary</dcterms:title>
  </owl:Ontology>
</rdf:RDF>
"#;

#[test]
fn test_complete_run_with_two_imports() {
    let temp_dir = TempDir::new().unwrap();
    let server = FixtureServer::start(|_| FixtureResponse::ok("application/rdf+xml", ZOO_METADATA));
    let zoo_ns = server.url("/zoo#");
    let plants_ns = server.url("/plants#");

    // 1. Ontologies, custom query and config next to each other
    fs::create_dir_all(temp_dir.path().join("ontologies")).unwrap();
    fs::write(temp_dir.path().join("ontologies/zoo.ttl"), zoo_ontology(&zoo_ns)).unwrap();
    fs::write(temp_dir.path().join("ontologies/plants.ttl"), PLANTS).unwrap();
    fs::write(temp_dir.path().join("plants.rq"), PLANTS_QUERY).unwrap();

    let config_path = temp_dir.path().join("ontology2smw.yaml");
    fs::write(
        &config_path,
        format!(
            r#"imports:
  - source: ontologies/zoo.ttl
    format: turtle
    namespace: "{zoo_ns}"
    prefix: zoo
  - source: ontologies/plants.ttl
    format: ttl
    namespace: "{plants_ns}"
    prefix: plant
    query: plants.rq
"#
        ),
    )
    .unwrap();
    let config = ImportConfig::load(&config_path).unwrap();

    // 2. Run with both namespaces unknown to the bundled table
    let mut prompted = Vec::new();
    let mut resolver = |namespace: &str| {
        prompted.push(namespace.to_string());
        if namespace.contains("plants") {
            "plant".to_string()
        } else {
            "zoo".to_string()
        }
    };
    let mut wiki = RecordingWiki::default();
    let report_path = temp_dir.path().join("out/report.txt");

    let mut pipeline = Pipeline::new(
        NamespaceTable::bundled().unwrap(),
        PageRenderer::new().unwrap(),
        &mut resolver,
        RunOptions {
            write: true,
            verbose: true,
            output: true,
            fail_fast: true,
            report_path: report_path.clone(),
        },
    )
    .unwrap()
    .with_fetchers(quick_fetcher(), quick_fetcher())
    .with_wiki(&mut wiki);

    let summary = pipeline.run(&config).unwrap();
    // Declared and configured prefixes stay with their session; answers are run-wide
    assert_eq!(pipeline.namespaces().namespace_of("zoo"), None);
    assert_eq!(
        pipeline.namespaces().namespace_of("plant"),
        Some("https://plants.example.org/terms#")
    );
    drop(pipeline);

    // 3. Only the namespace neither declared nor configured is prompted
    assert_eq!(prompted, vec!["https://plants.example.org/terms#".to_string()]);

    // 4. Zoo terms classified
    let zoo = &summary.overviews[0];
    assert_eq!(zoo.metadata.title, "Zoo Vocabulary");
    let pages: Vec<(&str, Option<&str>)> = zoo
        .terms
        .iter()
        .map(|page| (page.name(), page.term().prop_datatype().map(|d| d.as_str())))
        .collect();
    assert!(pages.contains(&("Category:Animal", None)));
    assert!(pages.contains(&("Category:Lion", None)));
    assert!(pages.contains(&("Property:legs", Some("Number"))));
    assert!(pages.contains(&("Property:bornOn", Some("Date"))));
    assert!(pages.contains(&("Property:caredForBy", Some("Text"))));
    assert!(pages.contains(&("Property:nickname", Some("Text"))));
    assert_eq!(zoo.terms.len(), 7);
    assert!(zoo.terms.iter().all(|page| page.term().namespace_prefix == "zoo"));

    let lion = zoo.terms.iter().find(|p| p.name() == "Category:Lion").unwrap();
    assert!(lion.content().contains("[[Category:Animal]]"));

    // 5. smw_datatype from the override query decided the page kind
    let plants = &summary.overviews[1];
    let plant_pages: Vec<&str> = plants.terms.iter().map(|p| p.name()).collect();
    assert_eq!(plant_pages, vec!["Category:Tree", "Property:height"]);
    assert!(plants.content().contains(" height|Type:Text"));
    assert!(plants.content().contains(" Tree|Category"));

    // 6. Every term page written before its overview
    let written: Vec<&str> = wiki.edits.iter().map(|(page, _, _)| page.as_str()).collect();
    assert_eq!(written.len(), 7 + 1 + 2 + 1);
    assert_eq!(written[7], "Mediawiki:Smw_import_zoo");
    assert_eq!(written[10], "Mediawiki:Smw_import_plant");
    assert!(wiki.edits[0].2.starts_with("Edited by Bot at "));

    // 7. Report lines carry the wiki URL, file holds pages and summary
    assert!(summary
        .report
        .text
        .contains("zoo creates https://wiki.example.org/wiki/Mediawiki:Smw_import_zoo with 7 terms\n"));
    assert!(summary
        .report
        .text
        .contains("plant creates https://wiki.example.org/wiki/Mediawiki:Smw_import_plant with 2 terms\n"));

    let saved = fs::read_to_string(&report_path).unwrap();
    assert!(saved.contains("\n---------------\nCategory:Animal\n---------------\n"));
    assert!(saved.contains("Anything kept at the zoo."));
    assert!(saved.ends_with(&summary.report.text));
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("plants.ttl");
    fs::write(&source, PLANTS).unwrap();

    let config = ImportConfig::from_yaml(&format!(
        "imports:\n  - source: {}\n    format: turtle\n    namespace: http://127.0.0.1:9/none#\n    prefix: plant\n",
        source.display()
    ))
    .unwrap();

    let mut resolver = |_: &str| "plant".to_string();
    let mut pipeline = Pipeline::new(
        NamespaceTable::bundled().unwrap(),
        PageRenderer::new().unwrap(),
        &mut resolver,
        RunOptions {
            report_path: temp_dir.path().join("report.txt"),
            ..Default::default()
        },
    )
    .unwrap()
    .with_fetchers(quick_fetcher(), quick_fetcher());

    let summary = pipeline.run(&config).unwrap();
    assert!(summary.report.written_to.is_none());
    assert!(summary.report.pages.is_empty());
    assert!(!temp_dir.path().join("report.txt").exists());
    assert!(summary
        .report
        .text
        .contains("plant creates Mediawiki:Smw_import_plant with 2 terms"));
}

#[test]
fn test_malformed_ontology_with_fail_fast() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("broken.ttl");
    fs::write(&source, "this is not turtle .").unwrap();

    let config = ImportConfig::from_yaml(&format!(
        "imports:\n  - source: {}\n    format: turtle\n    namespace: http://example.org/broken#\n    prefix: broken\n",
        source.display()
    ))
    .unwrap();

    let mut resolver = |_: &str| "broken".to_string();
    let mut pipeline = Pipeline::new(
        NamespaceTable::bundled().unwrap(),
        PageRenderer::new().unwrap(),
        &mut resolver,
        RunOptions {
            fail_fast: true,
            ..Default::default()
        },
    )
    .unwrap()
    .with_fetchers(quick_fetcher(), quick_fetcher());

    let err = pipeline.run(&config).unwrap_err();
    assert!(matches!(err, SmwError::Ontology(_)));
}
