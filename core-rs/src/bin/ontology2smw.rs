//! ontology2smw - import RDF ontologies into Semantic MediaWiki
//!
//! Dry run by default: pages are rendered and summarized in a report.
//! `--write` sends them to the wiki configured in the `wiki:` section.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use onto2smw_core::config::DEFAULT_CONFIG_FILE;
use onto2smw_core::report::DEFAULT_REPORT_FILE;
use onto2smw_core::{
    ImportConfig, InteractivePrefixResolver, MediaWikiClient, NamespaceTable, OntologyImport, PageRenderer, Pipeline,
    RunOptions,
};

#[derive(Parser)]
#[command(name = "ontology2smw", version, about = "Import RDF ontologies into Semantic MediaWiki", long_about = None)]
struct Cli {
    /// Write the pages to the wiki
    #[arg(long)]
    write: bool,

    /// Include the content of every page in the report
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Save the report to report.txt
    #[arg(long)]
    output: bool,

    /// Stop at the first ontology that fails to load or query
    #[arg(long)]
    fail_fast: bool,

    /// Import configuration (YAML)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Ontology file or URI; replaces the imports of the config file
    #[arg(long, requires_all = ["namespace", "prefix"])]
    source: Option<String>,

    /// RDF format of --source
    #[arg(long, default_value = "xml")]
    format: String,

    /// Namespace URI of --source
    #[arg(long)]
    namespace: Option<String>,

    /// Prefix of --source
    #[arg(long)]
    prefix: Option<String>,

    /// Term query replacing the bundled one for --source
    #[arg(long)]
    query: Option<PathBuf>,

    /// Directory with template overrides (mw_category.hbs, mw_property.hbs, mw_smw_import.hbs)
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Report file used with --output
    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    report_path: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<ImportConfig> {
    let Some(source) = &cli.source else {
        return ImportConfig::load(&cli.config)
            .with_context(|| format!("Failed to load import configuration {}", cli.config.display()));
    };

    // Keep wiki credentials and templates from the file, replace the imports
    let mut config = if cli.config.exists() {
        ImportConfig::read(&cli.config)
            .with_context(|| format!("Failed to read import configuration {}", cli.config.display()))?
    } else {
        ImportConfig::default()
    };
    config.imports = vec![OntologyImport {
        source: source.clone(),
        format: cli.format.clone(),
        namespace: cli.namespace.clone().unwrap_or_default(),
        prefix: cli.prefix.clone().unwrap_or_default(),
        query: cli.query.clone(),
    }];
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = load_config(&cli)?;
    info!(imports = config.imports.len(), write = cli.write, "starting import");

    let namespaces = NamespaceTable::bundled().context("Failed to read bundled namespaces")?;
    let renderer = match cli.templates.as_ref().or(config.templates.as_ref()) {
        Some(dir) => PageRenderer::with_template_dir(dir)
            .with_context(|| format!("Failed to load templates from {}", dir.display()))?,
        None => PageRenderer::new()?,
    };

    let mut wiki = if cli.write {
        let Some(wiki_config) = &config.wiki else {
            bail!("--write needs a wiki: section in {}", cli.config.display());
        };
        let mut client = MediaWikiClient::new(&wiki_config.api, &wiki_config.user, &wiki_config.password()?)?;
        client
            .login()
            .with_context(|| format!("Failed to log in to {}", wiki_config.api))?;
        Some(client)
    } else {
        None
    };

    let mut resolver = InteractivePrefixResolver::stdio();
    let options = RunOptions {
        write: cli.write,
        verbose: cli.verbose,
        output: cli.output,
        fail_fast: cli.fail_fast,
        report_path: cli.report_path.clone(),
    };

    let mut pipeline = Pipeline::new(namespaces, renderer, &mut resolver, options)?;
    if let Some(client) = wiki.as_mut() {
        pipeline = pipeline.with_wiki(client);
    }

    let summary = pipeline.run(&config)?;

    if cli.verbose {
        print!("{}", summary.report.pages);
    }
    print!("{}", summary.report.text);

    for skipped in &summary.skipped {
        println!(
            "{}",
            format!("Skipped {} ({}): {}", skipped.prefix, skipped.source, skipped.reason).yellow()
        );
    }
    if let Some(path) = &summary.report.written_to {
        println!("Report saved to {}", path.display());
    }

    Ok(())
}
