//! Drivers module for I/O at the edges of the converter
//!
//! - HttpFetcher: retrying GET for remote ontology documents and probes
//! - WikiTransport: abstract page-write interface
//! - MediaWikiClient: WikiTransport over the MediaWiki Action API
//! - filesystem: text read/write helpers

mod filesystem;
mod http;
mod mediawiki;
mod traits;

pub use filesystem::{read_text, write_text};
pub use http::{FetchError, FetchedDocument, HttpFetcher, RetryPolicy};
pub use mediawiki::{join_article_path, MediaWikiClient, WikiError};
pub use traits::{EditRequest, WikiTransport};
