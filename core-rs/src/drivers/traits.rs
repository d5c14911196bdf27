//! Wiki transport trait for page writes
//!
//! Pages never talk HTTP directly. They hand an `EditRequest` to a
//! `WikiTransport`, so the pipeline runs the same against a live
//! MediaWiki API (`MediaWikiClient`) or an in-memory recorder in tests.

use super::mediawiki::WikiError;

/// One page edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest<'a> {
    /// Full page title including namespace, e.g. `Category:Person`
    pub page: &'a str,

    /// Wikitext body
    pub content: &'a str,

    pub summary: &'a str,

    /// Append to the page instead of replacing it
    pub append: bool,

    /// Only create the page; fail if it already exists
    pub newpageonly: bool,
}

/// Authenticated write access to a wiki
pub trait WikiTransport {
    /// Submit an edit; `Ok(false)` means the wiki answered without "Success"
    fn edit(&mut self, request: &EditRequest<'_>) -> Result<bool, WikiError>;

    /// Base URL that page titles are appended to, e.g. `https://wiki.example.org/wiki/`
    fn article_path(&mut self) -> Result<String, WikiError>;
}
