//! MediaWikiClient: Action API transport for page writes
//!
//! Logs in with a bot password on first use, then edits pages with a CSRF
//! token. Session cookies live in the client's cookie store.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("ontology2smw/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum WikiError {
    #[error("Wiki request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Wiki login failed for {user}: {reason}")]
    Login { user: String, reason: String },

    #[error("Wiki API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("Unexpected wiki response: {0}")]
    Response(String),
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct TokensResponse {
    query: Option<TokensQuery>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct TokensQuery {
    tokens: Tokens,
}

#[derive(Debug, Deserialize)]
struct Tokens {
    logintoken: Option<String>,
    csrftoken: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    login: Option<LoginResult>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct LoginResult {
    result: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EditResponse {
    edit: Option<EditResult>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct EditResult {
    result: String,
}

#[derive(Debug, Deserialize)]
struct SiteInfoResponse {
    query: Option<SiteInfoQuery>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct SiteInfoQuery {
    general: SiteInfoGeneral,
}

#[derive(Debug, Deserialize)]
struct SiteInfoGeneral {
    server: String,
    articlepath: String,
}

fn api_error(error: ApiError) -> WikiError {
    WikiError::Api {
        code: error.code,
        info: error.info,
    }
}

/// Join `server` and `articlepath` into the base URL page titles follow.
///
/// `$1` is dropped from the path; protocol-relative servers get `https:`.
pub fn join_article_path(server: &str, articlepath: &str) -> String {
    let server = if server.starts_with("//") {
        format!("https:{}", server)
    } else {
        server.to_string()
    };
    format!("{}{}", server, articlepath.replace("$1", ""))
}

pub struct MediaWikiClient {
    client: Client,
    api: String,
    user: String,
    password: String,
    csrf_token: Option<String>,
    article_path: Option<String>,
}

impl MediaWikiClient {
    /// Client for the `api.php` endpoint at `api`; no request is made yet
    pub fn new(api: &str, user: &str, password: &str) -> Result<Self, WikiError> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api: api.to_string(),
            user: user.to_string(),
            password: password.to_string(),
            csrf_token: None,
            article_path: None,
        })
    }

    pub fn api(&self) -> &str {
        &self.api
    }

    fn fetch_token(&self, kind: &str) -> Result<String, WikiError> {
        let response: TokensResponse = self
            .client
            .get(&self.api)
            .query(&[("action", "query"), ("meta", "tokens"), ("type", kind), ("format", "json")])
            .send()?
            .error_for_status()?
            .json()?;

        if let Some(error) = response.error {
            return Err(api_error(error));
        }

        let tokens = response
            .query
            .map(|q| q.tokens)
            .ok_or_else(|| WikiError::Response(format!("no {} token in response", kind)))?;

        match kind {
            "login" => tokens.logintoken,
            _ => tokens.csrftoken,
        }
        .ok_or_else(|| WikiError::Response(format!("no {} token in response", kind)))
    }

    /// Log in and cache a CSRF token
    pub fn login(&mut self) -> Result<(), WikiError> {
        let login_token = self.fetch_token("login")?;

        let response: LoginResponse = self
            .client
            .post(&self.api)
            .form(&[
                ("action", "login"),
                ("lgname", self.user.as_str()),
                ("lgpassword", self.password.as_str()),
                ("lgtoken", login_token.as_str()),
                ("format", "json"),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        if let Some(error) = response.error {
            return Err(api_error(error));
        }

        match response.login {
            Some(result) if result.result == "Success" => {}
            Some(result) => {
                return Err(WikiError::Login {
                    user: self.user.clone(),
                    reason: result.reason.unwrap_or(result.result),
                })
            }
            None => return Err(WikiError::Response("no login result".to_string())),
        }

        self.csrf_token = Some(self.fetch_token("csrf")?);
        info!(api = %self.api, user = %self.user, "logged in to wiki");
        Ok(())
    }

    fn csrf_token(&mut self) -> Result<String, WikiError> {
        if self.csrf_token.is_none() {
            self.login()?;
        }
        self.csrf_token
            .clone()
            .ok_or_else(|| WikiError::Response("no csrf token after login".to_string()))
    }
}

impl super::WikiTransport for MediaWikiClient {
    fn edit(&mut self, request: &super::EditRequest<'_>) -> Result<bool, WikiError> {
        let token = self.csrf_token()?;
        let content_field = if request.append { "appendtext" } else { "text" };

        let mut form = vec![
            ("action", "edit"),
            ("title", request.page),
            (content_field, request.content),
            ("summary", request.summary),
            ("bot", "true"),
            ("format", "json"),
        ];
        if request.newpageonly {
            form.push(("createonly", "true"));
        }
        form.push(("token", token.as_str()));

        let response: EditResponse = self
            .client
            .post(&self.api)
            .form(&form)
            .send()?
            .error_for_status()?
            .json()?;

        if let Some(error) = response.error {
            debug!(page = request.page, code = %error.code, info = %error.info, "edit rejected");
            return Ok(false);
        }

        Ok(response.edit.map(|e| e.result == "Success").unwrap_or(false))
    }

    fn article_path(&mut self) -> Result<String, WikiError> {
        if let Some(path) = &self.article_path {
            return Ok(path.clone());
        }

        let response: SiteInfoResponse = self
            .client
            .get(&self.api)
            .query(&[("action", "query"), ("meta", "siteinfo"), ("siprop", "general"), ("format", "json")])
            .send()?
            .error_for_status()?
            .json()?;

        if let Some(error) = response.error {
            return Err(api_error(error));
        }

        let general = response
            .query
            .map(|q| q.general)
            .ok_or_else(|| WikiError::Response("no siteinfo in response".to_string()))?;

        let path = join_article_path(&general.server, &general.articlepath);
        self.article_path = Some(path.clone());
        Ok(path)
    }
}
