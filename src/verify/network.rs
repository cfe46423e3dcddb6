//! HTTP client check.
//!
//! [`RepoMetadataSource`] abstracts the single outbound request so tests can
//! substitute a fake. [`GitHubClient`] is the real implementation backed by
//! `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::config::ProbeConfig;
use crate::error::{DepVerifyError, Result};
use crate::log_component;
use crate::utils::string::group_thousands;

use super::report::{HttpClientCheck, RepoData};

/// Version string reported for the HTTP client library.
pub const HTTP_CLIENT_VERSION: &str = "reqwest/0.12";

const PROBE_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Raw response of a metadata request.
#[derive(Debug, Clone)]
pub struct RepoResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded JSON body
    pub body: Value,
}

/// Fetches repository metadata by `owner/name`.
#[async_trait]
pub trait RepoMetadataSource: Send + Sync {
    /// Version of the underlying HTTP client, as shown in the report.
    fn client_version(&self) -> String;

    /// Issue one GET for the repository and decode the body as JSON.
    ///
    /// Non-2xx statuses are not errors; the caller decides from the body.
    async fn fetch_repo(&self, full_name: &str) -> Result<RepoResponse>;
}

/// GitHub REST API client.
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: String,
}

impl GitHubClient {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(PROBE_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &ProbeConfig) -> Result<Self> {
        Self::new(&cfg.api_base, Duration::from_secs(cfg.timeout_secs))
    }

    fn repo_url(&self, full_name: &str) -> String {
        format!("{}/repos/{}", self.api_base, full_name)
    }
}

#[async_trait]
impl RepoMetadataSource for GitHubClient {
    fn client_version(&self) -> String {
        HTTP_CLIENT_VERSION.to_string()
    }

    async fn fetch_repo(&self, full_name: &str) -> Result<RepoResponse> {
        let url = self.repo_url(full_name);
        log_component!(debug, "http", "requesting repository metadata", url = url.as_str());

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body: Value = response.json().await?;
        log_component!(debug, "http", "metadata received", status = status);

        Ok(RepoResponse { status, body })
    }
}

/// Stands in when no [`GitHubClient`] could be set up. Every request fails
/// with the setup error, so it surfaces as the HTTP section's `error`.
pub struct UnavailableSource {
    reason: String,
}

impl UnavailableSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl RepoMetadataSource for UnavailableSource {
    fn client_version(&self) -> String {
        HTTP_CLIENT_VERSION.to_string()
    }

    async fn fetch_repo(&self, _full_name: &str) -> Result<RepoResponse> {
        Err(DepVerifyError::Unavailable(self.reason.clone()))
    }
}

/// Run the HTTP client check against `repo`.
pub async fn check_http_client(
    source: &dyn RepoMetadataSource,
    repo: &str,
) -> Result<HttpClientCheck> {
    let response = source.fetch_repo(repo).await?;
    let repo_data = extract_repo_data(&response.body)?;

    Ok(HttpClientCheck {
        version: source.client_version(),
        test: format!("GitHub API status: {}", response.status),
        repo_data,
    })
}

/// Pull name, stars, forks and language out of a repository body.
pub fn extract_repo_data(body: &Value) -> Result<RepoData> {
    let name = field(body, "name")?
        .as_str()
        .ok_or(DepVerifyError::InvalidField {
            field: "name",
            expected: "string",
        })?
        .to_string();

    let stars = count(body, "stargazers_count")?;
    let forks = count(body, "forks_count")?;

    let language = match field(body, "language")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        _ => {
            return Err(DepVerifyError::InvalidField {
                field: "language",
                expected: "string or null",
            })
        }
    };

    Ok(RepoData {
        name,
        stars: group_thousands(stars),
        forks: group_thousands(forks),
        language,
    })
}

fn field<'a>(body: &'a Value, key: &'static str) -> Result<&'a Value> {
    body.get(key).ok_or(DepVerifyError::MissingField(key))
}

fn count(body: &Value, key: &'static str) -> Result<u64> {
    field(body, key)?
        .as_u64()
        .ok_or(DepVerifyError::InvalidField {
            field: key,
            expected: "non-negative integer",
        })
}
