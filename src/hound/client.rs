//! HTTP adapter for the Hound search API.
//!
//! Only two endpoints are used: `GET /api/v1/repos` to enumerate the
//! repositories the server indexes, and `GET /api/v1/search` scoped to those
//! repositories.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::models::{RepoDirectory, RepoListing, RepositoryInfo, SearchResponse, SearchResultsByRepo};

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// The two remote calls the orchestrator needs.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Enumerate the repositories indexed by the server.
    async fn list_repos(&self) -> Result<RepoDirectory>;

    /// Search `repos` for `query`, asking for at most `max_results` files per repository.
    async fn search(
        &self,
        query: &str,
        repos: &[String],
        max_results: usize,
    ) -> Result<SearchResultsByRepo>;
}

/// `reqwest` client bound to one Hound base URL.
#[derive(Clone)]
pub struct HoundClient {
    http: reqwest::Client,
    base_url: String,
}

impl HoundClient {
    /// Build a client for `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .build()
            .map_err(SearchError::BackendUnreachable)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from `config`. Fails with [`SearchError::Unconfigured`]
    /// when no usable base URL is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.backend_url().ok_or(SearchError::Unconfigured)?;
        Self::new(base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);

        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(SearchError::BackendUnreachable)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::BackendStatus { status, body });
        }

        resp.json().await.map_err(SearchError::MalformedResponse)
    }
}

#[async_trait]
impl SearchBackend for HoundClient {
    async fn list_repos(&self) -> Result<RepoDirectory> {
        let listing: BTreeMap<String, RepoListing> = self.get_json("/api/v1/repos", &[]).await?;

        Ok(listing
            .into_iter()
            .map(|(id, repo)| {
                let info = RepositoryInfo {
                    id: id.clone(),
                    url: repo.url,
                };
                (id, info)
            })
            .collect())
    }

    async fn search(
        &self,
        query: &str,
        repos: &[String],
        max_results: usize,
    ) -> Result<SearchResultsByRepo> {
        let rng = format!("0:{max_results}");
        let repos = repos.join(",");

        let resp: SearchResponse = self
            .get_json(
                "/api/v1/search",
                &[("q", query), ("rng", rng.as_str()), ("repos", repos.as_str())],
            )
            .await?;

        Ok(resp.results)
    }
}
