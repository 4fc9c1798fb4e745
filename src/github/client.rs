use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::{FetchOrder, RepoId};
use crate::error::{Error, Result};
use crate::github::rate_limiter::RateLimiter;
use crate::github::source::TrackerSource;
use crate::models::{Comment, Issue};

const PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("ghvotes/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: "https://api.github.com".to_string(),
        })
    }

    /// Walks every page of a list endpoint, following the Link header.
    async fn get_paged<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        repo: &RepoId,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            self.rate_limiter.acquire().await;

            let separator = if endpoint.contains('?') { "&" } else { "?" };
            let url = format!("{}{}per_page={}&page={}", endpoint, separator, PER_PAGE, page);

            tracing::debug!("Fetching: {}", url);
            let response = self.client.get(&url).send().await?;
            self.rate_limiter.observe(&response);

            if response.status() == StatusCode::NOT_FOUND {
                return Err(Error::RepoNotFound(repo.to_string()));
            }

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::GitHubApi(format!(
                    "request for {} failed: {} - {}",
                    repo, status, body
                )));
            }

            let has_next = response
                .headers()
                .get("link")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.contains("rel=\"next\""))
                .unwrap_or(false);

            let batch: Vec<T> = response.json().await?;
            let batch_len = batch.len();
            items.extend(batch);

            if !has_next || batch_len < PER_PAGE as usize {
                break;
            }

            page += 1;
        }

        Ok(items)
    }
}

#[async_trait]
impl TrackerSource for GitHubClient {
    async fn fetch_issues(&self, repo: &RepoId) -> Result<Vec<Issue>> {
        tracing::info!("Fetching issues for {}", repo);
        let url = format!("{}/repos/{}/issues", self.base_url, repo);
        self.get_paged(&url, repo).await
    }

    async fn fetch_comments(
        &self,
        repo: &RepoId,
        since: Option<DateTime<Utc>>,
        order: FetchOrder,
    ) -> Result<Vec<Comment>> {
        tracing::info!("Fetching issue comments for {}", repo);
        let mut url = format!(
            "{}/repos/{}/issues/comments?sort=updated&direction={}",
            self.base_url,
            repo,
            order.query_direction()
        );
        if let Some(since) = since {
            url.push_str(&format!(
                "&since={}",
                since.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }
        self.get_paged(&url, repo).await
    }
}
