use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;

use crate::config::{Config, DEFAULT_API_URL};
use crate::error::{Error, Result};
use crate::github::rate_limiter::{self, RateLimiter};
use crate::github::transport::{fetch_as, ApiQuery};

/// Search API allowance for authenticated users.
const SEARCH_REQUESTS_PER_MINUTE: u32 = 30;

pub struct GitHubClient {
    client: Client,
    core_limiter: RateLimiter,
    search_limiter: RateLimiter,
    base_url: String,
}

#[derive(Deserialize)]
struct AuthenticatedUser {
    login: String,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.github_token, &config.api_url)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
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
            header::HeaderValue::from_static("gh-activity/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            core_limiter: RateLimiter::new(),
            search_limiter: RateLimiter::with_budget(SEARCH_REQUESTS_PER_MINUTE),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Login of the token's owner.
    pub async fn authenticated_user(&self) -> Result<String> {
        tracing::info!("Resolving authenticated user");
        let user: AuthenticatedUser = fetch_as(self, "user").await?;
        Ok(user.login)
    }

    fn limiter_for(&self, endpoint: &str) -> &RateLimiter {
        if is_search(endpoint) {
            &self.search_limiter
        } else {
            &self.core_limiter
        }
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

fn is_search(endpoint: &str) -> bool {
    endpoint.trim_start_matches('/').starts_with("search/")
}

#[async_trait]
impl ApiQuery for GitHubClient {
    async fn query(&self, endpoint: &str) -> Result<serde_json::Value> {
        let limiter = self.limiter_for(endpoint);
        limiter.wait().await;

        let url = self.url_for(endpoint);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let headers = response.headers().clone();
        limiter.record(&headers).await;

        let status = response.status();
        if (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS)
            && rate_limiter::is_exhausted(&headers)
        {
            return Err(Error::RateLimited(rate_limiter::seconds_until_reset(&headers)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "GET {} failed: {} - {}",
                endpoint, status, body
            )));
        }

        Ok(response.json().await?)
    }
}
