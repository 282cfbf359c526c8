use crate::error::{Error, Result};
use crate::github::RetryPolicy;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub api_url: String,
    pub concurrency_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN")
            .or_else(|_| env::var("GH_TOKEN"))
            .map_err(|_| Error::Config("GITHUB_TOKEN environment variable not set".to_string()))?;

        let api_url = env::var("GITHUB_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let concurrency_limit = env::var("ENRICH_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(4)
            .max(1);

        Ok(Self {
            github_token,
            api_url,
            concurrency_limit,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Hard ceiling on search pages per pass.
    pub max_pages: u32,
    pub per_page: u32,
    pub retry: RetryPolicy,
    /// Pause after each search page.
    pub page_delay: Duration,
    /// Items enriched at once within a pass.
    pub concurrency_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_pages: 10,
            per_page: 100,
            retry: RetryPolicy::default(),
            page_delay: Duration::from_secs(1),
            concurrency_limit: 1,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            concurrency_limit: config.concurrency_limit,
            ..Self::default()
        }
    }
}
