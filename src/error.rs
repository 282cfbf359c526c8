use thiserror::Error;

use crate::models::{Involvement, Item, ItemKind};

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported output format: {0} (please specify md or json)")]
    UnsupportedFormat(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Failed to extract repository path: {0:?}")]
    RepoPath(String),

    #[error("Failed to retrieve {kind}s ({involvement}): {source}")]
    PassFailed {
        kind: ItemKind,
        involvement: Involvement,
        #[source]
        source: Box<Error>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors worth another attempt against the API. Malformed payloads,
    /// bad input and configuration problems fail on the first try.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::GitHubApi(_) | Error::RateLimited(_) | Error::Network(_) | Error::Io(_)
        )
    }
}

/// Detail enrichment failed part-way. The item keeps whatever was fetched
/// before the failing call.
#[derive(Error, Debug)]
#[error("Failed to retrieve details for {} (ID: {}): {source}", .item.kind, .item.number)]
pub struct EnrichmentError {
    pub item: Box<Item>,
    #[source]
    pub source: Error,
}

impl EnrichmentError {
    pub fn new(item: Item, source: Error) -> Self {
        Self {
            item: Box::new(item),
            source,
        }
    }

    pub fn into_item(self) -> Item {
        *self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_failure_names_the_pass() {
        let err = Error::PassFailed {
            kind: ItemKind::PullRequest,
            involvement: Involvement::Reviewed,
            source: Box::new(Error::GitHubApi("502 Bad Gateway".to_string())),
        };
        assert_eq!(
            err.to_string(),
            "Failed to retrieve PRs (reviewed): GitHub API error: 502 Bad Gateway"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(Error::RateLimited(30).is_retryable());
        assert!(Error::GitHubApi("500".to_string()).is_retryable());
        assert!(!Error::RepoPath("nope".to_string()).is_retryable());
        assert!(!Error::UnsupportedFormat("xml".to_string()).is_retryable());
    }
}
