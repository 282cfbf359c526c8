use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Read access to the GitHub REST API. `endpoint` is a path relative to the
/// API root, query string included (`search/issues?q=...`). Implementations
/// own authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiQuery: Send + Sync {
    async fn query(&self, endpoint: &str) -> Result<serde_json::Value>;
}

/// Query `endpoint` and decode the payload into `T`.
pub async fn fetch_as<A, T>(api: &A, endpoint: &str) -> Result<T>
where
    A: ApiQuery + ?Sized,
    T: DeserializeOwned,
{
    let value = api.query(endpoint).await?;
    Ok(serde_json::from_value(value)?)
}
