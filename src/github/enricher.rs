use reqwest::Url;

use crate::error::{EnrichmentError, Error, Result};
use crate::github::retry::RetryPolicy;
use crate::github::transport::{fetch_as, ApiQuery};
use crate::models::api::{ApiComment, ItemDetail};
use crate::models::{Comment, Item, ItemKind};

/// Fills in the body and comment threads of search results.
pub struct DetailEnricher<'a, A: ?Sized> {
    api: &'a A,
    retry: RetryPolicy,
}

impl<'a, A: ApiQuery + ?Sized> DetailEnricher<'a, A> {
    pub fn new(api: &'a A, retry: RetryPolicy) -> Self {
        Self { api, retry }
    }

    /// On failure the error hands back the item with everything fetched
    /// before the failing call.
    pub async fn enrich(&self, mut item: Item) -> std::result::Result<Item, EnrichmentError> {
        match self.fill(&mut item).await {
            Ok(()) => Ok(item),
            Err(e) => Err(EnrichmentError::new(item, e)),
        }
    }

    async fn fill(&self, item: &mut Item) -> Result<()> {
        let repo = repo_path(&item.repository)?;
        let number = item.number;

        let detail_endpoint = match item.kind {
            ItemKind::Issue => format!("repos/{}/issues/{}", repo, number),
            ItemKind::PullRequest => format!("repos/{}/pulls/{}", repo, number),
        };
        let detail: ItemDetail = self.fetch("item details", &detail_endpoint).await?;
        item.body = detail.body.unwrap_or_default();

        // Pull requests share the issue comment thread.
        let comments_endpoint = format!("repos/{}/issues/{}/comments?per_page=100", repo, number);
        let comments: Vec<ApiComment> = self.fetch("comments", &comments_endpoint).await?;
        item.comments.extend(comments.into_iter().map(Comment::from));

        if item.kind == ItemKind::PullRequest {
            let review_endpoint =
                format!("repos/{}/pulls/{}/comments?per_page=100", repo, number);
            let reviews: Vec<ApiComment> = self.fetch("review comments", &review_endpoint).await?;
            item.comments.extend(reviews.into_iter().map(Comment::from));
        }

        tracing::debug!(
            "Enriched {} #{} in {} ({} comments)",
            item.kind,
            number,
            repo,
            item.comments.len()
        );
        Ok(())
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, what: &str, endpoint: &str) -> Result<T> {
        let api = self.api;
        self.retry
            .run(what, move || fetch_as(api, endpoint))
            .await
    }
}

/// `owner/name` for API paths, from either the stored `owner/name` form or a
/// full repository URL.
pub fn repo_path(repository: &str) -> Result<String> {
    if repository.starts_with("http") {
        let url = Url::parse(repository).map_err(|_| Error::RepoPath(repository.to_string()))?;
        let path = url.path().trim_start_matches('/');
        if path.is_empty() {
            return Err(Error::RepoPath(repository.to_string()));
        }
        Ok(path.to_string())
    } else if repository.contains('/') {
        Ok(repository.to_string())
    } else {
        Err(Error::RepoPath(repository.to_string()))
    }
}
