use tokio::time::sleep;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::github::transport::{fetch_as, ApiQuery};
use crate::models::api::SearchResponse;
use crate::models::{DateRange, ItemKind, ItemSummary};

pub struct Paginator<'a, A: ?Sized> {
    api: &'a A,
    config: &'a PipelineConfig,
}

impl<'a, A: ApiQuery + ?Sized> Paginator<'a, A> {
    pub fn new(api: &'a A, config: &'a PipelineConfig) -> Self {
        Self { api, config }
    }

    /// Walks search pages until one comes back empty or the page ceiling is
    /// reached, keeping only hits created inside `range`.
    pub async fn fetch_summaries(
        &self,
        query: &str,
        kind: ItemKind,
        range: &DateRange,
    ) -> Result<Vec<ItemSummary>> {
        let api = self.api;
        let mut summaries = Vec::new();

        for page in 1..=self.config.max_pages {
            let endpoint = format!("{}&page={}", query, page);
            let endpoint = endpoint.as_str();

            tracing::debug!("Fetching: {}", endpoint);
            let response: SearchResponse = self
                .config
                .retry
                .run("search page", move || fetch_as(api, endpoint))
                .await?;

            if response.items.is_empty() {
                break;
            }

            let received = response.items.len();
            let before = summaries.len();
            summaries.extend(
                response
                    .items
                    .into_iter()
                    .filter(|item| range.contains(&item.created_at))
                    .map(|item| item.into_summary(kind)),
            );
            tracing::debug!(
                "Page {}: kept {} of {} results",
                page,
                summaries.len() - before,
                received
            );

            sleep(self.config.page_delay).await;
        }

        Ok(summaries)
    }
}
