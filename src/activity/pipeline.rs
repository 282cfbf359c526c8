use std::path::PathBuf;
use std::sync::Arc;
use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::activity::filter::CommentFilter;
use crate::activity::progress::{NoProgress, ProgressEvent, ProgressSink};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::github::query::search_query;
use crate::github::{ApiQuery, DetailEnricher, Paginator};
use crate::models::{DateRange, Involvement, Item, ItemKind};
use crate::report::{self, OutputFormat};

/// The six searches run for every report, in report order.
pub const PASSES: [(ItemKind, Involvement); 6] = [
    (ItemKind::Issue, Involvement::Created),
    (ItemKind::Issue, Involvement::Assigned),
    (ItemKind::Issue, Involvement::Commented),
    (ItemKind::PullRequest, Involvement::Created),
    (ItemKind::PullRequest, Involvement::Assigned),
    (ItemKind::PullRequest, Involvement::Reviewed),
];

/// Everything needed to produce one report file.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub range: DateRange,
    pub username: String,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub ignore_users: Vec<String>,
}

pub struct ActivityPipeline {
    api: Arc<dyn ApiQuery>,
    progress: Arc<dyn ProgressSink>,
    config: PipelineConfig,
}

impl ActivityPipeline {
    pub fn new(api: impl ApiQuery + 'static, config: PipelineConfig) -> Self {
        Self {
            api: Arc::new(api),
            progress: Arc::new(NoProgress),
            config,
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Collects, filters, renders and writes a report. Returns the number of
    /// items written. Nothing is written if any search pass fails.
    pub async fn generate_report(&self, request: &ReportRequest) -> Result<usize> {
        let items = self.collect(&request.username, &request.range).await?;
        let items = CommentFilter::new(&request.ignore_users).apply(items);

        let rendered = report::render(&items, &request.username, &request.range, request.format)?;
        report::write_report(&request.output, &rendered).await?;

        Ok(items.len())
    }

    /// Runs every pass in order and concatenates the results. Items that match
    /// several passes appear once per pass.
    pub async fn collect(&self, username: &str, range: &DateRange) -> Result<Vec<Item>> {
        let mut all_items = Vec::new();

        for (kind, involvement) in PASSES {
            let items = self.run_pass(username, range, kind, involvement).await?;
            all_items.extend(items);
        }

        tracing::info!("Collected {} items for {}", all_items.len(), username);
        Ok(all_items)
    }

    async fn run_pass(
        &self,
        username: &str,
        range: &DateRange,
        kind: ItemKind,
        involvement: Involvement,
    ) -> Result<Vec<Item>> {
        self.progress.emit(ProgressEvent::PassStarted { kind, involvement });
        tracing::info!("Fetching {}s ({})...", kind, involvement);

        let query = search_query(kind, Some(involvement), username, range, self.config.per_page);
        let summaries = Paginator::new(&*self.api, &self.config)
            .fetch_summaries(&query, kind, range)
            .await
            .map_err(|e| Error::PassFailed {
                kind,
                involvement,
                source: Box::new(e),
            })?;

        self.progress.emit(ProgressEvent::PassFetched {
            kind,
            involvement,
            items: summaries.len(),
        });

        let tagged: Vec<Item> = summaries.into_iter().map(|s| s.tag(involvement)).collect();
        let items = self.enrich_all(tagged).await;

        self.progress.emit(ProgressEvent::PassCompleted {
            kind,
            involvement,
            items: items.len(),
        });
        Ok(items)
    }

    /// Enriches up to `concurrency_limit` items at a time. Output order
    /// matches input order.
    async fn enrich_all(&self, items: Vec<Item>) -> Vec<Item> {
        let enricher = DetailEnricher::new(&*self.api, self.config.retry);
        let semaphore = Semaphore::new(self.config.concurrency_limit.max(1));
        let enricher = &enricher;
        let semaphore = &semaphore;
        let progress = &self.progress;

        let futures = items.into_iter().map(|item| async move {
            let _permit = semaphore.acquire().await.ok();
            let (kind, number) = (item.kind, item.number);

            match enricher.enrich(item).await {
                Ok(item) => {
                    progress.emit(ProgressEvent::ItemEnriched { kind, number });
                    item
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    progress.emit(ProgressEvent::EnrichmentFailed {
                        kind,
                        number,
                        message: e.source.to_string(),
                    });
                    e.into_item()
                }
            }
        });

        join_all(futures).await
    }
}
