pub mod activity;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod report;

pub use activity::{ActivityPipeline, CommentFilter, ProgressEvent, ProgressSink, ReportRequest};
pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use github::{ApiQuery, GitHubClient};
pub use models::{DateRange, Item};
pub use report::OutputFormat;
