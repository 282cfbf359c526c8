pub mod client;
pub mod enricher;
pub mod paginator;
pub mod query;
pub mod rate_limiter;
pub mod retry;
pub mod transport;

pub use client::GitHubClient;
pub use enricher::DetailEnricher;
pub use paginator::Paginator;
pub use rate_limiter::RateLimiter;
pub use retry::RetryPolicy;
pub use transport::ApiQuery;
