pub mod filter;
pub mod pipeline;
pub mod progress;

pub use filter::{parse_ignore_list, CommentFilter};
pub use pipeline::{ActivityPipeline, ReportRequest, PASSES};
pub use progress::{NoProgress, ProgressEvent, ProgressSink};
