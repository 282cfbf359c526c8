use crate::models::{Involvement, ItemKind};

/// Milestones emitted while activity is collected. Presentation layers
/// subscribe through [`ProgressSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    PassStarted {
        kind: ItemKind,
        involvement: Involvement,
    },
    PassFetched {
        kind: ItemKind,
        involvement: Involvement,
        items: usize,
    },
    ItemEnriched {
        kind: ItemKind,
        number: u64,
    },
    EnrichmentFailed {
        kind: ItemKind,
        number: u64,
        message: String,
    },
    PassCompleted {
        kind: ItemKind,
        involvement: Involvement,
        items: usize,
    },
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Discards every event.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _event: ProgressEvent) {}
}
