use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Issue,
    #[serde(rename = "PR")]
    PullRequest,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Issue => write!(f, "Issue"),
            ItemKind::PullRequest => write!(f, "PR"),
        }
    }
}

/// How the user is involved with an item. Assigned by the pass that found it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Involvement {
    Created,
    Assigned,
    Commented,
    Reviewed,
}

impl Involvement {
    /// Report order.
    pub const ALL: [Involvement; 4] = [
        Involvement::Created,
        Involvement::Assigned,
        Involvement::Commented,
        Involvement::Reviewed,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Involvement::Created => "Created",
            Involvement::Assigned => "Assigned",
            Involvement::Commented => "Commented",
            Involvement::Reviewed => "Reviewed",
        }
    }
}

impl std::fmt::Display for Involvement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Involvement::Created => write!(f, "created"),
            Involvement::Assigned => write!(f, "assigned"),
            Involvement::Commented => write!(f, "commented"),
            Involvement::Reviewed => write!(f, "reviewed"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
    Merged,
}

impl std::fmt::Display for ItemState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemState::Open => write!(f, "open"),
            ItemState::Closed => write!(f, "closed"),
            ItemState::Merged => write!(f, "merged"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A search hit before it has been attributed to an involvement category.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSummary {
    pub kind: ItemKind,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub state: ItemState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: String,
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
    pub repository: String,
}

impl ItemSummary {
    pub fn tag(self, involvement: Involvement) -> Item {
        Item {
            kind: self.kind,
            number: self.number,
            title: self.title,
            url: self.url,
            state: self.state,
            created_at: self.created_at,
            updated_at: self.updated_at,
            author: self.author,
            assignees: self.assignees,
            labels: self.labels,
            repository: self.repository,
            involvement,
            body: String::new(),
            comments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub state: ItemState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: String,
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
    pub repository: String,
    pub involvement: Involvement,
    pub body: String,
    pub comments: Vec<Comment>,
}

impl Item {
    /// Drops comments written by any of `ignored`. Matching is exact and
    /// case-sensitive.
    pub fn without_comments_from(mut self, ignored: &HashSet<String>) -> Self {
        if !ignored.is_empty() {
            self.comments.retain(|c| !ignored.contains(&c.author));
        }
        self
    }
}
