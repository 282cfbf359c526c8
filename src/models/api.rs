//! Wire shapes of the GitHub REST payloads the pipeline reads. Only the
//! fields the report needs are declared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::item::{Comment, ItemKind, ItemState, ItemSummary};

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub html_url: String,
    pub number: u64,
    pub title: String,
    pub state: ItemState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub repository_url: String,
    pub user: Option<Account>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assignees: Vec<Account>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
}

/// GitHub sends `null` for some list fields; treat it like a missing field.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Issue or pull request detail; only the body is used.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDetail {
    #[serde(default)]
    pub body: Option<String>,
}

/// Shared by issue comments and pull request review comments.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiComment {
    pub user: Option<Account>,
    #[serde(default)]
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SearchItem {
    pub fn into_summary(self, kind: ItemKind) -> ItemSummary {
        ItemSummary {
            kind,
            number: self.number,
            title: self.title,
            url: self.html_url,
            state: self.state,
            created_at: self.created_at,
            updated_at: self.updated_at,
            author: self.user.map(|u| u.login).unwrap_or_default(),
            assignees: self.assignees.into_iter().map(|a| a.login).collect(),
            labels: self.labels.into_iter().map(|l| l.name).collect(),
            repository: repository_name(&self.repository_url),
        }
    }
}

impl From<ApiComment> for Comment {
    fn from(c: ApiComment) -> Self {
        Comment {
            author: c.user.map(|u| u.login).unwrap_or_default(),
            body: c.body.unwrap_or_default(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// `owner/name` from the last two segments of a repository API URL.
pub fn repository_name(repository_url: &str) -> String {
    let segments: Vec<&str> = repository_url.split('/').collect();
    match segments.as_slice() {
        [.., owner, name] => format!("{}/{}", owner, name),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repository_name_from_api_url() {
        assert_eq!(
            repository_name("https://api.github.com/repos/rust-lang/cargo"),
            "rust-lang/cargo"
        );
        assert_eq!(repository_name("cargo"), "");
    }

    #[test]
    fn test_search_item_projection() {
        let raw = json!({
            "html_url": "https://github.com/acme/widgets/pull/7",
            "number": 7,
            "title": "Add sprockets",
            "state": "open",
            "created_at": "2024-03-02T10:00:00Z",
            "updated_at": "2024-03-03T10:00:00Z",
            "repository_url": "https://api.github.com/repos/acme/widgets",
            "user": { "login": "alice" },
            "assignees": [{ "login": "bob" }, { "login": "carol" }],
            "labels": [{ "name": "enhancement" }]
        });

        let item: SearchItem = serde_json::from_value(raw).unwrap();
        let summary = item.into_summary(ItemKind::PullRequest);

        assert_eq!(summary.repository, "acme/widgets");
        assert_eq!(summary.author, "alice");
        assert_eq!(summary.assignees, vec!["bob", "carol"]);
        assert_eq!(summary.labels, vec!["enhancement"]);
        assert_eq!(summary.state, ItemState::Open);
    }

    #[test]
    fn test_null_lists_decode_as_empty() {
        let raw = json!({
            "html_url": "https://github.com/acme/widgets/issues/3",
            "number": 3,
            "title": "Orphaned",
            "state": "closed",
            "created_at": "2024-03-02T10:00:00Z",
            "updated_at": "2024-03-03T10:00:00Z",
            "repository_url": "https://api.github.com/repos/acme/widgets",
            "user": null,
            "assignees": null,
            "labels": null
        });

        let summary = serde_json::from_value::<SearchItem>(raw)
            .unwrap()
            .into_summary(ItemKind::Issue);
        assert!(summary.assignees.is_empty());
        assert!(summary.labels.is_empty());
        assert_eq!(summary.author, "");
    }

    #[test]
    fn test_comment_with_deleted_author_and_null_body() {
        let raw = json!({
            "user": null,
            "body": null,
            "created_at": "2024-03-02T10:00:00Z",
            "updated_at": "2024-03-02T10:00:00Z"
        });

        let comment: Comment = serde_json::from_value::<ApiComment>(raw).unwrap().into();
        assert_eq!(comment.author, "");
        assert_eq!(comment.body, "");
    }
}
