use std::collections::HashSet;

use crate::models::Item;

/// Removes comments by ignored users (bots, the reporting user) from every
/// item.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    ignored: HashSet<String>,
}

impl CommentFilter {
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignored: users.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty()
    }

    pub fn apply(&self, items: Vec<Item>) -> Vec<Item> {
        if self.is_empty() {
            return items;
        }

        items
            .into_iter()
            .map(|item| item.without_comments_from(&self.ignored))
            .collect()
    }
}

/// Splits a comma-separated user list, trimming names and dropping blanks.
pub fn parse_ignore_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
