use crate::models::{DateRange, Involvement, ItemKind};

/// Search qualifier for an involvement. `None` searches any involvement.
pub fn involvement_qualifier(involvement: Option<Involvement>) -> &'static str {
    match involvement {
        Some(Involvement::Created) => "author",
        Some(Involvement::Assigned) => "assignee",
        Some(Involvement::Commented) => "commenter",
        Some(Involvement::Reviewed) => "reviewed-by",
        None => "involves",
    }
}

fn kind_qualifier(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Issue => "is:issue",
        ItemKind::PullRequest => "is:pr",
    }
}

/// Issue search endpoint for one pass. Only the start of the range is sent;
/// the end is enforced after the results come back.
pub fn search_query(
    kind: ItemKind,
    involvement: Option<Involvement>,
    username: &str,
    range: &DateRange,
    per_page: u32,
) -> String {
    format!(
        "search/issues?q={}+{}:{}+created:>={}&per_page={}",
        kind_qualifier(kind),
        involvement_qualifier(involvement),
        username,
        range.start_date(),
        per_page
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_query() {
        let range = DateRange::parse("2024-03-01", "2024-03-04").unwrap();
        assert_eq!(
            search_query(ItemKind::Issue, Some(Involvement::Commented), "octocat", &range, 100),
            "search/issues?q=is:issue+commenter:octocat+created:>=2024-03-01&per_page=100"
        );
    }

    #[test]
    fn test_reviewed_pr_query() {
        let range = DateRange::parse("2024-03-01", "2024-03-04").unwrap();
        assert_eq!(
            search_query(ItemKind::PullRequest, Some(Involvement::Reviewed), "octocat", &range, 50),
            "search/issues?q=is:pr+reviewed-by:octocat+created:>=2024-03-01&per_page=50"
        );
    }

    #[test]
    fn test_unqualified_falls_back_to_involves() {
        assert_eq!(involvement_qualifier(None), "involves");
        assert_eq!(involvement_qualifier(Some(Involvement::Created)), "author");
        assert_eq!(involvement_qualifier(Some(Involvement::Assigned)), "assignee");
    }
}
