use crate::models::{DateRange, Involvement, Item, ItemKind};

pub const BODY_LIMIT: usize = 300;
pub const COMMENT_LIMIT: usize = 200;
pub const MAX_COMMENTS: usize = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";
const BODY_INDENT: &str = "    ";
const COMMENT_INDENT: &str = "      ";

pub fn render(items: &[Item], username: &str, range: &DateRange) -> String {
    let mut output = String::new();

    output.push_str(&format!("# GitHub Activity Report - {}\n", username));
    output.push_str(&format!(
        "Period: {} to {}\n\n",
        range.start_date(),
        range.end_date()
    ));

    output.push_str("## Summary\n");
    output.push_str(&format!("- Total items: {}\n", items.len()));
    output.push_str(&format!(
        "- Number of PRs: {}\n",
        count_kind(items, ItemKind::PullRequest)
    ));
    output.push_str(&format!(
        "- Number of Issues: {}\n\n",
        count_kind(items, ItemKind::Issue)
    ));

    for involvement in Involvement::ALL {
        output.push_str(&format!(
            "- {} items: {}\n",
            involvement.title(),
            count_involvement(items, involvement)
        ));
    }
    output.push('\n');

    output.push_str("## Item Details\n\n");
    for involvement in Involvement::ALL {
        if count_involvement(items, involvement) == 0 {
            continue;
        }

        output.push_str(&format!("### {} Items\n\n", involvement.title()));
        for item in items.iter().filter(|i| i.involvement == involvement) {
            write_item(&mut output, item);
        }
    }

    output
}

fn count_kind(items: &[Item], kind: ItemKind) -> usize {
    items.iter().filter(|i| i.kind == kind).count()
}

fn count_involvement(items: &[Item], involvement: Involvement) -> usize {
    items.iter().filter(|i| i.involvement == involvement).count()
}

fn write_item(output: &mut String, item: &Item) {
    output.push_str(&format!("- [{} #{}] {}\n", item.kind, item.number, item.title));
    output.push_str(&format!("  - URL: {}\n", item.url));
    output.push_str(&format!("  - Repository: {}\n", item.repository));
    output.push_str(&format!("  - State: {}\n", item.state));
    output.push_str(&format!(
        "  - Created on: {}\n",
        item.created_at.format(DATE_FORMAT)
    ));
    output.push_str(&format!(
        "  - Updated on: {}\n",
        item.updated_at.format(DATE_FORMAT)
    ));

    if !item.assignees.is_empty() {
        output.push_str(&format!("  - Assignees: {}\n", item.assignees.join(", ")));
    }
    if !item.labels.is_empty() {
        output.push_str(&format!("  - Labels: {}\n", item.labels.join(", ")));
    }

    if !item.body.is_empty() {
        output.push_str(&format!(
            "  - Body:\n{}{}\n",
            BODY_INDENT,
            indent(&truncate(&item.body, BODY_LIMIT), BODY_INDENT)
        ));
    }

    if !item.comments.is_empty() {
        output.push_str(&format!("  - Comments ({}):\n", item.comments.len()));
        if item.comments.len() > MAX_COMMENTS {
            output.push_str(&format!("    (Only the first {} shown)\n", MAX_COMMENTS));
        }

        for comment in item.comments.iter().take(MAX_COMMENTS) {
            output.push_str(&format!(
                "    - {} ({}):\n{}{}\n",
                comment.author,
                comment.created_at.format(DATE_FORMAT),
                COMMENT_INDENT,
                indent(&truncate(&comment.body, COMMENT_LIMIT), COMMENT_INDENT)
            ));
        }
    }

    output.push('\n');
}

/// Cuts `text` to `limit` characters and marks the cut with `...`.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.replace('\n', &format!("\n{}", prefix))
}
