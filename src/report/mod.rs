pub mod markdown;

use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::{DateRange, Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Grouped, truncated Markdown report.
    Markdown,
    /// Every item, untruncated, as pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "md"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn render(
    items: &[Item],
    username: &str,
    range: &DateRange,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Markdown => Ok(markdown::render(items, username, range)),
    }
}

pub async fn write_report(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents).await?;
    tracing::info!("Output written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Comment, Involvement, ItemKind, ItemState};
    use chrono::{DateTime, Utc};

    fn at(ts: &str) -> DateTime<Utc> {
        ts.parse().unwrap()
    }

    fn sample() -> Vec<Item> {
        vec![Item {
            kind: ItemKind::PullRequest,
            number: 88,
            title: "Teach the parser about \"quoted\" names".to_string(),
            url: "https://github.com/acme/widgets/pull/88".to_string(),
            state: ItemState::Open,
            created_at: at("2024-03-02T09:15:00Z"),
            updated_at: at("2024-03-04T17:40:12Z"),
            author: "alice".to_string(),
            assignees: vec!["bob".to_string(), "alice".to_string()],
            labels: vec!["parser".to_string()],
            repository: "acme/widgets".to_string(),
            involvement: Involvement::Assigned,
            body: "Line one\nLine two".to_string(),
            comments: vec![Comment {
                author: "bob".to_string(),
                body: "LGTM".to_string(),
                created_at: at("2024-03-03T08:00:00Z"),
                updated_at: at("2024-03-03T08:05:00Z"),
            }],
        }]
    }

    #[test]
    fn test_format_tokens() {
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(Error::UnsupportedFormat(token)) if token == "xml"
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let items = sample();
        let range = DateRange::parse("2024-03-01", "2024-03-04").unwrap();

        let rendered = render(&items, "alice", &range, OutputFormat::Json).unwrap();
        let decoded: Vec<Item> = serde_json::from_str(&rendered).unwrap();

        assert_eq!(decoded, items);
    }

    #[test]
    fn test_json_field_order_and_tokens() {
        let range = DateRange::parse("2024-03-01", "2024-03-04").unwrap();
        let rendered = render(&sample(), "alice", &range, OutputFormat::Json).unwrap();

        let fields = [
            "\"kind\"", "\"number\"", "\"title\"", "\"url\"", "\"state\"", "\"created_at\"",
            "\"updated_at\"", "\"author\"", "\"assignees\"", "\"labels\"", "\"repository\"",
            "\"involvement\"", "\"body\"", "\"comments\"",
        ];
        let positions: Vec<usize> = fields.iter().map(|f| rendered.find(f).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(rendered.contains("\"kind\": \"PR\""));
        assert!(rendered.contains("\"involvement\": \"assigned\""));
        assert!(rendered.starts_with("[\n  {"));
    }

    #[tokio::test]
    async fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activity.md");

        write_report(&path, "# report\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# report\n");
    }
}
