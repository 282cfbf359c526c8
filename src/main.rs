use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use gh_activity::activity::parse_ignore_list;
use gh_activity::{
    ActivityPipeline, Config, DateRange, GitHubClient, OutputFormat, PipelineConfig,
    ProgressEvent, ProgressSink, ReportRequest,
};

#[derive(Parser, Debug)]
#[command(name = "gh-activity")]
#[command(version = "0.1.0")]
#[command(about = "Collect your recent GitHub issue and pull request activity into a report")]
struct Args {
    /// Start date (YYYY-MM-DD), defaults to three days ago
    #[arg(long)]
    from: Option<String>,

    /// End date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    to: Option<String>,

    /// Output file name
    #[arg(short, long, default_value = "github-activity.txt")]
    output: PathBuf,

    /// Usernames whose comments are left out of the report (comma-separated)
    #[arg(long, default_value = "")]
    comment_ignore: String,

    /// Output format (md or json)
    #[arg(long, default_value = "md")]
    output_format: String,

    /// Report on this user instead of the token's owner
    #[arg(short, long)]
    user: Option<String>,
}

/// Everything taken from the command line, checked before any config is read
/// or request is made.
#[derive(Debug)]
struct Invocation {
    format: OutputFormat,
    range: DateRange,
    ignore_users: Vec<String>,
}

impl Invocation {
    fn from_args(args: &Args, today: NaiveDate) -> gh_activity::Result<Self> {
        let format: OutputFormat = args.output_format.parse()?;

        let from = args
            .from
            .clone()
            .unwrap_or_else(|| (today - Duration::days(3)).format("%Y-%m-%d").to_string());
        let to = args
            .to
            .clone()
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
        let range = DateRange::parse(&from, &to)?;

        Ok(Self {
            format,
            range,
            ignore_users: parse_ignore_list(&args.comment_ignore),
        })
    }
}

/// Renders pipeline progress as a bar per pass.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> anyhow::Result<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Ok(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}

impl ProgressSink for BarProgress {
    fn emit(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::PassStarted { kind, involvement } => {
                self.bar.set_length(0);
                self.bar.set_position(0);
                self.bar.set_message(format!("{}s ({})", kind, involvement));
            }
            ProgressEvent::PassFetched { items, .. } => self.bar.set_length(items as u64),
            ProgressEvent::ItemEnriched { .. } => self.bar.inc(1),
            ProgressEvent::EnrichmentFailed { kind, number, message } => {
                self.bar
                    .println(format!("Failed to retrieve details for {} #{}: {}", kind, number, message));
                self.bar.inc(1);
            }
            ProgressEvent::PassCompleted { .. } => {}
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gh_activity=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Reject bad arguments before touching the config or the network
    let Invocation {
        format,
        range,
        ignore_users,
    } = Invocation::from_args(&args, Local::now().date_naive())?;

    let config = Config::from_env()?;
    let github = GitHubClient::from_config(&config)?;

    let username = match args.user {
        Some(user) => user,
        None => github.authenticated_user().await?,
    };

    println!("Retrieving GitHub activity for user '{}'...", username);
    println!("Period: {} to {}", range.start_date(), range.end_date());

    let progress = Arc::new(BarProgress::new()?);
    let pipeline = ActivityPipeline::new(github, PipelineConfig::from(&config))
        .with_progress(progress.clone());

    let request = ReportRequest {
        range,
        username,
        output: args.output.clone(),
        format,
        ignore_users,
    };
    let written = pipeline.generate_report(&request).await?;
    progress.finish();

    tracing::info!("Wrote {} items as {}", written, format);
    println!("Results saved to {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_activity::Error;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_unsupported_format_is_rejected_before_any_work() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("report.xml");
        let args = Args::try_parse_from([
            "gh-activity",
            "--output-format",
            "xml",
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();

        let err = Invocation::from_args(&args, today()).unwrap_err();

        assert!(matches!(err, Error::UnsupportedFormat(token) if token == "xml"));
        assert!(!output.exists());
    }

    #[test]
    fn test_default_window_is_last_three_days() {
        let args = Args::try_parse_from(["gh-activity", "--comment-ignore", "bot1, bot2"]).unwrap();

        let invocation = Invocation::from_args(&args, today()).unwrap();

        assert_eq!(invocation.format, OutputFormat::Markdown);
        assert_eq!(invocation.range.start_date(), "2024-03-07");
        assert_eq!(invocation.range.end_date(), "2024-03-10");
        assert_eq!(invocation.ignore_users, vec!["bot1", "bot2"]);
    }

    #[test]
    fn test_format_display_matches_flag_tokens() {
        for token in ["md", "json"] {
            let format: OutputFormat = token.parse().unwrap();
            assert_eq!(format.to_string(), token);
        }
    }
}
