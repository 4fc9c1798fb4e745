use clap::Parser;
use tracing_subscriber::EnvFilter;

use ghvotes::models::{RankedRow, VoteReport};
use ghvotes::{Config, GitHubClient, RunConfig, TallyPipeline};

#[derive(Parser, Debug)]
#[command(name = "ghvotes")]
#[command(version = "0.1.0")]
#[command(about = "Tally pattern-matched votes on GitHub issues and rank the contenders")]
struct Args {
    /// GitHub repository shorthand: `owner/name`
    #[arg(short, long)]
    repo: String,

    /// Personal access token (falls back to the GITHUB_TOKEN env var)
    #[arg(short, long)]
    token: Option<String>,

    /// Regular expression a comment body must match to count as a vote
    #[arg(short, long, default_value = r"\+1")]
    vote: String,

    /// Count comments updated on or after this ISO 8601 date
    #[arg(short, long)]
    since: Option<String>,

    /// Vote uniqueness: 'globally' (one vote per repo), 'locally' (one vote
    /// per issue), or 'none'
    #[arg(short, long, default_value = "locally")]
    unique: String,

    /// Whether a user's 'first' or 'last' vote counts; only applies with
    /// --unique globally
    #[arg(short, long, default_value = "first")]
    count: String,

    /// Output format (text, json, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("ghvotes=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Validate configuration before touching the network
    let config = Config::from_env();
    let run_config = RunConfig::new(
        &args.repo,
        &args.vote,
        &args.unique,
        &args.count,
        args.since.as_deref(),
    )?;

    let token = args.token.clone().or(config.github_token);
    if token.is_none() {
        tracing::warn!("No access token supplied; unauthenticated rate limits apply");
    }

    let github = GitHubClient::new(token.as_deref())?;
    let pipeline = TallyPipeline::new(github, run_config);

    tracing::info!("Tallying votes for repository: {}", args.repo);
    let report = pipeline.run().await?;

    output_report(&report, &args)?;

    Ok(())
}

fn output_report(report: &VoteReport, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(report)?,
        "markdown" => format_markdown(report),
        _ => format_text(report),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

const TABLE_HEADERS: [&str; 8] = [
    "#",
    "Contender",
    "% votes",
    "votes",
    "comments overall",
    "non-vote comments",
    "votes/comments %",
    "voters",
];

fn row_cells(row: &RankedRow) -> [String; 8] {
    [
        row.rank.to_string(),
        row.contender.clone(),
        row.percent_votes.clone(),
        row.votes_count.to_string(),
        row.comments_count.to_string(),
        row.non_vote_comments.to_string(),
        row.votes_comments_ratio.clone(),
        row.voters.clone(),
    ]
}

fn format_text(report: &VoteReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} issues\n", report.summary.all_issues));
    output.push_str(&format!("{} comments\n", report.summary.all_comments));
    output.push_str(&format!(
        "{} users commented\n",
        report.summary.unique_commenters
    ));
    output.push_str(&format!("{} votes\n\n", report.summary.counted_votes));

    let rows: Vec<[String; 8]> = report.rows.iter().map(row_cells).collect();

    let mut widths: [usize; 8] = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let headers = TABLE_HEADERS.map(str::to_string);
    output.push_str(&text_line(&headers, &widths));
    output.push('\n');
    for row in &rows {
        output.push_str(&text_line(row, &widths));
        output.push('\n');
    }

    output
}

fn text_line(cells: &[String; 8], widths: &[usize; 8]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(&format!("{:<width$}", cell, width = *width));
    }
    line.trim_end().to_string()
}

fn format_markdown(report: &VoteReport) -> String {
    let mut output = String::new();

    output.push_str("# Vote report\n\n");

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Issues | {} |\n", report.summary.all_issues));
    output.push_str(&format!("| Comments | {} |\n", report.summary.all_comments));
    output.push_str(&format!(
        "| Users commented | {} |\n",
        report.summary.unique_commenters
    ));
    output.push_str(&format!("| Votes | {} |\n", report.summary.counted_votes));

    output.push_str("\n## Ranking\n\n");
    output.push_str(
        "| # | Contender | % votes | votes | comments overall | non-vote comments \
         | votes/comments % | voters |\n",
    );
    output.push_str(
        "|---|-----------|---------|-------|------------------|-------------------\
         |------------------|--------|\n",
    );

    for row in &report.rows {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            row.rank,
            row.contender,
            row.percent_votes,
            row.votes_count,
            row.comments_count,
            row.non_vote_comments,
            row.votes_comments_ratio,
            row.voters
        ));
    }

    output
}
