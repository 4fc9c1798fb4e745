use std::collections::HashSet;

use crate::models::{AggregatedLine, Comment, RankedRow, ReportSummary, VoteReport};

/// Assembles the final report: repo-wide summary plus the ranked table.
/// Summary totals come from the full streams; the ranking only sees votes
/// that grouped under a fetched issue.
pub fn build_report(
    lines: &[AggregatedLine],
    all_comments: &[Comment],
    counted_votes: &[Comment],
) -> VoteReport {
    VoteReport {
        summary: summarize(lines.len(), all_comments, counted_votes),
        rows: rank_lines(lines),
    }
}

fn summarize(
    issue_count: usize,
    all_comments: &[Comment],
    counted_votes: &[Comment],
) -> ReportSummary {
    let unique_commenters = all_comments
        .iter()
        .map(|c| c.user.id)
        .collect::<HashSet<_>>()
        .len();

    ReportSummary {
        all_issues: issue_count,
        all_comments: all_comments.len(),
        unique_commenters,
        counted_votes: counted_votes.len(),
    }
}

fn rank_lines(lines: &[AggregatedLine]) -> Vec<RankedRow> {
    // Percentages are shares of the grand total across the report.
    let votes_overall: usize = lines.iter().map(|line| line.votes.len()).sum();

    let mut rows: Vec<RankedRow> = lines
        .iter()
        .map(|line| build_row(line, votes_overall))
        .collect();

    // Stable sort: rows tied on votes keep their input issue order.
    rows.sort_by(|a, b| b.votes_count.cmp(&a.votes_count));

    // Competition ranking: a row's rank is the 1-based position of the first
    // row with the same vote count, so ex aequo rows share it (1,1,3,...).
    let mut rank = 0;
    let mut previous_count = None;
    for (position, row) in rows.iter_mut().enumerate() {
        if previous_count != Some(row.votes_count) {
            rank = position + 1;
            previous_count = Some(row.votes_count);
        }
        row.rank = rank;
    }

    rows
}

fn build_row(line: &AggregatedLine, votes_overall: usize) -> RankedRow {
    let votes_count = line.votes.len();
    let comments_count = line.comments.len();

    RankedRow {
        rank: 0,
        contender: line.issue.contender_label(),
        percent_votes: percent(votes_count, votes_overall),
        votes_count,
        comments_count,
        non_vote_comments: comments_count.saturating_sub(votes_count),
        votes_comments_ratio: percent(votes_count, comments_count),
        voters: line
            .votes
            .iter()
            .map(|vote| vote.user.login.as_str())
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// Two-decimal percentage; a zero denominator renders as plain "0%".
fn percent(numerator: usize, denominator: usize) -> String {
    if denominator == 0 {
        return "0%".to_string();
    }
    format!("{:.2}%", numerator as f64 / denominator as f64 * 100.0)
}
