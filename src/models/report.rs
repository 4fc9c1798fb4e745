use serde::{Deserialize, Serialize};

use super::comment::Comment;
use super::issue::Issue;

/// Per-issue grouping of the run's comments and counted votes. Built fresh
/// for every run and consumed by the report builder.
#[derive(Debug, Clone)]
pub struct AggregatedLine {
    pub issue: Issue,
    pub comments: Vec<Comment>,
    pub votes: Vec<Comment>,
}

/// Repo-wide totals for the run. `unique_commenters` is distinct-by-user-id
/// over all comments, not just votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub all_issues: usize,
    pub all_comments: usize,
    pub unique_commenters: usize,
    pub counted_votes: usize,
}

/// One row of the ranking table. Percent fields are preformatted strings so
/// the zero-denominator default ("0%") renders the same everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRow {
    pub rank: usize,
    pub contender: String,
    pub percent_votes: String,
    pub votes_count: usize,
    pub comments_count: usize,
    pub non_vote_comments: usize,
    pub votes_comments_ratio: String,
    pub voters: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReport {
    pub summary: ReportSummary,
    pub rows: Vec<RankedRow>,
}
