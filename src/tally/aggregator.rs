use std::collections::HashMap;

use crate::models::{AggregatedLine, Comment, Issue};

/// Groups the comment and counted-vote streams by parent issue.
///
/// Every input issue gets exactly one line, in input order; an issue with no
/// activity gets empty lists rather than being dropped. Comments pointing at
/// issues outside the input list land in no line (they still count toward
/// the report's summary totals, which are taken from the full streams).
pub fn aggregate(
    issues: Vec<Issue>,
    comments: &[Comment],
    votes: &[Comment],
) -> Vec<AggregatedLine> {
    let mut comments_by_issue = group_by_issue(comments);
    let mut votes_by_issue = group_by_issue(votes);

    issues
        .into_iter()
        .map(|issue| {
            let comments = comments_by_issue
                .remove(issue.url.as_str())
                .unwrap_or_default();
            let votes = votes_by_issue.remove(issue.url.as_str()).unwrap_or_default();
            AggregatedLine {
                issue,
                comments,
                votes,
            }
        })
        .collect()
}

fn group_by_issue<'a>(comments: &'a [Comment]) -> HashMap<&'a str, Vec<Comment>> {
    let mut groups: HashMap<&str, Vec<Comment>> = HashMap::new();
    for comment in comments {
        groups
            .entry(comment.issue_url.as_str())
            .or_default()
            .push(comment.clone());
    }
    groups
}
