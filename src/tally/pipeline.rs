use std::sync::Arc;
use std::time::Duration;

use futures::try_join;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::RunConfig;
use crate::error::Result;
use crate::github::TrackerSource;
use crate::models::{Comment, VoteReport};
use crate::tally::aggregator::aggregate;
use crate::tally::classifier::VoteClassifier;
use crate::tally::reducer::reduce_votes;
use crate::tally::report::build_report;

pub struct TallyPipeline {
    tracker: Arc<dyn TrackerSource>,
    config: RunConfig,
}

impl TallyPipeline {
    pub fn new(tracker: impl TrackerSource + 'static, config: RunConfig) -> Self {
        Self {
            tracker: Arc::new(tracker),
            config,
        }
    }

    /// Runs one report: both upstream fetches joined fail-fast, then the
    /// synchronous tally stages over the frozen snapshot. Either fetch
    /// failing aborts the run before any stage sees partial data.
    pub async fn run(&self) -> Result<VoteReport> {
        let classifier = VoteClassifier::new(self.config.vote_pattern.clone());

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(format!(
            "Fetching issues and comments for {}",
            self.config.repo
        ));
        pb.enable_steady_tick(Duration::from_millis(120));

        let fetched = try_join!(
            self.tracker.fetch_issues(&self.config.repo),
            self.tracker.fetch_comments(
                &self.config.repo,
                self.config.since,
                self.config.fetch_order(),
            ),
        );
        pb.finish_and_clear();
        let (issues, comments) = fetched?;

        tracing::info!("Fetched {} issues and {} comments", issues.len(), comments.len());

        let all_votes: Vec<Comment> = comments
            .iter()
            .filter(|c| classifier.is_vote(c))
            .cloned()
            .collect();
        tracing::info!("{} comments matched the vote pattern", all_votes.len());

        let counted = reduce_votes(all_votes, self.config.unique);
        tracing::info!(
            "{} votes counted under the '{}' policy",
            counted.len(),
            self.config.unique
        );

        let lines = aggregate(issues, &comments, &counted);
        Ok(build_report(&lines, &comments, &counted))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::config::{FetchOrder, RepoId};
    use crate::error::Error;
    use crate::models::Issue;
    use crate::tally::fixtures::{comment, issue};

    /// In-memory tracker serving a frozen snapshot. `order` flips the stored
    /// ascending comment stream the way the live endpoint would.
    struct FixtureTracker {
        issues: Vec<Issue>,
        comments: Vec<Comment>,
        fail_comments: bool,
    }

    #[async_trait]
    impl TrackerSource for FixtureTracker {
        async fn fetch_issues(&self, _repo: &RepoId) -> Result<Vec<Issue>> {
            Ok(self.issues.clone())
        }

        async fn fetch_comments(
            &self,
            _repo: &RepoId,
            _since: Option<DateTime<Utc>>,
            order: FetchOrder,
        ) -> Result<Vec<Comment>> {
            if self.fail_comments {
                return Err(Error::GitHubApi("comment fetch failed".to_string()));
            }
            let mut comments = self.comments.clone();
            if order == FetchOrder::Descending {
                comments.reverse();
            }
            Ok(comments)
        }
    }

    fn run_config(unique: &str, count: &str) -> RunConfig {
        RunConfig::new("acme/poll", r"\+1", unique, count, None).unwrap()
    }

    // Ascending stream: alice votes on #1, then on #2, bob votes on #2.
    fn fixture(fail_comments: bool) -> FixtureTracker {
        FixtureTracker {
            issues: vec![issue(1, "One"), issue(2, "Two")],
            comments: vec![
                comment(1, 1, 10, "alice", "+1"),
                comment(2, 2, 10, "alice", "+1"),
                comment(3, 2, 11, "bob", "+1"),
            ],
            fail_comments,
        }
    }

    #[tokio::test]
    async fn test_globally_first_counts_the_earliest_vote() {
        let pipeline = TallyPipeline::new(fixture(false), run_config("globally", "first"));
        let report = pipeline.run().await.unwrap();

        let one = report.rows.iter().find(|r| r.contender == "One(#1)").unwrap();
        let two = report.rows.iter().find(|r| r.contender == "Two(#2)").unwrap();
        assert_eq!(one.voters, "alice");
        assert_eq!(two.voters, "bob");
        assert_eq!(report.summary.counted_votes, 2);
    }

    #[tokio::test]
    async fn test_globally_last_counts_the_most_recent_vote() {
        let pipeline = TallyPipeline::new(fixture(false), run_config("globally", "last"));
        let report = pipeline.run().await.unwrap();

        let one = report.rows.iter().find(|r| r.contender == "One(#1)").unwrap();
        let two = report.rows.iter().find(|r| r.contender == "Two(#2)").unwrap();
        assert_eq!(one.voters, "");
        assert_eq!(two.voters, "bob,alice");
    }

    #[tokio::test]
    async fn test_none_counts_every_matching_comment() {
        let pipeline = TallyPipeline::new(fixture(false), run_config("none", "first"));
        let report = pipeline.run().await.unwrap();

        let row_total: usize = report.rows.iter().map(|r| r.votes_count).sum();
        assert_eq!(row_total, 3);
        assert_eq!(report.summary.counted_votes, 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_the_whole_run() {
        let pipeline = TallyPipeline::new(fixture(true), run_config("none", "first"));
        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(err, Error::GitHubApi(_)));
    }
}
