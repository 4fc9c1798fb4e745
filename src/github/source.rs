use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::{FetchOrder, RepoId};
use crate::error::Result;
use crate::models::{Comment, Issue};

/// The two upstream fetches the tally pipeline depends on. `GitHubClient`
/// is the production implementation; tests substitute an in-memory fixture.
#[async_trait]
pub trait TrackerSource: Send + Sync {
    async fn fetch_issues(&self, repo: &RepoId) -> Result<Vec<Issue>>;

    /// Comments updated at or after `since`, ordered by update time in the
    /// given direction. The tally stages depend on this ordering.
    async fn fetch_comments(
        &self,
        repo: &RepoId,
        since: Option<DateTime<Utc>>,
        order: FetchOrder,
    ) -> Result<Vec<Comment>>;
}
