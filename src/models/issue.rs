use serde::{Deserialize, Serialize};

/// An issue as returned by the tracker. The API `url` is the join key that
/// ties comments back to their parent issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub url: String,
    pub number: u64,
    pub title: String,
}

impl Issue {
    /// Label used for the issue in the ranking table.
    pub fn contender_label(&self) -> String {
        format!("{}(#{})", self.title, self.number)
    }
}
