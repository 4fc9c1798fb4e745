use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An issue comment. `issue_url` is the foreign key into the issue list;
/// `body` is absent for some events the API surfaces as comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub body: Option<String>,
    pub issue_url: String,
    pub user: CommentAuthor,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub id: u64,
    pub login: String,
}
