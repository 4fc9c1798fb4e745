pub mod aggregator;
pub mod classifier;
pub mod pipeline;
pub mod reducer;
pub mod report;

pub use pipeline::TallyPipeline;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::models::{Comment, CommentAuthor, Issue};

    fn issue_url(number: u64) -> String {
        format!("https://api.github.com/repos/acme/poll/issues/{}", number)
    }

    pub fn issue(number: u64, title: &str) -> Issue {
        Issue {
            url: issue_url(number),
            number,
            title: title.to_string(),
        }
    }

    pub fn comment(id: u64, issue_number: u64, user_id: u64, login: &str, body: &str) -> Comment {
        Comment {
            id,
            body: Some(body.to_string()),
            issue_url: issue_url(issue_number),
            user: CommentAuthor {
                id: user_id,
                login: login.to_string(),
            },
            // Update times follow comment ids so fixtures stay in stream order.
            updated_at: Utc.timestamp_opt(1_700_000_000 + id as i64, 0).unwrap(),
        }
    }

    /// `n` "+1" votes on one issue, each by a distinct user.
    pub fn votes_on_issue(issue_number: u64, n: u64) -> Vec<Comment> {
        (0..n)
            .map(|i| {
                let user_id = issue_number * 1000 + i;
                comment(
                    issue_number * 100 + i,
                    issue_number,
                    user_id,
                    &format!("user{}", user_id),
                    "+1",
                )
            })
            .collect()
    }
}
