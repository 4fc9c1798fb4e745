use std::collections::HashSet;

use crate::config::Uniqueness;
use crate::models::Comment;

/// Applies the uniqueness policy to the classified vote stream.
///
/// The output is an order-preserving subset of the input, and the dedup key
/// is always the author's user id (logins may collide, ids do not). Votes
/// arrive in fetch order and the first occurrence wins, so under the global
/// policy the fetch direction decides whether a user's earliest or latest
/// vote survives.
pub fn reduce_votes(votes: Vec<Comment>, policy: Uniqueness) -> Vec<Comment> {
    match policy {
        Uniqueness::None => votes,
        Uniqueness::Locally => {
            let mut seen: HashSet<(String, u64)> = HashSet::new();
            votes
                .into_iter()
                .filter(|vote| seen.insert((vote.issue_url.clone(), vote.user.id)))
                .collect()
        }
        Uniqueness::Globally => {
            let mut seen: HashSet<u64> = HashSet::new();
            votes
                .into_iter()
                .filter(|vote| seen.insert(vote.user.id))
                .collect()
        }
    }
}
