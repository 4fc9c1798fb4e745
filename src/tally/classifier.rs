use regex::Regex;

use crate::models::Comment;

/// Classifies comments as votes by matching the body against the configured
/// pattern, case-sensitive and unanchored. The pattern is validated and
/// compiled at configuration time, so classification itself cannot fail.
pub struct VoteClassifier {
    pattern: Regex,
}

impl VoteClassifier {
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// A comment without a body never counts as a vote.
    pub fn is_vote(&self, comment: &Comment) -> bool {
        comment
            .body
            .as_deref()
            .map_or(false, |body| self.pattern.is_match(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::fixtures::comment;

    fn classifier_for(pattern: &str) -> VoteClassifier {
        VoteClassifier::new(Regex::new(pattern).unwrap())
    }

    #[test]
    fn test_matches_anywhere_in_body() {
        let classifier = classifier_for(r"\+1");
        assert!(classifier.is_vote(&comment(1, 1, 10, "alice", "+1")));
        assert!(classifier.is_vote(&comment(2, 1, 11, "bob", "looks great, +1 from me")));
        assert!(!classifier.is_vote(&comment(3, 1, 12, "carol", "needs work")));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let classifier = classifier_for("LGTM");
        assert!(classifier.is_vote(&comment(1, 1, 10, "alice", "LGTM!")));
        assert!(!classifier.is_vote(&comment(2, 1, 11, "bob", "lgtm")));
    }

    #[test]
    fn test_missing_body_is_not_a_vote() {
        let classifier = classifier_for(r"\+1");
        let mut no_body = comment(1, 1, 10, "alice", "+1");
        no_body.body = None;
        assert!(!classifier.is_vote(&no_body));
    }
}
