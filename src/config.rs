use std::env;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            github_token: env::var("GITHUB_TOKEN").ok(),
        }
    }
}

/// How many votes a single user may cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uniqueness {
    /// Every matching comment counts, even repeats by the same user.
    None,
    /// One vote per user per issue.
    Locally,
    /// One vote per user across the whole repository.
    Globally,
}

impl FromStr for Uniqueness {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Uniqueness::None),
            "locally" => Ok(Uniqueness::Locally),
            "globally" => Ok(Uniqueness::Globally),
            other => Err(Error::Config(format!(
                "unknown uniqueness policy '{}', expected one of: none, locally, globally",
                other
            ))),
        }
    }
}

impl fmt::Display for Uniqueness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uniqueness::None => write!(f, "none"),
            Uniqueness::Locally => write!(f, "locally"),
            Uniqueness::Globally => write!(f, "globally"),
        }
    }
}

/// Which of a user's votes survives global deduplication. Only meaningful
/// with `Uniqueness::Globally`; it also selects the comment fetch direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountPolicy {
    First,
    Last,
}

impl CountPolicy {
    pub fn fetch_order(&self) -> FetchOrder {
        match self {
            CountPolicy::First => FetchOrder::Ascending,
            CountPolicy::Last => FetchOrder::Descending,
        }
    }
}

impl FromStr for CountPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first" => Ok(CountPolicy::First),
            "last" => Ok(CountPolicy::Last),
            other => Err(Error::Config(format!(
                "unknown count policy '{}', expected 'first' or 'last'",
                other
            ))),
        }
    }
}

/// Temporal order of the comment stream, by update time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrder {
    Ascending,
    Descending,
}

impl FetchOrder {
    pub fn query_direction(&self) -> &'static str {
        match self {
            FetchOrder::Ascending => "asc",
            FetchOrder::Descending => "desc",
        }
    }
}

/// `owner/name` repository shorthand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(RepoId {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(Error::Config(format!(
                "invalid repository '{}', expected 'owner/name' shorthand",
                s
            ))),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Validated parameters for a single report run. Construction compiles the
/// vote pattern and parses every bound, so a bad flag fails here rather than
/// mid-fetch or per comment.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub repo: RepoId,
    pub vote_pattern: Regex,
    pub unique: Uniqueness,
    pub count: CountPolicy,
    pub since: Option<DateTime<Utc>>,
}

impl RunConfig {
    pub fn new(
        repo: &str,
        vote_pattern: &str,
        unique: &str,
        count: &str,
        since: Option<&str>,
    ) -> Result<Self> {
        let vote_pattern = Regex::new(vote_pattern)
            .map_err(|e| Error::Config(format!("invalid vote pattern: {}", e)))?;

        Ok(Self {
            repo: repo.parse()?,
            vote_pattern,
            unique: unique.parse()?,
            count: count.parse()?,
            since: since.map(parse_since).transpose()?,
        })
    }

    pub fn fetch_order(&self) -> FetchOrder {
        self.count.fetch_order()
    }
}

fn parse_since(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // A bare date means midnight UTC of that day.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap().and_utc())
        .map_err(|_| {
            Error::Config(format!(
                "invalid since date '{}', expected ISO 8601 (e.g. 2024-01-01 or \
                 2024-01-01T00:00:00Z)",
                s
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_accepts_defaults() {
        let config = RunConfig::new("rust-lang/rfcs", r"\+1", "locally", "first", None).unwrap();
        assert_eq!(config.repo.owner, "rust-lang");
        assert_eq!(config.repo.name, "rfcs");
        assert_eq!(config.unique, Uniqueness::Locally);
        assert_eq!(config.count, CountPolicy::First);
        assert!(config.since.is_none());
    }

    #[test]
    fn test_invalid_vote_pattern_is_config_error() {
        let err = RunConfig::new("a/b", "(unclosed", "none", "first", None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unknown_uniqueness_is_config_error() {
        let err = RunConfig::new("a/b", r"\+1", "per-repo", "first", None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unknown_count_policy_is_config_error() {
        let err = RunConfig::new("a/b", r"\+1", "globally", "latest", None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_repo_shorthand_is_config_error() {
        for repo in ["plainname", "a/b/c", "/name", "owner/"] {
            let err = RunConfig::new(repo, r"\+1", "none", "first", None).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "accepted '{}'", repo);
        }
    }

    #[test]
    fn test_since_accepts_date_and_rfc3339() {
        let config =
            RunConfig::new("a/b", r"\+1", "none", "first", Some("2024-03-01")).unwrap();
        assert_eq!(config.since.unwrap().to_rfc3339(), "2024-03-01T00:00:00+00:00");

        let config =
            RunConfig::new("a/b", r"\+1", "none", "first", Some("2024-03-01T12:30:00Z")).unwrap();
        assert_eq!(config.since.unwrap().to_rfc3339(), "2024-03-01T12:30:00+00:00");
    }

    #[test]
    fn test_malformed_since_is_config_error() {
        let err =
            RunConfig::new("a/b", r"\+1", "none", "first", Some("March 1st")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_count_policy_selects_fetch_order() {
        assert_eq!(CountPolicy::First.fetch_order(), FetchOrder::Ascending);
        assert_eq!(CountPolicy::Last.fetch_order(), FetchOrder::Descending);
        assert_eq!(FetchOrder::Descending.query_direction(), "desc");
    }
}
