pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod tally;

pub use config::{Config, CountPolicy, FetchOrder, RepoId, RunConfig, Uniqueness};
pub use error::{Error, Result};
pub use github::{GitHubClient, TrackerSource};
pub use tally::TallyPipeline;
