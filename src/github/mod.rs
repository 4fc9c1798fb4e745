pub mod client;
pub mod rate_limiter;
pub mod source;

pub use client::GitHubClient;
pub use source::TrackerSource;
