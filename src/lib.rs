//! # GitHub API Client
//!
//! A Rust client for GitHub's paginated REST API that fetches repository
//! search results, commit logs and directory contents, with bearer
//! authentication, reactive rate-limit backoff and `Link`-header pagination.
//!
//! ## Main Components
//!
//! - [`GitHubClient`]: the paginated API client handling all fetch operations
//! - [`Error`]: the typed failure taxonomy returned by every operation
//! - [`Args`]: command line argument structure for the demonstration binary
//!
//! ## Example
//!
//! ```no_run
//! use github_api_client::GitHubClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GitHubClient::new(&std::env::var("GITHUB_TOKEN")?)?;
//!
//!     // Collect up to three page records of repository search results.
//!     let pages = client
//!         .search_repositories("stars:>1000", "stars", "desc", 100, Some(3))
//!         .await?;
//!     for page in &pages {
//!         println!("{} results", page.items.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod args;
mod error;
mod github_client;
mod models;

// Re-export main components for documentation and external use
pub use crate::args::Args;
pub use crate::error::Error;
pub use crate::github_client::GitHubClient;
pub use crate::models::{
    Commit, CommitAuthor, CommitDetail, ContentEntry, Owner, Repository, SearchPage,
};
