//! Typed record schemas for the three resource kinds the client fetches.
//!
//! Fields the consumer relies on are required; anything GitHub may omit is
//! an `Option`. A response missing a required field fails at the decode
//! boundary as [`Error::MalformedResponse`](crate::Error::MalformedResponse)
//! instead of surfacing later as a lookup failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of `/search/repositories` results. The search endpoint wraps
/// its items in a page object, so each fetched page is one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<Repository>,
}

/// A repository as returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub stargazers_count: u64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// One entry of a repository's commit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,
}

/// The git-level commit data nested under each log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub author: CommitAuthor,
    pub message: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub date: DateTime<Utc>,
}

/// One entry of a repository contents listing (file, dir, symlink, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    pub sha: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub download_url: Option<String>,
}
