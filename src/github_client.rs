use chrono::Utc;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, warn};

use crate::error::Error;
use crate::models::{Commit, ContentEntry, SearchPage};

const API_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("github-api-client/", env!("CARGO_PKG_VERSION"));

/// Client for GitHub's paginated REST API.
///
/// Holds a session with a fixed header set (accept type, bearer token,
/// API version) built once at construction and never mutated afterwards.
/// All fetch methods follow the `Link: <...>; rel="next"` cursor until the
/// last page or a caller-supplied result cap.
pub struct GitHubClient {
    http: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a client against the public GitHub API.
    ///
    /// Token validity is the server's concern; a bad token surfaces as
    /// [`Error::Authentication`] on the first request.
    pub fn new(token: &str) -> Result<Self, Error> {
        Self::with_base_url(token, API_BASE_URL)
    }

    /// Create a client against a non-default API host, e.g. a GitHub
    /// Enterprise instance or a test server.
    pub fn with_base_url(token: &str, base_url: impl Into<String>) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::Authentication)?;
        authorization.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(GitHubClient {
            http,
            base_url: base_url.into(),
        })
    }

    /// Search for repositories matching `query`, following pagination up to
    /// `max_results` page records. Each page of the search endpoint is one
    /// [`SearchPage`] record wrapping its `items`.
    pub async fn search_repositories(
        &self,
        query: &str,
        sort: &str,
        order: &str,
        per_page: u32,
        max_results: Option<usize>,
    ) -> Result<Vec<SearchPage>, Error> {
        let url = format!("{}/search/repositories", self.base_url);
        let params = [
            ("q", query.to_string()),
            ("sort", sort.to_string()),
            ("order", order.to_string()),
            ("per_page", per_page.to_string()),
        ];
        self.collect(&url, &params, max_results).await
    }

    /// Get commits from a repository, newest first.
    pub async fn get_repository_commits(
        &self,
        owner: &str,
        repo: &str,
        per_page: u32,
        max_results: Option<usize>,
    ) -> Result<Vec<Commit>, Error> {
        let url = format!("{}/repos/{}/{}/commits", self.base_url, owner, repo);
        let params = [("per_page", per_page.to_string())];
        self.collect(&url, &params, max_results).await
    }

    /// Get the contents listing of a repository at `path` (all pages).
    pub async fn get_repository_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<ContentEntry>, Error> {
        let url = format!("{}/repos/{}/{}/contents/{}", self.base_url, owner, repo, path);
        self.collect(&url, &[], None).await
    }

    /// Fetch every page starting from `url`, appending each page's records
    /// in fetch order.
    ///
    /// `params` apply to the first request only; cursor URLs extracted from
    /// the `Link` header already carry their query state. Stops once the
    /// cursor is absent or the accumulator reaches `max_results`, and never
    /// fetches a page beyond the one that satisfies the cap. The returned
    /// sequence is truncated to exactly `max_results` when a cap is given.
    pub async fn collect<T>(
        &self,
        url: &str,
        params: &[(&str, String)],
        max_results: Option<usize>,
    ) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned,
    {
        let mut all_results = Vec::new();
        let mut cursor = Some(url.to_string());
        let mut params = params;

        while let Some(url) = cursor {
            if max_results.is_some_and(|max| all_results.len() >= max) {
                break;
            }
            let (records, next) = self.fetch_page(&url, params).await?;
            all_results.extend(records);
            cursor = next;
            params = &[];
        }

        if let Some(max) = max_results {
            all_results.truncate(max);
        }
        Ok(all_results)
    }

    /// Fetch a single page and extract the next-page cursor, if any.
    ///
    /// A JSON array body yields one record per element; a single object
    /// yields exactly one record. Non-200 statuses become typed errors, and
    /// every failure is logged with the offending URL and parameters before
    /// propagating.
    pub async fn fetch_page<T>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<(Vec<T>, Option<String>), Error>
    where
        T: DeserializeOwned,
    {
        debug!("Retrieving from {}", url);
        match self.fetch_page_inner(url, params).await {
            Ok(page) => Ok(page),
            Err(e) => {
                error!("Error requesting {} with params {:?}: {}", url, params, e);
                Err(e)
            }
        }
    }

    async fn fetch_page_inner<T>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<(Vec<T>, Option<String>), Error>
    where
        T: DeserializeOwned,
    {
        let response = self.get(url, params).await?;
        let status = response.status();
        let next = next_page_url(response.headers());

        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(Error::from_status(status, &body));
        }

        let json: Value =
            serde_json::from_str(&body).map_err(|e| Error::MalformedResponse(e.to_string()))?;
        Ok((decode_records(json)?, next))
    }

    /// Issue one GET, pausing when the server signals quota exhaustion.
    ///
    /// The governor is reactive: it fires only on a 403 response whose
    /// `x-ratelimit-remaining` header is exactly zero, waits until the
    /// advertised reset time, then re-issues the request once. A second
    /// rejection falls through to status classification.
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Response, Error> {
        let response = self.send(url, params).await?;

        let signal = RateLimitSignal::from_headers(response.headers());
        if response.status() == StatusCode::FORBIDDEN && signal.exhausted() {
            let wait = signal.until_reset();
            warn!(
                "Rate limit exceeded. Waiting {} seconds until the quota resets",
                wait.as_secs()
            );
            sleep(wait).await;
            return self.send(url, params).await;
        }

        Ok(response)
    }

    async fn send(&self, url: &str, params: &[(&str, String)]) -> Result<Response, Error> {
        let mut request = self.http.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }
        Ok(request.send().await?)
    }
}

/// Per-response rate-limit state read from GitHub's quota headers.
/// A missing remaining header means "no signal", never "zero left".
#[derive(Debug, Clone, Copy)]
struct RateLimitSignal {
    remaining: Option<u32>,
    reset: Option<i64>,
}

impl RateLimitSignal {
    fn from_headers(headers: &HeaderMap) -> Self {
        RateLimitSignal {
            remaining: parse_header(headers, "x-ratelimit-remaining"),
            reset: parse_header(headers, "x-ratelimit-reset"),
        }
    }

    fn exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    fn until_reset(&self) -> Duration {
        let now = Utc::now().timestamp();
        let seconds = self.reset.unwrap_or(0).saturating_sub(now).max(0);
        Duration::from_secs(seconds as u64)
    }
}

fn parse_header<T: FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

/// Extract the URL under `rel="next"` from a `Link` header, if present.
fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(header::LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let (target, attrs) = entry.split_once(';')?;
        if !attrs.split(';').any(|attr| attr.trim() == r#"rel="next""#) {
            return None;
        }
        Some(
            target
                .trim()
                .trim_start_matches('<')
                .trim_end_matches('>')
                .to_string(),
        )
    })
}

fn decode_records<T>(body: Value) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    match body {
        Value::Array(elements) => elements
            .into_iter()
            .map(|element| {
                serde_json::from_value(element).map_err(|e| Error::MalformedResponse(e.to_string()))
            })
            .collect(),
        object => Ok(vec![
            serde_json::from_value(object).map_err(|e| Error::MalformedResponse(e.to_string()))?,
        ]),
    }
}
