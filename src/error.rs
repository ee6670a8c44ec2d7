use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Fallback detail used when an error body is JSON but carries no `message`.
const NO_DETAILS: &str = "no additional details provided";

/// Fallback detail used when an error body is not valid JSON at all.
const NON_JSON_BODY: &str = "response body is not valid JSON";

/// Failures surfaced by [`GitHubClient`](crate::GitHubClient).
///
/// Status-level variants mirror GitHub's documented error responses so
/// callers can branch on the cause instead of parsing messages.
#[derive(Debug, Error)]
pub enum Error {
    #[error("authentication error: check your token")]
    Authentication,

    #[error("rate limit exceeded or permission denied")]
    RateLimitOrPermission,

    #[error("resource not found: verify the URL")]
    NotFound,

    #[error("validation failed: parameters are incorrect")]
    Validation,

    #[error("unknown error: status {status}, {message}")]
    UnknownStatus { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Classify a non-success HTTP status into a typed failure.
    ///
    /// Statuses outside the fixed table become [`Error::UnknownStatus`]
    /// carrying the decoded `message` field of the body, or a fixed
    /// sentinel when the body is not JSON.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 => Error::Authentication,
            403 => Error::RateLimitOrPermission,
            404 => Error::NotFound,
            422 => Error::Validation,
            code => Error::UnknownStatus {
                status: code,
                message: extract_message(body),
            },
        }
    }
}

/// Best-effort extraction of the `message` field from an error body.
fn extract_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => json
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(NO_DETAILS)
            .to_string(),
        Err(_) => NON_JSON_BODY.to_string(),
    }
}
