use thiserror::Error;

/// Failures a single API call can surface. All of these end up as a failed
/// case record; none abort the run.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("missing field `{0}` in response")]
    MissingField(&'static str),
}
