use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response; `message` is the raw body, surfaced verbatim.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    /// `{"error": ...}` inside a 200 body, treated like any other failure.
    #[error("backend error: {0}")]
    Backend(String),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}
