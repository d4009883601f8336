use thiserror::Error;

/// Errors produced by the Slack Web API boundary.
#[derive(Debug, Error)]
pub enum SlackError {
    /// Transport-level failure (connect, TLS, timeout, bad status).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Slack answered `ok: false` with a machine-readable error code
    /// (e.g. `channel_not_found`, `user_not_found`).
    #[error("slack api error from {method}: {code}")]
    Api { method: &'static str, code: String },

    /// Slack answered `ok: true` but the payload is missing a field the
    /// caller needs.
    #[error("malformed response from {method}: {reason}")]
    MalformedResponse {
        method: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, SlackError>;
