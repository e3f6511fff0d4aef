//! Failure kinds inside the outbound clients.

use std::time::Duration;
use thiserror::Error;

/// Why an outbound call produced no usable result.
///
/// These never leave the client modules; they are logged and turned into
/// an `Unavailable` result.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("API rejected request: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl ClientError {
    /// Classify a reqwest send/read error.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ClientError::Timeout(Duration::from_secs(30)).to_string(),
            "request timed out after 30s"
        );
        assert_eq!(
            ClientError::Status { status: 503, body: "overloaded".into() }.to_string(),
            "HTTP 503: overloaded"
        );
        assert_eq!(
            ClientError::Rejected("No texts specified".into()).to_string(),
            "API rejected request: No texts specified"
        );
    }
}
