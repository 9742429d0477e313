//! Error types for the completion client

use thiserror::Error;

/// Failure modes of a single completion call
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Non-success HTTP status from the completion endpoint; the raw body
    /// is preserved for diagnostics
    #[error("completion endpoint returned status {status}: {body}")]
    Http { status: u16, body: String },

    /// Success status but a body that is not valid JSON
    #[error("completion endpoint returned invalid JSON: {body}")]
    InvalidResponse { body: String },

    /// Network-level failure: connection, DNS, or timeout
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = CompletionError::Http {
            status: 429,
            body: "slow down".to_string(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("slow down"));
    }

    #[test]
    fn test_invalid_response_display() {
        let err = CompletionError::InvalidResponse {
            body: "<html>".to_string(),
        };
        assert!(err.to_string().contains("invalid JSON"));
        assert!(err.to_string().contains("<html>"));
    }

    #[test]
    fn test_transport_display() {
        let err = CompletionError::Transport("operation timed out".to_string());
        assert!(err.to_string().contains("transport error"));
        assert!(err.to_string().contains("timed out"));
    }
}
