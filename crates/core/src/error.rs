//! Error types for the shopping agent.

use std::time::Duration;

use thiserror::Error;

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for the shopping agent.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors from the catalog store client.
///
/// `RetriesExhausted` is terminal and distinct from an empty result set: a
/// query that succeeds with zero rows is `Ok(vec![])`, never an error.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Network or transport failure for a single attempt.
    #[error("store request failed: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("store returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The round trip exceeded the client timeout.
    #[error("store request timed out after {0:?}")]
    Timeout(Duration),

    /// The response body could not be decoded at all.
    #[error("malformed store response: {0}")]
    InvalidResponse(String),

    /// Every attempt in the retry budget failed.
    #[error("store unavailable after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retries_exhausted_display() {
        let err = StoreError::RetriesExhausted {
            attempts: 3,
            last_error: "connection refused".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("3 attempts"));
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn test_store_error_bridges_into_top_level() {
        let err: Error = StoreError::Transport("dns failure".to_string()).into();
        assert!(matches!(err, Error::Store(_)));
    }
}
