use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Bad signature, malformed structure or missing claims. Expiry is not an error.
    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}
