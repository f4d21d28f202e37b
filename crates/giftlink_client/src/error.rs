//! crates/giftlink_client/src/error.rs
//!
//! Errors raised while talking to the GiftLink API.

/// The primary error type for the client crate.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a usable response (connection, timeout, bad body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an unexpected status.
    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
