//! Custom error types for the common library
//!
//! Every backend operation fails with a variant whose `Display` output is the
//! message shown to the user. The taxonomy is purely status based: a non-2xx
//! response maps to the operation's error, optionally carrying the backend's
//! `detail` field.

use thiserror::Error;

/// Custom error type for backend operations
#[derive(Error, Debug)]
pub enum BackendError {
    /// Login was rejected
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Registration was rejected
    #[error("Registration failed: {detail}")]
    Registration { detail: String },

    /// The profile of the freshly authenticated user could not be fetched
    #[error("Login succeeded, but failed to fetch user profile.")]
    ProfileFetch,

    /// The feed could not be fetched
    #[error("Failed to load feed.")]
    Feed,

    /// Upload was rejected
    #[error("{detail}")]
    Upload { detail: String },

    /// Delete was rejected
    #[error("Delete failed.")]
    Delete,

    /// The backend could not be reached
    #[error("Backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// A successful response carried an unexpected body
    #[error("Unexpected response from backend: {0}")]
    Decode(String),
}

/// Type alias for Result with BackendError
pub type BackendResult<T> = Result<T, BackendError>;

/// Error raised when a media URL cannot carry a transform segment
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransformError {
    /// The URL is not shaped like `scheme://host/endpoint/<file>`
    #[error("Unsupported media URL: {0}")]
    UnsupportedUrl(String),
}
