//! Error types for PropelAuth client operations.
//!
//! This module defines the errors that implementations of
//! [`RolesAndPermissionsClient`](crate::RolesAndPermissionsClient) report. The
//! variants describe what went wrong at the API boundary so that callers can
//! decide whether to retry, re-authenticate or give up.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while talking to the PropelAuth API.
///
/// ## Examples
///
/// ```rust,ignore
/// use propelauth_client::Error;
///
/// match client.get_roles_and_permissions().await {
///     Ok(state) => println!("Project has {} roles", state.roles.len()),
///     Err(Error::AuthError(msg)) => eprintln!("Authentication failed: {}", msg),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API rejected the request.
    ///
    /// Parameters: (HTTP status code, message returned by the API)
    #[error("API request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },

    /// The API key is missing, invalid or lacks access to the project.
    #[error("Failed to authenticate with PropelAuth: {0}")]
    AuthError(String),

    /// Error deserializing the response from PropelAuth.
    ///
    /// This usually means the API shape changed or the response was truncated.
    #[error("Failed to deserialize PropelAuth response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested project or resource was not found.
    #[error("Resource not found")]
    NotFound,

    /// PropelAuth rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
