//! Error types for the API client.

/// Errors that can occur when making API requests.
///
/// Variants carry only owned strings so the error can be cloned into
/// listing state and compared in tests.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The request never produced a response (connect failure, timeout, or
    /// the body could not be read).
    #[error("Network error: {0}")]
    Network(String),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not the expected JSON shape.
    #[error("Malformed response: {0}")]
    Decode(String),
    /// The request URL could not be constructed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
