//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding controller configuration failures.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// An error from the underlying API client.
    Api(catalog_api::Error),
    /// Caller-provided configuration was rejected (e.g. a zero page size).
    InvalidInput(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<catalog_api::Error> for CatalogError {
    fn from(e: catalog_api::Error) -> Self {
        Self::Api(e)
    }
}
