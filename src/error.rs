//! Error types for the steam-scout crate.
//!
//! All errors carry stable string messages suitable for display to users
//! and for log lines. Catalog-facing failures are normally absorbed at the
//! component boundary (logged, degraded to an empty or absent value);
//! store-facing failures propagate.

/// Errors that can occur in the search and import pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// An HTTP request to the storefront failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A storefront response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid pipeline configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The host library store rejected an operation.
    #[error("library store error: {0}")]
    Store(#[from] StoreError),

    /// A local file operation failed (temp files during image attachment).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error reported by a host library store implementation.
///
/// Host adapters wrap their native database errors in this type; the
/// pipeline only ever needs the message.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    /// Build a store error from any displayable cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Convenience type alias for steam-scout results.
pub type Result<T> = std::result::Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = ScoutError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = ScoutError::Parse("unexpected JSON shape".into());
        assert_eq!(err.to_string(), "parse error: unexpected JSON shape");
    }

    #[test]
    fn display_config() {
        let err = ScoutError::Config("max_candidates must be > 0".into());
        assert_eq!(err.to_string(), "config error: max_candidates must be > 0");
    }

    #[test]
    fn display_store() {
        let err = ScoutError::from(StoreError::new("database locked"));
        assert_eq!(err.to_string(), "library store error: database locked");
    }

    #[test]
    fn store_error_message_passes_through() {
        let err = StoreError::new("no such entry");
        assert_eq!(err.to_string(), "no such entry");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ScoutError::from(io);
        assert!(err.to_string().starts_with("I/O error:"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScoutError>();
        assert_send_sync::<StoreError>();
    }
}
