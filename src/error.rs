//! Error handling module for quotecraft
//!
//! Centralized error type built with thiserror. File loading helpers use
//! `anyhow::Context` and are folded into [`QuoteError::Config`] or
//! [`QuoteError::Catalog`] at the call site.

use thiserror::Error;

use crate::document::layout::LayoutError;

/// Main error type for quotecraft
#[derive(Error, Debug)]
pub enum QuoteError {
    /// IO errors (file writes, terminal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Proposal configuration errors (loading, parsing)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog errors (loading, validation)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Document layout errors
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Document rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for quotecraft operations
pub type Result<T> = std::result::Result<T, QuoteError>;

// Convenient error constructors
impl QuoteError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::BlockKind;

    #[test]
    fn test_error_display() {
        let err = QuoteError::config("bad color");
        assert_eq!(err.to_string(), "Configuration error: bad color");

        let err = QuoteError::catalog("duplicate phase id p1");
        assert_eq!(err.to_string(), "Catalog error: duplicate phase id p1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: QuoteError = io_err.into();
        assert!(matches!(err, QuoteError::Io(_)));
    }

    #[test]
    fn test_layout_error_conversion() {
        let err: QuoteError = LayoutError::BlockTooTall {
            block: BlockKind::Phase("p1".into()),
            height: 300.0,
            available: 257.0,
        }
        .into();
        assert!(matches!(err, QuoteError::Layout(_)));
        assert!(err.to_string().contains("phase p1"));
    }
}
