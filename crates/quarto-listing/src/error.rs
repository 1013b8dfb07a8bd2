//! Error types for quarto-listing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Invalid listing configuration: {0}")]
    Config(String),

    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Document error: {0}")]
    Document(String),
}

impl ListingError {
    /// Create a configuration error from any message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ListingError>;
