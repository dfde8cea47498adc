//! Error types for answer extraction and question exploration.
//!
//! "No answer on the page" is not an error: it is reported through
//! [`AnswerRecord::has_answer`](crate::answer::AnswerRecord::has_answer).
//! The variants here cover the cases where something actually broke.

use std::collections::HashMap;
use thiserror::Error;

use crate::answer::Shape;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PaaError>;

/// The main error type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaaError {
    /// The fetch collaborator could not produce a page.
    #[error("Fetch failed for '{query}' ({url}): {message}")]
    Fetch {
        /// The search query.
        query: String,
        /// The URL that was requested.
        url: String,
        /// Human readable failure description.
        message: String,
        /// HTTP status, when the server answered.
        status: Option<u16>,
    },

    /// A recognised answer shape did not have the expected structure.
    #[error("Cannot extract {shape} answer for '{question}': {reason}")]
    Extraction {
        /// The question being answered.
        question: String,
        /// The shape the container was classified as.
        shape: Shape,
        /// What was missing.
        reason: String,
    },

    /// The question was rejected before any fetch.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaaError {
    /// Creates a fetch error.
    #[must_use]
    pub fn fetch(
        query: impl Into<String>,
        url: impl Into<String>,
        message: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        Self::Fetch {
            query: query.into(),
            url: url.into(),
            message: message.into(),
            status,
        }
    }

    /// Creates an extraction error.
    #[must_use]
    pub fn extraction(question: impl Into<String>, shape: Shape, reason: impl Into<String>) -> Self {
        Self::Extraction {
            question: question.into(),
            shape,
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether the error always ends a traversal.
    ///
    /// Extraction errors are subject to
    /// [`ExtractionErrorPolicy`](crate::config::ExtractionErrorPolicy); everything
    /// else stops the sequence.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Extraction { .. })
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::Fetch { query, url, status, .. } => {
                map.insert("type".to_string(), serde_json::json!("FetchError"));
                map.insert("query".to_string(), serde_json::json!(query));
                map.insert("url".to_string(), serde_json::json!(url));
                map.insert("status".to_string(), serde_json::json!(status));
            }
            Self::Extraction { question, shape, reason } => {
                map.insert("type".to_string(), serde_json::json!("ExtractionError"));
                map.insert("question".to_string(), serde_json::json!(question));
                map.insert("shape".to_string(), serde_json::json!(shape));
                map.insert("reason".to_string(), serde_json::json!(reason));
            }
            Self::InvalidInput(_) => {
                map.insert("type".to_string(), serde_json::json!("InvalidInput"));
            }
            Self::Config(_) => {
                map.insert("type".to_string(), serde_json::json!("ConfigError"));
            }
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Rejects empty or whitespace-only questions.
pub fn validate_question(question: &str) -> Result<()> {
    if question.trim().is_empty() {
        return Err(PaaError::invalid_input("question must not be empty"));
    }
    Ok(())
}
