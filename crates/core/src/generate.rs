//! The generation seam.
//!
//! The desk only knows "two product names in, article and citations
//! out, or an error". Provider clients implement [`Generator`].

use thiserror::Error;

use crate::article::{ComparisonData, GroundingSource};

/// Shown when the model answered but its output could not be read as an
/// article.
pub const FORMAT_FAILURE_MESSAGE: &str = "The review could not be formatted properly. Please try again.";

/// Shown when a failure carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during comparison.";

/// A successful generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub data: ComparisonData,
    pub sources: Vec<GroundingSource>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// Provider disabled or unsupported
    #[error("AI not configured: {0}")]
    NotConfigured(String),
    #[error("API key not configured")]
    MissingKey,
    #[error("Network error: {0}")]
    Network(String),
    /// Provider returned an error response
    #[error("{message}")]
    Api { status: u16, message: String },
    /// Model output is not a valid article
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Model returned no content")]
    EmptyResponse,
}

impl GenerateError {
    /// Message suitable for the desk's error line.
    ///
    /// Output the model produced but we could not read collapses to the
    /// fixed formatting message; everything else keeps its own text.
    pub fn user_message(&self) -> String {
        match self {
            GenerateError::Parse(_) | GenerateError::EmptyResponse => FORMAT_FAILURE_MESSAGE.to_string(),
            other => {
                let msg = other.to_string();
                if msg.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    msg
                }
            }
        }
    }
}

pub trait Generator {
    fn generate(&self, product_a: &str, product_b: &str) -> Result<Generated, GenerateError>;
}

impl<F> Generator for F
where
    F: Fn(&str, &str) -> Result<Generated, GenerateError>,
{
    fn generate(&self, product_a: &str, product_b: &str) -> Result<Generated, GenerateError> {
        self(product_a, product_b)
    }
}
