use thiserror::Error;

mod domain_types;

pub use domain_types::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Value out of bounds: {value}, expected at least {min}")]
    OutOfBounds { value: usize, min: usize },
}
