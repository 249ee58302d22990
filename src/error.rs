// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names the stage and the kind of failure: configuration
//! before any I/O, shape problems at the API boundary, transport failures
//! from either network peer, and partial failures from the store writer.

use std::fmt;
use thiserror::Error;

/// Why a template listing was rejected.
///
/// The listing is checked once, at the API boundary; nothing downstream
/// ever sees an unvalidated reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The body was valid JSON but not an array.
    NotAnArray { found: &'static str },
    /// An element was not an object at all.
    NotAnObject { index: usize },
    /// An element lacked a string value for `key`.
    MissingString { index: usize, key: &'static str },
    /// An element carried an empty string for `key`.
    EmptyString { index: usize, key: &'static str },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnArray { found } => {
                write!(f, "expected an array of templates, found {}", found)
            }
            Self::NotAnObject { index } => {
                write!(f, "template at index {} is not an object", index)
            }
            Self::MissingString { index, key } => {
                write!(f, "template at index {} has no string '{}'", index, key)
            }
            Self::EmptyString { index, key } => {
                write!(f, "template at index {} has an empty '{}'", index, key)
            }
        }
    }
}

impl std::error::Error for ShapeError {}

/// A single upsert that did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertFailure {
    pub template_id: String,
    pub cause: String,
}

impl fmt::Display for UpsertFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.template_id, self.cause)
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0} environment variable not set")]
    MissingConfiguration(&'static str),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("PDF Otter returned HTTP {status} for {url}: {body}")]
    ApiStatus {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    #[error("Received non template data: {0}")]
    Shape(#[from] ShapeError),

    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] mongodb::error::Error),

    #[error("Upsert of template {template_id} rejected: {reason}")]
    UpsertRejected { template_id: String, reason: String },

    #[error(
        "{} of {attempted} template upserts failed: {}",
        .failures.len(),
        join_failures(.failures)
    )]
    PartialStore {
        failures: Vec<UpsertFailure>,
        stored: usize,
        attempted: usize,
    },
}

impl AppError {
    /// Whether the run was aborted at the listing stage, before any detail fetch.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::Shape(_))
    }
}

fn join_failures(failures: &[UpsertFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
