// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use crate::constants::DEFAULT_DETAIL_BATCH_SIZE;
use std::fmt;
use std::num::NonZeroUsize;
use url::Url;

/// API key for PDF Otter authentication.
///
/// Never printed in full: both `Display` and `Debug` redact it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.trim().is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        // Basic auth puts the key before a ':' separator.
        if key.contains(':') {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot contain ':'".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(4).collect();
        write!(f, "{}...", visible)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// Base URL of the PDF Otter API, stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint(String);

impl ApiEndpoint {
    /// Parses and validates an absolute HTTP(S) base URL.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let parsed = Url::parse(input).map_err(|e| ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: "Only HTTP and HTTPS URLs are supported".to_string(),
            });
        }

        Ok(Self(input.trim_end_matches('/').to_string()))
    }

    /// Joins a relative path onto the endpoint.
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of template details fetched concurrently per batch. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(NonZeroUsize);

impl BatchSize {
    pub fn new(size: usize) -> Result<Self, ValidationError> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or(ValidationError::OutOfBounds {
                value: size,
                min: 1,
            })
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Number of batches needed to cover `items` references.
    pub fn batch_count(self, items: usize) -> usize {
        items.div_ceil(self.get())
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_DETAIL_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
