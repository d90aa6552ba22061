//! Error types for the price fetcher

use thiserror::Error;

/// Errors that can occur when fetching a quote
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be sent or no response arrived (network, DNS, timeout)
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response arrived with a non-success status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),

    /// Body is not JSON, or lacks an asset key or its numeric price
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl FetchError {
    /// Creates a MalformedPayload error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }

    /// True when the response arrived but could not be decoded
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedPayload(_))
    }

    /// Status code for HttpStatus errors
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_helpers() {
        let status = FetchError::HttpStatus(503);
        assert_eq!(status.status_code(), Some(503));
        assert!(!status.is_malformed());
        assert_eq!(status.to_string(), "HTTP error: status 503");

        let malformed = FetchError::malformed("missing field `ethereum`");
        assert!(malformed.is_malformed());
        assert_eq!(malformed.status_code(), None);
        assert_eq!(
            malformed.to_string(),
            "Malformed payload: missing field `ethereum`"
        );
    }
}
