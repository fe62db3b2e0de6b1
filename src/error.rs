use thiserror::Error;

use crate::query::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
    /// Raised by `Client::new` only: missing API key, bad URL or header value.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The API answered 404. Kept apart from `Api` so callers can tell
    /// "absent" from "broken".
    #[error("request failed with status code 404")]
    NotFound,

    #[error("request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::NotFound => Some(404),
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinct_from_api_error() {
        assert!(Error::NotFound.is_not_found());
        let api = Error::Api { status: 500, message: "boom".to_string() };
        assert!(!api.is_not_found());
        assert_eq!(api.status(), Some(500));
        assert_eq!(Error::NotFound.status(), Some(404));
    }

    #[test]
    fn api_error_display_carries_status_and_message() {
        let api = Error::Api { status: 422, message: "invalid op".to_string() };
        assert_eq!(api.to_string(), "request failed (422): invalid op");
    }

    #[test]
    fn validation_error_converts() {
        let err: Error = ValidationError::new("limit", "must not be negative").into();
        assert!(matches!(err, Error::Validation(ref v) if v.field == "limit"));
        assert_eq!(err.status(), None);
    }
}
