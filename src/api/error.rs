//! Error types for the guestbook API.

use std::error::Error;
use std::fmt;

use serde_json::{json, Map, Value};

use super::Status;

pub(crate) const NOT_FOUND_MESSAGE: &str = "Could not find a signature with that identifier";
pub(crate) const NAME_REQUIRED_MESSAGE: &str = "A string value for name is required";

/// Error type for API requests, mapped onto fail/error envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No signature has the requested identifier (or it was not numeric).
    NotFound(String),
    /// A body field is missing or has the wrong type.
    Validation { field: &'static str, message: String },
    /// The request body is not valid JSON.
    MalformedBody(String),
    /// No route for this method and path.
    UnknownRoute { method: String, path: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(id) => write!(f, "signature not found: {}", id),
            ApiError::Validation { field, message } => {
                write!(f, "invalid field {}: {}", field, message)
            }
            ApiError::MalformedBody(msg) => write!(f, "malformed body: {}", msg),
            ApiError::UnknownRoute { method, path } => {
                write!(f, "unknown route: {} {}", method, path)
            }
        }
    }
}

impl Error for ApiError {}

impl ApiError {
    pub fn name_required() -> Self {
        ApiError::Validation {
            field: "name",
            message: NAME_REQUIRED_MESSAGE.to_string(),
        }
    }

    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::Validation { .. } => 400,
            ApiError::MalformedBody(_) => 400,
            ApiError::UnknownRoute { .. } => 404,
        }
    }

    pub(crate) fn status(&self) -> Status {
        match self {
            ApiError::NotFound(_) | ApiError::Validation { .. } => Status::Fail,
            ApiError::MalformedBody(_) | ApiError::UnknownRoute { .. } => Status::Error,
        }
    }

    /// The `data` member of the envelope, keyed by the offending input.
    pub(crate) fn data(&self) -> Value {
        match self {
            ApiError::NotFound(_) => json!({ "id": NOT_FOUND_MESSAGE }),
            ApiError::Validation { field, message } => {
                let mut data = Map::new();
                data.insert(field.to_string(), Value::String(message.clone()));
                Value::Object(data)
            }
            ApiError::MalformedBody(msg) => json!({ "body": msg }),
            ApiError::UnknownRoute { method, path } => {
                json!({ "route": format!("No route for {} {}", method, path) })
            }
        }
    }
}
