use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        Self::bad_request(format!(
            "Error parsing JSON file. Please make sure it is a valid export. ({err})"
        ))
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateKeyError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Invalid(String),

    #[error("date '{0}' is not zero-padded YYYY-MM-DD")]
    NotCanonical(String),
}

/// Reasons an imported document is rejected. The store is never touched
/// when any of these is returned.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object mapping dates to statuses")]
    NotAnObject,

    #[error(transparent)]
    InvalidDateKey(#[from] DateKeyError),

    #[error("unrecognized status {value} for {date}")]
    UnrecognizedStatus { date: String, value: String },
}
