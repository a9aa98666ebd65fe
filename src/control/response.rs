use serde::Serialize;

use crate::core::error::Result;

/// Tagged payload handed back to a front end
///
/// Serializes as `{"status": "success", ...fields}` or
/// `{"status": "error", "error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response<T> {
    Success(T),
    Error { error: String },
}

impl<T> Response<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Response::Success(value),
            Err(err) => Response::Error {
                error: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}

impl<T> From<Result<T>> for Response<T> {
    fn from(result: Result<T>) -> Self {
        Self::from_result(result)
    }
}
