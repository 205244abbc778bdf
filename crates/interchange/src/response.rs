//! The bad-request body returned when a pipeline fails.

use optval_core::{ValueError, ValueResult};
use serde::Serialize;

/// HTTP 400 payload: the error's kind and its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadRequest {
    pub status: u16,
    pub kind: String,
    pub message: String,
}

impl BadRequest {
    pub const STATUS: u16 = 400;

    pub fn from_error(err: &ValueError) -> BadRequest {
        BadRequest {
            status: Self::STATUS,
            kind: err.kind().as_str().to_string(),
            message: err.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": self.status,
            "kind": self.kind,
            "message": self.message,
        })
    }
}

impl From<&ValueError> for BadRequest {
    fn from(err: &ValueError) -> Self {
        BadRequest::from_error(err)
    }
}

/// The bad-request body for a failed result, `None` on success.
pub fn bad_request<T>(result: &ValueResult<T>) -> Option<BadRequest> {
    result.as_ref().err().map(BadRequest::from_error)
}
