use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body in the FastAPI shape: `{"detail": ...}`. `detail` is a string
/// for handler errors and a list of objects for request validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub detail: serde_json::Value,
}

impl ServiceErrorBody {
    pub fn summary(&self) -> String {
        match &self.detail {
            serde_json::Value::String(text) => text.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.get("msg")
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| item.to_string())
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error)]
#[error("scoring service returned {status}: {detail}")]
pub struct ServiceException {
    pub status: u16,
    pub detail: String,
}

impl ServiceException {
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn from_body(status: u16, body: &ServiceErrorBody) -> Self {
        Self::new(status, body.summary())
    }
}
