mod http;

pub use http::HttpTaskBackend;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use crate::types::ValidationErrors;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend could not be reached or its reply could not be read.
    #[error("{0}")]
    Transport(String),
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        body: Option<Value>,
    },
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            BackendError::Transport(_) => None,
        }
    }

    /// The `message` field of the backend's error body, if it sent one.
    pub fn response_message(&self) -> Option<&str> {
        match self {
            BackendError::Status { body: Some(body), .. } => body.get("message")?.as_str(),
            _ => None,
        }
    }

    /// The `validationErrors` map of the backend's error body, if it sent one.
    /// Non-string messages are kept in their JSON text form.
    pub fn validation_errors(&self) -> Option<ValidationErrors> {
        let BackendError::Status { body: Some(body), .. } = self else {
            return None;
        };
        let errors = body.get("validationErrors")?.as_object()?;

        Some(
            errors
                .iter()
                .map(|(field, message)| {
                    let message = match message {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    };
                    (field.clone(), message)
                })
                .collect(),
        )
    }
}

/// The external task API. Bodies are passed through untouched; the proxy
/// does no validation of its own.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    async fn list_tasks(&self) -> Result<Value, BackendError>;
    async fn get_task(&self, id: &str) -> Result<Value, BackendError>;
    async fn create_task(&self, body: Value) -> Result<Value, BackendError>;
    async fn update_task(&self, id: &str, body: Value) -> Result<Value, BackendError>;
    async fn update_task_status(&self, id: &str, body: Value) -> Result<Value, BackendError>;
    async fn delete_task(&self, id: &str) -> Result<(), BackendError>;
}
