use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Field name to message, as reported by the backend when it rejects a task.
pub type ValidationErrors = BTreeMap<String, String>;

/// Error body the proxy sends for every failed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<ValidationErrors>,
}

/// What went wrong with a call, decided once when the response is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Generic(String),
    Validation(ValidationErrors),
}

impl Failure {
    pub fn generic(message: impl Into<String>) -> Self {
        Failure::Generic(message.into())
    }
}

impl From<ErrorEnvelope> for Failure {
    fn from(envelope: ErrorEnvelope) -> Self {
        match envelope.validation_errors {
            Some(errors) if !errors.is_empty() => Failure::Validation(errors),
            _ => Failure::Generic(envelope.message),
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Generic(message) => f.write_str(message),
            Failure::Validation(errors) => {
                let fields: Vec<String> = errors
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect();
                write!(f, "Validation failed: {}", fields.join(", "))
            }
        }
    }
}
