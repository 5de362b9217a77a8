use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use crate::backend::BackendError;
use crate::types::ErrorEnvelope;

/// The proxy operations, each with its fixed error label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ListTasks,
    GetTask,
    CreateTask,
    UpdateTask,
    UpdateTaskStatus,
    DeleteTask,
}

impl Route {
    pub fn label(&self) -> &'static str {
        match self {
            Route::ListTasks => "Failed to fetch tasks",
            Route::GetTask => "Failed to fetch task",
            Route::CreateTask => "Failed to create task",
            Route::UpdateTask => "Failed to update task",
            Route::UpdateTaskStatus => "Failed to update task status",
            Route::DeleteTask => "Failed to delete task",
        }
    }

    fn action(&self) -> &'static str {
        match self {
            Route::ListTasks => "fetching tasks",
            Route::GetTask => "fetching task",
            Route::CreateTask => "creating task",
            Route::UpdateTask => "updating task",
            Route::UpdateTaskStatus => "updating task status",
            Route::DeleteTask => "deleting task",
        }
    }

    /// Only create and full update relay the backend's field-level detail.
    pub fn forwards_validation(&self) -> bool {
        matches!(self, Route::CreateTask | Route::UpdateTask)
    }
}

#[derive(Debug, Error)]
#[error("{}: {source}", .route.label())]
pub struct RouteError {
    pub route: Route,
    #[source]
    pub source: BackendError,
}

impl RouteError {
    pub fn new(route: Route, source: BackendError) -> Self {
        Self { route, source }
    }

    pub fn status_code(&self) -> StatusCode {
        self.source
            .status()
            .and_then(|status| StatusCode::from_u16(status).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        let transport_message = self.source.to_string();

        if self.route.forwards_validation() {
            ErrorEnvelope {
                error: self.route.label().to_string(),
                message: self
                    .source
                    .response_message()
                    .map(str::to_string)
                    .unwrap_or(transport_message),
                validation_errors: self.source.validation_errors(),
            }
        } else {
            ErrorEnvelope {
                error: self.route.label().to_string(),
                message: transport_message,
                validation_errors: None,
            }
        }
    }
}

impl From<(Route, BackendError)> for RouteError {
    fn from((route, source): (Route, BackendError)) -> Self {
        Self::new(route, source)
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(
            status = %status,
            "Error {}: {}",
            self.route.action(),
            self.source
        );
        (status, Json(self.envelope())).into_response()
    }
}
