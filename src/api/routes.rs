use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use super::error::{Route, RouteError};
use super::AppState;

pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, RouteError> {
    let tasks = state
        .backend
        .list_tasks()
        .await
        .map_err(|e| RouteError::new(Route::ListTasks, e))?;

    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, RouteError> {
    let task = state
        .backend
        .get_task(&id)
        .await
        .map_err(|e| RouteError::new(Route::GetTask, e))?;

    Ok(Json(task))
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), RouteError> {
    let task = state
        .backend
        .create_task(body)
        .await
        .map_err(|e| RouteError::new(Route::CreateTask, e))?;

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, RouteError> {
    let task = state
        .backend
        .update_task(&id, body)
        .await
        .map_err(|e| RouteError::new(Route::UpdateTask, e))?;

    Ok(Json(task))
}

pub async fn update_task_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, RouteError> {
    let task = state
        .backend
        .update_task_status(&id, body)
        .await
        .map_err(|e| RouteError::new(Route::UpdateTaskStatus, e))?;

    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, RouteError> {
    state
        .backend
        .delete_task(&id)
        .await
        .map_err(|e| RouteError::new(Route::DeleteTask, e))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
