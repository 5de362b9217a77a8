//! Page controller, proxy and a stand-in backend wired together over real
//! sockets.

use std::sync::{Arc, Mutex};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde_json::{json, Value};
use crate::backend::HttpTaskBackend;
use crate::types::{Failure, TaskId, TaskStatus};
use crate::ui::{Controller, DeleteOutcome, FormMode, ProxyClient, SubmitOutcome, TaskApi};
use super::{router, AppState};

#[derive(Default)]
struct Store {
    next_id: i64,
    tasks: Vec<Value>,
}

type SharedStore = Arc<Mutex<Store>>;

fn validate(body: &Value) -> Option<Value> {
    let mut errors = serde_json::Map::new();
    if body["title"].as_str().unwrap_or_default().trim().is_empty() {
        errors.insert("title".to_string(), json!("Title is required"));
    }
    if body["dueDateTime"].as_str().unwrap_or_default().is_empty() {
        errors.insert("dueDateTime".to_string(), json!("Due date and time is required"));
    }
    if errors.is_empty() {
        None
    } else {
        Some(json!({"message": "Validation failed", "validationErrors": errors}))
    }
}

fn not_found(id: i64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": format!("Task not found with id: {}", id)})),
    )
}

async fn list(State(store): State<SharedStore>) -> Json<Value> {
    Json(Value::Array(store.lock().unwrap().tasks.clone()))
}

async fn create(
    State(store): State<SharedStore>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some(errors) = validate(&body) {
        return (StatusCode::BAD_REQUEST, Json(errors));
    }
    let mut store = store.lock().unwrap();
    store.next_id += 1;
    body["id"] = json!(store.next_id);
    body["createdAt"] = json!("2026-01-01T09:00:00");
    store.tasks.push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn update(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some(errors) = validate(&body) {
        return (StatusCode::BAD_REQUEST, Json(errors));
    }
    let mut store = store.lock().unwrap();
    let Some(task) = store.tasks.iter_mut().find(|task| task["id"] == id) else {
        return not_found(id);
    };
    for field in ["title", "description", "status", "dueDateTime"] {
        task[field] = body[field].clone();
    }
    (StatusCode::OK, Json(task.clone()))
}

async fn update_status(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut store = store.lock().unwrap();
    let Some(task) = store.tasks.iter_mut().find(|task| task["id"] == id) else {
        return not_found(id);
    };
    task["status"] = body["status"].clone();
    (StatusCode::OK, Json(task.clone()))
}

async fn delete(State(store): State<SharedStore>, Path(id): Path<i64>) -> StatusCode {
    let mut store = store.lock().unwrap();
    let before = store.tasks.len();
    store.tasks.retain(|task| task["id"] != id);
    if store.tasks.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Starts the stand-in backend and a proxy in front of it, returning the
/// proxy's base URL.
async fn spawn_stack(static_dir: &std::path::Path) -> String {
    let backend_app = Router::new()
        .route("/api/tasks", get(list).post(create))
        .route("/api/tasks/:id", axum::routing::put(update).delete(delete))
        .route("/api/tasks/:id/status", patch(update_status))
        .with_state(SharedStore::default());
    let backend_url = format!("{}/api/tasks", spawn(backend_app).await);

    let backend = HttpTaskBackend::new(backend_url).unwrap();
    spawn(router(AppState::new(Arc::new(backend), static_dir))).await
}

fn static_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("index.html"),
        "<!DOCTYPE html><title>Task Manager</title>",
    )
    .unwrap();
    std::fs::write(dir.path().join("styles.css"), "body { margin: 0; }").unwrap();
    dir
}

#[tokio::test]
async fn test_create_list_and_delete_through_proxy() {
    let dir = static_dir();
    let proxy_url = spawn_stack(dir.path()).await;
    let controller = Controller::new(ProxyClient::new(proxy_url).unwrap());

    assert!(controller.load_tasks().await);
    assert!(controller.snapshot().await.tasks().is_empty());

    controller
        .update_form(|form| {
            form.title = "Serve papers".to_string();
            form.due_date_time = "2026-03-01T09:00".to_string();
        })
        .await;
    assert_eq!(controller.submit().await, SubmitOutcome::Created);

    let state = controller.snapshot().await;
    assert_eq!(state.tasks().len(), 1);
    let created = state.tasks()[0].clone();
    assert_eq!(created.title, "Serve papers");
    assert_eq!(created.status, TaskStatus::Todo);
    assert_eq!(created.id, TaskId::Number(1));

    assert!(controller.change_status(&created.id, TaskStatus::InProgress).await);
    assert_eq!(controller.snapshot().await.tasks()[0].status, TaskStatus::InProgress);

    let accept = |_: &str| true;
    assert_eq!(controller.delete(&created.id, &accept).await, DeleteOutcome::Deleted);
    assert!(controller.snapshot().await.tasks().is_empty());
    assert!(controller.api().list_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_and_update_through_proxy() {
    let dir = static_dir();
    let proxy_url = spawn_stack(dir.path()).await;
    let controller = Controller::new(ProxyClient::new(proxy_url).unwrap());

    controller
        .update_form(|form| {
            form.title = "Draft skeleton".to_string();
            form.due_date_time = "2026-03-01T09:00".to_string();
        })
        .await;
    controller.submit().await;

    assert!(controller.edit_by_id(&TaskId::Number(1)).await);
    assert_eq!(controller.snapshot().await.mode(), FormMode::Update(TaskId::Number(1)));
    controller
        .update_form(|form| form.title = "Draft skeleton argument".to_string())
        .await;
    assert_eq!(controller.submit().await, SubmitOutcome::Updated);

    let state = controller.snapshot().await;
    assert_eq!(state.mode(), FormMode::Create);
    assert_eq!(state.tasks()[0].title, "Draft skeleton argument");
}

#[tokio::test]
async fn test_validation_errors_reach_the_page() {
    let dir = static_dir();
    let proxy_url = spawn_stack(dir.path()).await;
    let client = ProxyClient::new(proxy_url).unwrap();

    let draft = crate::types::TaskDraft {
        title: String::new(),
        description: None,
        status: TaskStatus::Todo,
        due_date_time: "2026-03-01T09:00".to_string(),
    };
    match client.create_task(&draft).await {
        Err(Failure::Validation(errors)) => {
            assert_eq!(errors.get("title").map(String::as_str), Some("Title is required"));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }

    let controller = Controller::new(client);
    assert_eq!(controller.submit().await, SubmitOutcome::Rejected);
    let lines = controller.snapshot().await.banner().unwrap().lines.clone();
    assert_eq!(
        lines,
        vec![
            "Validation failed:".to_string(),
            "dueDateTime: Due date and time is required".to_string(),
            "title: Title is required".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_status_change_on_missing_task_is_generic() {
    let dir = static_dir();
    let proxy_url = spawn_stack(dir.path()).await;
    let client = ProxyClient::new(proxy_url).unwrap();

    let failure = client
        .update_task_status(&TaskId::Number(7), TaskStatus::Completed)
        .await
        .unwrap_err();
    assert_eq!(failure, Failure::generic("Request failed with status code 404"));
}

#[tokio::test]
async fn test_static_files_served_from_root() {
    let dir = static_dir();
    let proxy_url = spawn_stack(dir.path()).await;

    let index = reqwest::get(format!("{}/", proxy_url)).await.unwrap();
    assert_eq!(index.status(), reqwest::StatusCode::OK);
    assert!(index.text().await.unwrap().contains("<title>Task Manager</title>"));

    let css = reqwest::get(format!("{}/styles.css", proxy_url)).await.unwrap();
    assert_eq!(css.status(), reqwest::StatusCode::OK);

    let health: Value = reqwest::get(format!("{}/health", proxy_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");
}

#[tokio::test]
async fn test_unreachable_backend_shows_load_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}/api/tasks", listener.local_addr().unwrap());
    drop(listener);

    let dir = static_dir();
    let backend = HttpTaskBackend::new(dead).unwrap();
    let proxy_url = spawn(router(AppState::new(Arc::new(backend), dir.path()))).await;
    let controller = Controller::new(ProxyClient::new(proxy_url).unwrap());

    assert!(!controller.load_tasks().await);
    let state = controller.snapshot().await;
    assert!(state.tasks().is_empty());
    assert_eq!(
        state.banner().unwrap().lines,
        vec![crate::ui::controller::LOAD_FAILED.to_string()]
    );
}

#[tokio::test]
async fn test_mutations_succeed_on_any_2xx_body() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let lists = Arc::new(AtomicUsize::new(0));
    let counter = lists.clone();
    let backend_app = Router::new()
        .route(
            "/api/tasks",
            get(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async {
                    Json(json!([{
                        "id": 1,
                        "title": "Lodge appeal",
                        "status": "TODO",
                        "dueDateTime": "2026-03-01T09:00:00"
                    }]))
                }
            })
            .post(|| async { StatusCode::CREATED }),
        )
        .route(
            "/api/tasks/:id",
            axum::routing::put(|| async { Json(json!({"updated": true})) }),
        )
        .route("/api/tasks/:id/status", patch(|| async { StatusCode::NO_CONTENT }));
    let backend_url = format!("{}/api/tasks", spawn(backend_app).await);

    let dir = static_dir();
    let backend = HttpTaskBackend::new(backend_url).unwrap();
    let proxy_url = spawn(router(AppState::new(Arc::new(backend), dir.path()))).await;
    let controller = Controller::new(ProxyClient::new(proxy_url).unwrap());
    controller.load_tasks().await;

    assert!(controller.change_status(&TaskId::Number(1), TaskStatus::Completed).await);
    let state = controller.snapshot().await;
    assert_eq!(
        state.banner().unwrap().lines,
        vec!["Task status updated successfully!".to_string()]
    );
    assert_eq!(lists.load(Ordering::SeqCst), 2);

    assert!(controller.edit_by_id(&TaskId::Number(1)).await);
    controller.update_form(|form| form.title = "Lodge appeal today".to_string()).await;
    assert_eq!(controller.submit().await, SubmitOutcome::Updated);
    let state = controller.snapshot().await;
    assert_eq!(state.mode(), FormMode::Create);
    assert_eq!(
        state.banner().unwrap().lines,
        vec!["Task updated successfully!".to_string()]
    );
    assert_eq!(lists.load(Ordering::SeqCst), 3);

    controller
        .update_form(|form| {
            form.title = "Book counsel".to_string();
            form.due_date_time = "2026-03-02T09:00".to_string();
        })
        .await;
    assert_eq!(controller.submit().await, SubmitOutcome::Created);
    assert_eq!(lists.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_bundled_page_points_to_task_cli() {
    let public = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("public");
    let backend = HttpTaskBackend::new("http://127.0.0.1:9/api/tasks").unwrap();
    let proxy_url = spawn(router(AppState::new(Arc::new(backend), public))).await;

    let page = reqwest::get(format!("{}/", proxy_url))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("id=\"task-form\""));
    assert!(page.contains("id=\"cancel-btn\""));
    assert!(page.contains("task_cli"));
    assert!(page.contains("onsubmit=\"return false;\""));
}
