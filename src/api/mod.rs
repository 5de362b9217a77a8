pub mod error;
mod routes;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;
use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use crate::backend::{HttpTaskBackend, TaskBackend};
use crate::config::ProxyConfig;
use crate::Result;

pub use error::{Route, RouteError};

/// Shared by every request. Holds no per-request or mutable data.
pub struct AppState {
    backend: Arc<dyn TaskBackend>,
    static_dir: PathBuf,
}

impl AppState {
    pub fn new(backend: Arc<dyn TaskBackend>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            static_dir: static_dir.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let index = ServeFile::new(state.static_dir.join("index.html"));
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/api/tasks", get(routes::list_tasks).post(routes::create_task))
        .route(
            "/api/tasks/:id",
            get(routes::get_task)
                .put(routes::update_task)
                .delete(routes::delete_task),
        )
        .route("/api/tasks/:id/status", patch(routes::update_task_status))
        .route("/health", get(routes::health))
        .route_service("/", index)
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn serve(config: &ProxyConfig) -> Result<()> {
    let backend = HttpTaskBackend::new(config.api_base_url.clone())?;
    let app = router(AppState::new(Arc::new(backend), config.static_dir.clone()));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Task manager proxy running on http://{}", listener.local_addr()?);
    tracing::info!("API base URL: {}", config.api_base_url);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received shutdown signal... Shutting down..."),
        Err(error) => {
            tracing::error!("Unable to listen for shutdown signal: {}", error);
            std::future::pending::<()>().await
        }
    }
}
