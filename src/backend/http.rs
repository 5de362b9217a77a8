use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use super::{BackendError, TaskBackend};

/// `TaskBackend` over HTTP, rooted at the backend's `tasks` resource URL.
#[derive(Clone)]
pub struct HttpTaskBackend {
    client: Client,
    base_url: String,
}

impl HttpTaskBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: format!("Request failed with status code {}", status.as_u16()),
                body: serde_json::from_slice(&bytes).ok(),
            });
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| BackendError::Transport(format!("Invalid JSON from backend: {}", e)))
    }
}

#[async_trait]
impl TaskBackend for HttpTaskBackend {
    async fn list_tasks(&self) -> Result<Value, BackendError> {
        tracing::debug!("GET {}", self.base_url);
        self.send(self.client.get(&self.base_url)).await
    }

    async fn get_task(&self, id: &str) -> Result<Value, BackendError> {
        self.send(self.client.get(self.task_url(id))).await
    }

    async fn create_task(&self, body: Value) -> Result<Value, BackendError> {
        self.send(self.client.post(&self.base_url).json(&body)).await
    }

    async fn update_task(&self, id: &str, body: Value) -> Result<Value, BackendError> {
        self.send(self.client.put(self.task_url(id)).json(&body)).await
    }

    async fn update_task_status(&self, id: &str, body: Value) -> Result<Value, BackendError> {
        let url = format!("{}/status", self.task_url(id));
        self.send(self.client.patch(url).json(&body)).await
    }

    async fn delete_task(&self, id: &str) -> Result<(), BackendError> {
        self.send(self.client.delete(self.task_url(id))).await?;
        Ok(())
    }
}
