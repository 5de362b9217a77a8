use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use crate::types::{ErrorEnvelope, Failure, StatusChange, Task, TaskDraft, TaskId, TaskStatus};

/// The proxy routes as seen from the task page.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>, Failure>;
    async fn get_task(&self, id: &TaskId) -> Result<Task, Failure>;
    /// Mutations succeed on any 2xx reply; whatever body comes back is not
    /// read, the next `list_tasks` is authoritative.
    async fn create_task(&self, draft: &TaskDraft) -> Result<(), Failure>;
    async fn update_task(&self, id: &TaskId, draft: &TaskDraft) -> Result<(), Failure>;
    async fn update_task_status(&self, id: &TaskId, status: TaskStatus) -> Result<(), Failure>;
    async fn delete_task(&self, id: &TaskId) -> Result<(), Failure>;
}

/// `TaskApi` over HTTP against a running proxy.
#[derive(Clone)]
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!("{}/api/tasks/{}", self.base_url, id)
    }

    /// Sends the request and turns any non-2xx reply into a `Failure`.
    async fn send(&self, request: RequestBuilder) -> Result<Response, Failure> {
        let response = request
            .send()
            .await
            .map_err(|e| Failure::Generic(e.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => Err(Failure::from(envelope)),
            Err(e) => {
                tracing::debug!("Unreadable error body for status {}: {}", status, e);
                Err(Failure::Generic(String::new()))
            }
        }
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, Failure> {
        response
            .json::<T>()
            .await
            .map_err(|e| Failure::Generic(e.to_string()))
    }
}

#[async_trait]
impl TaskApi for ProxyClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, Failure> {
        let response = self.send(self.client.get(self.tasks_url())).await?;
        Self::read(response).await
    }

    async fn get_task(&self, id: &TaskId) -> Result<Task, Failure> {
        let response = self.send(self.client.get(self.task_url(id))).await?;
        Self::read(response).await
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<(), Failure> {
        self.send(self.client.post(self.tasks_url()).json(draft)).await?;
        Ok(())
    }

    async fn update_task(&self, id: &TaskId, draft: &TaskDraft) -> Result<(), Failure> {
        self.send(self.client.put(self.task_url(id)).json(draft)).await?;
        Ok(())
    }

    async fn update_task_status(&self, id: &TaskId, status: TaskStatus) -> Result<(), Failure> {
        let url = format!("{}/status", self.task_url(id));
        self.send(self.client.patch(url).json(&StatusChange { status }))
            .await?;
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), Failure> {
        self.send(self.client.delete(self.task_url(id))).await?;
        Ok(())
    }
}
