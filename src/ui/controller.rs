use std::time::Instant;
use tokio::sync::Mutex;
use crate::types::{Failure, Task, TaskId, TaskStatus};
use super::client::TaskApi;
use super::state::{FormMode, TaskForm, UiState};
use super::view::PageView;

pub const LOAD_FAILED: &str = "Failed to load tasks. Please ensure the backend server is running.";
pub const LOAD_TASK_FAILED: &str = "Failed to load task. Please try again.";
pub const SAVE_FAILED: &str = "Failed to save task. Please try again.";
pub const STATUS_FAILED: &str = "Failed to update task status. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete task. Please try again.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// Asks the user to confirm a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
    Rejected,
    /// Another submit was still in flight; nothing was sent.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    Failed,
}

/// Event handlers for the task page. The lock around `UiState` is never
/// held while a request is outstanding.
pub struct Controller<A> {
    api: A,
    state: Mutex<UiState>,
}

impl<A: TaskApi> Controller<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(UiState::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn snapshot(&self) -> UiState {
        self.state.lock().await.clone()
    }

    /// Builds the page as it should look right now, dropping a success
    /// banner whose time has passed.
    pub async fn view(&self) -> PageView {
        let mut state = self.state.lock().await;
        state.expire_banners(Instant::now());
        PageView::from(&*state)
    }

    pub async fn expire_banners(&self, now: Instant) {
        self.state.lock().await.expire_banners(now);
    }

    /// Replaces the cached list with a fresh fetch. On failure the list is
    /// left empty rather than stale.
    pub async fn load_tasks(&self) -> bool {
        {
            let mut state = self.state.lock().await;
            state.set_loading(true);
            state.hide_error();
        }

        let result = self.api.list_tasks().await;

        let mut state = self.state.lock().await;
        state.set_loading(false);
        match result {
            Ok(tasks) => {
                tracing::debug!("Loaded {} tasks", tasks.len());
                state.replace_tasks(tasks);
                true
            }
            Err(failure) => {
                tracing::error!("Error loading tasks: {}", failure);
                state.clear_tasks();
                state.show_error([LOAD_FAILED]);
                false
            }
        }
    }

    pub async fn edit(&self, task: &Task) {
        self.state.lock().await.begin_edit(task);
    }

    /// Enters edit mode for `id`, fetching the task when it is not cached.
    pub async fn edit_by_id(&self, id: &TaskId) -> bool {
        let cached = self.state.lock().await.find_task(id).cloned();
        let task = match cached {
            Some(task) => task,
            None => match self.api.get_task(id).await {
                Ok(task) => task,
                Err(failure) => {
                    tracing::error!("Error fetching task {}: {}", id, failure);
                    self.state.lock().await.show_error([LOAD_TASK_FAILED]);
                    return false;
                }
            },
        };

        self.edit(&task).await;
        true
    }

    pub async fn update_form<F>(&self, update: F)
    where
        F: FnOnce(&mut TaskForm),
    {
        update(self.state.lock().await.form_mut());
    }

    pub async fn cancel(&self) {
        let mut state = self.state.lock().await;
        state.reset_form();
        state.clear_banner();
    }

    /// Creates or updates from the current form, depending on edit mode.
    pub async fn submit(&self) -> SubmitOutcome {
        let (mode, draft) = {
            let mut state = self.state.lock().await;
            let Some(mode) = state.begin_submit() else {
                tracing::debug!("Submit ignored, another one is in flight");
                return SubmitOutcome::Ignored;
            };
            state.clear_banner();
            (mode, state.form().to_draft())
        };

        let result = match &mode {
            FormMode::Create => self
                .api
                .create_task(&draft)
                .await
                .map(|()| (SubmitOutcome::Created, "Task created successfully!")),
            FormMode::Update(id) => self
                .api
                .update_task(id, &draft)
                .await
                .map(|()| (SubmitOutcome::Updated, "Task updated successfully!")),
        };

        let outcome = match result {
            Ok((outcome, message)) => {
                {
                    let mut state = self.state.lock().await;
                    state.reset_form();
                    state.show_success(message, Instant::now());
                }
                self.load_tasks().await;
                outcome
            }
            Err(failure) => {
                tracing::error!("Error saving task: {}", failure);
                self.state.lock().await.show_error(save_failure_lines(failure));
                SubmitOutcome::Rejected
            }
        };

        self.state.lock().await.finish_submit();
        outcome
    }

    /// Status-only transition. Field-level detail is never shown here.
    pub async fn change_status(&self, id: &TaskId, status: TaskStatus) -> bool {
        self.state.lock().await.hide_error();

        match self.api.update_task_status(id, status).await {
            Ok(()) => {
                self.state
                    .lock()
                    .await
                    .show_success("Task status updated successfully!", Instant::now());
                self.load_tasks().await;
                true
            }
            Err(failure) => {
                tracing::error!("Error updating status: {}", failure);
                self.state.lock().await.show_error([STATUS_FAILED]);
                false
            }
        }
    }

    pub async fn delete(&self, id: &TaskId, confirm: &dyn Confirm) -> DeleteOutcome {
        if !confirm.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        self.state.lock().await.hide_error();

        match self.api.delete_task(id).await {
            Ok(()) => {
                {
                    let mut state = self.state.lock().await;
                    if state.editing() == Some(id) {
                        state.reset_form();
                    }
                    state.show_success("Task deleted successfully!", Instant::now());
                }
                self.load_tasks().await;
                DeleteOutcome::Deleted
            }
            Err(failure) => {
                tracing::error!("Error deleting task: {}", failure);
                self.state.lock().await.show_error([DELETE_FAILED]);
                DeleteOutcome::Failed
            }
        }
    }
}

/// Banner lines for a rejected create or update.
pub fn save_failure_lines(failure: Failure) -> Vec<String> {
    match failure {
        Failure::Validation(errors) => std::iter::once("Validation failed:".to_string())
            .chain(
                errors
                    .into_iter()
                    .map(|(field, message)| format!("{}: {}", field, message)),
            )
            .collect(),
        Failure::Generic(message) if message.trim().is_empty() => vec![SAVE_FAILED.to_string()],
        Failure::Generic(message) => vec![message],
    }
}
