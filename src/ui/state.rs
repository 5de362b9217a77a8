use std::time::{Duration, Instant};
use crate::types::{Task, TaskDraft, TaskId, TaskStatus};
use super::format::format_for_input;

/// How long a success banner stays up unless something replaces it.
pub const SUCCESS_BANNER_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub lines: Vec<String>,
    pub expires_at: Option<Instant>,
}

/// Current contents of the task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date_time: String,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status,
            due_date_time: format_for_input(&task.due_date_time),
        }
    }

    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            status: self.status,
            due_date_time: self.due_date_time.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(TaskId),
}

/// Everything the task page shows. The task list is only a cache of the
/// last successful fetch.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    tasks: Vec<Task>,
    editing: Option<TaskId>,
    form: TaskForm,
    submitting: bool,
    loading: bool,
    banner: Option<Banner>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn clear_tasks(&mut self) {
        self.tasks.clear();
    }

    pub fn editing(&self) -> Option<&TaskId> {
        self.editing.as_ref()
    }

    pub fn mode(&self) -> FormMode {
        match &self.editing {
            Some(id) => FormMode::Update(id.clone()),
            None => FormMode::Create,
        }
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    pub fn begin_edit(&mut self, task: &Task) {
        self.editing = Some(task.id.clone());
        self.form = TaskForm::from_task(task);
    }

    /// Back to create mode with an empty form.
    pub fn reset_form(&mut self) {
        self.editing = None;
        self.form = TaskForm::default();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Marks a submit as in flight and returns what it should do, or `None`
    /// when one is already running.
    pub fn begin_submit(&mut self) -> Option<FormMode> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(self.mode())
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Saving..."
        } else if self.editing.is_some() {
            "Update Task"
        } else {
            "Create Task"
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn show_error<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.banner = Some(Banner {
            kind: BannerKind::Error,
            lines: lines.into_iter().map(Into::into).collect(),
            expires_at: None,
        });
    }

    pub fn show_success(&mut self, message: impl Into<String>, now: Instant) {
        self.banner = Some(Banner {
            kind: BannerKind::Success,
            lines: vec![message.into()],
            expires_at: Some(now + SUCCESS_BANNER_TTL),
        });
    }

    pub fn hide_error(&mut self) {
        self.clear_banner_of(BannerKind::Error);
    }

    pub fn hide_success(&mut self) {
        self.clear_banner_of(BannerKind::Success);
    }

    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    /// Drops a success banner whose time is up.
    pub fn expire_banners(&mut self, now: Instant) {
        let expired = self
            .banner
            .as_ref()
            .and_then(|banner| banner.expires_at)
            .is_some_and(|expires_at| now >= expires_at);
        if expired {
            self.banner = None;
        }
    }

    fn clear_banner_of(&mut self, kind: BannerKind) {
        if self.banner.as_ref().is_some_and(|banner| banner.kind == kind) {
            self.banner = None;
        }
    }
}
