use crate::types::{Task, TaskId, TaskStatus};
use super::format::format_date_time;
use super::state::{BannerKind, TaskForm, UiState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Edit,
    MarkComplete,
    Start,
    Delete,
}

impl TaskAction {
    /// Actions offered for a task in the given status, in display order.
    pub fn available_for(status: TaskStatus) -> Vec<TaskAction> {
        let mut actions = vec![TaskAction::Edit];
        if status != TaskStatus::Completed {
            actions.push(TaskAction::MarkComplete);
        }
        if status != TaskStatus::InProgress && status != TaskStatus::Completed {
            actions.push(TaskAction::Start);
        }
        actions.push(TaskAction::Delete);
        actions
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskAction::Edit => "Edit",
            TaskAction::MarkComplete => "Mark Complete",
            TaskAction::Start => "Start",
            TaskAction::Delete => "Delete",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaskAction::Edit => "edit",
            TaskAction::MarkComplete => "complete",
            TaskAction::Start => "start",
            TaskAction::Delete => "delete",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            TaskAction::Edit => "btn-primary",
            TaskAction::Delete => "btn-danger",
            TaskAction::MarkComplete | TaskAction::Start => "btn-secondary",
        }
    }

    /// The status a status-changing action moves the task to.
    pub fn target_status(&self) -> Option<TaskStatus> {
        match self {
            TaskAction::MarkComplete => Some(TaskStatus::Completed),
            TaskAction::Start => Some(TaskStatus::InProgress),
            TaskAction::Edit | TaskAction::Delete => None,
        }
    }
}

/// One task, ready for display. Text is still raw here; escaping is the
/// renderer's job.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub status_label: String,
    pub due: String,
    pub created: String,
    pub actions: Vec<TaskAction>,
}

impl From<&Task> for TaskCard {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone().filter(|d| !d.is_empty()),
            status: task.status,
            status_label: task.status.label(),
            due: format_date_time(&task.due_date_time),
            created: format_date_time(&task.created_at),
            actions: TaskAction::available_for(task.status),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub loading: bool,
    pub cards: Vec<TaskCard>,
}

impl ListView {
    pub fn count_label(&self) -> String {
        format!("({})", self.cards.len())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub cancel_visible: bool,
    pub fields: TaskForm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BannerView {
    pub kind: BannerKind,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub banner: Option<BannerView>,
    pub form: FormView,
    pub list: ListView,
}

impl From<&UiState> for PageView {
    fn from(state: &UiState) -> Self {
        let editing = state.editing().is_some();

        Self {
            banner: state.banner().map(|banner| BannerView {
                kind: banner.kind,
                lines: banner.lines.clone(),
            }),
            form: FormView {
                heading: if editing { "Edit Task" } else { "Create New Task" },
                submit_label: state.submit_label(),
                submit_enabled: !state.is_submitting(),
                cancel_visible: editing,
                fields: state.form().clone(),
            },
            list: ListView {
                loading: state.is_loading(),
                cards: state.tasks().iter().map(TaskCard::from).collect(),
            },
        }
    }
}
