//! The task page: state, the event handlers that drive it, and the HTML it
//! renders to.

pub mod client;
pub mod controller;
pub mod format;
pub mod render;
pub mod state;
pub mod view;

pub use client::{ProxyClient, TaskApi};
pub use controller::{Confirm, Controller, DeleteOutcome, SubmitOutcome};
pub use render::{escape_html, render_page};
pub use state::{FormMode, TaskForm, UiState};
pub use view::{PageView, TaskAction};
