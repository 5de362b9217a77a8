mod envelope;
mod task;

pub use envelope::{ErrorEnvelope, Failure, ValidationErrors};
pub use task::{StatusChange, Task, TaskDraft, TaskId, TaskStatus};
