//! Shared building blocks for the TUI (task lifecycle, text helpers).

pub mod task;
pub mod text;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text::truncate_with_ellipsis;
