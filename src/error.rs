//! Error types for the layout engine.

use thiserror::Error;

use crate::task::TaskId;

/// Errors that can occur while laying out a calendar grid.
///
/// All of these are caller contract violations. Degenerate data (an empty
/// task list, a zero-duration task, a day with no tasks) is not an error
/// and produces empty output instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("exactly one of num_weeks/num_days may be positive (got num_weeks={num_weeks}, num_days={num_days})")]
    ConflictingWindow { num_weeks: usize, num_days: usize },

    #[error("task {0} has a negative duration")]
    NegativeDuration(TaskId),
}

/// Result type alias for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
