//! Calendar lane-layout engine.
//!
//! Given an unordered collection of tasks (possibly multi-day, all-day, or
//! overlapping) and a viewing window, this crate deterministically assigns
//! every task a display lane so a grid renderer can place rectangles
//! without overlap, draw continuation arrows at window boundaries, and
//! summarize overcrowded days with a "+N more" indicator:
//!
//! - [`grid::group_by_day`] lays out a month or N-day window of day cells;
//! - [`day::allocate_day_tasks`] classifies and lane-packs one day;
//! - [`groups::group_by_overlapping`] clusters hourly tasks into
//!   side-by-side sub-columns for week/day views.
//!
//! The engine is a pure function of its inputs: no I/O, no shared state
//! between calls, and layout is recomputed from scratch every call. Output
//! holders borrow the caller's tasks rather than copying them.

pub mod config;
pub mod datetime;
pub mod day;
pub mod error;
pub mod grid;
pub mod groups;
pub mod period;
pub mod task;

pub use config::{HourFormat, ViewConfig};
pub use day::{allocate_day_tasks, CarryOver, Category, Day, GridStyle, TaskHolder};
pub use error::{LayoutError, LayoutResult};
pub use grid::{group_by_day, month_grid, window_grid};
pub use groups::group_by_overlapping;
pub use period::{limit, snap, Period, SnapMode};
pub use task::{Task, TaskId, TaskType};
