//! The task record as delivered by the schedule REST endpoint.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::period::Period;

/// Identity of a task, assigned server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How a task's start time is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    /// An appointment whose start time the user set explicitly.
    Fixed,
    /// A task whose start time is assigned and re-assigned by the scheduler.
    Floating,
}

/// A scheduled item: a start instant plus a non-negative duration,
/// optionally flagged all-day.
///
/// Tasks are owned by the caller; the engine only reads them and hands out
/// borrowed references in its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub schedule_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Start instant, millisecond epoch timestamp on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start: DateTime<Utc>,
    /// Length of the task, integer milliseconds on the wire. Never negative.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    #[serde(default)]
    pub all_day: bool,
    /// Manual ordering key for all-day tasks, distinct from chronological order.
    #[serde(default)]
    pub all_day_order: Option<i64>,
    pub task_type: TaskType,
}

impl Task {
    /// The half-open interval `[start, start + duration)` covered by this task.
    pub fn period(&self) -> Period {
        Period::new(self.start, self.end())
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.start + self.duration
    }

    /// True if the two tasks' periods intersect.
    pub fn overlaps(&self, other: &Task) -> bool {
        self.period().overlaps(&other.period())
    }
}

/// Serialize a `chrono::Duration` as integer milliseconds.
mod duration_millis {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.num_milliseconds().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::milliseconds(i64::deserialize(deserializer)?))
    }
}
