//! Single-day task classification and lane allocation.
//!
//! A day's tasks fall into three display categories: multi-day bars drawn
//! across several day cells, single-day all-day rows, and hourly blocks.
//! Each holder gets a lane so the renderer can stack rectangles without
//! overlap; multi-day bars additionally reserve their lane on every day
//! they cover, threaded between days by the [`CarryOver`] accumulator.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::trace;

use crate::datetime::{day_count, start_of_day};
use crate::period::Period;
use crate::task::{Task, TaskId};

/// Display category of a task on a particular day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Spans more than one calendar day, all-day or not.
    MultiDay,
    /// Flagged all-day and contained in a single day.
    AllDay,
    /// A regular timed task within one day.
    Hourly,
}

/// Which grid the day is being laid out for. Month cells pack lanes densely
/// by reusing freed indices; week/day columns stack single-day items
/// top-to-bottom instead and leave hourly lanes to the overlap grouper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStyle {
    Month,
    Window,
}

/// How a category acquires its lane under a given grid style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LanePolicy {
    /// Smallest lane index not currently occupied.
    Packed,
    /// One past the highest lane handed out so far; never reuses freed lanes.
    Stacked,
    /// No lane; sub-columns are resolved later by overlap grouping.
    Unlaned,
}

impl Category {
    fn lane_policy(self, style: GridStyle) -> LanePolicy {
        match (self, style) {
            (Category::MultiDay, _) => LanePolicy::Packed,
            (Category::AllDay, GridStyle::Month) => LanePolicy::Packed,
            (Category::AllDay, GridStyle::Window) => LanePolicy::Stacked,
            (Category::Hourly, GridStyle::Month) => LanePolicy::Packed,
            (Category::Hourly, GridStyle::Window) => LanePolicy::Unlaned,
        }
    }
}

/// Rendering intent for one task on one day. Borrows the caller's task and
/// lives only until the caller has drawn it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskHolder<'a> {
    pub task: &'a Task,
    pub category: Category,
    /// Display slot; `None` for window-style hourly tasks, whose columns
    /// come from overlap grouping instead.
    pub lane: Option<usize>,
    /// Task starts before the viewing period; render a left arrow.
    pub extends_before: bool,
    /// Task ends after the viewing period; render a right arrow.
    pub extends_after: bool,
    /// Hidden behind the "+N more" indicator.
    pub overflown: bool,
}

impl<'a> TaskHolder<'a> {
    fn new(task: &'a Task, category: Category) -> Self {
        TaskHolder {
            task,
            category,
            lane: None,
            extends_before: false,
            extends_after: false,
            overflown: false,
        }
    }
}

/// One laid-out day cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Day<'a> {
    pub multi_day: Vec<TaskHolder<'a>>,
    pub all_day: Vec<TaskHolder<'a>>,
    pub hourly: Vec<TaskHolder<'a>>,
    /// Count behind the "+N more" indicator; 0 when the indicator is hidden.
    pub overflow_count: usize,
}

/// Lane state flowing from one day to the next.
///
/// This is the only state the period grouper threads through its fold over
/// days; a fresh default value starts every grid.
#[derive(Debug, Clone, Default)]
pub struct CarryOver {
    /// Lanes still reserved by multi-day tasks in progress at the day
    /// boundary, keyed by task identity.
    reserved: HashMap<TaskId, usize>,
    /// Highest lane occupied on the previous day, reserved or not. Feeds
    /// the carried-overflow test so a hidden continuing task is never
    /// silently dropped.
    prev_max_lane: Option<usize>,
}

impl CarryOver {
    /// Lane currently reserved for `id`, if it is being carried over.
    pub fn reserved_lane(&self, id: TaskId) -> Option<usize> {
        self.reserved.get(&id).copied()
    }
}

/// Per-day lane occupancy, keyed by task identity.
struct LaneBoard {
    occupied: HashMap<TaskId, usize>,
}

impl LaneBoard {
    fn assign(&mut self, policy: LanePolicy, id: TaskId) -> Option<usize> {
        let lane = match policy {
            LanePolicy::Packed => self.smallest_unused(),
            LanePolicy::Stacked => self.max_lane().map_or(0, |max| max + 1),
            LanePolicy::Unlaned => return None,
        };
        self.occupied.insert(id, lane);
        Some(lane)
    }

    fn smallest_unused(&self) -> usize {
        let used: HashSet<usize> = self.occupied.values().copied().collect();
        (0..).find(|lane| !used.contains(lane)).unwrap_or(0)
    }

    fn max_lane(&self) -> Option<usize> {
        self.occupied.values().copied().max()
    }

    fn contains(&self, id: TaskId) -> bool {
        self.occupied.contains_key(&id)
    }
}

/// Classify and lay out every task touching the 24-hour window starting at
/// `day_start`.
///
/// `period_start`/`period_end` bound the larger viewing period (week row or
/// day window); tasks reaching past them get continuation flags. `carry` is
/// the previous day's output accumulator (default for the first day); the
/// returned `CarryOver` must be fed to the next day in calendar order.
///
/// Tasks not overlapping the day are ignored. `max_per_day: None` disables
/// overflow handling entirely.
pub fn allocate_day_tasks<'a>(
    tasks: &'a [Task],
    day_start: DateTime<Utc>,
    period_start: DateTime<Utc>,
    period_end: DateTime<Utc>,
    carry: &CarryOver,
    style: GridStyle,
    max_per_day: Option<usize>,
) -> (Day<'a>, CarryOver) {
    let mut day = Day::default();
    let day_period = Period::day(day_start);

    for task in tasks {
        if !day_period.overlaps(&task.period()) {
            continue;
        }
        let category = if day_count(task.start, task.end()) > 1 {
            Category::MultiDay
        } else if task.all_day {
            Category::AllDay
        } else {
            Category::Hourly
        };
        let holder = TaskHolder::new(task, category);
        match category {
            Category::MultiDay => day.multi_day.push(holder),
            Category::AllDay => day.all_day.push(holder),
            Category::Hourly => day.hourly.push(holder),
        }
    }

    let mut board = LaneBoard {
        occupied: carry.reserved.clone(),
    };
    let mut reserved = carry.reserved.clone();

    fix_multi_day(&mut day, day_start, period_start, period_end, &mut board, &mut reserved);
    fix_all_day(&mut day, style, &mut board);
    fix_hourly(&mut day, style, &mut board);
    fix_overflow(&mut day, max_per_day, &board, carry);

    trace!(
        multi_day = day.multi_day.len(),
        all_day = day.all_day.len(),
        hourly = day.hourly.len(),
        carried = reserved.len(),
        "allocated day at {day_start}"
    );

    let next = CarryOver {
        reserved,
        prev_max_lane: board.max_lane(),
    };
    (day, next)
}

/// Multi-day tasks are drawn once, on their first visible day, and keep
/// their lane reserved on every later day they cover so nothing else is
/// packed underneath the bar.
fn fix_multi_day<'a>(
    day: &mut Day<'a>,
    day_start: DateTime<Utc>,
    period_start: DateTime<Utc>,
    period_end: DateTime<Utc>,
    board: &mut LaneBoard,
    reserved: &mut HashMap<TaskId, usize>,
) {
    // Allocate in descending end order so the bars reaching furthest into
    // the future sit in the lowest lanes.
    day.multi_day.sort_by_key(|holder| Reverse(holder.task.end()));

    let mut emitted = Vec::with_capacity(day.multi_day.len());
    for mut holder in day.multi_day.drain(..) {
        let task = holder.task;
        // Last day covered by the task ends within this day cell.
        let ends_today = start_of_day(task.end() - Duration::milliseconds(1)) == day_start;

        if board.contains(task.id) {
            // Continuation of a bar drawn on an earlier day: no new holder.
            if ends_today {
                reserved.remove(&task.id);
            }
        } else {
            holder.extends_before = task.start < period_start;
            holder.extends_after = task.end() > period_end;
            holder.lane = board.assign(LanePolicy::Packed, task.id);
            if !ends_today {
                if let Some(lane) = holder.lane {
                    reserved.insert(task.id, lane);
                }
            }
            emitted.push(holder);
        }
    }

    // Stable left-to-right rendering order.
    emitted.sort_by_key(|holder| holder.lane);
    day.multi_day = emitted;
}

fn fix_all_day(day: &mut Day<'_>, style: GridStyle, board: &mut LaneBoard) {
    // allDayOrder is the user's manual ordering, not chronological order.
    day.all_day.sort_by_key(|holder| holder.task.all_day_order);
    for holder in &mut day.all_day {
        holder.lane = board.assign(Category::AllDay.lane_policy(style), holder.task.id);
    }
}

fn fix_hourly(day: &mut Day<'_>, style: GridStyle, board: &mut LaneBoard) {
    for holder in &mut day.hourly {
        holder.lane = board.assign(Category::Hourly.lane_policy(style), holder.task.id);
    }
}

/// Decide whether the "+N more" indicator is shown and flag the holders it
/// hides.
///
/// A local overflow of exactly 1 is absorbed by rendering the task in the
/// row the indicator would have taken. Overflow inherited from the previous
/// day must always surface, because the continuing task has no holder today
/// that could be seen instead.
fn fix_overflow(day: &mut Day<'_>, max_per_day: Option<usize>, board: &LaneBoard, carry: &CarryOver) {
    let Some(max_per_day) = max_per_day else {
        return;
    };

    let max_lane = board.max_lane().unwrap_or(0);
    let overflow = (max_lane + 1).saturating_sub(max_per_day);
    let overflow_carried = carry
        .prev_max_lane
        .map_or(0, |max| (max + 1).saturating_sub(max_per_day));

    if overflow >= 2 || overflow_carried >= 1 {
        for holder in day
            .multi_day
            .iter_mut()
            .chain(day.all_day.iter_mut())
            .chain(day.hourly.iter_mut())
        {
            if holder.lane.is_some_and(|lane| lane + 1 > max_per_day) {
                holder.overflown = true;
            }
        }
        day.overflow_count = overflow;
    }
}
