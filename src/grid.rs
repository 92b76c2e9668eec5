//! Grouping tasks into day/week/month grids.
//!
//! Drives the day allocator across a sequence of days in calendar order,
//! threading the lane carry-over accumulator from each day into the next so
//! multi-day bars keep their lane across cells (including across week rows
//! of the month grid).

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::ViewConfig;
use crate::datetime::{first_week_of_month_start, num_weeks_for_month, start_of_day};
use crate::day::{allocate_day_tasks, CarryOver, Day, GridStyle};
use crate::error::{LayoutError, LayoutResult};
use crate::task::Task;

/// Group `tasks` into a grid of laid-out day cells starting at `start`.
///
/// Exactly one of `num_weeks`/`num_days` may be positive:
/// - `num_weeks > 0`: month mode, `num_weeks` rows of 7 days, each row's
///   viewing period being its week;
/// - `num_days > 0`: one row of `num_days` days over a single period
///   (day/week/4-day views);
/// - both zero: one empty row.
///
/// The grid holds borrowed references into `tasks`; nothing is copied or
/// mutated, and two calls with the same inputs produce the same grid.
pub fn group_by_day<'a>(
    start: DateTime<Utc>,
    tasks: &'a [Task],
    num_weeks: usize,
    num_days: usize,
    max_per_day: Option<usize>,
) -> LayoutResult<Vec<Vec<Day<'a>>>> {
    if num_weeks > 0 && num_days > 0 {
        return Err(LayoutError::ConflictingWindow { num_weeks, num_days });
    }
    if let Some(task) = tasks.iter().find(|t| t.duration < Duration::zero()) {
        return Err(LayoutError::NegativeDuration(task.id));
    }

    debug!(
        num_weeks,
        num_days,
        tasks = tasks.len(),
        "grouping tasks by day from {start}"
    );

    let mut rows = Vec::new();
    if num_weeks > 0 {
        let mut carry = CarryOver::default();
        for week in 0..num_weeks {
            let period_start = start + Duration::weeks(week as i64);
            let period_end = period_start + Duration::weeks(1);
            let mut row = Vec::with_capacity(7);
            for weekday in 0..7 {
                let day_start = period_start + Duration::days(weekday);
                let (day, next) = allocate_day_tasks(
                    tasks,
                    day_start,
                    period_start,
                    period_end,
                    &carry,
                    GridStyle::Month,
                    max_per_day,
                );
                carry = next;
                row.push(day);
            }
            rows.push(row);
        }
    } else if num_days > 0 {
        let period_start = start;
        let period_end = start + Duration::days(num_days as i64);
        let mut carry = CarryOver::default();
        let mut row = Vec::with_capacity(num_days);
        for day_index in 0..num_days {
            let day_start = start + Duration::days(day_index as i64);
            let (day, next) = allocate_day_tasks(
                tasks,
                day_start,
                period_start,
                period_end,
                &carry,
                GridStyle::Window,
                max_per_day,
            );
            carry = next;
            row.push(day);
        }
        rows.push(row);
    } else {
        rows.push(Vec::new());
    }
    Ok(rows)
}

/// Lay out the month grid containing `date`: the window runs from the week
/// row containing the 1st through the week row containing the last day of
/// the month, with the week start taken from `config`.
pub fn month_grid<'a>(
    date: DateTime<Utc>,
    tasks: &'a [Task],
    max_per_day: Option<usize>,
    config: &ViewConfig,
) -> LayoutResult<Vec<Vec<Day<'a>>>> {
    let start = first_week_of_month_start(date, config.week_starts_on);
    let num_weeks = num_weeks_for_month(date, config.week_starts_on);
    group_by_day(start, tasks, num_weeks, 0, max_per_day)
}

/// Lay out a single `num_days`-wide window (day, 4-day, or week view)
/// starting on the day containing `start`. Hourly height is continuous in
/// these views, so overflow limiting is disabled.
pub fn window_grid<'a>(
    start: DateTime<Utc>,
    tasks: &'a [Task],
    num_days: usize,
) -> LayoutResult<Vec<Vec<Day<'a>>>> {
    group_by_day(start_of_day(start), tasks, 0, num_days, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskId, TaskType};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn monday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap()
    }

    fn task(id: i64, start: DateTime<Utc>, duration: Duration, all_day: bool) -> Task {
        Task {
            id: TaskId(id),
            schedule_id: None,
            name: format!("task {id}"),
            description: None,
            start,
            duration,
            all_day,
            all_day_order: None,
            task_type: TaskType::Fixed,
        }
    }

    #[test]
    fn test_conflicting_window_is_rejected() {
        let err = group_by_day(monday(), &[], 2, 7, None).unwrap_err();
        assert_eq!(
            err,
            LayoutError::ConflictingWindow {
                num_weeks: 2,
                num_days: 7
            }
        );
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let mut bad = task(9, monday(), Duration::hours(1), false);
        bad.duration = Duration::hours(-1);
        let err = group_by_day(monday(), &[bad], 0, 7, None).unwrap_err();
        assert_eq!(err, LayoutError::NegativeDuration(TaskId(9)));
    }

    #[test]
    fn test_degenerate_window_yields_one_empty_row() {
        let grid = group_by_day(monday(), &[], 0, 0, None).unwrap();
        assert_eq!(grid.len(), 1);
        assert!(grid[0].is_empty());
    }

    #[test]
    fn test_grid_shapes() {
        let month = group_by_day(monday(), &[], 5, 0, Some(4)).unwrap();
        assert_eq!(month.len(), 5);
        assert!(month.iter().all(|row| row.len() == 7));

        let week = group_by_day(monday(), &[], 0, 4, None).unwrap();
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].len(), 4);
    }

    #[test]
    fn test_three_day_task_over_week_window() {
        // One 3-day all-day task starting Monday, grouped over a 7-day week
        // starting Monday: drawn on Monday only, continuation on Tue/Wed,
        // gone from Thursday on.
        let tasks = vec![task(1, monday(), Duration::days(3), true)];
        let grid = group_by_day(monday(), &tasks, 0, 7, None).unwrap();
        let row = &grid[0];

        assert_eq!(row[0].multi_day.len(), 1);
        let holder = &row[0].multi_day[0];
        assert_eq!(holder.lane, Some(0));
        assert!(!holder.extends_before);
        assert!(!holder.extends_after);

        for day in &row[1..] {
            assert!(day.multi_day.is_empty());
            assert!(day.all_day.is_empty());
            assert!(day.hourly.is_empty());
        }
    }

    #[test]
    fn test_carry_over_frees_lane_after_last_day() {
        // Task spans [d0, d0+3); window starts one day earlier.
        let d0 = monday();
        let tasks = vec![
            task(1, d0, Duration::days(3), true),
            // A second bar covering the whole window, pinning lane 0.
            task(2, d0 - Duration::days(1), Duration::days(5), true),
        ];
        let grid = group_by_day(d0 - Duration::days(1), &tasks, 0, 5, None).unwrap();
        let row = &grid[0];

        // Day before d0: only the long bar.
        assert_eq!(row[0].multi_day.len(), 1);
        assert_eq!(row[0].multi_day[0].task.id, TaskId(2));
        assert_eq!(row[0].multi_day[0].lane, Some(0));

        // d0: task 1 appears once, in the smallest free lane.
        assert_eq!(row[1].multi_day.len(), 1);
        assert_eq!(row[1].multi_day[0].task.id, TaskId(1));
        assert_eq!(row[1].multi_day[0].lane, Some(1));
        assert!(!row[1].multi_day[0].extends_before);

        // d0+1, d0+2: continuation, no holder.
        assert!(row[2].multi_day.is_empty());
        assert!(row[3].multi_day.is_empty());

        // d0+3: lane 1 is free again for a new task.
        let mut tasks_with_follow_up = tasks.clone();
        tasks_with_follow_up.push(task(3, d0 + Duration::days(3), Duration::days(2), true));
        let grid = group_by_day(d0 - Duration::days(1), &tasks_with_follow_up, 0, 5, None).unwrap();
        let last = &grid[0][4];
        assert_eq!(last.multi_day.len(), 1);
        assert_eq!(last.multi_day[0].task.id, TaskId(3));
        assert_eq!(last.multi_day[0].lane, Some(1));
    }

    #[test]
    fn test_carry_over_crosses_week_rows() {
        // Bar spanning Saturday of week 1 through Tuesday of week 2 keeps
        // its lane reserved into the second row; it is only drawn once.
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(); // Sunday
        let saturday = start + Duration::days(6);
        let tasks = vec![
            task(1, saturday, Duration::days(4), true),
            task(2, start + Duration::days(7), Duration::days(2), true),
        ];
        let grid = group_by_day(start, &tasks, 2, 0, None).unwrap();

        assert_eq!(grid[0][6].multi_day.len(), 1);
        assert_eq!(grid[0][6].multi_day[0].task.id, TaskId(1));
        assert_eq!(grid[0][6].multi_day[0].lane, Some(0));
        assert!(grid[0][6].multi_day[0].extends_after);

        // Week 2, Sunday: task 1 continues invisibly in lane 0, so task 2
        // lands in lane 1.
        assert_eq!(grid[1][0].multi_day.len(), 1);
        assert_eq!(grid[1][0].multi_day[0].task.id, TaskId(2));
        assert_eq!(grid[1][0].multi_day[0].lane, Some(1));
    }

    #[test]
    fn test_group_by_day_is_idempotent() {
        let tasks = vec![
            task(1, monday(), Duration::days(3), true),
            task(2, monday() + Duration::hours(9), Duration::hours(1), false),
            task(3, monday() + Duration::days(1), Duration::days(1), true),
        ];
        let first = group_by_day(monday(), &tasks, 0, 7, Some(3)).unwrap();
        let second = group_by_day(monday(), &tasks, 0, 7, Some(3)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_month_grid_window() {
        // March 2026: 1st is a Sunday, 31st a Tuesday; 5 Sunday-start rows.
        let date = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let grid = month_grid(date, &[], Some(4), &ViewConfig::default()).unwrap();
        assert_eq!(grid.len(), 5);
        assert!(grid.iter().all(|row| row.len() == 7));
    }

    #[test]
    fn test_window_grid_floors_start_to_day() {
        let mid_afternoon = monday() + Duration::hours(15);
        let tasks = vec![task(1, monday() + Duration::hours(9), Duration::hours(1), false)];
        let grid = window_grid(mid_afternoon, &tasks, 1).unwrap();
        // The 9:00 task is inside the day window even though the requested
        // start was 15:00.
        assert_eq!(grid[0][0].hourly.len(), 1);
    }
}
