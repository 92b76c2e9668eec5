//! UTC day/week/month arithmetic for the grid windows.
//!
//! All math is done in UTC, where every day is exactly 24 hours, so window
//! boundaries can be computed with plain `Duration` offsets.

use chrono::{DateTime, Datelike, Duration, Months, Utc, Weekday};

/// Midnight of the day containing `t`.
pub fn start_of_day(t: DateTime<Utc>) -> DateTime<Utc> {
    t.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc()
}

/// Midnight of the first day of the month containing `t`.
pub fn start_of_month(t: DateTime<Utc>) -> DateTime<Utc> {
    let first = t.date_naive().with_day(1).unwrap();
    first.and_hms_opt(0, 0, 0).unwrap().and_utc()
}

/// Midnight of the first day of the month after the one containing `t`,
/// i.e. the exclusive end of the month.
pub fn end_of_month(t: DateTime<Utc>) -> DateTime<Utc> {
    let first = t.date_naive().with_day(1).unwrap();
    let next = first.checked_add_months(Months::new(1)).unwrap();
    next.and_hms_opt(0, 0, 0).unwrap().and_utc()
}

/// Midnight of the most recent `week_starts_on` on or before `t`.
pub fn start_of_week(t: DateTime<Utc>, week_starts_on: Weekday) -> DateTime<Utc> {
    let day = start_of_day(t);
    day - Duration::days(i64::from(day.weekday().days_since(week_starts_on)))
}

/// Exclusive end of the week containing `t`.
pub fn end_of_week(t: DateTime<Utc>, week_starts_on: Weekday) -> DateTime<Utc> {
    start_of_week(t, week_starts_on) + Duration::weeks(1)
}

/// Start of the week row containing the 1st of `t`'s month. This is the
/// first cell of the month grid, usually a day of the previous month.
pub fn first_week_of_month_start(t: DateTime<Utc>, week_starts_on: Weekday) -> DateTime<Utc> {
    start_of_week(start_of_month(t), week_starts_on)
}

/// Exclusive end of the week row containing the last day of `t`'s month.
pub fn last_week_of_month_end(t: DateTime<Utc>, week_starts_on: Weekday) -> DateTime<Utc> {
    end_of_week(end_of_month(t) - Duration::milliseconds(1), week_starts_on)
}

/// Number of week rows the month grid for `t`'s month needs.
pub fn num_weeks_for_month(t: DateTime<Utc>, week_starts_on: Weekday) -> usize {
    let span = last_week_of_month_end(t, week_starts_on) - first_week_of_month_start(t, week_starts_on);
    ceil_div(span.num_milliseconds(), Duration::weeks(1).num_milliseconds()) as usize
}

/// Number of calendar days touched by `[start, end)`: `start` is floored to
/// its day, then the span is divided into days rounding up.
///
/// An hourly task crossing midnight therefore counts as spanning 2 days,
/// which is what makes it render as a multi-day bar.
pub fn day_count(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let span = end - start_of_day(start);
    ceil_div(span.num_milliseconds(), Duration::days(1).num_milliseconds())
}

fn ceil_div(n: i64, d: i64) -> i64 {
    (n + d - 1).div_euclid(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_start_of_day() {
        let t = Utc.with_ymd_and_hms(2026, 3, 2, 17, 45, 12).unwrap();
        assert_eq!(start_of_day(t), Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_week_honors_week_start() {
        // 2026-03-04 is a Wednesday.
        let t = Utc.with_ymd_and_hms(2026, 3, 4, 10, 0, 0).unwrap();
        assert_eq!(
            start_of_week(t, Weekday::Sun),
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            start_of_week(t, Weekday::Mon),
            Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_month_boundaries() {
        let t = Utc.with_ymd_and_hms(2026, 12, 15, 8, 0, 0).unwrap();
        assert_eq!(start_of_month(t), Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap());
        // Year rollover.
        assert_eq!(end_of_month(t), Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_num_weeks_for_month() {
        // February 2026 starts on a Sunday and has 28 days: exactly 4 rows.
        let feb = Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap();
        assert_eq!(num_weeks_for_month(feb, Weekday::Sun), 4);

        // August 2026 starts on a Saturday: 6 rows with a Sunday week start.
        let aug = Utc.with_ymd_and_hms(2026, 8, 10, 0, 0, 0).unwrap();
        assert_eq!(num_weeks_for_month(aug, Weekday::Sun), 6);
        assert_eq!(
            first_week_of_month_start(aug, Weekday::Sun),
            Utc.with_ymd_and_hms(2026, 7, 26, 0, 0, 0).unwrap()
        );
        assert_eq!(
            last_week_of_month_end(aug, Weekday::Sun),
            Utc.with_ymd_and_hms(2026, 9, 6, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_day_count_crossing_midnight() {
        // 23:00 to 01:00 the next day is 2 hours but touches 2 days.
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 23, 0, 0).unwrap();
        assert_eq!(day_count(start, start + Duration::hours(2)), 2);

        // A one-hour afternoon task touches 1 day.
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 14, 0, 0).unwrap();
        assert_eq!(day_count(start, start + Duration::hours(1)), 1);

        // Zero-duration task at midnight spans 0 days.
        let midnight = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
        assert_eq!(day_count(midnight, midnight), 0);

        // Exactly 3 days starting at midnight.
        assert_eq!(day_count(midnight, midnight + Duration::days(3)), 3);
    }
}
