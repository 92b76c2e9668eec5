//! Half-open time intervals and the numeric helpers the layout passes use.

use chrono::{DateTime, Duration, Utc};

/// A half-open time interval `[start, end)`.
///
/// Used uniformly for tasks and for viewing windows (day, week, month).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Period { start, end }
    }

    /// Build the period covering the 24 hours starting at `day_start`.
    pub fn day(day_start: DateTime<Utc>) -> Self {
        Period::new(day_start, day_start + Duration::days(1))
    }

    /// True if the two periods intersect.
    ///
    /// A period that merely abuts another (shares only an endpoint) does
    /// not overlap it, unless one period lies entirely within the other's
    /// closed span. This keeps back-to-back tasks out of each other's
    /// columns while a zero-length period sitting on a boundary still
    /// registers against the period containing it.
    pub fn overlaps(&self, other: &Period) -> bool {
        (is_between(other.start, self.start, self.end, true)
            && is_between(other.end, self.start, self.end, true))
            || is_between(other.start, self.start, self.end, false)
            || is_between(other.end, self.start, self.end, false)
            || (is_between(self.start, other.start, other.end, true)
                && is_between(self.end, other.start, other.end, true))
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// True if `value` lies within `[lo, hi]` (inclusive) or `(lo, hi)` (exclusive).
fn is_between<T: PartialOrd>(value: T, lo: T, hi: T, inclusive: bool) -> bool {
    if inclusive {
        value >= lo && value <= hi
    } else {
        value > lo && value < hi
    }
}

/// Clamp `value` into `[min, max]`; a `None` bound is unbounded on that side.
pub fn limit<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> T {
    if let Some(min) = min {
        if value < min {
            return min;
        }
    }
    if let Some(max) = max {
        if value > max {
            return max;
        }
    }
    value
}

/// Rounding direction for [`snap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapMode {
    #[default]
    Round,
    Ceil,
    Floor,
}

/// Snap `value` to a multiple of `factor`.
///
/// Used by drag/resize handlers to quantize pixel offsets to time slots.
pub fn snap(value: f64, factor: f64, mode: SnapMode) -> f64 {
    match mode {
        SnapMode::Round => (value / factor).round() * factor,
        SnapMode::Ceil => (value / factor).ceil() * factor,
        SnapMode::Floor => (value / factor).floor() * factor,
    }
}
