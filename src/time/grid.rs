//! Evenly spaced UTC sampling instants.

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

/// Finest supported sampling interval in minutes.
pub const MIN_INTERVAL_MINUTES: u32 = 1;

/// Coarsest supported sampling interval in minutes.
pub const MAX_INTERVAL_MINUTES: u32 = 60;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Error type for an invalid sampling request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Start after end
    #[error("start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Interval outside [1, 60] minutes
    #[error("interval of {0} minutes is outside 1..=60")]
    InvalidInterval(u32),
}

/// Check a sampling interval.
pub fn validate_interval(interval_minutes: u32) -> Result<(), RequestError> {
    if (MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES).contains(&interval_minutes) {
        Ok(())
    } else {
        Err(RequestError::InvalidInterval(interval_minutes))
    }
}

/// Instants `start, start + Δ, start + 2Δ, …` not exceeding `end`.
///
/// The grid is a value: iterate it as often as needed, each pass yields the
/// same instants. When `end - start` is not a multiple of the interval the
/// grid stops at the last instant before `end`.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tide_rs::time::TimeGrid;
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap();
/// let grid = TimeGrid::new(start, end, 25).unwrap();
///
/// // 00:00, 00:25, 00:50
/// assert_eq!(grid.len(), 3);
/// assert!(grid.iter().all(|t| t <= end));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeGrid {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval_minutes: u32,
    len: usize,
}

impl TimeGrid {
    /// Create a grid.
    ///
    /// # Errors
    ///
    /// - [`RequestError::InvalidRange`] if `start > end`
    /// - [`RequestError::InvalidInterval`] if the interval is outside [1, 60]
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval_minutes: u32,
    ) -> Result<Self, RequestError> {
        if start > end {
            return Err(RequestError::InvalidRange { start, end });
        }
        validate_interval(interval_minutes)?;

        let span = (end - start).num_milliseconds();
        let step = i64::from(interval_minutes) * MILLIS_PER_MINUTE;
        let len = (span / step) as usize + 1;

        Ok(Self {
            start,
            end,
            interval_minutes,
            len,
        })
    }

    /// First instant.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Upper bound (not necessarily an instant of the grid).
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Sampling interval in minutes.
    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    /// Sampling interval.
    pub fn interval(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.interval_minutes))
    }

    /// Number of instants (always at least one).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: a valid grid contains `start`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The `k`-th instant, if within the grid.
    pub fn get(&self, k: usize) -> Option<DateTime<Utc>> {
        if k >= self.len {
            return None;
        }
        let offset = k as i64 * i64::from(self.interval_minutes) * MILLIS_PER_MINUTE;
        Some(self.start + TimeDelta::milliseconds(offset))
    }

    /// Last instant of the grid.
    pub fn last(&self) -> DateTime<Utc> {
        self.get(self.len - 1).unwrap_or(self.start)
    }

    /// Iterate over the instants.
    pub fn iter(&self) -> TimeGridIter {
        TimeGridIter {
            grid: *self,
            next: 0,
        }
    }
}

impl IntoIterator for &TimeGrid {
    type Item = DateTime<Utc>;
    type IntoIter = TimeGridIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the instants of a [`TimeGrid`].
#[derive(Clone, Debug)]
pub struct TimeGridIter {
    grid: TimeGrid,
    next: usize,
}

impl Iterator for TimeGridIter {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let t = self.grid.get(self.next)?;
        self.next += 1;
        Some(t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TimeGridIter {}
