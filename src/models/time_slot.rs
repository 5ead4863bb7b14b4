//! Time slot model.
//!
//! A work day is split into fixed-duration slots (30 minutes by default).
//! Slots are the atomic unit of the assignment grid: every assignment
//! places one worker on one task for exactly one slot.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Default slot length (minutes).
pub const DEFAULT_SLOT_MINUTES: i64 = 30;

/// A fixed time slot within a work day.
///
/// Immutable once the grid is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Slot start (inclusive).
    pub start_time: NaiveTime,
    /// Slot end (exclusive).
    pub end_time: NaiveTime,
    /// Slot length in minutes.
    pub duration_minutes: i64,
    /// Calendar date the slot belongs to.
    pub date: NaiveDate,
}

/// Coarse time-of-day bucket used by per-worker efficiency tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// 05:00 – 12:00
    Morning,
    /// 12:00 – 17:00
    Afternoon,
    /// 17:00 – 22:00
    Evening,
    /// 22:00 – 05:00
    Night,
}

impl TimeOfDay {
    /// Every bucket, in clock order from the morning.
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Classifies a wall-clock time.
    pub fn from_time(time: NaiveTime) -> Self {
        match time.hour() {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

impl TimeSlot {
    /// Creates a slot of `duration_minutes` starting at `start_time`.
    ///
    /// The end time wraps past midnight like a wall clock.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: i64,
    ) -> Self {
        let (end_time, _) =
            start_time.overflowing_add_signed(chrono::Duration::minutes(duration_minutes));
        Self {
            id: id.into(),
            start_time,
            end_time,
            duration_minutes,
            date,
        }
    }

    /// Builds `count` consecutive slots of `duration_minutes`, starting at `first_start`.
    ///
    /// Slot ids are `"{prefix}{n}"` with `n` counting from 1.
    pub fn sequence(
        prefix: &str,
        date: NaiveDate,
        first_start: NaiveTime,
        duration_minutes: i64,
        count: usize,
    ) -> Vec<Self> {
        let mut slots = Vec::with_capacity(count);
        let mut start = first_start;
        for n in 1..=count {
            let slot = Self::new(format!("{prefix}{n}"), date, start, duration_minutes);
            start = slot.end_time;
            slots.push(slot);
        }
        slots
    }

    /// Time-of-day bucket of the slot start.
    #[inline]
    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_time(self.start_time)
    }

    /// Slot length in hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes as f64 / 60.0
    }
}
