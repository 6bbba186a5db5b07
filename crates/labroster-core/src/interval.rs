//! Date intervals with open bounds and their temporal state.
//!
//! Bounds are inclusive; `None` means unbounded on that side. Inverted
//! intervals (`since > until`) are accepted and evaluated mechanically.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// Position of an interval relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalState {
  Active,
  Former,
  Future,
}

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct Interval {
  pub since: Option<NaiveDate>,
  pub until: Option<NaiveDate>,
}

impl Interval {
  pub const UNBOUNDED: Self = Self {
    since: None,
    until: None,
  };

  pub const fn new(since: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
    Self { since, until }
  }

  // ── Point queries ─────────────────────────────────────────────────────

  pub fn is_active_at(&self, at: NaiveDate) -> bool {
    self.since.is_none_or(|since| since <= at)
      && self.until.is_none_or(|until| until >= at)
  }

  pub fn is_former_at(&self, at: NaiveDate) -> bool {
    self.until.is_some_and(|until| until < at)
  }

  pub fn is_future_at(&self, at: NaiveDate) -> bool {
    self.since.is_some_and(|since| since > at)
  }

  /// Exactly one state for a well-formed interval. For an inverted interval
  /// both `Former` and `Future` may hold; `Former` is reported.
  pub fn state_at(&self, at: NaiveDate) -> TemporalState {
    if self.is_active_at(at) {
      TemporalState::Active
    } else if self.is_former_at(at) {
      TemporalState::Former
    } else {
      TemporalState::Future
    }
  }

  pub fn is_active(&self, clock: &impl Clock) -> bool {
    self.is_active_at(clock.today())
  }

  pub fn is_former(&self, clock: &impl Clock) -> bool {
    self.is_former_at(clock.today())
  }

  pub fn is_future(&self, clock: &impl Clock) -> bool {
    self.is_future_at(clock.today())
  }

  // ── Window queries ────────────────────────────────────────────────────

  /// Whether this interval and `[start, end]` share at least one day.
  /// Either side of the window may be open.
  pub fn is_active_in(
    &self,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
  ) -> bool {
    let ends_after_start = match (self.until, start) {
      (Some(until), Some(start)) => until >= start,
      _ => true,
    };
    let starts_before_end = match (self.since, end) {
      (Some(since), Some(end)) => since <= end,
      _ => true,
    };
    ends_after_start && starts_before_end
  }

  /// Number of days of `year` covered by the interval, bounds included.
  /// Zero when the interval misses the year or is inverted.
  pub fn days_in_year(&self, year: i32) -> u32 {
    let (Some(first), Some(last)) = (
      NaiveDate::from_ymd_opt(year, 1, 1),
      NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
      return 0;
    };
    let start = self.since.map_or(first, |since| since.max(first));
    let end = self.until.map_or(last, |until| until.min(last));
    u32::try_from((end - start).num_days() + 1).unwrap_or(0)
  }
}

/// Number of days in `year` (365 or 366).
pub fn length_of_year(year: i32) -> u32 {
  match (
    NaiveDate::from_ymd_opt(year, 1, 1),
    NaiveDate::from_ymd_opt(year, 12, 31),
  ) {
    (Some(first), Some(last)) => last.ordinal() - first.ordinal() + 1,
    _ => 0,
  }
}
