//! Source of "today" for temporal queries.
//!
//! Interval queries never read the wall clock themselves; callers inject a
//! [`Clock`] so results stay reproducible.

use chrono::{Local, NaiveDate};

pub trait Clock {
  fn today(&self) -> NaiveDate;
}

/// Reads the local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate { Local::now().date_naive() }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate { self.0 }
}

impl<C: Clock + ?Sized> Clock for &C {
  fn today(&self) -> NaiveDate { (**self).today() }
}
