//! Per-year membership statistics.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
  interval::length_of_year,
  membership::Membership,
  status::MemberStatus,
};

/// Members counted in one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
  pub year:         i32,
  pub counts:       BTreeMap<MemberStatus, u32>,
  /// Research time of permanent staff, weighted by the share of the year
  /// each membership covers.
  pub research_fte: f64,
}

impl YearSummary {
  fn empty(year: i32) -> Self {
    Self {
      year,
      counts: BTreeMap::new(),
      research_fte: 0.0,
    }
  }

  pub fn count(&self, status: MemberStatus) -> u32 {
    self.counts.get(&status).copied().unwrap_or(0)
  }

  /// Sum of the counts of a group of statuses.
  pub fn count_of(&self, statuses: &[MemberStatus]) -> u32 {
    statuses.iter().map(|s| self.count(*s)).sum()
  }

  pub fn total(&self) -> u32 { self.counts.values().sum() }
}

/// Statistics for every year in `min_year..=max_year` that has at least one
/// member, in ascending order.
pub fn members_per_year<'a>(
  memberships: impl IntoIterator<Item = &'a Membership>,
  min_year: i32,
  max_year: i32,
) -> Vec<YearSummary> {
  if min_year > max_year {
    return Vec::new();
  }
  let memberships: Vec<&Membership> = memberships
    .into_iter()
    .filter(|m| m.status().is_some())
    .collect();

  let mut years = Vec::new();
  for year in min_year..=max_year {
    let (Some(start), Some(end)) = (
      NaiveDate::from_ymd_opt(year, 1, 1),
      NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
      continue;
    };

    let mut summary = YearSummary::empty(year);
    for membership in &memberships {
      let Some(status) = membership.status() else {
        continue;
      };
      if !membership.is_active_in(Some(start), Some(end)) {
        continue;
      }
      *summary.counts.entry(status).or_default() += 1;
      if membership.is_permanent_position() {
        let share = f64::from(membership.days_in_year(year))
          / f64::from(length_of_year(year));
        summary.research_fte += f64::from(status.usual_research_fte()) * share;
      }
    }

    if summary.counts.is_empty() {
      continue;
    }
    tracing::trace!(year, members = summary.total(), "counted members");
    years.push(summary);
  }
  years
}
