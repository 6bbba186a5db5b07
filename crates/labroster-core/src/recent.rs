//! Derivation of the most recent membership per organization.
//!
//! The derivation borrows its input and keeps the best candidate per
//! organization in a single pass.

use std::{cmp::Ordering, collections::HashMap};

use chrono::NaiveDate;

use crate::{membership::Membership, organization::Organization};

/// Optional caller predicate over memberships.
pub type MembershipFilter<'f> = &'f dyn Fn(&Membership) -> bool;

/// Preference order between two memberships of the same organization.
///
/// `Ordering::Less` means the left membership is preferred. Keys, in order:
/// active at `today` first; latest `since` first (unknown start last);
/// latest `until` first (open end first); larger persisted id first
/// (transient records last).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipOrder {
  today: NaiveDate,
}

impl MembershipOrder {
  pub fn new(today: NaiveDate) -> Self { Self { today } }

  pub fn today(&self) -> NaiveDate { self.today }

  pub fn compare(&self, a: &Membership, b: &Membership) -> Ordering {
    self
      .compare_dates(a, b)
      .then_with(|| compare_ids(a, b))
  }

  /// The date keys only: activity, then start, then end.
  pub fn compare_dates(&self, a: &Membership, b: &Membership) -> Ordering {
    let active_a = a.is_active_at(self.today);
    let active_b = b.is_active_at(self.today);
    active_b
      .cmp(&active_a)
      .then_with(|| latest_known_first(a.since(), b.since()))
      .then_with(|| open_or_latest_first(a.until(), b.until()))
  }
}

fn latest_known_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
  match (a, b) {
    (Some(a), Some(b)) => b.cmp(&a),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  }
}

fn open_or_latest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
  match (a, b) {
    (Some(a), Some(b)) => b.cmp(&a),
    (Some(_), None) => Ordering::Greater,
    (None, Some(_)) => Ordering::Less,
    (None, None) => Ordering::Equal,
  }
}

fn compare_ids(a: &Membership, b: &Membership) -> Ordering {
  match (a.identity.id(), b.identity.id()) {
    (Some(a), Some(b)) => b.cmp(&a),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  }
}

/// Most recent membership per organization.
///
/// Without a filter, memberships that are future at `today` are skipped.
/// Ties that survive every key keep the first membership seen. The map is
/// keyed by organization, so every membership should reference either
/// transient clones or managed copies of it, never both.
pub fn recent_memberships<'a>(
  memberships: impl IntoIterator<Item = &'a Membership>,
  today: NaiveDate,
  filter: Option<MembershipFilter<'_>>,
) -> HashMap<&'a Organization, &'a Membership> {
  let order = MembershipOrder::new(today);
  select(memberships, today, filter, |a, b| order.compare(a, b))
}

/// Like [`recent_memberships`], with `tie_break` replacing the id keys once
/// the date keys are equal.
pub fn recent_memberships_by<'a>(
  memberships: impl IntoIterator<Item = &'a Membership>,
  today: NaiveDate,
  filter: Option<MembershipFilter<'_>>,
  tie_break: impl Fn(&Membership, &Membership) -> Ordering,
) -> HashMap<&'a Organization, &'a Membership> {
  let order = MembershipOrder::new(today);
  select(memberships, today, filter, |a, b| {
    order.compare_dates(a, b).then_with(|| tie_break(a, b))
  })
}

fn select<'a>(
  memberships: impl IntoIterator<Item = &'a Membership>,
  today: NaiveDate,
  filter: Option<MembershipFilter<'_>>,
  compare: impl Fn(&Membership, &Membership) -> Ordering,
) -> HashMap<&'a Organization, &'a Membership> {
  let mut best: HashMap<&'a Organization, &'a Membership> = HashMap::new();
  for membership in memberships {
    let keep = match filter {
      Some(filter) => filter(membership),
      None => !membership.is_future_at(today),
    };
    if !keep {
      continue;
    }
    best
      .entry(&membership.organization)
      .and_modify(|current| {
        if compare(membership, *current) == Ordering::Less {
          *current = membership;
        }
      })
      .or_insert(membership);
  }
  tracing::trace!(organizations = best.len(), %today, "selected recent memberships");
  best
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    identity::{EntityId, Identifiable, Identity},
    status::MemberStatus,
  };

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  fn at(
    org: &Organization,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
  ) -> Membership {
    Membership::new(org.clone())
      .with_status(MemberStatus::PhdStudent)
      .with_interval(since, until)
  }

  #[test]
  fn active_beats_former() {
    let org = Organization::new("CIAD", "CIAD Lab");
    let former = at(&org, Some(d(2018, 1, 1)), Some(d(2020, 12, 31)));
    let active = at(&org, Some(d(2015, 1, 1)), None);
    let list = [former, active.clone()];
    let recent = recent_memberships(&list, d(2022, 1, 1), None);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[&org], &active);
  }

  #[test]
  fn latest_start_wins_among_former() {
    let org = Organization::new("CIAD", "CIAD Lab");
    let older = at(&org, Some(d(2010, 1, 1)), Some(d(2012, 1, 1)));
    let newer = at(&org, Some(d(2014, 1, 1)), Some(d(2016, 1, 1)));
    let unknown = at(&org, None, Some(d(2019, 1, 1)));
    let list = [older, unknown, newer.clone()];
    let recent = recent_memberships(&list, d(2022, 1, 1), None);
    assert_eq!(recent[&org], &newer);
  }

  #[test]
  fn open_end_wins_on_equal_start() {
    let org = Organization::new("CIAD", "CIAD Lab");
    let bounded = at(&org, Some(d(2020, 1, 1)), Some(d(2030, 1, 1)));
    let open = at(&org, Some(d(2020, 1, 1)), None);
    let list = [bounded, open.clone()];
    let recent = recent_memberships(&list, d(2022, 1, 1), None);
    assert_eq!(recent[&org], &open);
  }

  #[test]
  fn persisted_id_breaks_ties() {
    let org = Organization::new("CIAD", "CIAD Lab");
    let base = at(&org, Some(d(2020, 1, 1)), None);
    let low = base.clone().persisted(EntityId::new(3).unwrap()).unwrap();
    let high = at(&org, Some(d(2020, 1, 1)), None)
      .persisted(EntityId::new(9).unwrap())
      .unwrap();
    let transient = at(&org, Some(d(2020, 1, 1)), None);
    let list = [transient, low, high.clone()];
    let recent = recent_memberships(&list, d(2022, 1, 1), None);
    assert_eq!(recent[&org].raw_id(), 9);
  }

  #[test]
  fn default_filter_skips_future() {
    let org = Organization::new("CIAD", "CIAD Lab");
    let list = [at(&org, Some(d(2030, 1, 1)), None)];
    assert!(recent_memberships(&list, d(2022, 1, 1), None).is_empty());

    let everything: MembershipFilter<'_> = &|_: &Membership| true;
    let recent = recent_memberships(&list, d(2022, 1, 1), Some(everything));
    assert_eq!(recent.len(), 1);
  }

  #[test]
  fn one_entry_per_organization() {
    let ciad = Organization::new("CIAD", "CIAD Lab");
    let utbm = Organization::new("UTBM", "University");
    let list = [
      at(&ciad, Some(d(2019, 1, 1)), None),
      at(&utbm, Some(d(2012, 1, 1)), Some(d(2015, 1, 1))),
      at(&ciad, Some(d(2010, 1, 1)), Some(d(2011, 1, 1))),
    ];
    let recent = recent_memberships(&list, d(2022, 1, 1), None);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[&ciad].since(), Some(d(2019, 1, 1)));
    assert_eq!(recent[&utbm].since(), Some(d(2012, 1, 1)));
  }

  #[test]
  fn persisted_organization_copies_share_an_entry() {
    let org = Organization::new("CIAD", "CIAD Lab")
      .persisted(EntityId::new(5).unwrap())
      .unwrap();
    let mut reloaded = Organization::new("CIAD", "CIAD Lab");
    reloaded.identity = Identity::from_raw(5);
    let list = [
      at(&org, Some(d(2016, 1, 1)), Some(d(2018, 1, 1))),
      at(&reloaded, Some(d(2019, 1, 1)), None),
    ];
    let recent = recent_memberships(&list, d(2022, 1, 1), None);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[&org].since(), Some(d(2019, 1, 1)));
  }

  #[test]
  fn caller_tie_break_replaces_id_keys() {
    let org = Organization::new("CIAD", "CIAD Lab");
    let a = at(&org, Some(d(2020, 1, 1)), None)
      .persisted(EntityId::new(1).unwrap())
      .unwrap();
    let b = at(&org, Some(d(2020, 1, 1)), None)
      .persisted(EntityId::new(2).unwrap())
      .unwrap();
    let list = [a, b];
    let smallest_id =
      |x: &Membership, y: &Membership| x.raw_id().cmp(&y.raw_id());
    let recent =
      recent_memberships_by(&list, d(2022, 1, 1), None, smallest_id);
    assert_eq!(recent[&org].raw_id(), 1);
  }

  #[test]
  fn input_order_does_not_matter() {
    let org = Organization::new("CIAD", "CIAD Lab");
    let a = at(&org, Some(d(2016, 1, 1)), Some(d(2018, 1, 1)));
    let b = at(&org, Some(d(2019, 1, 1)), None);
    let c = at(&org, None, Some(d(2021, 1, 1)));
    let forward = [a.clone(), b.clone(), c.clone()];
    let backward = [c, b.clone(), a];
    let today = d(2022, 1, 1);
    assert_eq!(recent_memberships(&forward, today, None)[&org], &b);
    assert_eq!(recent_memberships(&backward, today, None)[&org], &b);
  }
}
