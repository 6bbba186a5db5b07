//! Persons and the membership queries built on top of them.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  gender::Gender,
  identity::{Identifiable, Identity, identity_semantics},
  membership::Membership,
  organization::Organization,
  recent::{MembershipFilter, recent_memberships},
};

/// Most recent membership per organization, borrowed from a [`Person`].
pub type RecentMemberships<'a> = HashMap<&'a Organization, &'a Membership>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  #[serde(flatten)]
  pub identity:    Identity,
  pub first_name:  String,
  pub last_name:   String,
  #[serde(default)]
  pub gender:      Gender,
  #[serde(default)]
  pub memberships: Vec<Membership>,
}

impl Person {
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
  ) -> Self {
    Self {
      identity:    Identity::transient(),
      first_name:  first_name.into(),
      last_name:   last_name.into(),
      gender:      Gender::NotSpecified,
      memberships: Vec::new(),
    }
  }

  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  // ── Recent memberships ────────────────────────────────────────────────

  /// Most recent non-future membership per organization.
  pub fn recent_memberships(&self, today: NaiveDate) -> RecentMemberships<'_> {
    recent_memberships(&self.memberships, today, None)
  }

  pub fn recent_memberships_where(
    &self,
    today: NaiveDate,
    filter: MembershipFilter<'_>,
  ) -> RecentMemberships<'_> {
    recent_memberships(&self.memberships, today, Some(filter))
  }

  pub fn active_memberships(&self, today: NaiveDate) -> RecentMemberships<'_> {
    self.recent_memberships_where(today, &|m: &Membership| {
      m.is_active_at(today)
    })
  }

  pub fn finished_memberships(
    &self,
    today: NaiveDate,
  ) -> RecentMemberships<'_> {
    self.recent_memberships_where(today, &|m: &Membership| {
      m.is_former_at(today)
    })
  }

  pub fn active_or_finished_memberships(
    &self,
    today: NaiveDate,
  ) -> RecentMemberships<'_> {
    self.recent_memberships_where(today, &|m: &Membership| {
      !m.is_future_at(today)
    })
  }

  pub fn future_memberships(&self, today: NaiveDate) -> RecentMemberships<'_> {
    self.recent_memberships_where(today, &|m: &Membership| {
      m.is_future_at(today)
    })
  }

  // ── Supervision ───────────────────────────────────────────────────────

  /// Memberships whose status can be supervised, in input order.
  pub fn supervisable_memberships(&self) -> Vec<&Membership> {
    self
      .memberships
      .iter()
      .filter(|m| m.status().is_some_and(|s| s.is_supervisable()))
      .collect()
  }

  /// Memberships whose status can supervise, in input order.
  pub fn supervisor_memberships(&self) -> Vec<&Membership> {
    self
      .memberships
      .iter()
      .filter(|m| m.status().is_some_and(|s| s.is_supervisor()))
      .collect()
  }
}

impl Identifiable for Person {
  fn identity(&self) -> &Identity { &self.identity }

  fn identity_mut(&mut self) -> &mut Identity { &mut self.identity }
}

identity_semantics!(Person);

#[cfg(test)]
mod tests {
  use super::*;
  use crate::status::MemberStatus;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  fn sample() -> (Person, Organization, Organization) {
    let ciad = Organization::new("CIAD", "CIAD Lab");
    let utbm = Organization::new("UTBM", "University");
    let mut person = Person::new("Ada", "Lovelace");
    person.memberships = vec![
      Membership::new(ciad.clone())
        .with_status(MemberStatus::PhdStudent)
        .with_interval(Some(d(2015, 10, 1)), Some(d(2018, 9, 30))),
      Membership::new(ciad.clone())
        .with_status(MemberStatus::Postdoc)
        .with_interval(Some(d(2018, 10, 1)), Some(d(2020, 9, 30))),
      Membership::new(utbm.clone())
        .with_status(MemberStatus::AssociateProfessor)
        .with_interval(Some(d(2020, 10, 1)), None),
      Membership::new(ciad.clone())
        .with_status(MemberStatus::FullProfessor)
        .with_interval(Some(d(2030, 9, 1)), None),
    ];
    (person, ciad, utbm)
  }

  #[test]
  fn full_name_joins_parts() {
    assert_eq!(Person::new("Ada", "Lovelace").full_name(), "Ada Lovelace");
  }

  #[test]
  fn recent_skips_future_and_prefers_latest() {
    let (person, ciad, utbm) = sample();
    let recent = person.recent_memberships(d(2022, 1, 1));
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[&ciad].status(), Some(MemberStatus::Postdoc));
    assert_eq!(
      recent[&utbm].status(),
      Some(MemberStatus::AssociateProfessor)
    );
  }

  #[test]
  fn filtered_views() {
    let (person, ciad, utbm) = sample();
    let today = d(2022, 1, 1);

    let active = person.active_memberships(today);
    assert_eq!(active.len(), 1);
    assert!(active.contains_key(&utbm));

    let finished = person.finished_memberships(today);
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[&ciad].status(), Some(MemberStatus::Postdoc));

    assert_eq!(person.active_or_finished_memberships(today).len(), 2);

    let future = person.future_memberships(today);
    assert_eq!(future[&ciad].status(), Some(MemberStatus::FullProfessor));
  }

  #[test]
  fn supervision_roles() {
    let (person, ..) = sample();
    let supervisable: Vec<_> = person
      .supervisable_memberships()
      .iter()
      .filter_map(|m| m.status())
      .collect();
    assert_eq!(
      supervisable,
      [MemberStatus::PhdStudent, MemberStatus::Postdoc]
    );
    let supervisors: Vec<_> = person
      .supervisor_memberships()
      .iter()
      .filter_map(|m| m.status())
      .collect();
    assert_eq!(
      supervisors,
      [
        MemberStatus::Postdoc,
        MemberStatus::AssociateProfessor,
        MemberStatus::FullProfessor,
      ]
    );
  }

  #[test]
  fn no_memberships_no_entries() {
    let person = Person::new("Ada", "Lovelace");
    assert!(person.recent_memberships(d(2022, 1, 1)).is_empty());
    assert!(person.supervisor_memberships().is_empty());
  }

  #[test]
  fn deserializes_with_defaults() {
    let json = r#"{ "id": 4, "first_name": "Ada", "last_name": "Lovelace" }"#;
    let person: Person = serde_json::from_str(json).unwrap();
    assert_eq!(person.raw_id(), 4);
    assert_eq!(person.gender, Gender::NotSpecified);
    assert!(person.memberships.is_empty());
  }
}
