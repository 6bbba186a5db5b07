//! Memberships: time-bounded associations between a person and an
//! organization, carrying a member status.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  clock::Clock,
  gender::Gender,
  identity::{Identifiable, Identity, identity_semantics},
  interval::{Interval, TemporalState},
  label::{Locale, MessageCatalog},
  organization::Organization,
  status::MemberStatus,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
  #[serde(flatten)]
  pub identity:       Identity,
  pub organization:   Organization,
  #[serde(default)]
  since:              Option<NaiveDate>,
  #[serde(default)]
  until:              Option<NaiveDate>,
  #[serde(default)]
  status:             Option<MemberStatus>,
  /// Raw flag as entered; see [`Membership::is_permanent_position`].
  #[serde(default)]
  permanent_position: bool,
  #[serde(default = "default_main_position")]
  main_position:      bool,
}

fn default_main_position() -> bool { true }

impl Membership {
  /// A transient membership with open bounds and no status.
  pub fn new(organization: Organization) -> Self {
    Self {
      identity: Identity::transient(),
      organization,
      since: None,
      until: None,
      status: None,
      permanent_position: false,
      main_position: true,
    }
  }

  pub fn with_status(mut self, status: MemberStatus) -> Self {
    self.set_status(Some(status));
    self
  }

  pub fn with_interval(
    mut self,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
  ) -> Self {
    self.since = since;
    self.until = until;
    self
  }

  pub fn with_permanent_position(mut self, permanent: bool) -> Self {
    self.set_permanent_position(permanent);
    self
  }

  // ── Dates ─────────────────────────────────────────────────────────────

  pub fn since(&self) -> Option<NaiveDate> { self.since }

  pub fn until(&self) -> Option<NaiveDate> { self.until }

  pub fn set_since(&mut self, date: Option<NaiveDate>) { self.since = date; }

  pub fn set_until(&mut self, date: Option<NaiveDate>) { self.until = date; }

  /// Set the start from an ISO date; blank text clears it.
  pub fn set_since_str(&mut self, date: &str) -> Result<()> {
    self.since = parse_optional_date(date)?;
    Ok(())
  }

  /// Set the end from an ISO date; blank text clears it.
  pub fn set_until_str(&mut self, date: &str) -> Result<()> {
    self.until = parse_optional_date(date)?;
    Ok(())
  }

  pub fn interval(&self) -> Interval { Interval::new(self.since, self.until) }

  // ── Status ────────────────────────────────────────────────────────────

  pub fn status(&self) -> Option<MemberStatus> { self.status }

  /// Changing the status re-validates the permanent position flag.
  pub fn set_status(&mut self, status: Option<MemberStatus>) {
    self.status = status;
    self.permanent_position =
      permanence_allowed(self.permanent_position, status);
  }

  /// Set the status from its name; blank text clears it, unknown names are
  /// rejected.
  pub fn set_status_str(&mut self, name: &str) -> Result<()> {
    let status = if name.trim().is_empty() {
      None
    } else {
      Some(MemberStatus::from_str_ci(name)?)
    };
    self.set_status(status);
    Ok(())
  }

  // ── Positions ─────────────────────────────────────────────────────────

  /// Effective permanence: the raw flag, only if the status allows it.
  pub fn is_permanent_position(&self) -> bool {
    permanence_allowed(self.permanent_position, self.status)
  }

  pub fn set_permanent_position(&mut self, permanent: bool) {
    self.permanent_position = permanence_allowed(permanent, self.status);
  }

  pub fn is_main_position(&self) -> bool { self.main_position }

  pub fn set_main_position(&mut self, main: bool) { self.main_position = main; }

  // ── Temporal state ────────────────────────────────────────────────────

  pub fn is_active(&self, clock: &impl Clock) -> bool {
    self.interval().is_active(clock)
  }

  pub fn is_former(&self, clock: &impl Clock) -> bool {
    self.interval().is_former(clock)
  }

  pub fn is_future(&self, clock: &impl Clock) -> bool {
    self.interval().is_future(clock)
  }

  pub fn is_active_at(&self, at: NaiveDate) -> bool {
    self.interval().is_active_at(at)
  }

  pub fn is_former_at(&self, at: NaiveDate) -> bool {
    self.interval().is_former_at(at)
  }

  pub fn is_future_at(&self, at: NaiveDate) -> bool {
    self.interval().is_future_at(at)
  }

  pub fn state_at(&self, at: NaiveDate) -> TemporalState {
    self.interval().state_at(at)
  }

  pub fn is_active_in(
    &self,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
  ) -> bool {
    self.interval().is_active_in(start, end)
  }

  pub fn days_in_year(&self, year: i32) -> u32 {
    self.interval().days_in_year(year)
  }

  // ── Display ───────────────────────────────────────────────────────────

  /// Status label, organization and years, e.g.
  /// `PhD Student - CIAD [2021→2024]`.
  pub fn short_description<C: MessageCatalog + ?Sized>(
    &self,
    catalog: &C,
    gender: Option<Gender>,
    locale: &Locale,
  ) -> String {
    let label = self
      .status
      .map(|s| s.label_for(catalog, gender, locale))
      .unwrap_or_default();
    let years = match (self.since, self.until) {
      (Some(s), Some(u)) if s.year() == u.year() => s.year().to_string(),
      (Some(s), Some(u)) => format!("{}\u{2192}{}", s.year(), u.year()),
      (Some(s), None) => format!("{}\u{21A6}", s.year()),
      (None, Some(u)) => format!("\u{21E5}{}", u.year()),
      (None, None) => String::new(),
    };
    format!(
      "{label} - {} [{years}]",
      self.organization.acronym_or_name()
    )
  }
}

fn permanence_allowed(permanent: bool, status: Option<MemberStatus>) -> bool {
  permanent && status.is_none_or(MemberStatus::permanent_position_allowed)
}

fn parse_optional_date(text: &str) -> Result<Option<NaiveDate>> {
  let text = text.trim();
  if text.is_empty() {
    return Ok(None);
  }
  NaiveDate::parse_from_str(text, "%Y-%m-%d")
    .map(Some)
    .map_err(|source| Error::InvalidDate {
      value: text.to_string(),
      source,
    })
}

impl Identifiable for Membership {
  fn identity(&self) -> &Identity { &self.identity }

  fn identity_mut(&mut self) -> &mut Identity { &mut self.identity }
}

identity_semantics!(Membership);
