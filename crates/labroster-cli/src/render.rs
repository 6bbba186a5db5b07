//! Plain-text rendering of command output.

use chrono::{Datelike, NaiveDate};
use labroster_core::{
  gender::Gender,
  interval::{Interval, TemporalState, length_of_year},
  label::{Locale, MessageCatalog},
  stats::{YearSummary, members_per_year},
  status::MemberStatus::{self, *},
};

use crate::roster::Roster;

// ─── Statuses ────────────────────────────────────────────────────────────────

/// One line per status: name, level, usual FTE, acronym, label.
pub fn status_table<C: MessageCatalog + ?Sized>(
  catalog: &C,
  locale: &Locale,
) -> String {
  MemberStatus::all()
    .map(|status| {
      format!(
        "{:<34} {} {:>4.2} {:<8} {}",
        status.name(),
        status.hierarchy_level(),
        status.usual_research_fte(),
        status.french_acronym_in(catalog),
        status.label_in(catalog, locale),
      )
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// Every attribute of one status, plus its localized texts.
pub fn status_details<C: MessageCatalog + ?Sized>(
  status: MemberStatus,
  catalog: &C,
  gender: Option<Gender>,
  former: bool,
  locale: &Locale,
) -> String {
  let flags = [
    ("permanent position allowed", status.permanent_position_allowed()),
    ("researcher", status.is_researcher()),
    ("teacher", status.is_teacher()),
    ("technical staff", status.is_technical_staff()),
    ("administrative staff", status.is_administrative_staff()),
    ("PhD", status.is_phd_owner()),
    ("HDR", status.is_hdr_owner()),
    ("supervisable", status.is_supervisable()),
    ("supervisor", status.is_supervisor()),
    ("external position", status.is_external_position()),
    ("emeritus", status.is_emeritus()),
  ];

  let mut lines = vec![
    status.name().to_string(),
    format!(
      "  label:           {}",
      status.label(catalog, gender, former, locale)
    ),
    format!(
      "  civil title:     {}",
      status.civil_title(catalog, locale).unwrap_or_else(|| "-".into())
    ),
    format!("  acronym:         {}", status.french_acronym_in(catalog)),
    format!("  hierarchy level: {}", status.hierarchy_level()),
    format!("  research FTE:    {:.2}", status.usual_research_fte()),
  ];
  lines.extend(
    flags
      .iter()
      .map(|(name, value)| format!("  {name:<27}{}", yes_no(*value))),
  );
  lines.join("\n")
}

fn yes_no(value: bool) -> &'static str { if value { "yes" } else { "no" } }

// ─── Intervals ───────────────────────────────────────────────────────────────

pub fn interval_report(interval: Interval, at: NaiveDate, year: i32) -> String {
  let state = match interval.state_at(at) {
    TemporalState::Active => "active",
    TemporalState::Former => "former",
    TemporalState::Future => "future",
  };
  format!(
    "state at {at}: {state}\ndays in {year}: {} / {}",
    interval.days_in_year(year),
    length_of_year(year),
  )
}

// ─── Rosters ─────────────────────────────────────────────────────────────────

/// Columns of the yearly table, as groups of statuses.
const COLUMNS: &[(&str, &[MemberStatus])] = &[
  ("PR", &[EmeritusFullProfessor, FullProfessor]),
  ("DR", &[ResearchDirector]),
  ("MCF-HDR", &[AssociateProfessorHdr, EmeritusAssociateProfessorHdr]),
  ("MCF", &[AssociateProfessor, EmeritusAssociateProfessor]),
  ("PostDoc", &[Postdoc]),
  ("PhD", &[PhdStudent]),
  ("Eng", &[ResearchEngineerPhd, ResearchEngineer, EngineerPhd, Engineer]),
];

/// Recent memberships of every person, then members per year.
pub fn roster_report<C: MessageCatalog + ?Sized>(
  roster: &Roster,
  catalog: &C,
  locale: &Locale,
  today: NaiveDate,
  from_year: Option<i32>,
  to_year: Option<i32>,
) -> String {
  let mut lines = Vec::new();
  for person in &roster.persons {
    lines.push(person.full_name());
    let mut recent: Vec<_> =
      person.recent_memberships(today).into_values().collect();
    recent.sort_by(|a, b| {
      a.organization
        .acronym_or_name()
        .cmp(b.organization.acronym_or_name())
    });
    if recent.is_empty() {
      lines.push("  (no current or past membership)".to_string());
    }
    for membership in recent {
      let former = membership.is_former_at(today);
      let label = membership
        .status()
        .map(|s| s.label(catalog, Some(person.gender), former, locale))
        .unwrap_or_default();
      lines.push(format!(
        "  {} | {}",
        membership.short_description(catalog, Some(person.gender), locale),
        label
      ));
    }
  }

  let (first, last) = default_years(roster, today);
  let summaries = members_per_year(
    roster.memberships(),
    from_year.unwrap_or(first),
    to_year.unwrap_or(last),
  );
  if !summaries.is_empty() {
    lines.push(String::new());
    lines.push(year_header());
    lines.extend(summaries.iter().map(year_row));
  }
  lines.join("\n")
}

/// From the earliest known start to the current year.
fn default_years(roster: &Roster, today: NaiveDate) -> (i32, i32) {
  let first = roster
    .memberships()
    .filter_map(|m| m.since())
    .map(|date| date.year())
    .min()
    .unwrap_or(today.year());
  (first, today.year())
}

fn year_header() -> String {
  let mut header = String::from("Year");
  for (name, _) in COLUMNS {
    header.push_str(&format!(" {name:>7}"));
  }
  header.push_str("  Others   Total     FTE");
  header
}

fn year_row(summary: &YearSummary) -> String {
  let mut row = format!("{:<4}", summary.year);
  let mut grouped = 0;
  for (_, statuses) in COLUMNS {
    let count = summary.count_of(statuses);
    grouped += count;
    row.push_str(&format!(" {count:>7}"));
  }
  let total = summary.total();
  row.push_str(&format!(
    " {:>7} {:>7} {:>7.2}",
    total - grouped,
    total,
    summary.research_fte
  ));
  row
}
