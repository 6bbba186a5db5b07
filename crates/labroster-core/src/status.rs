//! Member statuses and their attribute matrix.
//!
//! Every status carries a fixed bundle of attributes (hierarchy level,
//! research time fraction, capability flags, French acronym). The bundle is
//! the table in [`MemberStatus::profile`]; the compiler checks it covers
//! every variant.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr, IntoEnumIterator};

use crate::{
  Error, Result,
  gender::Gender,
  label::{self, Locale, MessageCatalog},
};

// ─── Enumeration ─────────────────────────────────────────────────────────────

/// Status of a person inside a research organization.
///
/// The canonical name (`PHD_STUDENT`, ...) is the stable, locale-independent
/// identifier used in message keys and in persisted records.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  EnumIter,
  EnumCount,
  EnumString,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum MemberStatus {
  /// Emeritus full professor (professeur émérite des universités).
  EmeritusFullProfessor,
  /// Full professor (professeur des universités).
  FullProfessor,
  /// Research director (directeur de recherche).
  ResearchDirector,
  EmeritusAssociateProfessorHdr,
  EmeritusAssociateProfessor,
  /// Associate professor holding an HDR (maître de conférences HDR).
  AssociateProfessorHdr,
  AssociateProfessor,
  /// Contractual teacher-researcher holding a PhD (enseignant-chercheur
  /// contractuel).
  ContractualResearcherTeacherPhd,
  ContractualResearcherTeacher,
  ResearcherPhd,
  Researcher,
  Postdoc,
  ResearchEngineerPhd,
  ResearchEngineer,
  PhdStudent,
  EngineerPhd,
  Engineer,
  /// Administrative staff.
  Admin,
  /// Associated teacher (PAST) holding a PhD.
  TeacherPhd,
  Teacher,
  MasterStudent,
  /// Master student under a work-study contract (apprenti).
  ContractMasterStudent,
  OtherContractStudent,
  OtherStudent,
  AssociatedMemberPhd,
  AssociatedMember,
}

// ─── Attribute matrix ────────────────────────────────────────────────────────

const PERMANENT: u16 = 1 << 0;
const RESEARCHER: u16 = 1 << 1;
const TEACHER: u16 = 1 << 2;
const TECHNICAL: u16 = 1 << 3;
const ADMINISTRATIVE: u16 = 1 << 4;
const PHD: u16 = 1 << 5;
const HDR: u16 = 1 << 6;
const SUPERVISABLE: u16 = 1 << 7;
const SUPERVISOR: u16 = 1 << 8;
const EXTERNAL: u16 = 1 << 9;
const EMERITUS: u16 = 1 << 10;

/// The fixed attribute bundle of a [`MemberStatus`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusProfile {
  /// Coarse seniority rank; lower is more senior.
  pub hierarchy_level:    u8,
  /// Nominal fraction of time allocated to research, in `[0, 1]`.
  pub usual_research_fte: f32,
  flags:                  u16,
  /// Institution-specific short code; empty when the status has none.
  pub french_acronym:     &'static str,
}

const fn profile(
  hierarchy_level: u8,
  usual_research_fte: f32,
  flags: u16,
  french_acronym: &'static str,
) -> StatusProfile {
  StatusProfile {
    hierarchy_level,
    usual_research_fte,
    flags,
    french_acronym,
  }
}

impl StatusProfile {
  const fn has(&self, flag: u16) -> bool { self.flags & flag != 0 }
}

impl MemberStatus {
  /// The attribute bundle of this status.
  ///
  /// `POSTDOC` is the one status that is both supervisable and supervisor.
  pub const fn profile(self) -> StatusProfile {
    use MemberStatus::*;
    match self {
      EmeritusFullProfessor => profile(
        0,
        0.0,
        RESEARCHER | TEACHER | PHD | HDR | SUPERVISOR | EMERITUS,
        "PR",
      ),
      FullProfessor => profile(
        0,
        0.5,
        PERMANENT | RESEARCHER | TEACHER | PHD | HDR | SUPERVISOR,
        "PR",
      ),
      ResearchDirector => {
        profile(0, 1.0, PERMANENT | RESEARCHER | PHD | HDR | SUPERVISOR, "DR")
      }
      EmeritusAssociateProfessorHdr => profile(
        1,
        0.0,
        PERMANENT | RESEARCHER | TEACHER | PHD | HDR | SUPERVISOR | EMERITUS,
        "MCF",
      ),
      EmeritusAssociateProfessor => profile(
        2,
        0.0,
        PERMANENT | RESEARCHER | TEACHER | PHD | SUPERVISOR | EMERITUS,
        "MCF",
      ),
      AssociateProfessorHdr => profile(
        1,
        0.5,
        PERMANENT | RESEARCHER | TEACHER | PHD | HDR | SUPERVISOR,
        "MCF",
      ),
      AssociateProfessor => profile(
        2,
        0.5,
        PERMANENT | RESEARCHER | TEACHER | PHD | SUPERVISOR,
        "MCF",
      ),
      ContractualResearcherTeacherPhd => profile(
        2,
        0.5,
        PERMANENT | RESEARCHER | TEACHER | PHD | SUPERVISOR,
        "ECC",
      ),
      ContractualResearcherTeacher => {
        profile(2, 0.5, PERMANENT | RESEARCHER | TEACHER | SUPERVISOR, "ECC")
      }
      ResearcherPhd => {
        profile(2, 1.0, PERMANENT | RESEARCHER | PHD | SUPERVISOR, "CR")
      }
      Researcher => profile(2, 1.0, PERMANENT | RESEARCHER | SUPERVISOR, "CR"),
      Postdoc => profile(
        3,
        1.0,
        RESEARCHER | PHD | SUPERVISABLE | SUPERVISOR,
        "POSTDOC",
      ),
      ResearchEngineerPhd => {
        profile(3, 1.0, PERMANENT | TECHNICAL | PHD | SUPERVISOR, "IGR")
      }
      ResearchEngineer => {
        profile(3, 1.0, PERMANENT | TECHNICAL | SUPERVISOR, "IGR")
      }
      PhdStudent => profile(4, 1.0, RESEARCHER | SUPERVISABLE, ""),
      EngineerPhd => {
        profile(4, 1.0, PERMANENT | TECHNICAL | PHD | SUPERVISOR, "IGE")
      }
      Engineer => profile(4, 1.0, PERMANENT | TECHNICAL, "IGE"),
      Admin => profile(4, 0.0, PERMANENT | ADMINISTRATIVE, ""),
      TeacherPhd => {
        profile(4, 0.0, PERMANENT | TEACHER | PHD | SUPERVISOR, "PAST")
      }
      Teacher => profile(4, 0.0, PERMANENT | TEACHER, "PAST"),
      MasterStudent => profile(5, 1.0, SUPERVISABLE | EXTERNAL, ""),
      ContractMasterStudent => profile(5, 1.0, TECHNICAL | SUPERVISABLE, "APP"),
      OtherContractStudent => profile(6, 1.0, TECHNICAL | SUPERVISABLE, "APP"),
      OtherStudent => profile(6, 1.0, SUPERVISABLE | EXTERNAL, ""),
      AssociatedMemberPhd => {
        profile(7, 0.0, RESEARCHER | PHD | SUPERVISOR | EXTERNAL, "")
      }
      AssociatedMember => profile(7, 0.0, RESEARCHER | SUPERVISOR | EXTERNAL, ""),
    }
  }

  // ── Attributes ────────────────────────────────────────────────────────

  pub const fn hierarchy_level(self) -> u8 { self.profile().hierarchy_level }

  pub const fn usual_research_fte(self) -> f32 {
    self.profile().usual_research_fte
  }

  pub const fn permanent_position_allowed(self) -> bool {
    self.profile().has(PERMANENT)
  }

  pub const fn is_researcher(self) -> bool { self.profile().has(RESEARCHER) }

  pub const fn is_teacher(self) -> bool { self.profile().has(TEACHER) }

  pub const fn is_technical_staff(self) -> bool {
    self.profile().has(TECHNICAL)
  }

  pub const fn is_administrative_staff(self) -> bool {
    self.profile().has(ADMINISTRATIVE)
  }

  pub const fn is_phd_owner(self) -> bool { self.profile().has(PHD) }

  /// Holds the French habilitation to supervise doctoral students.
  pub const fn is_hdr_owner(self) -> bool { self.profile().has(HDR) }

  /// May be supervised (students, postdocs).
  pub const fn is_supervisable(self) -> bool {
    self.profile().has(SUPERVISABLE)
  }

  /// May supervise others.
  pub const fn is_supervisor(self) -> bool { self.profile().has(SUPERVISOR) }

  /// The position is held outside the host institution.
  pub const fn is_external_position(self) -> bool {
    self.profile().has(EXTERNAL)
  }

  pub const fn is_emeritus(self) -> bool { self.profile().has(EMERITUS) }

  /// The acronym from the attribute table. Not translated.
  pub const fn french_acronym(self) -> &'static str {
    self.profile().french_acronym
  }

  // ── Names ─────────────────────────────────────────────────────────────

  /// Canonical identifier, e.g. `PHD_STUDENT`.
  pub fn name(self) -> &'static str { self.into() }

  /// Every status, in declaration order.
  pub fn all() -> impl Iterator<Item = Self> { Self::iter() }

  /// Parse a canonical name, ignoring ASCII case only. Unknown, empty or
  /// padded names are rejected.
  pub fn from_str_ci(name: &str) -> Result<Self> {
    Self::from_str(name)
      .map_err(|_| Error::InvalidMemberStatus(name.to_string()))
  }

  // ── Localized text ────────────────────────────────────────────────────

  /// Label of the status for the given gender, tense and locale.
  ///
  /// Never fails and never returns an empty string; see
  /// [`label::resolve_label`] for the fallback chain.
  pub fn label<C: MessageCatalog + ?Sized>(
    self,
    catalog: &C,
    gender: Option<Gender>,
    former: bool,
    locale: &Locale,
  ) -> String {
    label::resolve_label(catalog, self, gender.unwrap_or_default(), former, locale)
  }

  /// Present-tense label for the given gender.
  pub fn label_for<C: MessageCatalog + ?Sized>(
    self,
    catalog: &C,
    gender: Option<Gender>,
    locale: &Locale,
  ) -> String {
    self.label(catalog, gender, false, locale)
  }

  /// Present-tense label with no gender agreement.
  pub fn label_in<C: MessageCatalog + ?Sized>(
    self,
    catalog: &C,
    locale: &Locale,
  ) -> String {
    self.label(catalog, None, false, locale)
  }

  /// Acronym from the catalog when it overrides one, otherwise from the
  /// attribute table.
  pub fn french_acronym_in<C: MessageCatalog + ?Sized>(
    self,
    catalog: &C,
  ) -> String {
    label::lookup(catalog, &label::acronym_key(self), &Locale::root())
      .unwrap_or_else(|| self.french_acronym().to_string())
  }

  /// Civil title associated with the status (e.g. `Pr.`), if any.
  pub fn civil_title<C: MessageCatalog + ?Sized>(
    self,
    catalog: &C,
    locale: &Locale,
  ) -> Option<String> {
    label::lookup(catalog, &label::title_key(self), locale)
  }
}

impl std::fmt::Display for MemberStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

impl TryFrom<String> for MemberStatus {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> { Self::from_str_ci(&value) }
}
