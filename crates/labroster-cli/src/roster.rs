//! JSON roster files: organizations and persons as stored, with raw values.
//!
//! ```json
//! {
//!   "organizations": [{ "id": 1, "acronym": "CIAD", "name": "CIAD Lab" }],
//!   "persons": [{
//!     "id": 7, "first_name": "Ada", "last_name": "Lovelace",
//!     "gender": "female",
//!     "memberships": [{
//!       "id": 3, "organization": 1, "status": "phd_student",
//!       "since": "2021-07-01", "until": "2022-07-01"
//!     }]
//!   }]
//! }
//! ```
//!
//! Ids of `0` (or missing) denote transient records. Memberships reference
//! organizations by id.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context as _, bail};
use labroster_core::{
  gender::Gender,
  identity::Identity,
  membership::Membership,
  organization::Organization,
  person::Person,
};
use serde::Deserialize;

// ─── Raw records ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RosterFile {
  #[serde(default)]
  pub organizations: Vec<RawOrganization>,
  #[serde(default)]
  pub persons:       Vec<RawPerson>,
}

#[derive(Debug, Deserialize)]
pub struct RawOrganization {
  #[serde(default)]
  pub id:      u64,
  #[serde(default)]
  pub acronym: String,
  pub name:    String,
}

#[derive(Debug, Deserialize)]
pub struct RawPerson {
  #[serde(default)]
  pub id:          u64,
  pub first_name:  String,
  pub last_name:   String,
  #[serde(default)]
  pub gender:      Option<String>,
  #[serde(default)]
  pub memberships: Vec<RawMembership>,
}

#[derive(Debug, Deserialize)]
pub struct RawMembership {
  #[serde(default)]
  pub id:                 u64,
  pub organization:       u64,
  #[serde(default)]
  pub status:             Option<String>,
  #[serde(default)]
  pub since:              Option<String>,
  #[serde(default)]
  pub until:              Option<String>,
  #[serde(default)]
  pub permanent_position: bool,
  #[serde(default = "default_true")]
  pub main_position:      bool,
}

fn default_true() -> bool { true }

// ─── Resolved roster ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Roster {
  pub organizations: Vec<Organization>,
  pub persons:       Vec<Person>,
}

impl Roster {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let text = fs::read_to_string(path)
      .with_context(|| format!("reading roster {}", path.display()))?;
    Self::from_json(&text)
      .with_context(|| format!("loading roster {}", path.display()))
  }

  pub fn from_json(text: &str) -> anyhow::Result<Self> {
    let file: RosterFile =
      serde_json::from_str(text).context("parsing roster JSON")?;
    Self::resolve(file)
  }

  /// Build domain records from raw values. Organizations are shared by id
  /// so that memberships of the same organization compare equal.
  pub fn resolve(file: RosterFile) -> anyhow::Result<Self> {
    let mut by_id: HashMap<u64, Organization> = HashMap::new();
    let mut organizations = Vec::with_capacity(file.organizations.len());
    for raw in file.organizations {
      if raw.id == 0 {
        bail!("organization {:?} has no id", raw.name);
      }
      let organization = Organization {
        identity: Identity::from_raw(raw.id),
        acronym:  raw.acronym,
        name:     raw.name,
      };
      if by_id.insert(raw.id, organization.clone()).is_some() {
        bail!("duplicate organization id {}", raw.id);
      }
      organizations.push(organization);
    }

    let persons = file
      .persons
      .into_iter()
      .map(|raw| resolve_person(raw, &by_id))
      .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::debug!(
      organizations = organizations.len(),
      persons = persons.len(),
      "resolved roster"
    );
    Ok(Self {
      organizations,
      persons,
    })
  }

  pub fn memberships(&self) -> impl Iterator<Item = &Membership> {
    self.persons.iter().flat_map(|p| p.memberships.iter())
  }
}

fn resolve_person(
  raw: RawPerson,
  organizations: &HashMap<u64, Organization>,
) -> anyhow::Result<Person> {
  let mut person = Person::new(raw.first_name, raw.last_name);
  person.identity = Identity::from_raw(raw.id);
  if let Some(gender) = raw.gender.as_deref()
    && !gender.trim().is_empty()
  {
    person.gender = gender
      .parse::<Gender>()
      .with_context(|| format!("person {}", person.full_name()))?;
  }
  for membership in raw.memberships {
    let resolved = resolve_membership(membership, organizations)
      .with_context(|| format!("membership of {}", person.full_name()))?;
    person.memberships.push(resolved);
  }
  Ok(person)
}

fn resolve_membership(
  raw: RawMembership,
  organizations: &HashMap<u64, Organization>,
) -> anyhow::Result<Membership> {
  let organization = organizations
    .get(&raw.organization)
    .with_context(|| format!("unknown organization id {}", raw.organization))?;

  let mut membership = Membership::new(organization.clone());
  membership.identity = Identity::from_raw(raw.id);
  membership.set_status_str(raw.status.as_deref().unwrap_or_default())?;
  membership.set_since_str(raw.since.as_deref().unwrap_or_default())?;
  membership.set_until_str(raw.until.as_deref().unwrap_or_default())?;
  membership.set_permanent_position(raw.permanent_position);
  membership.set_main_position(raw.main_position);
  Ok(membership)
}
