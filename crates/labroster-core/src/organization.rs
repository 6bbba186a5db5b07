//! Research organizations referenced by memberships.

use serde::{Deserialize, Serialize};

use crate::identity::{Identifiable, Identity, identity_semantics};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
  #[serde(flatten)]
  pub identity: Identity,
  #[serde(default)]
  pub acronym:  String,
  pub name:     String,
}

impl Organization {
  pub fn new(acronym: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      identity: Identity::transient(),
      acronym:  acronym.into(),
      name:     name.into(),
    }
  }

  pub fn acronym_or_name(&self) -> &str {
    if self.acronym.trim().is_empty() {
      &self.name
    } else {
      &self.acronym
    }
  }
}

impl Identifiable for Organization {
  fn identity(&self) -> &Identity { &self.identity }

  fn identity_mut(&mut self) -> &mut Identity { &mut self.identity }
}

identity_semantics!(Organization);
