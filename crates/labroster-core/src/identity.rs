//! Identity of records that may or may not be persisted yet.
//!
//! A record starts *transient* (no surrogate id) and becomes *managed* once
//! the persistence layer assigns it an id. The transition is one-way.
//!
//! Every [`Identity`] also carries an origin token, a random UUID fixed at
//! construction and kept across promotion. Two transient records are equal
//! only when they share an origin (a record and its clones); a managed record
//! equals the transient record it was promoted from; two managed records are
//! equal when their ids are.
//!
//! Hashing follows the state: the id for managed records, the origin for
//! transient ones. A transient record and its promoted successor therefore
//! compare equal but hash differently and must not share a hash-based
//! collection. Promotion goes through `persisted(self, ..)`, which consumes
//! the transient record.

use std::{
  fmt,
  hash::{Hash, Hasher},
  num::NonZeroU64,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── EntityId ────────────────────────────────────────────────────────────────

/// A stable, non-zero surrogate identifier assigned by the persistence layer.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(NonZeroU64);

impl EntityId {
  pub fn new(raw: u64) -> Result<Self> {
    NonZeroU64::new(raw).map(Self).ok_or(Error::ZeroEntityId)
  }

  pub fn get(self) -> u64 { self.0.get() }
}

impl fmt::Display for EntityId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
  #[serde(skip, default = "Uuid::new_v4")]
  origin: Uuid,
  #[serde(rename = "id", with = "raw_id", default)]
  id:     Option<EntityId>,
}

impl Identity {
  /// A fresh transient identity with a new origin token.
  pub fn transient() -> Self {
    Self {
      origin: Uuid::new_v4(),
      id:     None,
    }
  }

  /// A managed identity, e.g. for a record loaded from storage.
  pub fn managed(id: EntityId) -> Self {
    Self {
      origin: Uuid::new_v4(),
      id:     Some(id),
    }
  }

  /// Identity from a raw storage id; `0` means transient.
  pub fn from_raw(raw: u64) -> Self {
    match EntityId::new(raw) {
      Ok(id) => Self::managed(id),
      Err(_) => Self::transient(),
    }
  }

  pub fn is_transient(&self) -> bool { self.id.is_none() }

  pub fn is_managed(&self) -> bool { self.id.is_some() }

  pub fn id(&self) -> Option<EntityId> { self.id }

  /// The id the persistence layer sees; `0` while transient.
  pub fn raw_id(&self) -> u64 { self.id.map_or(0, EntityId::get) }

  pub fn origin(&self) -> Uuid { self.origin }

  /// Promote to managed. Re-assigning the same id is a no-op; a different id
  /// is rejected.
  pub fn assign(&mut self, id: EntityId) -> Result<()> {
    match self.id {
      None => {
        self.id = Some(id);
        Ok(())
      }
      Some(current) if current == id => Ok(()),
      Some(current) => Err(Error::IdentityAlreadyAssigned {
        current,
        requested: id,
      }),
    }
  }
}

impl Default for Identity {
  fn default() -> Self { Self::transient() }
}

impl PartialEq for Identity {
  fn eq(&self, other: &Self) -> bool {
    match (self.id, other.id) {
      (Some(a), Some(b)) => a == b,
      _ => self.origin == other.origin,
    }
  }
}

impl Eq for Identity {}

impl Hash for Identity {
  fn hash<H: Hasher>(&self, state: &mut H) {
    match self.id {
      Some(id) => id.hash(state),
      None => self.origin.hash(state),
    }
  }
}

/// Entities that carry an [`Identity`].
pub trait Identifiable {
  fn identity(&self) -> &Identity;

  fn identity_mut(&mut self) -> &mut Identity;

  fn raw_id(&self) -> u64 { self.identity().raw_id() }

  /// Consume a record and return it managed under `id`.
  fn persisted(mut self, id: EntityId) -> Result<Self>
  where
    Self: Sized,
  {
    self.identity_mut().assign(id)?;
    Ok(self)
  }
}

/// Implements `PartialEq`, `Eq` and `Hash` for an entity by delegating to
/// its identity.
///
/// Do not key a hash collection on a mix of transient records and their
/// promoted copies: they compare equal but hash differently.
macro_rules! identity_semantics {
  ($ty:ty) => {
    impl PartialEq for $ty {
      fn eq(&self, other: &Self) -> bool {
        $crate::identity::Identifiable::identity(self)
          == $crate::identity::Identifiable::identity(other)
      }
    }

    impl Eq for $ty {}

    impl std::hash::Hash for $ty {
      fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(
          $crate::identity::Identifiable::identity(self),
          state,
        )
      }
    }
  };
}

pub(crate) use identity_semantics;

/// Serde adapter mapping `Option<EntityId>` to a raw `u64` (`0` = none).
mod raw_id {
  use serde::{Deserialize, Deserializer, Serializer};

  use super::EntityId;

  pub fn serialize<S: Serializer>(
    id: &Option<EntityId>,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(id.map_or(0, EntityId::get))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Option<EntityId>, D::Error> {
    let raw = u64::deserialize(deserializer)?;
    Ok(EntityId::new(raw).ok())
  }
}
