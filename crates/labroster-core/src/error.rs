//! Error types for `labroster-core`.

use thiserror::Error;

use crate::identity::EntityId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid member status: {0:?}")]
  InvalidMemberStatus(String),

  #[error("invalid gender: {0:?}")]
  InvalidGender(String),

  #[error("invalid date {value:?}: {source}")]
  InvalidDate {
    value:  String,
    #[source]
    source: chrono::ParseError,
  },

  #[error("record already has id {current}, cannot assign {requested}")]
  IdentityAlreadyAssigned {
    current:   EntityId,
    requested: EntityId,
  },

  #[error("entity ids must be non-zero")]
  ZeroEntityId,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
