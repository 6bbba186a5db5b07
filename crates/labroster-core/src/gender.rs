//! Grammatical gender used for label agreement.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

use crate::Error;

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  EnumIter,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
  #[default]
  NotSpecified,
  Male,
  Female,
  Other,
}

impl Gender {
  /// Suffix of gender-specific message keys; `None` for
  /// [`Gender::NotSpecified`], whose messages carry no suffix.
  pub fn key_suffix(self) -> Option<&'static str> {
    match self {
      Self::NotSpecified => None,
      other => Some(other.into()),
    }
  }
}

impl FromStr for Gender {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "NOT_SPECIFIED" => Ok(Self::NotSpecified),
      "MALE" => Ok(Self::Male),
      "FEMALE" => Ok(Self::Female),
      "OTHER" => Ok(Self::Other),
      _ => Err(Error::InvalidGender(s.to_string())),
    }
  }
}
