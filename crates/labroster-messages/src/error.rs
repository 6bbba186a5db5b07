//! Error types for message bundle loading.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),

  #[error("message {key} must be a string")]
  NonStringValue { key: String },

  #[error("cannot read bundle {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
