//! Runtime settings, read from `labroster.toml` and `LABROSTER_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;
use labroster_core::{
  clock::{Clock, FixedClock, SystemClock},
  label::Locale,
};
use labroster_messages::Catalog;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Locale used when a command does not pass `--locale`.
  #[serde(default = "default_locale")]
  pub locale:        String,
  /// Extra TOML bundles layered over the bundled messages, in order.
  #[serde(default)]
  pub catalog_paths: Vec<PathBuf>,
  /// Fixed reference date; the local date when absent.
  #[serde(default)]
  pub today:         Option<NaiveDate>,
}

fn default_locale() -> String { "en".to_string() }

/// `LABROSTER_*` variables; `LABROSTER_CATALOG_PATHS` is a comma-separated
/// list.
fn environment() -> config::Environment {
  config::Environment::with_prefix("LABROSTER")
    .try_parsing(true)
    .list_separator(",")
    .with_list_parse_key("catalog_paths")
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      locale:        default_locale(),
      catalog_paths: Vec::new(),
      today:         None,
    }
  }
}

impl Settings {
  /// Layer the optional file at `path` and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::load_with(path, environment())
  }

  fn load_with(
    path: &Path,
    environment: config::Environment,
  ) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(environment)
      .build()
      .with_context(|| format!("failed to read {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  /// The `--locale` flag when given, otherwise the configured locale.
  pub fn locale(&self, flag: Option<&str>) -> Locale {
    Locale::new(flag.unwrap_or(&self.locale))
  }

  pub fn today(&self) -> NaiveDate {
    match self.today {
      Some(date) => FixedClock(date).today(),
      None => SystemClock.today(),
    }
  }

  /// Bundled messages, then every configured bundle file.
  pub fn catalog(&self) -> anyhow::Result<Catalog> {
    let mut catalog =
      Catalog::bundled().context("failed to load bundled messages")?;
    for path in &self.catalog_paths {
      catalog
        .load_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
      tracing::debug!(path = %path.display(), "loaded extra message bundle");
    }
    Ok(catalog)
  }
}
