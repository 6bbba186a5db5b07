//! Message bundles for labroster.
//!
//! A [`Catalog`] holds one flat `key -> text` map per locale, loaded from
//! TOML bundles. Nested tables flatten to dotted keys, so
//!
//! ```toml
//! [memberStatus]
//! PHD_STUDENT = "PhD Student"
//! ```
//!
//! defines `memberStatus.PHD_STUDENT`. A top-level `[root]` table holds
//! locale-independent entries. English and French bundles ship with the
//! crate; see [`Catalog::bundled`].

pub mod error;

use std::{collections::HashMap, fs, path::Path};

pub use error::{Error, Result};
use labroster_core::label::{Locale, MessageCatalog};

/// Bundle tag of the locale-independent entries.
pub const ROOT_BUNDLE: &str = "*";

const BUNDLED: &[(&str, &str)] = &[
  ("en", include_str!("../bundles/en.toml")),
  ("fr", include_str!("../bundles/fr.toml")),
];

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// Immutable-after-load message store.
///
/// Lookup for a locale tries its exact tag, then its language, then the
/// root entries. The root locale only sees root entries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  bundles: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
  pub fn new() -> Self { Self::default() }

  /// The English and French bundles compiled into the crate.
  pub fn bundled() -> Result<Self> {
    let mut catalog = Self::new();
    for (locale, text) in BUNDLED {
      catalog.add_toml_str(locale, text)?;
    }
    Ok(catalog)
  }

  pub fn from_toml_str(locale: &str, text: &str) -> Result<Self> {
    let mut catalog = Self::new();
    catalog.add_toml_str(locale, text)?;
    Ok(catalog)
  }

  /// Add the entries of a TOML bundle under `locale`, replacing existing
  /// entries with the same key.
  pub fn add_toml_str(&mut self, locale: &str, text: &str) -> Result<()> {
    let table: toml::Table = text.parse()?;
    let tag = bundle_tag(locale);
    let mut entries = HashMap::new();
    let mut root = HashMap::new();
    for (key, value) in table {
      if key == "root"
        && let toml::Value::Table(inner) = value
      {
        flatten_into(&mut root, "", inner)?;
      } else {
        flatten_value(&mut entries, key, value)?;
      }
    }
    tracing::debug!(
      locale = %tag,
      entries = entries.len(),
      root_entries = root.len(),
      "loaded message bundle"
    );
    self.extend(tag, entries);
    self.extend(ROOT_BUNDLE.to_string(), root);
    Ok(())
  }

  /// Load a bundle file. The file stem names the locale (`fr.toml`,
  /// `en_US.toml`); `root.toml` holds root entries.
  pub fn load_file(&mut self, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let locale = path
      .file_stem()
      .and_then(|stem| stem.to_str())
      .unwrap_or_default();
    self.add_toml_str(locale, &text)
  }

  pub fn insert(
    &mut self,
    locale: &str,
    key: impl Into<String>,
    text: impl Into<String>,
  ) {
    self
      .bundles
      .entry(bundle_tag(locale))
      .or_default()
      .insert(key.into(), text.into());
  }

  /// Merge `other` into this catalog; entries of `other` win.
  pub fn merge(&mut self, other: Catalog) {
    for (tag, entries) in other.bundles {
      self.extend(tag, entries);
    }
  }

  /// Bundle tags present in the catalog, root included as [`ROOT_BUNDLE`].
  pub fn locales(&self) -> impl Iterator<Item = &str> {
    self.bundles.keys().map(String::as_str)
  }

  pub fn get(&self, key: &str, locale: &Locale) -> Option<&str> {
    lookup_order(locale).into_iter().find_map(|tag| {
      self
        .bundles
        .get(&tag)
        .and_then(|entries| entries.get(key))
        .map(String::as_str)
    })
  }

  fn extend(&mut self, tag: String, entries: HashMap<String, String>) {
    if entries.is_empty() {
      return;
    }
    self.bundles.entry(tag).or_default().extend(entries);
  }
}

impl MessageCatalog for Catalog {
  fn message(&self, key: &str, locale: &Locale) -> Option<String> {
    self.get(key, locale).map(str::to_string)
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn bundle_tag(locale: &str) -> String {
  let locale = locale.trim();
  if locale.is_empty()
    || locale == ROOT_BUNDLE
    || locale.eq_ignore_ascii_case("root")
  {
    ROOT_BUNDLE.to_string()
  } else {
    Locale::new(locale).tag().to_ascii_lowercase()
  }
}

fn lookup_order(locale: &Locale) -> Vec<String> {
  if locale.is_root() {
    return vec![ROOT_BUNDLE.to_string()];
  }
  let tag = locale.tag().to_ascii_lowercase();
  let language = locale.language();
  let mut order = vec![tag];
  if !order.contains(&language) {
    order.push(language);
  }
  order.push(ROOT_BUNDLE.to_string());
  order
}

fn flatten_into(
  out: &mut HashMap<String, String>,
  prefix: &str,
  table: toml::Table,
) -> Result<()> {
  for (key, value) in table {
    let key = if prefix.is_empty() {
      key
    } else {
      format!("{prefix}.{key}")
    };
    flatten_value(out, key, value)?;
  }
  Ok(())
}

fn flatten_value(
  out: &mut HashMap<String, String>,
  key: String,
  value: toml::Value,
) -> Result<()> {
  match value {
    toml::Value::String(text) => {
      out.insert(key, text);
      Ok(())
    }
    toml::Value::Table(table) => flatten_into(out, &key, table),
    _ => Err(Error::NonStringValue { key }),
  }
}

#[cfg(test)]
mod tests;
