//! Localized, gendered, tense-aware labels for member statuses.
//!
//! The engine owns the key convention and the fallback chain; the strings
//! themselves come from a [`MessageCatalog`] supplied by the caller.
//!
//! Keys live in the `memberStatus.` namespace:
//!
//! | form                     | key                                   |
//! |--------------------------|---------------------------------------|
//! | present, gendered        | `memberStatus.PHD_STUDENT_FEMALE`     |
//! | present, not specified   | `memberStatus.PHD_STUDENT`            |
//! | former, gendered         | `memberStatus.PHD_STUDENT_former_MALE`|
//! | former, not specified    | `memberStatus.PHD_STUDENT_former`     |
//! | former prefix word       | `memberStatus.former_prefix`          |
//! | acronym (root locale)    | `memberStatus.PHD_STUDENT_acronym`    |
//! | civil title              | `memberStatus.PHD_STUDENT_title`      |

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{gender::Gender, status::MemberStatus};

pub const MESSAGE_PREFIX: &str = "memberStatus.";
pub const FORMER_PREFIX_KEY: &str = "memberStatus.former_prefix";

// ─── Locale ──────────────────────────────────────────────────────────────────

/// A language tag such as `en`, `en-US` or `fr-FR`.
///
/// There is no process-wide default; callers pass the locale explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
  pub fn new(tag: &str) -> Self { Self(tag.trim().replace('_', "-")) }

  /// The locale-independent root locale.
  pub fn root() -> Self { Self(String::new()) }

  pub fn is_root(&self) -> bool { self.0.is_empty() }

  pub fn tag(&self) -> &str { &self.0 }

  /// Primary language subtag, lowercased (`fr` for `fr-FR`).
  pub fn language(&self) -> String {
    self
      .0
      .split('-')
      .next()
      .unwrap_or_default()
      .to_ascii_lowercase()
  }
}

impl From<String> for Locale {
  fn from(tag: String) -> Self { Self::new(&tag) }
}

impl From<Locale> for String {
  fn from(locale: Locale) -> Self { locale.0 }
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Catalog contract ────────────────────────────────────────────────────────

/// Source of localized strings: "given a key and a locale, produce a string
/// or nothing". How the strings are stored is the implementor's business.
pub trait MessageCatalog {
  fn message(&self, key: &str, locale: &Locale) -> Option<String>;
}

impl<C: MessageCatalog + ?Sized> MessageCatalog for &C {
  fn message(&self, key: &str, locale: &Locale) -> Option<String> {
    (**self).message(key, locale)
  }
}

/// A plain map ignores the locale.
impl MessageCatalog for HashMap<String, String> {
  fn message(&self, key: &str, _locale: &Locale) -> Option<String> {
    self.get(key).cloned()
  }
}

/// Catalog lookup where a blank entry counts as missing.
pub fn lookup<C: MessageCatalog + ?Sized>(
  catalog: &C,
  key: &str,
  locale: &Locale,
) -> Option<String> {
  catalog
    .message(key, locale)
    .filter(|text| !text.trim().is_empty())
}

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Key of a status label. `gender` of [`Gender::NotSpecified`] yields the
/// unsuffixed key.
pub fn label_key(status: MemberStatus, gender: Gender, former: bool) -> String {
  let mut key = format!("{MESSAGE_PREFIX}{}", status.name());
  if former {
    key.push_str("_former");
  }
  if let Some(suffix) = gender.key_suffix() {
    key.push('_');
    key.push_str(suffix);
  }
  key
}

pub fn acronym_key(status: MemberStatus) -> String {
  format!("{MESSAGE_PREFIX}{}_acronym", status.name())
}

pub fn title_key(status: MemberStatus) -> String {
  format!("{MESSAGE_PREFIX}{}_title", status.name())
}

/// Keys to try for one tense, most specific first.
fn candidate_keys(
  status: MemberStatus,
  gender: Gender,
  former: bool,
) -> Vec<String> {
  let mut keys = Vec::with_capacity(2);
  if gender != Gender::NotSpecified {
    keys.push(label_key(status, gender, former));
  }
  keys.push(label_key(status, Gender::NotSpecified, former));
  keys
}

fn first_match<C: MessageCatalog + ?Sized>(
  catalog: &C,
  keys: &[String],
  locale: &Locale,
) -> Option<String> {
  keys.iter().find_map(|key| {
    let found = lookup(catalog, key, locale);
    if found.is_none() {
      tracing::trace!(%key, %locale, "no catalog entry");
    }
    found
  })
}

// ─── Resolution steps ────────────────────────────────────────────────────────

/// Present-tense label: gendered entry, then the not-specified entry.
pub fn resolve_present<C: MessageCatalog + ?Sized>(
  catalog: &C,
  status: MemberStatus,
  gender: Gender,
  locale: &Locale,
) -> Option<String> {
  first_match(catalog, &candidate_keys(status, gender, false), locale)
}

/// Former label composed by the catalog itself: gendered former entry,
/// then the not-specified former entry.
pub fn resolve_composed_former<C: MessageCatalog + ?Sized>(
  catalog: &C,
  status: MemberStatus,
  gender: Gender,
  locale: &Locale,
) -> Option<String> {
  first_match(catalog, &candidate_keys(status, gender, true), locale)
}

/// Former label built from the locale's invariant prefix word and the
/// present-tense label.
pub fn resolve_prefixed_former<C: MessageCatalog + ?Sized>(
  catalog: &C,
  status: MemberStatus,
  gender: Gender,
  locale: &Locale,
) -> Option<String> {
  let prefix = lookup(catalog, FORMER_PREFIX_KEY, locale)?;
  let present = resolve_present(catalog, status, gender, locale)?;
  Some(format!("{} {present}", prefix.trim_end()))
}

/// Full resolution chain. Falls back to the canonical status name so the
/// result is never empty.
pub fn resolve_label<C: MessageCatalog + ?Sized>(
  catalog: &C,
  status: MemberStatus,
  gender: Gender,
  former: bool,
  locale: &Locale,
) -> String {
  let resolved = if former {
    resolve_composed_former(catalog, status, gender, locale)
      .or_else(|| resolve_prefixed_former(catalog, status, gender, locale))
  } else {
    resolve_present(catalog, status, gender, locale)
  };

  resolved.unwrap_or_else(|| {
    tracing::debug!(
      status = status.name(),
      %locale,
      former,
      "label missing from catalog, using canonical name"
    );
    status.name().to_string()
  })
}
