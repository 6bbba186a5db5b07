//! Command-line front end for labroster.
//!
//! Loads settings and message bundles, reads JSON rosters and renders the
//! status matrix, interval states and membership summaries as plain text.
//! The `labroster` binary is a thin wrapper around these modules.

pub mod render;
pub mod roster;
pub mod settings;

pub use roster::Roster;
pub use settings::Settings;
