//! Core types for the labroster member records engine.
//!
//! This crate is deliberately free of I/O. It holds the member status
//! matrix, the membership interval algebra and the identity rules shared by
//! every entity. Message storage, persistence and presentation live in
//! other crates and talk to this one through [`label::MessageCatalog`] and
//! [`identity::Identity::raw_id`].

pub mod clock;
pub mod error;
pub mod gender;
pub mod identity;
pub mod interval;
pub mod label;
pub mod membership;
pub mod organization;
pub mod person;
pub mod recent;
pub mod stats;
pub mod status;

pub use error::{Error, Result};
