//! # map
//!
//! The memory-map side of the crate: the in-memory [`Catalog`] of message
//! definitions and the JSON loader that populates it.
//! Use `map::parse::from_file(...)` to build a SlotMap-backed catalog.
//! Key handlers live under `map::core` (key constants, name clamping,
//! message/field completion).
//!
//! [`Catalog`]: crate::map::types::catalog::Catalog

#[cfg(feature = "map")]
pub(crate) mod core;
#[cfg(feature = "map")]
pub mod parse;
pub mod types;
