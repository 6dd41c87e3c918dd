//! # tlm_remap
//!
//! Rust utilities for **bit-granular translation** of telemetry/command
//! packets between two Application Binary Interfaces (ABIs).
//!
//! ## Highlights
//! - **Memory-map loader**: load a JSON memory map into a SlotMap-backed
//!   [`Catalog`](crate::map::types::catalog::Catalog) of message definitions.
//! - **Stable keys**: messages use SlotMap keys that remain valid across reordering.
//! - **Four lookup axes**: `find_by_id`, `find_by_ops_name`, `find_by_src_symbol`,
//!   `find_by_dst_symbol`, all first-match in map order.
//! - **Bitwise copy**: [`copy_bits`](crate::translate::bitcopy::copy_bits) moves
//!   arbitrary bit ranges between unaligned buffers, MSB-first, preserving every
//!   destination bit outside the target range.
//! - **Buffer translation**: [`translate_buffer`](crate::translate::buffer::translate_buffer)
//!   walks a message's fields in map order, forward or reverse, and reports the
//!   bytes covered.
//! - **CCSDS helpers**: primary-header sizes and stream-id extraction in
//!   [`ccsds`](crate::ccsds).
//!
//! The engine copies bits; it does not interpret them. Endianness tags from the
//! map are recorded and surfaced but no byte swapping is performed.

pub mod ccsds;
pub mod map;
pub mod translate;

// Convenience re-exports for the common call path
pub use crate::map::types::catalog::{Catalog, MessageKey};
pub use crate::map::types::field::Field;
pub use crate::map::types::message::{Endianness, Message};
pub use crate::translate::buffer::{Direction, TranslateError, translate_buffer};
