//! # translate
//!
//! The translation engine: the bitwise copy primitive
//! ([`bitcopy::copy_bits`]) and the field-by-field buffer translator
//! ([`buffer::translate_buffer`]). Both are pure CPU and memory; they
//! allocate nothing and retain no borrows past the call.

pub mod bitcopy;
pub mod buffer;

pub use buffer::{Direction, TranslateError, translate_buffer};
