pub mod catalog;
#[cfg(feature = "map")]
pub mod errors;
pub mod field;
pub mod message;
