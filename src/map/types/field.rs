use serde_derive::{Deserialize, Serialize};

/// Definition of a single field within a translation message.
///
/// Offsets and length are in **bits**, counted from the start of the
/// respective buffer with MSB-first numbering (bit 0 is the top of byte 0).
/// A field never changes once appended to its parent [`Message`].
///
/// [`Message`]: crate::map::types::message::Message
#[derive(Default, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Field {
    /// Ops name alias for the field.
    pub op_name: String,
    /// Number of bits to copy. Any positive value, not restricted to byte multiples.
    pub bit_length: u32,
    /// Bit position in the source-shaped buffer.
    pub src_offset: u32,
    /// Bit position in the destination-shaped buffer.
    pub dst_offset: u32,
}

impl Field {
    /// Resets all fields to their default values.
    pub fn clear(&mut self) {
        *self = Field::default();
    }
}
