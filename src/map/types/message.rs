use serde_derive::{Deserialize, Serialize};

use crate::map::types::field::Field;

/// Definition of one translatable message, as described by the memory map.
///
/// Holds the numeric identifier, the ops name, the source/destination symbol
/// names of the two ABI-specific structures, the per-side endianness tags,
/// and the ordered field list. Field order is map order and is the order the
/// translator visits them.
#[derive(Default, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Numeric identifier (hexadecimal string in the map).
    pub id: u32,
    /// Ops name alias for the identifier.
    pub ops_name: String,
    /// Symbol name of the source-side structure.
    pub src_symbol: String,
    /// Symbol name of the destination-side structure.
    pub dst_symbol: String,
    /// Source-side endianness tag.
    pub src_endian: Endianness,
    /// Destination-side endianness tag.
    pub dst_endian: Endianness,
    /// Fields in map order.
    pub fields: Vec<Field>,
}

impl Message {
    /// Total bits named by the field list (sum of lengths, gaps excluded).
    pub fn mapped_bits(&self) -> u64 {
        self.fields.iter().map(|f| u64::from(f.bit_length)).sum()
    }

    /// Resets all fields to their default values.
    pub fn clear(&mut self) {
        *self = Message::default();
    }
}

/// Byte-order tag carried per message side.
///
/// Recorded from the map and surfaced to callers; the translation engine
/// itself never swaps bytes. The map author is responsible for describing
/// already-compatible byte orders.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Endianness {
    /// Little endian, `"L"` in the map.
    #[default]
    #[serde(rename = "L")]
    Little,
    /// Big endian, `"B"` in the map.
    #[serde(rename = "B")]
    Big,
}

impl Endianness {
    /// Decodes the single-letter map tag. Returns `None` for anything else.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "L" => Some(Endianness::Little),
            "B" => Some(Endianness::Big),
            _ => None,
        }
    }

    /// The single-letter map tag for this value.
    pub fn tag(&self) -> &'static str {
        match self {
            Endianness::Little => "L",
            Endianness::Big => "B",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endianness_tags_round_trip() {
        assert_eq!(Endianness::from_tag("L"), Some(Endianness::Little));
        assert_eq!(Endianness::from_tag("B"), Some(Endianness::Big));
        assert_eq!(Endianness::from_tag("l"), None);
        assert_eq!(Endianness::from_tag("big"), None);
        assert_eq!(Endianness::Little.tag(), "L");
        assert_eq!(Endianness::Big.tag(), "B");
    }

    #[test]
    fn mapped_bits_sums_field_lengths() {
        let msg = Message {
            fields: vec![
                Field {
                    op_name: "a".to_string(),
                    bit_length: 16,
                    src_offset: 0,
                    dst_offset: 0,
                },
                Field {
                    op_name: "b".to_string(),
                    bit_length: 3,
                    src_offset: 16,
                    dst_offset: 16,
                },
            ],
            ..Default::default()
        };
        assert_eq!(msg.mapped_bits(), 19);
    }
}
