//! Per-key handlers for the memory-map document.
//!
//! Unknown keys and unrecognized values are logged and skipped; the map
//! format grows over time and an old loader must keep reading new maps.

use serde_json::Value;

use crate::map::core::LoaderState;
use crate::map::types::message::Endianness;

/// Key name for the message id (hexadecimal string).
pub(crate) const ID_KEY: &str = "id";
/// Key name for the destination symbol.
pub(crate) const DST_SYMBOL_KEY: &str = "dst_symbol";
/// Key name for the source symbol.
pub(crate) const SRC_SYMBOL_KEY: &str = "src_symbol";
/// Key name for the message ops name.
pub(crate) const OPS_NAME_KEY: &str = "ops_name";
/// Key name for a field's ops name.
pub(crate) const OP_NAME_KEY: &str = "op_name";
/// Key name for the source endianness tag.
pub(crate) const SRC_ENDIAN_KEY: &str = "src_endian";
/// Key name for the destination endianness tag.
pub(crate) const DST_ENDIAN_KEY: &str = "dst_endian";
/// Key name for a field's bit length.
pub(crate) const LENGTH_KEY: &str = "length";
/// Key name for a field's source bit offset.
pub(crate) const SRC_OFFSET_KEY: &str = "src_offset";
/// Key name for a field's destination bit offset.
pub(crate) const DST_OFFSET_KEY: &str = "dst_offset";

/// Longest accepted ops/symbol name, in bytes.
pub(crate) const MAX_NAME_LEN: usize = 256;

/// Routes one scalar key/value pair to the matching handler.
pub(crate) fn load_scalar(key: &str, value: &Value, state: &mut LoaderState) {
    match value {
        Value::Number(number) => match number.as_u64() {
            Some(v) => load_int(key, v, state),
            None => tracing::warn!(key, %number, "non-integer number in memory map, skipped"),
        },
        Value::String(text) => load_string(key, text, state),
        _ => tracing::warn!(key, "unknown json value type in memory map, skipped"),
    }
}

/// Integer keys all belong to the in-flight field. Observing `dst_offset`
/// completes the field and appends it to the current message.
fn load_int(key: &str, value: u64, state: &mut LoaderState) {
    let value: u32 = match u32::try_from(value) {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(key, value, "value exceeds 32 bits, skipped");
            return;
        }
    };

    match key {
        LENGTH_KEY => state.current_field.bit_length = value,
        SRC_OFFSET_KEY => state.current_field.src_offset = value,
        DST_OFFSET_KEY => {
            state.current_field.dst_offset = value;
            let field = std::mem::take(&mut state.current_field);
            state.catalog.add_field(state.current_msg, field);
        }
        _ => tracing::warn!(key, value, "unknown integer key in memory map, skipped"),
    }
}

/// String keys fill the current message (or the in-flight field's name).
/// Observing `dst_endian` completes the message and opens the next one.
fn load_string(key: &str, value: &str, state: &mut LoaderState) {
    match key {
        ID_KEY => {
            let digits: &str = value.trim_start_matches("0x");
            match u32::from_str_radix(digits, 16) {
                Ok(id) => {
                    if let Some(msg) = state.msg_mut() {
                        msg.id = id;
                    }
                    state.msg_dirty = true;
                }
                Err(_) => tracing::warn!(key, value, "id is not a hexadecimal string, skipped"),
            }
        }
        DST_SYMBOL_KEY => {
            let name: String = clamp_name(key, value);
            if let Some(msg) = state.msg_mut() {
                msg.dst_symbol = name;
            }
            state.msg_dirty = true;
        }
        SRC_SYMBOL_KEY => {
            let name: String = clamp_name(key, value);
            if let Some(msg) = state.msg_mut() {
                msg.src_symbol = name;
            }
            state.msg_dirty = true;
        }
        OPS_NAME_KEY => {
            let name: String = clamp_name(key, value);
            if let Some(msg) = state.msg_mut() {
                msg.ops_name = name;
            }
            state.msg_dirty = true;
        }
        OP_NAME_KEY => {
            state.current_field.op_name = clamp_name(key, value);
        }
        SRC_ENDIAN_KEY => {
            match Endianness::from_tag(value) {
                Some(endian) => {
                    if let Some(msg) = state.msg_mut() {
                        msg.src_endian = endian;
                    }
                    state.msg_dirty = true;
                }
                None => tracing::warn!(key, value, "unknown endianness tag, skipped"),
            }
        }
        DST_ENDIAN_KEY => {
            match Endianness::from_tag(value) {
                Some(endian) => {
                    if let Some(msg) = state.msg_mut() {
                        msg.dst_endian = endian;
                    }
                }
                None => tracing::warn!(key, value, "unknown endianness tag, skipped"),
            }
            // The destination endianness is the last message key; close the
            // message out either way.
            state.next_message();
        }
        _ => tracing::warn!(key, value, "unknown string key in memory map, skipped"),
    }
}

/// Clamps a name to [`MAX_NAME_LEN`] bytes on a character boundary.
fn clamp_name(key: &str, value: &str) -> String {
    if value.len() <= MAX_NAME_LEN {
        return value.to_string();
    }
    let mut end: usize = MAX_NAME_LEN;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    tracing::warn!(key, limit = MAX_NAME_LEN, "name too long, clamped");
    value[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_completes_on_dst_offset() {
        let mut state = LoaderState::new();
        load_scalar(OP_NAME_KEY, &Value::from("synch"), &mut state);
        load_scalar(LENGTH_KEY, &Value::from(16u32), &mut state);
        load_scalar(SRC_OFFSET_KEY, &Value::from(128u32), &mut state);

        // Nothing appended until the destination offset shows up.
        assert!(state.catalog.get_message_by_key(state.current_msg).unwrap().fields.is_empty());

        load_scalar(DST_OFFSET_KEY, &Value::from(136u32), &mut state);
        let msg = state.catalog.get_message_by_key(state.current_msg).unwrap();
        assert_eq!(msg.fields.len(), 1);
        assert_eq!(msg.fields[0].op_name, "synch");
        assert_eq!(msg.fields[0].bit_length, 16);
        assert_eq!(msg.fields[0].src_offset, 128);
        assert_eq!(msg.fields[0].dst_offset, 136);

        // The in-flight field was reset for the next one.
        assert_eq!(state.current_field, crate::map::types::field::Field::default());
    }

    #[test]
    fn message_completes_on_dst_endian() {
        let mut state = LoaderState::new();
        let first = state.current_msg;
        load_scalar(ID_KEY, &Value::from("0881"), &mut state);
        load_scalar(SRC_ENDIAN_KEY, &Value::from("B"), &mut state);
        load_scalar(DST_ENDIAN_KEY, &Value::from("L"), &mut state);

        let msg = state.catalog.get_message_by_key(first).unwrap();
        assert_eq!(msg.id, 0x881);
        assert_eq!(msg.src_endian, Endianness::Big);
        assert_eq!(msg.dst_endian, Endianness::Little);

        // A fresh message is now in flight.
        assert_ne!(state.current_msg, first);
        assert!(!state.msg_dirty);
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let mut state = LoaderState::new();
        load_scalar("comment", &Value::from("free text"), &mut state);
        load_scalar("version", &Value::from(3u32), &mut state);
        assert!(!state.msg_dirty);
        assert_eq!(state.current_field, crate::map::types::field::Field::default());
    }

    #[test]
    fn bad_endian_tag_still_closes_the_message() {
        let mut state = LoaderState::new();
        let first = state.current_msg;
        load_scalar(ID_KEY, &Value::from("10"), &mut state);
        load_scalar(DST_ENDIAN_KEY, &Value::from("network"), &mut state);
        assert_ne!(state.current_msg, first);
        // Tag was unusable, so the default survives.
        let msg = state.catalog.get_message_by_key(first).unwrap();
        assert_eq!(msg.dst_endian, Endianness::Little);
    }

    #[test]
    fn id_accepts_bare_and_prefixed_hex() {
        let mut state = LoaderState::new();
        load_scalar(ID_KEY, &Value::from("0881"), &mut state);
        assert_eq!(state.catalog.get_message_by_key(state.current_msg).unwrap().id, 0x881);
        load_scalar(ID_KEY, &Value::from("0x1F0"), &mut state);
        assert_eq!(state.catalog.get_message_by_key(state.current_msg).unwrap().id, 0x1F0);
        // Garbage leaves the previous value alone.
        load_scalar(ID_KEY, &Value::from("zz"), &mut state);
        assert_eq!(state.catalog.get_message_by_key(state.current_msg).unwrap().id, 0x1F0);
    }

    #[test]
    fn overlong_names_are_clamped() {
        let mut state = LoaderState::new();
        let long: String = "x".repeat(300);
        load_scalar(OP_NAME_KEY, &Value::from(long.as_str()), &mut state);
        assert_eq!(state.current_field.op_name.len(), MAX_NAME_LEN);
    }
}
