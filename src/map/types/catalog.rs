//! Catalog model (SlotMap-backed).
//!
//! This module defines the in-memory **message catalog** populated by the
//! memory-map loader. Storage uses a **SlotMap** arena with stable
//! [`MessageKey`] handles plus an order vector so that iteration and lookups
//! follow map order.
//!
//! Lookups scan in insertion order and return the **first** match; the
//! catalog enforces no uniqueness across messages. String comparisons are
//! exact and byte-wise (symbol names are C identifiers, case matters), and
//! the empty string is a legal key that matches a message whose
//! corresponding field is empty.

use slotmap::{SlotMap, new_key_type};

use crate::map::types::field::Field;
use crate::map::types::message::Message;

new_key_type! { pub struct MessageKey; }

/// In-memory registry of translation message definitions.
///
/// Created empty, populated once by the map loader, then queried read-only
/// by translation clients. The catalog exclusively owns its messages, and
/// messages own their fields.
#[derive(Default, Clone, Debug)]
pub struct Catalog {
    /// Main storage (stable-key arena).
    pub messages: SlotMap<MessageKey, Message>,
    /// Keys in map order.
    pub messages_order: Vec<MessageKey>,
}

impl Catalog {
    /// Appends an empty message and returns its key.
    ///
    /// The key acts as the "current message" cursor while the loader is
    /// parsing; subsequent field additions target it.
    pub fn add_message(&mut self) -> MessageKey {
        let key: MessageKey = self.messages.insert(Message::default());
        self.messages_order.push(key);
        key
    }

    /// Appends a field to the message identified by `key`.
    ///
    /// A stale key is ignored with a diagnostic; the field is dropped.
    pub fn add_field(&mut self, key: MessageKey, field: Field) {
        match self.messages.get_mut(key) {
            Some(msg) => msg.fields.push(field),
            None => {
                tracing::warn!(op_name = %field.op_name, "field added with stale message key, dropped");
            }
        }
    }

    /// Removes a message (and its fields) from the catalog.
    pub fn remove_message(&mut self, key: MessageKey) -> Option<Message> {
        let removed: Option<Message> = self.messages.remove(key);
        if removed.is_some() {
            self.messages_order.retain(|&k| k != key);
        }
        removed
    }

    pub fn get_message_by_key(&self, key: MessageKey) -> Option<&Message> {
        self.messages.get(key)
    }

    pub fn get_message_by_key_mut(&mut self, key: MessageKey) -> Option<&mut Message> {
        self.messages.get_mut(key)
    }

    /// Returns the first message (in map order) with the given numeric id.
    pub fn find_by_id(&self, id: u32) -> Option<&Message> {
        self.iter_messages().find(|m| m.id == id)
    }

    /// Returns the first message (in map order) with the given ops name.
    pub fn find_by_ops_name(&self, ops_name: &str) -> Option<&Message> {
        self.iter_messages().find(|m| m.ops_name == ops_name)
    }

    /// Returns the first message (in map order) with the given source symbol.
    pub fn find_by_src_symbol(&self, src_symbol: &str) -> Option<&Message> {
        self.iter_messages().find(|m| m.src_symbol == src_symbol)
    }

    /// Returns the first message (in map order) with the given destination symbol.
    pub fn find_by_dst_symbol(&self, dst_symbol: &str) -> Option<&Message> {
        self.iter_messages().find(|m| m.dst_symbol == dst_symbol)
    }

    /// Iterate messages following `messages_order`.
    pub fn iter_messages(&self) -> impl Iterator<Item = &Message> + '_ {
        self.messages_order
            .iter()
            .filter_map(|&k| self.messages.get(k))
    }

    /// Number of messages in the catalog.
    pub fn len(&self) -> usize {
        self.messages_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages_order.is_empty()
    }

    /// Clear the catalog.
    pub fn clear(&mut self) {
        *self = Catalog::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::types::message::Endianness;

    fn msg(id: u32, ops: &str, src: &str, dst: &str) -> Message {
        Message {
            id,
            ops_name: ops.to_string(),
            src_symbol: src.to_string(),
            dst_symbol: dst.to_string(),
            ..Default::default()
        }
    }

    fn catalog_with(messages: Vec<Message>) -> Catalog {
        let mut cat = Catalog::default();
        for m in messages {
            let key = cat.add_message();
            *cat.get_message_by_key_mut(key).unwrap() = m;
        }
        cat
    }

    #[test]
    fn add_message_and_field() {
        let mut cat = Catalog::default();
        let key = cat.add_message();
        cat.add_field(
            key,
            Field {
                op_name: "synch".to_string(),
                bit_length: 16,
                src_offset: 128,
                dst_offset: 128,
            },
        );
        cat.add_field(
            key,
            Field {
                op_name: "flags".to_string(),
                bit_length: 4,
                src_offset: 144,
                dst_offset: 144,
            },
        );

        let m = cat.get_message_by_key(key).unwrap();
        assert_eq!(m.fields.len(), 2);
        // insertion order is preserved
        assert_eq!(m.fields[0].op_name, "synch");
        assert_eq!(m.fields[1].op_name, "flags");
    }

    #[test]
    fn add_field_with_stale_key_is_ignored() {
        let mut cat = Catalog::default();
        let key = cat.add_message();
        cat.remove_message(key);
        cat.add_field(key, Field::default());
        assert!(cat.is_empty());
    }

    #[test]
    fn find_by_each_axis() {
        let cat = catalog_with(vec![
            msg(0x881, "TDT_HK", "test_data_types_src", "test_data_types_dst"),
            msg(0x900, "GPS_HK", "gps_tlm_src", "gps_tlm_dst"),
        ]);

        assert_eq!(cat.find_by_id(0x881).unwrap().ops_name, "TDT_HK");
        assert_eq!(cat.find_by_ops_name("GPS_HK").unwrap().id, 0x900);
        assert_eq!(cat.find_by_src_symbol("gps_tlm_src").unwrap().id, 0x900);
        assert_eq!(cat.find_by_dst_symbol("test_data_types_dst").unwrap().id, 0x881);

        assert!(cat.find_by_id(0).is_none());
        assert!(cat.find_by_ops_name("NOPE").is_none());
        assert!(cat.find_by_src_symbol("").is_none());
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let cat = catalog_with(vec![msg(1, "TDT_HK", "src", "dst")]);
        assert!(cat.find_by_ops_name("tdt_hk").is_none());
    }

    #[test]
    fn duplicate_keys_return_first_in_map_order() {
        let mut first = msg(7, "DUP", "s1", "d1");
        first.src_endian = Endianness::Big;
        let cat = catalog_with(vec![first, msg(7, "DUP", "s2", "d2")]);

        let hit = cat.find_by_id(7).unwrap();
        assert_eq!(hit.src_symbol, "s1");
        let hit = cat.find_by_ops_name("DUP").unwrap();
        assert_eq!(hit.dst_symbol, "d1");
    }

    #[test]
    fn empty_string_matches_empty_field() {
        let cat = catalog_with(vec![msg(3, "", "src_only", "")]);
        assert_eq!(cat.find_by_ops_name("").unwrap().id, 3);
        assert_eq!(cat.find_by_dst_symbol("").unwrap().id, 3);
    }
}
