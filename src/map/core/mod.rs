//! Loader internals: parsing state and the per-key handlers.

pub(crate) mod keys;

use crate::map::types::catalog::{Catalog, MessageKey};
use crate::map::types::field::Field;
use crate::map::types::message::Message;

/// Mutable state threaded through the key handlers while a map is parsed.
///
/// The loader always has one in-flight message and one in-flight field;
/// observing `dst_offset` completes the field, observing `dst_endian`
/// completes the message and opens the next one.
pub(crate) struct LoaderState {
    pub(crate) catalog: Catalog,
    /// The message currently being filled.
    pub(crate) current_msg: MessageKey,
    /// Whether any message-level key has landed on `current_msg` yet.
    pub(crate) msg_dirty: bool,
    /// The field currently being filled.
    pub(crate) current_field: Field,
}

impl LoaderState {
    pub(crate) fn new() -> Self {
        let mut catalog: Catalog = Catalog::default();
        let current_msg: MessageKey = catalog.add_message();
        LoaderState {
            catalog,
            current_msg,
            msg_dirty: false,
            current_field: Field::default(),
        }
    }

    /// The message currently being filled. Present for the whole parse.
    pub(crate) fn msg_mut(&mut self) -> Option<&mut Message> {
        self.catalog.get_message_by_key_mut(self.current_msg)
    }

    /// Opens a fresh in-flight message after `dst_endian` closed the
    /// previous one.
    pub(crate) fn next_message(&mut self) {
        self.current_msg = self.catalog.add_message();
        self.msg_dirty = false;
    }

    /// Finishes parsing and hands the catalog over.
    ///
    /// The trailing in-flight message is dropped when no message-level key
    /// was ever recorded on it; a well-formed map therefore yields exactly
    /// the messages it declares.
    pub(crate) fn finish(mut self) -> Catalog {
        if !self.msg_dirty {
            if let Some(msg) = self.catalog.get_message_by_key(self.current_msg)
                && !msg.fields.is_empty()
            {
                tracing::warn!("memory map ended with fields outside any message, dropped");
            }
            self.catalog.remove_message(self.current_msg);
        }
        self.catalog
    }
}
