//! Minimal JSON object construction for request bodies
//!
//! Request bodies assembled from key/value pairs or from a caller-supplied
//! builder callback go through [`JsonObject`], a fixed-capacity,
//! insertion-ordered string map serialized with `serde-json-core`. This is
//! deliberately not a general JSON document model: bodies built here are
//! small flat objects, and everything lives in `heapless` storage so the
//! serializer can run without a heap.

use heapless::{String, Vec};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Error;

/// Maximum number of members in a [`JsonObject`].
pub const MAX_JSON_ENTRIES: usize = 16;
/// Maximum length of a member key.
pub const MAX_JSON_KEY_LEN: usize = 32;
/// Maximum length of a member value.
pub const MAX_JSON_VALUE_LEN: usize = 128;
/// Capacity of the serialized output buffer produced by [`build_json`].
pub const JSON_BUFFER_SIZE: usize = 1024;

/// A flat, insertion-ordered JSON object with string members.
///
/// Duplicate keys collapse to the latest value (last-write-wins), matching
/// the header-map semantics elsewhere in the engine.
#[derive(Debug, Default)]
pub struct JsonObject {
    entries: Vec<(String<MAX_JSON_KEY_LEN>, String<MAX_JSON_VALUE_LEN>), MAX_JSON_ENTRIES>,
}

impl JsonObject {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any existing member with the same
    /// key.
    ///
    /// Fails with [`Error::BufferOverflow`] when the key or value exceeds its
    /// fixed capacity, or when the object is full.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let value = String::try_from(value).map_err(|_| Error::BufferOverflow)?;
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
            return Ok(());
        }
        let key = String::try_from(key).map_err(|_| Error::BufferOverflow)?;
        self.entries
            .push((key, value))
            .map_err(|_| Error::BufferOverflow)
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the object has no members.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for JsonObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.as_str(), value.as_str())?;
        }
        map.end()
    }
}

/// Builds a serialized JSON object by handing an empty [`JsonObject`] to the
/// given population callback.
///
/// A body that does not fit [`JSON_BUFFER_SIZE`] degrades to an empty buffer
/// rather than failing the request.
pub fn build_json<F>(populate: F) -> Vec<u8, JSON_BUFFER_SIZE>
where
    F: FnOnce(&mut JsonObject),
{
    let mut root = JsonObject::new();
    populate(&mut root);
    serde_json_core::to_vec(&root).unwrap_or_default()
}
