//! The message store boundary: FilterX never parses or owns log
//! records itself. It asks the host to resolve a field name to a handle
//! once (at parse/optimize time) and then asks the host to read or write
//! that field by handle at eval time.

use crate::object::{LogMessageValueType, SubscriptKey};
use crate::scratch::ScratchHandle;

/// Opaque identifier for a single bound log record. FilterX never looks
/// inside it; it is only ever round-tripped back into [`LogMessageStore`]
/// calls.
pub type MessageHandle = u64;

/// A single raw field read out of a message, still scratch-borrowed.
#[derive(Debug, Clone)]
pub struct RawFieldValue {
    pub handle: ScratchHandle,
    pub value_type: LogMessageValueType,
}

/// The read/write surface a host log-processing daemon exposes to FilterX
/// ("message store — field lookup by name or handle, field
/// mutation, structural subscripting into JSON-typed fields").
///
/// Implementations are free to be as clever as they like about field
/// storage (name-value pairs, a flattened JSON tree, a fixed schema); all
/// that's required is that a `field_id` obtained from [`Self::resolve_name`]
/// keeps meaning the same field for the lifetime of the store.
pub trait LogMessageStore {
    /// Resolves a field's textual name to a stable numeric id, registering
    /// it if this is the first time the name has been seen. Called once,
    /// by the compiler side, never on the eval hot path.
    fn resolve_name(&mut self, name: &str) -> u32;

    /// Reads a top-level field by id, writing its bytes into the given
    /// scratch guard and returning the handle plus its declared type.
    fn read_field(&self, message: MessageHandle, field_id: u32, scratch: &crate::scratch::ScratchGuard) -> Option<RawFieldValue>;

    /// Writes (or overwrites) a top-level field.
    fn write_field(&mut self, message: MessageHandle, field_id: u32, value_type: LogMessageValueType, bytes: &[u8]);

    /// Removes a top-level field, if present.
    fn unset_field(&mut self, message: MessageHandle, field_id: u32);

    /// Reads into a structurally-nested position within a JSON-typed field,
    /// per the `SubscriptKey` path from the field's root.
    fn read_nested(
        &self,
        message: MessageHandle,
        field_id: u32,
        path: &[SubscriptKey],
        scratch: &crate::scratch::ScratchGuard,
    ) -> Option<RawFieldValue>;
}

/// An in-memory message store good enough for tests and for embedding
/// FilterX where the host has no richer store of its own.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    names: ahash::AHashMap<String, u32>,
    records: ahash::AHashMap<MessageHandle, ahash::AHashMap<u32, (LogMessageValueType, Vec<u8>)>>,
}

impl InMemoryMessageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, message: MessageHandle, name: &str, value_type: LogMessageValueType, bytes: impl Into<Vec<u8>>) {
        let id = self.resolve_name(name);
        self.write_field(message, id, value_type, &bytes.into());
    }
}

impl LogMessageStore for InMemoryMessageStore {
    fn resolve_name(&mut self, name: &str) -> u32 {
        if let Some(id) = self.names.get(name) {
            return *id;
        }
        let id = self.names.len() as u32;
        self.names.insert(name.to_string(), id);
        id
    }

    fn read_field(&self, message: MessageHandle, field_id: u32, scratch: &crate::scratch::ScratchGuard) -> Option<RawFieldValue> {
        let (value_type, bytes) = self.records.get(&message)?.get(&field_id)?;
        let text = String::from_utf8_lossy(bytes);
        let handle = scratch.write(&text);
        Some(RawFieldValue { handle, value_type: *value_type })
    }

    fn write_field(&mut self, message: MessageHandle, field_id: u32, value_type: LogMessageValueType, bytes: &[u8]) {
        self.records
            .entry(message)
            .or_default()
            .insert(field_id, (value_type, bytes.to_vec()));
    }

    fn unset_field(&mut self, message: MessageHandle, field_id: u32) {
        if let Some(fields) = self.records.get_mut(&message) {
            fields.remove(&field_id);
        }
    }

    fn read_nested(
        &self,
        _message: MessageHandle,
        _field_id: u32,
        _path: &[SubscriptKey],
        _scratch: &crate::scratch::ScratchGuard,
    ) -> Option<RawFieldValue> {
        // The in-memory store keeps every field as flat bytes; nested
        // subscripting into a structured field is for a real JSON-backed
        // host implementation to provide.
        None
    }
}
