//! Named-slot persistence contracts, versioned slot envelopes, and migration helpers.
//!
//! A slot is one named record in a synchronous key/value text store (the browser's
//! `localStorage` in production). Every value written through [`save_slot_with`] is wrapped in a
//! [`SlotEnvelope`] carrying an app-defined schema version. Values written before envelopes
//! existed decode as schema version `0`.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Version for [`SlotEnvelope`] metadata serialization.
pub const SLOT_ENVELOPE_VERSION: u32 = 1;
/// Schema version assigned to raw (pre-envelope) slot values.
pub const LEGACY_SLOT_SCHEMA_VERSION: u32 = 0;

thread_local! {
    static LAST_WRITE_STAMP_MS: Cell<u64> = const { Cell::new(0) };
}

fn wall_clock_ms() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Write stamp for a new envelope: wall-clock milliseconds, bumped past the previous stamp so
/// envelopes written within one millisecond stay ordered.
fn next_write_stamp_ms() -> u64 {
    LAST_WRITE_STAMP_MS.with(|last| {
        let stamp = wall_clock_ms().max(last.get() + 1);
        last.set(stamp);
        stamp
    })
}

/// Synchronous text store keyed by slot name.
///
/// Implementations must never fail on a missing key: absence is `Ok(None)`.
pub trait SlotStore {
    /// Loads the raw text stored under `slot`.
    fn load_slot(&self, slot: &str) -> Result<Option<String>, String>;

    /// Saves raw text under `slot`, replacing any prior content.
    fn save_slot(&self, slot: &str, raw: &str) -> Result<(), String>;

    /// Deletes `slot`. Deleting a missing slot succeeds.
    fn delete_slot(&self, slot: &str) -> Result<(), String>;
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn load_slot(&self, slot: &str) -> Result<Option<String>, String> {
        (**self).load_slot(slot)
    }

    fn save_slot(&self, slot: &str, raw: &str) -> Result<(), String> {
        (**self).save_slot(slot, raw)
    }

    fn delete_slot(&self, slot: &str) -> Result<(), String> {
        (**self).delete_slot(slot)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Slot store that remembers nothing. Used on targets without browser storage.
pub struct NoopSlotStore;

impl SlotStore for NoopSlotStore {
    fn load_slot(&self, _slot: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn save_slot(&self, _slot: &str, _raw: &str) -> Result<(), String> {
        Ok(())
    }

    fn delete_slot(&self, _slot: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory slot store. Clones share the same backing map.
pub struct MemorySlotStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySlotStore {
    /// Returns the sorted list of slots currently present.
    pub fn slot_names(&self) -> Vec<String> {
        let mut names = self.inner.borrow().keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }
}

impl SlotStore for MemorySlotStore {
    fn load_slot(&self, slot: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(slot).cloned())
    }

    fn save_slot(&self, slot: &str, raw: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(slot.to_string(), raw.to_string());
        Ok(())
    }

    fn delete_slot(&self, slot: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(slot);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Versioned wrapper for one persisted slot value.
pub struct SlotEnvelope {
    /// Envelope schema version.
    pub envelope_version: u32,
    /// Slot name the payload belongs to.
    pub slot: String,
    /// App-defined schema version for the payload.
    pub schema_version: u32,
    /// Last write time in unix milliseconds.
    pub updated_at_unix_ms: u64,
    /// Serialized payload.
    pub payload: Value,
}

impl SlotEnvelope {
    /// Creates an envelope stamped with a monotonic write time.
    pub fn new(slot: impl Into<String>, schema_version: u32, payload: Value) -> Self {
        Self {
            envelope_version: SLOT_ENVELOPE_VERSION,
            slot: slot.into(),
            schema_version,
            updated_at_unix_ms: next_write_stamp_ms(),
            payload,
        }
    }

    /// Decodes raw slot text into an envelope.
    ///
    /// Text that is not an envelope is treated as a legacy value: JSON text becomes the payload
    /// as-is, and non-JSON text (bare strings such as `dark`) becomes a JSON string payload.
    pub fn decode(slot: &str, raw: &str) -> Self {
        if let Ok(envelope) = serde_json::from_str::<SlotEnvelope>(raw) {
            if envelope.slot == slot {
                return envelope;
            }
        }

        let payload = serde_json::from_str::<Value>(raw)
            .unwrap_or_else(|_| Value::String(raw.to_string()));
        Self {
            envelope_version: SLOT_ENVELOPE_VERSION,
            slot: slot.to_string(),
            schema_version: LEGACY_SLOT_SCHEMA_VERSION,
            updated_at_unix_ms: 0,
            payload,
        }
    }
}

/// Builds a [`SlotEnvelope`] from a serializable payload.
///
/// # Errors
///
/// Returns an error when `payload` cannot be converted to JSON.
pub fn build_slot_envelope<T: Serialize>(
    slot: &str,
    schema_version: u32,
    payload: &T,
) -> Result<SlotEnvelope, String> {
    let payload = serde_json::to_value(payload).map_err(|e| e.to_string())?;
    Ok(SlotEnvelope::new(slot, schema_version, payload))
}

/// Deserializes an envelope payload into a target type.
///
/// # Errors
///
/// Returns an error when deserialization fails.
pub fn decode_envelope_payload<T: DeserializeOwned>(envelope: &SlotEnvelope) -> Result<T, String> {
    serde_json::from_value(envelope.payload.clone()).map_err(|e| e.to_string())
}

/// Serializes `value` into a versioned envelope and saves it under `slot`.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_slot_with<S: SlotStore + ?Sized, T: Serialize>(
    store: &S,
    slot: &str,
    schema_version: u32,
    value: &T,
) -> Result<(), String> {
    let envelope = build_slot_envelope(slot, schema_version, value)?;
    let raw = serde_json::to_string(&envelope).map_err(|e| e.to_string())?;
    store.save_slot(slot, &raw)
}

/// Loads a slot written at exactly `schema_version`.
///
/// Any other schema version is reported as an error; use [`load_slot_with_migration`] when older
/// payloads must be upgraded.
///
/// # Errors
///
/// Returns an error when the store read fails, the schema version differs, or the payload does
/// not decode.
pub fn load_slot_with<S: SlotStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    slot: &str,
    schema_version: u32,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_slot(slot)? else {
        return Ok(None);
    };
    let envelope = SlotEnvelope::decode(slot, &raw);
    if envelope.schema_version != schema_version {
        return Err(format!(
            "slot `{slot}` has schema {} (expected {schema_version})",
            envelope.schema_version
        ));
    }
    decode_envelope_payload(&envelope).map(Some)
}

/// Loads a slot and upgrades older payloads through `migrate`.
///
/// - current schema: decoded directly
/// - older schema: `migrate(schema_version, &envelope)` decides; `Ok(None)` means unreadable
/// - newer schema: `Ok(None)`, the slot is left untouched
///
/// # Errors
///
/// Returns an error when the store read fails, the current-schema payload does not decode, or the
/// migration function fails.
pub fn load_slot_with_migration<S, T, F>(
    store: &S,
    slot: &str,
    current_schema_version: u32,
    migrate: F,
) -> Result<Option<T>, String>
where
    S: SlotStore + ?Sized,
    T: DeserializeOwned,
    F: FnOnce(u32, &SlotEnvelope) -> Result<Option<T>, String>,
{
    let Some(raw) = store.load_slot(slot)? else {
        return Ok(None);
    };
    let envelope = SlotEnvelope::decode(slot, &raw);
    match envelope.schema_version {
        version if version == current_schema_version => {
            decode_envelope_payload(&envelope).map(Some)
        }
        version if version < current_schema_version => migrate(version, &envelope),
        _ => Ok(None),
    }
}
