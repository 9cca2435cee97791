//! Typed host contracts shared by the desktop runtime and its browser adapters.
//!
//! This crate is the boundary for platform services the runtime depends on: named-slot
//! persistence (with versioned envelopes and migration) and document appearance. Concrete browser
//! adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod appearance;
pub mod storage;

pub use appearance::{
    AppliedAppearance, DesktopBackground, DocumentAppearance, MemoryDocumentAppearance,
    NoopDocumentAppearance,
};
pub use storage::slots::{
    build_slot_envelope, decode_envelope_payload, load_slot_with, load_slot_with_migration,
    save_slot_with, MemorySlotStore, NoopSlotStore, SlotEnvelope, SlotStore,
    LEGACY_SLOT_SCHEMA_VERSION, SLOT_ENVELOPE_VERSION,
};
