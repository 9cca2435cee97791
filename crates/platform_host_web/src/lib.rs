//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate wires the desktop runtime to the page: `localStorage` slots, the document theme
//! attribute and background layer, file → data-URL reads for wallpaper uploads, and the
//! one-second intervals that drive countdowns, the menu-bar clock, and the pomodoro timer.
//! Off `wasm32` every adapter compiles to an inert fallback so the runtime can be tested natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod appearance;
pub mod files;
pub mod storage;
pub mod timers;

pub use appearance::{background_declarations, WebDocumentAppearance};
pub use files::is_wallpaper_image_mime;
#[cfg(target_arch = "wasm32")]
pub use files::{read_file_as_data_url, read_file_as_data_url_then};
pub use storage::local_slots::WebSlotStore;
pub use timers::{IntervalHandle, ONE_SECOND_MS};
