//! `localStorage`-backed slot store.
//!
//! Browser storage is synchronous, so every write has landed before the calling handler returns.

use platform_host::SlotStore;

#[derive(Debug, Clone, Copy, Default)]
/// Slot store backed by `window.localStorage`.
///
/// On non-wasm targets reads return `None` and writes succeed without effect.
pub struct WebSlotStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}

impl SlotStore for WebSlotStore {
    fn load_slot(&self, slot: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .get_item(slot)
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = slot;
            Ok(None)
        }
    }

    fn save_slot(&self, slot: &str, raw: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .set_item(slot, raw)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (slot, raw);
            Ok(())
        }
    }

    fn delete_slot(&self, slot: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .remove_item(slot)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = slot;
            Ok(())
        }
    }
}
