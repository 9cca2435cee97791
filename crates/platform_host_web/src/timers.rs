//! Repeating browser timers.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

/// Period of every desktop timer (countdown refresh, clock, pomodoro).
pub const ONE_SECOND_MS: i32 = 1_000;

/// A `setInterval` registration that is cleared when dropped.
pub struct IntervalHandle {
    #[cfg(target_arch = "wasm32")]
    id: i32,
    #[cfg(target_arch = "wasm32")]
    _callback: Closure<dyn FnMut()>,
}

impl std::fmt::Debug for IntervalHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalHandle").finish_non_exhaustive()
    }
}

impl IntervalHandle {
    /// Installs `callback` to run every `period_ms` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error when no browser window is available (always the case off `wasm32`).
    pub fn start<F>(period_ms: i32, callback: F) -> Result<Self, String>
    where
        F: FnMut() + 'static,
    {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            let callback = Closure::<dyn FnMut()>::wrap(Box::new(callback));
            let id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    callback.as_ref().unchecked_ref(),
                    period_ms,
                )
                .map_err(|err| format!("setInterval failed: {err:?}"))?;
            Ok(Self {
                id,
                _callback: callback,
            })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (period_ms, callback);
            Err("intervals are only available when compiled for wasm32".to_string())
        }
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(self.id);
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_targets_refuse_to_schedule() {
        let err = IntervalHandle::start(ONE_SECOND_MS, || {}).expect_err("no window");
        assert!(err.contains("wasm32"));
    }
}
