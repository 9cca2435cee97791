//! Shell-side wiring between the runtime and the browser's timers and file picker.
//!
//! The fixed one-second intervals (clock and countdown refresh) live for the whole session. The
//! focus-timer interval only exists while the timer runs; [`PomodoroTicker`] turns the runtime's
//! queued ticker effects into installing or dropping that interval.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::DesktopShell;

use crate::reducer::RuntimeEffect;

/// Installs the repeating focus-timer callback. Dropping the returned handle stops it.
pub trait TickerScheduler {
    type Handle;

    fn start_pomodoro_ticker(&mut self) -> Result<Self::Handle, String>;
}

/// Owns the focus-timer interval, if one is installed.
pub struct PomodoroTicker<T: TickerScheduler> {
    scheduler: T,
    handle: Option<T::Handle>,
}

impl<T: TickerScheduler> PomodoroTicker<T> {
    pub fn new(scheduler: T) -> Self {
        Self {
            scheduler,
            handle: None,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.handle.is_some()
    }

    /// Applies drained shell effects in order. Effects the shell does not own are ignored.
    pub fn apply(&mut self, effects: impl IntoIterator<Item = RuntimeEffect>) {
        for effect in effects {
            match effect {
                RuntimeEffect::StartPomodoroTicker => {
                    if self.handle.is_some() {
                        continue;
                    }
                    match self.scheduler.start_pomodoro_ticker() {
                        Ok(handle) => self.handle = Some(handle),
                        Err(err) => {
                            leptos::logging::warn!("pomodoro ticker failed to start: {err}");
                        }
                    }
                }
                RuntimeEffect::StopPomodoroTicker => {
                    self.handle = None;
                }
                _ => {}
            }
        }
    }
}
