pub mod appearance;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod countdowns;
pub mod host;
pub mod model;
pub mod music;
pub mod notes;
pub mod persistence;
pub mod pomodoro;
pub mod reducer;
pub mod runtime;
pub mod toaster;
pub mod view;
pub mod window_manager;

pub use config::ShellConfig;
#[cfg(target_arch = "wasm32")]
pub use host::DesktopShell;
pub use host::{PomodoroTicker, TickerScheduler};
pub use model::*;
pub use persistence::{load_boot_snapshot, persist_slot, BootSnapshot, Slot};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use runtime::DesktopRuntime;
pub use view::{render_desktop, DesktopView};
