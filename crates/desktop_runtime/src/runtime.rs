//! Top-level runtime container: owns state, runs the reducer, and executes its effects.
//!
//! Storage and document effects run synchronously in emission order, so a read after a write in
//! the same handler sees the write. Ticker effects need the shell's timer facility and are queued
//! for the shell to drain.

use chrono::{DateTime, Local};
use platform_host::{DocumentAppearance, SlotStore};
use platform_host_web::{WebDocumentAppearance, WebSlotStore};

use crate::{
    appearance::resolve_background,
    config::ShellConfig,
    model::{DesktopState, InteractionState, WindowId},
    persistence::{load_boot_snapshot, persist_slot},
    reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect},
    view::{render_desktop, DesktopView},
};

pub struct DesktopRuntime<S, A> {
    store: S,
    appearance: A,
    state: DesktopState,
    interaction: InteractionState,
    shell_effects: Vec<RuntimeEffect>,
}

impl DesktopRuntime<WebSlotStore, WebDocumentAppearance> {
    /// Runtime wired to `localStorage` and the page document.
    pub fn web(config: ShellConfig, now: DateTime<Local>) -> Self {
        Self::boot(WebSlotStore, WebDocumentAppearance, config, now)
    }
}

impl<S: SlotStore, A: DocumentAppearance> DesktopRuntime<S, A> {
    /// Hydrates from `store`, applies the stored appearance, and opens the Finder.
    pub fn boot(store: S, appearance: A, config: ShellConfig, now: DateTime<Local>) -> Self {
        let snapshot = load_boot_snapshot(&store);
        let mut runtime = Self {
            store,
            appearance,
            state: DesktopState::new(config, now.date_naive()),
            interaction: InteractionState::default(),
            shell_effects: Vec::new(),
        };

        for action in [
            DesktopAction::Hydrate { snapshot },
            DesktopAction::OpenWindow {
                window_id: WindowId::Finder,
            },
        ] {
            if let Err(err) = runtime.dispatch(action, now) {
                leptos::logging::warn!("desktop boot step failed: {err}");
            }
        }
        leptos::logging::log!(
            "desktop booted with {} countdowns and {} notes",
            runtime.state.countdowns.items().len(),
            runtime.state.notes.notes().len()
        );
        runtime
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Runs one action through the reducer and executes its effects.
    ///
    /// # Errors
    ///
    /// Returns the reducer's error; state is unchanged in that case.
    pub fn dispatch(
        &mut self,
        action: DesktopAction,
        now: DateTime<Local>,
    ) -> Result<(), ReducerError> {
        let effects = reduce_desktop(&mut self.state, &mut self.interaction, action, now)?;
        for effect in effects {
            self.execute(effect);
        }
        Ok(())
    }

    /// The one-second shell tick.
    pub fn tick(&mut self, now: DateTime<Local>) {
        if let Err(err) = self.dispatch(DesktopAction::ClockTick, now) {
            leptos::logging::warn!("clock tick failed: {err}");
        }
    }

    /// The one-second focus-timer tick; only meaningful while the ticker is installed.
    pub fn pomodoro_tick(&mut self, now: DateTime<Local>) {
        if let Err(err) = self.dispatch(DesktopAction::PomodoroTick, now) {
            leptos::logging::warn!("pomodoro tick failed: {err}");
        }
    }

    pub fn render(&self, now: DateTime<Local>) -> DesktopView {
        render_desktop(&self.state, now)
    }

    /// Ticker start/stop requests emitted since the last drain, oldest first.
    pub fn drain_shell_effects(&mut self) -> Vec<RuntimeEffect> {
        std::mem::take(&mut self.shell_effects)
    }

    fn execute(&mut self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::Persist(slot) => {
                if let Err(err) = persist_slot(&self.store, &self.state, slot) {
                    leptos::logging::warn!("persist `{}` failed: {err}", slot.key());
                }
            }
            RuntimeEffect::ApplyTheme => {
                let theme = self.state.appearance.theme.as_str();
                if let Err(err) = self.appearance.set_theme_attribute(theme) {
                    leptos::logging::warn!("apply theme failed: {err}");
                }
            }
            RuntimeEffect::ApplyWallpaper => {
                let background = resolve_background(&self.state.appearance.wallpaper);
                if let Err(err) = self.appearance.set_desktop_background(&background) {
                    leptos::logging::warn!("apply wallpaper failed: {err}");
                }
            }
            RuntimeEffect::StartPomodoroTicker | RuntimeEffect::StopPomodoroTicker => {
                self.shell_effects.push(effect);
            }
        }
    }
}
