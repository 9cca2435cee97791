//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::{
    countdowns::CountdownBook,
    model::{DesktopState, EntityId, InteractionState, PointerPosition, Viewport, WindowId},
    music::MusicSource,
    notes::NotesState,
    persistence::{BootSnapshot, Slot},
    pomodoro::TimerMode,
    toaster::ToastLevel,
};

mod appearance;
mod widgets;
mod windows;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open (or restore) a window and bring it to the front.
    OpenWindow { window_id: WindowId },
    /// Open the window behind a Finder icon (`data-app` value).
    OpenFinderApp { app: String },
    CloseWindow { window_id: WindowId },
    /// Raise a window; sent on every pointer-down inside it.
    FocusWindow { window_id: WindowId },
    MinimizeWindow { window_id: WindowId },
    ToggleMaximize { window_id: WindowId },
    /// Dock click: open, raise, or minimize depending on the window's state.
    ToggleDockItem { window_id: WindowId },
    BeginMove {
        window_id: WindowId,
        pointer: PointerPosition,
    },
    UpdateMove { pointer: PointerPosition },
    EndMove,
    SetViewport { viewport: Viewport },

    SelectCountdownIcon { icon: String },
    SelectCountdownColor { color: String },
    /// Submit the create form; icon and color come from the form state.
    AddCountdown {
        name: String,
        date: String,
        time: String,
    },
    DeleteCountdown { id: EntityId },

    CreateNote,
    SelectNote { id: EntityId },
    SaveNote { title: String, content: String },
    ToggleNoteKind,
    AddChecklistItem { text: String },
    ToggleChecklistItem { id: EntityId },
    RemoveChecklistItem { id: EntityId },
    RequestDeleteNote,
    ConfirmDeleteNote,
    CancelDeleteNote,

    PreviousMonth,
    NextMonth,

    StartTimer,
    PauseTimer,
    ResetTimer,
    SetTimerMode { mode: TimerMode },
    /// Raw values of the three duration inputs.
    ApplyTimerSettings {
        work: String,
        short: String,
        long: String,
    },
    /// One second of the focus-timer interval.
    PomodoroTick,

    ToggleTheme,
    SelectWallpaperPreset { name: String },
    SetSolidWallpaper { color: String },
    /// Result of reading an uploaded image file.
    SetWallpaperImage { data_url: String },
    RemoveWallpaperImage,
    ResetWallpaper,

    SelectMusicSource { source: MusicSource },
    ToggleDefaultMusic,
    /// Menu-bar music icon.
    MenuMusicClick,
    LoadSpotify { input: String },

    /// One second of the shell clock: refreshes countdowns and expires toasts.
    ClockTick,
    /// Restore persisted widget state at startup.
    Hydrate { snapshot: BootSnapshot },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the runtime to execute in order.
pub enum RuntimeEffect {
    /// Write the named slot from current state.
    Persist(Slot),
    /// Write the theme attribute to the document.
    ApplyTheme,
    /// Write the resolved wallpaper to the background layer.
    ApplyWallpaper,
    /// Install the one-second focus-timer interval.
    StartPomodoroTicker,
    /// Clear the focus-timer interval.
    StopPomodoroTicker,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that reference something that does not exist.
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window not found")]
    WindowNotFound,
    /// A Finder icon named an app with no window.
    #[error("unknown finder app `{0}`")]
    UnknownApp(String),
}

pub(crate) fn toast(state: &mut DesktopState, level: ToastLevel, message: &str, now_ms: i64) {
    state.toaster.push(level, message, now_ms);
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// Validation failures on user input (a bad countdown date, out-of-range timer settings, an
/// unparseable Spotify link) are not errors: they leave state unchanged and queue an error toast.
///
/// # Errors
///
/// Returns [`ReducerError`] when an action references a window or app that is not present.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
    now: DateTime<Local>,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    let now_ms = now.timestamp_millis();

    let handled = windows::reduce_window_action(state, interaction, &action)?
        || appearance::reduce_appearance_action(state, &action, now_ms, &mut effects)?
        || widgets::reduce_widget_action(state, &action, &now, &mut effects)?;
    if handled {
        return Ok(effects);
    }

    match action {
        DesktopAction::ClockTick => {
            state.toaster.prune(now_ms);
        }
        DesktopAction::Hydrate { snapshot } => {
            if let Some(items) = snapshot.countdowns {
                state.countdowns = CountdownBook::from_items(items);
            }
            if let Some(notes) = snapshot.notes {
                state.notes = NotesState::from_notes(notes);
            }
            if let Some(modes) = snapshot.timer_modes {
                state.pomodoro.apply_modes(modes);
            }
            if let Some(theme) = snapshot.theme {
                state.appearance.theme = theme;
            }
            if let Some(wallpaper) = snapshot.wallpaper {
                state.appearance.wallpaper = wallpaper;
            }
            effects.push(RuntimeEffect::ApplyTheme);
            effects.push(RuntimeEffect::ApplyWallpaper);
        }
        _ => {}
    }

    Ok(effects)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        appearance::{Theme, Wallpaper},
        config::ShellConfig,
        countdowns::{DEFAULT_COUNTDOWN_COLOR, DEFAULT_COUNTDOWN_ICON},
        notes::NoteKind,
        pomodoro::TimerModes,
    };

    fn now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 1, 15, 10, 0, 0)
            .earliest()
            .expect("local time")
    }

    fn state() -> DesktopState {
        DesktopState::new(
            ShellConfig::default(),
            NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"),
        )
    }

    fn reduce(state: &mut DesktopState, action: DesktopAction) -> Vec<RuntimeEffect> {
        let mut interaction = InteractionState::default();
        reduce_desktop(state, &mut interaction, action, now()).expect("reduce")
    }

    fn last_toast(state: &DesktopState) -> Option<(ToastLevel, String)> {
        state
            .toaster
            .toasts()
            .last()
            .map(|t| (t.level, t.message.clone()))
    }

    #[test]
    fn adding_a_countdown_persists_toasts_and_opens_the_list() {
        let mut state = state();
        reduce(
            &mut state,
            DesktopAction::SelectCountdownIcon { icon: "🎂".into() },
        );
        let effects = reduce(
            &mut state,
            DesktopAction::AddCountdown {
                name: "Birthday".into(),
                date: "2024-07-04".into(),
                time: "18:00".into(),
            },
        );

        assert_eq!(effects, vec![RuntimeEffect::Persist(Slot::Countdowns)]);
        assert_eq!(state.countdowns.items().len(), 1);
        assert_eq!(state.countdowns.items()[0].icon, "🎂");
        assert_eq!(state.countdown_form.icon, DEFAULT_COUNTDOWN_ICON);
        assert_eq!(state.countdown_form.color, DEFAULT_COUNTDOWN_COLOR);
        assert_eq!(
            last_toast(&state),
            Some((ToastLevel::Success, "✨ Countdown added successfully!".into()))
        );
        assert_eq!(state.frontmost_window_id(), Some(WindowId::Countdowns));
    }

    #[test]
    fn invalid_countdown_only_toasts() {
        let mut state = state();
        let before = state.countdowns.clone();
        let effects = reduce(
            &mut state,
            DesktopAction::AddCountdown {
                name: "Bad".into(),
                date: "2024-13-40".into(),
                time: "18:00".into(),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state.countdowns, before);
        assert_eq!(last_toast(&state).map(|(level, _)| level), Some(ToastLevel::Error));
        assert_eq!(state.frontmost_window_id(), None);
    }

    #[test]
    fn deleting_a_countdown_persists() {
        let mut state = state();
        reduce(
            &mut state,
            DesktopAction::AddCountdown {
                name: "Trip".into(),
                date: "2024-08-01".into(),
                time: "08:00".into(),
            },
        );
        let id = state.countdowns.items()[0].id.clone();
        let effects = reduce(&mut state, DesktopAction::DeleteCountdown { id });
        assert_eq!(effects, vec![RuntimeEffect::Persist(Slot::Countdowns)]);
        assert!(state.countdowns.is_empty());
    }

    #[test]
    fn note_lifecycle_persists_each_mutation() {
        let mut state = state();
        assert_eq!(
            reduce(&mut state, DesktopAction::CreateNote),
            vec![RuntimeEffect::Persist(Slot::Notes)]
        );
        reduce(
            &mut state,
            DesktopAction::SaveNote {
                title: "Plan".into(),
                content: "one\ntwo".into(),
            },
        );
        reduce(&mut state, DesktopAction::ToggleNoteKind);
        assert_eq!(
            state.notes.active().map(|n| n.kind),
            Some(NoteKind::Checklist)
        );

        assert!(reduce(&mut state, DesktopAction::RequestDeleteNote).is_empty());
        assert_eq!(
            reduce(&mut state, DesktopAction::ConfirmDeleteNote),
            vec![RuntimeEffect::Persist(Slot::Notes)]
        );
        assert!(state.notes.notes().is_empty());
        assert_eq!(
            last_toast(&state),
            Some((ToastLevel::Success, "🗑️ Note deleted".into()))
        );
    }

    #[test]
    fn cancelled_delete_keeps_the_note() {
        let mut state = state();
        reduce(&mut state, DesktopAction::CreateNote);
        reduce(&mut state, DesktopAction::RequestDeleteNote);
        reduce(&mut state, DesktopAction::CancelDeleteNote);
        assert!(reduce(&mut state, DesktopAction::ConfirmDeleteNote).is_empty());
        assert_eq!(state.notes.notes().len(), 1);
    }

    #[test]
    fn timer_start_and_pause_drive_the_ticker() {
        let mut state = state();
        assert_eq!(
            reduce(&mut state, DesktopAction::StartTimer),
            vec![RuntimeEffect::StartPomodoroTicker]
        );
        assert!(reduce(&mut state, DesktopAction::StartTimer).is_empty());
        assert_eq!(
            reduce(&mut state, DesktopAction::PauseTimer),
            vec![RuntimeEffect::StopPomodoroTicker]
        );
        assert!(reduce(&mut state, DesktopAction::PauseTimer).is_empty());
    }

    #[test]
    fn timer_completion_toasts_once_and_stops_ticker() {
        let mut state = state();
        state.pomodoro.apply_modes(TimerModes {
            work: 1,
            short: 5,
            long: 15,
        });
        reduce(&mut state, DesktopAction::StartTimer);

        let mut stops = 0;
        for _ in 0..60 {
            let effects = reduce(&mut state, DesktopAction::PomodoroTick);
            stops += effects
                .iter()
                .filter(|e| **e == RuntimeEffect::StopPomodoroTicker)
                .count();
        }
        assert_eq!(stops, 1);
        assert_eq!(state.toaster.toasts().len(), 1);
        assert_eq!(
            last_toast(&state),
            Some((ToastLevel::Success, "🎉 Time's up! Great work!".into()))
        );
        assert_eq!(state.pomodoro.display(), "01:00");
    }

    #[test]
    fn invalid_timer_settings_leave_state_alone() {
        let mut state = state();
        let effects = reduce(
            &mut state,
            DesktopAction::ApplyTimerSettings {
                work: "0".into(),
                short: "5".into(),
                long: "15".into(),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state.pomodoro.modes(), TimerModes::default());
        assert_eq!(
            last_toast(&state),
            Some((ToastLevel::Error, "⚠️ Please enter valid durations".into()))
        );
    }

    #[test]
    fn valid_timer_settings_persist_and_stop_a_running_timer() {
        let mut state = state();
        reduce(&mut state, DesktopAction::StartTimer);
        let effects = reduce(
            &mut state,
            DesktopAction::ApplyTimerSettings {
                work: "45".into(),
                short: "10".into(),
                long: "20".into(),
            },
        );
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::Persist(Slot::TimerSettings),
                RuntimeEffect::StopPomodoroTicker,
            ]
        );
        assert_eq!(state.pomodoro.display(), "45:00");
    }

    #[test]
    fn theme_toggle_persists_and_applies() {
        let mut state = state();
        let effects = reduce(&mut state, DesktopAction::ToggleTheme);
        assert_eq!(state.appearance.theme, Theme::Dark);
        assert_eq!(
            effects,
            vec![RuntimeEffect::Persist(Slot::Theme), RuntimeEffect::ApplyTheme]
        );
    }

    #[test]
    fn wallpaper_actions_replace_the_tagged_value() {
        let mut state = state();
        let effects = reduce(
            &mut state,
            DesktopAction::SetSolidWallpaper {
                color: "#abcdef".into(),
            },
        );
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::Persist(Slot::Wallpaper),
                RuntimeEffect::ApplyWallpaper,
            ]
        );
        assert_eq!(state.appearance.active_preset(), None);

        reduce(
            &mut state,
            DesktopAction::SetWallpaperImage {
                data_url: "data:image/png;base64,AA".into(),
            },
        );
        assert!(state.appearance.has_custom_image());

        reduce(&mut state, DesktopAction::RemoveWallpaperImage);
        assert_eq!(state.appearance.wallpaper, Wallpaper::default());
    }

    #[test]
    fn unknown_preset_is_rejected_with_a_toast() {
        let mut state = state();
        let effects = reduce(
            &mut state,
            DesktopAction::SelectWallpaperPreset {
                name: "gradient-plaid".into(),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state.appearance.wallpaper, Wallpaper::default());
        assert_eq!(last_toast(&state).map(|(level, _)| level), Some(ToastLevel::Error));
    }

    #[test]
    fn spotify_links_load_or_toast() {
        let mut state = state();
        reduce(
            &mut state,
            DesktopAction::LoadSpotify {
                input: "spotify:album:abc123".into(),
            },
        );
        assert_eq!(
            state.music.spotify.as_ref().map(|e| e.embed_url()),
            Some("https://open.spotify.com/embed/album/abc123".to_string())
        );

        reduce(
            &mut state,
            DesktopAction::LoadSpotify {
                input: "not a link".into(),
            },
        );
        assert!(state.music.spotify.is_some());
        assert_eq!(
            last_toast(&state),
            Some((
                ToastLevel::Error,
                "⚠️ Please enter a valid Spotify link or URI".into()
            ))
        );
    }

    #[test]
    fn menu_music_icon_depends_on_source() {
        let mut state = state();
        reduce(&mut state, DesktopAction::MenuMusicClick);
        assert!(state.music.default_playing);
        assert_eq!(
            last_toast(&state),
            Some((ToastLevel::Info, "🎵 Music playing".into()))
        );

        reduce(
            &mut state,
            DesktopAction::SelectMusicSource {
                source: MusicSource::Spotify,
            },
        );
        reduce(&mut state, DesktopAction::MenuMusicClick);
        assert_eq!(state.frontmost_window_id(), Some(WindowId::Music));
    }

    #[test]
    fn hydrate_restores_widgets_and_applies_appearance() {
        let mut state = state();
        let effects = reduce(
            &mut state,
            DesktopAction::Hydrate {
                snapshot: BootSnapshot {
                    theme: Some(Theme::Dark),
                    timer_modes: Some(TimerModes {
                        work: 30,
                        short: 5,
                        long: 15,
                    }),
                    ..BootSnapshot::default()
                },
            },
        );
        assert_eq!(
            effects,
            vec![RuntimeEffect::ApplyTheme, RuntimeEffect::ApplyWallpaper]
        );
        assert_eq!(state.appearance.theme, Theme::Dark);
        assert_eq!(state.pomodoro.display(), "30:00");
    }

    #[test]
    fn clock_tick_expires_old_toasts() {
        let mut state = state();
        state
            .toaster
            .push(ToastLevel::Info, "old", now().timestamp_millis() - 10_000);
        reduce(&mut state, DesktopAction::ClockTick);
        assert!(state.toaster.toasts().is_empty());
    }

    #[test]
    fn calendar_navigation() {
        let mut state = state();
        reduce(&mut state, DesktopAction::PreviousMonth);
        assert_eq!(state.calendar.title(), "December 2023");
        reduce(&mut state, DesktopAction::NextMonth);
        reduce(&mut state, DesktopAction::NextMonth);
        assert_eq!(state.calendar.title(), "February 2024");
    }

    #[test]
    fn unknown_finder_app_is_an_error() {
        let mut state = state();
        let mut interaction = InteractionState::default();
        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::OpenFinderApp {
                    app: "trash".into(),
                },
                now(),
            ),
            Err(ReducerError::UnknownApp("trash".into()))
        );
    }
}
