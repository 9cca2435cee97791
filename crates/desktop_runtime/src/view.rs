//! Render step: projects [`DesktopState`] into plain view models for the UI layer.
//!
//! Rendering is a pure function of state and the clock; calling it twice with the same inputs
//! yields equal views.

use chrono::{DateTime, Local};
use platform_host::DesktopBackground;
use serde::Serialize;

use crate::{
    appearance::{resolve_background, Theme},
    calendar::{render_month, CalendarGrid},
    clock::format_menu_time,
    countdowns::{render_cards, render_upcoming, CountdownCard, UpcomingEvent},
    model::{DesktopState, WindowId, WindowRect},
    music::{render_music, MusicView},
    notes::{render_note_editor, render_note_list, NoteEditorView, NoteListEntry},
    pomodoro::{render_pomodoro, PomodoroView},
    toaster::ToastView,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowView {
    pub id: WindowId,
    pub dom_id: &'static str,
    pub title: &'static str,
    pub rect: WindowRect,
    pub z_index: u32,
    pub visible: bool,
    pub maximized: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DockItemView {
    pub window_id: WindowId,
    /// Dot under the icon for open windows, minimized or not.
    pub running: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub theme: Theme,
    pub theme_icon: &'static str,
    pub active_preset: Option<String>,
    pub has_custom_image: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopView {
    pub menu_time: String,
    pub theme: Theme,
    pub background: DesktopBackground,
    pub windows: Vec<WindowView>,
    pub dock: Vec<DockItemView>,
    pub countdowns: Vec<CountdownCard>,
    pub calendar: CalendarGrid,
    pub upcoming_events: Vec<UpcomingEvent>,
    pub note_list: Vec<NoteListEntry>,
    pub note_editor: Option<NoteEditorView>,
    pub note_delete_pending: bool,
    pub pomodoro: PomodoroView,
    pub music: MusicView,
    pub settings: SettingsView,
    pub toasts: Vec<ToastView>,
}

pub fn render_desktop(state: &DesktopState, now: DateTime<Local>) -> DesktopView {
    let now_ms = now.timestamp_millis();
    let frontmost = state.frontmost_window_id();

    let windows = state
        .windows
        .iter()
        .map(|window| WindowView {
            id: window.id,
            dom_id: window.id.dom_id(),
            title: window.id.title(),
            rect: window.rect,
            z_index: window.z_index,
            visible: window.is_visible(),
            maximized: window.maximized,
            focused: frontmost == Some(window.id),
        })
        .collect();

    let dock = state
        .windows
        .iter()
        .filter(|window| window.id != WindowId::CreateCountdown)
        .map(|window| DockItemView {
            window_id: window.id,
            running: window.is_open,
        })
        .collect();

    DesktopView {
        menu_time: format_menu_time(&now),
        theme: state.appearance.theme,
        background: resolve_background(&state.appearance.wallpaper),
        windows,
        dock,
        countdowns: render_cards(&state.countdowns, now_ms),
        calendar: render_month(
            state.calendar,
            now.date_naive(),
            &state.countdowns.event_dates(),
        ),
        upcoming_events: render_upcoming(
            &state.countdowns,
            now_ms,
            state.config.upcoming_events_limit,
        ),
        note_list: render_note_list(&state.notes, now),
        note_editor: render_note_editor(&state.notes),
        note_delete_pending: state.notes.is_delete_pending(),
        pomodoro: render_pomodoro(&state.pomodoro),
        music: render_music(&state.music),
        settings: SettingsView {
            theme: state.appearance.theme,
            theme_icon: state.appearance.theme.toggle_icon(),
            active_preset: state.appearance.active_preset().map(str::to_string),
            has_custom_image: state.appearance.has_custom_image(),
        },
        toasts: state.toaster.render(now_ms),
    }
}
