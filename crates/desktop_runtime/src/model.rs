use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    appearance::AppearanceState, calendar::CalendarCursor, config::ShellConfig,
    countdowns::{CountdownBook, CountdownForm},
    music::MusicState,
    notes::NotesState,
    pomodoro::{PomodoroTimer, TimerModes},
    toaster::Toaster,
};

/// Unique identifier for countdowns, notes, and checklist items.
///
/// New ids are UUID v4 strings. Numeric ids written by older builds deserialize to their decimal
/// text, so existing records keep a stable identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "RawEntityId")]
pub struct EntityId(String);

impl EntityId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wraps an existing id string.
    pub fn from_string(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntityId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawEntityId> for EntityId {
    fn from(raw: RawEntityId) -> Self {
        match raw {
            RawEntityId::Text(text) => Self(text),
            RawEntityId::Number(number) => Self(number.to_string()),
        }
    }
}

/// The fixed set of widget windows on the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowId {
    Finder,
    Countdowns,
    CreateCountdown,
    Calendar,
    Notes,
    Pomodoro,
    Quotes,
    Music,
    Settings,
}

impl WindowId {
    pub const ALL: [WindowId; 9] = [
        Self::Finder,
        Self::Countdowns,
        Self::CreateCountdown,
        Self::Calendar,
        Self::Notes,
        Self::Pomodoro,
        Self::Quotes,
        Self::Music,
        Self::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Finder => "Finder",
            Self::Countdowns => "My Countdowns",
            Self::CreateCountdown => "Create Countdown",
            Self::Calendar => "Calendar",
            Self::Notes => "Notes",
            Self::Pomodoro => "Focus Timer",
            Self::Quotes => "Daily Motivation",
            Self::Music => "Music Player",
            Self::Settings => "Settings",
        }
    }

    /// DOM element id of the window chrome.
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::Finder => "finderWindow",
            Self::Countdowns => "countdownWindow",
            Self::CreateCountdown => "createWindow",
            Self::Calendar => "calendarWindow",
            Self::Notes => "notesWindow",
            Self::Pomodoro => "pomodoroWindow",
            Self::Quotes => "quotesWindow",
            Self::Music => "musicWindow",
            Self::Settings => "settingsWindow",
        }
    }

    /// Maps a Finder app icon (`data-app`) to its window.
    pub fn from_finder_app(app: &str) -> Option<Self> {
        match app {
            "calendar" => Some(Self::Calendar),
            "notes" => Some(Self::Notes),
            "countdown" => Some(Self::Countdowns),
            "create" => Some(Self::CreateCountdown),
            "pomodoro" => Some(Self::Pomodoro),
            "quotes" => Some(Self::Quotes),
            "music" => Some(Self::Music),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }

    fn default_rect(self) -> WindowRect {
        let (w, h) = match self {
            Self::Finder => (640, 420),
            Self::Countdowns => (520, 560),
            Self::CreateCountdown => (440, 540),
            Self::Calendar => (460, 560),
            Self::Notes => (760, 520),
            Self::Pomodoro => (400, 480),
            Self::Quotes => (460, 300),
            Self::Music => (420, 520),
            Self::Settings => (520, 560),
        };
        let slot = Self::ALL.iter().position(|id| *id == self).unwrap_or(0) as i32;
        WindowRect {
            x: 120 + slot * 32,
            y: 60 + slot * 24,
            w,
            h,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

/// Transient chrome state for one widget window. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub rect: WindowRect,
    /// Rect to return to when leaving the maximized footprint.
    pub restore_rect: Option<WindowRect>,
    pub z_index: u32,
    pub is_open: bool,
    pub minimized: bool,
    pub maximized: bool,
}

impl WindowRecord {
    fn new(id: WindowId) -> Self {
        Self {
            id,
            rect: id.default_rect(),
            restore_rect: None,
            z_index: 0,
            is_open: false,
            minimized: false,
            maximized: false,
        }
    }

    /// Whether the window is currently shown on the desktop.
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.minimized
    }
}

/// An in-progress header drag. The offset is `pointer - window origin` at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub offset: PointerPosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    /// At most one window is dragged at a time.
    pub dragging: Option<DragSession>,
}

/// The single application-state container, constructed once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    pub config: ShellConfig,
    pub viewport: Viewport,
    /// Last stack order handed out; the frontmost window holds this value.
    pub stack_counter: u32,
    pub windows: Vec<WindowRecord>,
    pub countdowns: CountdownBook,
    pub countdown_form: CountdownForm,
    pub notes: NotesState,
    pub calendar: CalendarCursor,
    pub pomodoro: PomodoroTimer,
    pub appearance: AppearanceState,
    pub music: MusicState,
    pub toaster: Toaster,
}

impl DesktopState {
    pub fn new(config: ShellConfig, today: NaiveDate) -> Self {
        Self {
            viewport: config.initial_viewport,
            stack_counter: config.stack_base,
            windows: WindowId::ALL.into_iter().map(WindowRecord::new).collect(),
            countdowns: CountdownBook::default(),
            countdown_form: CountdownForm::default(),
            notes: NotesState::default(),
            calendar: CalendarCursor::containing(today),
            pomodoro: PomodoroTimer::new(TimerModes::default()),
            appearance: AppearanceState::default(),
            music: MusicState::default(),
            toaster: Toaster::new(config.toast_visible_ms, config.toast_exit_ms),
            config,
        }
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// The open, non-minimized window holding the current stack counter, if any.
    pub fn frontmost_window_id(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| w.is_visible())
            .max_by_key(|w| w.z_index)
            .filter(|w| w.z_index == self.stack_counter)
            .map(|w| w.id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn entity_ids_accept_legacy_numbers() {
        let whole: EntityId = serde_json::from_value(json!(1704067200000u64)).expect("int");
        let fractional: EntityId =
            serde_json::from_value(json!(1704067200000.25)).expect("float");
        let text: EntityId = serde_json::from_value(json!("abc")).expect("text");

        assert_eq!(whole.as_str(), "1704067200000");
        assert_eq!(fractional.as_str(), "1704067200000.25");
        assert_eq!(text.as_str(), "abc");
        assert_eq!(serde_json::to_value(&whole).expect("ser"), json!("1704067200000"));
    }

    #[test]
    fn generated_ids_are_distinct() {
        let ids = (0..64).map(|_| EntityId::generate()).collect::<Vec<_>>();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn new_state_has_every_window_closed() {
        let state = DesktopState::new(
            ShellConfig::default(),
            NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"),
        );
        assert_eq!(state.windows.len(), WindowId::ALL.len());
        assert!(state.windows.iter().all(|w| !w.is_open));
        assert_eq!(state.stack_counter, 100);
        assert_eq!(state.frontmost_window_id(), None);
    }

    #[test]
    fn finder_icons_map_to_windows() {
        assert_eq!(WindowId::from_finder_app("notes"), Some(WindowId::Notes));
        assert_eq!(WindowId::from_finder_app("create"), Some(WindowId::CreateCountdown));
        assert_eq!(WindowId::from_finder_app("trash"), None);
    }
}
