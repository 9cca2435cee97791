//! Slot persistence for boot hydration and per-widget saves.
//!
//! Every slot is written as a versioned envelope. Values written before envelopes existed load as
//! schema `0` and are migrated here; values from a newer schema load as empty and stay untouched
//! in storage until the next write to that slot.

use chrono::{Local, TimeZone};
use platform_host::{
    decode_envelope_payload, load_slot_with_migration, save_slot_with, SlotEnvelope, SlotStore,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::{
    appearance::{Theme, Wallpaper},
    countdowns::{parse_target_epoch_ms, Countdown},
    model::{DesktopState, EntityId},
    notes::Note,
    pomodoro::TimerModes,
};

pub const COUNTDOWNS_SCHEMA_VERSION: u32 = 1;
pub const NOTES_SCHEMA_VERSION: u32 = 1;
pub const TIMER_SETTINGS_SCHEMA_VERSION: u32 = 1;
pub const THEME_SCHEMA_VERSION: u32 = 1;
pub const WALLPAPER_SCHEMA_VERSION: u32 = 1;

/// Named storage slots, one per persisted widget value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Countdowns,
    Notes,
    TimerSettings,
    Theme,
    Wallpaper,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Self::Countdowns,
        Self::Notes,
        Self::TimerSettings,
        Self::Theme,
        Self::Wallpaper,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Countdowns => "countdowns",
            Self::Notes => "notes",
            Self::TimerSettings => "timerSettings",
            Self::Theme => "theme",
            Self::Wallpaper => "wallpaper",
        }
    }

    pub fn schema_version(self) -> u32 {
        match self {
            Self::Countdowns => COUNTDOWNS_SCHEMA_VERSION,
            Self::Notes => NOTES_SCHEMA_VERSION,
            Self::TimerSettings => TIMER_SETTINGS_SCHEMA_VERSION,
            Self::Theme => THEME_SCHEMA_VERSION,
            Self::Wallpaper => WALLPAPER_SCHEMA_VERSION,
        }
    }
}

/// Everything read from storage at startup. Missing or unreadable slots stay `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BootSnapshot {
    pub countdowns: Option<Vec<Countdown>>,
    pub notes: Option<Vec<Note>>,
    pub timer_modes: Option<TimerModes>,
    pub theme: Option<Theme>,
    pub wallpaper: Option<Wallpaper>,
}

/// Countdown record as written before ids were strings and the target field was renamed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyCountdown {
    id: EntityId,
    name: String,
    date: String,
    time: String,
    icon: String,
    color: String,
    #[serde(default)]
    target_date: Option<f64>,
}

impl LegacyCountdown {
    fn upgrade<Tz: TimeZone>(self, tz: &Tz) -> Option<Countdown> {
        let target_date_epoch_ms = match self.target_date {
            Some(ms) if ms.is_finite() => ms as i64,
            _ => match parse_target_epoch_ms(&self.date, &self.time, tz) {
                Ok(ms) => ms,
                Err(err) => {
                    leptos::logging::warn!("dropping legacy countdown `{}`: {err}", self.name);
                    return None;
                }
            },
        };
        Some(Countdown {
            id: self.id,
            name: self.name,
            date: self.date,
            time: self.time,
            icon: self.icon,
            color: self.color,
            target_date_epoch_ms,
        })
    }
}

fn migrate_countdowns_in<Tz: TimeZone>(
    schema_version: u32,
    envelope: &SlotEnvelope,
    tz: &Tz,
) -> Result<Option<Vec<Countdown>>, String> {
    match schema_version {
        0 => {
            let legacy: Vec<LegacyCountdown> = decode_envelope_payload(envelope)?;
            Ok(Some(
                legacy.into_iter().filter_map(|c| c.upgrade(tz)).collect(),
            ))
        }
        _ => Ok(None),
    }
}

fn migrate_countdowns(
    schema_version: u32,
    envelope: &SlotEnvelope,
) -> Result<Option<Vec<Countdown>>, String> {
    migrate_countdowns_in(schema_version, envelope, &Local)
}

fn migrate_notes(schema_version: u32, envelope: &SlotEnvelope) -> Result<Option<Vec<Note>>, String> {
    match schema_version {
        0 => decode_envelope_payload(envelope).map(Some),
        _ => Ok(None),
    }
}

fn migrate_timer_settings(
    schema_version: u32,
    envelope: &SlotEnvelope,
) -> Result<Option<TimerModes>, String> {
    match schema_version {
        0 => decode_envelope_payload(envelope).map(Some),
        _ => Ok(None),
    }
}

fn legacy_string(envelope: &SlotEnvelope) -> Option<&str> {
    match &envelope.payload {
        Value::String(raw) => Some(raw),
        _ => None,
    }
}

fn migrate_theme(schema_version: u32, envelope: &SlotEnvelope) -> Result<Option<Theme>, String> {
    match schema_version {
        0 => Ok(legacy_string(envelope).and_then(Theme::parse)),
        _ => Ok(None),
    }
}

fn migrate_wallpaper(
    schema_version: u32,
    envelope: &SlotEnvelope,
) -> Result<Option<Wallpaper>, String> {
    match schema_version {
        0 => legacy_string(envelope)
            .map(|raw| raw.parse::<Wallpaper>().map_err(|err| err.to_string()))
            .transpose(),
        _ => Ok(None),
    }
}

fn load_slot<S, T, F>(store: &S, slot: Slot, migrate: F) -> Option<T>
where
    S: SlotStore + ?Sized,
    T: DeserializeOwned,
    F: FnOnce(u32, &SlotEnvelope) -> Result<Option<T>, String>,
{
    match load_slot_with_migration(store, slot.key(), slot.schema_version(), migrate) {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            if matches!(store.load_slot(slot.key()), Ok(Some(_))) {
                leptos::logging::warn!(
                    "slot `{}` is unreadable by this build; starting empty",
                    slot.key()
                );
            }
            None
        }
        Err(err) => {
            leptos::logging::warn!("slot `{}` load failed: {err}", slot.key());
            None
        }
    }
}

/// Reads every slot, migrating legacy values. Failures are logged and load as empty.
pub fn load_boot_snapshot<S: SlotStore + ?Sized>(store: &S) -> BootSnapshot {
    let timer_modes = load_slot(store, Slot::TimerSettings, migrate_timer_settings).and_then(
        |modes: TimerModes| match modes.validate() {
            Ok(modes) => Some(modes),
            Err(err) => {
                leptos::logging::warn!("ignoring stored timer settings: {err}");
                None
            }
        },
    );

    BootSnapshot {
        countdowns: load_slot(store, Slot::Countdowns, migrate_countdowns),
        notes: load_slot(store, Slot::Notes, migrate_notes),
        timer_modes,
        theme: load_slot(store, Slot::Theme, migrate_theme),
        wallpaper: load_slot(store, Slot::Wallpaper, migrate_wallpaper),
    }
}

/// Writes the current value of `slot` from `state`.
pub fn persist_slot<S: SlotStore + ?Sized>(
    store: &S,
    state: &DesktopState,
    slot: Slot,
) -> Result<(), String> {
    let key = slot.key();
    let version = slot.schema_version();
    match slot {
        Slot::Countdowns => save_slot_with(store, key, version, &state.countdowns.items()),
        Slot::Notes => save_slot_with(store, key, version, &state.notes.notes()),
        Slot::TimerSettings => save_slot_with(store, key, version, &state.pomodoro.modes()),
        Slot::Theme => save_slot_with(store, key, version, &state.appearance.theme),
        Slot::Wallpaper => save_slot_with(store, key, version, &state.appearance.wallpaper),
    }
}
