//! Focus timer state machine.
//!
//! The timer only counts while running; the shell drives it with one `tick` per second and
//! installs that interval only while the timer runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const WORK_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=120;
pub const BREAK_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Work,
    Short,
    Long,
}

/// Configured minutes per mode. Persisted as the `timerSettings` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerModes {
    pub work: u32,
    pub short: u32,
    pub long: u32,
}

impl Default for TimerModes {
    fn default() -> Self {
        Self {
            work: 25,
            short: 5,
            long: 15,
        }
    }
}

impl TimerModes {
    pub fn minutes(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work,
            TimerMode::Short => self.short,
            TimerMode::Long => self.long,
        }
    }

    pub fn seconds(&self, mode: TimerMode) -> u32 {
        self.minutes(mode).saturating_mul(60)
    }

    /// Checks every duration against its allowed range.
    pub fn validate(self) -> Result<Self, TimerSettingsError> {
        if !WORK_MINUTES_RANGE.contains(&self.work) {
            return Err(TimerSettingsError::OutOfRange {
                field: "work",
                value: i64::from(self.work),
            });
        }
        for (field, value) in [("short", self.short), ("long", self.long)] {
            if !BREAK_MINUTES_RANGE.contains(&value) {
                return Err(TimerSettingsError::OutOfRange {
                    field,
                    value: i64::from(value),
                });
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerSettingsError {
    #[error("{field} duration `{raw}` is not a whole number of minutes")]
    NotANumber { field: &'static str, raw: String },
    #[error("{field} duration {value} is out of range")]
    OutOfRange { field: &'static str, value: i64 },
}

fn parse_minutes(field: &'static str, raw: &str) -> Result<u32, TimerSettingsError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| TimerSettingsError::NotANumber {
            field,
            raw: raw.to_string(),
        })
        .and_then(|value| {
            u32::try_from(value).map_err(|_| TimerSettingsError::OutOfRange { field, value })
        })
}

/// Parses the three settings inputs and validates them.
pub fn parse_timer_settings(
    work: &str,
    short: &str,
    long: &str,
) -> Result<TimerModes, TimerSettingsError> {
    TimerModes {
        work: parse_minutes("work", work)?,
        short: parse_minutes("short", short)?,
        long: parse_minutes("long", long)?,
    }
    .validate()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is stopped; nothing changed.
    Idle,
    Counting,
    /// Countdown reached zero; the timer reset and stopped.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomodoroTimer {
    modes: TimerModes,
    mode: TimerMode,
    remaining_secs: u32,
    running: bool,
}

impl PomodoroTimer {
    pub fn new(modes: TimerModes) -> Self {
        Self {
            remaining_secs: modes.seconds(TimerMode::Work),
            modes,
            mode: TimerMode::Work,
            running: false,
        }
    }

    pub fn modes(&self) -> TimerModes {
        self.modes
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns whether the timer was stopped before.
    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.running, true)
    }

    /// Returns whether the timer was running before.
    pub fn pause(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    pub fn reset(&mut self) -> bool {
        let was_running = self.pause();
        self.remaining_secs = self.modes.seconds(self.mode);
        was_running
    }

    pub fn set_mode(&mut self, mode: TimerMode) -> bool {
        self.mode = mode;
        self.reset()
    }

    /// Replaces the configured durations and resets the current mode.
    pub fn apply_modes(&mut self, modes: TimerModes) -> bool {
        self.modes = modes;
        self.reset()
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return TickOutcome::Counting;
        }
        self.reset();
        TickOutcome::Completed
    }

    /// `MM:SS`; minutes may exceed two digits for long work sessions.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroView {
    pub display: String,
    pub mode: TimerMode,
    pub running: bool,
    pub settings: TimerModes,
}

pub fn render_pomodoro(timer: &PomodoroTimer) -> PomodoroView {
    PomodoroView {
        display: timer.display(),
        mode: timer.mode(),
        running: timer.is_running(),
        settings: timer.modes(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn full_work_session_completes_exactly_once() {
        let mut timer = PomodoroTimer::new(TimerModes::default());
        assert!(timer.start());

        let completions = (0..1500)
            .map(|_| timer.tick())
            .filter(|outcome| *outcome == TickOutcome::Completed)
            .count();
        assert_eq!(completions, 1);
        assert_eq!(timer.remaining_secs(), 1500);
        assert!(!timer.is_running());
        assert_eq!(timer.tick(), TickOutcome::Idle);
    }

    #[test]
    fn ticks_while_stopped_are_ignored() {
        let mut timer = PomodoroTimer::new(TimerModes::default());
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert_eq!(timer.display(), "25:00");

        timer.start();
        timer.tick();
        timer.tick();
        assert_eq!(timer.display(), "24:58");
        timer.pause();
        timer.tick();
        assert_eq!(timer.display(), "24:58");
    }

    #[test]
    fn start_twice_reports_no_transition() {
        let mut timer = PomodoroTimer::new(TimerModes::default());
        assert!(timer.start());
        assert!(!timer.start());
        assert!(timer.pause());
        assert!(!timer.pause());
    }

    #[test]
    fn mode_switch_restores_duration_and_pauses() {
        let mut timer = PomodoroTimer::new(TimerModes::default());
        timer.start();
        timer.tick();
        assert!(timer.set_mode(TimerMode::Short));
        assert_eq!(timer.display(), "05:00");
        assert!(!timer.is_running());

        timer.set_mode(TimerMode::Long);
        assert_eq!(timer.remaining_secs(), 900);
    }

    #[test]
    fn settings_parse_and_validate() {
        assert_eq!(
            parse_timer_settings("50", " 10 ", "20"),
            Ok(TimerModes {
                work: 50,
                short: 10,
                long: 20,
            })
        );
        assert_eq!(
            parse_timer_settings("121", "5", "15"),
            Err(TimerSettingsError::OutOfRange {
                field: "work",
                value: 121,
            })
        );
        assert_eq!(
            parse_timer_settings("25", "0", "15"),
            Err(TimerSettingsError::OutOfRange {
                field: "short",
                value: 0,
            })
        );
        assert!(matches!(
            parse_timer_settings("abc", "5", "15"),
            Err(TimerSettingsError::NotANumber { field: "work", .. })
        ));
        assert_eq!(
            parse_timer_settings("25", "5", "-3"),
            Err(TimerSettingsError::OutOfRange {
                field: "long",
                value: -3,
            })
        );
        assert!(parse_timer_settings("120", "60", "60").is_ok());
    }

    #[test]
    fn applying_modes_resets_current_mode() {
        let mut timer = PomodoroTimer::new(TimerModes::default());
        timer.start();
        timer.apply_modes(TimerModes {
            work: 50,
            short: 10,
            long: 20,
        });
        assert_eq!(timer.display(), "50:00");
        assert!(!timer.is_running());
    }
}
