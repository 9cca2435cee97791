//! Countdown list: creation, removal, and the per-second remaining-time breakdown.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::EntityId;

pub const DEFAULT_COUNTDOWN_ICON: &str = "📚";
pub const DEFAULT_COUNTDOWN_COLOR: &str = "#FFB3D9";

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub id: EntityId,
    pub name: String,
    /// `YYYY-MM-DD` as entered.
    pub date: String,
    /// `HH:MM` as entered.
    pub time: String,
    pub icon: String,
    pub color: String,
    /// Derived once from `date` + `time` in local time; never recomputed.
    pub target_date_epoch_ms: i64,
}

impl Countdown {
    /// Calendar day of the event, if `date` is well formed.
    pub fn event_date(&self) -> Option<NaiveDate> {
        parse_event_date(&self.date).ok()
    }
}

/// Icon and color picked in the create form; kept across submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownForm {
    pub icon: String,
    pub color: String,
}

impl Default for CountdownForm {
    fn default() -> Self {
        Self {
            icon: DEFAULT_COUNTDOWN_ICON.to_string(),
            color: DEFAULT_COUNTDOWN_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownDraft {
    pub name: String,
    pub date: String,
    pub time: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CountdownError {
    #[error("event name is required")]
    EmptyName,
    #[error("invalid event date `{0}`")]
    InvalidDate(String),
    #[error("invalid event time `{0}`")]
    InvalidTime(String),
    #[error("{date} {time} does not exist in the local time zone")]
    NonexistentLocalTime { date: String, time: String },
}

/// Remaining time until a countdown's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum TimeLeft {
    Expired,
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
}

pub(crate) fn parse_event_date(date: &str) -> Result<NaiveDate, CountdownError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| CountdownError::InvalidDate(date.to_string()))
}

fn parse_event_time(time: &str) -> Result<NaiveTime, CountdownError> {
    let time_trimmed = time.trim();
    NaiveTime::parse_from_str(time_trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time_trimmed, "%H:%M:%S"))
        .map_err(|_| CountdownError::InvalidTime(time.to_string()))
}

/// Resolves `date` + `time` in `tz` to unix milliseconds.
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant.
pub fn parse_target_epoch_ms<Tz: TimeZone>(
    date: &str,
    time: &str,
    tz: &Tz,
) -> Result<i64, CountdownError> {
    let naive = NaiveDateTime::new(parse_event_date(date)?, parse_event_time(time)?);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|instant| instant.timestamp_millis())
        .ok_or_else(|| CountdownError::NonexistentLocalTime {
            date: date.to_string(),
            time: time.to_string(),
        })
}

/// Breaks `target - now` into days/hours/minutes/seconds; negative differences are expired.
pub fn time_left(target_ms: i64, now_ms: i64) -> TimeLeft {
    let difference = target_ms.saturating_sub(now_ms);
    if difference < 0 {
        return TimeLeft::Expired;
    }
    TimeLeft::Remaining {
        days: difference / MS_PER_DAY,
        hours: (difference % MS_PER_DAY) / MS_PER_HOUR,
        minutes: (difference % MS_PER_HOUR) / MS_PER_MINUTE,
        seconds: (difference % MS_PER_MINUTE) / MS_PER_SECOND,
    }
}

/// Long display form, e.g. `Monday, January 1, 2024 at 09:00 AM`.
pub fn format_event_date(date: &str, time: &str) -> Option<String> {
    let date = parse_event_date(date).ok()?;
    let time = parse_event_time(time).ok()?;
    Some(format!(
        "{} at {}",
        date.format("%A, %B %-d, %Y"),
        time.format("%I:%M %p")
    ))
}

/// The countdown collection, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountdownBook {
    items: Vec<Countdown>,
}

impl CountdownBook {
    pub fn from_items(items: Vec<Countdown>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Countdown] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Validates `draft`, derives its target instant in `tz`, and appends it.
    pub fn add<Tz: TimeZone>(
        &mut self,
        draft: CountdownDraft,
        tz: &Tz,
    ) -> Result<EntityId, CountdownError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(CountdownError::EmptyName);
        }
        let target_date_epoch_ms = parse_target_epoch_ms(&draft.date, &draft.time, tz)?;
        let id = EntityId::generate();
        self.items.push(Countdown {
            id: id.clone(),
            name: name.to_string(),
            date: draft.date.trim().to_string(),
            time: draft.time.trim().to_string(),
            icon: draft.icon,
            color: draft.color,
            target_date_epoch_ms,
        });
        Ok(id)
    }

    /// Removes the countdown with `id`; returns whether one was removed.
    pub fn remove(&mut self, id: &EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|c| &c.id != id);
        self.items.len() != before
    }

    /// Countdowns ordered by target instant, soonest first. Ties keep insertion order.
    pub fn sorted_by_target(&self) -> Vec<&Countdown> {
        let mut sorted = self.items.iter().collect::<Vec<_>>();
        sorted.sort_by_key(|c| c.target_date_epoch_ms);
        sorted
    }

    /// The next `limit` countdowns whose target is still in the future.
    pub fn upcoming(&self, now_ms: i64, limit: usize) -> Vec<&Countdown> {
        self.sorted_by_target()
            .into_iter()
            .filter(|c| c.target_date_epoch_ms > now_ms)
            .take(limit)
            .collect()
    }

    /// Calendar days that carry at least one countdown.
    pub fn event_dates(&self) -> Vec<NaiveDate> {
        let mut dates = self
            .items
            .iter()
            .filter_map(Countdown::event_date)
            .collect::<Vec<_>>();
        dates.sort();
        dates.dedup();
        dates
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountdownCard {
    pub id: EntityId,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub formatted_date: String,
    pub time_left: TimeLeft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingEvent {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub formatted_date: String,
}

fn display_date(countdown: &Countdown) -> String {
    format_event_date(&countdown.date, &countdown.time)
        .unwrap_or_else(|| format!("{} {}", countdown.date, countdown.time))
}

/// Builds the countdown cards for `now_ms`. Output depends only on the book and the clock.
pub fn render_cards(book: &CountdownBook, now_ms: i64) -> Vec<CountdownCard> {
    book.sorted_by_target()
        .into_iter()
        .map(|countdown| CountdownCard {
            id: countdown.id.clone(),
            name: countdown.name.clone(),
            icon: countdown.icon.clone(),
            color: countdown.color.clone(),
            formatted_date: display_date(countdown),
            time_left: time_left(countdown.target_date_epoch_ms, now_ms),
        })
        .collect()
}

pub fn render_upcoming(book: &CountdownBook, now_ms: i64, limit: usize) -> Vec<UpcomingEvent> {
    book.upcoming(now_ms, limit)
        .into_iter()
        .map(|countdown| UpcomingEvent {
            name: countdown.name.clone(),
            icon: countdown.icon.clone(),
            color: countdown.color.clone(),
            formatted_date: display_date(countdown),
        })
        .collect()
}
