//! Reducer helpers for the widget windows: countdowns, notes, calendar, focus timer, music.

use chrono::{DateTime, Local, Utc};

use crate::{
    countdowns::{CountdownDraft, CountdownForm},
    model::{DesktopState, WindowId},
    music::{parse_spotify_input, MusicLinkError, MusicSource},
    persistence::Slot,
    pomodoro::{parse_timer_settings, TickOutcome},
    reducer::{toast, DesktopAction, ReducerError, RuntimeEffect},
    toaster::ToastLevel,
    window_manager,
};

fn music_link_message(err: &MusicLinkError) -> &'static str {
    match err {
        MusicLinkError::Empty => "⚠️ Please enter a Spotify URI or link",
        MusicLinkError::InvalidLink => "⚠️ Invalid Spotify link",
        MusicLinkError::InvalidUri => "⚠️ Invalid Spotify URI format",
        MusicLinkError::Unrecognized => "⚠️ Please enter a valid Spotify link or URI",
    }
}

fn stop_ticker_if(was_running: bool, effects: &mut Vec<RuntimeEffect>) {
    if was_running {
        effects.push(RuntimeEffect::StopPomodoroTicker);
    }
}

pub(super) fn reduce_widget_action(
    state: &mut DesktopState,
    action: &DesktopAction,
    now: &DateTime<Local>,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<bool, ReducerError> {
    let now_ms = now.timestamp_millis();
    let now_utc = now.with_timezone(&Utc);

    match action {
        DesktopAction::SelectCountdownIcon { icon } => {
            state.countdown_form.icon = icon.clone();
        }
        DesktopAction::SelectCountdownColor { color } => {
            state.countdown_form.color = color.clone();
        }
        DesktopAction::AddCountdown { name, date, time } => {
            let draft = CountdownDraft {
                name: name.clone(),
                date: date.clone(),
                time: time.clone(),
                icon: state.countdown_form.icon.clone(),
                color: state.countdown_form.color.clone(),
            };
            match state.countdowns.add(draft, &now.timezone()) {
                Ok(_) => {
                    state.countdown_form = CountdownForm::default();
                    effects.push(RuntimeEffect::Persist(Slot::Countdowns));
                    toast(
                        state,
                        ToastLevel::Success,
                        "✨ Countdown added successfully!",
                        now_ms,
                    );
                    window_manager::open_window(state, WindowId::Countdowns);
                }
                Err(err) => {
                    leptos::logging::warn!("countdown rejected: {err}");
                    toast(
                        state,
                        ToastLevel::Error,
                        "⚠️ Please enter a valid event name, date and time",
                        now_ms,
                    );
                }
            }
        }
        DesktopAction::DeleteCountdown { id } => {
            if state.countdowns.remove(id) {
                effects.push(RuntimeEffect::Persist(Slot::Countdowns));
            }
        }

        DesktopAction::CreateNote => {
            state.notes.create(now_utc);
            effects.push(RuntimeEffect::Persist(Slot::Notes));
        }
        DesktopAction::SelectNote { id } => {
            state.notes.select(id);
        }
        DesktopAction::SaveNote { title, content } => {
            if state.notes.save_active(title, content, now_utc) {
                effects.push(RuntimeEffect::Persist(Slot::Notes));
            }
        }
        DesktopAction::ToggleNoteKind => {
            if state.notes.toggle_active_kind().is_some() {
                effects.push(RuntimeEffect::Persist(Slot::Notes));
            }
        }
        DesktopAction::AddChecklistItem { text } => {
            if state.notes.add_item(text, now_utc).is_some() {
                effects.push(RuntimeEffect::Persist(Slot::Notes));
            }
        }
        DesktopAction::ToggleChecklistItem { id } => {
            if state.notes.toggle_item(id, now_utc) {
                effects.push(RuntimeEffect::Persist(Slot::Notes));
            }
        }
        DesktopAction::RemoveChecklistItem { id } => {
            if state.notes.remove_item(id, now_utc) {
                effects.push(RuntimeEffect::Persist(Slot::Notes));
            }
        }
        DesktopAction::RequestDeleteNote => {
            state.notes.request_delete();
        }
        DesktopAction::CancelDeleteNote => {
            state.notes.cancel_delete();
        }
        DesktopAction::ConfirmDeleteNote => {
            if state.notes.confirm_delete().is_some() {
                effects.push(RuntimeEffect::Persist(Slot::Notes));
                toast(state, ToastLevel::Success, "🗑️ Note deleted", now_ms);
            }
        }

        DesktopAction::PreviousMonth => state.calendar.prev_month(),
        DesktopAction::NextMonth => state.calendar.next_month(),

        DesktopAction::StartTimer => {
            if state.pomodoro.start() {
                effects.push(RuntimeEffect::StartPomodoroTicker);
            }
        }
        DesktopAction::PauseTimer => stop_ticker_if(state.pomodoro.pause(), effects),
        DesktopAction::ResetTimer => stop_ticker_if(state.pomodoro.reset(), effects),
        DesktopAction::SetTimerMode { mode } => {
            stop_ticker_if(state.pomodoro.set_mode(*mode), effects)
        }
        DesktopAction::ApplyTimerSettings { work, short, long } => {
            match parse_timer_settings(work, short, long) {
                Ok(modes) => {
                    let was_running = state.pomodoro.apply_modes(modes);
                    effects.push(RuntimeEffect::Persist(Slot::TimerSettings));
                    stop_ticker_if(was_running, effects);
                    toast(state, ToastLevel::Success, "✅ Timer settings saved!", now_ms);
                }
                Err(err) => {
                    leptos::logging::warn!("timer settings rejected: {err}");
                    toast(
                        state,
                        ToastLevel::Error,
                        "⚠️ Please enter valid durations",
                        now_ms,
                    );
                }
            }
        }
        DesktopAction::PomodoroTick => {
            if state.pomodoro.tick() == TickOutcome::Completed {
                effects.push(RuntimeEffect::StopPomodoroTicker);
                toast(state, ToastLevel::Success, "🎉 Time's up! Great work!", now_ms);
            }
        }

        DesktopAction::SelectMusicSource { source } => {
            state.music.source = *source;
        }
        DesktopAction::ToggleDefaultMusic => toggle_default_music(state, now_ms),
        DesktopAction::MenuMusicClick => match state.music.source {
            MusicSource::Default => toggle_default_music(state, now_ms),
            MusicSource::Spotify => {
                toast(
                    state,
                    ToastLevel::Info,
                    "💡 Control Spotify from the Music Player window",
                    now_ms,
                );
                window_manager::open_window(state, WindowId::Music);
            }
        },
        DesktopAction::LoadSpotify { input } => match parse_spotify_input(input) {
            Ok(embed) => {
                state.music.spotify = Some(embed);
                toast(
                    state,
                    ToastLevel::Success,
                    "✅ Spotify player loaded! Make sure you're logged in for full playback.",
                    now_ms,
                );
            }
            Err(err) => toast(state, ToastLevel::Error, music_link_message(&err), now_ms),
        },
        _ => return Ok(false),
    }

    Ok(true)
}

fn toggle_default_music(state: &mut DesktopState, now_ms: i64) {
    let message = if state.music.toggle_default_playback() {
        "🎵 Music playing"
    } else {
        "🎵 Music paused"
    };
    toast(state, ToastLevel::Info, message, now_ms);
}
