//! Reducer helpers for window chrome: open/close, stacking, dock, and header drags.

use crate::{
    model::{DesktopState, InteractionState, WindowId},
    reducer::{DesktopAction, ReducerError},
    window_manager,
};

fn found(ok: bool) -> Result<(), ReducerError> {
    if ok {
        Ok(())
    } else {
        Err(ReducerError::WindowNotFound)
    }
}

pub(super) fn reduce_window_action(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: &DesktopAction,
) -> Result<bool, ReducerError> {
    match action {
        DesktopAction::OpenWindow { window_id } => {
            found(window_manager::open_window(state, *window_id))?;
        }
        DesktopAction::OpenFinderApp { app } => {
            let window_id = WindowId::from_finder_app(app)
                .ok_or_else(|| ReducerError::UnknownApp(app.clone()))?;
            found(window_manager::open_window(state, window_id))?;
        }
        DesktopAction::CloseWindow { window_id } => {
            found(window_manager::close_window(state, *window_id))?;
            if interaction.dragging.map(|s| s.window_id) == Some(*window_id) {
                window_manager::end_drag(interaction);
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            window_manager::raise_window(state, *window_id).ok_or(ReducerError::WindowNotFound)?;
        }
        DesktopAction::MinimizeWindow { window_id } => {
            found(window_manager::minimize_window(state, *window_id))?;
        }
        DesktopAction::ToggleMaximize { window_id } => {
            window_manager::toggle_maximize(state, *window_id)
                .ok_or(ReducerError::WindowNotFound)?;
        }
        DesktopAction::ToggleDockItem { window_id } => {
            window_manager::toggle_dock_item(state, *window_id)
                .ok_or(ReducerError::WindowNotFound)?;
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            found(window_manager::begin_drag(
                state,
                interaction,
                *window_id,
                *pointer,
            ))?;
        }
        DesktopAction::UpdateMove { pointer } => {
            window_manager::update_drag(state, interaction, *pointer);
        }
        DesktopAction::EndMove => {
            window_manager::end_drag(interaction);
        }
        DesktopAction::SetViewport { viewport } => {
            state.viewport = *viewport;
            let large = window_manager::maximized_rect(&state.config, *viewport);
            for window in state.windows.iter_mut().filter(|w| w.maximized) {
                window.rect = large;
            }
        }
        _ => return Ok(false),
    }

    Ok(true)
}
