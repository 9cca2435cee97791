//! Window-manager transition helpers used by the desktop reducer.
//!
//! Stacking uses a single monotonically increasing counter: raising a window hands it the next
//! counter value, so the highest z-index is always the frontmost window.

use crate::{
    config::ShellConfig,
    model::{
        DesktopState, DragSession, InteractionState, PointerPosition, Viewport, WindowId,
        WindowRect, WindowRecord,
    },
};

/// What a dock click did to its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockOutcome {
    Opened,
    Raised,
    Minimized,
}

fn window_mut(state: &mut DesktopState, window_id: WindowId) -> Option<&mut WindowRecord> {
    state.windows.iter_mut().find(|w| w.id == window_id)
}

/// Assigns the next stack order to `window_id` and returns it.
pub fn raise_window(state: &mut DesktopState, window_id: WindowId) -> Option<u32> {
    let next = state.stack_counter.saturating_add(1);
    let window = window_mut(state, window_id)?;
    window.z_index = next;
    state.stack_counter = next;
    Some(next)
}

/// Shows `window_id` (restoring it if minimized) and brings it to the front.
pub fn open_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = window_mut(state, window_id) else {
        return false;
    };
    window.is_open = true;
    window.minimized = false;
    raise_window(state, window_id).is_some()
}

pub fn close_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = window_mut(state, window_id) else {
        return false;
    };
    window.is_open = false;
    window.minimized = false;
    true
}

pub fn minimize_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = window_mut(state, window_id) else {
        return false;
    };
    if window.is_open {
        window.minimized = true;
    }
    true
}

/// Rect of the fixed large footprint used by maximized windows.
pub fn maximized_rect(config: &ShellConfig, viewport: Viewport) -> WindowRect {
    let footprint = config.maximize;
    WindowRect {
        x: viewport.width * footprint.left_pct / 100,
        y: footprint.top_px,
        w: viewport.width * footprint.width_pct / 100,
        h: viewport.height * footprint.height_pct / 100,
    }
}

/// Toggles between the normal rect and the maximized footprint.
///
/// Returns the new maximized flag.
pub fn toggle_maximize(state: &mut DesktopState, window_id: WindowId) -> Option<bool> {
    let large = maximized_rect(&state.config, state.viewport);
    let window = window_mut(state, window_id)?;
    if window.maximized {
        if let Some(restore) = window.restore_rect.take() {
            window.rect = restore;
        }
        window.maximized = false;
    } else {
        window.restore_rect = Some(window.rect);
        window.rect = large;
        window.maximized = true;
    }
    Some(window.maximized)
}

/// Dock click: open a closed window, minimize the frontmost one, raise any other.
pub fn toggle_dock_item(state: &mut DesktopState, window_id: WindowId) -> Option<DockOutcome> {
    let window = state.window(window_id)?;
    if !window.is_visible() {
        open_window(state, window_id);
        return Some(DockOutcome::Opened);
    }
    if state.frontmost_window_id() == Some(window_id) {
        minimize_window(state, window_id);
        Some(DockOutcome::Minimized)
    } else {
        raise_window(state, window_id);
        Some(DockOutcome::Raised)
    }
}

/// Clamps a proposed top-left so the window stays on screen and clear of the dock.
///
/// When a window is larger than the available range the lower bound wins.
pub fn clamp_window_origin(
    config: &ShellConfig,
    viewport: Viewport,
    rect: WindowRect,
    proposed: PointerPosition,
) -> PointerPosition {
    let max_x = viewport.width - rect.w;
    let max_y = viewport.height - rect.h - config.reserved_bottom;
    PointerPosition {
        x: proposed.x.min(max_x).max(0),
        y: proposed.y.min(max_y).max(config.min_window_top),
    }
}

/// Starts dragging `window_id`, replacing any drag already in progress, and raises it.
pub fn begin_drag(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    window_id: WindowId,
    pointer: PointerPosition,
) -> bool {
    let Some(window) = state.window(window_id) else {
        return false;
    };
    let offset = PointerPosition {
        x: pointer.x - window.rect.x,
        y: pointer.y - window.rect.y,
    };
    interaction.dragging = Some(DragSession { window_id, offset });
    raise_window(state, window_id);
    true
}

/// Moves the dragged window to `pointer - offset`, clamped. Ignored while idle.
pub fn update_drag(
    state: &mut DesktopState,
    interaction: &InteractionState,
    pointer: PointerPosition,
) -> bool {
    let Some(session) = interaction.dragging else {
        return false;
    };
    let config = state.config.clone();
    let viewport = state.viewport;
    let Some(window) = window_mut(state, session.window_id) else {
        return false;
    };
    if window.maximized {
        return false;
    }

    let proposed = PointerPosition {
        x: pointer.x - session.offset.x,
        y: pointer.y - session.offset.y,
    };
    let origin = clamp_window_origin(&config, viewport, window.rect, proposed);
    let moved = origin.x != window.rect.x || origin.y != window.rect.y;
    window.rect.x = origin.x;
    window.rect.y = origin.y;
    moved
}

pub fn end_drag(interaction: &mut InteractionState) -> Option<WindowId> {
    interaction.dragging.take().map(|session| session.window_id)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn state() -> DesktopState {
        let mut state = DesktopState::new(
            ShellConfig::default(),
            NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"),
        );
        state.viewport = Viewport {
            width: 1200,
            height: 800,
        };
        state
    }

    fn record(state: &DesktopState, id: WindowId) -> WindowRecord {
        state.window(id).expect("window").clone()
    }

    #[test]
    fn raising_hands_out_increasing_stack_orders() {
        let mut state = state();
        open_window(&mut state, WindowId::Notes);
        open_window(&mut state, WindowId::Calendar);
        assert_eq!(record(&state, WindowId::Notes).z_index, 101);
        assert_eq!(record(&state, WindowId::Calendar).z_index, 102);

        raise_window(&mut state, WindowId::Notes);
        assert_eq!(record(&state, WindowId::Notes).z_index, 103);
        assert_eq!(state.frontmost_window_id(), Some(WindowId::Notes));
    }

    #[test]
    fn dock_click_cycles_open_raise_minimize() {
        let mut state = state();
        assert_eq!(
            toggle_dock_item(&mut state, WindowId::Music),
            Some(DockOutcome::Opened)
        );
        open_window(&mut state, WindowId::Notes);
        assert_eq!(
            toggle_dock_item(&mut state, WindowId::Music),
            Some(DockOutcome::Raised)
        );
        assert_eq!(
            toggle_dock_item(&mut state, WindowId::Music),
            Some(DockOutcome::Minimized)
        );
        assert!(!record(&state, WindowId::Music).is_visible());
        assert_eq!(
            toggle_dock_item(&mut state, WindowId::Music),
            Some(DockOutcome::Opened)
        );
        assert!(record(&state, WindowId::Music).is_visible());
    }

    #[test]
    fn maximize_is_a_binary_toggle_that_restores_the_rect() {
        let mut state = state();
        open_window(&mut state, WindowId::Notes);
        let original = record(&state, WindowId::Notes).rect;

        assert_eq!(toggle_maximize(&mut state, WindowId::Notes), Some(true));
        assert_eq!(
            record(&state, WindowId::Notes).rect,
            WindowRect {
                x: 60,
                y: 50,
                w: 1080,
                h: 680,
            }
        );

        assert_eq!(toggle_maximize(&mut state, WindowId::Notes), Some(false));
        assert_eq!(record(&state, WindowId::Notes).rect, original);
        assert_eq!(record(&state, WindowId::Notes).restore_rect, None);
    }

    #[test]
    fn drag_keeps_pointer_offset_and_clamps_to_viewport() {
        let mut state = state();
        let mut interaction = InteractionState::default();
        open_window(&mut state, WindowId::Pomodoro);
        let start = record(&state, WindowId::Pomodoro).rect;

        let grab = PointerPosition {
            x: start.x + 15,
            y: start.y + 10,
        };
        assert!(begin_drag(&mut state, &mut interaction, WindowId::Pomodoro, grab));
        update_drag(
            &mut state,
            &interaction,
            PointerPosition {
                x: grab.x + 40,
                y: grab.y + 30,
            },
        );
        let moved = record(&state, WindowId::Pomodoro).rect;
        assert_eq!((moved.x, moved.y), (start.x + 40, start.y + 30));

        update_drag(&mut state, &interaction, PointerPosition { x: -500, y: -500 });
        let clamped = record(&state, WindowId::Pomodoro).rect;
        assert_eq!((clamped.x, clamped.y), (0, 28));

        update_drag(&mut state, &interaction, PointerPosition { x: 5000, y: 5000 });
        let clamped = record(&state, WindowId::Pomodoro).rect;
        assert_eq!(clamped.x, 1200 - clamped.w);
        assert_eq!(clamped.y, 800 - clamped.h - 100);
    }

    #[test]
    fn oversized_window_clamps_to_lower_bounds() {
        let config = ShellConfig::default();
        let origin = clamp_window_origin(
            &config,
            Viewport {
                width: 300,
                height: 200,
            },
            WindowRect {
                x: 0,
                y: 0,
                w: 640,
                h: 420,
            },
            PointerPosition { x: 50, y: 50 },
        );
        assert_eq!(origin, PointerPosition { x: 0, y: 28 });
    }

    #[test]
    fn new_drag_replaces_previous_and_end_returns_idle() {
        let mut state = state();
        let mut interaction = InteractionState::default();
        open_window(&mut state, WindowId::Notes);
        open_window(&mut state, WindowId::Calendar);

        begin_drag(
            &mut state,
            &mut interaction,
            WindowId::Notes,
            PointerPosition { x: 200, y: 100 },
        );
        begin_drag(
            &mut state,
            &mut interaction,
            WindowId::Calendar,
            PointerPosition { x: 300, y: 200 },
        );
        assert_eq!(
            interaction.dragging.map(|s| s.window_id),
            Some(WindowId::Calendar)
        );
        assert_eq!(state.frontmost_window_id(), Some(WindowId::Calendar));

        assert_eq!(end_drag(&mut interaction), Some(WindowId::Calendar));
        assert!(!update_drag(
            &mut state,
            &interaction,
            PointerPosition { x: 0, y: 0 }
        ));
    }
}
