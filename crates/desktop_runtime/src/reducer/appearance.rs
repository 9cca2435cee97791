//! Reducer helpers for desktop theme and wallpaper transitions.

use crate::{
    appearance::Wallpaper,
    model::DesktopState,
    persistence::Slot,
    reducer::{toast, DesktopAction, ReducerError, RuntimeEffect},
    toaster::ToastLevel,
};

fn replace_wallpaper(
    state: &mut DesktopState,
    wallpaper: Wallpaper,
    effects: &mut Vec<RuntimeEffect>,
) {
    state.appearance.wallpaper = wallpaper;
    effects.push(RuntimeEffect::Persist(Slot::Wallpaper));
    effects.push(RuntimeEffect::ApplyWallpaper);
}

pub(super) fn reduce_appearance_action(
    state: &mut DesktopState,
    action: &DesktopAction,
    now_ms: i64,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<bool, ReducerError> {
    match action {
        DesktopAction::ToggleTheme => {
            state.appearance.theme = state.appearance.theme.toggled();
            effects.push(RuntimeEffect::Persist(Slot::Theme));
            effects.push(RuntimeEffect::ApplyTheme);
        }
        DesktopAction::SelectWallpaperPreset { name } => match Wallpaper::preset(name) {
            Ok(wallpaper) => replace_wallpaper(state, wallpaper, effects),
            Err(err) => {
                leptos::logging::warn!("wallpaper preset rejected: {err}");
                toast(state, ToastLevel::Error, "⚠️ Unknown wallpaper", now_ms);
            }
        },
        DesktopAction::SetSolidWallpaper { color } => match Wallpaper::solid(color) {
            Ok(wallpaper) => {
                replace_wallpaper(state, wallpaper, effects);
                toast(state, ToastLevel::Success, "✅ Wallpaper updated!", now_ms);
            }
            Err(_) => toast(state, ToastLevel::Error, "⚠️ Please pick a color", now_ms),
        },
        DesktopAction::SetWallpaperImage { data_url } => match Wallpaper::image(data_url) {
            Ok(wallpaper) => {
                replace_wallpaper(state, wallpaper, effects);
                toast(state, ToastLevel::Success, "✅ Wallpaper updated!", now_ms);
            }
            Err(_) => toast(state, ToastLevel::Error, "⚠️ Could not read image", now_ms),
        },
        DesktopAction::RemoveWallpaperImage => {
            replace_wallpaper(state, Wallpaper::default(), effects);
            toast(state, ToastLevel::Success, "✅ Wallpaper reset!", now_ms);
        }
        DesktopAction::ResetWallpaper => {
            replace_wallpaper(state, Wallpaper::default(), effects);
            toast(
                state,
                ToastLevel::Success,
                "✅ Wallpaper reset to default!",
                now_ms,
            );
        }
        _ => return Ok(false),
    }

    Ok(true)
}
