//! Theme and wallpaper selection.
//!
//! A wallpaper is persisted as a single tagged string: a preset name, `solid:<color>`, or
//! `image:<data-url>`. Parsing and formatting round-trip losslessly.

use std::{fmt, str::FromStr};

use platform_host::DesktopBackground;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Menu-bar toggle glyph: the theme a click switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Built-in gradient wallpaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallpaperPreset {
    pub name: &'static str,
    pub css: &'static str,
}

pub const DEFAULT_WALLPAPER_PRESET: &str = "gradient-pink";

pub static WALLPAPER_PRESETS: [WallpaperPreset; 6] = [
    WallpaperPreset {
        name: "gradient-pink",
        css: "linear-gradient(135deg, #FFE5EC 0%, #E5E5FF 50%, #E5FFF0 100%)",
    },
    WallpaperPreset {
        name: "gradient-blue",
        css: "linear-gradient(135deg, #E0F4FF 0%, #D4E7FF 50%, #E0F0FF 100%)",
    },
    WallpaperPreset {
        name: "gradient-purple",
        css: "linear-gradient(135deg, #F0E5FF 0%, #E5D4FF 50%, #F5E5FF 100%)",
    },
    WallpaperPreset {
        name: "gradient-green",
        css: "linear-gradient(135deg, #E5FFF0 0%, #D4FFE5 50%, #E5FFEA 100%)",
    },
    WallpaperPreset {
        name: "gradient-sunset",
        css: "linear-gradient(135deg, #FFE5D9 0%, #FFDAB9 50%, #FFE5D4 100%)",
    },
    WallpaperPreset {
        name: "gradient-ocean",
        css: "linear-gradient(135deg, #D4F4FF 0%, #B4E4FF 50%, #D4EEFF 100%)",
    },
];

pub fn preset_by_name(name: &str) -> Option<&'static WallpaperPreset> {
    WALLPAPER_PRESETS.iter().find(|preset| preset.name == name)
}

const SOLID_PREFIX: &str = "solid:";
const IMAGE_PREFIX: &str = "image:";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WallpaperParseError {
    #[error("unknown wallpaper preset `{0}`")]
    UnknownPreset(String),
    #[error("solid wallpaper needs a color")]
    EmptyColor,
    #[error("image wallpaper needs a data url")]
    EmptyImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Wallpaper {
    Preset(String),
    Solid(String),
    Image(String),
}

impl Default for Wallpaper {
    fn default() -> Self {
        Self::Preset(DEFAULT_WALLPAPER_PRESET.to_string())
    }
}

impl Wallpaper {
    pub fn preset(name: &str) -> Result<Self, WallpaperParseError> {
        preset_by_name(name)
            .map(|preset| Self::Preset(preset.name.to_string()))
            .ok_or_else(|| WallpaperParseError::UnknownPreset(name.to_string()))
    }

    pub fn solid(color: &str) -> Result<Self, WallpaperParseError> {
        if color.trim().is_empty() {
            return Err(WallpaperParseError::EmptyColor);
        }
        Ok(Self::Solid(color.to_string()))
    }

    pub fn image(data_url: &str) -> Result<Self, WallpaperParseError> {
        if data_url.is_empty() {
            return Err(WallpaperParseError::EmptyImage);
        }
        Ok(Self::Image(data_url.to_string()))
    }
}

impl FromStr for Wallpaper {
    type Err = WallpaperParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(color) = raw.strip_prefix(SOLID_PREFIX) {
            Self::solid(color)
        } else if let Some(data_url) = raw.strip_prefix(IMAGE_PREFIX) {
            Self::image(data_url)
        } else {
            Self::preset(raw)
        }
    }
}

impl fmt::Display for Wallpaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preset(name) => f.write_str(name),
            Self::Solid(color) => write!(f, "{SOLID_PREFIX}{color}"),
            Self::Image(data_url) => write!(f, "{IMAGE_PREFIX}{data_url}"),
        }
    }
}

impl TryFrom<String> for Wallpaper {
    type Error = WallpaperParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<Wallpaper> for String {
    fn from(wallpaper: Wallpaper) -> Self {
        wallpaper.to_string()
    }
}

/// Maps a wallpaper to the background the document should render.
pub fn resolve_background(wallpaper: &Wallpaper) -> DesktopBackground {
    match wallpaper {
        Wallpaper::Preset(name) => {
            let preset = preset_by_name(name).unwrap_or(&WALLPAPER_PRESETS[0]);
            DesktopBackground::Gradient(preset.css.to_string())
        }
        Wallpaper::Solid(color) => DesktopBackground::Flat(color.clone()),
        Wallpaper::Image(data_url) => DesktopBackground::Image(data_url.clone()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppearanceState {
    pub theme: Theme,
    pub wallpaper: Wallpaper,
}

impl AppearanceState {
    /// Preset highlighted in settings; `None` for solid colors and images.
    pub fn active_preset(&self) -> Option<&str> {
        match &self.wallpaper {
            Wallpaper::Preset(name) => Some(name),
            _ => None,
        }
    }

    pub fn has_custom_image(&self) -> bool {
        matches!(self.wallpaper, Wallpaper::Image(_))
    }
}
