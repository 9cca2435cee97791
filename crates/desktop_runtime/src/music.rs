//! Music player state and Spotify embed link parsing.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotifyKind {
    Playlist,
    Album,
    Track,
}

impl SpotifyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Playlist => "playlist",
            Self::Album => "album",
            Self::Track => "track",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "playlist" => Some(Self::Playlist),
            "album" => Some(Self::Album),
            "track" => Some(Self::Track),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyEmbed {
    pub kind: SpotifyKind,
    pub id: String,
}

impl SpotifyEmbed {
    pub fn embed_url(&self) -> String {
        format!(
            "https://open.spotify.com/embed/{}/{}",
            self.kind.as_str(),
            self.id
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MusicLinkError {
    #[error("no Spotify link or URI given")]
    Empty,
    #[error("not a playlist, album, or track link")]
    InvalidLink,
    #[error("expected `spotify:<type>:<id>`")]
    InvalidUri,
    #[error("not a Spotify link or URI")]
    Unrecognized,
}

fn link_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"open\.spotify\.com/(playlist|album|track)/([a-zA-Z0-9]+)").ok()
        })
        .as_ref()
}

fn is_spotify_id(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Accepts `https://open.spotify.com/<type>/<id>` links and `spotify:<type>:<id>` URIs.
pub fn parse_spotify_input(input: &str) -> Result<SpotifyEmbed, MusicLinkError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(MusicLinkError::Empty);
    }

    if input.contains("open.spotify.com") {
        let captures = link_pattern()
            .and_then(|pattern| pattern.captures(input))
            .ok_or(MusicLinkError::InvalidLink)?;
        let kind = captures
            .get(1)
            .and_then(|m| SpotifyKind::parse(m.as_str()))
            .ok_or(MusicLinkError::InvalidLink)?;
        let id = captures
            .get(2)
            .map(|m| m.as_str().to_string())
            .ok_or(MusicLinkError::InvalidLink)?;
        return Ok(SpotifyEmbed { kind, id });
    }

    if let Some(rest) = input.strip_prefix("spotify:") {
        let mut parts = rest.split(':');
        let (Some(kind), Some(id), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MusicLinkError::InvalidUri);
        };
        let kind = SpotifyKind::parse(kind).ok_or(MusicLinkError::InvalidUri)?;
        if !is_spotify_id(id) {
            return Err(MusicLinkError::InvalidUri);
        }
        return Ok(SpotifyEmbed {
            kind,
            id: id.to_string(),
        });
    }

    Err(MusicLinkError::Unrecognized)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicSource {
    /// The bundled background track.
    #[default]
    Default,
    Spotify,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MusicState {
    pub source: MusicSource,
    pub default_playing: bool,
    pub spotify: Option<SpotifyEmbed>,
}

impl MusicState {
    /// Flips the bundled track and returns the new playing flag.
    pub fn toggle_default_playback(&mut self) -> bool {
        self.default_playing = !self.default_playing;
        self.default_playing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicView {
    pub source: MusicSource,
    pub default_playing: bool,
    pub play_icon: &'static str,
    pub embed_url: Option<String>,
}

pub fn render_music(music: &MusicState) -> MusicView {
    MusicView {
        source: music.source,
        default_playing: music.default_playing,
        play_icon: if music.default_playing { "⏸️" } else { "▶️" },
        embed_url: music.spotify.as_ref().map(SpotifyEmbed::embed_url),
    }
}
