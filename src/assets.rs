//! Asset collaborator.
//!
//! Missing or unreadable assets are never fatal.  A sound that cannot be
//! loaded becomes [`SoundAsset::Silent`]; backgrounds fall back from
//! animated art to static art to a solid fill colour.  Every fallback is
//! logged once at load time.
//!
//! Backgrounds are text art for the terminal frontend:
//! `dynamic_bg_N.txt` holds several frames separated by a line containing
//! only `---`; `static_bg_N.txt` holds a single frame.

use std::path::Path;

use tracing::{debug, warn};

use crate::entities::{Rgb, SoundEffect};

/// Number of per-level background slots probed on disk.
const BACKGROUND_SLOTS: usize = 4;
const FRAME_SEPARATOR: &str = "---";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SoundAsset {
    Loaded(Vec<u8>),
    Silent,
}

impl SoundAsset {
    pub fn is_silent(&self) -> bool {
        matches!(self, SoundAsset::Silent)
    }
}

pub fn sound_file(effect: SoundEffect) -> &'static str {
    match effect {
        SoundEffect::Shoot => "shoot.wav",
        SoundEffect::AlienShoot => "alien_shoot.wav",
        SoundEffect::Explosion => "explosion.wav",
        SoundEffect::ShieldHit => "shield_hit.wav",
    }
}

/// Load a sound; missing, unreadable or empty files resolve to silence.
pub fn load_sound(path: &Path) -> SoundAsset {
    match std::fs::read(path) {
        Ok(bytes) if !bytes.is_empty() => {
            debug!(path = %path.display(), "loaded sound");
            SoundAsset::Loaded(bytes)
        }
        Ok(_) => {
            warn!(path = %path.display(), "empty sound file, using silence");
            SoundAsset::Silent
        }
        Err(e) => {
            warn!(path = %path.display(), "sound unavailable ({e}), using silence");
            SoundAsset::Silent
        }
    }
}

// ── Backgrounds ───────────────────────────────────────────────────────────────

/// One frame of text art.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextArt {
    pub lines: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background<'a> {
    Animated(&'a [TextArt]),
    Static(&'a TextArt),
    Solid(Rgb),
}

#[derive(Clone, Debug)]
pub struct Backgrounds {
    pub dynamic: Vec<Vec<TextArt>>,
    pub statics: Vec<TextArt>,
    pub fallback: Rgb,
}

fn parse_frames(text: &str) -> Vec<TextArt> {
    let mut frames = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim() == FRAME_SEPARATOR {
            if !current.is_empty() {
                frames.push(TextArt { lines: std::mem::take(&mut current) });
            }
        } else {
            current.push(line.to_string());
        }
    }
    if !current.is_empty() {
        frames.push(TextArt { lines: current });
    }
    frames
}

fn read_art(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            debug!(path = %path.display(), "background unavailable: {e}");
            None
        }
    }
}

impl Backgrounds {
    /// Probe `dir` for animated art first; static art is only loaded when
    /// no animated art was found.
    pub fn load(dir: &Path, fallback: Rgb) -> Self {
        let dynamic: Vec<Vec<TextArt>> = (1..=BACKGROUND_SLOTS)
            .filter_map(|n| read_art(&dir.join(format!("dynamic_bg_{n}.txt"))))
            .map(|text| parse_frames(&text))
            .filter(|frames| !frames.is_empty())
            .collect();

        let statics: Vec<TextArt> = if dynamic.is_empty() {
            (1..=BACKGROUND_SLOTS)
                .filter_map(|n| read_art(&dir.join(format!("static_bg_{n}.txt"))))
                .map(|text| TextArt { lines: text.lines().map(str::to_string).collect() })
                .collect()
        } else {
            Vec::new()
        };

        if dynamic.is_empty() && statics.is_empty() {
            warn!(dir = %dir.display(), "no background art found, using solid fill");
        }
        Backgrounds { dynamic, statics, fallback }
    }

    /// Background for `level` (1-based), cycling through what was loaded.
    pub fn for_level(&self, level: u32) -> Background<'_> {
        let index = (level.saturating_sub(1) as usize).min(BACKGROUND_SLOTS);
        if !self.dynamic.is_empty() {
            Background::Animated(&self.dynamic[index % self.dynamic.len()])
        } else if !self.statics.is_empty() {
            Background::Static(&self.statics[index % self.statics.len()])
        } else {
            Background::Solid(self.fallback)
        }
    }
}
