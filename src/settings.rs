//! Game configuration.
//!
//! [`Settings`] holds the static values (screen size, entity sizes, caps,
//! feedback tuning) and a [`DynamicSettings`] block that is reset on every
//! new game and scaled as levels are cleared.  Static values may be
//! overridden from a TOML file; any key left out keeps its default, so a
//! minimal file can override just the values you care about:
//!
//! ```toml
//! screen_width = 1000
//! bullets_allowed = 5
//! max_levels = 3
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::entities::{Difficulty, Rgb};
use crate::error::GameError;

/// Values that change during a game and are reset by
/// [`Settings::initialize_dynamic_settings`].
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicSettings {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    /// Alien speed chosen by the difficulty preset; level factors scale it.
    pub base_alien_speed: f32,
    pub alien_bullet_speed: f32,
    /// Minimum milliseconds between alien volleys.
    pub alien_fire_frequency: u64,
    /// +1.0 moves the fleet right, -1.0 left.
    pub fleet_direction: f32,
    pub alien_points: u32,
}

impl Default for DynamicSettings {
    fn default() -> Self {
        DynamicSettings {
            ship_speed: 1.5,
            bullet_speed: 2.5,
            alien_speed: 1.0,
            base_alien_speed: 1.0,
            alien_bullet_speed: 1.5,
            alien_fire_frequency: 1000,
            fleet_direction: 1.0,
            alien_points: 50,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Screen ────────────────────────────────────────────────────────────────
    pub screen_width: i32,
    pub screen_height: i32,
    pub bg_color: Rgb,

    // ── Ship ──────────────────────────────────────────────────────────────────
    pub ship_width: i32,
    pub ship_height: i32,
    pub ship_limit: u32,
    pub max_shield: f32,
    pub shield_recharge_rate: f32,

    // ── Player bullets ────────────────────────────────────────────────────────
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_color: Rgb,
    pub bullets_allowed: usize,

    // ── Alien bullets ─────────────────────────────────────────────────────────
    pub alien_bullet_width: i32,
    pub alien_bullet_height: i32,
    pub alien_bullet_color: Rgb,
    pub alien_bullets_allowed: usize,
    pub alien_bullet_damage: f32,
    /// Width of the column buckets used to pick the front-row shooter.
    pub fire_bucket_width: i32,

    // ── Aliens ────────────────────────────────────────────────────────────────
    pub alien_width: i32,
    pub alien_height: i32,
    pub alien_edge_margin: i32,
    pub fleet_drop_speed: i32,

    // ── Progression ───────────────────────────────────────────────────────────
    pub max_levels: u32,
    pub speedup_scale: f32,
    pub score_scale: f32,

    // ── Feedback ──────────────────────────────────────────────────────────────
    pub shake_duration: u32,
    pub shake_intensity: i32,
    pub destroy_duration_ms: u64,
    /// Destruction progress after which the ship's explosion burst appears.
    pub destroy_burst_at: f32,
    pub destroy_burst_count: usize,

    #[serde(skip)]
    pub dynamic: DynamicSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            screen_width: 1200,
            screen_height: 800,
            bg_color: Rgb(10, 10, 30),

            ship_width: 60,
            ship_height: 48,
            ship_limit: 3,
            max_shield: 100.0,
            shield_recharge_rate: 0.01,

            bullet_width: 3,
            bullet_height: 15,
            bullet_color: Rgb(120, 220, 255),
            bullets_allowed: 3,

            alien_bullet_width: 3,
            alien_bullet_height: 15,
            alien_bullet_color: Rgb(255, 50, 50),
            alien_bullets_allowed: 3,
            alien_bullet_damage: 25.0,
            fire_bucket_width: 50,

            alien_width: 60,
            alien_height: 58,
            alien_edge_margin: 0,
            fleet_drop_speed: 10,

            max_levels: 4,
            speedup_scale: 1.1,
            score_scale: 1.5,

            shake_duration: 10,
            shake_intensity: 5,
            destroy_duration_ms: 1000,
            destroy_burst_at: 0.3,
            destroy_burst_count: 100,

            dynamic: DynamicSettings::default(),
        }
    }
}

// ── Level table ───────────────────────────────────────────────────────────────

/// Per-level tuning: a factor on the difficulty's alien speed and the
/// points awarded per alien.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelProfile {
    pub alien_speed_factor: f32,
    pub alien_points: u32,
}

const LEVEL_TABLE: [LevelProfile; 4] = [
    LevelProfile { alien_speed_factor: 1.0, alien_points: 50 },
    LevelProfile { alien_speed_factor: 1.2, alien_points: 75 },
    LevelProfile { alien_speed_factor: 1.5, alien_points: 100 },
    LevelProfile { alien_speed_factor: 1.8, alien_points: 150 },
];

pub fn level_profile(level: u32) -> Option<LevelProfile> {
    let index = level.checked_sub(1)? as usize;
    LEVEL_TABLE.get(index).copied()
}

impl Settings {
    /// Reset everything that changes during a game.
    pub fn initialize_dynamic_settings(&mut self) {
        self.dynamic = DynamicSettings::default();
    }

    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        let (ship, alien, alien_bullet, fire_ms) = match difficulty {
            Difficulty::Easy => (2.0, 0.5, 1.0, 2000),
            Difficulty::Normal => (1.5, 1.0, 1.5, 1000),
            Difficulty::Hard => (1.2, 1.5, 2.0, 500),
        };
        let d = &mut self.dynamic;
        d.ship_speed = ship;
        d.alien_speed = alien;
        d.base_alien_speed = alien;
        d.alien_bullet_speed = alien_bullet;
        d.alien_fire_frequency = fire_ms;
    }

    /// Load the alien speed and point value for `level`.  Levels outside the
    /// table leave the current values untouched.
    pub fn load_level(&mut self, level: u32) {
        if let Some(profile) = level_profile(level) {
            self.dynamic.alien_speed = self.dynamic.base_alien_speed * profile.alien_speed_factor;
            self.dynamic.alien_points = profile.alien_points;
        }
    }

    /// Increase speed settings and alien point values.
    pub fn increase_speed(&mut self) {
        let d = &mut self.dynamic;
        d.ship_speed *= self.speedup_scale;
        d.bullet_speed *= self.speedup_scale;
        d.alien_speed *= self.speedup_scale;
        d.alien_points = (d.alien_points as f32 * self.score_scale) as u32;
    }

    pub fn from_toml_str(text: &str) -> Result<Settings, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read overrides from `path`.  A missing file is not an error.
    pub fn load(path: &Path) -> Result<Settings, GameError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(source) => {
                return Err(GameError::Io { path: path.to_path_buf(), source });
            }
        };
        Settings::from_toml_str(&text).map_err(|source| GameError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_or_default(path: &Path) -> Settings {
        Settings::load(path).unwrap_or_else(|e| {
            warn!("{e}; using default settings");
            Settings::default()
        })
    }
}
