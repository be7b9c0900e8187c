/// All game entity types: pure data, no logic.
///
/// Behaviour lives in the subsystem modules (`ship`, `fleet`, `projectile`,
/// `collision`, `particles`) and is orchestrated by `compute`.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounded, Rect};
use crate::menu::Menu;
use crate::particles::{ParticleSystem, ScreenShake};
use crate::settings::Settings;
use crate::stats::GameStats;

/// 24-bit colour, serialised as `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Scale every channel by `alpha / 255`, used to fade particles against
    /// a dark background.
    pub fn faded(self, alpha: u8) -> Rgb {
        let f = |c: u8| ((c as u16 * alpha as u16) / 255) as u8;
        Rgb(f(self.0), f(self.1), f(self.2))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Top-level state of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Main menu shown, simulation frozen.
    Menu,
    Playing,
    /// Pause menu shown over a retained, frozen world.
    Paused,
    /// Only the ship's destruction animation advances.
    ShipDestroying,
    /// Final level cleared; waits for restart or quit.
    Victory,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Shoot,
    AlienShoot,
    Explosion,
    ShieldHit,
}

/// Side effects the core asks its frontend to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundEffect),
    /// The in-session score just beat the stored high score.
    NewHighScore(u32),
    CursorVisible(bool),
}

// ── Ship ──────────────────────────────────────────────────────────────────────

/// Wall-clock driven destruction sequence.  Progress is recomputed from
/// `start_ms` every frame, never accumulated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DestroyAnimation {
    pub active: bool,
    /// 0.0 ..= 1.0
    pub progress: f32,
    pub start_ms: u64,
    pub particles_spawned: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub rect: Rect,
    /// Exact horizontal position; `rect.x` is derived from it.
    pub x: f32,
    pub moving_left: bool,
    pub moving_right: bool,
    pub shield: f32,
    pub max_shield: f32,
    pub recharge_rate: f32,
    pub destroy: DestroyAnimation,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Player bullet, travelling upward at a speed fixed when fired.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    pub y: f32,
    pub speed: f32,
    pub color: Rgb,
}

/// Alien bullet, travelling downward at a speed fixed when fired.
#[derive(Clone, Debug, PartialEq)]
pub struct AlienBullet {
    pub rect: Rect,
    pub y: f32,
    pub speed: f32,
    pub color: Rgb,
    /// Timestamp of the volley that produced this bullet.
    pub fired_at_ms: u64,
}

// ── Aliens ────────────────────────────────────────────────────────────────────

/// One member of the fleet.  The movement direction is fleet-wide and lives
/// in `Settings::dynamic.fleet_direction`.
#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub rect: Rect,
    pub x: f32,
}

impl Bounded for Ship {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Bounded for Bullet {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Bounded for AlienBullet {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Bounded for Alien {
    fn rect(&self) -> Rect {
        self.rect
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so the update functions in `compute`
/// can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub ship: Ship,
    pub aliens: Vec<Alien>,
    pub bullets: Vec<Bullet>,
    pub alien_bullets: Vec<AlienBullet>,
    pub particles: ParticleSystem,
    pub shake: ScreenShake,
    pub settings: Settings,
    pub stats: GameStats,
    pub menu: Menu,
    pub status: GameStatus,
    pub frame: u64,
    pub last_alien_shot_ms: u64,
    /// Pending side effects; the frontend drains this after every call.
    pub events: Vec<GameEvent>,
    pub quit_requested: bool,
}
