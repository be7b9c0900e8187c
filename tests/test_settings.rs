use alien_invasion::entities::{Difficulty, Rgb};
use alien_invasion::error::GameError;
use alien_invasion::settings::{level_profile, Settings};

use tempfile::tempdir;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// ── defaults and overrides ────────────────────────────────────────────────────

#[test]
fn defaults() {
    let s = Settings::default();
    assert_eq!((s.screen_width, s.screen_height), (1200, 800));
    assert_eq!(s.ship_limit, 3);
    assert_eq!(s.bullets_allowed, 3);
    assert_eq!(s.alien_bullets_allowed, 3);
    assert_eq!(s.alien_bullet_damage, 25.0);
    assert_eq!(s.max_levels, 4);
    assert_eq!(s.dynamic.alien_points, 50);
    assert_eq!(s.dynamic.fleet_direction, 1.0);
}

#[test]
fn toml_overrides_only_named_keys() {
    let s = Settings::from_toml_str("ship_limit = 5\nbullets_allowed = 4\nbg_color = [1, 2, 3]\n").unwrap();
    assert_eq!(s.ship_limit, 5);
    assert_eq!(s.bullets_allowed, 4);
    assert_eq!(s.bg_color, Rgb(1, 2, 3));
    assert_eq!(s.screen_width, 1200);
    assert_eq!(s.max_shield, 100.0);
}

#[test]
fn toml_rejects_bad_types() {
    assert!(Settings::from_toml_str("ship_limit = \"many\"").is_err());
}

#[test]
fn load_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let s = Settings::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(s, Settings::default());
}

#[test]
fn load_reads_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("game.toml");
    std::fs::write(&path, "max_levels = 2\n").unwrap();
    assert_eq!(Settings::load(&path).unwrap().max_levels, 2);
}

#[test]
fn load_bad_file_is_settings_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("game.toml");
    std::fs::write(&path, "max_levels = = 2").unwrap();
    assert!(matches!(Settings::load(&path), Err(GameError::Settings { .. })));
    assert_eq!(Settings::load_or_default(&path), Settings::default());
}

// ── difficulty and levels ─────────────────────────────────────────────────────

#[test]
fn difficulty_presets() {
    let mut s = Settings::default();
    s.apply_difficulty(Difficulty::Easy);
    assert_eq!(s.dynamic.alien_fire_frequency, 2000);
    assert!(close(s.dynamic.alien_speed, 0.5));
    s.apply_difficulty(Difficulty::Hard);
    assert_eq!(s.dynamic.alien_fire_frequency, 500);
    assert!(close(s.dynamic.ship_speed, 1.2));
    assert!(close(s.dynamic.alien_bullet_speed, 2.0));
}

#[test]
fn level_table() {
    assert_eq!(level_profile(1).map(|p| p.alien_points), Some(50));
    assert_eq!(level_profile(4).map(|p| p.alien_points), Some(150));
    assert!(level_profile(0).is_none());
    assert!(level_profile(5).is_none());
}

#[test]
fn load_level_scales_difficulty_speed() {
    let mut s = Settings::default();
    s.apply_difficulty(Difficulty::Hard);
    s.load_level(3);
    assert!(close(s.dynamic.alien_speed, 1.5 * 1.5));
    assert_eq!(s.dynamic.alien_points, 100);
}

#[test]
fn load_level_outside_table_is_ignored() {
    let mut s = Settings::default();
    s.load_level(2);
    let before = s.dynamic.clone();
    s.load_level(9);
    assert_eq!(s.dynamic, before);
}

#[test]
fn increase_speed_scales() {
    let mut s = Settings::default();
    s.increase_speed();
    assert!(close(s.dynamic.ship_speed, 1.65));
    assert!(close(s.dynamic.bullet_speed, 2.75));
    assert!(close(s.dynamic.alien_speed, 1.1));
    assert_eq!(s.dynamic.alien_points, 75);
}

#[test]
fn initialize_dynamic_settings_resets() {
    let mut s = Settings::default();
    s.increase_speed();
    s.dynamic.fleet_direction = -1.0;
    s.initialize_dynamic_settings();
    assert_eq!(s, Settings::default());
}
