use alien_invasion::compute::*;
use alien_invasion::entities::*;
use alien_invasion::geometry::Rect;
use alien_invasion::input::{InputEvent, Key, MouseButton};
use alien_invasion::menu::MenuScreen;
use alien_invasion::settings::Settings;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A running game at level 1 with the default settings, events drained.
fn playing_state() -> GameState {
    let s = init_state(Settings::default(), 0);
    let mut s = start_new_game(&s, 0);
    s.events.clear();
    s
}

fn key(k: Key) -> InputEvent {
    InputEvent::KeyDown(k)
}

fn lone_alien_with_hit(state: &mut GameState) {
    state.aliens = vec![Alien { rect: Rect::new(600, 400, 60, 58), x: 600.0 }];
    state.bullets = vec![Bullet {
        rect: Rect::new(620, 420, 3, 15),
        y: 420.0,
        speed: 2.5,
        color: Rgb(0, 0, 0),
    }];
}

fn alien_bullet_on_ship() -> AlienBullet {
    AlienBullet {
        rect: Rect::new(598, 760, 3, 15),
        y: 760.0,
        speed: 1.5,
        color: Rgb(255, 50, 50),
        fired_at_ms: 0,
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_starts_in_menu() {
    let s = init_state(Settings::default(), 7);
    assert_eq!(s.status, GameStatus::Menu);
    assert_eq!(s.menu.active_menu, MenuScreen::Main);
    assert_eq!(s.stats.high_score, 7);
    assert_eq!(s.stats.ships_left, 3);
    assert_eq!(s.stats.level, 1);
    assert_eq!(s.stats.score, 0);
}

#[test]
fn init_state_builds_level_one_fleet() {
    let s = init_state(Settings::default(), 0);
    assert_eq!(s.aliens.len(), 9);
    assert!(s.bullets.is_empty());
    assert!(s.alien_bullets.is_empty());
    assert!(s.particles.is_empty());
    assert_eq!(s.frame, 0);
}

#[test]
fn ship_starts_bottom_centre() {
    let s = init_state(Settings::default(), 0);
    assert_eq!(s.ship.rect.centerx(), 600);
    assert_eq!(s.ship.rect.bottom(), 800);
    assert_eq!(s.ship.shield, 100.0);
}

// ── start / restart ───────────────────────────────────────────────────────────

#[test]
fn start_new_game_activates_and_hides_cursor() {
    let s = init_state(Settings::default(), 0);
    let s2 = start_new_game(&s, 0);
    assert_eq!(s2.status, GameStatus::Playing);
    assert!(s2.events.contains(&GameEvent::CursorVisible(false)));
}

#[test]
fn start_new_game_resets_session_but_keeps_high_score() {
    let mut s = playing_state();
    s.stats.score = 900;
    s.stats.high_score = 900;
    s.stats.level = 3;
    s.stats.ships_left = 0;
    s.bullets.clear();
    s.aliens.clear();
    let s2 = start_new_game(&s, 5_000);
    assert_eq!(s2.stats.score, 0);
    assert_eq!(s2.stats.level, 1);
    assert_eq!(s2.stats.ships_left, 3);
    assert_eq!(s2.stats.high_score, 900);
    assert_eq!(s2.aliens.len(), 9);
    assert_eq!(s2.last_alien_shot_ms, 5_000);
}

#[test]
fn restart_game_returns_to_main_menu() {
    let mut s = playing_state();
    s.status = GameStatus::Victory;
    s.stats.score = 1234;
    let s2 = restart_game(&s, 10);
    assert_eq!(s2.status, GameStatus::Menu);
    assert_eq!(s2.menu.active_menu, MenuScreen::Main);
    assert_eq!(s2.stats.score, 0);
    assert!(s2.events.contains(&GameEvent::CursorVisible(true)));
}

// ── fire_bullet ───────────────────────────────────────────────────────────────

#[test]
fn fire_bullet_respects_cap() {
    let mut s = playing_state();
    for _ in 0..5 {
        s = fire_bullet(&s);
    }
    assert_eq!(s.bullets.len(), 3);
    let shots = s
        .events
        .iter()
        .filter(|e| **e == GameEvent::Sound(SoundEffect::Shoot))
        .count();
    assert_eq!(shots, 3); // refused shots are silent
}

#[test]
fn fire_bullet_ignored_outside_play() {
    let s = init_state(Settings::default(), 0);
    let s2 = fire_bullet(&s);
    assert!(s2.bullets.is_empty());
    assert!(s2.events.is_empty());
}

#[test]
fn fire_does_not_mutate_original() {
    let s = playing_state();
    let _ = fire_bullet(&s);
    assert!(s.bullets.is_empty());
}

// ── handle_input ──────────────────────────────────────────────────────────────

#[test]
fn space_and_left_click_fire() {
    let s = playing_state();
    let s = handle_input(&s, key(Key::Space), 0);
    let s = handle_input(&s, InputEvent::MouseDown { button: MouseButton::Left, x: 10, y: 10 }, 0);
    assert_eq!(s.bullets.len(), 2);
}

#[test]
fn movement_flags_follow_press_and_release() {
    let s = playing_state();
    let s = handle_input(&s, key(Key::Left), 0);
    assert!(s.ship.moving_left);
    let s = handle_input(&s, key(Key::Char('d')), 0);
    assert!(s.ship.moving_right);
    let s = handle_input(&s, InputEvent::KeyUp(Key::Left), 0);
    assert!(!s.ship.moving_left);
    assert!(s.ship.moving_right);
}

#[test]
fn key_release_lands_even_when_paused() {
    let mut s = playing_state();
    s.ship.moving_right = true;
    s.status = GameStatus::Paused;
    let s2 = handle_input(&s, InputEvent::KeyUp(Key::Right), 0);
    assert!(!s2.ship.moving_right);
}

#[test]
fn pause_and_resume() {
    let s = playing_state();
    let paused = handle_input(&s, key(Key::Char('p')), 0);
    assert_eq!(paused.status, GameStatus::Paused);
    assert_eq!(paused.menu.active_menu, MenuScreen::Pause);
    let resumed = handle_input(&paused, key(Key::Escape), 0);
    assert_eq!(resumed.status, GameStatus::Playing);
}

#[test]
fn pause_menu_resume_option() {
    let s = playing_state();
    let paused = handle_input(&s, key(Key::Escape), 0);
    let resumed = handle_input(&paused, key(Key::Enter), 0);
    assert_eq!(resumed.status, GameStatus::Playing);
}

#[test]
fn pause_menu_main_menu_option() {
    let s = playing_state();
    let mut s = handle_input(&s, key(Key::Escape), 0);
    s = handle_input(&s, key(Key::Down), 0);
    s = handle_input(&s, key(Key::Down), 0);
    s = handle_input(&s, key(Key::Enter), 0);
    assert_eq!(s.status, GameStatus::Menu);
    assert_eq!(s.menu.active_menu, MenuScreen::Main);
}

#[test]
fn main_menu_start_game() {
    let s = init_state(Settings::default(), 0);
    let s2 = handle_input(&s, key(Key::Enter), 0);
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn main_menu_quit_option() {
    let mut s = init_state(Settings::default(), 0);
    for _ in 0..3 {
        s = handle_input(&s, key(Key::Down), 0);
    }
    s = handle_input(&s, key(Key::Enter), 0);
    assert!(s.quit_requested);
}

#[test]
fn quit_key_works_everywhere() {
    for status in [GameStatus::Menu, GameStatus::Playing, GameStatus::ShipDestroying, GameStatus::GameOver] {
        let mut s = playing_state();
        s.status = status;
        assert!(handle_input(&s, key(Key::Char('Q')), 0).quit_requested);
        assert!(handle_input(&s, InputEvent::Quit, 0).quit_requested);
    }
}

#[test]
fn difficulty_choice_applies_to_next_game() {
    let mut s = init_state(Settings::default(), 0);
    s = handle_input(&s, key(Key::Down), 0);
    s = handle_input(&s, key(Key::Enter), 0); // open Difficulty, Normal highlighted
    assert_eq!(s.menu.active_menu, MenuScreen::Difficulty);
    assert_eq!(s.menu.selected_option, 1);
    s = handle_input(&s, key(Key::Up), 0);
    s = handle_input(&s, key(Key::Enter), 0); // Easy
    assert_eq!(s.menu.difficulty, Difficulty::Easy);
    let s = start_new_game(&s, 0);
    assert_eq!(s.settings.dynamic.alien_fire_frequency, 2000);
    assert_eq!(s.settings.dynamic.ship_speed, 2.0);
}

#[test]
fn destroying_ignores_gameplay_input() {
    let mut s = playing_state();
    s.status = GameStatus::ShipDestroying;
    let s2 = handle_input(&s, key(Key::Space), 0);
    let s2 = handle_input(&s2, key(Key::Left), 0);
    assert!(s2.bullets.is_empty());
    assert!(!s2.ship.moving_left);
    assert_eq!(s2.status, GameStatus::ShipDestroying);
}

#[test]
fn game_over_restart_key_starts_new_game() {
    let mut s = playing_state();
    s.status = GameStatus::GameOver;
    s.stats.score = 500;
    s.stats.ships_left = 0;
    let s2 = handle_input(&s, key(Key::Char('r')), 0);
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.stats.score, 0);
    assert_eq!(s2.stats.ships_left, 3);
}

#[test]
fn game_over_play_button_click() {
    let mut s = playing_state();
    s.status = GameStatus::GameOver;
    let miss = handle_input(&s, InputEvent::MouseDown { button: MouseButton::Left, x: 5, y: 5 }, 0);
    assert_eq!(miss.status, GameStatus::GameOver);
    let hit = handle_input(&s, InputEvent::MouseDown { button: MouseButton::Left, x: 600, y: 500 }, 0);
    assert_eq!(hit.status, GameStatus::Playing);
}

#[test]
fn game_over_menu_key() {
    let mut s = playing_state();
    s.status = GameStatus::GameOver;
    let s2 = handle_input(&s, key(Key::Char('m')), 0);
    assert_eq!(s2.status, GameStatus::Menu);
}

#[test]
fn victory_restart_returns_to_menu() {
    let mut s = playing_state();
    s.status = GameStatus::Victory;
    let s2 = handle_input(&s, key(Key::Char('r')), 0);
    assert_eq!(s2.status, GameStatus::Menu);
    assert_eq!(s2.stats.level, 1);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_increments_frame() {
    let s = playing_state();
    let s2 = tick(&s, 16, &mut seeded_rng());
    assert_eq!(s2.frame, 1);
}

#[test]
fn tick_does_not_mutate_original() {
    let s = playing_state();
    let _ = tick(&s, 16, &mut seeded_rng());
    assert_eq!(s.frame, 0);
    assert_eq!(s.aliens[0].rect.x, 60);
}

#[test]
fn tick_frozen_outside_play() {
    for status in [GameStatus::Menu, GameStatus::Paused, GameStatus::GameOver, GameStatus::Victory] {
        let mut s = playing_state();
        s.status = status;
        s.ship.moving_left = true;
        let s2 = tick(&s, 5_000, &mut seeded_rng());
        assert_eq!(s2.aliens, s.aliens);
        assert_eq!(s2.ship.rect, s.ship.rect);
        assert!(s2.alien_bullets.is_empty());
    }
}

#[test]
fn tick_moves_fleet_and_ship() {
    let mut s = playing_state();
    s.ship.moving_left = true;
    let s2 = tick(&s, 16, &mut seeded_rng());
    assert_eq!(s2.aliens[0].rect.x, 61);
    assert_eq!(s2.ship.rect.x, 568); // 570 - 1.5, truncated
}

#[test]
fn alien_fire_waits_for_frequency() {
    let s = playing_state();
    let mut rng = seeded_rng();
    let early = tick(&s, 1_000, &mut rng);
    assert!(early.alien_bullets.is_empty());
    let late = tick(&early, 1_001, &mut rng);
    assert_eq!(late.alien_bullets.len(), 1);
    assert_eq!(late.last_alien_shot_ms, 1_001);
    assert!(late.events.contains(&GameEvent::Sound(SoundEffect::AlienShoot)));
}

#[test]
fn destroying_alien_scores_and_reports_high_score() {
    let mut s = playing_state();
    lone_alien_with_hit(&mut s);
    s.aliens.push(Alien { rect: Rect::new(100, 100, 60, 58), x: 100.0 });
    let s2 = tick(&s, 16, &mut seeded_rng());
    assert_eq!(s2.aliens.len(), 1);
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.stats.score, 50);
    assert_eq!(s2.stats.high_score, 50);
    assert!(s2.events.contains(&GameEvent::Sound(SoundEffect::Explosion)));
    assert!(s2.events.contains(&GameEvent::NewHighScore(50)));
    assert!(!s2.particles.is_empty());
}

#[test]
fn no_high_score_event_below_record() {
    let mut s = playing_state();
    s.stats.high_score = 10_000;
    lone_alien_with_hit(&mut s);
    s.aliens.push(Alien { rect: Rect::new(100, 100, 60, 58), x: 100.0 });
    let s2 = tick(&s, 16, &mut seeded_rng());
    assert!(!s2.events.iter().any(|e| matches!(e, GameEvent::NewHighScore(_))));
    assert_eq!(s2.stats.high_score, 10_000);
}

// ── wave clear / victory ──────────────────────────────────────────────────────

#[test]
fn clearing_wave_advances_level_once() {
    let mut s = playing_state();
    lone_alien_with_hit(&mut s);
    s.bullets.push(Bullet { rect: Rect::new(10, 300, 3, 15), y: 300.0, speed: 2.5, color: Rgb(0, 0, 0) });
    let mut rng = seeded_rng();
    let s2 = tick(&s, 16, &mut rng);
    assert_eq!(s2.stats.level, 2);
    assert_eq!(s2.aliens.len(), 16); // pyramid
    assert!(s2.bullets.is_empty()); // outstanding bullets cleared
    assert_eq!(s2.status, GameStatus::Playing);

    let s3 = tick(&s2, 32, &mut rng);
    assert_eq!(s3.stats.level, 2);
}

#[test]
fn clearing_wave_scales_speed() {
    let mut s = playing_state();
    lone_alien_with_hit(&mut s);
    let s2 = tick(&s, 16, &mut seeded_rng());
    // Normal base 1.0 × level-2 factor 1.2 × speedup 1.1
    assert!((s2.settings.dynamic.alien_speed - 1.32).abs() < 1e-4);
    assert!((s2.settings.dynamic.ship_speed - 1.65).abs() < 1e-4);
}

#[test]
fn clearing_final_wave_is_victory() {
    let mut s = playing_state();
    s.stats.level = 4;
    lone_alien_with_hit(&mut s);
    let s2 = tick(&s, 16, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Victory);
    assert_eq!(s2.stats.level, 4);
    assert!(s2.aliens.is_empty());
    assert!(s2.events.contains(&GameEvent::CursorVisible(true)));
}

#[test]
fn empty_fleet_at_start_of_frame_does_not_advance() {
    let mut s = playing_state();
    s.aliens.clear();
    let s2 = tick(&s, 16, &mut seeded_rng());
    assert_eq!(s2.stats.level, 1);
}

// ── life loss ─────────────────────────────────────────────────────────────────

#[test]
fn shield_absorbs_alien_bullet() {
    let mut s = playing_state();
    s.alien_bullets.push(alien_bullet_on_ship());
    let s2 = tick(&s, 16, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
    assert!(s2.alien_bullets.is_empty());
    assert!((s2.ship.shield - 75.0).abs() < 0.1);
    assert!(s2.shake.is_active());
    assert!(s2.events.contains(&GameEvent::Sound(SoundEffect::ShieldHit)));
}

#[test]
fn broken_shield_starts_destruction() {
    let mut s = playing_state();
    s.ship.shield = 10.0;
    s.alien_bullets.push(alien_bullet_on_ship());
    let s2 = tick(&s, 16, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::ShipDestroying);
    assert!(s2.ship.is_destroying());
    assert_eq!(s2.stats.ships_left, 3); // spent when the animation ends
}

#[test]
fn destruction_then_respawn() {
    let mut s = playing_state();
    s.ship.shield = 10.0;
    s.alien_bullets.push(alien_bullet_on_ship());
    let mut rng = seeded_rng();
    let s = tick(&s, 16, &mut rng);

    let mid = tick(&s, 516, &mut rng);
    assert_eq!(mid.status, GameStatus::ShipDestroying);
    assert!(mid.particles.len() >= 100);
    assert_eq!(mid.aliens, s.aliens); // world frozen

    let done = tick(&mid, 1_016, &mut rng);
    assert_eq!(done.status, GameStatus::Playing);
    assert_eq!(done.stats.ships_left, 2);
    assert_eq!(done.aliens.len(), 9);
    assert!(done.bullets.is_empty());
    assert!(done.alien_bullets.is_empty());
    assert_eq!(done.ship.shield, 100.0);
    assert_eq!(done.ship.rect.centerx(), 600);
}

#[test]
fn last_ship_lost_is_game_over() {
    let mut s = playing_state();
    s.stats.ships_left = 0;
    s.ship.shield = 10.0;
    s.alien_bullets.push(alien_bullet_on_ship());
    let s2 = tick(&s, 16, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
    assert!(s2.events.contains(&GameEvent::CursorVisible(true)));
}

#[test]
fn alien_contact_takes_priority_over_bullets() {
    let mut s = playing_state();
    s.aliens = vec![Alien { rect: Rect::new(560, 740, 60, 58), x: 560.0 }];
    s.alien_bullets.push(alien_bullet_on_ship());
    let s2 = tick(&s, 16, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::ShipDestroying);
    assert_eq!(s2.alien_bullets.len(), 1); // bullet pass skipped
    assert!(s2.ship.shield > 99.0);
}

#[test]
fn alien_reaching_bottom_costs_a_life() {
    let mut s = playing_state();
    s.aliens = vec![Alien { rect: Rect::new(100, 742, 60, 58), x: 100.0 }];
    let s2 = tick(&s, 16, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::ShipDestroying);
}
