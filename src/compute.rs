/// Top-level game state machine.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (plus, where needed, a wall-clock timestamp in milliseconds
/// and an RNG handle) and returns a brand-new `GameState`.  Side effects are
/// limited to the injected RNG; everything the frontend must do (play a
/// sound, persist a high score, show the cursor) is queued in
/// `GameState::events`.
///
/// Per-frame order while playing:
/// ship → projectiles → fleet (+ contact / bottom checks) → alien fire →
/// bullet-alien pass → alien-bullet-ship pass → wave-clear check →
/// particles → screen shake.  A fatal hit moves the session into
/// `ShipDestroying`, where only the destruction animation advances.

use rand::Rng;
use tracing::{debug, info};

use crate::collision::{self, ShipHit};
use crate::entities::{GameEvent, GameState, GameStatus, Ship, SoundEffect};
use crate::fleet;
use crate::input::{InputEvent, Key, MouseButton};
use crate::menu::{play_button_rect, Menu, MenuAction, MenuScreen};
use crate::particles::{ParticleSystem, ScreenShake, SPARKLE_COUNT};
use crate::projectile;
use crate::settings::Settings;
use crate::stats::GameStats;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the session state shown at startup: main menu, level-1 fleet.
pub fn init_state(settings: Settings, high_score: u32) -> GameState {
    let mut settings = settings;
    settings.initialize_dynamic_settings();
    let menu = Menu::new();
    settings.apply_difficulty(menu.difficulty);
    settings.load_level(1);

    GameState {
        ship: Ship::new(&settings),
        aliens: fleet::create_fleet(1, &settings),
        bullets: Vec::new(),
        alien_bullets: Vec::new(),
        particles: ParticleSystem::new(),
        shake: ScreenShake::default(),
        stats: GameStats::new(settings.ship_limit, high_score),
        settings,
        menu,
        status: GameStatus::Menu,
        frame: 0,
        last_alien_shot_ms: 0,
        events: Vec::new(),
        quit_requested: false,
    }
}

/// Reset score, level, lives, settings and every entity collection.
fn reset_session(state: &mut GameState, now_ms: u64) {
    state.settings.initialize_dynamic_settings();
    state.settings.apply_difficulty(state.menu.difficulty);
    state.settings.load_level(1);
    state.stats.reset_stats(state.settings.ship_limit);

    state.bullets.clear();
    state.alien_bullets.clear();
    state.particles.clear();
    state.shake = ScreenShake::default();
    state.aliens = fleet::create_fleet(1, &state.settings);

    state.ship.center(&state.settings);
    state.ship.reset_shield();
    state.ship.destroy = Default::default();
    state.ship.moving_left = false;
    state.ship.moving_right = false;
    state.last_alien_shot_ms = now_ms;
}

/// Start a fresh game and make it active.
pub fn start_new_game(state: &GameState, now_ms: u64) -> GameState {
    let mut next = state.clone();
    begin_game(&mut next, now_ms);
    next
}

fn begin_game(state: &mut GameState, now_ms: u64) {
    reset_session(state, now_ms);
    state.status = GameStatus::Playing;
    state.events.push(GameEvent::CursorVisible(false));
    info!(difficulty = ?state.menu.difficulty, "new game started");
}

/// Reset the session after victory and return to the main menu.
pub fn restart_game(state: &GameState, now_ms: u64) -> GameState {
    let mut next = state.clone();
    restart(&mut next, now_ms);
    next
}

fn restart(state: &mut GameState, now_ms: u64) {
    reset_session(state, now_ms);
    state.status = GameStatus::Menu;
    state.menu.open(MenuScreen::Main, 0, now_ms);
    state.events.push(GameEvent::CursorVisible(true));
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire a bullet from the ship, capped at `bullets_allowed` in flight.
pub fn fire_bullet(state: &GameState) -> GameState {
    let mut next = state.clone();
    fire(&mut next);
    next
}

fn fire(state: &mut GameState) {
    if state.status != GameStatus::Playing {
        return;
    }
    if projectile::fire_bullet(&mut state.bullets, &state.ship, &state.settings) {
        state.events.push(GameEvent::Sound(SoundEffect::Shoot));
    }
}

/// Apply one input event.
pub fn handle_input(state: &GameState, event: InputEvent, now_ms: u64) -> GameState {
    let mut next = state.clone();
    apply_input(&mut next, event, now_ms);
    next
}

fn apply_input(state: &mut GameState, event: InputEvent, now_ms: u64) {
    match event {
        InputEvent::Quit => {
            state.quit_requested = true;
            return;
        }
        InputEvent::KeyDown(key) if key.is_quit() => {
            state.quit_requested = true;
            return;
        }
        // Releases always land so movement flags never stick.
        InputEvent::KeyUp(key) => {
            if key.is_left() {
                state.ship.moving_left = false;
            }
            if key.is_right() {
                state.ship.moving_right = false;
            }
            return;
        }
        _ => {}
    }

    match state.status {
        GameStatus::Playing => match event {
            InputEvent::KeyDown(key) if key.is_left() => state.ship.moving_left = true,
            InputEvent::KeyDown(key) if key.is_right() => state.ship.moving_right = true,
            InputEvent::KeyDown(key) if key.is_pause() => pause(state, now_ms),
            InputEvent::KeyDown(Key::Space) => fire(state),
            InputEvent::MouseDown { button: MouseButton::Left, .. } => fire(state),
            _ => {}
        },
        GameStatus::Paused => match event {
            InputEvent::KeyDown(key) if key.is_pause() => resume(state),
            _ => route_to_menu(state, &event, now_ms),
        },
        GameStatus::Menu => route_to_menu(state, &event, now_ms),
        GameStatus::GameOver => match event {
            InputEvent::KeyDown(key) if key.is_restart() => begin_game(state, now_ms),
            InputEvent::KeyDown(key) if key.is_menu() => {
                state.status = GameStatus::Menu;
                state.menu.open(MenuScreen::Main, 0, now_ms);
            }
            InputEvent::MouseDown { button: MouseButton::Left, x, y } => {
                let button = play_button_rect(state.settings.screen_width, state.settings.screen_height);
                if button.collidepoint(x, y) {
                    begin_game(state, now_ms);
                }
            }
            _ => {}
        },
        GameStatus::Victory => match event {
            InputEvent::KeyDown(key) if key.is_restart() => restart(state, now_ms),
            _ => {}
        },
        // The destruction sequence only honours quit and key releases.
        GameStatus::ShipDestroying => {}
    }
}

fn pause(state: &mut GameState, now_ms: u64) {
    state.status = GameStatus::Paused;
    state.menu.open(MenuScreen::Pause, 0, now_ms);
    state.events.push(GameEvent::CursorVisible(true));
}

fn resume(state: &mut GameState) {
    state.status = GameStatus::Playing;
    state.events.push(GameEvent::CursorVisible(false));
}

fn route_to_menu(state: &mut GameState, event: &InputEvent, now_ms: u64) {
    let paused = state.status == GameStatus::Paused;
    let (w, h) = (state.settings.screen_width, state.settings.screen_height);
    let Some(action) = state.menu.handle_event(event, paused, now_ms, w, h) else {
        return;
    };
    debug!(?action, "menu action");
    match action {
        MenuAction::StartGame => begin_game(state, now_ms),
        MenuAction::Resume => resume(state),
        MenuAction::ReturnToMainMenu => {
            state.status = GameStatus::Menu;
            state.events.push(GameEvent::CursorVisible(true));
        }
        MenuAction::ApplyDifficulty(difficulty) => state.settings.apply_difficulty(difficulty),
        MenuAction::Quit => state.quit_requested = true,
    }
}

// ── Per-frame tick (clock and RNG are injected) ──────────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// and all timing through `now_ms`, so callers control determinism (useful
/// for tests with a seeded RNG).
pub fn tick(state: &GameState, now_ms: u64, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.frame += 1;
    next.menu.update_animation(now_ms);

    match next.status {
        GameStatus::Playing => step_playing(&mut next, now_ms, rng),
        GameStatus::ShipDestroying => step_destroying(&mut next, now_ms, rng),
        _ => {}
    }
    next
}

fn step_playing(state: &mut GameState, now_ms: u64, rng: &mut impl Rng) {
    // ── 1. Ship moves, then recharges before any damage this frame ───────────
    state.ship.update(&state.settings);

    // ── 2. Projectiles ───────────────────────────────────────────────────────
    projectile::advance_and_reap_bullets(&mut state.bullets);
    projectile::advance_and_reap_alien_bullets(&mut state.alien_bullets, &state.settings);

    // ── 3. Fleet, contact and bottom checks ─────────────────────────────────
    fleet::advance_fleet(&mut state.aliens, &mut state.settings);
    let mut ship_lost = collision::alien_contacts_ship(&state.aliens, &state.ship)
        || collision::aliens_reached_bottom(&state.aliens, &state.settings);

    // ── 4. Alien fire policy ────────────────────────────────────────────────
    if projectile::try_alien_fire(
        &state.aliens,
        &mut state.alien_bullets,
        &mut state.last_alien_shot_ms,
        now_ms,
        &state.settings,
        rng,
    ) {
        state.events.push(GameEvent::Sound(SoundEffect::AlienShoot));
    }

    // ── 5. Player bullets ↔ aliens ──────────────────────────────────────────
    let had_aliens = !state.aliens.is_empty();
    let destroyed = collision::resolve_bullet_alien(
        &mut state.bullets,
        &mut state.aliens,
        &mut state.particles,
        rng,
    );
    if destroyed > 0 {
        state.stats.score = state
            .stats
            .score
            .saturating_add(state.settings.dynamic.alien_points.saturating_mul(destroyed));
        state.events.push(GameEvent::Sound(SoundEffect::Explosion));
        if state.stats.check_high_score() {
            state.events.push(GameEvent::NewHighScore(state.stats.high_score));
        }
    }

    // ── 6. Alien bullets ↔ ship ─────────────────────────────────────────────
    if !ship_lost {
        match collision::resolve_alien_bullets_ship(
            &mut state.alien_bullets,
            &mut state.ship,
            &state.settings,
            &mut state.particles,
            &mut state.shake,
            rng,
        ) {
            ShipHit::Destroyed { .. } => ship_lost = true,
            ShipHit::Absorbed { .. } => state.events.push(GameEvent::Sound(SoundEffect::ShieldHit)),
            ShipHit::Clear => {}
        }
    }

    // ── 7. Wave cleared ─────────────────────────────────────────────────────
    if had_aliens && state.aliens.is_empty() {
        wave_cleared(state, rng);
    }

    // ── 8. Feedback ─────────────────────────────────────────────────────────
    state.particles.update();
    state.shake.tick();

    if ship_lost && state.status == GameStatus::Playing {
        begin_life_loss(state, now_ms);
    }
}

/// Exactly one level advance (or victory) per cleared wave.
fn wave_cleared(state: &mut GameState, rng: &mut impl Rng) {
    state.bullets.clear();

    if state.stats.level < state.settings.max_levels {
        state.stats.level += 1;
        let level = state.stats.level;
        state.settings.load_level(level);
        state.aliens = fleet::create_fleet(level, &state.settings);
        state.settings.increase_speed();

        let (cx, cy) = state.ship.rect.center();
        state.particles.create_sparkle(cx as f32, cy as f32, SPARKLE_COUNT, rng);
        info!(level, score = state.stats.score, "wave cleared, advancing");
    } else {
        state.status = GameStatus::Victory;
        state.events.push(GameEvent::CursorVisible(true));
        info!(score = state.stats.score, "final wave cleared");
    }
}

fn begin_life_loss(state: &mut GameState, now_ms: u64) {
    if state.stats.ships_left > 0 {
        state.ship.start_destruction(now_ms);
        state.status = GameStatus::ShipDestroying;
        info!(ships_left = state.stats.ships_left, "ship destroyed");
    } else {
        state.status = GameStatus::GameOver;
        state.events.push(GameEvent::CursorVisible(true));
        info!(score = state.stats.score, level = state.stats.level, "game over");
    }
}

fn step_destroying(state: &mut GameState, now_ms: u64, rng: &mut impl Rng) {
    let done = state
        .ship
        .advance_destruction(now_ms, &state.settings, &mut state.particles, rng);
    if done {
        finish_life_loss(state);
    }
}

/// Spend a life and respawn into a fresh fleet of the current level.
fn finish_life_loss(state: &mut GameState) {
    state.stats.ships_left = state.stats.ships_left.saturating_sub(1);

    state.bullets.clear();
    state.aliens.clear();
    state.alien_bullets.clear();

    state.aliens = fleet::create_fleet(state.stats.level, &state.settings);
    state.ship.center(&state.settings);
    state.ship.reset_shield();
    state.status = GameStatus::Playing;
}
