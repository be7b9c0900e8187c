mod audio;
mod display;

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use rand::thread_rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use alien_invasion::assets::Backgrounds;
use alien_invasion::compute::{handle_input, init_state, tick};
use alien_invasion::entities::{GameEvent, GameState};
use alien_invasion::input::{InputEvent, Key, MouseButton};
use alien_invasion::settings::Settings;
use alien_invasion::stats::HighScoreStore;

use audio::SoundBank;
use display::{FrameInfo, Viewport};

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Only used on terminals that never report key releases:
/// there the key is released synthetically once it goes quiet.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<Key, u64>, key: &Key, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn translate_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

fn translate_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}

// ── Paths and logging ─────────────────────────────────────────────────────────

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var).map(PathBuf::from)
}

fn config_path() -> PathBuf {
    env_path("ALIEN_INVASION_CONFIG").unwrap_or_else(|| PathBuf::from("alien_invasion.toml"))
}

fn high_score_path() -> PathBuf {
    env_path("ALIEN_INVASION_HIGH_SCORE").unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".alien_invasion_high_score.json")
    })
}

fn assets_dir() -> PathBuf {
    env_path("ALIEN_INVASION_ASSETS").unwrap_or_else(|| PathBuf::from("."))
}

/// The terminal belongs to the game, so logs go to a file.
fn init_logging() {
    let path = env_path("ALIEN_INVASION_LOG")
        .unwrap_or_else(|| std::env::temp_dir().join("alien_invasion.log"));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

struct Frontend {
    store: HighScoreStore,
    sounds: SoundBank,
    backgrounds: Backgrounds,
    keyboard_enhanced: bool,
}

/// Hand the side effects the core queued to the outside world.
fn apply_events<W: Write>(out: &mut W, state: &mut GameState, front: &Frontend) -> std::io::Result<()> {
    for event in std::mem::take(&mut state.events) {
        match event {
            GameEvent::Sound(effect) => front.sounds.play(out, effect, state.menu.sound_volume)?,
            GameEvent::NewHighScore(score) => front.store.save_or_log(score),
            GameEvent::CursorVisible(true) => {
                out.execute(cursor::Show)?;
            }
            GameEvent::CursorVisible(false) => {
                out.execute(cursor::Hide)?;
            }
        }
    }
    Ok(())
}

/// Input model: every key press is forwarded once as a `KeyDown`; repeats
/// only refresh the key's timestamp in `key_frame`.  Terminals with
/// keyboard enhancement report releases, which become `KeyUp`.  On classic
/// terminals a key that has been silent for `HOLD_WINDOW` frames gets a
/// synthetic `KeyUp`.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    front: &Frontend,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let started = Instant::now();

    let mut key_frame: HashMap<Key, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut fps: u32 = 0;
    let mut fps_frames: u32 = 0;
    let mut fps_window = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let now_ms = started.elapsed().as_millis() as u64;
        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows, state.settings.screen_width, state.settings.screen_height);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut inputs = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, .. })
                    if modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    inputs.push(InputEvent::Quit);
                }
                Event::Key(KeyEvent { code, kind, .. }) => {
                    let Some(key) = translate_key(code) else { continue };
                    match kind {
                        KeyEventKind::Press => {
                            if !is_held(&key_frame, &key, frame) || front.keyboard_enhanced {
                                inputs.push(InputEvent::KeyDown(key));
                            }
                            key_frame.insert(key, frame);
                        }
                        KeyEventKind::Repeat => {
                            key_frame.insert(key, frame);
                        }
                        KeyEventKind::Release => {
                            key_frame.remove(&key);
                            inputs.push(InputEvent::KeyUp(key));
                        }
                    }
                }
                Event::Mouse(MouseEvent { kind: MouseEventKind::Down(button), column, row, .. }) => {
                    let (x, y) = view.to_world(column, row);
                    inputs.push(InputEvent::MouseDown { button: translate_button(button), x, y });
                }
                _ => {}
            }
        }

        if !front.keyboard_enhanced {
            let expired: Vec<Key> = key_frame
                .keys()
                .filter(|key| !is_held(&key_frame, key, frame))
                .copied()
                .collect();
            for key in expired {
                key_frame.remove(&key);
                inputs.push(InputEvent::KeyUp(key));
            }
        }

        for input in inputs {
            *state = handle_input(state, input, now_ms);
        }
        *state = tick(state, now_ms, &mut rng);
        apply_events(out, state, front)?;

        if state.quit_requested {
            return Ok(());
        }

        fps_frames += 1;
        if fps_window.elapsed() >= Duration::from_secs(1) {
            fps = fps_frames;
            fps_frames = 0;
            fps_window = Instant::now();
        }

        let info = FrameInfo {
            view,
            shake: state.shake.offset(&mut rng),
            fps,
            backgrounds: &front.backgrounds,
            frame: state.frame,
        };
        display::render(out, state, &info)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    let settings = Settings::load_or_default(&config_path());
    let store = HighScoreStore::new(high_score_path());
    let high_score = store.load_or_default();

    let assets = assets_dir();
    let front = Frontend {
        sounds: SoundBank::load(&assets.join("sounds")),
        backgrounds: Backgrounds::load(&assets.join("images").join("backgrounds"), settings.bg_color),
        store,
        keyboard_enhanced,
    };

    info!(high_score, keyboard_enhanced, "starting alien invasion");
    let mut state = init_state(settings, high_score);
    let result = game_loop(out, &mut state, rx, &front);

    front.store.save_or_log(state.stats.high_score);
    info!(score = state.stats.score, high_score = state.stats.high_score, "exiting");
    result
}
