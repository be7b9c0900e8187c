/// Rendering layer: all terminal output lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only projects the
/// 1200×800 world onto the terminal and translates state into commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use alien_invasion::assets::{Background, Backgrounds, TextArt};
use alien_invasion::entities::{Alien, Difficulty, GameState, GameStatus, Rgb, Ship};
use alien_invasion::geometry::Rect;
use alien_invasion::menu::{play_button_rect, Menu, MenuScreen};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_ALIEN: Color = Color::Green;
const C_SHIELD: Color = Color::Rgb { r: 0, g: 100, b: 255 };
const C_SHIELD_EMPTY: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;
const C_ART: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;
const C_SELECTED: Color = Color::Yellow;
const C_OPTION: Color = Color::White;

const SHIELD_CELLS: usize = 5;

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

// ── World → terminal projection ───────────────────────────────────────────────

/// Maps world units onto the play area: columns `1..cols-1`, rows
/// `2..rows-2` (inside the border, below the HUD, above the hint row).
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    cols: u16,
    rows: u16,
    world_w: i32,
    world_h: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_w: i32, world_h: i32) -> Self {
        Viewport { cols, rows, world_w: world_w.max(1), world_h: world_h.max(1) }
    }

    fn play_w(&self) -> i32 {
        (self.cols as i32 - 2).max(1)
    }

    fn play_h(&self) -> i32 {
        (self.rows as i32 - 4).max(1)
    }

    /// Cell for a world point, before clipping.
    fn cell(&self, x: i32, y: i32) -> (i32, i32) {
        let col = 1 + (x as i64 * self.play_w() as i64).div_euclid(self.world_w as i64) as i32;
        let row = 2 + (y as i64 * self.play_h() as i64).div_euclid(self.world_h as i64) as i32;
        (col, row)
    }

    fn inside(&self, col: i32, row: i32) -> bool {
        col >= 1 && col <= self.play_w() && row >= 2 && row < 2 + self.play_h()
    }

    /// World point under a terminal cell (cell centre), for mouse hit-testing.
    pub fn to_world(&self, col: u16, row: u16) -> (i32, i32) {
        let cx = (col as i32 - 1).max(0) as i64;
        let cy = (row as i32 - 2).max(0) as i64;
        let x = ((2 * cx + 1) * self.world_w as i64) / (2 * self.play_w() as i64);
        let y = ((2 * cy + 1) * self.world_h as i64) / (2 * self.play_h() as i64);
        (x as i32, y as i32)
    }

    /// Shake offset in cells.  Any non-zero world offset moves at least one
    /// cell so the effect stays visible at terminal resolution.
    pub fn shake_cells(&self, (dx, dy): (i32, i32)) -> (i32, i32) {
        let scale = |d: i32, cells: i32, world: i32| {
            let c = d * cells / world;
            if c == 0 { d.signum() } else { c }
        };
        (scale(dx, self.play_w(), self.world_w), scale(dy, self.play_h(), self.world_h))
    }
}

/// Print `text` centred on world point `(x, y)` shifted by `shake` cells;
/// skipped when it falls outside the play area.
fn put<W: Write>(
    out: &mut W,
    view: &Viewport,
    (x, y): (i32, i32),
    shake: (i32, i32),
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let (col, row) = view.cell(x, y);
    let col = col + shake.0 - text.chars().count() as i32 / 2;
    let row = row + shake.1;
    if !view.inside(col, row) {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn put_centred<W: Write>(out: &mut W, width: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Everything the frame needs besides the game state itself.
pub struct FrameInfo<'a> {
    pub view: Viewport,
    pub shake: (i32, i32),
    pub fps: u32,
    pub backgrounds: &'a Backgrounds,
    pub frame: u64,
}

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, info: &FrameInfo) -> std::io::Result<()> {
    let background = info.backgrounds.for_level(state.stats.level);
    if let Background::Solid(fill) = background {
        out.queue(style::SetBackgroundColor(rgb(fill)))?;
    }
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let view = &info.view;
    let shake = if info.shake == (0, 0) { (0, 0) } else { view.shake_cells(info.shake) };

    draw_background(out, view, background, info.frame)?;
    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    for alien in &state.aliens {
        draw_alien(out, view, alien, shake)?;
    }
    for bullet in &state.bullets {
        put(out, view, bullet.rect.center(), shake, "║", rgb(bullet.color))?;
    }
    for bullet in &state.alien_bullets {
        put(out, view, bullet.rect.center(), shake, "↓", rgb(bullet.color))?;
    }

    if state.ship.is_destroying() {
        draw_destruction(out, view, &state.ship, shake)?;
    } else {
        draw_ship(out, view, &state.ship, shake)?;
    }
    draw_shield(out, view, &state.ship, shake)?;
    draw_particles(out, view, state, shake)?;

    match state.status {
        GameStatus::Menu | GameStatus::Paused => draw_menu(out, view, state)?,
        GameStatus::GameOver => draw_game_over(out, view, state)?,
        GameStatus::Victory => draw_victory(out, view, state)?,
        GameStatus::Playing | GameStatus::ShipDestroying => {}
    }
    draw_controls_hint(out, state, view, info.fps)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_art<W: Write>(out: &mut W, view: &Viewport, art: &TextArt) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_ART))?;
    let max_rows = view.play_h() as usize;
    let max_cols = view.play_w() as usize;
    for (i, line) in art.lines.iter().take(max_rows).enumerate() {
        let clipped: String = line.chars().take(max_cols).collect();
        out.queue(cursor::MoveTo(1, 2 + i as u16))?;
        out.queue(Print(clipped))?;
    }
    Ok(())
}

fn draw_background<W: Write>(
    out: &mut W,
    view: &Viewport,
    background: Background,
    frame: u64,
) -> std::io::Result<()> {
    match background {
        Background::Animated(frames) => {
            let index = (frame / 10) as usize % frames.len().max(1);
            match frames.get(index) {
                Some(art) => draw_art(out, view, art),
                None => Ok(()),
            }
        }
        Background::Static(art) => draw_art(out, view, art),
        Background::Solid(_) => Ok(()),
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Score and high score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>7}  Hi:{:>7}",
        state.stats.score, state.stats.high_score
    )))?;

    // Level, centre
    let level_str = format!("[ LEVEL {}/{} ]", state.stats.level, state.settings.max_levels);
    put_centred(out, view.cols, 0, &level_str, C_HUD_LEVEL)?;

    // Shield gauge + ships, right side
    let filled = (state.ship.shield_fraction() * SHIELD_CELLS as f32).ceil() as usize;
    let filled = filled.min(SHIELD_CELLS);
    let ships = format!(" Ships:{}", "♥".repeat(state.stats.ships_left as usize));
    let width = "Shield ".len() + SHIELD_CELLS + ships.chars().count();
    let rx = view.cols.saturating_sub(width as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Shield "))?;
    out.queue(style::SetForegroundColor(C_SHIELD))?;
    out.queue(Print("█".repeat(filled)))?;
    out.queue(style::SetForegroundColor(C_SHIELD_EMPTY))?;
    out.queue(Print("░".repeat(SHIELD_CELLS - filled)))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(ships))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, view: &Viewport, ship: &Ship, shake: (i32, i32)) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let r = ship.rect;
    put(out, view, (r.centerx(), r.top() + r.h / 4), shake, "▲", C_PLAYER)?;
    put(out, view, (r.centerx(), r.bottom() - r.h / 4), shake, "/█\\", C_PLAYER)?;
    Ok(())
}

/// The ship swells and fades as destruction progresses.
fn draw_destruction<W: Write>(
    out: &mut W,
    view: &Viewport,
    ship: &Ship,
    shake: (i32, i32),
) -> std::io::Result<()> {
    let p = ship.destroy.progress.clamp(0.0, 1.0);
    let alpha = (255.0 * (1.0 - p)) as u8;
    let color = rgb(Rgb(255, (200.0 * (1.0 - p)) as u8, 0).faded(alpha));
    let (top, body) = if p < 0.33 {
        ("▲", "/█\\")
    } else if p < 0.66 {
        ("\\|/", "<*#*>")
    } else {
        (". ' .", "'  .  '")
    };
    let r = ship.rect;
    put(out, view, (r.centerx(), r.top() + r.h / 4), shake, top, color)?;
    put(out, view, (r.centerx(), r.bottom() - r.h / 4), shake, body, color)?;
    Ok(())
}

fn draw_shield<W: Write>(out: &mut W, view: &Viewport, ship: &Ship, shake: (i32, i32)) -> std::io::Result<()> {
    if ship.shield <= 0.0 || ship.is_destroying() {
        return Ok(());
    }
    let filled = ((ship.shield_fraction() * SHIELD_CELLS as f32).ceil() as usize).min(SHIELD_CELLS);
    let (col, row) = view.cell(ship.rect.centerx(), ship.rect.top());
    let col = col + shake.0 - SHIELD_CELLS as i32 / 2;
    let row = row + shake.1 - 1;
    if !view.inside(col, row) || !view.inside(col + SHIELD_CELLS as i32 - 1, row) {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(style::SetForegroundColor(C_SHIELD))?;
    out.queue(Print("━".repeat(filled)))?;
    out.queue(style::SetForegroundColor(C_SHIELD_EMPTY))?;
    out.queue(Print("─".repeat(SHIELD_CELLS - filled)))?;
    Ok(())
}

fn draw_alien<W: Write>(out: &mut W, view: &Viewport, alien: &Alien, shake: (i32, i32)) -> std::io::Result<()> {
    // Sprite:
    //   «▼»    ← swept-back wings
    //   ╚═╝    ← engine block
    let r = alien.rect;
    put(out, view, (r.centerx(), r.top() + r.h / 4), shake, "«▼»", C_ALIEN)?;
    put(out, view, (r.centerx(), r.bottom() - r.h / 4), shake, "╚═╝", C_ALIEN)?;
    Ok(())
}

fn draw_particles<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
    shake: (i32, i32),
) -> std::io::Result<()> {
    for p in state.particles.iter() {
        let alpha = p.alpha();
        let glyph = match alpha {
            170..=255 => "*",
            85..=169 => "+",
            _ => "·",
        };
        put(out, view, (p.x as i32, p.y as i32), shake, glyph, rgb(p.color.faded(alpha.max(60))))?;
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn option_label(menu: &Menu, index: usize, label: &str) -> String {
    match (menu.active_menu, index) {
        (MenuScreen::Settings, 0) => format!("{label}: {:>3}", menu.music_volume),
        (MenuScreen::Settings, 1) => format!("{label}: {:>3}", menu.sound_volume),
        (MenuScreen::Settings, 2) => format!("{label}: {}", if menu.show_fps { "On" } else { "Off" }),
        (MenuScreen::Difficulty, i) if i < 3 => {
            let current = matches!(
                (i, menu.difficulty),
                (0, Difficulty::Easy) | (1, Difficulty::Normal) | (2, Difficulty::Hard)
            );
            if current { format!("{label} ✓") } else { label.to_string() }
        }
        _ => label.to_string(),
    }
}

fn draw_menu<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let menu = &state.menu;
    let (sw, sh) = (state.settings.screen_width, state.settings.screen_height);

    let title = match menu.active_menu {
        MenuScreen::Main => "★  ALIEN  INVASION  ★",
        MenuScreen::Pause => "‖  PAUSED  ‖",
        MenuScreen::Settings => "SETTINGS",
        MenuScreen::Difficulty => "DIFFICULTY",
    };
    let first = menu.option_rect(0, sw, sh);
    let (_, title_row) = view.cell(first.centerx(), first.top() - 80);
    put_centred(out, view.cols, title_row.max(2) as u16, title, C_TITLE)?;

    if menu.active_menu == MenuScreen::Main && state.stats.high_score > 0 {
        let best = format!("Best Score: {}", state.stats.high_score);
        put_centred(out, view.cols, (title_row + 1).max(3) as u16, &best, C_HUD_SCORE)?;
    }

    // Options dim while the screen-switch fade is in its first half.
    let fading = menu.animation.active && menu.animation.progress < 0.5;
    for (i, label) in menu.current_options().iter().enumerate() {
        let rect: Rect = menu.option_rect(i, sw, sh);
        let (_, row) = view.cell(rect.centerx(), rect.centery());
        let text = option_label(menu, i, label);
        let (text, color) = if i == menu.selected_option {
            (format!("▶ {text} ◀"), C_SELECTED)
        } else {
            (text, C_OPTION)
        };
        let color = if fading { Color::DarkGrey } else { color };
        put_centred(out, view.cols, row.max(2) as u16, &text, color)?;
    }
    Ok(())
}

fn draw_box<W: Write>(
    out: &mut W,
    view: &Viewport,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2 + 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        put_centred(out, view.cols, start_row + i as u16, msg, *color)?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let new_best = state.stats.score >= state.stats.high_score && state.stats.score > 0;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>7} ★", state.stats.high_score)
    } else {
        format!("Best Score:  {:>7}", state.stats.high_score)
    };
    let lines = [
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Final Score: {:>7}", state.stats.score), Color::Yellow),
        (best_line, if new_best { Color::Yellow } else { Color::DarkGrey }),
    ];
    draw_box(out, view, &lines)?;

    let button = play_button_rect(state.settings.screen_width, state.settings.screen_height);
    let (_, row) = view.cell(button.centerx(), button.centery());
    out.queue(style::SetBackgroundColor(Color::DarkGreen))?;
    put_centred(out, view.cols, row.max(2) as u16, "   PLAY   ", Color::White)?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

fn draw_victory<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let lines = [
        ("╔════════════════════╗".to_string(), Color::Yellow),
        ("║   ★  VICTORY  ★    ║".to_string(), Color::Yellow),
        ("╚════════════════════╝".to_string(), Color::Yellow),
        (format!("Final Score: {:>7}", state.stats.score), Color::White),
        ("R - Restart   Q - Quit".to_string(), Color::Grey),
    ];
    draw_box(out, view, &lines)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    fps: u32,
) -> std::io::Result<()> {
    let hint = match state.status {
        GameStatus::Playing | GameStatus::ShipDestroying => {
            "← → / A D : Move   SPACE : Shoot   P / ESC : Pause   Q : Quit"
        }
        GameStatus::Menu | GameStatus::Paused => "↑ ↓ / W S : Select   ENTER : Confirm   ← → : Adjust   Q : Quit",
        GameStatus::GameOver => "R / click PLAY : New Game   M : Menu   Q : Quit",
        GameStatus::Victory => "R : Restart   Q : Quit",
    };
    let row = view.rows.saturating_sub(1);
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    if state.menu.show_fps {
        let fps_str = format!("FPS:{fps:>3}");
        out.queue(cursor::MoveTo(view.cols.saturating_sub(fps_str.len() as u16 + 1), row))?;
        out.queue(Print(fps_str))?;
    }
    Ok(())
}
