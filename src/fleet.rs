/// Alien fleet: per-level formations and fleet-wide movement.

use crate::entities::Alien;
use crate::geometry::Rect;
use crate::settings::Settings;

/// Horizontal jitter applied to alternate rows of the wave formation.
const WAVE_ROW_JITTER: i32 = 20;
const WAVE_OFFSET_X: i32 = 50;
const WAVE_OFFSET_Y: i32 = 100;

const PYRAMID_ROWS: [i32; 7] = [1, 2, 3, 4, 3, 2, 1];
const DIAMOND_ROWS: [i32; 9] = [1, 2, 3, 4, 5, 4, 3, 2, 1];
/// Centred formations start within the top 3/5 of the screen.
const FORMATION_DEPTH: (i32, i32) = (3, 5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FleetLayout {
    /// 3×3 block.
    Block,
    /// Rows of 1-2-3-4-3-2-1, each centred.
    Pyramid,
    /// Rows of 1-2-3-4-5-4-3-2-1, each centred.
    Diamond,
    /// Two offset groups of 3 rows × 6 columns.
    Waves,
}

impl FleetLayout {
    /// Unknown levels fall back to the block.
    pub fn for_level(level: u32) -> Self {
        match level {
            2 => FleetLayout::Pyramid,
            3 => FleetLayout::Diamond,
            4 => FleetLayout::Waves,
            _ => FleetLayout::Block,
        }
    }
}

impl Alien {
    pub fn new(x: i32, y: i32, settings: &Settings) -> Self {
        Alien {
            rect: Rect::new(x, y, settings.alien_width, settings.alien_height),
            x: x as f32,
        }
    }
}

/// Vertical distance between rows: two alien heights, tightened when the
/// formation would otherwise reach below `FORMATION_DEPTH` of the screen.
fn row_pitch(row_count: usize, ah: i32, screen_height: i32) -> i32 {
    let (num, den) = FORMATION_DEPTH;
    let gaps = (row_count as i32 - 1).max(1);
    let fit = (screen_height * num / den - ah) / gaps;
    (2 * ah).min(fit.max(1))
}

fn centred_rows(rows: &[i32], aw: i32, ah: i32, screen_width: i32, screen_height: i32) -> Vec<(i32, i32)> {
    let pitch = row_pitch(rows.len(), ah, screen_height);
    let mut out = Vec::new();
    for (row, &count) in rows.iter().enumerate() {
        let row_x = (screen_width - count * 2 * aw).div_euclid(2);
        for col in 0..count {
            out.push((row_x + 2 * aw * col, ah + pitch * row as i32));
        }
    }
    out
}

/// Top-left positions of every alien in `layout`.
pub fn placements(layout: FleetLayout, settings: &Settings) -> Vec<(i32, i32)> {
    let (aw, ah) = (settings.alien_width, settings.alien_height);
    match layout {
        FleetLayout::Block => (0..3)
            .flat_map(|row| (0..3).map(move |col| (aw + 2 * aw * col, ah + 2 * ah * row)))
            .collect(),
        FleetLayout::Pyramid => {
            centred_rows(&PYRAMID_ROWS, aw, ah, settings.screen_width, settings.screen_height)
        }
        FleetLayout::Diamond => {
            centred_rows(&DIAMOND_ROWS, aw, ah, settings.screen_width, settings.screen_height)
        }
        FleetLayout::Waves => {
            let mut out = Vec::with_capacity(36);
            for wave in 0..2 {
                for row in 0..3 {
                    let jitter = if row % 2 == 0 { WAVE_ROW_JITTER } else { -WAVE_ROW_JITTER };
                    for col in 0..6 {
                        let x = aw + 2 * aw * col + WAVE_OFFSET_X * wave + jitter;
                        let y = ah + 2 * ah * row + WAVE_OFFSET_Y * wave;
                        out.push((x, y));
                    }
                }
            }
            out
        }
    }
}

/// Build the fleet for `level`.
pub fn create_fleet(level: u32, settings: &Settings) -> Vec<Alien> {
    placements(FleetLayout::for_level(level), settings)
        .into_iter()
        .map(|(x, y)| Alien::new(x, y, settings))
        .collect()
}

/// True if the alien touches either horizontal edge.
pub fn check_edges(alien: &Alien, settings: &Settings) -> bool {
    alien.rect.right() >= settings.screen_width - settings.alien_edge_margin
        || alien.rect.left() <= settings.alien_edge_margin
}

/// Drop the entire fleet and reverse its direction.
pub fn change_fleet_direction(aliens: &mut [Alien], settings: &mut Settings) {
    for alien in aliens.iter_mut() {
        alien.rect.y += settings.fleet_drop_speed;
    }
    settings.dynamic.fleet_direction *= -1.0;
}

/// One frame of fleet movement.  Returns `true` if the fleet hit an edge
/// this frame (and therefore dropped and reversed).
pub fn advance_fleet(aliens: &mut [Alien], settings: &mut Settings) -> bool {
    let at_edge = aliens.iter().any(|a| check_edges(a, settings));
    if at_edge {
        change_fleet_direction(aliens, settings);
    }

    let step = settings.dynamic.alien_speed * settings.dynamic.fleet_direction;
    for alien in aliens.iter_mut() {
        alien.x += step;
        alien.rect.x = alien.x as i32;
    }
    at_edge
}
