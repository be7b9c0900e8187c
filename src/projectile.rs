/// Player and alien projectiles: firing under the in-flight caps, the
/// front-row alien fire policy, and per-frame movement with off-screen reaping.

use std::collections::BTreeMap;

use rand::Rng;

use crate::entities::{Alien, AlienBullet, Bullet, Ship};
use crate::geometry::Rect;
use crate::settings::Settings;

// ── Player bullets ────────────────────────────────────────────────────────────

/// Fire from the ship's nose.  Returns `false` (and does nothing) when the
/// cap is already reached.
pub fn fire_bullet(bullets: &mut Vec<Bullet>, ship: &Ship, settings: &Settings) -> bool {
    if bullets.len() >= settings.bullets_allowed {
        return false;
    }
    let mut rect = Rect::new(0, 0, settings.bullet_width, settings.bullet_height);
    rect.set_midtop(ship.rect.centerx(), ship.rect.top());
    bullets.push(Bullet {
        rect,
        y: rect.y as f32,
        speed: settings.dynamic.bullet_speed,
        color: settings.bullet_color,
    });
    true
}

/// Move every bullet up and drop those whose top edge reached the screen top.
pub fn advance_and_reap_bullets(bullets: &mut Vec<Bullet>) {
    for bullet in bullets.iter_mut() {
        bullet.y -= bullet.speed;
        bullet.rect.y = bullet.y as i32;
    }
    bullets.retain(|b| b.rect.top() > 0);
}

// ── Alien bullets ─────────────────────────────────────────────────────────────

pub fn fire_alien_bullet(
    alien_bullets: &mut Vec<AlienBullet>,
    alien: &Alien,
    now_ms: u64,
    settings: &Settings,
) -> bool {
    if alien_bullets.len() >= settings.alien_bullets_allowed {
        return false;
    }
    let mut rect = Rect::new(0, 0, settings.alien_bullet_width, settings.alien_bullet_height);
    rect.set_midtop(alien.rect.centerx(), alien.rect.bottom());
    alien_bullets.push(AlienBullet {
        rect,
        y: rect.y as f32,
        speed: settings.dynamic.alien_bullet_speed,
        color: settings.alien_bullet_color,
        fired_at_ms: now_ms,
    });
    true
}

/// Move every alien bullet down and drop those whose bottom edge reached
/// the screen bottom.
pub fn advance_and_reap_alien_bullets(alien_bullets: &mut Vec<AlienBullet>, settings: &Settings) {
    for bullet in alien_bullets.iter_mut() {
        bullet.y += bullet.speed;
        bullet.rect.y = bullet.y as i32;
    }
    alien_bullets.retain(|b| b.rect.bottom() < settings.screen_height);
}

/// Pick the alien that fires next: aliens are bucketed by approximate
/// column (`centerx / bucket_width`), each bucket keeps its lowest member,
/// and one bucket is chosen uniformly at random.
pub fn select_shooter<'a>(aliens: &'a [Alien], bucket_width: i32, rng: &mut impl Rng) -> Option<&'a Alien> {
    let bucket_width = bucket_width.max(1);
    let mut front: BTreeMap<i32, &Alien> = BTreeMap::new();
    for alien in aliens {
        let col = alien.rect.centerx().div_euclid(bucket_width);
        match front.get(&col) {
            Some(current) if current.rect.bottom() >= alien.rect.bottom() => {}
            _ => {
                front.insert(col, alien);
            }
        }
    }
    if front.is_empty() {
        return None;
    }
    let pick = rng.gen_range(0..front.len());
    front.values().nth(pick).copied()
}

/// Alien fire policy, run once per frame.  At most one shot per
/// `alien_fire_frequency` window; the window restarts only when a shot is
/// actually fired.  Returns `true` if a bullet was fired.
pub fn try_alien_fire(
    aliens: &[Alien],
    alien_bullets: &mut Vec<AlienBullet>,
    last_shot_ms: &mut u64,
    now_ms: u64,
    settings: &Settings,
    rng: &mut impl Rng,
) -> bool {
    if aliens.is_empty()
        || now_ms.saturating_sub(*last_shot_ms) <= settings.dynamic.alien_fire_frequency
        || alien_bullets.len() >= settings.alien_bullets_allowed
    {
        return false;
    }
    let Some(shooter) = select_shooter(aliens, settings.fire_bucket_width, rng) else {
        return false;
    };
    if fire_alien_bullet(alien_bullets, shooter, now_ms, settings) {
        *last_shot_ms = now_ms;
        return true;
    }
    false
}
