/// Collision and damage resolution.
///
/// Brute-force all-pairs rectangle tests; entity counts stay well under a
/// hundred, so no broad phase is needed.

use rand::Rng;

use crate::entities::{Alien, AlienBullet, Bullet, Ship};
use crate::geometry::any_collides;
use crate::particles::{
    ParticleSystem, ScreenShake, EXPLOSION_COLOR, EXPLOSION_COUNT, SHIELD_BREAK_COUNT,
    SHIELD_HIT_COUNT, SHIP_EXPLOSION_COLOR,
};
use crate::settings::Settings;

/// Outcome of the alien-bullet pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipHit {
    /// No alien bullet touched the ship.
    Clear,
    /// Shield took the hit and held.
    Absorbed { bullets: usize },
    /// Shield broke; the life-loss sequence must run.
    Destroyed { bullets: usize },
}

/// Player bullets against aliens, many-to-many.  Every bullet that overlaps
/// any alien is removed, as is every alien that overlaps any bullet.  One
/// explosion burst is spawned per destroyed alien.  Returns the number of
/// aliens destroyed.
pub fn resolve_bullet_alien(
    bullets: &mut Vec<Bullet>,
    aliens: &mut Vec<Alien>,
    particles: &mut ParticleSystem,
    rng: &mut impl Rng,
) -> u32 {
    let mut bullet_hit = vec![false; bullets.len()];
    let mut alien_hit = vec![false; aliens.len()];

    for (bi, bullet) in bullets.iter().enumerate() {
        for (ai, alien) in aliens.iter().enumerate() {
            if bullet.rect.colliderect(&alien.rect) {
                bullet_hit[bi] = true;
                alien_hit[ai] = true;
            }
        }
    }

    let mut destroyed = 0;
    for (alien, &hit) in aliens.iter().zip(alien_hit.iter()) {
        if !hit {
            continue;
        }
        let (cx, cy) = alien.rect.center();
        particles.create_explosion(cx as f32, cy as f32, EXPLOSION_COLOR, EXPLOSION_COUNT, rng);
        destroyed += 1;
    }

    let mut hits = bullet_hit.into_iter();
    bullets.retain(|_| !hits.next().unwrap_or(false));
    let mut hits = alien_hit.into_iter();
    aliens.retain(|_| !hits.next().unwrap_or(false));

    destroyed
}

/// Alien bullets against the ship.  All overlapping bullets are removed in
/// one batch and their damage summed into a single `absorb_damage` call.
pub fn resolve_alien_bullets_ship(
    alien_bullets: &mut Vec<AlienBullet>,
    ship: &mut Ship,
    settings: &Settings,
    particles: &mut ParticleSystem,
    shake: &mut ScreenShake,
    rng: &mut impl Rng,
) -> ShipHit {
    let (hits, rest): (Vec<AlienBullet>, Vec<AlienBullet>) = alien_bullets
        .drain(..)
        .partition(|b| b.rect.colliderect(&ship.rect));
    *alien_bullets = rest;

    if hits.is_empty() {
        return ShipHit::Clear;
    }

    shake.arm(settings.shake_duration, settings.shake_intensity);
    for bullet in &hits {
        let (cx, cy) = bullet.rect.center();
        particles.create_shield_hit(cx as f32, cy as f32, SHIELD_HIT_COUNT, rng);
    }

    let total_damage = settings.alien_bullet_damage * hits.len() as f32;
    if ship.absorb_damage(total_damage) {
        let (cx, cy) = ship.rect.center();
        particles.create_explosion(cx as f32, cy as f32, SHIP_EXPLOSION_COLOR, SHIELD_BREAK_COUNT, rng);
        ShipHit::Destroyed { bullets: hits.len() }
    } else {
        ShipHit::Absorbed { bullets: hits.len() }
    }
}

/// Direct alien-ship contact.
pub fn alien_contacts_ship(aliens: &[Alien], ship: &Ship) -> bool {
    any_collides(aliens, &ship.rect)
}

/// Any alien whose bottom edge reached the bottom of the screen.
pub fn aliens_reached_bottom(aliens: &[Alien], settings: &Settings) -> bool {
    aliens.iter().any(|a| a.rect.bottom() >= settings.screen_height)
}
