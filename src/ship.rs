/// Player ship: movement, shield, and the timed destruction sequence.

use rand::Rng;

use crate::entities::{DestroyAnimation, Ship};
use crate::geometry::Rect;
use crate::particles::{ParticleSystem, SHIP_EXPLOSION_COLOR};
use crate::settings::Settings;

impl Ship {
    /// A fresh ship at the bottom centre of the screen with a full shield.
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Ship {
            rect: Rect::new(0, 0, settings.ship_width, settings.ship_height),
            x: 0.0,
            moving_left: false,
            moving_right: false,
            shield: settings.max_shield,
            max_shield: settings.max_shield,
            recharge_rate: settings.shield_recharge_rate,
            destroy: DestroyAnimation::default(),
        };
        ship.center(settings);
        ship
    }

    pub fn center(&mut self, settings: &Settings) {
        self.rect
            .set_midbottom(settings.screen_width / 2, settings.screen_height);
        self.x = self.rect.x as f32;
    }

    /// One frame of movement followed by shield recharge.
    pub fn update(&mut self, settings: &Settings) {
        let speed = settings.dynamic.ship_speed;
        if self.moving_right && self.rect.right() < settings.screen_width {
            self.x += speed;
        }
        if self.moving_left && self.rect.left() > 0 {
            self.x -= speed;
        }
        let max_x = (settings.screen_width - self.rect.w).max(0) as f32;
        self.x = self.x.clamp(0.0, max_x);
        self.rect.x = self.x as i32;

        if self.shield < self.max_shield {
            self.shield = (self.shield + self.recharge_rate).min(self.max_shield);
        }
    }

    /// Apply an aggregated hit.  Returns `true` when the shield could not
    /// absorb it, i.e. the ship is destroyed.
    pub fn absorb_damage(&mut self, amount: f32) -> bool {
        let remaining = self.shield - amount.max(0.0);
        if remaining > 0.0 {
            self.shield = remaining.min(self.max_shield);
            false
        } else {
            self.shield = 0.0;
            true
        }
    }

    pub fn reset_shield(&mut self) {
        self.shield = self.max_shield;
    }

    pub fn shield_fraction(&self) -> f32 {
        if self.max_shield > 0.0 {
            self.shield / self.max_shield
        } else {
            0.0
        }
    }

    pub fn is_destroying(&self) -> bool {
        self.destroy.active
    }

    pub fn start_destruction(&mut self, now_ms: u64) {
        self.destroy = DestroyAnimation {
            active: true,
            progress: 0.0,
            start_ms: now_ms,
            particles_spawned: false,
        };
    }

    /// Recompute progress from the wall clock.  The explosion burst fires
    /// once, the first time progress passes `destroy_burst_at`.  Returns
    /// `true` on the call that completes the animation.
    pub fn advance_destruction(
        &mut self,
        now_ms: u64,
        settings: &Settings,
        particles: &mut ParticleSystem,
        rng: &mut impl Rng,
    ) -> bool {
        if !self.destroy.active {
            return false;
        }

        let elapsed = now_ms.saturating_sub(self.destroy.start_ms);
        self.destroy.progress = if settings.destroy_duration_ms == 0 {
            1.0
        } else {
            (elapsed as f32 / settings.destroy_duration_ms as f32).min(1.0)
        };

        if !self.destroy.particles_spawned && self.destroy.progress > settings.destroy_burst_at {
            let (cx, cy) = self.rect.center();
            particles.create_explosion(
                cx as f32,
                cy as f32,
                SHIP_EXPLOSION_COLOR,
                settings.destroy_burst_count,
                rng,
            );
            self.destroy.particles_spawned = true;
        }

        if self.destroy.progress >= 1.0 {
            self.destroy.active = false;
            return true;
        }
        false
    }
}
