/// Terminal sound output.
///
/// A terminal cannot mix PCM, so a loaded effect rings the bell; effects
/// whose file was missing stay silent.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use crossterm::{style::Print, QueueableCommand};
use alien_invasion::assets::{load_sound, sound_file, SoundAsset};
use alien_invasion::entities::SoundEffect;

const ALL_EFFECTS: [SoundEffect; 4] = [
    SoundEffect::Shoot,
    SoundEffect::AlienShoot,
    SoundEffect::Explosion,
    SoundEffect::ShieldHit,
];

pub struct SoundBank {
    sounds: HashMap<SoundEffect, SoundAsset>,
}

impl SoundBank {
    pub fn load(dir: &Path) -> Self {
        let sounds = ALL_EFFECTS
            .iter()
            .map(|&effect| (effect, load_sound(&dir.join(sound_file(effect)))))
            .collect();
        SoundBank { sounds }
    }

    pub fn play<W: Write>(&self, out: &mut W, effect: SoundEffect, volume: u8) -> std::io::Result<()> {
        if volume == 0 {
            return Ok(());
        }
        match self.sounds.get(&effect) {
            Some(SoundAsset::Loaded(_)) => {
                out.queue(Print('\x07'))?;
            }
            Some(SoundAsset::Silent) | None => {}
        }
        Ok(())
    }
}
