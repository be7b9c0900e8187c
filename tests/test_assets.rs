use alien_invasion::assets::*;
use alien_invasion::entities::{Rgb, SoundEffect};

use tempfile::tempdir;

const FILL: Rgb = Rgb(10, 10, 30);

// ── sounds ────────────────────────────────────────────────────────────────────

#[test]
fn missing_sound_is_silent() {
    let dir = tempdir().unwrap();
    assert!(load_sound(&dir.path().join("shoot.wav")).is_silent());
}

#[test]
fn empty_sound_is_silent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shoot.wav");
    std::fs::write(&path, b"").unwrap();
    assert!(load_sound(&path).is_silent());
}

#[test]
fn present_sound_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(sound_file(SoundEffect::Explosion));
    std::fs::write(&path, b"RIFF....").unwrap();
    assert_eq!(load_sound(&path), SoundAsset::Loaded(b"RIFF....".to_vec()));
}

// ── backgrounds ───────────────────────────────────────────────────────────────

#[test]
fn no_art_falls_back_to_solid() {
    let dir = tempdir().unwrap();
    let bgs = Backgrounds::load(dir.path(), FILL);
    assert_eq!(bgs.for_level(1), Background::Solid(FILL));
    assert_eq!(bgs.for_level(3), Background::Solid(FILL));
}

#[test]
fn static_art_used_without_animated() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("static_bg_1.txt"), ". * .\n  .  \n").unwrap();
    let bgs = Backgrounds::load(dir.path(), FILL);
    match bgs.for_level(2) {
        Background::Static(art) => assert_eq!(art.lines, vec![". * .", "  .  "]),
        other => panic!("expected static art, got {other:?}"),
    }
}

#[test]
fn animated_art_wins_and_splits_frames() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("dynamic_bg_1.txt"), "*  \n---\n * \n---\n  *\n").unwrap();
    std::fs::write(dir.path().join("static_bg_1.txt"), "ignored\n").unwrap();
    let bgs = Backgrounds::load(dir.path(), FILL);
    assert!(bgs.statics.is_empty());
    match bgs.for_level(1) {
        Background::Animated(frames) => {
            assert_eq!(frames.len(), 3);
            assert_eq!(frames[1].lines, vec![" * "]);
        }
        other => panic!("expected animated art, got {other:?}"),
    }
}

#[test]
fn levels_cycle_through_loaded_art() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("static_bg_1.txt"), "one\n").unwrap();
    std::fs::write(dir.path().join("static_bg_2.txt"), "two\n").unwrap();
    let bgs = Backgrounds::load(dir.path(), FILL);
    let first = |level| match bgs.for_level(level) {
        Background::Static(art) => art.lines[0].clone(),
        _ => String::new(),
    };
    assert_eq!(first(1), "one");
    assert_eq!(first(2), "two");
    assert_eq!(first(3), "one");
}
