//! Alien Invasion simulation core.
//!
//! The library owns every rule of the game and performs no terminal I/O.
//! The binary (`src/main.rs`) feeds it input events and wall-clock
//! timestamps, then renders whatever state comes back.

pub mod assets;
pub mod collision;
pub mod compute;
pub mod entities;
pub mod error;
pub mod fleet;
pub mod geometry;
pub mod input;
pub mod menu;
pub mod particles;
pub mod projectile;
pub mod settings;
pub mod ship;
pub mod stats;
