//! Flappy Bird: a headless game core plus a crossterm frontend.
//!
//! The core ([`game::Game`]) takes explicit millisecond timestamps and a
//! random source, so a whole round can be driven from tests without a display.

pub mod collision;
pub mod config;
pub mod difficulty;
pub mod entity;
pub mod error;
pub mod frontend;
pub mod game;
pub mod geometry;
pub mod render;
#[cfg(feature = "sound")]
pub mod sound;
pub mod spawner;
pub mod terminal;

pub use config::{Config, Params};
pub use frontend::{Clock, Frontend, SystemClock, run};
pub use game::{Game, GameEvent, Input, Phase};
