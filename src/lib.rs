//! Space Invasion - a top-down arcade shooter.
//!
//! Core modules:
//! - `entities`: player, enemies, powerups and the master `World` state
//! - `compute`: per-frame collision & interaction resolver
//! - `difficulty`: level counter and class-wide enemy base stats
//! - `spawn`: cooperative timers and weighted enemy/powerup spawning
//! - `game`: menu/playing orchestrator that ties one frame together
//! - `render` / `audio`: the collaborator interfaces the front end implements

pub mod audio;
pub mod compute;
pub mod consts;
pub mod difficulty;
pub mod entities;
pub mod game;
pub mod render;
pub mod spawn;

pub use audio::{Audio, Cue};
pub use difficulty::{Difficulty, DifficultyParameters};
pub use entities::{Enemy, EnemyKind, Heading, Player, PowerKind, Powerup, PowerupKind, Rect, World};
pub use game::{FrameInput, FrameOutcome, Game, GameSummary, InputEvent, Phase};
pub use render::{Color, Renderer, Sprite};
