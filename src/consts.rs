//! Fixed game constants. Everything placement and bounds logic depends on.

use crate::entities::{EnemyKind, PowerupKind};

// ── Screen & pacing ──────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 600.0;
pub const SCREEN_HEIGHT: f32 = 800.0;

/// Target frame rate of the fixed-timestep loop.
pub const FPS: u32 = 60;
/// Simulated time covered by one frame, in milliseconds.
pub const FRAME_MS: f64 = 1000.0 / FPS as f64;

/// How long the game-over summary stays up before the menu returns.
pub const GAME_OVER_DELAY_MS: u64 = 5000;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 80.0;
pub const PLAYER_SPAWN_X: f32 = SCREEN_WIDTH / 2.0 - PLAYER_SIZE / 2.0;
pub const PLAYER_SPAWN_Y: f32 = SCREEN_HEIGHT - PLAYER_SIZE - 10.0;
pub const PLAYER_MOVE_SPEED: f32 = 8.0;
pub const PLAYER_MAX_HEALTH: i32 = 10;

pub const HEALTHBAR_HEIGHT: f32 = 5.0;
/// Vertical gap between the bottom of the ship and its health bar.
pub const HEALTHBAR_GAP: f32 = 2.0;

pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
pub const PLAYER_BULLET_HEIGHT: f32 = 8.0;
pub const PLAYER_BULLET_SPEED: f32 = 10.0;
/// Max simultaneous player bullets on screen.
pub const PLAYER_FIRE_RATE: usize = 5;
pub const PLAYER_BULLET_DAMAGE: f32 = 1.0;

pub const LASER_WIDTH: f32 = 2.0;
pub const LASER_HEIGHT: f32 = SCREEN_HEIGHT;
pub const LASER_DAMAGE: f32 = 10.0;
pub const LASER_CHARGES: u32 = 10;

pub const DAMAGE_UP_BULLET: f32 = 1.0;
pub const DAMAGE_UP_LASER: f32 = 5.0;

/// Damage the player takes when an enemy slips past the bottom edge.
pub const PENETRATION_DAMAGE: i32 = 1;

// ── Enemy class-wide defaults ────────────────────────────────────────────────

pub const ENEMY_BASE_MAX_HEALTH: f32 = 10.0;
pub const ENEMY_BASE_MOVE_SPEED: f32 = 5.0;
/// Seconds between shots on average; lower fires more often.
pub const ENEMY_BASE_FIRE_RATE: f32 = 2.0;
pub const ENEMY_BASE_BULLET_SPEED: f32 = 6.0;

pub const LEVEL_UP_HEALTH_FACTOR: f32 = 1.1;
pub const LEVEL_UP_SPEED_FACTOR: f32 = 1.2;
pub const LEVEL_UP_FIRE_RATE_STEP: f32 = 0.2;
pub const FIRE_RATE_FLOOR: f32 = 0.6;
pub const LEVEL_UP_BULLET_SPEED_FACTOR: f32 = 1.1;

// ── Powerups ─────────────────────────────────────────────────────────────────

pub const POWERUP_SIZE: f32 = 40.0;
pub const POWERUP_FALL_SPEED: f32 = 4.0;
pub const HEALTH_PICKUP_HP: i32 = 2;
pub const MAX_HEALTH_PICKUP_HP: i32 = 10;

// ── Timers (ms) ──────────────────────────────────────────────────────────────

pub const ENEMY_SPAWN_INTERVAL_MS: f64 = 1250.0;
/// Multiplier applied to the enemy spawn interval at every level-up.
pub const ENEMY_SPAWN_INTERVAL_SHRINK: f64 = 0.9;
pub const POWERUP_SPAWN_INTERVAL_MS: f64 = 10_000.0;
pub const LEVEL_UP_INTERVAL_MS: f64 = 30_000.0;

// ── Spawn tables ─────────────────────────────────────────────────────────────

pub const ENEMY_WEIGHTS: [(EnemyKind, u32); 3] = [
    (EnemyKind::Red, 45),
    (EnemyKind::Green, 45),
    (EnemyKind::Elite, 10),
];

pub const POWERUP_WEIGHTS: [(PowerupKind, u32); 4] = [
    (PowerupKind::Health, 40),
    (PowerupKind::MaxHealth, 15),
    (PowerupKind::Damage, 25),
    (PowerupKind::Laser, 20),
];

/// Horizontal spawn lanes.
pub const SPAWN_LANES: [f32; 6] = [0.0, 100.0, 200.0, 300.0, 400.0, 500.0];
/// Spawns start just above the top edge.
pub const SPAWN_Y: f32 = -10.0;
