//! Difficulty state machine.
//!
//! Levels climb 0, 1, 2, ... on the level-up timer and never stop. Each step
//! shrinks the enemy spawn interval and rescales the class-wide enemy base
//! stats. Those base stats are read once, when an enemy spawns.

use crate::consts::*;

/// Class-wide enemy base stats every variant multiplies at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyParameters {
    pub max_health: f32,
    pub move_speed: f32,
    /// Seconds between shots on average.
    pub fire_rate: f32,
    pub bullet_speed: f32,
}

impl Default for DifficultyParameters {
    fn default() -> Self {
        Self {
            max_health: ENEMY_BASE_MAX_HEALTH,
            move_speed: ENEMY_BASE_MOVE_SPEED,
            fire_rate: ENEMY_BASE_FIRE_RATE,
            bullet_speed: ENEMY_BASE_BULLET_SPEED,
        }
    }
}

impl DifficultyParameters {
    pub fn level_up(&mut self) {
        self.max_health *= LEVEL_UP_HEALTH_FACTOR;
        self.move_speed *= LEVEL_UP_SPEED_FACTOR;
        self.fire_rate = (self.fire_rate - LEVEL_UP_FIRE_RATE_STEP).max(FIRE_RATE_FLOOR);
        self.bullet_speed *= LEVEL_UP_BULLET_SPEED_FACTOR;
    }

    pub fn level_reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Difficulty {
    pub level: u32,
    pub params: DifficultyParameters,
    /// Current enemy spawn period in milliseconds.
    pub enemy_spawn_interval_ms: f64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            level: 0,
            params: DifficultyParameters::default(),
            enemy_spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
        }
    }
}

impl Difficulty {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one level. Returns the new enemy spawn interval so the
    /// scheduler can retune its timer.
    pub fn level_up(&mut self) -> f64 {
        self.level += 1;
        self.enemy_spawn_interval_ms *= ENEMY_SPAWN_INTERVAL_SHRINK;
        self.params.level_up();
        log::info!(
            "level {}: spawn every {:.0} ms, enemy base health {:.2}",
            self.level,
            self.enemy_spawn_interval_ms,
            self.params.max_health
        );
        self.enemy_spawn_interval_ms
    }

    /// Back to level 0 with default base stats, for a new session.
    pub fn reset(&mut self) {
        self.level = 0;
        self.enemy_spawn_interval_ms = ENEMY_SPAWN_INTERVAL_MS;
        self.params.level_reset();
    }
}
