//! Spawn scheduler.
//!
//! Three cooperative periodic timers (enemy spawn, powerup spawn, level-up)
//! are advanced once per frame. Their firings land in a pending queue in the
//! order they came due and are handled after the resolver has run.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::audio::Cue;
use crate::consts::*;
use crate::difficulty::{Difficulty, DifficultyParameters};
use crate::entities::{Enemy, EnemyKind, Powerup, PowerupKind, World};

/// Shortest period a timer accepts, so a shrinking interval can't stall a frame.
pub const MIN_TIMER_INTERVAL_MS: f64 = 1.0;

/// Slack for rounding in the summed frame lengths, so a firing that lands on
/// a frame boundary is not pushed to the next frame.
const DUE_EPSILON_MS: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    LevelUp,
    EnemySpawn,
    PowerupSpawn,
}

/// A timer that fires every `interval_ms` of simulated time.
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodicTimer {
    interval_ms: f64,
    elapsed_ms: f64,
}

impl PeriodicTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(MIN_TIMER_INTERVAL_MS),
            elapsed_ms: 0.0,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Change the period. Time already elapsed toward the next firing is kept.
    pub fn set_interval(&mut self, interval_ms: f64) {
        self.interval_ms = interval_ms.max(MIN_TIMER_INTERVAL_MS);
    }

    /// Advance by `dt_ms` and return the offset (ms into this step) of every
    /// firing, earliest first.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<f64> {
        let mut fired = Vec::new();
        let mut due = (self.interval_ms - self.elapsed_ms).max(0.0);
        while due <= dt_ms + DUE_EPSILON_MS {
            fired.push(due.min(dt_ms));
            due += self.interval_ms;
        }
        self.elapsed_ms = (self.interval_ms - (due - dt_ms)).max(0.0);
        fired
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnTimers {
    pub level_up: PeriodicTimer,
    pub enemy: PeriodicTimer,
    pub powerup: PeriodicTimer,
}

impl Default for SpawnTimers {
    fn default() -> Self {
        Self {
            level_up: PeriodicTimer::new(LEVEL_UP_INTERVAL_MS),
            enemy: PeriodicTimer::new(ENEMY_SPAWN_INTERVAL_MS),
            powerup: PeriodicTimer::new(POWERUP_SPAWN_INTERVAL_MS),
        }
    }
}

impl SpawnTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all three timers and append their firings to `pending`,
    /// ordered by when they came due. Simultaneous firings keep the order
    /// level-up, enemy, powerup.
    pub fn advance(&mut self, dt_ms: f64, pending: &mut VecDeque<TimerEvent>) {
        let mut fired: Vec<(f64, TimerEvent)> = Vec::new();
        let timers = [
            (&mut self.level_up, TimerEvent::LevelUp),
            (&mut self.enemy, TimerEvent::EnemySpawn),
            (&mut self.powerup, TimerEvent::PowerupSpawn),
        ];
        for (timer, event) in timers {
            fired.extend(timer.advance(dt_ms).into_iter().map(|t| (t, event)));
        }
        // sort_by is stable, so ties keep registration order
        fired.sort_by(|a, b| a.0.total_cmp(&b.0));
        pending.extend(fired.into_iter().map(|(_, event)| event));
    }
}

// ── Weighted draws ───────────────────────────────────────────────────────────

pub fn roll_enemy_kind(rng: &mut impl Rng) -> EnemyKind {
    ENEMY_WEIGHTS
        .choose_weighted(rng, |&(_, weight)| weight)
        .map(|&(kind, _)| kind)
        .unwrap_or(EnemyKind::Red)
}

pub fn roll_powerup_kind(rng: &mut impl Rng) -> PowerupKind {
    POWERUP_WEIGHTS
        .choose_weighted(rng, |&(_, weight)| weight)
        .map(|&(kind, _)| kind)
        .unwrap_or(PowerupKind::Health)
}

pub fn roll_lane(rng: &mut impl Rng) -> f32 {
    SPAWN_LANES.choose(rng).copied().unwrap_or(0.0)
}

pub fn spawn_enemy(rng: &mut impl Rng, params: &DifficultyParameters) -> Enemy {
    let kind = roll_enemy_kind(rng);
    let x = roll_lane(rng);
    log::debug!("spawn {:?} enemy at x={}", kind, x);
    Enemy::spawn(kind, x, SPAWN_Y, params)
}

pub fn spawn_powerup(rng: &mut impl Rng) -> Powerup {
    let kind = roll_powerup_kind(rng);
    let x = roll_lane(rng);
    log::debug!("spawn {:?} powerup at x={}", kind, x);
    Powerup::new(kind, x, SPAWN_Y)
}

/// Handle every pending timer firing once, in the order received.
pub fn run_pending(
    pending: &mut VecDeque<TimerEvent>,
    world: &mut World,
    difficulty: &mut Difficulty,
    timers: &mut SpawnTimers,
    rng: &mut impl Rng,
) {
    while let Some(event) = pending.pop_front() {
        log::trace!("timer: {:?}", event);
        match event {
            TimerEvent::LevelUp => {
                let interval = difficulty.level_up();
                timers.enemy.set_interval(interval);
                world.cues.push(Cue::LevelUp);
            }
            TimerEvent::EnemySpawn => {
                let enemy = spawn_enemy(rng, &difficulty.params);
                world.enemies.push(enemy);
            }
            TimerEvent::PowerupSpawn => {
                let powerup = spawn_powerup(rng);
                world.powerups.push(powerup);
            }
        }
    }
}
