//! Game entity types and their per-entity behavior (move, fire, take damage).
//!
//! Effects that involve more than one entity (collisions, pickups, kills)
//! belong to `compute`. Everything here only touches its own state.

use std::collections::BTreeMap;

use crate::audio::Cue;
use crate::consts::*;
use crate::difficulty::DifficultyParameters;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned box in screen space (origin top-left, y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Strict overlap test. Touching edges do not collide and an empty box
    /// never collides with anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// A bullet owned by whoever fired it. `velocity` is the vertical step per
/// frame: negative travels up, positive travels down.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub body: Rect,
    pub velocity: f32,
}

impl Bullet {
    pub fn advance(&mut self) {
        self.body.translate(0.0, self.velocity);
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Snapshot of the movement keys held this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Heading {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Powers shown in the HUD, keyed by display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PowerKind {
    /// Stack count of damage upgrades.
    DamageUp,
    /// Remaining laser charges.
    Laser,
}

impl PowerKind {
    pub fn label(&self) -> &'static str {
        match self {
            PowerKind::DamageUp => "Damage up",
            PowerKind::Laser => "Laser",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Rect,
    /// Green bar under the ship, width proportional to health.
    pub healthbar: Rect,
    /// Red full-width bar drawn behind the health bar.
    pub damage_bar: Rect,
    pub health: i32,
    pub max_health: i32,

    pub bullets: Vec<Bullet>,
    /// Max simultaneous bullets.
    pub fire_rate: usize,
    pub bullet_damage: f32,

    /// Last fired beam position. Only live while `laser_equipped`.
    pub laser: Rect,
    pub laser_damage: f32,
    pub laser_equipped: bool,

    pub powers: BTreeMap<PowerKind, u32>,
    pub kills: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        let body = Rect::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y, PLAYER_SIZE, PLAYER_SIZE);
        let bar_y = body.bottom() + HEALTHBAR_GAP;
        Self {
            body,
            healthbar: Rect::new(body.x, bar_y, PLAYER_SIZE, HEALTHBAR_HEIGHT),
            damage_bar: Rect::new(body.x, bar_y, PLAYER_SIZE, HEALTHBAR_HEIGHT),
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            bullets: Vec::new(),
            fire_rate: PLAYER_FIRE_RATE,
            bullet_damage: PLAYER_BULLET_DAMAGE,
            laser: Self::laser_at(&body),
            laser_damage: LASER_DAMAGE,
            laser_equipped: false,
            powers: BTreeMap::new(),
            kills: 0,
        }
    }

    fn laser_at(body: &Rect) -> Rect {
        Rect::new(body.center_x(), body.y - SCREEN_HEIGHT, LASER_WIDTH, LASER_HEIGHT)
    }

    /// Move one step per held direction, clamped so the ship and its health
    /// bar stay on screen. The bars follow the body.
    pub fn move_by(&mut self, heading: Heading) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if heading.left {
            dx -= PLAYER_MOVE_SPEED;
        }
        if heading.right {
            dx += PLAYER_MOVE_SPEED;
        }
        if heading.up {
            dy -= PLAYER_MOVE_SPEED;
        }
        if heading.down {
            dy += PLAYER_MOVE_SPEED;
        }

        let max_x = SCREEN_WIDTH - self.body.w;
        let max_y = SCREEN_HEIGHT - self.body.h - HEALTHBAR_GAP - HEALTHBAR_HEIGHT;
        let new_x = (self.body.x + dx).clamp(0.0, max_x);
        let new_y = (self.body.y + dy).clamp(0.0, max_y);
        let (dx, dy) = (new_x - self.body.x, new_y - self.body.y);

        self.body.translate(dx, dy);
        self.healthbar.translate(dx, dy);
        self.damage_bar.translate(dx, dy);
    }

    /// Fire from the muzzle unless `fire_rate` bullets are already in flight.
    /// Returns whether a bullet was fired.
    pub fn fire_bullet(&mut self) -> bool {
        if self.bullets.len() >= self.fire_rate {
            return false;
        }
        self.bullets.push(Bullet {
            body: Rect::new(
                self.body.center_x(),
                self.body.y,
                PLAYER_BULLET_WIDTH,
                PLAYER_BULLET_HEIGHT,
            ),
            velocity: -PLAYER_BULLET_SPEED,
        });
        true
    }

    pub fn laser_charges(&self) -> u32 {
        self.powers.get(&PowerKind::Laser).copied().unwrap_or(0)
    }

    /// Re-aim the beam at the muzzle and spend one charge. The laser switches
    /// off when the last charge is spent. No-op unless equipped.
    pub fn fire_laser(&mut self) -> bool {
        if !self.laser_equipped {
            return false;
        }
        self.laser = Self::laser_at(&self.body);
        let charges = self.powers.entry(PowerKind::Laser).or_insert(0);
        *charges = charges.saturating_sub(1);
        if *charges == 0 {
            self.laser_equipped = false;
        }
        true
    }

    pub fn equip_laser(&mut self) {
        self.laser_equipped = true;
        self.powers.insert(PowerKind::Laser, LASER_CHARGES);
    }

    pub fn damage_up(&mut self) {
        self.bullet_damage += DAMAGE_UP_BULLET;
        self.laser_damage += DAMAGE_UP_LASER;
        *self.powers.entry(PowerKind::DamageUp).or_insert(0) += 1;
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).clamp(0, self.max_health);
        self.refresh_healthbar();
    }

    pub fn heal(&mut self, hp: i32) {
        self.health = (self.health + hp).clamp(0, self.max_health);
        self.refresh_healthbar();
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    fn refresh_healthbar(&mut self) {
        let ratio = self.health as f32 / self.max_health as f32;
        self.healthbar = Rect::new(
            self.body.x,
            self.body.bottom() + HEALTHBAR_GAP,
            ratio * self.body.w,
            HEALTHBAR_HEIGHT,
        );
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Red,
    Green,
    Elite,
}

/// Fixed weapon stats for an armed enemy variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponProfile {
    /// Multiplier of the class-wide fire rate.
    pub fire_rate: f32,
    pub bullet_damage: i32,
    pub bullet_width: f32,
    pub bullet_height: f32,
}

/// Per-variant stat bundle. Health and speed are multipliers of the
/// class-wide base stats at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyProfile {
    pub size: f32,
    pub health: f32,
    pub speed: f32,
    pub weapon: Option<WeaponProfile>,
}

const RED: EnemyProfile = EnemyProfile {
    size: 60.0,
    health: 0.4,
    speed: 0.3,
    weapon: Some(WeaponProfile {
        fire_rate: 1.4,
        bullet_damage: 1,
        bullet_width: 5.0,
        bullet_height: 10.0,
    }),
};

const GREEN: EnemyProfile = EnemyProfile {
    size: 50.0,
    health: 0.2,
    speed: 0.5,
    weapon: None,
};

const ELITE: EnemyProfile = EnemyProfile {
    size: 80.0,
    health: 1.0,
    speed: 0.2,
    weapon: Some(WeaponProfile {
        fire_rate: 1.0,
        bullet_damage: 2,
        bullet_width: 10.0,
        bullet_height: 20.0,
    }),
};

impl EnemyKind {
    pub fn profile(&self) -> &'static EnemyProfile {
        match self {
            EnemyKind::Red => &RED,
            EnemyKind::Green => &GREEN,
            EnemyKind::Elite => &ELITE,
        }
    }
}

/// Weapon stats frozen into an enemy instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weapon {
    /// Average seconds between shots.
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub bullet_width: f32,
    pub bullet_height: f32,
}

impl Weapon {
    /// Size of the per-frame firing draw: the enemy fires with probability
    /// 1 / window each frame. Zero means it never fires.
    pub fn fire_window(&self) -> u32 {
        (self.fire_rate * FPS as f32) as u32
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Rect,
    pub max_health: f32,
    /// May go negative; death is `health <= 0`.
    pub health: f32,
    pub move_speed: f32,
    pub weapon: Option<Weapon>,
    pub bullets: Vec<Bullet>,
}

impl Enemy {
    /// Build an enemy whose stats are frozen from `params` as they are right
    /// now. Later level-ups do not reach already spawned enemies.
    pub fn spawn(kind: EnemyKind, x: f32, y: f32, params: &DifficultyParameters) -> Self {
        let profile = kind.profile();
        let max_health = profile.health * params.max_health;
        Self {
            kind,
            body: Rect::new(x, y, profile.size, profile.size),
            max_health,
            health: max_health,
            move_speed: profile.speed * params.move_speed,
            weapon: profile.weapon.map(|w| Weapon {
                fire_rate: w.fire_rate * params.fire_rate,
                bullet_speed: params.bullet_speed,
                bullet_damage: w.bullet_damage,
                bullet_width: w.bullet_width,
                bullet_height: w.bullet_height,
            }),
            bullets: Vec::new(),
        }
    }

    /// Straight down at the frozen speed.
    pub fn descend(&mut self) {
        self.body.translate(0.0, self.move_speed);
    }

    /// Drop a bullet from the base center. Unarmed variants never fire.
    pub fn fire(&mut self) -> bool {
        let Some(weapon) = self.weapon else {
            return false;
        };
        self.bullets.push(Bullet {
            body: Rect::new(
                self.body.center_x(),
                self.body.bottom(),
                weapon.bullet_width,
                weapon.bullet_height,
            ),
            velocity: weapon.bullet_speed,
        });
        true
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_off_screen(&self) -> bool {
        self.body.y > SCREEN_HEIGHT
    }
}

// ── Powerups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerupKind {
    Health,
    MaxHealth,
    Damage,
    Laser,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub body: Rect,
}

impl Powerup {
    pub fn new(kind: PowerupKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            body: Rect::new(x, y, POWERUP_SIZE, POWERUP_SIZE),
        }
    }

    pub fn fall(&mut self) {
        self.body.translate(0.0, POWERUP_FALL_SPEED);
    }

    pub fn is_off_screen(&self) -> bool {
        self.body.y > SCREEN_HEIGHT
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// Everything that lives on the playfield during one session.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Powerup>,
    /// Sound cues raised this frame, drained by the orchestrator.
    pub cues: Vec<Cue>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }
}
