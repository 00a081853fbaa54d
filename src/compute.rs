//! Per-frame collision & interaction resolver.
//!
//! Runs once per frame after movement. Every pass marks what has to go and
//! compacts afterwards, so removal never disturbs the iteration it happens
//! in. Within each pass the off-screen check runs before any collision test.
//! Randomness (enemy firing) comes only through the injected RNG.

use rand::Rng;

use crate::audio::Cue;
use crate::consts::*;
use crate::entities::{Bullet, PowerupKind, World};

/// Drop every element whose flag is set, keeping the order of the rest.
fn compact<T>(items: &mut Vec<T>, remove: &[bool]) {
    let mut flags = remove.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

/// Move player bullets up. A bullet that leaves the top is discarded;
/// otherwise it hits the first enemy it overlaps, in enemy order, and is
/// spent. At most one enemy is damaged per bullet per frame.
pub fn handle_player_bullets(world: &mut World) {
    let damage = world.player.bullet_damage;
    let mut spent = vec![false; world.player.bullets.len()];

    for (bi, bullet) in world.player.bullets.iter_mut().enumerate() {
        bullet.advance();
        if bullet.body.y < 0.0 {
            spent[bi] = true;
            continue;
        }
        if let Some(enemy) = world
            .enemies
            .iter_mut()
            .find(|e| bullet.body.intersects(&e.body))
        {
            enemy.take_damage(damage);
            spent[bi] = true;
        }
    }

    compact(&mut world.player.bullets, &spent);
}

/// The beam is never consumed by a hit: every enemy it overlaps takes laser
/// damage, every frame, while the laser stays equipped.
pub fn handle_laser(world: &mut World) {
    let player = &world.player;
    if !player.laser_equipped {
        return;
    }
    for enemy in world
        .enemies
        .iter_mut()
        .filter(|e| player.laser.intersects(&e.body))
    {
        enemy.take_damage(player.laser_damage);
    }
}

/// Move each enemy's bullets down. Off the bottom they are discarded; a
/// bullet overlapping the player is spent and deals its firer's damage.
pub fn handle_enemy_bullets(world: &mut World) {
    for enemy in world.enemies.iter_mut() {
        let Some(weapon) = enemy.weapon else {
            continue;
        };
        let mut spent = vec![false; enemy.bullets.len()];
        for (bi, bullet) in enemy.bullets.iter_mut().enumerate() {
            bullet.advance();
            if bullet.body.y > SCREEN_HEIGHT {
                spent[bi] = true;
                continue;
            }
            if bullet.body.intersects(&world.player.body) {
                spent[bi] = true;
                world.player.take_damage(weapon.bullet_damage);
                world.cues.push(Cue::TakeDamage);
            }
        }
        compact(&mut enemy.bullets, &spent);
    }
}

/// Cull enemies that ran off the bottom (one point of penetration damage to
/// the player each) or died (one kill each), then let survivors roll to fire.
pub fn handle_enemies(world: &mut World, rng: &mut impl Rng) {
    let mut gone = vec![false; world.enemies.len()];

    for (ei, enemy) in world.enemies.iter_mut().enumerate() {
        if enemy.is_off_screen() {
            gone[ei] = true;
            world.player.take_damage(PENETRATION_DAMAGE);
            world.cues.push(Cue::TakeDamage);
            continue;
        }
        if enemy.is_dead() {
            gone[ei] = true;
            world.player.kills += 1;
            world.cues.push(Cue::EnemyDestroyed);
            continue;
        }
        if let Some(weapon) = enemy.weapon {
            let window = weapon.fire_window();
            if window > 0 && rng.gen_ratio(1, window) {
                enemy.fire();
            }
        }
    }

    compact(&mut world.enemies, &gone);
}

/// Move powerups down. Off the bottom they are discarded; touching the
/// player applies the effect once and consumes the powerup.
pub fn handle_powerups(world: &mut World) {
    let mut gone = vec![false; world.powerups.len()];

    for (pi, powerup) in world.powerups.iter_mut().enumerate() {
        powerup.fall();
        if powerup.is_off_screen() {
            gone[pi] = true;
            continue;
        }
        if !powerup.body.intersects(&world.player.body) {
            continue;
        }
        gone[pi] = true;
        let player = &mut world.player;
        match powerup.kind {
            PowerupKind::Health => {
                player.heal(HEALTH_PICKUP_HP);
                world.cues.push(Cue::Heal);
            }
            PowerupKind::MaxHealth => {
                player.heal(MAX_HEALTH_PICKUP_HP);
                world.cues.push(Cue::Heal);
            }
            PowerupKind::Damage => {
                player.damage_up();
                world.cues.push(Cue::Powerup);
            }
            PowerupKind::Laser => {
                player.equip_laser();
                world.cues.push(Cue::Powerup);
            }
        }
    }

    compact(&mut world.powerups, &gone);
}

/// Full resolver pass in its fixed order.
pub fn resolve(world: &mut World, rng: &mut impl Rng) {
    handle_player_bullets(world);
    handle_laser(world);
    handle_enemy_bullets(world);
    handle_enemies(world, rng);
    handle_powerups(world);
}

/// Translate every enemy straight down by its own speed.
pub fn move_enemies(world: &mut World) {
    for enemy in world.enemies.iter_mut() {
        enemy.descend();
    }
}

/// Player fire press: the laser when equipped, a bullet otherwise.
pub fn player_fire(world: &mut World) {
    let player = &mut world.player;
    if player.laser_equipped {
        if player.fire_laser() {
            world.cues.push(Cue::Laser);
        }
    } else if player.fire_bullet() {
        world.cues.push(Cue::PlayerGunfire);
    }
}

/// Bullets currently in flight from every enemy.
pub fn enemy_bullets(world: &World) -> impl Iterator<Item = &Bullet> {
    world.enemies.iter().flat_map(|e| e.bullets.iter())
}
