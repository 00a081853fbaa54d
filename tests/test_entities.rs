use space_invasion::consts::*;
use space_invasion::difficulty::DifficultyParameters;
use space_invasion::entities::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&Rect::new(9.0, 9.0, 5.0, 5.0)));
    // Touching edges do not count
    assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
    assert!(!a.intersects(&Rect::new(0.0, 10.0, 5.0, 5.0)));
}

#[test]
fn empty_rect_never_collides() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!a.intersects(&Rect::new(5.0, 5.0, 0.0, 4.0)));
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn fresh_player_layout() {
    let p = Player::new();
    assert_eq!(p.body, Rect::new(260.0, 710.0, 80.0, 80.0));
    assert_eq!(p.healthbar, Rect::new(260.0, 792.0, 80.0, 5.0));
    assert_eq!(p.damage_bar, p.healthbar);
    assert_eq!(p.health, 10);
    assert_eq!(p.max_health, 10);
    assert!(!p.laser_equipped);
    assert!(p.powers.is_empty());
    assert_eq!(p.kills, 0);
}

#[test]
fn damage_then_heal_clamps_to_max() {
    let mut p = Player::new();
    p.take_damage(3);
    assert_eq!(p.health, 7);
    assert!(approx(p.healthbar.w, 0.7 * p.body.w));

    p.heal(5);
    assert_eq!(p.health, 10); // not 12
    assert!(approx(p.healthbar.w, p.body.w));
}

#[test]
fn damage_floors_at_zero() {
    let mut p = Player::new();
    p.take_damage(25);
    assert_eq!(p.health, 0);
    assert!(p.is_dead());
    assert!(approx(p.healthbar.w, 0.0));
}

#[test]
fn fire_bullet_from_muzzle() {
    let mut p = Player::new();
    assert!(p.fire_bullet());
    let b = &p.bullets[0];
    assert_eq!(b.body, Rect::new(300.0, 710.0, 4.0, 8.0));
    assert!(b.velocity < 0.0);
}

#[test]
fn fire_bullet_respects_cap() {
    let mut p = Player::new();
    for _ in 0..PLAYER_FIRE_RATE {
        assert!(p.fire_bullet());
    }
    assert!(!p.fire_bullet());
    assert_eq!(p.bullets.len(), PLAYER_FIRE_RATE);
}

#[test]
fn laser_has_ten_charges() {
    let mut p = Player::new();
    p.equip_laser();
    assert!(p.laser_equipped);
    assert_eq!(p.laser_charges(), 10);

    for shot in 1..=10 {
        assert!(p.fire_laser());
        assert_eq!(p.laser_charges(), 10 - shot);
        // still live until the 10th shot
        assert_eq!(p.laser_equipped, shot < 10);
    }
    assert!(!p.fire_laser());
    assert_eq!(p.powers.get(&PowerKind::Laser), Some(&0));
}

#[test]
fn fire_laser_aims_at_muzzle() {
    let mut p = Player::new();
    p.equip_laser();
    p.move_by(Heading { left: true, ..Default::default() });
    p.fire_laser();
    assert_eq!(p.laser, Rect::new(p.body.center_x(), p.body.y - 800.0, 2.0, 800.0));
}

#[test]
fn fire_laser_without_equip_is_noop() {
    let mut p = Player::new();
    let before = p.laser;
    assert!(!p.fire_laser());
    assert_eq!(p.laser, before);
    assert!(p.powers.is_empty());
}

#[test]
fn damage_up_stacks() {
    let mut p = Player::new();
    p.damage_up();
    p.damage_up();
    assert!(approx(p.bullet_damage, 3.0));
    assert!(approx(p.laser_damage, 20.0));
    assert_eq!(p.powers.get(&PowerKind::DamageUp), Some(&2));
}

#[test]
fn move_carries_bars_along() {
    let mut p = Player::new();
    p.move_by(Heading { left: true, up: true, ..Default::default() });
    assert_eq!(p.body.x, 252.0);
    assert_eq!(p.body.y, 702.0);
    assert_eq!(p.healthbar.x, 252.0);
    assert_eq!(p.healthbar.y, 784.0);
    assert_eq!(p.damage_bar.x, 252.0);
}

#[test]
fn move_clamps_left_and_top() {
    let mut p = Player::new();
    p.body.x = 4.0;
    p.body.y = 3.0;
    p.move_by(Heading { left: true, up: true, ..Default::default() });
    assert_eq!(p.body.x, 0.0);
    assert_eq!(p.body.y, 0.0);
}

#[test]
fn move_clamps_right_and_bottom() {
    let mut p = Player::new();
    p.body.x = 516.0;
    p.move_by(Heading { right: true, down: true, ..Default::default() });
    assert_eq!(p.body.x, 520.0);
    // health bar must stay on screen: 800 - 80 - 2 - 5
    assert_eq!(p.body.y, 713.0);
    assert!(p.healthbar.bottom() <= SCREEN_HEIGHT);
}

#[test]
fn opposite_keys_cancel() {
    let mut p = Player::new();
    p.move_by(Heading { left: true, right: true, up: true, down: true });
    assert_eq!(p.body.x, 260.0);
    assert_eq!(p.body.y, 710.0);
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn variant_stats_from_base() {
    let params = DifficultyParameters::default();

    let red = Enemy::spawn(EnemyKind::Red, 0.0, -10.0, &params);
    assert_eq!(red.body, Rect::new(0.0, -10.0, 60.0, 60.0));
    assert!(approx(red.max_health, 4.0));
    assert!(approx(red.move_speed, 1.5));
    let w = red.weapon.unwrap();
    assert!(approx(w.fire_rate, 2.8));
    assert_eq!(w.bullet_damage, 1);

    let green = Enemy::spawn(EnemyKind::Green, 100.0, -10.0, &params);
    assert_eq!(green.body.w, 50.0);
    assert!(approx(green.max_health, 2.0));
    assert!(approx(green.move_speed, 2.5));
    assert!(green.weapon.is_none());

    let elite = Enemy::spawn(EnemyKind::Elite, 200.0, -10.0, &params);
    assert_eq!(elite.body.w, 80.0);
    assert!(approx(elite.max_health, 10.0));
    assert!(approx(elite.health, 10.0));
    assert!(approx(elite.move_speed, 1.0));
    let w = elite.weapon.unwrap();
    assert_eq!(w.bullet_damage, 2);
    assert!(approx(w.bullet_speed, 6.0));
    assert_eq!(w.fire_window(), 120);
}

#[test]
fn stats_frozen_at_spawn() {
    let mut params = DifficultyParameters::default();
    let old = Enemy::spawn(EnemyKind::Elite, 0.0, 0.0, &params);

    params.level_up();
    let new = Enemy::spawn(EnemyKind::Elite, 0.0, 0.0, &params);

    assert!(approx(old.max_health, 10.0));
    assert!(approx(new.max_health, 11.0));
    assert!(approx(old.weapon.unwrap().bullet_speed, 6.0));
    assert!(approx(new.weapon.unwrap().bullet_speed, 6.6));
}

#[test]
fn enemy_descends_at_own_speed() {
    let mut e = Enemy::spawn(EnemyKind::Green, 0.0, 0.0, &DifficultyParameters::default());
    e.descend();
    e.descend();
    assert!(approx(e.body.y, 5.0));
}

#[test]
fn enemy_fires_from_base_center() {
    let mut e = Enemy::spawn(EnemyKind::Elite, 100.0, -10.0, &DifficultyParameters::default());
    assert!(e.fire());
    let b = &e.bullets[0];
    assert_eq!(b.body, Rect::new(140.0, 70.0, 10.0, 20.0));
    assert!(approx(b.velocity, 6.0));
}

#[test]
fn unarmed_enemy_never_fires() {
    let mut e = Enemy::spawn(EnemyKind::Green, 0.0, 0.0, &DifficultyParameters::default());
    assert!(!e.fire());
    assert!(e.bullets.is_empty());
}

#[test]
fn enemy_health_can_go_negative() {
    let mut e = Enemy::spawn(EnemyKind::Green, 0.0, 0.0, &DifficultyParameters::default());
    e.take_damage(5.0);
    assert!(approx(e.health, -3.0));
    assert!(e.is_dead());
}

#[test]
fn enemy_off_screen_past_bottom() {
    let mut e = Enemy::spawn(EnemyKind::Red, 0.0, 800.0, &DifficultyParameters::default());
    assert!(!e.is_off_screen());
    e.body.y = 800.5;
    assert!(e.is_off_screen());
}

// ── Powerup ───────────────────────────────────────────────────────────────────

#[test]
fn powerup_falls_and_leaves() {
    let mut p = Powerup::new(PowerupKind::Laser, 300.0, 797.0);
    assert_eq!(p.body.w, 40.0);
    assert!(!p.is_off_screen());
    p.fall();
    assert_eq!(p.body.y, 801.0);
    assert!(p.is_off_screen());
}

// ── World ─────────────────────────────────────────────────────────────────────

#[test]
fn world_clone_is_independent() {
    let original = World::new();
    let mut cloned = original.clone();

    cloned.player.kills = 9;
    cloned
        .enemies
        .push(Enemy::spawn(EnemyKind::Red, 0.0, 0.0, &DifficultyParameters::default()));

    assert_eq!(original.player.kills, 0);
    assert!(original.enemies.is_empty());
}
