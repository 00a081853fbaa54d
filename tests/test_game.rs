use space_invasion::audio::{Audio, Cue};
use space_invasion::difficulty::DifficultyParameters;
use space_invasion::entities::*;
use space_invasion::game::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct Recorder {
    played: Vec<Cue>,
}

impl Audio for Recorder {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn press(events: &[InputEvent]) -> FrameInput {
    FrameInput {
        heading: Heading::default(),
        events: events.to_vec(),
    }
}

fn started_game(rng: &mut StdRng, audio: &mut Recorder) -> Game {
    let mut game = Game::new();
    assert_eq!(game.frame(&press(&[InputEvent::Start]), rng, audio), FrameOutcome::Started);
    game
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn menu_waits_for_start() {
    let mut game = Game::new();
    let (mut rng, mut audio) = (seeded_rng(), Recorder::default());
    assert_eq!(game.phase(), Phase::Menu);
    assert_eq!(game.frame(&FrameInput::default(), &mut rng, &mut audio), FrameOutcome::Waiting);
    assert_eq!(game.frame(&press(&[InputEvent::Fire]), &mut rng, &mut audio), FrameOutcome::Waiting);
    assert_eq!(game.phase(), Phase::Menu);
}

#[test]
fn start_opens_a_fresh_session() {
    let (mut rng, mut audio) = (seeded_rng(), Recorder::default());
    let game = started_game(&mut rng, &mut audio);
    let s = game.session();
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(s.world.player.health, 10);
    assert!(s.world.enemies.is_empty());
    assert!(s.world.powerups.is_empty());
    assert_eq!(s.difficulty.level, 0);
    assert_eq!(s.frame, 0);
}

#[test]
fn quit_from_menu() {
    let mut game = Game::new();
    let (mut rng, mut audio) = (seeded_rng(), Recorder::default());
    let input = press(&[InputEvent::Start, InputEvent::Quit]);
    assert_eq!(game.frame(&input, &mut rng, &mut audio), FrameOutcome::Quit);
    assert_eq!(game.phase(), Phase::Menu);
}

// ── Playing ───────────────────────────────────────────────────────────────────

#[test]
fn quit_before_any_mutation() {
    let (mut rng, mut audio) = (seeded_rng(), Recorder::default());
    let mut game = started_game(&mut rng, &mut audio);
    let input = press(&[InputEvent::Fire, InputEvent::Quit]);
    assert_eq!(game.frame(&input, &mut rng, &mut audio), FrameOutcome::Quit);
    assert_eq!(game.session().frame, 0);
    assert!(game.session().world.player.bullets.is_empty());
    assert!(audio.played.is_empty());
}

#[test]
fn fire_press_shoots_and_plays_cue() {
    let (mut rng, mut audio) = (seeded_rng(), Recorder::default());
    let mut game = started_game(&mut rng, &mut audio);
    let outcome = game.frame(&press(&[InputEvent::Fire]), &mut rng, &mut audio);
    assert_eq!(outcome, FrameOutcome::Running);

    let bullets = &game.session().world.player.bullets;
    assert_eq!(bullets.len(), 1);
    // fired at the muzzle, then advanced once by the resolver
    assert_eq!(bullets[0].body.y, 700.0);
    assert_eq!(audio.played, vec![Cue::PlayerGunfire]);
}

#[test]
fn held_keys_move_the_ship() {
    let (mut rng, mut audio) = (seeded_rng(), Recorder::default());
    let mut game = started_game(&mut rng, &mut audio);
    let input = FrameInput {
        heading: Heading { left: true, ..Default::default() },
        events: Vec::new(),
    };
    game.frame(&input, &mut rng, &mut audio);
    game.frame(&input, &mut rng, &mut audio);
    assert_eq!(game.session().world.player.body.x, 244.0);
}

#[test]
fn enemy_timer_spawns_enemies() {
    let (mut rng, mut audio) = (seeded_rng(), Recorder::default());
    let mut game = started_game(&mut rng, &mut audio);
    for _ in 0..70 {
        game.frame(&FrameInput::default(), &mut rng, &mut audio);
    }
    assert!(game.session().world.enemies.is_empty());
    for _ in 0..10 {
        game.frame(&FrameInput::default(), &mut rng, &mut audio);
    }
    assert_eq!(game.session().world.enemies.len(), 1);
}

#[test]
fn level_up_every_thirty_seconds() {
    let (mut rng, mut audio) = (seeded_rng(), Recorder::default());
    let mut game = started_game(&mut rng, &mut audio);
    for _ in 0..1810 {
        // keep the ship alive against penetrations
        game.session_mut().world.player.heal(10);
        game.frame(&FrameInput::default(), &mut rng, &mut audio);
    }
    let s = game.session();
    assert_eq!(s.difficulty.level, 1);
    assert!((s.timers.enemy.interval_ms() - 1125.0).abs() < 1e-9);
    assert!(audio.played.contains(&Cue::LevelUp));
}

#[test]
fn laser_pickup_then_ten_shots() {
    let (mut rng, mut audio) = (seeded_rng(), Recorder::default());
    let mut game = started_game(&mut rng, &mut audio);
    game.session_mut()
        .world
        .powerups
        .push(Powerup::new(PowerupKind::Laser, 270.0, 690.0));

    game.frame(&FrameInput::default(), &mut rng, &mut audio);
    assert!(game.session().world.player.laser_equipped);
    assert_eq!(game.session().world.player.laser_charges(), 10);

    for shot in 1..=10 {
        game.frame(&press(&[InputEvent::Fire]), &mut rng, &mut audio);
        assert_eq!(game.session().world.player.laser_equipped, shot < 10);
    }
    assert!(game.session().world.player.bullets.is_empty());

    // charges spent: the next press fires a bullet again
    game.frame(&press(&[InputEvent::Fire]), &mut rng, &mut audio);
    assert_eq!(game.session().world.player.bullets.len(), 1);
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn death_ends_session_with_summary() {
    let (mut rng, mut audio) = (seeded_rng(), Recorder::default());
    let mut game = started_game(&mut rng, &mut audio);
    {
        let s = game.session_mut();
        s.world.player.take_damage(9);
        s.world.player.kills = 4;
        s.world.enemies.push(Enemy::spawn(
            EnemyKind::Red,
            0.0,
            801.0,
            &DifficultyParameters::default(),
        ));
    }
    audio.played.clear();

    let outcome = game.frame(&FrameInput::default(), &mut rng, &mut audio);

    assert_eq!(outcome, FrameOutcome::GameOver(GameSummary { kills: 4, level: 0 }));
    assert_eq!(game.phase(), Phase::Menu);
    assert_eq!(game.session().world.player.health, 0);
    assert_eq!(audio.played, vec![Cue::TakeDamage, Cue::PlayerDeath]);
}

#[test]
fn restart_resets_difficulty() {
    let (mut rng, mut audio) = (seeded_rng(), Recorder::default());
    let mut game = started_game(&mut rng, &mut audio);
    {
        let s = game.session_mut();
        s.difficulty.level_up();
        s.difficulty.level_up();
        s.world.player.take_damage(10);
    }
    assert!(matches!(
        game.frame(&FrameInput::default(), &mut rng, &mut audio),
        FrameOutcome::GameOver(GameSummary { level: 2, .. })
    ));

    assert_eq!(game.frame(&press(&[InputEvent::Start]), &mut rng, &mut audio), FrameOutcome::Started);
    let s = game.session();
    assert_eq!(s.difficulty.level, 0);
    assert_eq!(s.difficulty.params, DifficultyParameters::default());
    assert_eq!(s.difficulty.enemy_spawn_interval_ms, 1250.0);
    assert_eq!(s.world.player.health, 10);
    assert!(s.world.enemies.is_empty());
}

#[test]
fn same_seed_same_game() {
    let run = || {
        let (mut rng, mut audio) = (seeded_rng(), Recorder::default());
        let mut game = started_game(&mut rng, &mut audio);
        for i in 0..600 {
            let events = if i % 20 == 0 { vec![InputEvent::Fire] } else { Vec::new() };
            let input = FrameInput { heading: Heading::default(), events };
            game.frame(&input, &mut rng, &mut audio);
        }
        let w = &game.session().world;
        (
            w.enemies.len(),
            w.powerups.len(),
            w.player.health,
            w.player.kills,
            audio.played.len(),
        )
    };
    assert_eq!(run(), run());
}
