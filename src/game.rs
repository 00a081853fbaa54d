//! Game loop orchestrator.
//!
//! Two phases: MENU waits for the start signal, PLAYING runs the per-frame
//! simulation until the player's health reaches zero and then falls back to
//! MENU with a summary. Quit is honored in either phase before any state is
//! touched that frame.
//!
//! One `Game::frame` call is one fixed timestep. Pacing, rendering and the
//! game-over delay belong to the caller.

use std::collections::VecDeque;

use rand::Rng;

use crate::audio::{Audio, Cue};
use crate::compute::{move_enemies, player_fire, resolve};
use crate::consts::FRAME_MS;
use crate::difficulty::Difficulty;
use crate::entities::{Heading, World};
use crate::spawn::{run_pending, SpawnTimers, TimerEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
}

/// Discrete key presses collected since the last frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Start,
    Fire,
    Quit,
}

#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    pub heading: Heading,
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    pub fn quit_requested(&self) -> bool {
        self.events.contains(&InputEvent::Quit)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub kills: u32,
    pub level: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Still on the menu.
    Waiting,
    /// A fresh session just began.
    Started,
    /// A playing frame ran and the player is alive.
    Running,
    /// The player died this frame; the phase is back to MENU.
    GameOver(GameSummary),
    /// Quit requested; nothing was simulated.
    Quit,
}

/// Mutable state of one play session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub world: World,
    pub difficulty: Difficulty,
    pub timers: SpawnTimers,
    pub pending: VecDeque<TimerEvent>,
    pub frame: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// New player, empty playfield, level 0, enemy base stats at defaults.
    pub fn reset(&mut self) {
        self.world = World::new();
        self.difficulty.reset();
        self.timers = SpawnTimers::new();
        self.pending.clear();
        self.frame = 0;
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            kills: self.world.player.kills,
            level: self.difficulty.level,
        }
    }

    /// One fixed-timestep frame: input, timers, movement, resolver,
    /// scheduler, then cues out to the audio collaborator.
    pub fn step<A: Audio>(&mut self, input: &FrameInput, rng: &mut impl Rng, audio: &mut A) {
        self.frame += 1;

        for event in &input.events {
            if *event == InputEvent::Fire {
                player_fire(&mut self.world);
            }
        }

        self.timers.advance(FRAME_MS, &mut self.pending);

        self.world.player.move_by(input.heading);
        move_enemies(&mut self.world);

        resolve(&mut self.world, rng);

        run_pending(
            &mut self.pending,
            &mut self.world,
            &mut self.difficulty,
            &mut self.timers,
            rng,
        );

        for cue in self.world.cues.drain(..) {
            audio.play(cue);
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    phase: Phase,
    session: Session,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            phase: Phase::Menu,
            session: Session::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Advance the state machine by one frame.
    pub fn frame<A: Audio>(
        &mut self,
        input: &FrameInput,
        rng: &mut impl Rng,
        audio: &mut A,
    ) -> FrameOutcome {
        if input.quit_requested() {
            return FrameOutcome::Quit;
        }

        match self.phase {
            Phase::Menu => {
                if input.events.contains(&InputEvent::Start) {
                    self.session.reset();
                    self.phase = Phase::Playing;
                    log::info!("session started");
                    FrameOutcome::Started
                } else {
                    FrameOutcome::Waiting
                }
            }
            Phase::Playing => {
                self.session.step(input, rng, audio);
                if self.session.world.player.is_dead() {
                    audio.play(Cue::PlayerDeath);
                    self.phase = Phase::Menu;
                    let summary = self.session.summary();
                    log::info!(
                        "game over after {} frames: {} kills, level {}",
                        self.session.frame,
                        summary.kills,
                        summary.level
                    );
                    FrameOutcome::GameOver(summary)
                } else {
                    FrameOutcome::Running
                }
            }
        }
    }
}
