//! Sound cues and the fire-and-forget audio collaborator.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Player bullet fired
    PlayerGunfire,
    /// Laser fired
    Laser,
    /// Laser equipped or damage upgraded
    Powerup,
    /// Player healed
    Heal,
    /// Player hit
    TakeDamage,
    /// Player health reached zero
    PlayerDeath,
    /// Enemy killed
    EnemyDestroyed,
    /// Difficulty went up
    LevelUp,
}

impl Cue {
    /// Name the audio backend plays the cue by.
    pub fn name(&self) -> &'static str {
        match self {
            Cue::PlayerGunfire => "player_gunfire",
            Cue::Laser => "laser",
            Cue::Powerup => "powerup",
            Cue::Heal => "heal",
            Cue::TakeDamage => "take_damage",
            Cue::PlayerDeath => "player_death",
            Cue::EnemyDestroyed => "enemy_destroyed",
            Cue::LevelUp => "level_up",
        }
    }
}

/// Plays a cue by name. No return value and no queuing guarantee.
pub trait Audio {
    fn play(&mut self, cue: Cue);
}

/// Backend that only logs what would have been played.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl Audio for LogAudio {
    fn play(&mut self, cue: Cue) {
        log::debug!("cue: {}", cue.name());
    }
}
