//! Render collaborator interface and the draw list for one playing frame.
//!
//! The simulation never touches a screen. It describes each frame as filled
//! rectangles, sprite blits and HUD text in 600×800 screen space; a backend
//! turns those into pixels (or terminal cells) and presents them.

use std::io;

use crate::compute::enemy_bullets;
use crate::consts::*;
use crate::entities::{EnemyKind, PowerupKind, Rect, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
    White,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Enemy(EnemyKind),
    Powerup(PowerupKind),
}

impl Sprite {
    /// Width and height the sprite is scaled to.
    pub fn size(&self) -> (f32, f32) {
        match self {
            Sprite::Player => (PLAYER_SIZE, PLAYER_SIZE),
            Sprite::Enemy(kind) => {
                let size = kind.profile().size;
                (size, size)
            }
            Sprite::Powerup(_) => (POWERUP_SIZE, POWERUP_SIZE),
        }
    }
}

pub trait Renderer {
    /// Wipe the frame to a solid color.
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw a sprite with its top-left corner at integer screen coordinates.
    fn blit(&mut self, sprite: Sprite, x: i32, y: i32);
    fn text(&mut self, text: &str, x: i32, y: i32, color: Color);
    fn present(&mut self) -> io::Result<()>;
}

/// HUD line for the powers panel, e.g. `Laser: +7`.
pub fn power_lines(world: &World) -> Vec<String> {
    world
        .player
        .powers
        .iter()
        .map(|(power, count)| format!("{}: +{}", power.label(), count))
        .collect()
}

/// Issue the draw commands for one playing frame. Does not present.
pub fn draw_game<R: Renderer>(renderer: &mut R, world: &World, level: u32) {
    let player = &world.player;
    renderer.clear(Color::Black);

    renderer.blit(Sprite::Player, player.body.x as i32, player.body.y as i32);
    renderer.fill_rect(player.damage_bar, Color::Red);
    renderer.fill_rect(player.healthbar, Color::Green);

    for bullet in &player.bullets {
        renderer.fill_rect(bullet.body, Color::Blue);
    }
    // the beam only shows while it can still hurt
    if player.laser_equipped {
        renderer.fill_rect(player.laser, Color::Blue);
    }

    for enemy in &world.enemies {
        renderer.blit(Sprite::Enemy(enemy.kind), enemy.body.x as i32, enemy.body.y as i32);
    }
    for bullet in enemy_bullets(world) {
        renderer.fill_rect(bullet.body, Color::Red);
    }

    for powerup in &world.powerups {
        renderer.blit(
            Sprite::Powerup(powerup.kind),
            powerup.body.x as i32,
            powerup.body.y as i32,
        );
    }

    draw_hud(renderer, world, level);
}

const HUD_LINE: i32 = 20;

fn draw_hud<R: Renderer>(renderer: &mut R, world: &World, level: u32) {
    let player = &world.player;
    let height = SCREEN_HEIGHT as i32;
    let width = SCREEN_WIDTH as i32;

    renderer.text(
        &format!("HP: {}/{}", player.health, player.max_health),
        10,
        height - 2 * HUD_LINE,
        Color::White,
    );
    renderer.text(&format!("KILLS: {}", player.kills), 10, height - HUD_LINE, Color::White);

    let level_text = format!("LVL: {}", level);
    renderer.text(&level_text, width - hud_width(&level_text) - 20, 10, Color::White);

    let mut lines = vec!["POWERS:".to_string()];
    lines.extend(power_lines(world));
    let panel_width = lines.iter().map(|l| hud_width(l)).max().unwrap_or(0);
    let top = height - HUD_LINE * lines.len() as i32 - 20;
    for (i, line) in lines.iter().enumerate() {
        renderer.text(line, width - panel_width - 20, top + HUD_LINE * i as i32, Color::White);
    }
}

/// Approximate pixel width of HUD text in the 20 px monospace font.
fn hud_width(text: &str) -> i32 {
    text.chars().count() as i32 * 11
}

/// Title screen shown while waiting for the start signal.
pub fn draw_menu<R: Renderer>(renderer: &mut R) {
    renderer.clear(Color::Black);
    let title = "SPACE INVASION";
    let prompt = "Press [SPACE] to start";
    let cx = SCREEN_WIDTH as i32 / 2;
    let cy = SCREEN_HEIGHT as i32 / 2;
    renderer.text(title, cx - hud_width(title) / 2, cy - 30, Color::White);
    renderer.text(prompt, cx - hud_width(prompt) / 2, cy + 30, Color::White);
}

/// Summary overlay drawn over the final frame.
pub fn draw_game_over<R: Renderer>(renderer: &mut R, kills: u32, level: u32) {
    let title = "GAME OVER";
    let kills = format!("KILLS: {}", kills);
    let level = format!("LVL: {}", level);
    let cx = SCREEN_WIDTH as i32 / 2;
    let cy = SCREEN_HEIGHT as i32 / 2;
    renderer.text(title, cx - hud_width(title) / 2, cy - 30, Color::Red);
    renderer.text(&kills, cx - hud_width(&kills) / 2, cy + 20, Color::Red);
    renderer.text(&level, cx - hud_width(&level) / 2, cy + 40, Color::Red);
}
