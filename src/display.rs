//! Rendering layer — all terminal I/O lives here.
//!
//! Implements the `Renderer` collaborator on top of crossterm. The game
//! draws in 600×800 screen space and every command is scaled onto whatever
//! grid the terminal currently has. No game logic is performed here.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Print},
    terminal,
    QueueableCommand,
};
use space_invasion::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use space_invasion::{Color, EnemyKind, PowerupKind, Rect, Renderer, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

fn term_color(color: Color) -> style::Color {
    match color {
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
        Color::Blue => style::Color::Cyan,
        Color::White => style::Color::White,
        Color::Black => style::Color::Black,
    }
}

/// Glyph and colour a sprite's box is filled with.
fn sprite_glyph(sprite: Sprite) -> (char, style::Color) {
    match sprite {
        Sprite::Player => ('▲', style::Color::White),
        Sprite::Enemy(EnemyKind::Red) => ('▼', style::Color::Red),
        Sprite::Enemy(EnemyKind::Green) => ('▽', style::Color::Green),
        Sprite::Enemy(EnemyKind::Elite) => ('◆', style::Color::Magenta),
        Sprite::Powerup(PowerupKind::Health) => ('+', style::Color::Green),
        Sprite::Powerup(PowerupKind::MaxHealth) => ('♥', style::Color::Magenta),
        Sprite::Powerup(PowerupKind::Damage) => ('!', style::Color::Yellow),
        Sprite::Powerup(PowerupKind::Laser) => ('|', style::Color::Cyan),
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

/// Terminal renderer. Commands are queued; the first I/O error is kept and
/// reported by `present`.
pub struct TerminalRenderer<W: Write> {
    out: W,
    width: u16,
    height: u16,
    error: Option<io::Error>,
}

/// Inclusive cell span a box covers, clipped to the grid.
struct CellSpan {
    col: u16,
    row: u16,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            width,
            height,
            error: None,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    fn scale(&self) -> (f32, f32) {
        (
            self.width as f32 / SCREEN_WIDTH,
            self.height as f32 / SCREEN_HEIGHT,
        )
    }

    /// Map a world-space box onto cells. Anything thinner than a cell still
    /// covers one so bullets and the laser stay visible.
    fn span(&self, rect: Rect) -> Option<CellSpan> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let (sx, sy) = self.scale();
        let c0 = (rect.x * sx).floor();
        let r0 = (rect.y * sy).floor();
        let c1 = ((rect.right() * sx).ceil() - 1.0).max(c0);
        let r1 = ((rect.bottom() * sy).ceil() - 1.0).max(r0);

        let max_c = (self.width - 1) as f32;
        let max_r = (self.height - 1) as f32;
        if c1 < 0.0 || r1 < 0.0 || c0 > max_c || r0 > max_r {
            return None;
        }
        let (c0, r0) = (c0.max(0.0), r0.max(0.0));
        let (c1, r1) = (c1.min(max_c), r1.min(max_r));
        Some(CellSpan {
            col: c0 as u16,
            row: r0 as u16,
            cols: (c1 - c0) as u16 + 1,
            rows: (r1 - r0) as u16 + 1,
        })
    }

    fn fill(&mut self, span: CellSpan, glyph: char, color: style::Color) -> io::Result<()> {
        let line: String = std::iter::repeat(glyph).take(span.cols as usize).collect();
        self.out.queue(style::SetForegroundColor(color))?;
        for row in span.row..span.row + span.rows {
            self.out.queue(cursor::MoveTo(span.col, row))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    fn print_at(&mut self, text: &str, x: i32, y: i32, color: Color) -> io::Result<()> {
        let (sx, sy) = self.scale();
        let col = (x as f32 * sx).max(0.0) as u16;
        let row = (y as f32 * sy).max(0.0) as u16;
        if col >= self.width || row >= self.height {
            return Ok(());
        }
        // keep the text on one row
        let room = (self.width - col) as usize;
        let visible: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(term_color(color)))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if self.error.is_none() {
                log::warn!("terminal write failed: {}", e);
                self.error = Some(e);
            }
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self, _color: Color) {
        let result = self
            .out
            .queue(terminal::Clear(terminal::ClearType::All))
            .map(|_| ());
        self.record(result);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if let Some(span) = self.span(rect) {
            let result = self.fill(span, '█', term_color(color));
            self.record(result);
        }
    }

    fn blit(&mut self, sprite: Sprite, x: i32, y: i32) {
        let (w, h) = sprite.size();
        if let Some(span) = self.span(Rect::new(x as f32, y as f32, w, h)) {
            let (glyph, color) = sprite_glyph(sprite);
            let result = self.fill(span, glyph, color);
            self.record(result);
        }
    }

    fn text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        let result = self.print_at(text, x, y, color);
        self.record(result);
    }

    fn present(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        self.out.flush()
    }
}
