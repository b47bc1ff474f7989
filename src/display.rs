/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// arena coordinates into terminal cells and queues the commands to draw them.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use cannon_defense::entities::{GamePhase, GameState};
use cannon_defense::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::White;
const C_HUD_ENEMIES: Color = Color::Red;
const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_SHOT_PLAYER: Color = Color::Yellow;
const C_SHOT_ENEMY: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

// ── Arena → terminal mapping ──────────────────────────────────────────────────

/// Maps the arena onto the terminal cells inside the border.
///
/// Row 0 is the HUD, row 1 and row `height - 2` are the border bars and
/// the last row carries the controls hint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    scale_x: f64,
    scale_y: f64,
}

impl Viewport {
    pub fn new(term_width: u16, term_height: u16, arena_width: f64, arena_height: f64) -> Self {
        let cols = term_width.saturating_sub(2).max(1);
        let rows = term_height.saturating_sub(4).max(1);
        Viewport {
            left: 1,
            top: 2,
            cols,
            rows,
            scale_x: cols as f64 / arena_width,
            scale_y: rows as f64 / arena_height,
        }
    }

    /// Terminal cells covered by `rect`, as (col, row, width, height).
    /// At least one cell is covered so tiny shots stay visible.  `None` when
    /// the box lies entirely outside the arena.
    pub fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let x0 = (rect.x * self.scale_x).floor();
        let y0 = (rect.y * self.scale_y).floor();
        let x1 = (rect.right() * self.scale_x).ceil().max(x0 + 1.0);
        let y1 = (rect.bottom() * self.scale_y).ceil().max(y0 + 1.0);

        let x0 = x0.max(0.0);
        let y0 = y0.max(0.0);
        let x1 = x1.min(self.cols as f64);
        let y1 = y1.min(self.rows as f64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((
            self.left + x0 as u16,
            self.top + y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
        ))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, state, width)?;

    match state.phase {
        GamePhase::Active => {
            let view = Viewport::new(
                width,
                height,
                state.config.arena_width,
                state.config.arena_height,
            );
            for enemy in state.alive_enemies() {
                fill(out, &view, &enemy.rect(), "█", C_ENEMY)?;
            }
            for shot in &state.player_projectiles {
                fill(out, &view, &shot.rect(), "║", C_SHOT_PLAYER)?;
            }
            for shot in &state.enemy_projectiles {
                fill(out, &view, &shot.rect(), "↓", C_SHOT_ENEMY)?;
            }
            fill(out, &view, &state.player.rect(), "▀", C_PLAYER)?;
            draw_controls_hint(out, height)?;
        }
        GamePhase::Lost => draw_banner(out, width, height, "Game Over", Color::Red)?,
        GamePhase::Won => draw_banner(out, width, height, "You Win!", Color::Green)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", state.score)))?;

    let remaining = format!("Enemies: {}", state.alive_count());
    let rx = width.saturating_sub(remaining.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_ENEMIES))?;
    out.queue(Print(&remaining))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row, cols, rows)) = view.cells(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let line = glyph.repeat(cols as usize);
    for r in row..row + rows {
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── End-of-game overlay ───────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let cx = width / 2;
    let cy = height / 2;

    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(1),
    ))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(title))?;

    let hint = "Press R to restart";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(hint.chars().count() as u16 / 2),
        cy + 1,
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
