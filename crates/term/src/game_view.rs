//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::flash::{LitRow, RowFlashes};
use crate::types::{FlashColor, GamePhase, PieceKind};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Where the board frame landed in the last layout.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal view of the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered board for a `width x height` grid.
    pub fn frame_size(&self, width: u16, height: u16) -> (u16, u16) {
        (
            width.saturating_mul(self.cell_w).saturating_add(2),
            height.saturating_mul(self.cell_h).saturating_add(2),
        )
    }

    /// Render into an existing framebuffer, overlaying the flashes lit at
    /// `now_ms`.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        flashes: &RowFlashes,
        now_ms: u64,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let (w, h) = self.frame_size(snap.width, snap.height);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        self.draw_border(fb, frame, Style::new(Rgb::new(200, 200, 200), PANEL_BG));

        for y in 0..snap.height {
            for x in 0..snap.width {
                match PieceKind::from_cell_value(snap.composed_cell(x as usize, y as usize)) {
                    Some(kind) => {
                        let style = Style::new(piece_color(kind), PLAYFIELD_BG).bold();
                        self.fill_cell(fb, frame, x, y, '█', style);
                    }
                    None => {
                        let style = Style::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
                        self.fill_cell(fb, frame, x, y, '·', style);
                    }
                }
            }
        }

        for lit in flashes.lit(now_ms) {
            self.draw_flash(fb, frame, snap.width, lit);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            GamePhase::Idle => self.draw_overlay(fb, frame, &["PRESS ENTER"]),
            GamePhase::GameOver => {
                let mut score = [0u8; 10];
                let score = format_u32(snap.score, &mut score);
                self.draw_overlay(fb, frame, &["GAME OVER", score, "ENTER: RESTART"]);
            }
            GamePhase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer, without flashes.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, &RowFlashes::default(), 0, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: Style) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_flash(&self, fb: &mut FrameBuffer, frame: Frame, width: u16, lit: LitRow<'_>) {
        let Ok(y) = u16::try_from(lit.row) else {
            return;
        };
        let style = Style::new(flash_color(lit.color), PLAYFIELD_BG).bold();
        for x in 0..width {
            if lit.is_lit(x as usize) {
                self.fill_cell(fb, frame, x, y, '█', style);
            }
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: u16,
        y: u16,
        ch: char,
        style: Style,
    ) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let next = Style::new(piece_color(snap.next_kind), PANEL_BG).bold();
        fb.put_str(panel_x, y, piece_letter(snap.next_kind), next);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GAME", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.episode_id.saturating_add(1), value);
        y = y.saturating_add(2);

        let help = value.dim();
        for line in ["←/→ move", "↓ drop", "enter start", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
        let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let top = frame
            .y
            .saturating_add(frame.h / 2)
            .saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
            fb.put_str(x, top.saturating_add(i as u16), text, style);
        }
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
    }
}

pub fn flash_color(color: FlashColor) -> Rgb {
    match color {
        FlashColor::LightBlue => Rgb::new(173, 216, 230),
    }
}

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::T => "T",
        PieceKind::O => "O",
    }
}

fn format_u32(value: u32, buf: &mut [u8; 10]) -> &str {
    let mut n = value;
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    std::str::from_utf8(&buf[start..]).unwrap_or("?")
}
