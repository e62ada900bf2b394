//! GameView: draws a [`RunSnapshot`] into a terminal framebuffer.
//!
//! The board is shown top-down, one grid cell per `cell_w` x `cell_h`
//! terminal characters. Pure, no I/O.

use crate::core::RunSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellKind, Coord, RunStatus, GRID_HEIGHT, GRID_WIDTH};

const BOARD_BG: Rgb = Rgb::new(20, 20, 28);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up a terminal glyph.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Glyph and colour for a tile as seen from above.
pub fn tile_glyph(passable: bool, kind: CellKind) -> (char, CellStyle) {
    if !passable {
        return ('·', CellStyle::plain(Rgb::new(70, 70, 80), BOARD_BG).dim());
    }
    let fg = match kind {
        CellKind::Empty | CellKind::Floor => Rgb::new(150, 150, 160),
        CellKind::Fragile => Rgb::new(255, 140, 0),
        CellKind::Trigger => Rgb::new(90, 200, 110),
        CellKind::Teleporter => Rgb::new(80, 120, 230),
        CellKind::Goal => return ('▒', CellStyle::plain(Rgb::new(50, 50, 50), Rgb::new(5, 5, 5))),
    };
    ('█', CellStyle::plain(fg, BOARD_BG))
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered board in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (GRID_WIDTH as u16) * self.cell_w + 2,
            (GRID_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &RunSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for (row, tiles) in snap.tiles.iter().enumerate() {
            for (col, tile) in tiles.iter().enumerate() {
                let (ch, style) = tile_glyph(tile.passable, tile.kind);
                self.fill_cell_rect(fb, start_x, start_y, col as u16, row as u16, ch, style);
            }
        }

        self.draw_block(fb, snap, start_x, start_y);
        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        let overlay = match snap.status {
            RunStatus::Playing => None,
            RunStatus::Won => Some("YOU WIN"),
            RunStatus::Lost => Some("GAME OVER"),
        };
        if let Some(text) = overlay {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &RunSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, snap: &RunSnapshot, start_x: u16, start_y: u16) {
        let pose = &snap.block;
        let mut style = CellStyle::plain(Rgb::new(240, 210, 80), BOARD_BG).bold();
        if pose.falling {
            style = style.dim();
        }
        // Mid-roll the block straddles two footprints; a lighter shade says so.
        let ch = if pose.roll.is_some() { '▓' } else { '█' };

        for at in pose.footprint.cells() {
            if let Some((x, y)) = on_grid(at) {
                self.fill_cell_rect(fb, start_x, start_y, x, y, ch, style);
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &RunSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LIVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lives.max(0) as u32, value);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn on_grid(at: Coord) -> Option<(u16, u16)> {
    let in_x = (0..GRID_WIDTH as i32).contains(&at.col);
    let in_y = (0..GRID_HEIGHT as i32).contains(&at.row);
    (in_x && in_y).then_some((at.col as u16, at.row as u16))
}
