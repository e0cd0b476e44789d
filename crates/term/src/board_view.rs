//! BoardView: maps a [`Board`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::animation::TransitionPlayer;
use crate::engine::{Board, InteractionState};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::input::BoardLayout;
use crate::types::{GemKind, InteractionMode, Position, Vec2};

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

/// Everything drawn around the board that the board itself does not know.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    pub cursor: Option<Position>,
    pub status: Option<&'a str>,
}

const BOARD_BG: Rgb = Rgb::new(25, 25, 35);
const HUD_LINES: u16 = 3;

pub struct BoardView {
    cell_w: u16,
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 4x2 keeps gems roughly square in most terminal fonts.
        Self { cell_w: 4, cell_h: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Where a `rows x columns` board lands inside `viewport` (centred,
    /// leaving room for the frame and the HUD).
    pub fn layout(&self, viewport: Viewport, rows: u8, columns: u8) -> BoardLayout {
        let frame_w = columns as u16 * self.cell_w + 2;
        let frame_h = rows as u16 * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h + HUD_LINES) / 2;
        BoardLayout::new(start_x + 1, start_y + 1, rows, columns).with_cell_size(self.cell_w, self.cell_h)
    }

    /// Render into an existing framebuffer (reused across frames).
    pub fn render_into(
        &self,
        board: &Board,
        player: &TransitionPlayer,
        overlay: Overlay<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> BoardLayout {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let grid = board.grid();
        let layout = self.layout(viewport, grid.rows(), grid.columns());

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.fill_rect(
            layout.origin_x,
            layout.origin_y,
            layout.width(),
            layout.height(),
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        fb.draw_box(
            layout.origin_x - 1,
            layout.origin_y - 1,
            layout.width() + 2,
            layout.height() + 2,
            border,
        );

        let selected = board.selected();

        // Resting pieces first, animated ones on top.
        let mut moving = Vec::new();
        for piece in grid.iter() {
            match player.draw_position(piece.id()) {
                Some(at) => moving.push((at, piece.kind(), Some(piece.id()) == selected)),
                None => {
                    let at = Vec2::new(piece.position().col as f32, piece.position().row as f32);
                    self.draw_gem(fb, &layout, at, piece.kind(), Some(piece.id()) == selected);
                }
            }
        }
        for (at, kind, is_selected) in moving {
            self.draw_gem(fb, &layout, at, kind, is_selected);
        }

        if let Some(cursor) = overlay.cursor {
            self.draw_cursor(fb, &layout, cursor);
        }

        self.draw_hud(fb, board, overlay.status, &layout, viewport);
        layout
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        board: &Board,
        player: &TransitionPlayer,
        overlay: Overlay<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(board, player, overlay, viewport, &mut fb);
        fb
    }

    /// `at` is in slot units (x = column, y = row).
    fn draw_gem(&self, fb: &mut FrameBuffer, layout: &BoardLayout, at: Vec2, kind: GemKind, selected: bool) {
        let px = layout.origin_x as f32 + at.x * self.cell_w as f32;
        let py = layout.origin_y as f32 + at.y * self.cell_h as f32;
        if px < 0.0 || py < 0.0 {
            return;
        }
        let (px, py) = (px.round() as u16, py.round() as u16);

        let color = gem_color(kind);
        let (glyph, style) = if selected {
            ('◇', CellStyle::new(Rgb::new(255, 255, 255), color).bold())
        } else {
            ('◆', CellStyle::new(color, color.shade(35)))
        };

        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px + (self.cell_w - 1) / 2, py + (self.cell_h - 1) / 2, glyph, style);
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, layout: &BoardLayout, cursor: Position) {
        let (x, y) = layout.cell_origin(cursor);
        let row = y + (self.cell_h - 1) / 2;
        let style = |fb: &FrameBuffer, x: u16| {
            let bg = fb.get(x, row).map(|c| c.style.bg).unwrap_or(BOARD_BG);
            CellStyle::new(Rgb::new(255, 255, 255), bg).bold()
        };

        let left = style(fb, x);
        fb.put_char(x, row, '[', left);
        let right_x = x + self.cell_w - 1;
        let right = style(fb, right_x);
        fb.put_char(right_x, row, ']', right);
    }

    fn draw_hud(
        &self,
        fb: &mut FrameBuffer,
        board: &Board,
        status: Option<&str>,
        layout: &BoardLayout,
        viewport: Viewport,
    ) {
        let label = CellStyle::default().bold();
        let value = CellStyle::default();
        let hint = CellStyle::default().dim();

        let mut y = layout.origin_y + layout.height() + 1;
        let x = layout.origin_x.saturating_sub(1);
        if y >= viewport.height {
            return;
        }

        let mode = match board.mode() {
            InteractionMode::Drag => "drag",
            InteractionMode::SelectSelect => "select",
        };
        let state = match board.state() {
            InteractionState::Idle if board.is_busy() => "swapping",
            InteractionState::Idle => "idle",
            InteractionState::FirstSelected(_) => "selected",
            InteractionState::Dragging { .. } => "dragging",
        };

        fb.put_str(x, y, "MODE", label);
        fb.put_str(x + 5, y, mode, value);
        fb.put_str(x + 13, y, "ANIM", label);
        fb.put_str(x + 18, y, if board.animations_enabled() { "on" } else { "off" }, value);
        fb.put_str(x + 23, y, state, value);
        y += 1;

        if let Some(status) = status {
            fb.put_str(x, y, status, value);
        }
        y += 1;

        fb.put_str(x, y, "arrows move  shift+arrow swap  space select  m mode  n anim  r reset  q quit", hint);
    }
}

/// Gem palette, by kind
pub fn gem_color(kind: GemKind) -> Rgb {
    match kind {
        GemKind::Green => Rgb::new(90, 210, 110),
        GemKind::Red => Rgb::new(225, 70, 70),
        GemKind::Violet => Rgb::new(170, 100, 230),
        GemKind::White => Rgb::new(235, 235, 235),
        GemKind::Yellow => Rgb::new(240, 210, 70),
    }
}
