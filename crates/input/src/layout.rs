//! Screen geometry of the board.
//!
//! Shared by the renderer (where to draw a slot) and the mouse mapping
//! (which slot a click hit). Pointer space is measured in cells with the
//! y axis pointing up, so a drag of one cell has length 1.0.

use crate::types::{Position, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Terminal column of the top-left slot
    pub origin_x: u16,
    /// Terminal row of the top-left slot
    pub origin_y: u16,
    /// Terminal columns per slot
    pub cell_w: u16,
    /// Terminal rows per slot
    pub cell_h: u16,
    pub rows: u8,
    pub columns: u8,
}

impl BoardLayout {
    pub fn new(origin_x: u16, origin_y: u16, rows: u8, columns: u8) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_w: 4,
            cell_h: 2,
            rows,
            columns,
        }
    }

    pub fn with_cell_size(mut self, cell_w: u16, cell_h: u16) -> Self {
        self.cell_w = cell_w.max(1);
        self.cell_h = cell_h.max(1);
        self
    }

    /// Width of the board in terminal columns
    pub fn width(&self) -> u16 {
        self.columns as u16 * self.cell_w
    }

    /// Height of the board in terminal rows
    pub fn height(&self) -> u16 {
        self.rows as u16 * self.cell_h
    }

    /// Slot under terminal cell `(col, row)`, if any
    pub fn hit_test(&self, col: u16, row: u16) -> Option<Position> {
        if col < self.origin_x || row < self.origin_y {
            return None;
        }
        let c = (col - self.origin_x) / self.cell_w;
        let r = (row - self.origin_y) / self.cell_h;
        if c >= self.columns as u16 || r >= self.rows as u16 {
            return None;
        }
        Some(Position::new(r as i8, c as i8))
    }

    /// Pointer-space location of the centre of terminal cell `(col, row)`
    ///
    /// Defined everywhere, including off the board, so a drag that leaves
    /// the board still has a usable release point.
    pub fn to_pointer(&self, col: u16, row: u16) -> Vec2 {
        let x = (col as f32 - self.origin_x as f32 + 0.5) / self.cell_w as f32;
        let y = (row as f32 - self.origin_y as f32 + 0.5) / self.cell_h as f32;
        Vec2::new(x, -y)
    }

    /// Pointer-space centre of a slot
    pub fn slot_center(&self, pos: Position) -> Vec2 {
        Vec2::new(pos.col as f32 + 0.5, -(pos.row as f32 + 0.5))
    }

    /// Terminal cell of a slot's top-left corner
    pub fn cell_origin(&self, pos: Position) -> (u16, u16) {
        (
            self.origin_x + pos.col.max(0) as u16 * self.cell_w,
            self.origin_y + pos.row.max(0) as u16 * self.cell_h,
        )
    }
}
