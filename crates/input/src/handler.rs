//! Pointer and cursor state for terminal environments.
//!
//! Terminal mouse reporting is lossy: a release can be swallowed when the
//! pointer leaves the window, and there is no touch id. [`PointerHandler`]
//! keeps at most one press alive and synthesizes the missing release when a
//! new press arrives, so the board always sees down/up in pairs.

use arrayvec::ArrayVec;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::layout::BoardLayout;
use crate::types::{Direction, Position, Vec2};

/// Pointer input resolved against the board layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Primary button pressed over `slot`
    Press { slot: Position, point: Vec2 },
    /// The active press ended at `point` (which may lie off the board)
    Release { point: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    slot: Position,
    last: Vec2,
}

#[derive(Debug, Clone)]
pub struct PointerHandler {
    layout: BoardLayout,
    active: Option<Press>,
}

impl PointerHandler {
    pub fn new(layout: BoardLayout) -> Self {
        Self { layout, active: None }
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Replace the layout (terminal resized); an active press is kept.
    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.layout = layout;
    }

    /// Slot the active press started on
    pub fn pressed_slot(&self) -> Option<Position> {
        self.active.map(|p| p.slot)
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> ArrayVec<PointerAction, 2> {
        let mut actions = ArrayVec::<PointerAction, 2>::new();
        let point = self.layout.to_pointer(event.column, event.row);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(stale) = self.active.take() {
                    actions.push(PointerAction::Release { point: stale.last });
                }
                if let Some(slot) = self.layout.hit_test(event.column, event.row) {
                    self.active = Some(Press { slot, last: point });
                    actions.push(PointerAction::Press { slot, point });
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(press) = self.active.as_mut() {
                    press.last = point;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.active.take().is_some() {
                    actions.push(PointerAction::Release { point });
                }
            }
            _ => {}
        }

        actions
    }

    /// Drop the active press without reporting a release.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

/// Keyboard cursor over the board, clamped to its bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
    rows: u8,
    columns: u8,
}

impl Cursor {
    pub fn new(rows: u8, columns: u8) -> Self {
        Self {
            pos: Position::new(0, 0),
            rows,
            columns,
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// Move one slot; stays put at an edge
    pub fn step(&mut self, dir: Direction) -> Position {
        let next = self.pos.step(dir);
        if next.row >= 0
            && next.col >= 0
            && (next.row as u8) < self.rows
            && (next.col as u8) < self.columns
        {
            self.pos = next;
        }
        self.pos
    }

    /// Place the cursor on `pos` (e.g. after a mouse press)
    pub fn jump(&mut self, pos: Position) {
        if pos.row >= 0 && pos.col >= 0 && (pos.row as u8) < self.rows && (pos.col as u8) < self.columns {
            self.pos = pos;
        }
    }
}
