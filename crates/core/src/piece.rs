//! Piece module - a typed, identity-bearing occupant of one slot.

use crate::types::{GemKind, PieceId, Position};

/// A gem on the board
///
/// `position` is a cached copy of the slot that holds this piece. Only the
/// [`Grid`](crate::grid::Grid) writes it, which is what keeps the two views in
/// agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    id: PieceId,
    kind: GemKind,
    position: Position,
}

impl Piece {
    pub(crate) fn new(id: PieceId, kind: GemKind, position: Position) -> Self {
        Self { id, kind, position }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> GemKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}
