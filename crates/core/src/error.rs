//! Board error taxonomy.
//!
//! Gesture-local failures (`NotAdjacent`, `StaleEvent`, `SwapInFlight`) are
//! recoverable: the current gesture is dropped and the board returns to idle.
//! `InconsistentState` means an invariant was already broken upstream and must
//! be surfaced, never patched over.

use thiserror::Error;

use crate::types::{PieceId, Position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Slot outside the grid extent (caller contract violation).
    #[error("position {position} is outside the {rows}x{columns} grid")]
    OutOfBounds {
        position: Position,
        rows: u8,
        columns: u8,
    },

    /// Swap attempted between slots that are not orthogonal neighbours.
    #[error("slots {a} and {b} are not adjacent")]
    NotAdjacent { a: Position, b: Position },

    /// Grid occupancy disagrees with a piece, or a slot expected to be full is empty.
    #[error("inconsistent board state: {0}")]
    InconsistentState(String),

    /// Pointer event for a subject that is not the tracked gesture subject.
    #[error("stale pointer event for piece {0}")]
    StaleEvent(PieceId),

    /// A swap commit is still waiting for its visual transition.
    #[error("a swap commit is already in flight")]
    SwapInFlight,

    /// Grid created with a zero dimension.
    #[error("invalid grid dimensions {rows}x{columns}")]
    InvalidDimensions { rows: u8, columns: u8 },
}

impl BoardError {
    /// Whether the error only aborts the current gesture.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BoardError::NotAdjacent { .. } | BoardError::StaleEvent(_) | BoardError::SwapInFlight
        )
    }

    pub fn inconsistent(detail: impl Into<String>) -> Self {
        BoardError::InconsistentState(detail.into())
    }
}
