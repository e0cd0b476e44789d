//! Outbound notifications for the presentation layer.
//!
//! The board queues events while it handles input and the caller drains them
//! with [`Board::take_events`](crate::Board::take_events) once per frame.

use crate::transition::TransitionRequest;
use crate::types::{Direction, PieceId, Position};

/// Why a gesture ended without a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Drag shorter than the configured threshold
    BelowThreshold,
    /// Drag pointed off the edge of the board
    OffBoard { direction: Direction },
    /// The two pieces are not neighbours
    NotAdjacent,
}

impl AbortReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbortReason::BelowThreshold => "belowThreshold",
            AbortReason::OffBoard { .. } => "offBoard",
            AbortReason::NotAdjacent => "notAdjacent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Grid and piece disagree, or an expected occupant is missing
    InconsistentState,
    /// A transition never signalled completion before the watchdog fired
    TransitionTimedOut,
    /// A transition handle was dropped without completing
    TransitionDropped,
}

/// Loud, out-of-band report of something that should not happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// JSON dump of the grid at the time of the report
    pub dump: Option<String>,
}

#[derive(Debug)]
pub enum BoardEvent {
    /// A piece became the current selection / drag subject
    Selected { piece: PieceId, slot: Position },
    /// The selection was dropped without a swap
    Deselected { piece: PieceId },
    /// Animate a swap, then fire the handle
    TransitionRequested(TransitionRequest),
    /// The swap is now visible to every lookup; `slot_a`/`slot_b` are the new slots
    SwapCommitted {
        a: PieceId,
        b: PieceId,
        slot_a: Position,
        slot_b: Position,
    },
    /// Restore the piece's resting visuals
    GestureAborted { piece: PieceId, reason: AbortReason },
    Diagnostic(Diagnostic),
}

impl BoardEvent {
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, BoardEvent::Diagnostic(_))
    }
}
