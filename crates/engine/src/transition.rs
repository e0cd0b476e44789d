//! Visual transition hand-off.
//!
//! When animations are enabled the executor does not commit a swap right
//! away. It issues a [`TransitionRequest`] and parks the commit until the
//! presentation layer fires the request's [`TransitionHandle`]. The handle is
//! a single-shot `tokio::sync::oneshot` sender: `complete` consumes it, so it
//! can fire at most once, from any thread.
//!
//! Cancelling a transition is not supported. Dropping the handle without
//! completing it is treated as an abandoned animation and still commits.

use tokio::sync::oneshot;

use crate::types::{PieceId, Position};

/// Completion signal for one visual swap.
#[derive(Debug)]
pub struct TransitionHandle {
    tx: oneshot::Sender<()>,
}

impl TransitionHandle {
    /// Signal that the visual transition has finished.
    pub fn complete(self) {
        // The executor may already have given up on this transition (watchdog);
        // a late completion is harmless.
        let _ = self.tx.send(());
    }

    /// True once the executor stopped waiting for this transition.
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Ask the presentation layer to animate two pieces trading places.
///
/// `from_a` is where `a` rests now and where `b` will rest afterwards, and
/// vice versa for `from_b`.
#[derive(Debug)]
pub struct TransitionRequest {
    pub a: PieceId,
    pub b: PieceId,
    pub from_a: Position,
    pub from_b: Position,
    pub duration_ms: u32,
    pub handle: TransitionHandle,
}

impl TransitionRequest {
    /// Rest slot of `a` once the swap commits
    pub fn to_a(&self) -> Position {
        self.from_b
    }

    /// Rest slot of `b` once the swap commits
    pub fn to_b(&self) -> Position {
        self.from_a
    }
}

/// A swap waiting on its transition.
#[derive(Debug)]
pub(crate) struct PendingCommit {
    pub a: PieceId,
    pub b: PieceId,
    pub slot_a: Position,
    pub slot_b: Position,
    pub rx: oneshot::Receiver<()>,
    pub waited_ms: u32,
}

/// Why a parked commit was resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitCause {
    /// The presentation layer fired the handle
    Completed,
    /// The watchdog expired first
    TimedOut,
    /// The handle was dropped without firing
    Dropped,
}

pub(crate) fn channel() -> (TransitionHandle, oneshot::Receiver<()>) {
    let (tx, rx) = oneshot::channel();
    (TransitionHandle { tx }, rx)
}
