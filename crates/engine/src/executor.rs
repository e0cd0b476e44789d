//! Swap executor - the only path that commits a swap to the grid.
//!
//! With animations off, a valid swap commits in the same call. With
//! animations on, the executor emits a transition request and parks the
//! commit until the completion signal arrives; while parked it rejects every
//! other swap with [`BoardError::SwapInFlight`]. That pending slot is the
//! board's commit-in-flight flag: at most one swap is ever in flight.

use std::time::Duration;

use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, error, info, warn};

use crate::core::{are_neighbors, BoardError, Grid};
use crate::event::{AbortReason, BoardEvent, Diagnostic, DiagnosticKind};
use crate::transition::{self, CommitCause, PendingCommit, TransitionRequest};
use crate::types::{PieceId, Position};

/// Result of a swap attempt that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Grid already updated
    Committed,
    /// Waiting for the visual transition to complete
    Pending,
    /// Gesture ended without a swap (e.g. swipe off the edge)
    Aborted(AbortReason),
}

#[derive(Debug)]
pub struct SwapExecutor {
    animations_enabled: bool,
    swap_duration_ms: u32,
    transition_timeout_ms: Option<u32>,
    pending: Option<PendingCommit>,
}

impl SwapExecutor {
    pub fn new(animations_enabled: bool, swap_duration_ms: u32, transition_timeout_ms: Option<u32>) -> Self {
        Self {
            animations_enabled,
            swap_duration_ms,
            transition_timeout_ms,
            pending: None,
        }
    }

    pub fn animations_enabled(&self) -> bool {
        self.animations_enabled
    }

    /// Takes effect from the next swap; a parked commit still waits.
    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.animations_enabled = enabled;
    }

    /// True while a commit waits on its transition
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate and perform (or schedule) the swap of `a` and `b`
    pub fn attempt_swap(
        &mut self,
        grid: &mut Grid,
        a: PieceId,
        b: PieceId,
        events: &mut Vec<BoardEvent>,
    ) -> Result<SwapOutcome, BoardError> {
        if self.is_busy() {
            debug!(%a, %b, "swap rejected, commit in flight");
            return Err(BoardError::SwapInFlight);
        }

        let slot_a = grid
            .position_of(a)
            .ok_or_else(|| BoardError::inconsistent(format!("swap piece {} is not on the board", a)))?;
        let slot_b = grid
            .position_of(b)
            .ok_or_else(|| BoardError::inconsistent(format!("swap piece {} is not on the board", b)))?;

        if !are_neighbors(slot_a, slot_b) {
            debug!(%slot_a, %slot_b, "swap rejected, not adjacent");
            events.push(BoardEvent::GestureAborted {
                piece: a,
                reason: AbortReason::NotAdjacent,
            });
            return Err(BoardError::NotAdjacent {
                a: slot_a,
                b: slot_b,
            });
        }

        if !self.animations_enabled {
            commit(grid, a, b, slot_a, slot_b, events)?;
            return Ok(SwapOutcome::Committed);
        }

        let (handle, rx) = transition::channel();
        events.push(BoardEvent::TransitionRequested(TransitionRequest {
            a,
            b,
            from_a: slot_a,
            from_b: slot_b,
            duration_ms: self.swap_duration_ms,
            handle,
        }));
        self.pending = Some(PendingCommit {
            a,
            b,
            slot_a,
            slot_b,
            rx,
            waited_ms: 0,
        });
        debug!(%a, %b, "swap parked until transition completes");
        Ok(SwapOutcome::Pending)
    }

    /// Non-blocking resume for frame loops
    ///
    /// Returns `Ok(Some(cause))` when the parked commit was applied during this
    /// call, `Ok(None)` if nothing is parked or it is still waiting.
    pub fn poll_transition(
        &mut self,
        grid: &mut Grid,
        elapsed_ms: u32,
        events: &mut Vec<BoardEvent>,
    ) -> Result<Option<CommitCause>, BoardError> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(None);
        };

        let cause = match pending.rx.try_recv() {
            Ok(()) => CommitCause::Completed,
            Err(TryRecvError::Closed) => CommitCause::Dropped,
            Err(TryRecvError::Empty) => {
                pending.waited_ms = pending.waited_ms.saturating_add(elapsed_ms);
                match self.transition_timeout_ms {
                    Some(limit) if pending.waited_ms >= limit => CommitCause::TimedOut,
                    _ => return Ok(None),
                }
            }
        };

        self.resume(grid, cause, events).map(Some)
    }

    /// Wait for the parked commit's completion signal (or the watchdog)
    pub async fn finish_transition(
        &mut self,
        grid: &mut Grid,
        events: &mut Vec<BoardEvent>,
    ) -> Result<Option<CommitCause>, BoardError> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(None);
        };

        let cause = match self.transition_timeout_ms {
            Some(limit) => {
                let remaining = Duration::from_millis(limit.saturating_sub(pending.waited_ms) as u64);
                match tokio::time::timeout(remaining, &mut pending.rx).await {
                    Ok(Ok(())) => CommitCause::Completed,
                    Ok(Err(_)) => CommitCause::Dropped,
                    Err(_) => {
                        pending.waited_ms = limit;
                        CommitCause::TimedOut
                    }
                }
            }
            None => match (&mut pending.rx).await {
                Ok(()) => CommitCause::Completed,
                Err(_) => CommitCause::Dropped,
            },
        };

        self.resume(grid, cause, events).map(Some)
    }

    fn resume(
        &mut self,
        grid: &mut Grid,
        cause: CommitCause,
        events: &mut Vec<BoardEvent>,
    ) -> Result<CommitCause, BoardError> {
        let Some(pending) = self.pending.take() else {
            return Ok(cause);
        };

        let diagnostic = match cause {
            CommitCause::Completed => None,
            CommitCause::TimedOut => Some((
                DiagnosticKind::TransitionTimedOut,
                format!(
                    "transition for {} <-> {} did not complete within {} ms",
                    pending.a, pending.b, pending.waited_ms
                ),
            )),
            CommitCause::Dropped => Some((
                DiagnosticKind::TransitionDropped,
                format!(
                    "transition handle for {} <-> {} dropped without completing",
                    pending.a, pending.b
                ),
            )),
        };
        if let Some((kind, message)) = diagnostic {
            warn!(?kind, "{}", message);
            events.push(BoardEvent::Diagnostic(Diagnostic {
                kind,
                message,
                dump: None,
            }));
        }

        commit(grid, pending.a, pending.b, pending.slot_a, pending.slot_b, events)?;
        Ok(cause)
    }
}

/// Apply a validated swap to the grid.
fn commit(
    grid: &mut Grid,
    a: PieceId,
    b: PieceId,
    slot_a: Position,
    slot_b: Position,
    events: &mut Vec<BoardEvent>,
) -> Result<(), BoardError> {
    if grid.id_at(slot_a) != Some(a) || grid.id_at(slot_b) != Some(b) {
        error!(%a, %b, %slot_a, %slot_b, "pieces moved while their swap was in flight");
        return Err(BoardError::inconsistent(format!(
            "pieces {} and {} are no longer at {} and {}",
            a, b, slot_a, slot_b
        )));
    }

    grid.swap_slots(slot_a, slot_b)?;
    debug_assert!(
        grid.check_consistency().is_ok(),
        "grid inconsistent after committing {} <-> {}",
        a,
        b
    );

    info!(%a, %b, %slot_a, %slot_b, "swap committed");
    events.push(BoardEvent::SwapCommitted {
        a,
        b,
        slot_a: slot_b,
        slot_b: slot_a,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GemKind;

    fn grid() -> Grid {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.fill_with(|pos| GemKind::ALL[(pos.row * 3 + pos.col) as usize % GemKind::ALL.len()]);
        grid
    }

    fn id(grid: &Grid, row: i8, col: i8) -> PieceId {
        grid.id_at(Position::new(row, col)).unwrap()
    }

    #[test]
    fn immediate_commit_without_animations() {
        let mut grid = grid();
        let mut events = Vec::new();
        let mut exec = SwapExecutor::new(false, 250, None);
        let (a, b) = (id(&grid, 0, 0), id(&grid, 0, 1));

        assert_eq!(exec.attempt_swap(&mut grid, a, b, &mut events), Ok(SwapOutcome::Committed));
        assert_eq!(grid.position_of(a), Some(Position::new(0, 1)));
        assert_eq!(grid.position_of(b), Some(Position::new(0, 0)));
        assert!(matches!(
            events.as_slice(),
            [BoardEvent::SwapCommitted { slot_a, slot_b, .. }]
                if *slot_a == Position::new(0, 1) && *slot_b == Position::new(0, 0)
        ));
    }

    #[test]
    fn animated_swap_waits_for_completion() {
        let mut grid = grid();
        let mut events = Vec::new();
        let mut exec = SwapExecutor::new(true, 250, None);
        let (a, b) = (id(&grid, 1, 1), id(&grid, 2, 1));
        let before = grid.snapshot();

        assert_eq!(exec.attempt_swap(&mut grid, a, b, &mut events), Ok(SwapOutcome::Pending));
        assert!(exec.is_busy());
        assert_eq!(grid.snapshot(), before, "nothing commits before completion");

        let request = match events.pop() {
            Some(BoardEvent::TransitionRequested(req)) => req,
            other => panic!("expected transition request, got {:?}", other),
        };
        assert_eq!(request.to_a(), Position::new(2, 1));
        assert_eq!(request.duration_ms, 250);

        assert_eq!(exec.poll_transition(&mut grid, 16, &mut events), Ok(None));
        request.handle.complete();
        assert_eq!(
            exec.poll_transition(&mut grid, 16, &mut events),
            Ok(Some(CommitCause::Completed))
        );
        assert!(!exec.is_busy());
        assert_eq!(grid.position_of(a), Some(Position::new(2, 1)));
    }

    #[test]
    fn second_swap_rejected_while_pending() {
        let mut grid = grid();
        let mut events = Vec::new();
        let mut exec = SwapExecutor::new(true, 250, None);

        let (a, b) = (id(&grid, 0, 0), id(&grid, 0, 1));
        let (c, d) = (id(&grid, 2, 2), id(&grid, 2, 1));

        exec.attempt_swap(&mut grid, a, b, &mut events).unwrap();
        assert_eq!(
            exec.attempt_swap(&mut grid, c, d, &mut events),
            Err(BoardError::SwapInFlight)
        );
        assert!(exec.is_busy());
        assert_eq!(grid.position_of(a), Some(Position::new(0, 0)));
    }

    #[test]
    fn watchdog_commits_with_diagnostic() {
        let mut grid = grid();
        let mut events = Vec::new();
        let mut exec = SwapExecutor::new(true, 250, Some(100));
        let (a, b) = (id(&grid, 0, 0), id(&grid, 1, 0));

        exec.attempt_swap(&mut grid, a, b, &mut events).unwrap();
        // Keep the handle alive so the commit is waiting, not dropped.
        let _request = events.pop();

        assert_eq!(exec.poll_transition(&mut grid, 64, &mut events), Ok(None));
        assert_eq!(
            exec.poll_transition(&mut grid, 64, &mut events),
            Ok(Some(CommitCause::TimedOut))
        );
        assert!(events.iter().any(|e| matches!(
            e,
            BoardEvent::Diagnostic(Diagnostic { kind: DiagnosticKind::TransitionTimedOut, .. })
        )));
        assert_eq!(grid.position_of(a), Some(Position::new(1, 0)));
    }

    #[test]
    fn dropped_handle_commits_with_diagnostic() {
        let mut grid = grid();
        let mut events = Vec::new();
        let mut exec = SwapExecutor::new(true, 250, None);

        let (a, b) = (id(&grid, 0, 0), id(&grid, 0, 1));

        exec.attempt_swap(&mut grid, a, b, &mut events).unwrap();
        events.clear();

        assert_eq!(
            exec.poll_transition(&mut grid, 16, &mut events),
            Ok(Some(CommitCause::Dropped))
        );
        assert!(matches!(
            events.first(),
            Some(BoardEvent::Diagnostic(Diagnostic { kind: DiagnosticKind::TransitionDropped, .. }))
        ));
    }

    #[test]
    fn not_adjacent_leaves_grid_untouched() {
        let mut grid = grid();
        let mut events = Vec::new();
        let mut exec = SwapExecutor::new(false, 250, None);
        let before = grid.snapshot();
        let (a, far) = (id(&grid, 0, 0), id(&grid, 2, 2));

        let err = exec.attempt_swap(&mut grid, a, far, &mut events).unwrap_err();
        assert!(matches!(err, BoardError::NotAdjacent { .. }));
        assert_eq!(grid.snapshot(), before);
        assert!(!exec.is_busy());
    }
}
