//! Swap transition playback.
//!
//! The board hands out a [`TransitionRequest`] per animated swap and waits
//! for its handle. [`TransitionPlayer`] owns those requests, advances them on
//! the frame clock, interpolates where the two pieces are drawn, and fires
//! the handle once the animation has run its duration.

use tracing::trace;

use crate::engine::{TransitionHandle, TransitionRequest};
use crate::types::{PieceId, Position, Vec2};

#[derive(Debug)]
struct Active {
    a: PieceId,
    b: PieceId,
    from_a: Position,
    from_b: Position,
    duration_ms: u32,
    elapsed_ms: u32,
    handle: Option<TransitionHandle>,
}

impl Active {
    fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms as f32 / self.duration_ms as f32).min(1.0)
    }
}

#[derive(Debug, Default)]
pub struct TransitionPlayer {
    active: Vec<Active>,
}

impl TransitionPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, request: TransitionRequest) {
        let TransitionRequest {
            a,
            b,
            from_a,
            from_b,
            duration_ms,
            handle,
        } = request;
        trace!(%a, %b, duration_ms, "transition started");
        self.active.push(Active {
            a,
            b,
            from_a,
            from_b,
            duration_ms,
            elapsed_ms: 0,
            handle: Some(handle),
        });
    }

    pub fn is_animating(&self) -> bool {
        !self.active.is_empty()
    }

    /// Advance every transition; returns how many completed this frame.
    pub fn tick(&mut self, elapsed_ms: u32) -> usize {
        let mut completed = 0;
        // The board stopped waiting (watchdog); the pieces already rest at their new slots.
        self.active.retain(|t| match &t.handle {
            Some(handle) if handle.is_abandoned() => {
                trace!(a = %t.a, b = %t.b, "transition abandoned");
                false
            }
            _ => true,
        });
        for t in &mut self.active {
            t.elapsed_ms = t.elapsed_ms.saturating_add(elapsed_ms);
            if t.elapsed_ms >= t.duration_ms {
                if let Some(handle) = t.handle.take() {
                    trace!(a = %t.a, b = %t.b, "transition complete");
                    handle.complete();
                    completed += 1;
                }
            }
        }
        self.active.retain(|t| t.handle.is_some());
        completed
    }

    /// Fire every outstanding handle now.
    pub fn finish_all(&mut self) -> usize {
        let n = self.active.len();
        for mut t in self.active.drain(..) {
            if let Some(handle) = t.handle.take() {
                handle.complete();
            }
        }
        n
    }

    /// Draw location of `piece` in slot units, `x` = column and `y` = row.
    ///
    /// `None` when the piece is not animating and rests at its slot.
    pub fn draw_position(&self, piece: PieceId) -> Option<Vec2> {
        self.active.iter().find_map(|t| {
            let (from, to) = if t.a == piece {
                (t.from_a, t.from_b)
            } else if t.b == piece {
                (t.from_b, t.from_a)
            } else {
                return None;
            };
            Some(slot_vec(from).lerp(slot_vec(to), t.progress()))
        })
    }
}

fn slot_vec(pos: Position) -> Vec2 {
    Vec2::new(pos.col as f32, pos.row as f32)
}
