//! Interaction state machine - turns pointer events into swap intents.
//!
//! The machine only *reads* the grid. Whatever it decides comes back as an
//! [`Intent`] for the [`Board`](crate::Board) to act on.
//!
//! # Select-select mode
//!
//! ```text
//! Idle --down(P)--> FirstSelected(P)
//! FirstSelected(P) --down(P)--> Idle                          (deselect)
//! FirstSelected(P) --down(Q), Q next to P--> Idle + Swap(P, Q)
//! FirstSelected(P) --down(Q), Q not next to P--> FirstSelected(Q)
//! ```
//!
//! # Drag mode
//!
//! ```text
//! Idle --down(P, origin)--> Dragging(P, origin)
//! Dragging(P, o) --up(P, point)--> Idle + (Abort | Swap(P, neighbour))
//! Dragging(P, o) --down(Q != P)--> ignored
//! Dragging(P, o) --up(Q != P)--> StaleEvent
//! ```

use tracing::{debug, warn};

use crate::core::gesture::{classify, Gesture};
use crate::core::{are_neighbors, BoardError, Grid};
use crate::event::AbortReason;
use crate::types::{InteractionMode, PieceId, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    Idle,
    FirstSelected(PieceId),
    Dragging { subject: PieceId, origin: Vec2 },
}

/// What the board should do in response to a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    None,
    Select(PieceId),
    Deselect(PieceId),
    /// Selection moved from `previous` to `piece` (non-neighbour click)
    Reselect { previous: PieceId, piece: PieceId },
    Swap(PieceId, PieceId),
    Abort { piece: PieceId, reason: AbortReason },
}

#[derive(Debug, Clone)]
pub struct Interaction {
    mode: InteractionMode,
    drag_threshold: f32,
    state: InteractionState,
}

impl Interaction {
    pub fn new(mode: InteractionMode, drag_threshold: f32) -> Self {
        Self {
            mode,
            drag_threshold,
            state: InteractionState::Idle,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn drag_threshold(&self) -> f32 {
        self.drag_threshold
    }

    /// Piece currently selected or being dragged
    pub fn subject(&self) -> Option<PieceId> {
        match self.state {
            InteractionState::Idle => None,
            InteractionState::FirstSelected(p) => Some(p),
            InteractionState::Dragging { subject, .. } => Some(subject),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    /// Switch modes; any gesture in progress is dropped.
    pub fn set_mode(&mut self, mode: InteractionMode) -> Option<PieceId> {
        self.mode = mode;
        self.reset()
    }

    /// Return to `Idle`, reporting the subject that was dropped.
    pub fn reset(&mut self) -> Option<PieceId> {
        let subject = self.subject();
        self.state = InteractionState::Idle;
        subject
    }

    pub fn pointer_down(&mut self, grid: &Grid, piece: PieceId, point: Vec2) -> Result<Intent, BoardError> {
        if grid.piece(piece).is_none() {
            return Err(BoardError::StaleEvent(piece));
        }

        match self.mode {
            InteractionMode::Drag => Ok(self.drag_down(piece, point)),
            InteractionMode::SelectSelect => Ok(self.select_down(grid, piece)),
        }
    }

    fn drag_down(&mut self, piece: PieceId, point: Vec2) -> Intent {
        match self.state {
            InteractionState::Dragging { subject, .. } if subject != piece => {
                debug!(%piece, %subject, "pointer down ignored while another drag is active");
                Intent::None
            }
            InteractionState::Dragging { .. } => {
                // Same subject pressed again: restart the gesture from here.
                self.state = InteractionState::Dragging {
                    subject: piece,
                    origin: point,
                };
                Intent::None
            }
            InteractionState::Idle | InteractionState::FirstSelected(_) => {
                self.state = InteractionState::Dragging {
                    subject: piece,
                    origin: point,
                };
                Intent::Select(piece)
            }
        }
    }

    fn select_down(&mut self, grid: &Grid, piece: PieceId) -> Intent {
        let first = match self.state {
            InteractionState::FirstSelected(first) if grid.piece(first).is_some() => first,
            _ => {
                self.state = InteractionState::FirstSelected(piece);
                return Intent::Select(piece);
            }
        };

        if first == piece {
            self.state = InteractionState::Idle;
            return Intent::Deselect(piece);
        }

        let neighbours = match (grid.position_of(first), grid.position_of(piece)) {
            (Some(a), Some(b)) => are_neighbors(a, b),
            _ => false,
        };

        if neighbours {
            self.state = InteractionState::Idle;
            Intent::Swap(first, piece)
        } else {
            self.state = InteractionState::FirstSelected(piece);
            Intent::Reselect {
                previous: first,
                piece,
            }
        }
    }

    pub fn pointer_up(&mut self, grid: &Grid, piece: PieceId, point: Vec2) -> Result<Intent, BoardError> {
        if self.mode == InteractionMode::SelectSelect {
            return Ok(Intent::None);
        }

        let origin = match self.state {
            InteractionState::Dragging { subject, origin } if subject == piece => origin,
            _ => return Err(BoardError::StaleEvent(piece)),
        };
        self.state = InteractionState::Idle;

        let direction = match classify(point - origin, self.drag_threshold) {
            Gesture::Tap => {
                return Ok(Intent::Abort {
                    piece,
                    reason: AbortReason::BelowThreshold,
                })
            }
            Gesture::Swipe(direction) => direction,
        };

        let from = grid
            .position_of(piece)
            .ok_or_else(|| BoardError::inconsistent(format!("drag subject {} has no slot", piece)))?;
        let target = from.step(direction);
        if !grid.contains(target) {
            return Ok(Intent::Abort {
                piece,
                reason: AbortReason::OffBoard { direction },
            });
        }

        match grid.id_at(target) {
            Some(other) => Ok(Intent::Swap(piece, other)),
            None => {
                warn!(%piece, %from, %target, "drag target slot is empty");
                Err(BoardError::inconsistent(format!(
                    "drag target {} next to {} is empty",
                    target, from
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, GemKind, Position};

    fn grid() -> Grid {
        let mut grid = Grid::new(5, 7).unwrap();
        grid.fill_with(|_| GemKind::Red);
        grid
    }

    fn id(grid: &Grid, row: i8, col: i8) -> PieceId {
        grid.id_at(Position::new(row, col)).unwrap()
    }

    #[test]
    fn drag_down_then_up_resolves_swap() {
        let grid = grid();
        let mut ix = Interaction::new(InteractionMode::Drag, 30.0);
        let p = id(&grid, 2, 3);

        assert_eq!(ix.pointer_down(&grid, p, Vec2::new(10.0, 10.0)).unwrap(), Intent::Select(p));
        assert!(ix.is_dragging());

        let intent = ix.pointer_up(&grid, p, Vec2::new(50.0, 12.0)).unwrap();
        assert_eq!(intent, Intent::Swap(p, id(&grid, 2, 4)));
        assert_eq!(ix.state(), InteractionState::Idle);
    }

    #[test]
    fn drag_up_moves_towards_row_zero() {
        let grid = grid();
        let mut ix = Interaction::new(InteractionMode::Drag, 30.0);
        let p = id(&grid, 2, 3);

        ix.pointer_down(&grid, p, Vec2::ZERO).unwrap();
        let intent = ix.pointer_up(&grid, p, Vec2::new(0.0, 100.0)).unwrap();
        assert_eq!(intent, Intent::Swap(p, id(&grid, 1, 3)));
    }

    #[test]
    fn second_subject_ignored_while_dragging() {
        let grid = grid();
        let mut ix = Interaction::new(InteractionMode::Drag, 30.0);
        let p = id(&grid, 2, 3);
        let q = id(&grid, 0, 0);

        ix.pointer_down(&grid, p, Vec2::ZERO).unwrap();
        assert_eq!(ix.pointer_down(&grid, q, Vec2::ZERO).unwrap(), Intent::None);
        assert_eq!(ix.subject(), Some(p));

        assert_eq!(
            ix.pointer_up(&grid, q, Vec2::new(100.0, 0.0)),
            Err(BoardError::StaleEvent(q))
        );
        assert!(ix.is_dragging(), "stale release must not end the real drag");
    }

    #[test]
    fn same_subject_down_reanchors_origin() {
        let grid = grid();
        let mut ix = Interaction::new(InteractionMode::Drag, 30.0);
        let p = id(&grid, 2, 3);

        ix.pointer_down(&grid, p, Vec2::ZERO).unwrap();
        ix.pointer_down(&grid, p, Vec2::new(100.0, 0.0)).unwrap();
        let intent = ix.pointer_up(&grid, p, Vec2::new(110.0, 0.0)).unwrap();
        assert_eq!(
            intent,
            Intent::Abort {
                piece: p,
                reason: AbortReason::BelowThreshold
            }
        );
    }

    #[test]
    fn pointer_up_without_drag_is_stale() {
        let grid = grid();
        let mut ix = Interaction::new(InteractionMode::Drag, 30.0);
        let p = id(&grid, 1, 1);
        assert_eq!(
            ix.pointer_up(&grid, p, Vec2::ZERO),
            Err(BoardError::StaleEvent(p))
        );
    }

    #[test]
    fn unknown_piece_is_stale() {
        let grid = grid();
        let mut ix = Interaction::new(InteractionMode::Drag, 30.0);
        assert_eq!(
            ix.pointer_down(&grid, PieceId(9999), Vec2::ZERO),
            Err(BoardError::StaleEvent(PieceId(9999)))
        );
    }

    #[test]
    fn select_select_flow() {
        let grid = grid();
        let mut ix = Interaction::new(InteractionMode::SelectSelect, 30.0);
        let p = id(&grid, 2, 3);
        let far = id(&grid, 4, 6);
        let near = id(&grid, 3, 6);

        assert_eq!(ix.pointer_down(&grid, p, Vec2::ZERO).unwrap(), Intent::Select(p));
        assert_eq!(
            ix.pointer_down(&grid, far, Vec2::ZERO).unwrap(),
            Intent::Reselect {
                previous: p,
                piece: far
            }
        );
        assert_eq!(ix.state(), InteractionState::FirstSelected(far));
        assert_eq!(ix.pointer_up(&grid, far, Vec2::ZERO).unwrap(), Intent::None);

        assert_eq!(
            ix.pointer_down(&grid, near, Vec2::ZERO).unwrap(),
            Intent::Swap(far, near)
        );
        assert_eq!(ix.state(), InteractionState::Idle);
    }

    #[test]
    fn select_same_piece_twice_deselects() {
        let grid = grid();
        let mut ix = Interaction::new(InteractionMode::SelectSelect, 30.0);
        let p = id(&grid, 0, 0);

        ix.pointer_down(&grid, p, Vec2::ZERO).unwrap();
        assert_eq!(ix.pointer_down(&grid, p, Vec2::ZERO).unwrap(), Intent::Deselect(p));
        assert_eq!(ix.state(), InteractionState::Idle);
    }

    #[test]
    fn set_mode_drops_gesture() {
        let grid = grid();
        let mut ix = Interaction::new(InteractionMode::Drag, 30.0);
        let p = id(&grid, 0, 0);
        ix.pointer_down(&grid, p, Vec2::ZERO).unwrap();

        assert_eq!(ix.set_mode(InteractionMode::SelectSelect), Some(p));
        assert_eq!(ix.state(), InteractionState::Idle);
        assert_eq!(ix.mode(), InteractionMode::SelectSelect);
    }

    #[test]
    fn off_board_drag_aborts() {
        let grid = grid();
        let mut ix = Interaction::new(InteractionMode::Drag, 30.0);
        let p = id(&grid, 4, 0);

        ix.pointer_down(&grid, p, Vec2::ZERO).unwrap();
        let intent = ix.pointer_up(&grid, p, Vec2::new(0.0, -60.0)).unwrap();
        assert_eq!(
            intent,
            Intent::Abort {
                piece: p,
                reason: AbortReason::OffBoard {
                    direction: Direction::Down
                }
            }
        );
    }
}
