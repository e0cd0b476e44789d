//! Grid module - authoritative slot storage
//!
//! The grid is a `rows x columns` array of optional piece ids in row-major
//! order, plus an arena owning the pieces themselves.
//! Coordinates: (row, col) where row 0 is the top row and col 0 the left column.
//!
//! Invariants maintained by every `&mut self` method:
//!
//! - an occupied slot's piece has `position == slot`
//! - a piece id occupies at most one slot
//! - every stored position is inside the grid
//!
//! After initial population, [`Grid::swap_slots`] is the only operation that
//! changes occupancy.

use arrayvec::ArrayVec;
use tracing::{trace, warn};

use crate::error::BoardError;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::snapshot::GridSnapshot;
use crate::types::{Direction, GemKind, PieceId, Position};

/// Largest supported dimension; positions are stored as `i8`.
pub const MAX_DIMENSION: u8 = i8::MAX as u8;

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: u8,
    columns: u8,
    /// Flat array of slots, row-major order (row * columns + col)
    cells: Vec<Option<PieceId>>,
    /// Piece arena indexed by `id - base_id`
    pieces: Vec<Option<Piece>>,
    base_id: u32,
    next_id: u32,
    generation: u32,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: u8, columns: u8) -> Result<Self, BoardError> {
        if rows == 0 || columns == 0 || rows > MAX_DIMENSION || columns > MAX_DIMENSION {
            return Err(BoardError::InvalidDimensions { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            cells: vec![None; rows as usize * columns as usize],
            pieces: Vec::with_capacity(rows as usize * columns as usize),
            base_id: 0,
            next_id: 0,
            generation: 0,
        })
    }

    /// Build a fully populated grid from rows of kinds (top row first)
    pub fn from_rows(kinds: &[Vec<GemKind>]) -> Result<Self, BoardError> {
        let rows = u8::try_from(kinds.len()).unwrap_or(0);
        let columns = kinds
            .first()
            .and_then(|r| u8::try_from(r.len()).ok())
            .unwrap_or(0);
        if let Some(ragged) = kinds.iter().find(|r| r.len() != columns as usize) {
            return Err(BoardError::InvalidDimensions {
                rows,
                columns: u8::try_from(ragged.len()).unwrap_or(u8::MAX),
            });
        }

        let mut grid = Self::new(rows, columns)?;
        grid.fill_with(|pos| kinds[pos.row as usize][pos.col as usize]);
        Ok(grid)
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Incremented on every full reset
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.row as usize * self.columns as usize + pos.col as usize)
    }

    #[inline(always)]
    fn position_at(&self, idx: usize) -> Position {
        let cols = self.columns as usize;
        Position::new((idx / cols) as i8, (idx % cols) as i8)
    }

    #[inline(always)]
    fn arena_index(&self, id: PieceId) -> Option<usize> {
        id.0.checked_sub(self.base_id).map(|i| i as usize)
    }

    /// Check if position is inside the grid
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.col >= 0 && (pos.row as u8) < self.rows && (pos.col as u8) < self.columns
    }

    fn out_of_bounds(&self, position: Position) -> BoardError {
        BoardError::OutOfBounds {
            position,
            rows: self.rows,
            columns: self.columns,
        }
    }

    /// Place a new piece into the slot at `idx`, evicting any previous occupant.
    fn place(&mut self, idx: usize, kind: GemKind) -> PieceId {
        let position = self.position_at(idx);

        if let Some(old) = self.cells[idx] {
            warn!(piece = %old, %position, "slot re-registered, evicting previous occupant");
            if let Some(slot) = self.arena_index(old).and_then(|i| self.pieces.get_mut(i)) {
                *slot = None;
            }
        }

        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.push(Some(Piece::new(id, kind, position)));
        self.cells[idx] = Some(id);
        id
    }

    /// Bind a new piece of `kind` to `position`
    ///
    /// Any piece previously registered at that slot is dropped from the grid.
    pub fn register_piece(&mut self, kind: GemKind, position: Position) -> Result<PieceId, BoardError> {
        let idx = self.index(position).ok_or_else(|| self.out_of_bounds(position))?;
        Ok(self.place(idx, kind))
    }

    /// Fill every slot using `kind_for`, replacing the whole board
    pub fn fill_with(&mut self, mut kind_for: impl FnMut(Position) -> GemKind) {
        self.clear();
        for idx in 0..self.cells.len() {
            let kind = kind_for(self.position_at(idx));
            self.place(idx, kind);
        }
    }

    /// Full-board reset with random kinds
    pub fn populate(&mut self, rng: &mut SimpleRng) {
        self.fill_with(|_| rng.next_kind());
    }

    /// Drop every piece
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.pieces.clear();
        self.base_id = self.next_id;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Piece at `pos`, or `None` for empty or out-of-bounds slots
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.id_at(pos).and_then(|id| self.piece(id))
    }

    /// Id of the piece at `pos`
    pub fn id_at(&self, pos: Position) -> Option<PieceId> {
        self.index(pos).and_then(|idx| self.cells[idx])
    }

    /// Look up a live piece by id
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.arena_index(id)
            .and_then(|i| self.pieces.get(i))
            .and_then(|p| p.as_ref())
    }

    /// Cached position of a piece (O(1))
    pub fn position_of(&self, id: PieceId) -> Option<Position> {
        self.piece(id).map(|p| p.position())
    }

    /// Find a piece by scanning every slot
    ///
    /// Ignores the cached position; used to cross-check it.
    pub fn locate(&self, id: PieceId) -> Option<Position> {
        self.cells
            .iter()
            .position(|c| *c == Some(id))
            .map(|idx| self.position_at(idx))
    }

    /// In-bounds neighbour of `pos` in `dir`
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let next = pos.step(dir);
        self.contains(next).then_some(next)
    }

    /// All in-bounds orthogonal neighbours of `pos`
    pub fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        Direction::ALL
            .iter()
            .filter_map(|dir| self.neighbor(pos, *dir))
            .collect()
    }

    /// Exchange the pieces in two occupied slots
    ///
    /// Both cached positions are rewritten in the same call, so no caller can
    /// observe a half-swapped grid.
    pub fn swap_slots(&mut self, a: Position, b: Position) -> Result<(), BoardError> {
        let idx_a = self.index(a).ok_or_else(|| self.out_of_bounds(a))?;
        let idx_b = self.index(b).ok_or_else(|| self.out_of_bounds(b))?;
        if idx_a == idx_b {
            return Ok(());
        }

        let id_a = self.cells[idx_a]
            .ok_or_else(|| BoardError::inconsistent(format!("swap source {} is empty", a)))?;
        let id_b = self.cells[idx_b]
            .ok_or_else(|| BoardError::inconsistent(format!("swap target {} is empty", b)))?;

        let arena_a = self
            .arena_index(id_a)
            .filter(|i| matches!(self.pieces.get(*i), Some(Some(_))))
            .ok_or_else(|| BoardError::inconsistent(format!("slot {} holds dead piece {}", a, id_a)))?;
        let arena_b = self
            .arena_index(id_b)
            .filter(|i| matches!(self.pieces.get(*i), Some(Some(_))))
            .ok_or_else(|| BoardError::inconsistent(format!("slot {} holds dead piece {}", b, id_b)))?;

        self.cells.swap(idx_a, idx_b);
        if let Some(piece) = self.pieces[arena_a].as_mut() {
            piece.set_position(b);
        }
        if let Some(piece) = self.pieces[arena_b].as_mut() {
            piece.set_position(a);
        }

        trace!(%a, %b, piece_a = %id_a, piece_b = %id_b, "slots swapped");
        Ok(())
    }

    /// Iterate occupied pieces in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells
            .iter()
            .filter_map(move |c| c.and_then(|id| self.piece(id)))
    }

    /// Verify slot/position agreement, single occupancy, and that no live piece
    /// is detached from the grid
    pub fn check_consistency(&self) -> Result<(), BoardError> {
        let mut seen = vec![false; self.pieces.len()];

        for (idx, cell) in self.cells.iter().enumerate() {
            let Some(id) = *cell else { continue };
            let slot = self.position_at(idx);
            let arena = self
                .arena_index(id)
                .filter(|i| *i < self.pieces.len())
                .ok_or_else(|| BoardError::inconsistent(format!("slot {} holds unknown piece {}", slot, id)))?;
            let piece = self.pieces[arena]
                .as_ref()
                .ok_or_else(|| BoardError::inconsistent(format!("slot {} holds dead piece {}", slot, id)))?;

            if piece.position() != slot {
                return Err(BoardError::inconsistent(format!(
                    "piece {} cached at {} but stored at {}",
                    id,
                    piece.position(),
                    slot
                )));
            }
            if std::mem::replace(&mut seen[arena], true) {
                return Err(BoardError::inconsistent(format!(
                    "piece {} occupies more than one slot",
                    id
                )));
            }
        }

        for (arena, piece) in self.pieces.iter().enumerate() {
            if let Some(piece) = piece {
                if !seen[arena] {
                    return Err(BoardError::inconsistent(format!(
                        "piece {} at {} is not in any slot",
                        piece.id(),
                        piece.position()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Copy of the board contents for display and debug dumps
    pub fn snapshot(&self) -> GridSnapshot {
        let cells = self
            .cells
            .iter()
            .map(|c| {
                c.and_then(|id| self.piece(id))
                    .map_or(0, |p| p.kind().index() + 1)
            })
            .collect();
        GridSnapshot::new(self.rows, self.columns, self.generation, cells)
    }

    /// Overwrite a slot without touching the piece (test-only corruption helper)
    #[cfg(test)]
    pub(crate) fn corrupt_slot(&mut self, pos: Position, id: Option<PieceId>) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striped(rows: u8, cols: u8) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        grid.fill_with(|pos| GemKind::ALL[(pos.row + pos.col) as usize % GemKind::ALL.len()]);
        grid
    }

    #[test]
    fn test_index_calculation() {
        let grid = Grid::new(5, 7).unwrap();
        assert_eq!(grid.index(Position::new(0, 0)), Some(0));
        assert_eq!(grid.index(Position::new(0, 6)), Some(6));
        assert_eq!(grid.index(Position::new(1, 0)), Some(7));
        assert_eq!(grid.index(Position::new(4, 6)), Some(34));
        assert_eq!(grid.index(Position::new(-1, 0)), None);
        assert_eq!(grid.index(Position::new(0, 7)), None);
        assert_eq!(grid.index(Position::new(5, 0)), None);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 7),
            Err(BoardError::InvalidDimensions { rows: 0, columns: 7 })
        );
        assert!(Grid::new(5, 0).is_err());
        assert!(Grid::new(128, 1).is_err());
    }

    #[test]
    fn test_fill_sets_cached_positions() {
        let grid = striped(5, 7);
        assert!(grid.is_full());
        assert_eq!(grid.len(), 35);
        for piece in grid.iter() {
            assert_eq!(grid.piece_at(piece.position()).map(|p| p.id()), Some(piece.id()));
            assert_eq!(grid.locate(piece.id()), Some(piece.position()));
        }
        grid.check_consistency().unwrap();
    }

    #[test]
    fn test_reregistration_evicts_previous_piece() {
        let mut grid = Grid::new(2, 2).unwrap();
        let first = grid.register_piece(GemKind::Red, Position::new(1, 1)).unwrap();
        let second = grid.register_piece(GemKind::Green, Position::new(1, 1)).unwrap();

        assert_ne!(first, second);
        assert!(grid.piece(first).is_none());
        assert_eq!(grid.id_at(Position::new(1, 1)), Some(second));
        grid.check_consistency().unwrap();
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut grid = striped(2, 2);
        let old = grid.id_at(Position::new(0, 0)).unwrap();
        let gen = grid.generation();

        grid.fill_with(|_| GemKind::White);
        assert!(grid.generation() > gen);
        assert!(grid.piece(old).is_none());
        assert_ne!(grid.id_at(Position::new(0, 0)), Some(old));
    }

    #[test]
    fn test_consistency_detects_duplicate_slot() {
        let mut grid = striped(3, 3);
        let id = grid.id_at(Position::new(0, 0));
        grid.corrupt_slot(Position::new(2, 2), id);
        assert!(matches!(
            grid.check_consistency(),
            Err(BoardError::InconsistentState(_))
        ));
    }

    #[test]
    fn test_consistency_detects_detached_piece() {
        let mut grid = striped(3, 3);
        grid.corrupt_slot(Position::new(1, 1), None);
        assert!(grid.check_consistency().is_err());
    }

    #[test]
    fn test_swap_into_corrupted_empty_slot_is_inconsistent() {
        let mut grid = striped(3, 3);
        grid.corrupt_slot(Position::new(1, 2), None);
        let before = grid.snapshot();

        let err = grid
            .swap_slots(Position::new(1, 1), Position::new(1, 2))
            .unwrap_err();
        assert!(matches!(err, BoardError::InconsistentState(_)));
        assert_eq!(grid.snapshot(), before);
    }

    #[test]
    fn test_neighbors_at_corner_and_center() {
        let grid = Grid::new(5, 7).unwrap();
        assert_eq!(grid.neighbors(Position::new(0, 0)).len(), 2);
        assert_eq!(grid.neighbors(Position::new(0, 3)).len(), 3);
        assert_eq!(grid.neighbors(Position::new(2, 3)).len(), 4);
        assert_eq!(grid.neighbor(Position::new(0, 3), Direction::Up), None);
        assert_eq!(
            grid.neighbor(Position::new(0, 3), Direction::Down),
            Some(Position::new(1, 3))
        );
    }
}
