//! Grid tests - slot storage, cached positions, and swap bookkeeping

use tui_gems::core::{are_neighbors, BoardError, Grid, SimpleRng};
use tui_gems::types::{GemKind, PieceId, Position};

fn pos(row: i8, col: i8) -> Position {
    Position::new(row, col)
}

fn full_grid(rows: u8, columns: u8) -> Grid {
    let mut grid = Grid::new(rows, columns).unwrap();
    grid.populate(&mut SimpleRng::new(7));
    grid
}

#[test]
fn test_new_grid_is_empty() {
    let grid = Grid::new(5, 7).unwrap();
    assert_eq!(grid.rows(), 5);
    assert_eq!(grid.columns(), 7);
    assert!(grid.is_empty());
    assert_eq!(grid.id_at(pos(0, 0)), None);
    assert!(grid.check_consistency().is_ok());
}

#[test]
fn test_invalid_dimensions_rejected() {
    assert!(matches!(Grid::new(0, 7), Err(BoardError::InvalidDimensions { .. })));
    assert!(matches!(Grid::new(5, 0), Err(BoardError::InvalidDimensions { .. })));
    assert!(matches!(Grid::new(200, 5), Err(BoardError::InvalidDimensions { .. })));
}

#[test]
fn test_register_sets_cached_position() {
    let mut grid = Grid::new(3, 3).unwrap();
    let id = grid.register_piece(GemKind::Red, pos(1, 2)).unwrap();

    assert_eq!(grid.id_at(pos(1, 2)), Some(id));
    assert_eq!(grid.position_of(id), Some(pos(1, 2)));
    assert_eq!(grid.piece(id).map(|p| p.kind()), Some(GemKind::Red));
    assert_eq!(grid.len(), 1);
}

#[test]
fn test_register_out_of_bounds() {
    let mut grid = Grid::new(5, 7).unwrap();
    for bad in [pos(-1, 0), pos(0, -1), pos(5, 0), pos(0, 7)] {
        assert_eq!(
            grid.register_piece(GemKind::Green, bad),
            Err(BoardError::OutOfBounds {
                position: bad,
                rows: 5,
                columns: 7
            })
        );
    }
    assert!(grid.is_empty());
}

#[test]
fn test_reregistration_evicts_previous_occupant() {
    let mut grid = Grid::new(2, 2).unwrap();
    let old = grid.register_piece(GemKind::White, pos(0, 0)).unwrap();
    let new = grid.register_piece(GemKind::Yellow, pos(0, 0)).unwrap();

    assert_ne!(old, new);
    assert_eq!(grid.id_at(pos(0, 0)), Some(new));
    assert!(grid.piece(old).is_none(), "evicted piece is gone");
    assert_eq!(grid.len(), 1);
    assert!(grid.check_consistency().is_ok());
}

#[test]
fn test_from_rows_places_kinds_top_row_first() {
    let grid = Grid::from_rows(&[
        vec![GemKind::Green, GemKind::Red],
        vec![GemKind::Violet, GemKind::White],
    ])
    .unwrap();
    assert_eq!(grid.piece_at(pos(0, 1)).map(|p| p.kind()), Some(GemKind::Red));
    assert_eq!(grid.piece_at(pos(1, 0)).map(|p| p.kind()), Some(GemKind::Violet));
    assert!(grid.is_full());
}

#[test]
fn test_from_rows_rejects_ragged_input() {
    let result = Grid::from_rows(&[vec![GemKind::Green, GemKind::Red], vec![GemKind::Violet]]);
    assert!(matches!(result, Err(BoardError::InvalidDimensions { .. })));
}

#[test]
fn test_swap_slots_moves_identities() {
    let mut grid = full_grid(5, 7);
    let a = grid.id_at(pos(2, 3)).unwrap();
    let b = grid.id_at(pos(2, 4)).unwrap();
    let kind_a = grid.piece(a).unwrap().kind();

    grid.swap_slots(pos(2, 3), pos(2, 4)).unwrap();

    assert_eq!(grid.id_at(pos(2, 4)), Some(a));
    assert_eq!(grid.id_at(pos(2, 3)), Some(b));
    assert_eq!(grid.position_of(a), Some(pos(2, 4)));
    assert_eq!(grid.position_of(b), Some(pos(2, 3)));
    assert_eq!(grid.piece(a).unwrap().kind(), kind_a, "kind travels with the piece");
}

#[test]
fn test_swap_slots_twice_restores_everything() {
    let mut grid = full_grid(5, 7);
    let before = grid.clone();

    grid.swap_slots(pos(1, 1), pos(2, 1)).unwrap();
    grid.swap_slots(pos(1, 1), pos(2, 1)).unwrap();

    assert_eq!(grid, before);
}

#[test]
fn test_swap_slots_errors_leave_grid_untouched() {
    let mut grid = full_grid(3, 3);
    let before = grid.snapshot();

    assert!(matches!(
        grid.swap_slots(pos(0, 0), pos(3, 0)),
        Err(BoardError::OutOfBounds { .. })
    ));
    assert_eq!(grid.snapshot(), before);

    let mut sparse = Grid::new(2, 2).unwrap();
    sparse.register_piece(GemKind::Red, pos(0, 0)).unwrap();
    assert!(matches!(
        sparse.swap_slots(pos(0, 0), pos(0, 1)),
        Err(BoardError::InconsistentState(_))
    ));
}

#[test]
fn test_cache_agrees_with_scan_after_random_swaps() {
    let mut grid = full_grid(5, 7);
    let mut rng = SimpleRng::new(99);

    for _ in 0..500 {
        let a = pos(rng.next_range(5) as i8, rng.next_range(7) as i8);
        let neighbours = grid.neighbors(a);
        let b = neighbours[rng.next_range(neighbours.len() as u32) as usize];
        assert!(are_neighbors(a, b));
        grid.swap_slots(a, b).unwrap();
    }

    assert!(grid.check_consistency().is_ok());
    for piece in grid.iter() {
        assert_eq!(grid.locate(piece.id()), Some(piece.position()));
        assert_eq!(grid.id_at(piece.position()), Some(piece.id()));
    }
    assert_eq!(grid.len(), 35);
}

#[test]
fn test_neighbors_respect_edges() {
    let grid = Grid::new(5, 7).unwrap();
    assert_eq!(grid.neighbors(pos(0, 0)).len(), 2);
    assert_eq!(grid.neighbors(pos(0, 3)).len(), 3);
    assert_eq!(grid.neighbors(pos(2, 3)).len(), 4);
    assert_eq!(grid.neighbors(pos(4, 6)).len(), 2);
}

#[test]
fn test_clear_never_reuses_ids() {
    let mut grid = full_grid(2, 2);
    let first = grid.id_at(pos(0, 0)).unwrap();
    let generation = grid.generation();

    grid.populate(&mut SimpleRng::new(3));

    assert!(grid.generation() > generation);
    assert!(grid.piece(first).is_none(), "ids from a previous generation are dead");
    assert!(grid.iter().all(|p| p.id() > first));
    assert_eq!(grid.piece(PieceId(u32::MAX)), None);
}

#[test]
fn test_snapshot_display_and_json() {
    let grid = Grid::from_rows(&[vec![GemKind::Green, GemKind::Yellow]]).unwrap();
    let snap = grid.snapshot();

    assert_eq!(snap.to_string(), "0 4");
    assert_eq!(snap.kind_at(pos(0, 1)), Some(GemKind::Yellow));

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["rows"], 1);
    assert_eq!(json["columns"], 2);
}
