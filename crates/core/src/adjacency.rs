//! Adjacency rule - the only gate in front of a swap.

use crate::types::{Direction, Position};

/// True iff the two slots are orthogonal neighbours (Manhattan distance 1).
///
/// Diagonal and identical slots are never neighbours.
///
/// # Examples
///
/// ```
/// use tui_gems_core::adjacency::are_neighbors;
/// use tui_gems_core::types::Position;
///
/// assert!(are_neighbors(Position::new(2, 3), Position::new(2, 4)));
/// assert!(!are_neighbors(Position::new(2, 3), Position::new(3, 4)));
/// assert!(!are_neighbors(Position::new(2, 3), Position::new(2, 3)));
/// ```
#[inline]
pub fn are_neighbors(a: Position, b: Position) -> bool {
    a.manhattan(b) == 1
}

/// Direction leading from `from` to its neighbour `to`
pub fn direction_between(from: Position, to: Position) -> Option<Direction> {
    if !are_neighbors(from, to) {
        return None;
    }
    Direction::ALL.into_iter().find(|dir| from.step(*dir) == to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_positions(rows: i8, cols: i8) -> Vec<Position> {
        (0..rows)
            .flat_map(|r| (0..cols).map(move |c| Position::new(r, c)))
            .collect()
    }

    #[test]
    fn exhaustive_symmetry_and_irreflexivity() {
        let positions = all_positions(4, 4);
        for &a in &positions {
            assert!(!are_neighbors(a, a), "{} must not neighbour itself", a);
            for &b in &positions {
                assert_eq!(are_neighbors(a, b), are_neighbors(b, a));
            }
        }
    }

    #[test]
    fn exhaustive_matches_row_or_column_rule() {
        let positions = all_positions(4, 5);
        for &a in &positions {
            for &b in &positions {
                let dr = (a.row - b.row).abs();
                let dc = (a.col - b.col).abs();
                let expected = (dr == 1 && dc == 0) || (dr == 0 && dc == 1);
                assert_eq!(are_neighbors(a, b), expected, "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn diagonals_are_rejected() {
        let center = Position::new(2, 2);
        for (dr, dc) in [(-1, -1), (-1, 1), (1, -1), (1, 1)] {
            assert!(!are_neighbors(center, Position::new(2 + dr, 2 + dc)));
        }
    }

    #[test]
    fn direction_between_neighbours() {
        let p = Position::new(2, 3);
        assert_eq!(direction_between(p, Position::new(1, 3)), Some(Direction::Up));
        assert_eq!(direction_between(p, Position::new(3, 3)), Some(Direction::Down));
        assert_eq!(direction_between(p, Position::new(2, 2)), Some(Direction::Left));
        assert_eq!(direction_between(p, Position::new(2, 4)), Some(Direction::Right));
        assert_eq!(direction_between(p, Position::new(4, 3)), None);
        assert_eq!(direction_between(p, p), None);
    }
}
