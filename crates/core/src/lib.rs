//! Core board logic - pure, deterministic, and testable
//!
//! This crate contains the board model and the rules that gate a swap.
//! It has **zero dependencies** on rendering, input devices, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards
//! - **Testable**: Every rule is a plain function or a `&mut self` method
//! - **Portable**: Can back a terminal front-end, a GUI, or a headless test
//!
//! # Module Structure
//!
//! - [`grid`]: slot storage and the cached-position bookkeeping
//! - [`piece`]: identity-bearing gems
//! - [`adjacency`]: the neighbour predicate that gates every swap
//! - [`gesture`]: drag vector to direction resolution with threshold gating
//! - [`snapshot`]: detached board copies for display and debug dumps
//! - [`rng`]: deterministic LCG used for board population
//! - [`error`]: the shared [`BoardError`] taxonomy
//!
//! # Example
//!
//! ```
//! use tui_gems_core::{are_neighbors, Grid};
//! use tui_gems_core::types::{GemKind, Position};
//!
//! let mut grid = Grid::new(5, 7).unwrap();
//! grid.fill_with(|_| GemKind::Green);
//!
//! let a = Position::new(2, 3);
//! let b = Position::new(2, 4);
//! assert!(are_neighbors(a, b));
//!
//! let id = grid.id_at(a).unwrap();
//! grid.swap_slots(a, b).unwrap();
//! assert_eq!(grid.position_of(id), Some(b));
//! assert!(grid.check_consistency().is_ok());
//! ```

pub mod adjacency;
pub mod error;
pub mod gesture;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use tui_gems_types as types;

// Re-export commonly used types for convenience
pub use adjacency::{are_neighbors, direction_between};
pub use error::BoardError;
pub use gesture::{classify, passes_threshold, resolve_direction, Gesture};
pub use grid::Grid;
pub use piece::Piece;
pub use rng::SimpleRng;
pub use snapshot::GridSnapshot;
