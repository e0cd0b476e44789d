//! Board engine - interaction state machine, swap executor, and the `Board`
//! that ties them to a grid.
//!
//! # Module Structure
//!
//! - [`board`]: the [`Board`] orchestrator and its event outbox
//! - [`interaction`]: select-select / drag state machine
//! - [`executor`]: validated, serialized swap commits
//! - [`transition`]: completion handles for animated swaps
//! - [`event`]: outbound notifications and diagnostics
//! - [`config`]: board settings from defaults, environment, or JSON
//!
//! # Example
//!
//! ```
//! use tui_gems_engine::{Board, BoardConfig, BoardEvent, SwapOutcome};
//! use tui_gems_engine::types::Position;
//!
//! let config = BoardConfig {
//!     animations_enabled: false,
//!     ..BoardConfig::default()
//! };
//! let mut board = Board::new(config).unwrap();
//!
//! let a = board.grid().id_at(Position::new(2, 3)).unwrap();
//! let b = board.grid().id_at(Position::new(2, 4)).unwrap();
//! assert_eq!(board.attempt_swap(a, b).unwrap(), SwapOutcome::Committed);
//! assert_eq!(board.grid().position_of(a), Some(Position::new(2, 4)));
//!
//! let events = board.take_events();
//! assert!(matches!(events.last(), Some(BoardEvent::SwapCommitted { .. })));
//! ```

pub mod board;
pub mod config;
pub mod event;
pub mod executor;
pub mod interaction;
pub mod transition;

pub use tui_gems_core as core;
pub use tui_gems_types as types;

pub use board::{Board, EngineError};
pub use config::{BoardConfig, ConfigError};
pub use event::{AbortReason, BoardEvent, Diagnostic, DiagnosticKind};
pub use executor::{SwapExecutor, SwapOutcome};
pub use interaction::{Intent, Interaction, InteractionState};
pub use transition::{CommitCause, TransitionHandle, TransitionRequest};
