//! Terminal input module (board-facing).
//!
//! This module is independent of any rendering code. It maps `crossterm`
//! key events into [`BoardCommand`]s and mouse events into pointer presses
//! and releases in board pointer space. Which piece sits under a press is
//! the caller's business; input only knows slots.

pub mod handler;
pub mod layout;
pub mod map;

pub use tui_gems_types as types;

pub use handler::{Cursor, PointerAction, PointerHandler};
pub use layout::BoardLayout;
pub use map::{handle_key_event, should_quit, BoardCommand};
