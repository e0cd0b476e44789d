//! Terminal front-end for the gem board.
//!
//! A small, game-oriented rendering layer: the board is drawn into a plain
//! framebuffer which is then diffed and flushed to the terminal. No widget
//! toolkit is involved.
//!
//! - [`board_view`] turns a [`Board`](engine::Board) into cells
//! - [`animation`] plays swap transitions and fires their completion handles
//! - [`renderer`] owns the terminal session

pub mod animation;
pub mod board_view;
pub mod fb;
pub mod renderer;

pub use tui_gems_engine as engine;
pub use tui_gems_input as input;
pub use tui_gems_types as types;

pub use animation::TransitionPlayer;
pub use board_view::{gem_color, BoardView, Overlay, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
