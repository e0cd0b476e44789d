//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board logic, interaction engine, terminal rendering).
//!
//! # Board Dimensions
//!
//! Default board dimensions:
//!
//! - **Rows**: 5 (indexed 0-4, row 0 is the top row)
//! - **Columns**: 7 (indexed 0-6, column 0 is the left column)
//!
//! # Coordinate Spaces
//!
//! Two coordinate spaces meet at the board boundary:
//!
//! | Space | Type | Orientation |
//! |-------|------|-------------|
//! | Slot | [`Position`] | `row` grows downward, `col` grows rightward |
//! | Pointer | [`Vec2`] | `x` grows rightward, `y` grows **upward** |
//!
//! A drag with a positive `y` delta therefore resolves to [`Direction::Up`],
//! which moves towards row `row - 1`.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `DEFAULT_SWAP_DURATION_MS` | 250 | Visual swap transition length |
//! | `DEFAULT_TRANSITION_TIMEOUT_MS` | 2000 | Watchdog for a transition that never completes |
//!
//! # Examples
//!
//! ```
//! use tui_gems_types::{Direction, GemKind, Position, Vec2, DEFAULT_COLUMNS, DEFAULT_ROWS};
//!
//! // Parse a gem kind (case-insensitive)
//! assert_eq!(GemKind::from_str("violet"), Some(GemKind::Violet));
//! assert_eq!(GemKind::Violet.index(), 2);
//!
//! // Step a slot one cell in a direction
//! let pos = Position::new(0, 3);
//! assert_eq!(pos.step(Direction::Up), Position::new(-1, 3));
//!
//! // Pointer deltas are plain vectors
//! let delta = Vec2::new(0.0, 100.0) - Vec2::ZERO;
//! assert_eq!(delta.length(), 100.0);
//!
//! assert_eq!(DEFAULT_ROWS, 5);
//! assert_eq!(DEFAULT_COLUMNS, 7);
//! ```

use std::ops::{Add, Sub};

/// Default number of rows (5)
pub const DEFAULT_ROWS: u8 = 5;

/// Default number of columns (7)
pub const DEFAULT_COLUMNS: u8 = 7;

/// Default minimum drag length before a gesture counts as a swipe.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 0.5;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Duration of the visual swap transition (250ms)
pub const DEFAULT_SWAP_DURATION_MS: u32 = 250;

/// Watchdog for a transition whose completion signal never arrives (2000ms)
pub const DEFAULT_TRANSITION_TIMEOUT_MS: u32 = 2000;

/// Number of distinct gem kinds
pub const GEM_KIND_COUNT: usize = 5;

/// The gem kinds a slot can hold
///
/// The numeric index (0-4) is stable and is what debug dumps print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GemKind {
    Green,
    Red,
    Violet,
    White,
    Yellow,
}

impl GemKind {
    /// All kinds in index order
    pub const ALL: [GemKind; GEM_KIND_COUNT] = [
        GemKind::Green,
        GemKind::Red,
        GemKind::Violet,
        GemKind::White,
        GemKind::Yellow,
    ];

    /// Stable numeric index of the kind
    pub fn index(&self) -> u8 {
        match self {
            GemKind::Green => 0,
            GemKind::Red => 1,
            GemKind::Violet => 2,
            GemKind::White => 3,
            GemKind::Yellow => 4,
        }
    }

    /// Look up a kind by numeric index
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_gems_types::GemKind;
    ///
    /// assert_eq!(GemKind::from_index(4), Some(GemKind::Yellow));
    /// assert_eq!(GemKind::from_index(5), None);
    /// ```
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Parse gem kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "green" | "g" => Some(GemKind::Green),
            "red" | "r" => Some(GemKind::Red),
            "violet" | "v" => Some(GemKind::Violet),
            "white" | "w" => Some(GemKind::White),
            "yellow" | "y" => Some(GemKind::Yellow),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GemKind::Green => "green",
            GemKind::Red => "red",
            GemKind::Violet => "violet",
            GemKind::White => "white",
            GemKind::Yellow => "yellow",
        }
    }
}

/// A slot address on the board
///
/// Coordinates are signed so that stepping off an edge produces a
/// representable (but out-of-bounds) position instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// The slot one cell away in `dir`
    pub fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.delta();
        Self {
            row: self.row.saturating_add(dr),
            col: self.col.saturating_add(dc),
        }
    }

    /// Manhattan distance between two slots
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_gems_types::Position;
    ///
    /// assert_eq!(Position::new(0, 0).manhattan(Position::new(4, 6)), 10);
    /// assert_eq!(Position::new(2, 3).manhattan(Position::new(2, 4)), 1);
    /// ```
    pub fn manhattan(self, other: Position) -> u16 {
        let dr = (self.row as i16 - other.row as i16).unsigned_abs();
        let dc = (self.col as i16 - other.col as i16).unsigned_abs();
        dr + dc
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four cardinal swap directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, col)` offset of one step in this direction
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_gems_types::Direction;
    ///
    /// assert_eq!(Direction::Up.delta(), (-1, 0));
    /// assert_eq!(Direction::Right.delta(), (0, 1));
    /// ```
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parse direction from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "up" | "u", "down" | "d", "left" | "l", "right" | "r"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// 2D pointer-space vector (y-up)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length
    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Linear interpolation towards `other` (`t` is clamped to `[0, 1]`)
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        Vec2 {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Opaque piece identity
///
/// Ids are never reused for the lifetime of a grid, including across resets,
/// so a stale id can never alias a newer piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How pointer events are turned into swap intents
///
/// - **SelectSelect**: click one gem, then click a neighbour
/// - **Drag**: press on a gem and release after dragging towards a neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionMode {
    SelectSelect,
    #[default]
    Drag,
}

impl InteractionMode {
    /// Parse mode from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_gems_types::InteractionMode;
    ///
    /// assert_eq!(InteractionMode::from_str("drag"), Some(InteractionMode::Drag));
    /// assert_eq!(InteractionMode::from_str("selectSelect"), Some(InteractionMode::SelectSelect));
    /// assert_eq!(InteractionMode::from_str("select"), Some(InteractionMode::SelectSelect));
    /// assert_eq!(InteractionMode::from_str("hover"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drag" | "swipe" => Some(InteractionMode::Drag),
            "selectselect" | "select-select" | "select" | "click" => {
                Some(InteractionMode::SelectSelect)
            }
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::SelectSelect => "selectSelect",
            InteractionMode::Drag => "drag",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            InteractionMode::SelectSelect => InteractionMode::Drag,
            InteractionMode::Drag => InteractionMode::SelectSelect,
        }
    }
}
