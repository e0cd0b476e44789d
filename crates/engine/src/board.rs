//! Board - owns the grid and routes pointer input through the interaction
//! state machine and the swap executor.
//!
//! There is no global board: every front-end holds its own `Board` and talks
//! to it through `&mut self`. Outbound notifications are queued and drained
//! with [`Board::take_events`].

use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::{BoardConfig, ConfigError};
use crate::core::{BoardError, Grid, SimpleRng};
use crate::event::{AbortReason, BoardEvent, Diagnostic, DiagnosticKind};
use crate::executor::{SwapExecutor, SwapOutcome};
use crate::interaction::{Intent, Interaction, InteractionState};
use crate::transition::CommitCause;
use crate::types::{Direction, InteractionMode, PieceId, Vec2};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    grid: Grid,
    interaction: Interaction,
    executor: SwapExecutor,
    rng: SimpleRng,
    events: Vec<BoardEvent>,
}

impl Board {
    /// Create a board and populate it from the configured seed
    pub fn new(config: BoardConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut grid = Grid::new(config.rows, config.columns)?;
        let mut rng = SimpleRng::new(config.seed);
        grid.populate(&mut rng);

        info!(
            rows = config.rows,
            columns = config.columns,
            mode = config.mode.as_str(),
            animations = config.animations_enabled,
            "board created"
        );
        Ok(Self::assemble(config, grid, rng))
    }

    /// Create a board around an existing grid (dimensions come from the grid)
    pub fn with_grid(mut config: BoardConfig, grid: Grid) -> Result<Self, EngineError> {
        config.rows = grid.rows();
        config.columns = grid.columns();
        config.validate()?;
        grid.check_consistency()?;
        let rng = SimpleRng::new(config.seed);
        Ok(Self::assemble(config, grid, rng))
    }

    fn assemble(config: BoardConfig, grid: Grid, rng: SimpleRng) -> Self {
        Self {
            interaction: Interaction::new(config.mode, config.drag_threshold),
            executor: SwapExecutor::new(
                config.animations_enabled,
                config.swap_duration_ms,
                config.transition_timeout_ms,
            ),
            config,
            grid,
            rng,
            events: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn state(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Piece currently selected or being dragged
    pub fn selected(&self) -> Option<PieceId> {
        self.interaction.subject()
    }

    /// True while a swap waits for its visual transition
    pub fn is_busy(&self) -> bool {
        self.executor.is_busy()
    }

    pub fn animations_enabled(&self) -> bool {
        self.executor.animations_enabled()
    }

    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.config.animations_enabled = enabled;
        self.executor.set_animations_enabled(enabled);
    }

    /// Switch interaction mode; any gesture in progress is dropped
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.config.mode = mode;
        if let Some(piece) = self.interaction.set_mode(mode) {
            self.events.push(BoardEvent::Deselected { piece });
        }
        info!(mode = mode.as_str(), "interaction mode changed");
    }

    /// Full-board reset: drop every piece and repopulate
    ///
    /// Refused while a swap is in flight, since its transition cannot be cancelled.
    pub fn reset(&mut self) -> Result<(), BoardError> {
        if self.executor.is_busy() {
            return Err(BoardError::SwapInFlight);
        }
        if let Some(piece) = self.interaction.reset() {
            self.events.push(BoardEvent::Deselected { piece });
        }
        self.grid.populate(&mut self.rng);
        info!(generation = self.grid.generation(), "board reset");
        Ok(())
    }

    /// Drain queued notifications
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pointer pressed on `piece` at `point`
    pub fn pointer_down(&mut self, piece: PieceId, point: Vec2) -> Result<(), BoardError> {
        if self.executor.is_busy() {
            debug!(%piece, "pointer down rejected, swap in flight");
            return Err(BoardError::SwapInFlight);
        }

        if let Some(p) = self.grid.piece(piece) {
            debug!(%piece, slot = %p.position(), kind = p.kind().as_str(), "pointer down");
        }

        let intent = self.interaction.pointer_down(&self.grid, piece, point);
        self.apply(intent)
    }

    /// Pointer released; `piece` is the piece the press started on
    pub fn pointer_up(&mut self, piece: PieceId, point: Vec2) -> Result<(), BoardError> {
        if self.executor.is_busy() {
            debug!(%piece, "pointer up rejected, swap in flight");
            return Err(BoardError::SwapInFlight);
        }

        let intent = self.interaction.pointer_up(&self.grid, piece, point);
        self.apply(intent)
    }

    /// Swap two pieces directly (no gesture)
    ///
    /// Any selection or drag in progress is dropped and reported as `Deselected`.
    pub fn attempt_swap(&mut self, a: PieceId, b: PieceId) -> Result<SwapOutcome, BoardError> {
        if !self.executor.is_busy() {
            if let Some(piece) = self.interaction.reset() {
                self.events.push(BoardEvent::Deselected { piece });
            }
        }
        let result = self.executor.attempt_swap(&mut self.grid, a, b, &mut self.events);
        self.surface(result)
    }

    /// Swap `piece` with its neighbour in `direction`
    ///
    /// A direction that leads off the board aborts the gesture without error.
    pub fn swap_toward(&mut self, piece: PieceId, direction: Direction) -> Result<SwapOutcome, BoardError> {
        let from = self
            .grid
            .position_of(piece)
            .ok_or(BoardError::StaleEvent(piece))?;

        let Some(target) = self.grid.neighbor(from, direction) else {
            let reason = AbortReason::OffBoard { direction };
            self.events.push(BoardEvent::GestureAborted { piece, reason });
            return Ok(SwapOutcome::Aborted(reason));
        };

        let other = match self.grid.id_at(target) {
            Some(other) => other,
            None => {
                let err = BoardError::inconsistent(format!("neighbour slot {} of {} is empty", target, from));
                return self.surface(Err(err));
            }
        };
        self.attempt_swap(piece, other)
    }

    /// Advance the frame clock; commits a parked swap once its transition completes
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<Option<CommitCause>, BoardError> {
        let result = self
            .executor
            .poll_transition(&mut self.grid, elapsed_ms, &mut self.events);
        self.surface(result)
    }

    /// Wait for a parked swap to commit
    pub async fn settle(&mut self) -> Result<Option<CommitCause>, BoardError> {
        let result = self
            .executor
            .finish_transition(&mut self.grid, &mut self.events)
            .await;
        self.surface(result)
    }

    fn apply(&mut self, intent: Result<Intent, BoardError>) -> Result<(), BoardError> {
        match self.surface(intent)? {
            Intent::None => {}
            Intent::Select(piece) => {
                if let Some(slot) = self.grid.position_of(piece) {
                    self.events.push(BoardEvent::Selected { piece, slot });
                }
            }
            Intent::Deselect(piece) => {
                self.events.push(BoardEvent::Deselected { piece });
            }
            Intent::Reselect { previous, piece } => {
                self.events.push(BoardEvent::Deselected { piece: previous });
                if let Some(slot) = self.grid.position_of(piece) {
                    self.events.push(BoardEvent::Selected { piece, slot });
                }
            }
            Intent::Abort { piece, reason } => {
                debug!(%piece, reason = reason.as_str(), "gesture aborted");
                self.events.push(BoardEvent::GestureAborted { piece, reason });
            }
            Intent::Swap(a, b) => {
                self.attempt_swap(a, b)?;
            }
        }
        Ok(())
    }

    /// Escalate consistency failures; pass everything else through untouched.
    fn surface<T>(&mut self, result: Result<T, BoardError>) -> Result<T, BoardError> {
        if let Err(BoardError::InconsistentState(message)) = &result {
            let dump = serde_json::to_string(&self.grid.snapshot()).ok();
            error!(%message, grid = %self.grid.snapshot(), "board consistency failure");
            self.events.push(BoardEvent::Diagnostic(Diagnostic {
                kind: DiagnosticKind::InconsistentState,
                message: message.clone(),
                dump,
            }));
            if let Some(piece) = self.interaction.reset() {
                self.events.push(BoardEvent::Deselected { piece });
            }
        }
        result
    }
}
