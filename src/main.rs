//! Terminal gem board runner (default binary).
//!
//! Mouse drags or clicks swap gems, the keyboard drives a cursor. Rendering
//! uses the framebuffer renderer from `tui_gems::term`.
//!
//! Environment:
//! - `GEMS_CONFIG`: path to a JSON board config (otherwise `GEMS_*` variables)
//! - `GEMS_LOG_PATH`: write `tracing` output to this file (`RUST_LOG` filters)

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tui_gems::core::BoardError;
use tui_gems::engine::{Board, BoardConfig, BoardEvent, SwapOutcome};
use tui_gems::input::{handle_key_event, should_quit, BoardCommand, Cursor, PointerAction, PointerHandler};
use tui_gems::term::{BoardView, FrameBuffer, Overlay, TerminalRenderer, TransitionPlayer, Viewport};
use tui_gems::types::{InteractionMode, PieceId, TICK_MS};

fn main() -> Result<()> {
    init_logging()?;
    let config = load_config()?;
    let board = Board::new(config).context("creating board")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = App::new(board).run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("GEMS_LOG_PATH") else {
        return Ok(());
    };
    let log_file = std::fs::File::create(&path).with_context(|| format!("creating log file {path}"))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn load_config() -> Result<BoardConfig> {
    let config = match std::env::var("GEMS_CONFIG") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            BoardConfig::from_json_str(&text).with_context(|| format!("parsing {path}"))?
        }
        Err(_) => BoardConfig::from_env(),
    };
    config.validate()?;
    info!(?config, "configuration loaded");
    Ok(config)
}

struct App {
    board: Board,
    player: TransitionPlayer,
    pointer: PointerHandler,
    cursor: Cursor,
    /// Piece the active mouse press started on
    pressed: Option<PieceId>,
    status: String,
}

impl App {
    fn new(board: Board) -> Self {
        let view = BoardView::default();
        let (rows, columns) = (board.grid().rows(), board.grid().columns());
        Self {
            pointer: PointerHandler::new(view.layout(Viewport::new(80, 24), rows, columns)),
            cursor: Cursor::new(rows, columns),
            player: TransitionPlayer::new(),
            pressed: None,
            status: String::new(),
            board,
        }
    }

    fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let view = BoardView::default();
        let mut fb = FrameBuffer::new(0, 0);

        let tick_duration = Duration::from_millis(TICK_MS as u64);
        let mut last_tick = Instant::now();

        loop {
            // Render.
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let overlay = Overlay {
                cursor: Some(self.cursor.position()),
                status: Some(self.status.as_str()),
            };
            let layout = view.render_into(&self.board, &self.player, overlay, Viewport::new(w, h), &mut fb);
            self.pointer.set_layout(layout);
            term.draw_swap(&mut fb)?;

            // Input with timeout until next tick.
            let timeout = tick_duration.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if should_quit(key) {
                            info!("quit requested");
                            self.shutdown();
                            return Ok(());
                        }
                        if let Some(command) = handle_key_event(key) {
                            self.apply_command(command);
                        }
                    }
                    Event::Mouse(mouse) => {
                        for action in self.pointer.handle_mouse(mouse) {
                            self.apply_pointer(action);
                        }
                    }
                    Event::Resize(..) => term.invalidate(),
                    _ => {}
                }
            }

            // Tick.
            if last_tick.elapsed() >= tick_duration {
                last_tick = Instant::now();
                self.player.tick(TICK_MS);
                let ticked = self.board.tick(TICK_MS);
                self.report(ticked);
                self.drain_events();
            }
        }
    }

    /// Land any swap still animating so the board ends consistent.
    fn shutdown(&mut self) {
        if self.player.finish_all() > 0 {
            let settled = self.board.tick(0);
            debug!(?settled, "in-flight swap settled on quit");
        }
    }

    fn apply_pointer(&mut self, action: PointerAction) {
        match action {
            PointerAction::Press { slot, point } => {
                let Some(piece) = self.board.grid().id_at(slot) else {
                    return;
                };
                self.cursor.jump(slot);
                self.pressed = Some(piece);
                let result = self.board.pointer_down(piece, point);
                if result.is_err() {
                    self.pressed = None;
                }
                self.report(result);
            }
            PointerAction::Release { point } => {
                if self.board.mode() == InteractionMode::SelectSelect {
                    self.pressed = None;
                    return;
                }
                if let Some(piece) = self.pressed.take() {
                    let result = self.board.pointer_up(piece, point);
                    self.report(result);
                }
            }
        }
        self.drain_events();
    }

    fn apply_command(&mut self, command: BoardCommand) {
        match command {
            BoardCommand::MoveCursor(dir) => {
                self.cursor.step(dir);
            }
            BoardCommand::SwapToward(dir) => {
                if let Some(piece) = self.board.grid().id_at(self.cursor.position()) {
                    let result = self.board.swap_toward(piece, dir);
                    if matches!(result, Ok(SwapOutcome::Committed | SwapOutcome::Pending)) {
                        self.cursor.step(dir);
                    }
                    self.report(result);
                }
            }
            BoardCommand::Select => {
                if self.board.mode() != InteractionMode::SelectSelect {
                    self.status = "keyboard selection needs select mode (m)".to_string();
                    return;
                }
                let slot = self.cursor.position();
                if let Some(piece) = self.board.grid().id_at(slot) {
                    let point = self.pointer.layout().slot_center(slot);
                    let result = self.board.pointer_down(piece, point);
                    self.report(result);
                }
            }
            BoardCommand::Reset => {
                let result = self.board.reset();
                if result.is_ok() {
                    self.status = "board reset".to_string();
                }
                self.report(result);
            }
            BoardCommand::ToggleMode => {
                self.pointer.cancel();
                self.pressed = None;
                self.board.set_mode(self.board.mode().toggled());
                self.status = format!("mode: {}", self.board.mode().as_str());
            }
            BoardCommand::ToggleAnimations => {
                let enabled = !self.board.animations_enabled();
                self.board.set_animations_enabled(enabled);
                self.status = format!("animations {}", if enabled { "on" } else { "off" });
            }
        }
        self.drain_events();
    }

    /// Show recoverable failures in the status line; consistency failures
    /// already arrive as diagnostics.
    fn report<T>(&mut self, result: Result<T, BoardError>) {
        match result {
            Ok(_) => {}
            Err(err) if err.is_recoverable() => {
                debug!(%err, "input rejected");
                self.status = err.to_string();
            }
            Err(err) => warn!(%err, "board operation failed"),
        }
    }

    fn drain_events(&mut self) {
        for event in self.board.take_events() {
            match event {
                BoardEvent::TransitionRequested(request) => self.player.start(request),
                BoardEvent::SwapCommitted { a, b, .. } => {
                    self.status = format!("swapped {a} and {b}");
                }
                BoardEvent::GestureAborted { reason, .. } => {
                    self.status = format!("no swap: {}", reason.as_str());
                }
                BoardEvent::Selected { slot, .. } => self.cursor.jump(slot),
                BoardEvent::Deselected { .. } => {}
                BoardEvent::Diagnostic(diagnostic) => {
                    self.status = diagnostic.message;
                }
            }
        }
    }
}
