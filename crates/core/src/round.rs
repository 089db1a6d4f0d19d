//! Round controller - one game session
//!
//! Ties the board, the rotation system, the piece generator and scoring
//! together into a single-writer state machine:
//!
//! ```text
//! Ready --start--> Active <--> Locking --lock+spawn--> Active | GameOver
//!                    \            /
//!                     `- Paused -'
//! ```
//!
//! Every stimulus (a command or a time advance) runs to completion before the
//! next one is accepted. Blocked moves are reported as
//! [`CommandOutcome::Rejected`] and leave the state untouched.

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::RoundConfig;
use crate::piece::Piece;
use crate::rng::PieceGenerator;
use crate::rotation;
use crate::scoring::{drop_points, level_for_lines, line_clear_points};
use crate::snapshot::{PieceSnapshot, RoundSnapshot};
use crate::types::{Command, ContractError, LockEvent, PieceKind, TurnDirection};

/// Phase of the round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Created, first piece not spawned yet
    Ready,
    /// A piece is falling
    Active,
    /// The piece has landed and is about to lock (persists only with a lock delay)
    Locking,
    /// Terminal until reset
    GameOver,
    /// Frozen by the driver
    Paused,
}

/// Result of a single command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The active piece moved, rotated or was held
    Applied,
    /// The active piece was locked (and the next one spawned)
    Locked,
    /// The move was illegal; nothing changed
    Rejected,
    /// The current phase does not accept commands
    Ignored,
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct RoundState {
    config: RoundConfig,
    board: Board,
    generator: PieceGenerator,
    active: Option<Piece>,
    next: PieceKind,
    hold: Option<PieceKind>,
    can_hold: bool,
    score: u32,
    lines: u32,
    level: u32,
    gravity_interval_ms: u32,
    phase: Phase,
    /// Phase to return to when unpausing
    resume_phase: Phase,
    gravity_timer_ms: u32,
    lock_timer_ms: u32,
    lock_resets: u8,
    last_move_was_rotation: bool,
    /// Sessions started by `reset` (0 for the first)
    session: u32,
    last_event: Option<LockEvent>,
}

impl RoundState {
    /// Create a round in `Ready` with a validated configuration
    pub fn new(config: RoundConfig) -> Result<Self, ContractError> {
        config.validate()?;
        Ok(Self::build(config, 0))
    }

    /// Create a round with the default configuration and the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self::build(RoundConfig::with_seed(seed), 0)
    }

    fn build(config: RoundConfig, session: u32) -> Self {
        let mut generator =
            PieceGenerator::new(config.randomizer, config.seed.wrapping_add(session));
        let next = generator.draw();

        Self {
            config,
            board: Board::new(),
            generator,
            active: None,
            next,
            hold: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: 1,
            gravity_interval_ms: config.gravity.interval_ms(1),
            phase: Phase::Ready,
            resume_phase: Phase::Active,
            gravity_timer_ms: 0,
            lock_timer_ms: 0,
            lock_resets: 0,
            last_move_was_rotation: false,
            session,
            last_event: None,
        }
    }

    /// Spawn the first piece (`Ready -> Active`). Returns false in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        info!(
            "[Round] session {} started (seed {}, {:?})",
            self.session,
            self.config.seed,
            self.generator.randomizer()
        );
        self.spawn_next();
        true
    }

    /// Discard the current session and start a fresh one
    pub fn reset(&mut self) {
        let session = self.session.wrapping_add(1);
        *self = Self::build(self.config, session);
        self.start();
    }

    /// Freeze gravity and commands. Returns false unless a piece was in play.
    pub fn pause(&mut self) -> bool {
        match self.phase {
            Phase::Active | Phase::Locking => {
                self.resume_phase = self.phase;
                self.phase = Phase::Paused;
                debug!("[Round] paused");
                true
            }
            _ => false,
        }
    }

    /// Return to the phase that was paused
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = self.resume_phase;
        debug!("[Round] resumed into {:?}", self.phase);
        true
    }

    /// Pause if a piece is in play, resume if paused
    pub fn toggle_pause(&mut self) -> bool {
        if self.phase == Phase::Paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Apply one player command
    pub fn apply_command(&mut self, command: Command) -> CommandOutcome {
        if !matches!(self.phase, Phase::Active | Phase::Locking) {
            trace!("[Round] {:?} ignored in {:?}", command, self.phase);
            return CommandOutcome::Ignored;
        }

        let outcome = match command {
            Command::Left => self.shift(-1),
            Command::Right => self.shift(1),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::RotateCw => self.rotate(TurnDirection::Clockwise),
            Command::RotateCcw => self.rotate(TurnDirection::CounterClockwise),
            Command::Hold => self.hold(),
        };

        if outcome == CommandOutcome::Rejected {
            trace!("[Round] {:?} rejected", command);
        }
        outcome
    }

    /// Advance the round clock. Returns true if gravity moved or locked a piece.
    pub fn advance_time(&mut self, delta_ms: u32) -> bool {
        match self.phase {
            Phase::Active => self.apply_gravity(delta_ms),
            Phase::Locking => {
                self.lock_timer_ms = self.lock_timer_ms.saturating_add(delta_ms);
                if self.lock_timer_ms >= self.config.lock_delay_ms {
                    self.lock_active();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn apply_gravity(&mut self, delta_ms: u32) -> bool {
        self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(delta_ms);

        let mut stepped = false;
        while self.phase == Phase::Active && self.gravity_timer_ms >= self.gravity_interval_ms {
            self.gravity_timer_ms -= self.gravity_interval_ms;
            let Some(active) = self.active else {
                break;
            };
            stepped = true;

            let moved = active.translated(0, 1);
            if self.board.is_legal(&moved) {
                self.active = Some(moved);
                self.last_move_was_rotation = false;
                trace!("[Round] gravity -> y={}", moved.y());
            } else {
                self.land();
                break;
            }
        }
        stepped
    }

    fn shift(&mut self, dx: i8) -> CommandOutcome {
        let Some(active) = self.active else {
            return CommandOutcome::Ignored;
        };

        let moved = active.translated(dx, 0);
        if !self.board.is_legal(&moved) {
            return CommandOutcome::Rejected;
        }

        self.active = Some(moved);
        self.last_move_was_rotation = false;
        self.after_move_while_landed();
        CommandOutcome::Applied
    }

    fn soft_drop(&mut self) -> CommandOutcome {
        let Some(active) = self.active else {
            return CommandOutcome::Ignored;
        };

        let moved = active.translated(0, 1);
        if !self.board.is_legal(&moved) {
            return self.land();
        }

        self.active = Some(moved);
        self.score = self.score.saturating_add(drop_points(1, false));
        self.gravity_timer_ms = 0;
        self.last_move_was_rotation = false;
        CommandOutcome::Applied
    }

    /// Drop straight down and lock. A drop that moves the piece counts as a
    /// translation, so a rotation before it no longer qualifies for a T-spin.
    fn hard_drop(&mut self) -> CommandOutcome {
        let Some(active) = self.active else {
            return CommandOutcome::Ignored;
        };

        let distance = self.board.hard_drop_distance(&active);
        if distance > 0 {
            self.active = Some(active.translated(0, distance as i8));
            self.last_move_was_rotation = false;
        }
        self.score = self.score.saturating_add(drop_points(distance, true));

        self.lock_active();
        CommandOutcome::Locked
    }

    fn rotate(&mut self, direction: TurnDirection) -> CommandOutcome {
        let Some(active) = self.active else {
            return CommandOutcome::Ignored;
        };

        match rotation::try_rotate(&self.board, &active, direction) {
            Some(rotated) => {
                trace!(
                    "[Round] {:?} rotated to {:?} with kick #{}",
                    active.kind(),
                    rotated.piece.rotation(),
                    rotated.kick_index
                );
                self.active = Some(rotated.piece);
                self.last_move_was_rotation = true;
                self.after_move_while_landed();
                CommandOutcome::Applied
            }
            None => CommandOutcome::Rejected,
        }
    }

    fn hold(&mut self) -> CommandOutcome {
        if !self.can_hold {
            return CommandOutcome::Rejected;
        }
        let Some(active) = self.active else {
            return CommandOutcome::Ignored;
        };

        match self.hold.replace(active.kind()) {
            None => {
                debug!("[Round] hold {:?}", active.kind());
                self.spawn_next();
            }
            Some(held) => {
                debug!("[Round] swap {:?} for held {:?}", active.kind(), held);
                self.spawn_piece(Piece::spawn(held));
            }
        }
        self.can_hold = false;
        CommandOutcome::Applied
    }

    /// The piece could not descend: lock now, or start the lock delay
    fn land(&mut self) -> CommandOutcome {
        if self.config.locks_immediately() {
            self.lock_active();
            return CommandOutcome::Locked;
        }
        if self.phase != Phase::Locking {
            self.phase = Phase::Locking;
            self.lock_timer_ms = 0;
            self.gravity_timer_ms = 0;
        }
        CommandOutcome::Rejected
    }

    /// A successful move or rotation during the lock delay either lifts the
    /// piece back into free fall or restarts the lock timer (limited per piece)
    fn after_move_while_landed(&mut self) {
        if self.phase != Phase::Locking {
            return;
        }
        let Some(active) = self.active else {
            return;
        };

        if !self.board.is_grounded(&active) {
            self.phase = Phase::Active;
            self.lock_timer_ms = 0;
        } else if self.lock_resets < self.config.lock_reset_limit {
            self.lock_timer_ms = 0;
            self.lock_resets += 1;
        }
    }

    /// T-spin: a T locked right after a rotation with at least three of the
    /// four corners of its 3x3 box filled (walls and floor count as filled)
    fn is_tspin(&self, piece: &Piece) -> bool {
        if piece.kind() != PieceKind::T || !self.last_move_was_rotation {
            return false;
        }
        let (x, y) = (piece.x(), piece.y());
        [(x, y), (x + 2, y), (x, y + 2), (x + 2, y + 2)]
            .iter()
            .filter(|&&(cx, cy)| self.board.is_solid(cx, cy))
            .count()
            >= 3
    }

    /// Lock the active piece, clear lines, score, and spawn the next piece
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.phase = Phase::Locking;

        let tspin = self.is_tspin(&piece);
        if !self.board.lock(&piece) {
            debug!("[Round] {:?} locked partly above the grid", piece.kind());
        }

        let cleared = self.board.clear_lines().len();
        let points = line_clear_points(cleared, tspin, self.level);
        self.score = self.score.saturating_add(points);
        self.lines += cleared as u32;
        self.level = level_for_lines(self.lines);
        self.gravity_interval_ms = self.config.gravity.interval_ms(self.level);

        debug!(
            "[Round] locked {:?} at ({}, {}): {} line(s), tspin={}, +{} (level {})",
            piece.kind(),
            piece.x(),
            piece.y(),
            cleared,
            tspin,
            points,
            self.level
        );

        self.spawn_next();

        self.last_event = Some(LockEvent {
            kind: piece.kind(),
            lines_cleared: cleared as u32,
            tspin,
            points,
            game_over: self.phase == Phase::GameOver,
        });
    }

    /// Promote the queued kind to the active piece and refill the queue
    fn spawn_next(&mut self) {
        let kind = self.next;
        self.next = self.generator.draw();
        self.can_hold = true;
        self.spawn_piece(Piece::spawn(kind));
    }

    fn spawn_piece(&mut self, piece: Piece) {
        self.active = Some(piece);
        self.gravity_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.lock_resets = 0;
        self.last_move_was_rotation = false;

        if self.board.is_legal(&piece) {
            self.phase = Phase::Active;
            debug!("[Round] spawned {:?}, next {:?}", piece.kind(), self.next);
        } else {
            self.phase = Phase::GameOver;
            info!(
                "[Round] game over: {:?} cannot spawn (score {}, lines {}, level {})",
                piece.kind(),
                self.score,
                self.lines,
                self.level
            );
        }
    }

    /// Put a specific piece in play, e.g. for puzzles or scripted tests.
    ///
    /// Only accepted while a piece is in play and if `piece` is legal.
    pub fn replace_active(&mut self, piece: Piece) -> bool {
        if !matches!(self.phase, Phase::Active | Phase::Locking) || !self.board.is_legal(&piece) {
            return false;
        }
        self.active = Some(piece);
        self.phase = Phase::Active;
        self.lock_timer_ms = 0;
        self.last_move_was_rotation = false;
        true
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Configuration the round was created with
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Locked cells
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable grid access for scripted setups. Callers keep the active piece legal.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Piece in play, if any
    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Where the active piece would land
    pub fn ghost(&self) -> Option<Piece> {
        self.active.map(|piece| self.board.ghost_drop(&piece))
    }

    /// Kind that spawns next
    pub fn next(&self) -> PieceKind {
        self.next
    }

    /// Kind set aside by hold, if any
    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    /// Whether hold is available for the current piece
    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Total points this session
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total lines cleared this session
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Current level (starts at 1)
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Milliseconds per gravity step at the current level
    pub fn gravity_interval_ms(&self) -> u32 {
        self.gravity_interval_ms
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the round has topped out
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Whether the round is paused
    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    /// Session counter (0 for the first, +1 per reset)
    pub fn session(&self) -> u32 {
        self.session
    }

    /// Fill a caller-owned snapshot without allocating
    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        self.board.write_tags(&mut out.grid);
        out.active = self.active.map(PieceSnapshot::from);
        out.ghost_y = self.ghost().map(|ghost| ghost.y());
        out.next = self.next;
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.gravity_interval_ms = self.gravity_interval_ms;
        out.phase = self.phase;
        out.game_over = self.is_game_over();
        out.paused = self.is_paused();
    }

    /// Allocate a fresh snapshot
    pub fn snapshot(&self) -> RoundSnapshot {
        let mut snapshot = RoundSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::build(RoundConfig::default(), 0)
    }
}
