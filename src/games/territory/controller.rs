//! Turn orchestration: ask, validate, apply, advance.
//!
//! The controller owns the board and one mover per seat. Each turn it asks
//! the active seat's mover for a cell, validates the claim against the
//! board, and either applies it or feeds the failure back to the same mover
//! for another attempt. Automated movers get `max_retries` retries beyond
//! the first attempt; interactive movers may retry indefinitely.

use super::board::Board;
use super::error::{BoardError, GameError};
use super::mover::{Mover, MoverError, MoverKind};
use super::outcome::GameOutcome;
use super::scoring::{self, ScoringMode};
use super::seats::{BoardView, Roster, Seat};
use super::types::{Claim, Coord, PlayerId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// Default retries granted to automated movers after their first attempt.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Where the controller is in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the given seat's mover.
    AwaitingMove(PlayerId),
    /// Validating and applying the given seat's proposal.
    Applying(PlayerId),
    /// Claim applied; choosing the next seat or ending the game.
    AdvancingTurn(PlayerId),
    /// Board is full. Scores are final.
    GameOver,
    /// An automated mover exhausted its retries, or input closed.
    Aborted,
}

impl TurnPhase {
    /// Seat whose turn it is, if the game is still running.
    pub fn active(self) -> Option<PlayerId> {
        match self {
            TurnPhase::AwaitingMove(p) | TurnPhase::Applying(p) | TurnPhase::AdvancingTurn(p) => {
                Some(p)
            }
            TurnPhase::GameOver | TurnPhase::Aborted => None,
        }
    }
}

/// Notifications emitted while the game runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    /// A seat is being asked for a move.
    TurnStarted {
        /// The seat to move.
        player: PlayerId,
        /// 1-based attempt number within the turn.
        attempt: usize,
    },
    /// A proposal failed and will be retried (or the game aborts).
    MoveRejected {
        /// The seat whose attempt failed.
        player: PlayerId,
        /// 1-based attempt number within the turn.
        attempt: usize,
        /// Feedback text handed back to the mover.
        reason: String,
    },
    /// A claim was applied.
    ClaimApplied(Claim),
    /// The board filled up.
    GameOver(GameOutcome),
}

/// Tunables for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TurnSettings {
    /// Retries granted to automated movers after the first attempt.
    max_retries: usize,
    /// Figure reported as each player's score.
    scoring: ScoringMode,
}

impl TurnSettings {
    /// Creates settings.
    pub fn new(max_retries: usize, scoring: ScoringMode) -> Self {
        Self {
            max_retries,
            scoring,
        }
    }
}

impl Default for TurnSettings {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, ScoringMode::default())
    }
}

/// A participant as supplied by the caller: name, marker and mover.
pub struct Contestant {
    name: String,
    marker: char,
    mover: Box<dyn Mover>,
}

impl Contestant {
    /// Creates a contestant.
    pub fn new(name: impl Into<String>, marker: char, mover: Box<dyn Mover>) -> Self {
        Self {
            name: name.into(),
            marker,
            mover,
        }
    }
}

impl std::fmt::Debug for Contestant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contestant")
            .field("name", &self.name)
            .field("marker", &self.marker)
            .field("kind", &self.mover.kind())
            .finish()
    }
}

/// Failure log for the current turn.
#[derive(Debug, Default)]
struct FeedbackLog {
    text: String,
}

impl FeedbackLog {
    fn push(&mut self, reason: &str) {
        self.text.push('\n');
        self.text.push_str(reason);
    }

    fn as_option(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }
}

/// Drives a game from the first claim to a full board.
pub struct TurnController {
    board: Board,
    roster: Roster,
    movers: Vec<Box<dyn Mover>>,
    settings: TurnSettings,
    phase: TurnPhase,
    history: Vec<Claim>,
    event_tx: Option<mpsc::UnboundedSender<TurnEvent>>,
}

impl TurnController {
    /// Seats the contestants around `board`, first contestant to move.
    ///
    /// # Errors
    ///
    /// - `GameError::TooFewPlayers` for fewer than two contestants
    /// - `GameError::DuplicateMarker` if two contestants share a marker
    #[instrument(skip(board, contestants), fields(rows = board.rows(), cols = board.cols(), players = contestants.len()))]
    pub fn new(
        board: Board,
        contestants: Vec<Contestant>,
        settings: TurnSettings,
    ) -> Result<Self, GameError> {
        if contestants.len() < 2 {
            error!(count = contestants.len(), "Not enough players");
            return Err(GameError::TooFewPlayers {
                count: contestants.len(),
            });
        }

        let mut seen = HashSet::new();
        for contestant in &contestants {
            if !seen.insert(contestant.marker) {
                error!(marker = %contestant.marker, "Duplicate marker");
                return Err(GameError::DuplicateMarker {
                    marker: contestant.marker,
                });
            }
        }

        let mut seats = Vec::with_capacity(contestants.len());
        let mut movers = Vec::with_capacity(contestants.len());
        for (index, contestant) in contestants.into_iter().enumerate() {
            let kind = contestant.mover.kind();
            info!(player = %contestant.name, marker = %contestant.marker, %kind, "Seating player");
            seats.push(Seat::new(
                PlayerId::new(index),
                contestant.name,
                contestant.marker,
                kind,
            ));
            movers.push(contestant.mover);
        }

        // A board that arrives full has nothing left to play.
        let phase = if board.is_full() {
            TurnPhase::GameOver
        } else {
            TurnPhase::AwaitingMove(PlayerId::new(0))
        };

        Ok(Self {
            board,
            roster: Roster::new(seats),
            movers,
            settings,
            phase,
            history: Vec::new(),
            event_tx: None,
        })
    }

    /// Creates a fresh `rows` x `cols` board and seats the contestants.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidDimensions` if either dimension is zero,
    /// plus everything [`TurnController::new`] returns.
    pub fn with_dimensions(
        rows: usize,
        cols: usize,
        contestants: Vec<Contestant>,
        settings: TurnSettings,
    ) -> Result<Self, GameError> {
        let board = Board::new(rows, cols).map_err(|source| {
            error!(%source, "Board construction failed");
            GameError::InvalidDimensions { source }
        })?;
        Self::new(board, contestants, settings)
    }

    /// Sends turn events to `event_tx` as they happen.
    pub fn with_events(mut self, event_tx: mpsc::UnboundedSender<TurnEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The seats in turn order.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Successful claims so far.
    pub fn history(&self) -> &[Claim] {
        &self.history
    }

    /// Game settings.
    pub fn settings(&self) -> &TurnSettings {
        &self.settings
    }

    /// Renders the board with seat markers.
    pub fn render(&self) -> String {
        self.roster.render(&self.board)
    }

    /// Final results, once the board is full.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.phase != TurnPhase::GameOver {
            return None;
        }
        let territories = scoring::territories(&self.board);
        debug_assert_eq!(
            territories.values().map(|t| *t.total()).sum::<usize>(),
            self.board.owned_count(),
            "components must partition the owned cells"
        );
        Some(GameOutcome::new(
            &self.roster,
            territories,
            self.settings.scoring,
            self.history.clone(),
        ))
    }

    /// Plays turns until the board is full.
    ///
    /// # Errors
    ///
    /// Returns the fatal error that stopped the game; the board keeps every
    /// claim applied before it.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<GameOutcome, GameError> {
        info!("Starting game");
        while self.phase.active().is_some() {
            self.play_turn().await?;
        }
        self.outcome().ok_or(GameError::NotInProgress)
    }

    /// Plays one complete turn for the active seat, retrying as allowed.
    ///
    /// Returns the phase after the turn: the next seat's `AwaitingMove`,
    /// or `GameOver` when the claim filled the board.
    ///
    /// # Errors
    ///
    /// - `GameError::NotInProgress` if the game has ended
    /// - `GameError::RetryBudgetExceeded` if an automated mover keeps failing
    /// - `GameError::MoverDisconnected` if a mover's input is exhausted
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub async fn play_turn(&mut self) -> Result<TurnPhase, GameError> {
        let TurnPhase::AwaitingMove(active) = self.phase else {
            warn!("Move requested after game end");
            return Err(GameError::NotInProgress);
        };

        let index = active.index();
        let kind = self.movers[index].kind();
        let mut feedback = FeedbackLog::default();
        let mut attempt = 0;

        let claim = loop {
            attempt += 1;
            self.phase = TurnPhase::AwaitingMove(active);
            self.emit(TurnEvent::TurnStarted {
                player: active,
                attempt,
            });
            debug!(%active, attempt, "Requesting move");

            let view = BoardView::new(&self.board, &self.roster, active);
            let proposal = self.movers[index]
                .propose_move(&view, feedback.as_option())
                .await;

            self.phase = TurnPhase::Applying(active);
            let reason = match proposal {
                Ok(coord) => match self.board.claim(coord, active) {
                    Ok(()) => break Claim::new(active, coord),
                    Err(err) => self.describe_rejection(coord, &err),
                },
                Err(MoverError::InputClosed) => {
                    self.phase = TurnPhase::Aborted;
                    let player = self.roster.name(active);
                    error!(%player, "Mover input closed");
                    return Err(GameError::MoverDisconnected { player });
                }
                Err(err) => err.to_string(),
            };

            warn!(%active, attempt, %reason, "Move rejected");
            feedback.push(&reason);
            self.emit(TurnEvent::MoveRejected {
                player: active,
                attempt,
                reason,
            });

            if kind == MoverKind::Automated && attempt > self.settings.max_retries {
                self.phase = TurnPhase::Aborted;
                let player = self.roster.name(active);
                error!(%player, attempt, "Retry budget exhausted");
                return Err(GameError::RetryBudgetExceeded {
                    player,
                    attempts: attempt,
                    feedback: feedback.text,
                });
            }
        };

        info!(%claim, attempt, "Claim applied");
        self.history.push(claim);
        self.phase = TurnPhase::AdvancingTurn(active);
        self.emit(TurnEvent::ClaimApplied(claim));

        if self.board.is_full() {
            self.phase = TurnPhase::GameOver;
            info!(claims = self.history.len(), "Board full, game over");
            if let Some(outcome) = self.outcome() {
                self.emit(TurnEvent::GameOver(outcome));
            }
        } else {
            self.phase = TurnPhase::AwaitingMove(self.roster.next_after(active));
        }

        Ok(self.phase)
    }

    /// Turns a board rejection into feedback text naming the owner.
    fn describe_rejection(&self, coord: Coord, err: &BoardError) -> String {
        match err {
            BoardError::AlreadyOwned { owner, .. } => format!(
                "Cell ({coord}) is already owned by player {}.",
                self.roster.name(*owner)
            ),
            other => format!("{other}."),
        }
    }

    fn emit(&self, event: TurnEvent) {
        if let Some(tx) = &self.event_tx {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(event);
        }
    }
}

impl std::fmt::Debug for TurnController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("board", &self.board)
            .field("roster", &self.roster)
            .field("settings", &self.settings)
            .field("phase", &self.phase)
            .field("history", &self.history)
            .finish()
    }
}
