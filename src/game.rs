//! One running game: board, position history, pending votes, capture
//! counters, and the pass/resign state machine.
//!
//! The game is a single owned value. Callers serialize access; every
//! operation here is synchronous and bounded by a few board scans.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{Board, Color, History};
use crate::constants::{DEFAULT_BOARD_DISPLAY, RANDOM_VOTE_PROBES, SIZE};
use crate::coord::{Move, Point, Vertex};
use crate::render::BoardRenderer;
use crate::rules::{self, IllegalMove};
use crate::votes::{VoteLedger, VoteOutcome, VoteShare};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    InProgress,
    /// The last committed action was a pass; one more ends the game.
    OnePassPending,
    /// Over by two passes or resignation. The boundary announces the result
    /// and then calls [`Game::restart`].
    Ended,
}

/// What resolving a round did.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundOutcome {
    /// Empty ledger; nothing changed, nothing to announce.
    NoVotes,
    Played {
        mv: Move,
        color: Color,
        captured: usize,
    },
    Passed {
        color: Color,
        ended: bool,
    },
    /// The drawn vote stopped being legal between casting and resolution.
    /// The ledger is already cleared; the board is untouched.
    Voided {
        mv: Move,
        reason: IllegalMove,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Passed { color: Color },
    GameOver { color: Color },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resignation {
    pub resigned: Color,
    pub winner: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    history: History,
    votes: VoteLedger,
    captures_black: usize,
    captures_white: usize,
    resign_pending: bool,
    phase: Phase,
    display: String,
    #[serde(skip)]
    rng: fastrand::Rng,
}

impl Game {
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Deterministic game for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        let board = Board::new();
        let history = History::new(board.snapshot());
        Game {
            board,
            history,
            votes: VoteLedger::new(),
            captures_black: 0,
            captures_white: 0,
            resign_pending: false,
            phase: Phase::InProgress,
            display: DEFAULT_BOARD_DISPLAY.to_string(),
            rng,
        }
    }

    /// Throws everything away and starts a fresh game. The RNG stream is the
    /// one thing that survives.
    pub fn restart(&mut self) {
        let rng = self.rng.clone();
        *self = Self::with_rng(rng);
        info!("game restarted");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.board.to_move()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The stored rendering of the current position. Before the first
    /// committed move this is the placeholder display.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn captured_by(&self, color: Color) -> usize {
        match color {
            Color::Black => self.captures_black,
            Color::White => self.captures_white,
        }
    }

    pub fn resign_pending(&self) -> bool {
        self.resign_pending
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn tally(&self) -> Vec<VoteShare> {
        self.votes.tally()
    }

    /// Validates and records a vote. An illegal board point is rejected and
    /// leaves the ledger alone; a pass ballot is always accepted.
    pub fn cast_vote(&mut self, voter: &str, mv: Move) -> VoteOutcome {
        if let Vertex::Play(p) = mv.vertex {
            if let Err(reason) = rules::check_move(&self.board, &self.history, p) {
                debug!(voter, at = %mv.vertex, %reason, "vote rejected");
                return VoteOutcome::Rejected { mv, reason };
            }
        }
        let outcome = self.votes.cast(voter, mv);
        debug!(voter, pending = self.votes.len(), "vote cast");
        outcome
    }

    /// Votes for a random legal move on the participant's behalf. Rolls the
    /// dice a few times first; if that keeps hitting illegal points, scans
    /// the whole board, and with no legal move left casts a pass ballot.
    pub fn cast_random_vote(&mut self, voter: &str, hidden: bool) -> VoteOutcome {
        for _ in 0..RANDOM_VOTE_PROBES {
            let p = Point {
                x: self.rng.u8(..SIZE as u8),
                y: self.rng.u8(..SIZE as u8),
            };
            if rules::check_move(&self.board, &self.history, p).is_ok() {
                return self.votes.cast(voter, Move::play(p, hidden));
            }
        }

        let mut legal = Vec::new();
        for x in 0..SIZE as u8 {
            for y in 0..SIZE as u8 {
                let p = Point { x, y };
                if rules::check_move(&self.board, &self.history, p).is_ok() {
                    legal.push(p);
                }
            }
        }
        let mv = if legal.is_empty() {
            debug!(voter, "no legal move left, voting to pass");
            Move::pass(hidden)
        } else {
            Move::play(legal[self.rng.usize(..legal.len())], hidden)
        };
        self.votes.cast(voter, mv)
    }

    /// Resolves the pending round: draws one vote from the multiset, clears
    /// the ledger, and commits the drawn move if it is still legal. The board
    /// may have changed since the vote was cast, so the draw is re-validated;
    /// a stale draw voids the round without touching the board.
    pub fn resolve_round(&mut self, renderer: &mut dyn BoardRenderer) -> RoundOutcome {
        let Some(drawn) = self.votes.draw(&mut self.rng) else {
            return RoundOutcome::NoVotes;
        };
        let voters = self.votes.len();
        self.votes.clear();
        let mv = drawn.revealed();

        match mv.vertex {
            Vertex::Pass => {
                info!(color = %self.board.to_move(), "round resolved as a pass");
                match self.pass() {
                    PassOutcome::Passed { color } => RoundOutcome::Passed {
                        color,
                        ended: false,
                    },
                    PassOutcome::GameOver { color } => {
                        RoundOutcome::Passed { color, ended: true }
                    }
                }
            }
            Vertex::Play(p) => {
                if let Err(reason) = rules::check_move(&self.board, &self.history, p) {
                    warn!(at = %mv.vertex, %reason, "drawn vote no longer legal, round voided");
                    return RoundOutcome::Voided { mv, reason };
                }
                let color = self.board.to_move();
                self.phase = Phase::InProgress;
                let captured = rules::place_stone(&mut self.board, p);
                match color {
                    Color::Black => self.captures_black += captured,
                    Color::White => self.captures_white += captured,
                }
                self.history.push(self.board.snapshot());
                self.display = renderer.render(&self.board, Some(p));
                info!(at = %mv.vertex, %color, captured, voters, "round resolved");
                RoundOutcome::Played {
                    mv,
                    color,
                    captured,
                }
            }
        }
    }

    /// Passes for the side to move. The first pass flips the turn and records
    /// the position; a second consecutive pass ends the game.
    pub fn pass(&mut self) -> PassOutcome {
        let color = self.board.to_move();
        match self.phase {
            Phase::OnePassPending => {
                self.phase = Phase::Ended;
                info!(%color, "second consecutive pass, game over");
                PassOutcome::GameOver { color }
            }
            _ => {
                self.phase = Phase::OnePassPending;
                self.board.flip_to_move();
                self.history.push(self.board.snapshot());
                debug!(%color, "pass");
                PassOutcome::Passed { color }
            }
        }
    }

    pub fn request_resign(&mut self) {
        self.resign_pending = true;
    }

    /// Completes a pending resignation. The side to move resigns and the
    /// opponent wins; returns `None` when no resignation was requested.
    pub fn confirm_resign(&mut self) -> Option<Resignation> {
        if !self.resign_pending {
            return None;
        }
        self.resign_pending = false;
        self.phase = Phase::Ended;
        let resigned = self.board.to_move();
        info!(%resigned, "resignation confirmed");
        Some(Resignation {
            resigned,
            winner: resigned.opponent(),
        })
    }

    /// Clears a pending resignation. Returns whether one was pending.
    pub fn decline_resign(&mut self) -> bool {
        let was_pending = self.resign_pending;
        self.resign_pending = false;
        was_pending
    }

    /// RNG handle for the command layer's response variety.
    pub(crate) fn rng(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
