//! The reply boundary: turns game operations into chat-style messages.
//!
//! Everything a driver sends back to participants is composed here, so the
//! engine modules stay free of wording. Replies deliberately keep the voice
//! of a small, slightly cheeky bot.

use crate::constants::{CONFUSED, RESIGN_CANCELLED, RESIGN_PROMPTS};
use crate::coord::Move;
use crate::game::{Game, PassOutcome, RoundOutcome};
use crate::render::BoardRenderer;
use crate::votes::VoteOutcome;

/// Commands beyond a plain vote that a driver can route to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Current standing of all votes.
    Votes,
    /// The stored board display.
    Show,
    /// Capture counters.
    Captures,
    /// Pass immediately for the side to move.
    Pass,
    /// Vote for a random legal move on the caller's behalf.
    RandomVote { hidden: bool },
    /// Open the resignation handshake.
    Resign,
    /// Affirmative answer to a pending resignation prompt.
    ConfirmResign,
    /// Negative answer to a pending resignation prompt.
    DeclineResign,
}

pub const HELP_MESSAGE: &str = "Invalid command, try: `!vote`, `!votes`, `!show`, \
    `!captures`, `!pass`, `!random`, `!resign`, `!resolve`.";

pub const VOTE_USAGE: &str =
    "You need to type a move, e.g. `!vote J10`. I'm just a humble bot, not a mind reader.";

impl Game {
    /// Handles a vote for a raw board reference, replying in kind.
    pub fn handle_vote_token(&mut self, token: &str, voter: &str, hidden: bool) -> String {
        let mv = match Move::parse(token, hidden) {
            Ok(mv) => mv,
            Err(_) => {
                let shown = if hidden {
                    "`SURPRISE`".to_string()
                } else {
                    format!("`{}`", token.to_uppercase())
                };
                return format!("{shown} seems to be an invalid move.");
            }
        };
        let outcome = self.cast_vote(voter, mv);
        vote_reply(&outcome)
    }

    pub fn handle_special(&mut self, cmd: SpecialCommand, voter: &str) -> String {
        match cmd {
            SpecialCommand::Votes => {
                let tally = self.tally();
                if tally.is_empty() {
                    return "No votes.".to_string();
                }
                let mut message = String::new();
                for share in tally {
                    message.push_str(&format!(
                        "{} {:.0}% chance of being played.\n",
                        share.mv,
                        share.share * 100.0
                    ));
                }
                message
            }
            SpecialCommand::Show => self.display().to_string(),
            SpecialCommand::Captures => format!(
                "Number of stones captured by each player:\nBlack: {}\nWhite: {}",
                self.captured_by(crate::board::Color::Black),
                self.captured_by(crate::board::Color::White),
            ),
            SpecialCommand::Pass => match self.pass() {
                PassOutcome::Passed { color } => format!("{color} passes."),
                PassOutcome::GameOver { color } => {
                    let message = format!("{color} passes. Game over! :tada:");
                    self.restart();
                    message
                }
            },
            SpecialCommand::RandomVote { hidden } => {
                let outcome = self.cast_random_vote(voter, hidden);
                vote_reply(&outcome)
            }
            SpecialCommand::Resign => {
                self.request_resign();
                self.pick(RESIGN_PROMPTS)
            }
            SpecialCommand::ConfirmResign => match self.confirm_resign() {
                Some(result) => {
                    let message =
                        format!("{} resigns. {} wins! :tada:", result.resigned, result.winner);
                    self.restart();
                    message
                }
                None => self.pick(CONFUSED),
            },
            SpecialCommand::DeclineResign => {
                if self.decline_resign() {
                    self.pick(RESIGN_CANCELLED)
                } else {
                    self.pick(CONFUSED)
                }
            }
        }
    }

    /// Resolves the pending round and phrases the announcement. `None` means
    /// there were no votes and the driver should stay silent.
    pub fn play_round(&mut self, renderer: &mut dyn BoardRenderer) -> Option<String> {
        match self.resolve_round(renderer) {
            RoundOutcome::NoVotes => None,
            RoundOutcome::Played { mv, .. } => {
                Some(format!("Playing move {mv}.\n{}", self.display()))
            }
            RoundOutcome::Passed {
                color,
                ended: false,
            } => Some(format!("{color} passes.")),
            RoundOutcome::Passed { color, ended: true } => {
                let message = format!("{color} passes. Game over! :tada:");
                self.restart();
                Some(message)
            }
            RoundOutcome::Voided { mv, .. } => {
                Some(format!("{mv} is no longer a valid move. Vote again!"))
            }
        }
    }

    fn pick(&mut self, pool: &[&str]) -> String {
        let i = self.rng().usize(..pool.len());
        pool[i].to_string()
    }
}

fn vote_reply(outcome: &VoteOutcome) -> String {
    match outcome {
        VoteOutcome::Recorded { mv } => format!("Voted for {mv}."),
        VoteOutcome::Changed { from, to } => format!("Changed vote from {from} to {to}!"),
        VoteOutcome::AlreadyVoted { mv } => format!("You've already voted for {mv}!"),
        VoteOutcome::Rejected { mv, .. } => format!("{mv} seems to be an invalid move."),
    }
}
