//! Votego: a Go engine played by committee.
//!
//! Participants cast votes for the next move; on an external trigger the
//! pending round resolves into a single committed move, drawn at random from
//! the cast votes so popular moves win proportionally more often. The engine
//! enforces full Go legality (occupancy, suicide, capture, and whole-game
//! repetition), tracks passes and resignations, and answers every operation
//! with a ready-to-send message.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, vote parameters, canned replies
//! - [`coord`] - Board references and vote tokens
//! - [`board`] - The grid, the side to move, and the position history
//! - [`rules`] - Legality checks and the commit protocol
//! - [`votes`] - The per-participant vote ledger
//! - [`game`] - The owned game value and its state machine
//! - [`commands`] - The chat-style reply boundary
//! - [`render`] - Board display seam
//!
//! ## Example
//!
//! ```
//! use votego::game::Game;
//! use votego::render::AsciiRenderer;
//!
//! let mut game = Game::with_seed(7);
//!
//! let reply = game.handle_vote_token("D4", "alice", false);
//! assert_eq!(reply, "Voted for `D4`.");
//!
//! // Normally a scheduler triggers this once per round.
//! let announcement = game.play_round(&mut AsciiRenderer).unwrap();
//! assert!(announcement.starts_with("Playing move `D4`."));
//! ```

pub mod board;
pub mod commands;
pub mod constants;
pub mod coord;
pub mod game;
pub mod render;
pub mod rules;
pub mod votes;
