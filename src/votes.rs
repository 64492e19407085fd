//! The vote ledger: one pending choice per participant.
//!
//! Resolution draws uniformly over the cast votes themselves, not over the
//! distinct moves, so a move backed by three voters is three times as likely
//! to be played. Voters are kept in a `BTreeMap` so iteration order, and with
//! it a seeded draw, is reproducible.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::coord::{Move, Vertex};
use crate::rules::IllegalMove;

/// What casting a vote did to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum VoteOutcome {
    Recorded { mv: Move },
    Changed { from: Move, to: Move },
    AlreadyVoted { mv: Move },
    /// The move failed the legality check and was not recorded. Produced by
    /// the game, never by the ledger itself.
    Rejected { mv: Move, reason: IllegalMove },
}

/// One pending move per distinct move's standing in the ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoteShare {
    /// Hidden only when every vote behind it was hidden.
    pub mv: Move,
    pub count: usize,
    /// Fraction of all cast votes, in `0.0..=1.0`.
    pub share: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteLedger {
    votes: BTreeMap<String, Move>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records or replaces the participant's pending vote.
    pub fn cast(&mut self, voter: &str, mv: Move) -> VoteOutcome {
        match self.votes.get(voter).copied() {
            Some(prev) if prev == mv => VoteOutcome::AlreadyVoted { mv: prev },
            Some(prev) => {
                self.votes.insert(voter.to_string(), mv);
                VoteOutcome::Changed { from: prev, to: mv }
            }
            None => {
                self.votes.insert(voter.to_string(), mv);
                VoteOutcome::Recorded { mv }
            }
        }
    }

    /// Draws one vote uniformly from the multiset of cast votes. Leaves the
    /// ledger untouched; the round clears it separately.
    pub fn draw(&self, rng: &mut fastrand::Rng) -> Option<Move> {
        if self.votes.is_empty() {
            return None;
        }
        let i = rng.usize(..self.votes.len());
        self.votes.values().nth(i).copied()
    }

    /// Standing of every distinct move, best share first, ties broken by the
    /// move's canonical form.
    pub fn tally(&self) -> Vec<VoteShare> {
        if self.votes.is_empty() {
            return Vec::new();
        }
        let total = self.votes.len() as f64;
        let mut grouped: HashMap<Vertex, (usize, bool)> = HashMap::new();
        for mv in self.votes.values() {
            let entry = grouped.entry(mv.vertex).or_insert((0, true));
            entry.0 += 1;
            entry.1 &= mv.hidden;
        }

        let mut shares: Vec<VoteShare> = grouped
            .into_iter()
            .map(|(vertex, (count, all_hidden))| VoteShare {
                mv: Move {
                    vertex,
                    hidden: all_hidden,
                },
                count,
                share: count as f64 / total,
            })
            .collect();
        shares.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.mv.vertex.to_string().cmp(&b.mv.vertex.to_string()))
        });
        shares
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn clear(&mut self) {
        self.votes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(token: &str) -> Move {
        Move::parse(token, false).unwrap()
    }

    #[test]
    fn test_cast_lifecycle() {
        let mut ledger = VoteLedger::new();
        assert_eq!(
            ledger.cast("ayu", mv("D4")),
            VoteOutcome::Recorded { mv: mv("D4") }
        );
        assert_eq!(
            ledger.cast("ayu", mv("D4")),
            VoteOutcome::AlreadyVoted { mv: mv("D4") }
        );
        assert_eq!(
            ledger.cast("ayu", mv("Q16")),
            VoteOutcome::Changed {
                from: mv("D4"),
                to: mv("Q16"),
            }
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_revote_same_point_hidden_still_counts_as_already_voted() {
        let mut ledger = VoteLedger::new();
        ledger.cast("ayu", mv("D4"));
        let outcome = ledger.cast("ayu", Move::parse("d4", true).unwrap());
        assert!(matches!(outcome, VoteOutcome::AlreadyVoted { .. }));
    }

    #[test]
    fn test_len_counts_voters_not_moves() {
        let mut ledger = VoteLedger::new();
        ledger.cast("a", mv("D4"));
        ledger.cast("b", mv("D4"));
        ledger.cast("c", mv("Q16"));
        assert_eq!(ledger.len(), 3);
        ledger.clear();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_draw_from_empty_ledger_is_none() {
        let ledger = VoteLedger::new();
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(ledger.draw(&mut rng), None);
    }

    #[test]
    fn test_draw_single_vote_is_deterministic() {
        let mut ledger = VoteLedger::new();
        ledger.cast("ayu", mv("K10"));
        let mut rng = fastrand::Rng::with_seed(7);
        assert_eq!(ledger.draw(&mut rng), Some(mv("K10")));
        // Drawing does not consume the ledger.
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_draw_weights_by_vote_count() {
        let mut ledger = VoteLedger::new();
        ledger.cast("a", mv("D4"));
        ledger.cast("b", mv("D4"));
        ledger.cast("c", mv("Q16"));

        let mut rng = fastrand::Rng::with_seed(42);
        let mut favourite = 0;
        for _ in 0..300 {
            if ledger.draw(&mut rng) == Some(mv("D4")) {
                favourite += 1;
            }
        }
        // Two of three votes name D4, so about 200 of 300 draws should.
        assert!((140..=260).contains(&favourite), "got {favourite}");
    }

    #[test]
    fn test_tally_shares_and_order() {
        let mut ledger = VoteLedger::new();
        ledger.cast("a", mv("D4"));
        ledger.cast("b", mv("D4"));
        ledger.cast("c", mv("Q16"));

        let tally = ledger.tally();
        assert_eq!(tally.len(), 2);
        assert_eq!(tally[0].mv, mv("D4"));
        assert_eq!(tally[0].count, 2);
        assert!((tally[0].share - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(tally[1].mv, mv("Q16"));
        assert!((tally[1].share - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_tally_breaks_ties_by_reference() {
        let mut ledger = VoteLedger::new();
        ledger.cast("a", mv("D4"));
        ledger.cast("b", mv("A1"));
        let tally = ledger.tally();
        assert_eq!(tally[0].mv, mv("A1"));
        assert_eq!(tally[1].mv, mv("D4"));
    }

    #[test]
    fn test_tally_hides_moves_only_when_every_vote_was_hidden() {
        let mut ledger = VoteLedger::new();
        ledger.cast("a", Move::parse("D4", true).unwrap());
        ledger.cast("b", mv("D4"));
        ledger.cast("c", Move::parse("Q16", true).unwrap());

        let tally = ledger.tally();
        assert!(!tally[0].mv.hidden, "one open vote reveals the move");
        assert!(tally[1].mv.hidden, "all votes hidden stays a surprise");
        assert_eq!(tally[1].mv.to_string(), "`SURPRISE`");
    }

    #[test]
    fn test_empty_tally() {
        assert!(VoteLedger::new().tally().is_empty());
    }
}
