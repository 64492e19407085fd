//! Move legality and the commit protocol.
//!
//! Legality is checked against a hypothetical placement without touching the
//! real board. A candidate passes when the placed stone's group would keep at
//! least one liberty, or when the placement fills the last liberty of an
//! adjacent opposing group. Either way the resulting position must not repeat
//! any earlier position with the same side to move.

use std::fmt;

use tracing::debug;

use crate::board::{Board, History};
use crate::constants::GRID;
use crate::coord::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    OffBoard,
    Occupied,
    Suicide,
    Superko,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            IllegalMove::OffBoard => "the point is off the board",
            IllegalMove::Occupied => "the point is already occupied",
            IllegalMove::Suicide => "the stone would have no liberties",
            IllegalMove::Superko => "the position would repeat an earlier one",
        };
        write!(f, "{reason}")
    }
}

impl std::error::Error for IllegalMove {}

/// Checks whether the side to move may play at `p`. Read-only: the real board
/// and history are never modified, the repetition probe runs on a clone.
pub fn check_move(board: &Board, history: &History, p: Point) -> Result<(), IllegalMove> {
    if !board.contains(p) {
        return Err(IllegalMove::OffBoard);
    }
    if board.stone_at(p).is_some() {
        return Err(IllegalMove::Occupied);
    }

    let group = build_group(board, p);
    if count_liberties(board, &group) > 0 {
        return check_repetition(board, history, p);
    }

    // The placed group would have no liberties. Still legal if the stone
    // fills the last liberty of an adjacent opposing group: the capture is
    // resolved first and frees the point the stone sits on. Only opposing
    // groups count here, an own group down to this point as its last liberty
    // does not rescue the move.
    let opponent = board.to_move().opponent();
    for n in board.neighbors(p) {
        if board.stone_at(n) != Some(opponent) {
            continue;
        }
        let enemy = build_group(board, n);
        if count_liberties(board, &enemy) == 1 {
            return check_repetition(board, history, p);
        }
    }
    Err(IllegalMove::Suicide)
}

/// Plays a stone for the side to move and applies the full commit protocol:
/// place, hand the turn over, then lift every adjacent opposing group left
/// without liberties. Returns how many stones were lifted.
///
/// Callers are expected to have validated `p` with [`check_move`] first.
pub fn place_stone(board: &mut Board, p: Point) -> usize {
    let mover = board.to_move();
    board.put(p, mover);
    board.flip_to_move();

    let prey = board.to_move();
    let mut removed = 0;
    for n in board.neighbors(p) {
        if board.stone_at(n) != Some(prey) {
            continue;
        }
        let group = build_group(board, n);
        if count_liberties(board, &group) == 0 {
            removed += group.len();
            for stone in group {
                board.remove(stone);
            }
        }
    }
    if removed > 0 {
        debug!(at = %p, count = removed, "stones captured");
    }
    removed
}

fn check_repetition(board: &Board, history: &History, p: Point) -> Result<(), IllegalMove> {
    let mut probe = board.clone();
    place_stone(&mut probe, p);
    if history.contains(&probe.snapshot()) {
        debug!(at = %p, "move refused, position already seen");
        return Err(IllegalMove::Superko);
    }
    Ok(())
}

/// Collects the connected group through `seed`. An empty seed stands for a
/// hypothetical stone of the side to move, so the group is that stone plus
/// every same-colored chain it would join.
fn build_group(board: &Board, seed: Point) -> Vec<Point> {
    let color = board.stone_at(seed).unwrap_or_else(|| board.to_move());
    let mut group = Vec::new();
    let mut stack = vec![seed];
    let mut visited = vec![false; GRID];
    while let Some(p) = stack.pop() {
        let i = p.index();
        if visited[i] {
            continue;
        }
        visited[i] = true;
        group.push(p);
        for n in board.neighbors(p) {
            if !visited[n.index()] && board.stone_at(n) == Some(color) {
                stack.push(n);
            }
        }
    }
    group
}

/// Distinct empty points adjacent to the group. Group members are marked up
/// front so a hypothetical stone's still-empty seed never counts as its own
/// liberty, and a point shared by two group stones counts once.
fn count_liberties(board: &Board, group: &[Point]) -> usize {
    let mut seen = vec![false; GRID];
    for p in group {
        seen[p.index()] = true;
    }
    let mut liberties = 0;
    for &p in group {
        for n in board.neighbors(p) {
            let i = n.index();
            if seen[i] {
                continue;
            }
            seen[i] = true;
            if board.stone_at(n).is_none() {
                liberties += 1;
            }
        }
    }
    liberties
}
