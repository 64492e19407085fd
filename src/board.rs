//! The 19x19 grid, the side to move, and the snapshot history that repetition
//! checks run against.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{GRID, SIZE};
use crate::coord::Point;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Option<Color>>,
    to_move: Color,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: vec![None; GRID],
            to_move: Color::Black,
        }
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn flip_to_move(&mut self) {
        self.to_move = self.to_move.opponent();
    }

    /// Whether the point lies on the grid at all.
    pub fn contains(&self, p: Point) -> bool {
        (p.x as usize) < SIZE && (p.y as usize) < SIZE
    }

    pub fn stone_at(&self, p: Point) -> Option<Color> {
        if !self.contains(p) {
            return None;
        }
        self.cells[p.index()]
    }

    pub fn put(&mut self, p: Point, color: Color) {
        let i = p.index();
        self.cells[i] = Some(color);
    }

    pub fn remove(&mut self, p: Point) {
        let i = p.index();
        self.cells[i] = None;
    }

    pub fn neighbors(&self, p: Point) -> Vec<Point> {
        let mut v = Vec::with_capacity(4);
        if p.x > 0 {
            v.push(Point { x: p.x - 1, y: p.y });
        }
        if (p.x as usize) + 1 < SIZE {
            v.push(Point { x: p.x + 1, y: p.y });
        }
        if p.y > 0 {
            v.push(Point { x: p.x, y: p.y - 1 });
        }
        if (p.y as usize) + 1 < SIZE {
            v.push(Point { x: p.x, y: p.y + 1 });
        }
        v
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.cells.clone(),
            to_move: self.to_move,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SIZE {
            for x in 0..SIZE {
                let ch = match self.cells[y * SIZE + x] {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A full position: every cell plus the side to move. Two snapshots compare
/// equal only when both agree, so a repeated arrangement with the other side
/// to move does not count as a repetition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    cells: Vec<Option<Color>>,
    to_move: Color,
}

/// Every position the game has passed through, oldest first. Membership is
/// answered from a hash index so the repetition check stays cheap as games
/// run long.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "Vec<Snapshot>", into = "Vec<Snapshot>")]
pub struct History {
    entries: Vec<Snapshot>,
    seen: HashSet<Snapshot>,
}

impl History {
    pub fn new(initial: Snapshot) -> Self {
        Self::from(vec![initial])
    }

    pub fn push(&mut self, s: Snapshot) {
        self.seen.insert(s.clone());
        self.entries.push(s);
    }

    pub fn contains(&self, s: &Snapshot) -> bool {
        self.seen.contains(s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Snapshot>> for History {
    fn from(entries: Vec<Snapshot>) -> Self {
        let seen = entries.iter().cloned().collect();
        History { entries, seen }
    }
}

impl From<History> for Vec<Snapshot> {
    fn from(h: History) -> Self {
        h.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_board_is_empty_black_to_move() {
        let board = Board::new();
        assert_eq!(board.to_move(), Color::Black);
        for x in 0..SIZE as u8 {
            for y in 0..SIZE as u8 {
                assert_eq!(board.stone_at(Point { x, y }), None);
            }
        }
    }

    #[test]
    fn test_put_and_remove() {
        let mut board = Board::new();
        board.put(pt("D4"), Color::Black);
        assert_eq!(board.stone_at(pt("D4")), Some(Color::Black));
        board.put(pt("D4"), Color::White);
        assert_eq!(board.stone_at(pt("D4")), Some(Color::White));
        board.remove(pt("D4"));
        assert_eq!(board.stone_at(pt("D4")), None);
    }

    #[test]
    fn test_stone_at_off_board_is_none() {
        let board = Board::new();
        assert_eq!(board.stone_at(Point { x: 19, y: 0 }), None);
        assert_eq!(board.stone_at(Point { x: 0, y: 200 }), None);
    }

    #[test]
    fn test_neighbor_counts() {
        let board = Board::new();
        assert_eq!(board.neighbors(pt("A1")).len(), 2);
        assert_eq!(board.neighbors(pt("A19")).len(), 2);
        assert_eq!(board.neighbors(pt("S1")).len(), 2);
        assert_eq!(board.neighbors(pt("S19")).len(), 2);
        assert_eq!(board.neighbors(pt("A5")).len(), 3);
        assert_eq!(board.neighbors(pt("K10")).len(), 4);
    }

    #[test]
    fn test_neighbors_stay_on_board() {
        let board = Board::new();
        for x in 0..SIZE as u8 {
            for y in 0..SIZE as u8 {
                for n in board.neighbors(Point { x, y }) {
                    assert!(board.contains(n));
                }
            }
        }
    }

    #[test]
    fn test_flip_to_move() {
        let mut board = Board::new();
        board.flip_to_move();
        assert_eq!(board.to_move(), Color::White);
        board.flip_to_move();
        assert_eq!(board.to_move(), Color::Black);
    }

    #[test]
    fn test_snapshot_distinguishes_side_to_move() {
        let mut board = Board::new();
        board.put(pt("D4"), Color::Black);
        let black_turn = board.snapshot();
        board.flip_to_move();
        let white_turn = board.snapshot();
        assert_ne!(black_turn, white_turn);
        board.flip_to_move();
        assert_eq!(board.snapshot(), black_turn);
    }

    #[test]
    fn test_history_membership() {
        let board = Board::new();
        let mut history = History::new(board.snapshot());
        assert_eq!(history.len(), 1);
        assert!(history.contains(&board.snapshot()));

        let mut later = board.clone();
        later.put(pt("Q16"), Color::Black);
        later.flip_to_move();
        assert!(!history.contains(&later.snapshot()));
        history.push(later.snapshot());
        assert_eq!(history.len(), 2);
        assert!(history.contains(&later.snapshot()));
    }

    #[test]
    fn test_history_survives_serialization() {
        let mut board = Board::new();
        let mut history = History::new(board.snapshot());
        board.put(pt("C3"), Color::Black);
        board.flip_to_move();
        history.push(board.snapshot());

        let json = serde_json::to_string(&history).unwrap();
        let restored: History = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 2);
        assert!(restored.contains(&board.snapshot()));
        assert!(restored.contains(&Board::new().snapshot()));
    }

    #[test]
    fn test_display_grid() {
        let mut board = Board::new();
        board.put(pt("A19"), Color::Black);
        board.put(pt("B19"), Color::White);
        let text = board.to_string();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("X O . "));
        assert_eq!(text.lines().count(), SIZE);
    }
}
