//! Board references and vote tokens.
//!
//! A point is written as a column letter and a row number, `A1` through `S19`,
//! case-insensitive on input and uppercase in canonical form. Rows count from
//! the bottom of the board as players read it, so row 19 is stored as `y = 0`.
//! Parsing and formatting are exact inverses: `format(parse(s))` equals the
//! uppercased input for every valid reference, and nothing outside the 19x19
//! grid is reachable from a token that parses.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{COLUMNS, SIZE};

/// A point on the board, `0 <= x, y < 19`. `x` counts columns from the left,
/// `y` counts rows from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u8,
    pub y: u8,
}

impl Point {
    /// Flat index into a row-major 361-cell grid.
    #[inline]
    pub fn index(self) -> usize {
        self.y as usize * SIZE + self.x as usize
    }
}

impl fmt::Display for Point {
    /// Canonical board reference. Points constructed off the grid have no
    /// reference and print as raw coordinates instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (self.x as usize) < SIZE && (self.y as usize) < SIZE {
            write!(
                f,
                "{}{}",
                COLUMNS[self.x as usize] as char,
                SIZE - self.y as usize
            )
        } else {
            write!(f, "({},{})", self.x, self.y)
        }
    }
}

/// Rejected move token. Keeps the offending text for the reply message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    token: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` is not a board point (expected a column A-S and a row 1-19, like `D4`)",
            self.token
        )
    }
}

impl std::error::Error for ParseError {}

impl FromStr for Point {
    type Err = ParseError;

    /// Parses a board reference like `D4` or `q16`.
    ///
    /// Rejects anything that is not exactly one column letter followed by a
    /// row number: wrong length, columns past `S`, rows outside 1-19, leading
    /// zeroes, trailing characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError {
            token: s.to_string(),
        };

        let bytes = s.as_bytes();
        if bytes.len() < 2 || bytes.len() > 3 {
            return Err(err());
        }

        let col = bytes[0].to_ascii_uppercase();
        let x = COLUMNS.iter().position(|&c| c == col).ok_or_else(err)?;

        let digits = &bytes[1..];
        if digits[0] == b'0' || !digits.iter().all(u8::is_ascii_digit) {
            return Err(err());
        }
        let row = digits
            .iter()
            .fold(0usize, |acc, &d| acc * 10 + (d - b'0') as usize);
        if row > SIZE {
            return Err(err());
        }

        Ok(Point {
            x: x as u8,
            y: (SIZE - row) as u8,
        })
    }
}

/// What a vote names: a board point, or passing the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vertex {
    Play(Point),
    Pass,
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertex::Play(p) => write!(f, "{p}"),
            Vertex::Pass => write!(f, "pass"),
        }
    }
}

/// A cast vote. `hidden` marks votes cast through a private channel; it only
/// affects display (`SURPRISE` instead of the coordinate) and is deliberately
/// excluded from equality and hashing so a hidden and a public vote for the
/// same point count as the same choice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Move {
    pub vertex: Vertex,
    pub hidden: bool,
}

impl Move {
    pub fn play(point: Point, hidden: bool) -> Self {
        Move {
            vertex: Vertex::Play(point),
            hidden,
        }
    }

    pub fn pass(hidden: bool) -> Self {
        Move {
            vertex: Vertex::Pass,
            hidden,
        }
    }

    /// Parses a vote token into a board-point move.
    pub fn parse(token: &str, hidden: bool) -> Result<Self, ParseError> {
        Ok(Move::play(token.parse()?, hidden))
    }

    /// The same move with the hidden flag dropped, for announcing resolutions.
    pub fn revealed(self) -> Self {
        Move {
            vertex: self.vertex,
            hidden: false,
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.vertex == other.vertex
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vertex.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hidden {
            write!(f, "`SURPRISE`")
        } else {
            write!(f, "`{}`", self.vertex)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corners() {
        assert_eq!("A1".parse::<Point>().unwrap(), Point { x: 0, y: 18 });
        assert_eq!("A19".parse::<Point>().unwrap(), Point { x: 0, y: 0 });
        assert_eq!("S1".parse::<Point>().unwrap(), Point { x: 18, y: 18 });
        assert_eq!("S19".parse::<Point>().unwrap(), Point { x: 18, y: 0 });
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("d4".parse::<Point>().unwrap(), "D4".parse().unwrap());
        assert_eq!("q16".parse::<Point>().unwrap(), "Q16".parse().unwrap());
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        for bad in [
            "", "D", "4", "T1", "Z5", "A0", "A20", "D4x", "D04", "D+4", "DD4", "pass", "19",
            "D 4",
        ] {
            assert!(bad.parse::<Point>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_roundtrip_every_reference() {
        for x in 0..SIZE {
            for row in 1..=SIZE {
                let s = format!("{}{}", COLUMNS[x] as char, row);
                let p: Point = s.parse().unwrap();
                assert_eq!(p.to_string(), s, "roundtrip failed for {s}");
            }
        }
    }

    #[test]
    fn test_roundtrip_normalizes_case() {
        let p: Point = "c12".parse().unwrap();
        assert_eq!(p.to_string(), "C12");
    }

    #[test]
    fn test_move_equality_ignores_hidden() {
        let open = Move::parse("D4", false).unwrap();
        let secret = Move::parse("d4", true).unwrap();
        assert_eq!(open, secret);
        assert_ne!(open, Move::parse("D5", false).unwrap());
        assert_eq!(Move::pass(false), Move::pass(true));
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::parse("d4", false).unwrap().to_string(), "`D4`");
        assert_eq!(Move::parse("d4", true).unwrap().to_string(), "`SURPRISE`");
        assert_eq!(Move::pass(false).to_string(), "`pass`");
        assert_eq!(
            Move::parse("q16", true).unwrap().revealed().to_string(),
            "`Q16`"
        );
    }

    #[test]
    fn test_parse_error_names_the_token() {
        let err = "Z9".parse::<Point>().unwrap_err();
        assert!(err.to_string().contains("`Z9`"));
    }

    #[test]
    fn test_off_grid_point_displays_raw_coordinates() {
        assert_eq!(Point { x: 19, y: 0 }.to_string(), "(19,0)");
    }
}
