//! Board display seam.
//!
//! The game stores whatever the renderer returns for the latest position and
//! repeats it in move announcements and `show` replies. The hosted deployment
//! this replaces drew a raster image and handed back its URL; the console
//! build draws text.

use std::fmt::Write as _;

use crate::board::{Board, Color};
use crate::constants::{COLUMNS, SIZE};
use crate::coord::Point;

pub trait BoardRenderer {
    /// Renders the position, highlighting the move just played if any. The
    /// returned string is opaque to the engine.
    fn render(&mut self, board: &Board, last_move: Option<Point>) -> String;
}

/// Text renderer for the console driver.
pub struct AsciiRenderer;

impl BoardRenderer for AsciiRenderer {
    fn render(&mut self, board: &Board, last_move: Option<Point>) -> String {
        let mut out = String::from("   ");
        for &c in COLUMNS {
            out.push(c as char);
            out.push(' ');
        }
        out.push('\n');

        for y in 0..SIZE {
            let _ = write!(out, "{:>2} ", SIZE - y);
            for x in 0..SIZE {
                let p = Point {
                    x: x as u8,
                    y: y as u8,
                };
                let ch = match board.stone_at(p) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                out.push(ch);
                out.push(' ');
            }
            out.push('\n');
        }

        if let Some(p) = last_move {
            let _ = write!(out, "last move: {p}");
        }
        out
    }
}
