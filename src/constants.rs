//! Constants for board geometry, vote resolution, and canned replies.
//!
//! The board is the full 19x19 goban; unlike smaller teaching boards there is
//! no size configuration here, so everything downstream can assume 361 points.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (19x19, the full goban).
pub const SIZE: usize = 19;

/// Total number of playable points.
pub const GRID: usize = SIZE * SIZE;

/// Column letters, left to right. Nineteen letters, none skipped: columns run
/// `A`..=`S`. (Some Go notations skip `I`; the voting channels this engine
/// grew up in never did, so neither does the parser.)
pub const COLUMNS: &[u8; SIZE] = b"ABCDEFGHIJKLMNOPQRS";

// =============================================================================
// Vote Resolution
// =============================================================================

/// Random-vote dice rolls before falling back to an exhaustive legal-move scan.
pub const RANDOM_VOTE_PROBES: usize = 9;

// =============================================================================
// Display
// =============================================================================

/// Board display shown before any move has been resolved (an empty goban).
pub const DEFAULT_BOARD_DISPLAY: &str = "https://i.imgur.com/iWzRKV0.png";

// =============================================================================
// Canned Replies
// =============================================================================

/// Prompts sent back when somebody asks to resign.
pub const RESIGN_PROMPTS: &[&str] = &["Are you sure you want to resign?", "Sure?"];

/// Acknowledgements for a cancelled resignation.
pub const RESIGN_CANCELLED: &[&str] = &["Ok.", "Resignation cancelled."];

/// Replies for confirmations/cancellations that nothing was waiting for.
pub const CONFUSED: &[&str] = &[
    "I don't know.",
    "What do you mean?",
    "That doesn't make any sense.",
    "I'm just a bot.",
];
