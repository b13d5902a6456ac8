//! Table-wide constants.

/// Two hole cards each for 23 players plus five board cards fit in one deck.
pub const MAX_PLAYERS: usize = 23;

pub const MAX_USERNAME_LENGTH: usize = 16;

pub const HOLE_CARDS: u32 = 2;
pub const FLOP_CARDS: u32 = 3;
pub const TURN_CARDS: u32 = 1;
pub const RIVER_CARDS: u32 = 1;

pub const DECK_SIZE: usize = 52;
