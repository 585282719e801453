use std::fmt;

/// Number of houses on each side of the board.
pub const HOUSES_PER_SIDE: usize = 6;

/// Number of stores, one per player.
pub const NUM_STORES: usize = 2;

/// Total number of houses on the board.
pub const BOARD_SIZE: usize = HOUSES_PER_SIDE * NUM_STORES;

/// Seeds in every house of the starting position.
pub const SEEDS_PER_HOUSE: u8 = 6;

/// Seeds in play for every reachable position.
pub const TOTAL_SEEDS: u32 = BOARD_SIZE as u32 * SEEDS_PER_HOUSE as u32;

/// A store holding strictly more than this wins outright.
pub const MAJORITY: u32 = TOTAL_SEEDS / 2;

/// The two players. `First` owns houses 0..6 and moves first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::First, Side::Second];

    /// Returns the opposite side.
    pub const fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Index of this side's store, and the row of houses it owns.
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    /// Absolute board index of this side's first house.
    pub const fn first_house(self) -> usize {
        self.index() * HOUSES_PER_SIDE
    }

    /// Absolute board indices of the houses this side owns.
    pub fn houses(self) -> std::ops::Range<usize> {
        self.first_house()..self.first_house() + HOUSES_PER_SIDE
    }

    /// Converts a 1-based house number on this side into an absolute board index.
    /// Returns `None` when the number is outside `1..=6`.
    pub fn house_index(self, house: usize) -> Option<usize> {
        if (1..=HOUSES_PER_SIDE).contains(&house) {
            Some(self.first_house() + house - 1)
        } else {
            None
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// Returns true when a house holding `seeds` after sowing is captured.
pub const fn is_capture_count(seeds: u8) -> bool {
    matches!(seeds, 2 | 4 | 6)
}
