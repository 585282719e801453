/// A position that violates the board invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidState {
    #[error("wrong number of houses: {0}")]
    WrongHouseCount(usize),

    #[error("wrong number of stores: {0}")]
    WrongStoreCount(usize),

    #[error("negative seeds in house {index}: {seeds}")]
    NegativeHouse { index: usize, seeds: i32 },

    #[error("negative seeds in store {index}: {seeds}")]
    NegativeStore { index: usize, seeds: i32 },

    #[error("wrong total number of seeds: {0}")]
    WrongTotal(i64),
}

/// A move that cannot be applied to the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("illegal move: the game is over")]
    GameOver,

    #[error("illegal move: {0} is out of range")]
    OutOfRange(usize),

    #[error("illegal move: {0} is empty")]
    EmptyHouse(usize),
}
