pub mod error;
pub mod game_state;
pub mod perft;
pub mod types;

pub use error::{IllegalMove, InvalidState};
pub use game_state::*;
pub use perft::{perft, perft_detailed, perft_divide, PerftResults};
pub use types::*;
