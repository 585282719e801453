//! Board position and rules for the seed-sowing game.
//! Every move produces a fresh `GameState`; no state is ever mutated after it is handed out.
use crate::error::{IllegalMove, InvalidState};
use crate::types::*;

/// Complete state of a game.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GameState {
    /// Seeds in each house; 0..6 belong to `Side::First`, 6..12 to `Side::Second`
    houses: [u8; BOARD_SIZE],
    /// Captured seeds per side, indexed by `Side::index`
    stores: [u8; NUM_STORES],
    /// Which side moves next
    turn: Side,
    /// Set once a store holds a majority or the side to move has no seeds
    finished: bool,
    /// Absolute index of the house played to reach this position
    last_move: Option<usize>,
}

/// Read-only snapshot of a position for agents, the referee and display code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BoardView {
    pub houses: [u8; BOARD_SIZE],
    pub stores: [u8; NUM_STORES],
    pub turn: Side,
    pub finished: bool,
    pub last_move: Option<usize>,
}

impl GameState {
    /// Creates a new game in the starting position.
    pub fn new() -> Self {
        Self {
            houses: [SEEDS_PER_HOUSE; BOARD_SIZE],
            stores: [0; NUM_STORES],
            turn: Side::First,
            finished: false,
            last_move: None,
        }
    }

    /// Sets up an arbitrary position after checking the board invariants.
    /// The termination rules are applied immediately, so the result may already be finished.
    pub fn from_parts(houses: &[i32], stores: &[i32], turn: Side) -> Result<Self, InvalidState> {
        if houses.len() != BOARD_SIZE {
            return Err(InvalidState::WrongHouseCount(houses.len()));
        }
        if stores.len() != NUM_STORES {
            return Err(InvalidState::WrongStoreCount(stores.len()));
        }
        if let Some((index, &seeds)) = houses.iter().enumerate().find(|&(_, &s)| s < 0) {
            return Err(InvalidState::NegativeHouse { index, seeds });
        }
        if let Some((index, &seeds)) = stores.iter().enumerate().find(|&(_, &s)| s < 0) {
            return Err(InvalidState::NegativeStore { index, seeds });
        }

        let total: i64 = houses.iter().chain(stores).map(|&s| i64::from(s)).sum();
        if total != i64::from(TOTAL_SEEDS) {
            return Err(InvalidState::WrongTotal(total));
        }

        // Every entry is now within 0..=TOTAL_SEEDS, which fits in a u8.
        let mut state = Self {
            houses: [0; BOARD_SIZE],
            stores: [0; NUM_STORES],
            turn,
            finished: false,
            last_move: None,
        };
        for (dst, &src) in state.houses.iter_mut().zip(houses) {
            *dst = src as u8;
        }
        for (dst, &src) in state.stores.iter_mut().zip(stores) {
            *dst = src as u8;
        }
        state.check_finished();
        Ok(state)
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Returns true once no further moves are possible.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Seeds in every house, indexed by absolute board position.
    pub fn houses(&self) -> &[u8; BOARD_SIZE] {
        &self.houses
    }

    /// Both stores, indexed by `Side::index`.
    pub fn stores(&self) -> &[u8; NUM_STORES] {
        &self.stores
    }

    /// Returns the number of seeds in `side`'s store.
    pub fn store(&self, side: Side) -> u8 {
        self.stores[side.index()]
    }

    /// Absolute index of the house played to reach this position, if any.
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Sum of all houses and stores. Always `TOTAL_SEEDS` for a valid state.
    pub fn total_seeds(&self) -> u32 {
        self.houses
            .iter()
            .chain(&self.stores)
            .map(|&s| u32::from(s))
            .sum()
    }

    /// Returns a copy of the position for read-only consumers.
    pub fn board_view(&self) -> BoardView {
        BoardView {
            houses: self.houses,
            stores: self.stores,
            turn: self.turn,
            finished: self.finished,
            last_move: self.last_move,
        }
    }

    /// Returns the 1-based house numbers the side to move may play, in ascending order.
    /// Empty once the game is finished.
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.finished {
            return Vec::new();
        }
        (1..=HOUSES_PER_SIDE)
            .filter(|&house| self.is_legal(house))
            .collect()
    }

    /// Returns true if `house` (1-based, on the mover's side) can be played.
    pub fn is_legal(&self, house: usize) -> bool {
        !self.finished
            && self
                .turn
                .house_index(house)
                .is_some_and(|index| self.houses[index] > 0)
    }

    /// Plays house number `house` (1..=6 on the mover's side) and returns the resulting state.
    /// `self` is left untouched whether or not the move is legal.
    pub fn apply_move(&self, house: usize) -> Result<Self, IllegalMove> {
        if self.finished {
            return Err(IllegalMove::GameOver);
        }
        let origin = self
            .turn
            .house_index(house)
            .ok_or(IllegalMove::OutOfRange(house))?;
        let seeds = usize::from(self.houses[origin]);
        if seeds == 0 {
            return Err(IllegalMove::EmptyHouse(house));
        }

        let mut next = self.clone();
        next.houses[origin] = 0;
        for step in 1..=seeds {
            next.houses[(origin + step) % BOARD_SIZE] += 1;
        }

        let last = (origin + seeds) % BOARD_SIZE;
        next.capture_chain(last, seeds.min(BOARD_SIZE), self.turn);

        next.turn = self.turn.opponent();
        next.last_move = Some(origin);
        next.check_finished();
        Ok(next)
    }

    /// Captures backward from `last` while houses hold 2, 4 or 6 seeds.
    /// Only the `sown` houses that received a seed this move are inspected.
    fn capture_chain(&mut self, last: usize, sown: usize, mover: Side) {
        for offset in 0..sown {
            let index = (last + BOARD_SIZE - offset) % BOARD_SIZE;
            let seeds = self.houses[index];
            if !is_capture_count(seeds) {
                break;
            }
            self.houses[index] = 0;
            self.stores[mover.index()] += seeds;
        }
    }

    /// Applies the termination rules. A majority ends the game as is; otherwise a side to move
    /// with no seeds ends it, sweeping the other side's houses into the other side's store.
    fn check_finished(&mut self) {
        if self.stores.iter().any(|&s| u32::from(s) > MAJORITY) {
            self.finished = true;
            return;
        }

        if self.side_is_empty(self.turn) {
            let other = self.turn.opponent();
            let mut swept = 0;
            for index in other.houses() {
                swept += std::mem::take(&mut self.houses[index]);
            }
            self.stores[other.index()] += swept;
            self.finished = true;
        }
    }

    /// Returns true if every house owned by `side` is empty.
    pub fn side_is_empty(&self, side: Side) -> bool {
        side.houses().all(|index| self.houses[index] == 0)
    }

    /// Returns the side with the larger store, or `None` if the stores are level.
    pub fn leader(&self) -> Option<Side> {
        let first = self.store(Side::First);
        let second = self.store(Side::Second);
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => Some(Side::First),
            std::cmp::Ordering::Less => Some(Side::Second),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(houses: [i32; BOARD_SIZE], stores: [i32; NUM_STORES], turn: Side) -> GameState {
        GameState::from_parts(&houses, &stores, turn).unwrap()
    }

    #[test]
    fn test_starting_position() {
        let state = GameState::new();
        assert_eq!(state.turn(), Side::First);
        assert_eq!(state.houses(), &[6; BOARD_SIZE]);
        assert_eq!(state.stores(), &[0, 0]);
        assert!(!state.is_finished());
        assert_eq!(state.last_move(), None);
        assert_eq!(state.total_seeds(), TOTAL_SEEDS);
        assert_eq!(state.legal_moves(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_opening_move_sows_without_capture() {
        let state = GameState::new();
        let next = state.apply_move(3).unwrap();

        assert_eq!(next.houses(), &[6, 6, 0, 7, 7, 7, 7, 7, 7, 6, 6, 6]);
        assert_eq!(next.stores(), &[0, 0]);
        assert_eq!(next.turn(), Side::Second);
        assert_eq!(next.last_move(), Some(2));
        assert!(!next.is_finished());
    }

    #[test]
    fn test_second_side_house_numbering() {
        let state = GameState::new().apply_move(1).unwrap();
        let next = state.apply_move(1).unwrap();
        // Second's house 1 is absolute index 6
        assert_eq!(next.last_move(), Some(6));
        assert_eq!(next.houses()[6], 0);
        assert_eq!(next.turn(), Side::First);
    }

    #[test]
    fn test_capture_chain_stops_at_first_miss() {
        // House 4 sows into indices 4, 5, 6 which become 5, 4, 2
        let state = state([5, 5, 5, 3, 4, 3, 1, 5, 5, 5, 5, 5], [11, 10], Side::First);
        let next = state.apply_move(4).unwrap();

        assert_eq!(next.store(Side::First), 11 + 2 + 4);
        assert_eq!(next.houses()[6], 0);
        assert_eq!(next.houses()[5], 0);
        assert_eq!(next.houses()[4], 5);
        assert_eq!(next.houses()[3], 0);
        assert_eq!(next.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_capture_chain_does_not_pass_origin() {
        // A single seed lands on 2; the emptied origin ends the chain
        let state = state([6, 6, 6, 6, 4, 1, 1, 6, 6, 6, 6, 6], [6, 6], Side::First);
        let next = state.apply_move(6).unwrap();

        assert_eq!(next.store(Side::First), 8);
        assert_eq!(next.houses()[6], 0);
        assert_eq!(next.houses()[5], 0);
        assert_eq!(next.houses()[4], 4);
    }

    #[test]
    fn test_capture_on_own_side() {
        // Second sows from index 11 around into index 0
        let state = state([1, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 1], [5, 5], Side::Second);
        let next = state.apply_move(6).unwrap();

        assert_eq!(next.store(Side::Second), 7);
        assert_eq!(next.houses()[0], 0);
        assert_eq!(next.houses()[11], 0);
    }

    #[test]
    fn test_long_sowing_wraps_past_origin() {
        // 13 seeds: every house gets one, the house after the origin gets two
        let state = state([13, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], [30, 29], Side::First);
        let next = state.apply_move(1).unwrap();

        assert_eq!(next.houses()[0], 1);
        // Index 1 ends on 2 and is captured; index 0 holds 1 and stops the chain
        assert_eq!(next.houses()[1], 0);
        assert_eq!(next.store(Side::First), 32);
        assert_eq!(next.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_majority_finishes_immediately() {
        let state = state([6, 6, 6, 6, 6, 5, 0, 0, 0, 0, 0, 0], [37, 0], Side::First);

        assert!(state.is_finished());
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.apply_move(1), Err(IllegalMove::GameOver));
        // No sweep when a majority ends the game
        assert_eq!(state.houses()[0], 6);
        assert_eq!(state.stores(), &[37, 0]);
    }

    #[test]
    fn test_starvation_sweeps_opponent_houses() {
        let state = state([1, 2, 3, 4, 5, 6, 0, 0, 0, 0, 0, 0], [20, 31], Side::Second);

        assert!(state.is_finished());
        assert_eq!(state.houses(), &[0; BOARD_SIZE]);
        assert_eq!(state.stores(), &[41, 31]);
        assert_eq!(state.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_starvation_after_move() {
        // First captures Second's last seeds; Second cannot move, First's houses are swept
        let state = state([2, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0], [34, 34], Side::First);
        let next = state.apply_move(6).unwrap();

        assert!(next.is_finished());
        assert_eq!(next.stores(), &[38, 34]);
        assert_eq!(next.houses(), &[0; BOARD_SIZE]);
    }

    #[test]
    fn test_majority_checked_before_starvation() {
        // The capture gives First 37; Second is also empty but nothing is swept
        let state = state([2, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0], [35, 33], Side::First);
        let next = state.apply_move(6).unwrap();

        assert!(next.is_finished());
        assert_eq!(next.stores(), &[37, 33]);
        assert_eq!(next.houses()[0], 2);
    }

    #[test]
    fn test_mover_may_empty_own_side() {
        // Only the side about to move is checked for starvation
        let state = state([0, 0, 0, 0, 0, 1, 6, 6, 6, 6, 6, 6], [20, 15], Side::First);
        let next = state.apply_move(6).unwrap();

        assert!(!next.is_finished());
        assert!(next.side_is_empty(Side::First));
        assert_eq!(next.turn(), Side::Second);
    }

    #[test]
    fn test_losing_position_is_still_playable() {
        // Second is one seed from a majority; First still has ordinary moves
        let state = state([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 35], [0, 36], Side::First);

        assert!(!state.is_finished());
        assert_eq!(state.legal_moves(), vec![1]);
        assert!(state.apply_move(1).is_ok());
    }

    #[test]
    fn test_illegal_moves_leave_state_untouched() {
        let state = state([0, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 12], [0, 0], Side::First);
        let before = state.clone();

        assert_eq!(state.apply_move(0), Err(IllegalMove::OutOfRange(0)));
        assert_eq!(state.apply_move(7), Err(IllegalMove::OutOfRange(7)));
        assert_eq!(state.apply_move(1), Err(IllegalMove::EmptyHouse(1)));
        assert_eq!(state, before);
        assert!(!state.is_legal(1));
        assert_eq!(state.legal_moves(), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            GameState::from_parts(&[6; 11], &[0, 6], Side::First),
            Err(InvalidState::WrongHouseCount(11))
        );
        assert_eq!(
            GameState::from_parts(&[6; 12], &[0], Side::First),
            Err(InvalidState::WrongStoreCount(1))
        );
        assert_eq!(
            GameState::from_parts(&[6, -1, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6], &[0, 7], Side::First),
            Err(InvalidState::NegativeHouse { index: 1, seeds: -1 })
        );
        assert_eq!(
            GameState::from_parts(&[6; 12], &[2, -2], Side::First),
            Err(InvalidState::NegativeStore { index: 1, seeds: -2 })
        );
        assert_eq!(
            GameState::from_parts(&[6; 12], &[1, 0], Side::First),
            Err(InvalidState::WrongTotal(73))
        );
    }

    #[test]
    fn test_apply_move_is_deterministic() {
        let state = GameState::new().apply_move(2).unwrap();
        assert_eq!(state.apply_move(5), state.apply_move(5));
    }

    #[test]
    fn test_board_view_is_a_copy() {
        let state = GameState::new();
        let mut view = state.board_view();
        view.houses[0] = 0;
        assert_eq!(state.houses()[0], 6);
        assert_eq!(view.turn, Side::First);
        assert!(!view.finished);
    }

    #[test]
    fn test_leader() {
        assert_eq!(GameState::new().leader(), None);
        let state = state([6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 0, 0], [7, 5], Side::First);
        assert_eq!(state.leader(), Some(Side::First));
    }
}
