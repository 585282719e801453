use crate::display::{draw_board, house_column, status_line};
use bohnen_agents::{Agent, MinimaxAgent};
use bohnen_core::{GameState, IllegalMove, Side, HOUSES_PER_SIDE};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use std::io::{self, Write};

pub struct InteractiveGame {
    state: GameState,
    human: Side,
    engine: MinimaxAgent,
    /// House number (1..=6) the cursor is on
    cursor: usize,
    message: String,
    history: Vec<(Side, usize)>,
}

impl InteractiveGame {
    pub fn new(human: Side, depth: u8) -> Self {
        Self {
            state: GameState::new(),
            human,
            engine: MinimaxAgent::new(depth),
            cursor: 1,
            message: String::from("Left/Right or 1-6 to pick a house, Enter to sow, q to quit"),
            history: Vec::new(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;

        let result = self.game_loop();

        stdout.execute(Show)?;
        terminal::disable_raw_mode()?;
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;

        result
    }

    fn game_loop(&mut self) -> io::Result<()> {
        loop {
            if !self.state.is_finished() && self.state.turn() != self.human {
                self.engine_move()?;
            }
            if self.state.is_finished() {
                self.message = format!(
                    "{}. n for a new game, q to quit",
                    status_line(&self.state.board_view())
                );
            }
            self.draw()?;

            let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor),
                KeyCode::Char(c @ '1'..='6') => {
                    if let Some(house) = c.to_digit(10) {
                        self.cursor = house as usize;
                        self.play(self.cursor);
                    }
                }
                KeyCode::Char('u') => self.undo_move(),
                KeyCode::Char('n') => self.new_game(),
                _ => {}
            }
        }

        Ok(())
    }

    fn move_cursor(&mut self, delta: isize) {
        self.cursor = self
            .cursor
            .saturating_add_signed(delta)
            .clamp(1, HOUSES_PER_SIDE);
    }

    fn play(&mut self, house: usize) {
        match self.state.apply_move(house) {
            Ok(next) => {
                self.state = next;
                self.history.push((self.human, house));
                self.message = format!("You sowed house {house}");
            }
            Err(IllegalMove::EmptyHouse(_)) => {
                self.message = format!("House {house} is empty, pick another");
            }
            Err(e) => self.message = e.to_string(),
        }
    }

    fn engine_move(&mut self) -> io::Result<()> {
        self.message = String::from("Engine thinking...");
        self.draw()?;
        self.engine_reply();
        Ok(())
    }

    /// Lets the engine choose through the `Agent` interface and applies its move.
    fn engine_reply(&mut self) {
        let house = self.engine.choose_move(&self.state);
        match self.state.apply_move(house) {
            Ok(next) => {
                self.state = next;
                self.history.push((self.human.opponent(), house));
                self.message = format!("Engine sowed house {house}");
            }
            Err(e) => self.message = format!("Engine failed to move: {e}"),
        }
    }

    fn undo_move(&mut self) {
        // Take back the last human move along with any engine reply to it
        let Some(last_human) = self.history.iter().rposition(|&(side, _)| side == self.human)
        else {
            self.message = String::from("Nothing to undo");
            return;
        };
        self.history.truncate(last_human);

        let replayed = self
            .history
            .iter()
            .try_fold(GameState::new(), |state, &(_, house)| state.apply_move(house));
        match replayed {
            Ok(state) => {
                self.state = state;
                self.message = String::from("Undid last move");
            }
            Err(e) => {
                self.new_game();
                self.message = format!("Could not replay the game ({e}), started over");
            }
        }
    }

    fn new_game(&mut self) {
        self.state = GameState::new();
        self.history.clear();
        self.cursor = 1;
        self.message = String::from("New game started!");
    }

    fn draw(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
        queue!(
            stdout,
            Print("Bohnenspiel - Interactive Mode\r\n"),
            Print("Keys: Left/Right=pick, Enter=sow, 1-6=sow house, u=undo, n=new, q=quit\r\n"),
            Print("\r\n")
        )?;

        draw_board(&mut stdout, &self.state.board_view(), self.human, "\r\n")?;

        let marker = if self.state.turn() == self.human && !self.state.is_finished() {
            format!("{:>width$}", "^", width = house_column(self.cursor) + 1)
        } else {
            String::new()
        };
        queue!(
            stdout,
            Print(marker),
            Print("\r\n\r\n"),
            Print(format!("You play {} | Move {}\r\n", self.human, self.history.len() + 1)),
            Print("\r\n"),
            Print(format!("{}\r\n", self.message))
        )?;

        stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_move_and_engine_reply() {
        let mut game = InteractiveGame::new(Side::First, 2);
        game.play(3);
        assert_eq!(game.state.turn(), Side::Second);
        assert_eq!(game.history, vec![(Side::First, 3)]);

        game.engine_reply();
        assert_eq!(game.state.turn(), Side::First);
        assert_eq!(game.history.len(), 2);
        assert_eq!(game.history[1].0, Side::Second);
    }

    #[test]
    fn test_empty_house_is_rejected() {
        let mut game = InteractiveGame::new(Side::First, 2);
        game.state = GameState::from_parts(
            &[0, 6, 6, 6, 6, 6, 7, 7, 7, 7, 7, 1],
            &[3, 3],
            Side::First,
        )
        .unwrap();
        let before = game.state.clone();

        game.play(1);
        assert_eq!(game.state, before);
        assert_eq!(game.message, "House 1 is empty, pick another");
    }

    #[test]
    fn test_undo_takes_back_move_and_reply() {
        let mut game = InteractiveGame::new(Side::First, 2);
        game.play(4);
        game.engine_reply();
        let after_first_round = game.state.clone();
        game.play(2);
        game.engine_reply();

        game.undo_move();
        assert_eq!(game.state, after_first_round);
        assert_eq!(game.history.len(), 2);

        game.undo_move();
        assert_eq!(game.state, GameState::new());
        game.undo_move();
        assert_eq!(game.message, "Nothing to undo");
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut game = InteractiveGame::new(Side::Second, 2);
        game.move_cursor(-1);
        assert_eq!(game.cursor, 1);
        for _ in 0..10 {
            game.move_cursor(1);
        }
        assert_eq!(game.cursor, HOUSES_PER_SIDE);
    }
}
