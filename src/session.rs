use std::io::{self, Write};

use crate::game::{Board, ConnectFour, FinishedState, Game, GameResult, GameState, Team};

/// Rejected user input. Every variant is recoverable: the session reports
/// it and asks again without touching the game state.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum InvalidInput {
    #[error("'{input}' is not a number, please enter a column from 1 to {max_expected}")]
    NotANumber { input: String, max_expected: usize },
    #[error("column {found} is out of range, please enter a column from 1 to {max_expected}")]
    OutOfRange { max_expected: usize, found: i64 },
    #[error("illegal move, column {col} is full!")]
    FullColumn { col: usize },
}

/// Source of column choices for the player to move.
/// Implementations get a read-only view of the board and return one raw
/// text token, or [`None`] when no more input is available.
#[cfg_attr(test, mockall::automock)]
pub trait FetchInput {
    fn fetch(&mut self, board: &Board, team: Team) -> Option<String>;
}

/// Reads column choices from standard input, one line per prompt.
pub struct StdinInput;

impl FetchInput for StdinInput {
    fn fetch(&mut self, _board: &Board, team: Team) -> Option<String> {
        print!("Player {team}: which column would you like to place your piece in?\n>>> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                println!();
                Some(line)
            }
        }
    }
}

/// Drives one game of Connect Four: prompts for columns, validates them,
/// submits accepted moves and reports the outcome.
///
/// The turn counter starts at 1 and advances only on accepted moves;
/// rejected input leaves both the counter and the player to move unchanged.
pub struct GameSession<I> {
    game: ConnectFour,
    input: I,
    turn_count: u32,
}

impl<I: FetchInput> GameSession<I> {
    pub fn new(game: ConnectFour, input: I) -> Self {
        Self {
            game,
            input,
            turn_count: 1,
        }
    }

    pub fn game(&self) -> &ConnectFour {
        &self.game
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Parses a raw token into a zero-based column, checking numeric form,
    /// range and column fullness in that order.
    fn parse_column(token: &str, board: &Board) -> Result<usize, InvalidInput> {
        let max_expected = board.width();
        let found: i64 = token.parse().map_err(|_| InvalidInput::NotANumber {
            input: token.to_string(),
            max_expected,
        })?;
        if found < 1 || found as usize > max_expected {
            return Err(InvalidInput::OutOfRange {
                max_expected,
                found,
            });
        }
        let col = found as usize - 1;
        if board.is_column_full(col) {
            return Err(InvalidInput::FullColumn { col: col + 1 });
        }
        Ok(col)
    }

    /// Runs the game to completion. Returns the final state, or [`None`]
    /// when the input source dries up mid-game.
    pub fn run(&mut self) -> GameResult<Option<FinishedState>> {
        while let GameState::Turn(id) = self.game.state() {
            println!("---- TURN: {} ----", self.turn_count);
            println!("{}", self.game.board());

            let team = self.game.get_current_player()?.team();
            let Some(token) = self.input.fetch(self.game.board(), team) else {
                return Ok(None);
            };

            match Self::parse_column(token.trim(), self.game.board()) {
                Ok(col) => {
                    if let GameState::Turn(_) = self.game.update(id, col)? {
                        self.turn_count += 1;
                    }
                }
                Err(invalid) => println!("{invalid}"),
            }
        }

        let GameState::Finished(result) = self.game.state() else {
            return Ok(None);
        };
        match result {
            FinishedState::Win(id) => {
                let team = self
                    .game
                    .players()
                    .find(id)
                    .ok_or(crate::game::GameError::PlayerNotFound)?
                    .team();
                self.game.highlight_win();
                println!("*** Finish! Winner: Player {team}");
                println!("Total turns: {}", self.turn_count);
                println!("{}", self.game.board());
            }
            FinishedState::Draw => {
                println!("\n*** Finish! TIE!");
                println!("{}", self.game.board());
            }
        }
        Ok(Some(result))
    }
}

#[cfg(test)]
mod test {
    use std::collections::VecDeque;

    use super::*;
    use crate::game::{Cell, GridIndex};

    fn scripted(tokens: &[&'static str]) -> MockFetchInput {
        let mut script: VecDeque<&str> = tokens.iter().copied().collect();
        let mut input = MockFetchInput::new();
        input
            .expect_fetch()
            .returning(move |_, _| script.pop_front().map(str::to_string));
        input
    }

    fn session(tokens: &[&'static str]) -> GameSession<MockFetchInput> {
        let game = ConnectFour::new(&[1, 2]).unwrap();
        GameSession::new(game, scripted(tokens))
    }

    #[test]
    fn test_parse_column_rejects_non_numeric() {
        let board = Board::new(8, 6);
        for token in ["one", "2s", "1.5", ""] {
            assert_eq!(
                GameSession::<StdinInput>::parse_column(token, &board),
                Err(InvalidInput::NotANumber {
                    input: token.to_string(),
                    max_expected: 8,
                })
            );
        }
    }

    #[test]
    fn test_parse_column_rejects_out_of_range() {
        let board = Board::new(8, 6);
        for found in [0, 9, -3] {
            assert_eq!(
                GameSession::<StdinInput>::parse_column(&found.to_string(), &board),
                Err(InvalidInput::OutOfRange {
                    max_expected: 8,
                    found,
                })
            );
        }
    }

    #[test]
    fn test_parse_column_rejects_full_column() {
        let mut board = Board::new(8, 6);
        for _ in 0..6 {
            board.drop_piece(2, Team::One).unwrap();
        }
        assert_eq!(
            GameSession::<StdinInput>::parse_column("3", &board),
            Err(InvalidInput::FullColumn { col: 3 })
        );
    }

    #[test]
    fn test_parse_column_accepts_one_based_input() {
        let board = Board::new(8, 6);
        assert_eq!(GameSession::<StdinInput>::parse_column("1", &board), Ok(0));
        assert_eq!(GameSession::<StdinInput>::parse_column("8", &board), Ok(7));
    }

    #[test]
    fn test_vertical_win_game() {
        let mut session = session(&["1", "2", "1", "2", "1", "2", "1"]);
        let result = session.run().unwrap();
        assert_eq!(result, Some(FinishedState::Win(1)));
        assert_eq!(session.turn_count(), 7);
        // winning cells are marked on the final board
        for row in 0..4 {
            assert_eq!(
                session.game().board().get(GridIndex::new(row, 0)),
                Cell::WinMarker
            );
        }
    }

    #[test]
    fn test_invalid_input_reprompts_without_consuming_a_turn() {
        let mut session = session(&[
            "abc", "0", "99", "1", "2", "1", "2", "1", "2", "1",
        ]);
        let result = session.run().unwrap();
        // the three rejected tokens had no effect on the game
        assert_eq!(result, Some(FinishedState::Win(1)));
        assert_eq!(session.turn_count(), 7);
    }

    #[test]
    fn test_input_ending_mid_game_returns_no_result() {
        let mut session = session(&["1", "2"]);
        assert_eq!(session.run().unwrap(), None);
        assert_eq!(session.turn_count(), 3);
    }

    #[test]
    fn test_full_column_feedback_mid_game() {
        // column 1 fills after six pieces; the seventh attempt is rejected
        // and the same player then wins in column 2
        let mut session = session(&[
            "1", "1", "1", "1", "1", "1", "1", "2", "3", "2", "4", "2", "5", "2",
        ]);
        let result = session.run().unwrap();
        assert_eq!(result, Some(FinishedState::Win(1)));
        assert_eq!(session.turn_count(), 13);
    }
}
