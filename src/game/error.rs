use super::player_pool::PlayerId;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GameError {
    #[error("player not found")]
    PlayerNotFound,
    #[error("invalid number of players (expected: {expected}, found: {found})")]
    InvalidPlayersNumber { expected: usize, found: usize },
    #[error("duplicate player id")]
    DuplicatePlayerId,
    #[error("column {found} is out of range (expected: 0-{max_expected})")]
    ColumnOutOfRange { max_expected: usize, found: usize },
    #[error("column {col} is full")]
    ColumnFull { col: usize },
    #[error("can't make turn on a finished game")]
    GameIsFinished,
    #[error("other player's turn (expected: {expected}, found: {found})")]
    NotYourTurn { expected: PlayerId, found: PlayerId },
    #[error("failed to switch players in the pool")]
    PlayerPoolCorrupted,
}

impl GameError {
    pub fn invalid_players_number(expected: usize, found: usize) -> Self {
        Self::InvalidPlayersNumber { expected, found }
    }

    pub fn column_out_of_range(max_expected: usize, found: usize) -> Self {
        Self::ColumnOutOfRange {
            max_expected,
            found,
        }
    }

    pub fn column_full(col: usize) -> Self {
        Self::ColumnFull { col }
    }

    pub fn not_your_turn(expected: PlayerId, found: PlayerId) -> Self {
        Self::NotYourTurn { expected, found }
    }
}
