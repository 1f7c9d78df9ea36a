pub mod connect_four;
pub mod error;
pub mod game;
pub mod grid;
pub mod player_pool;

pub use connect_four::{Board, Cell, ConnectFour, Player, Team, WinningStreak};
pub use error::GameError;
pub use game::{FinishedState, Game, GameResult, GameState};
pub use grid::{Grid, GridIndex};
pub use player_pool::{PlayerId, PlayerPool, WithPlayerId};
