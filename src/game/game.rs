use super::error::GameError;
use super::player_pool::{PlayerId, PlayerPool, WithPlayerId};

pub type GameResult<T> = Result<T, GameError>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FinishedState {
    Win(PlayerId),
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameState {
    Turn(PlayerId),
    Finished(FinishedState),
}

/// Turn-based game driven by one state machine:
/// `Turn(player)` until a move produces `Finished(Win)` or `Finished(Draw)`.
pub trait Game: Sized {
    type TurnData;
    type Player: Clone + WithPlayerId;

    fn new(players: &[PlayerId]) -> GameResult<Self>;
    fn update(&mut self, id: PlayerId, data: Self::TurnData) -> GameResult<GameState>;

    fn players(&self) -> &PlayerPool<Self::Player>;
    fn players_mut(&mut self) -> &mut PlayerPool<Self::Player>;

    fn state(&self) -> GameState;
    fn set_state(&mut self, state: GameState);

    fn is_finished(&self) -> bool {
        matches!(self.state(), GameState::Finished(_))
    }

    fn set_draw(&mut self) -> GameState {
        self.set_state(GameState::Finished(FinishedState::Draw));
        self.state()
    }

    fn set_winner(&mut self, id: PlayerId) -> GameState {
        self.set_state(GameState::Finished(FinishedState::Win(id)));
        self.state()
    }

    fn get_current_player(&mut self) -> GameResult<&Self::Player> {
        self.players_mut()
            .get_current()
            .ok_or(GameError::PlayerPoolCorrupted)
    }

    fn switch_player(&mut self) -> GameResult<GameState> {
        let next_player = self
            .players_mut()
            .next()
            .ok_or(GameError::PlayerPoolCorrupted)?
            .get_id();
        self.set_state(GameState::Turn(next_player));
        Ok(self.state())
    }
}
