use std::fmt::{Display, Formatter};

use smallvec::SmallVec;

use super::error::GameError;
use super::game::{Game, GameResult, GameState};
use super::grid::{Grid, GridIndex, Step};
use super::player_pool::{PlayerId, PlayerPool, WithPlayerId};

pub const DEFAULT_WIDTH: usize = 8;
pub const DEFAULT_HEIGHT: usize = 6;

/// Number of contiguous same-team pieces that wins the game.
pub const STREAK_LENGTH: usize = 4;

/// Scan axes in tie-break order: horizontal, vertical, then the two
/// diagonals. The window around the last piece is symmetric, so the sign
/// of each delta pair does not matter.
const AXES: [Step; 4] = [(0, 1), (1, 0), (-1, 1), (1, 1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub fn other(self) -> Self {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::One => write!(f, "1"),
            Team::Two => write!(f, "2"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Piece(Team),
    /// Terminal display-only state for cells of the winning streak.
    WinMarker,
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => write!(f, "0"),
            Cell::Piece(team) => write!(f, "{team}"),
            Cell::WinMarker => write!(f, "*"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    id: PlayerId,
    team: Team,
}

impl Player {
    pub fn new(id: PlayerId, team: Team) -> Self {
        Self { id, team }
    }

    pub fn team(&self) -> Team {
        self.team
    }
}

impl WithPlayerId for Player {
    fn get_id(&self) -> PlayerId {
        self.id
    }
}

/// Coordinates of four contiguous colinear same-team pieces.
pub type WinningStreak = SmallVec<[GridIndex; STREAK_LENGTH]>;

/// The Connect Four board: a grid of cells plus the gravity rule.
/// Invariant: in every column the occupied cells form a contiguous run
/// starting at row 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    grid: Grid<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: Grid::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn get(&self, index: GridIndex) -> Cell {
        self.grid[index]
    }

    /// Lowest empty row of `col`, or [`None`] when the column is full.
    fn landing_row(&self, col: usize) -> Option<usize> {
        (0..self.height()).find(|&row| self.grid[(row, col).into()] == Cell::Empty)
    }

    /// Row of the topmost occupied cell of `col`, i.e. the piece placed
    /// there most recently.
    fn top_piece_row(&self, col: usize) -> Option<usize> {
        (0..self.height())
            .rev()
            .find(|&row| self.grid[(row, col).into()] != Cell::Empty)
    }

    /// Drops a piece into `col` and returns the row it landed in.
    /// Exactly one cell mutates; on error the board is unchanged.
    pub fn drop_piece(&mut self, col: usize, team: Team) -> GameResult<usize> {
        if col >= self.width() {
            return Err(GameError::column_out_of_range(self.width() - 1, col));
        }
        let row = self
            .landing_row(col)
            .ok_or_else(|| GameError::column_full(col))?;
        self.grid[(row, col).into()] = Cell::Piece(team);
        Ok(row)
    }

    pub fn is_column_full(&self, col: usize) -> bool {
        self.landing_row(col).is_none()
    }

    pub fn is_full(&self) -> bool {
        (0..self.width()).all(|col| self.is_column_full(col))
    }

    /// Checks whether the piece most recently dropped into `last_col`
    /// completed a streak. Only cells within [`STREAK_LENGTH`] - 1 steps of
    /// that piece can participate in a newly completed streak, so each axis
    /// scans a window of at most 7 cells centered on it. The first streak
    /// found in axis order is returned.
    pub fn check_win(&self, last_col: usize) -> Option<WinningStreak> {
        let row = self.top_piece_row(last_col)?;
        let pos = GridIndex::new(row, last_col);
        let Cell::Piece(team) = self.grid[pos] else {
            return None;
        };

        for step in AXES {
            let behind: Vec<(GridIndex, &Cell)> = self
                .grid
                .ray_iter(pos, (-step.0, -step.1))
                .take(STREAK_LENGTH)
                .collect();
            let window: Vec<(GridIndex, &Cell)> = behind
                .into_iter()
                .rev()
                .chain(self.grid.ray_iter(pos, step).skip(1).take(STREAK_LENGTH - 1))
                .collect();

            for group in window.windows(STREAK_LENGTH) {
                if group.iter().all(|&(_, cell)| *cell == Cell::Piece(team)) {
                    return Some(group.iter().map(|&(index, _)| index).collect());
                }
            }
        }
        None
    }

    /// Overwrites the streak cells with the win marker. Display-only and
    /// terminal: the gravity invariant no longer holds for marked columns.
    pub fn mark_winning_cells(&mut self, streak: &WinningStreak) {
        for &index in streak {
            self.grid[index] = Cell::WinMarker;
        }
    }

    /// Resets every cell to [`Cell::Empty`].
    pub fn clear(&mut self) {
        self.grid.fill(Cell::Empty);
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for col in 1..=self.width() {
            write!(f, "{col} ")?;
        }
        writeln!(f)?;
        for _ in 0..self.width() * 2 - 1 {
            write!(f, "-")?;
        }
        writeln!(f)?;
        // row 0 is the bottom, so render top-down
        for row in (0..self.height()).rev() {
            for col in 0..self.width() {
                write!(f, "{} ", self.grid[(row, col).into()])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ConnectFour {
    players: PlayerPool<Player>,
    state: GameState,
    board: Board,
    winning_streak: Option<WinningStreak>,
}

impl ConnectFour {
    /// Creates a game on a `width` x `height` board. The first id in
    /// `players` gets [`Team::One`] and moves first.
    pub fn with_board_size(players: &[PlayerId], width: usize, height: usize) -> GameResult<Self> {
        let [id1, id2]: [_; 2] = players
            .try_into()
            .map_err(|_| GameError::invalid_players_number(2, players.len()))?;
        if id1 == id2 {
            return Err(GameError::DuplicatePlayerId);
        }
        let p1 = Player::new(id1, Team::One);
        let p2 = Player::new(id2, Team::Two);
        Ok(Self {
            players: PlayerPool::new(vec![p1, p2]),
            state: GameState::Turn(id1),
            board: Board::new(width, height),
            winning_streak: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn winning_streak(&self) -> Option<&WinningStreak> {
        self.winning_streak.as_ref()
    }

    /// Marks the recorded winning streak on the board for display.
    pub fn highlight_win(&mut self) {
        if let Some(streak) = self.winning_streak.as_ref() {
            self.board.mark_winning_cells(streak);
        }
    }

    pub fn get_player_by_team(&self, team: Team) -> GameResult<&Player> {
        self.players
            .find_if(|player| player.team == team)
            .ok_or(GameError::PlayerNotFound)
    }

    /// Starts a fresh game on the same board: clears all cells and gives
    /// the first player the turn again.
    pub fn reset(&mut self) -> GameResult<()> {
        self.board.clear();
        self.winning_streak = None;
        self.players.reset();
        let first = self
            .players
            .as_slice()
            .first()
            .ok_or(GameError::PlayerPoolCorrupted)?
            .get_id();
        self.state = GameState::Turn(first);
        Ok(())
    }
}

impl Game for ConnectFour {
    /// Zero-based column to drop the piece into.
    type TurnData = usize;
    type Player = Player;

    fn new(players: &[PlayerId]) -> GameResult<Self> {
        Self::with_board_size(players, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    fn update(&mut self, id: PlayerId, col: Self::TurnData) -> GameResult<GameState> {
        if self.is_finished() {
            return Err(GameError::GameIsFinished);
        }
        let current = *self.get_current_player()?;
        if id != current.get_id() {
            return Err(GameError::not_your_turn(current.get_id(), id));
        }

        self.board.drop_piece(col, current.team)?;

        // The win check comes first: the move that fills the board can also
        // be the winning move, and then it must count as a win, not a draw.
        if let Some(streak) = self.board.check_win(col) {
            self.winning_streak = Some(streak);
            return Ok(self.set_winner(current.get_id()));
        }
        if self.board.is_full() {
            return Ok(self.set_draw());
        }
        self.switch_player()
    }

    fn players(&self) -> &PlayerPool<Player> {
        &self.players
    }

    fn players_mut(&mut self) -> &mut PlayerPool<Player> {
        &mut self.players
    }

    fn state(&self) -> GameState {
        self.state
    }

    fn set_state(&mut self, state: GameState) {
        self.state = state;
    }
}
