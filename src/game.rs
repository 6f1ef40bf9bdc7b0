//! Core game state and logic

use crate::board::{BOARD_WIDTH, Board};
use crate::gravity::{DropClock, drop_interval_ms};
use crate::piece::Piece;
use crate::score::Score;
use crate::spawner::{PieceSource, RandomSource};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Before the first start
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    TogglePause,
    Start,
    Restart,
}

/// The main game struct
///
/// Entirely driven from outside: discrete actions via
/// [`Game::process_action`] and elapsed frame time via [`Game::tick`].
/// Every call is synchronous; blocked moves and actions that the current
/// state does not accept are silent no-ops.
pub struct Game {
    /// The game board
    pub board: Board,
    /// Current falling piece
    pub current: Option<Piece>,
    /// One-slot lookahead; promoted to current on spawn
    pub next: Option<Piece>,
    /// Score tracking
    pub score: Score,
    /// Current game state
    pub state: GameState,
    /// Automatic drop timing
    clock: DropClock,
    /// Piece selection
    source: Box<dyn PieceSource>,
}

impl Game {
    /// Create a new game with a randomly seeded piece source
    pub fn new() -> Self {
        Self::with_source(Box::new(RandomSource::new()))
    }

    /// Create a new game with a fixed seed (reproducible runs)
    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(Box::new(RandomSource::with_seed(seed)))
    }

    /// Create a new game with a custom piece source
    pub fn with_source(source: Box<dyn PieceSource>) -> Self {
        Self {
            board: Board::new(),
            current: None,
            next: None,
            score: Score::new(),
            state: GameState::Idle,
            clock: DropClock::new(),
            source,
        }
    }

    /// Process an action, subject to the current state
    pub fn process_action(&mut self, action: Action) {
        match self.state {
            GameState::Idle | GameState::GameOver => match action {
                Action::Start | Action::Restart => self.begin(),
                _ => {}
            },
            GameState::Paused => match action {
                Action::TogglePause => self.state = GameState::Running,
                Action::Restart => self.begin(),
                _ => {}
            },
            GameState::Running => match action {
                Action::MoveLeft => self.shift(-1),
                Action::MoveRight => self.shift(1),
                Action::SoftDrop => self.soft_drop(),
                Action::HardDrop => self.hard_drop(),
                Action::Rotate => self.rotate(),
                Action::TogglePause => self.state = GameState::Paused,
                Action::Restart => self.begin(),
                Action::Start => {}
            },
        }
    }

    /// Feed elapsed frame time to the drop clock (call every frame).
    /// While paused or stopped, time is simply not delivered.
    pub fn tick(&mut self, delta_ms: u64) {
        if self.state != GameState::Running {
            return;
        }
        if self.clock.advance(delta_ms, drop_interval_ms(self.score.level)) {
            self.soft_drop();
        }
    }

    /// Start a fresh game: empty board, zeroed score, new piece pair
    fn begin(&mut self) {
        self.board = Board::new();
        self.score = Score::new();
        self.clock.reset();
        self.current = None;
        self.next = Some(Piece::spawn(self.source.next_kind()));
        self.state = GameState::Running;
        self.spawn();
    }

    /// Promote the lookahead piece to active and draw a new lookahead.
    ///
    /// If the freshly placed piece already collides the game is over; the
    /// piece stays visible but is never merged. This is the sole game-over
    /// trigger.
    fn spawn(&mut self) {
        let mut piece = self
            .next
            .take()
            .unwrap_or_else(|| Piece::spawn(self.source.next_kind()));
        piece.x = ((BOARD_WIDTH - piece.width()) / 2) as i32;
        piece.y = 0;
        self.next = Some(Piece::spawn(self.source.next_kind()));

        if self.board.collides(&piece) {
            self.state = GameState::GameOver;
        }
        self.current = Some(piece);
    }

    /// Try to move the piece horizontally; blocked moves are dropped
    fn shift(&mut self, dx: i32) {
        let Some(piece) = &self.current else { return };
        let moved = piece.translated(dx, 0);
        if !self.board.collides(&moved) {
            self.current = Some(moved);
        }
    }

    /// Move the piece down one row, or lock it if the step is blocked.
    /// Both the drop clock and the manual down command land here.
    fn soft_drop(&mut self) {
        let Some(piece) = &self.current else { return };
        let stepped = piece.translated(0, 1);
        if self.board.collides(&stepped) {
            self.lock_current();
        } else {
            self.current = Some(stepped);
        }
    }

    /// Drop the piece straight to its resting row and lock it there
    fn hard_drop(&mut self) {
        let Some(piece) = &self.current else { return };
        let mut landed = piece.clone();
        loop {
            let stepped = landed.translated(0, 1);
            if self.board.collides(&stepped) {
                break;
            }
            landed = stepped;
        }
        self.current = Some(landed);
        self.lock_current();
    }

    /// Rotate the piece clockwise with a fixed three-step kick: in place,
    /// one column right, one column left. First fit wins; if all three are
    /// blocked the rotation has no effect.
    fn rotate(&mut self) {
        let Some(piece) = &self.current else { return };
        let rotated = piece.rotated_cw();
        for dx in [0, 1, -1] {
            let candidate = rotated.translated(dx, 0);
            if !self.board.collides(&candidate) {
                self.current = Some(candidate);
                return;
            }
        }
    }

    /// Merge the piece into the board, clear lines, spawn the next piece
    fn lock_current(&mut self) {
        let Some(piece) = self.current.take() else { return };
        self.board.merge(&piece);
        let cleared = self.board.clear_full_rows();
        self.score.record_clear(cleared);
        self.spawn();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BOARD_HEIGHT;
    use crate::tetromino::TetrominoKind;

    /// Cycles through a fixed list of kinds forever
    struct ScriptedSource {
        kinds: Vec<TetrominoKind>,
        index: usize,
    }

    impl PieceSource for ScriptedSource {
        fn next_kind(&mut self) -> TetrominoKind {
            let kind = self.kinds[self.index % self.kinds.len()];
            self.index += 1;
            kind
        }
    }

    fn started_game(kinds: &[TetrominoKind]) -> Game {
        let mut game = Game::with_source(Box::new(ScriptedSource {
            kinds: kinds.to_vec(),
            index: 0,
        }));
        game.process_action(Action::Start);
        game
    }

    fn filled_cells(game: &Game) -> usize {
        game.board
            .rows()
            .iter()
            .map(|row| row.iter().filter(|c| c.is_some()).count())
            .sum()
    }

    #[test]
    fn test_idle_rejects_play_actions() {
        let mut game = Game::with_seed(1);
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::SoftDrop,
            Action::HardDrop,
            Action::Rotate,
            Action::TogglePause,
        ] {
            game.process_action(action);
        }
        assert_eq!(game.state, GameState::Idle);
        assert!(game.current.is_none());
        assert!(game.next.is_none());
    }

    #[test]
    fn test_start_spawns_piece_pair() {
        let game = started_game(&[TetrominoKind::T, TetrominoKind::I]);
        assert_eq!(game.state, GameState::Running);
        let current = game.current.as_ref().unwrap();
        assert_eq!(current.kind, TetrominoKind::T);
        assert_eq!((current.x, current.y), (3, 0));
        assert_eq!(game.next.as_ref().unwrap().kind, TetrominoKind::I);
        assert_eq!(game.score, Score::new());
    }

    #[test]
    fn test_start_is_ignored_while_running() {
        let mut game = started_game(&[TetrominoKind::O]);
        game.process_action(Action::SoftDrop);
        let before = game.current.clone();
        game.process_action(Action::Start);
        assert_eq!(game.state, GameState::Running);
        assert_eq!(game.current, before);
    }

    #[test]
    fn test_move_stops_at_left_wall() {
        let mut game = started_game(&[TetrominoKind::O]);
        for _ in 0..4 {
            game.process_action(Action::MoveLeft);
        }
        assert_eq!(game.current.as_ref().unwrap().x, 0);
        game.process_action(Action::MoveLeft);
        assert_eq!(game.current.as_ref().unwrap().x, 0);
        assert_eq!(game.state, GameState::Running);
    }

    #[test]
    fn test_soft_drop_steps_down() {
        let mut game = started_game(&[TetrominoKind::T]);
        game.process_action(Action::SoftDrop);
        assert_eq!(game.current.as_ref().unwrap().y, 1);
        assert_eq!(filled_cells(&game), 0);
    }

    #[test]
    fn test_soft_drop_locks_on_contact() {
        let mut game = started_game(&[TetrominoKind::O, TetrominoKind::T]);
        // O occupies rows y..y+2; it rests at y = 18
        for _ in 0..18 {
            game.process_action(Action::SoftDrop);
        }
        assert_eq!(game.current.as_ref().unwrap().y, 18);
        assert_eq!(filled_cells(&game), 0);
        game.process_action(Action::SoftDrop);
        assert_eq!(filled_cells(&game), 4);
        assert_eq!(game.current.as_ref().unwrap().kind, TetrominoKind::T);
        assert_eq!(game.state, GameState::Running);
    }

    #[test]
    fn test_hard_drop_lands_on_bottom_row() {
        let mut game = started_game(&[TetrominoKind::I]);
        game.process_action(Action::HardDrop);
        // the flat I ends up entirely in the bottom row
        for col in 3..7 {
            assert!(game.board.is_occupied(BOARD_HEIGHT - 1, col));
        }
        assert_eq!(filled_cells(&game), 4);
    }

    #[test]
    fn test_hard_drop_stacks_on_settled_pieces() {
        let mut game = started_game(&[TetrominoKind::O]);
        game.process_action(Action::HardDrop);
        game.process_action(Action::HardDrop);
        assert!(game.board.is_occupied(16, 4));
        assert!(game.board.is_occupied(17, 4));
        assert!(game.board.is_occupied(18, 4));
        assert!(game.board.is_occupied(19, 4));
        assert_eq!(filled_cells(&game), 8);
    }

    #[test]
    fn test_five_squares_clear_two_rows() {
        let mut game = started_game(&[TetrominoKind::O]);
        // park an O pair on every column: x = 0, 2, 4, 6, 8
        for shift in [-4i32, -2, 0, 2, 4] {
            let action = if shift < 0 { Action::MoveLeft } else { Action::MoveRight };
            for _ in 0..shift.abs() {
                game.process_action(action);
            }
            game.process_action(Action::HardDrop);
        }
        assert_eq!(filled_cells(&game), 0);
        assert_eq!(game.score.lines, 2);
        assert_eq!(game.score.points, 300);
        assert_eq!(game.score.level, 1);
    }

    #[test]
    fn test_blocked_spawn_ends_game_without_merging() {
        let mut game = started_game(&[TetrominoKind::O]);
        // a column of squares fills rows 0..20 after ten locks; the
        // eleventh spawn has nowhere to go
        for _ in 0..10 {
            game.process_action(Action::HardDrop);
        }
        assert_eq!(game.state, GameState::GameOver);
        assert_eq!(filled_cells(&game), 40);
        // the colliding piece is still displayed but was never merged
        assert!(game.current.is_some());
    }

    #[test]
    fn test_game_over_accepts_only_restart() {
        let mut game = started_game(&[TetrominoKind::O]);
        for _ in 0..10 {
            game.process_action(Action::HardDrop);
        }
        assert_eq!(game.state, GameState::GameOver);
        game.process_action(Action::MoveLeft);
        game.process_action(Action::TogglePause);
        assert_eq!(game.state, GameState::GameOver);
        game.process_action(Action::Restart);
        assert_eq!(game.state, GameState::Running);
        assert_eq!(filled_cells(&game), 0);
        assert_eq!(game.score, Score::new());
    }

    #[test]
    fn test_rotation_in_place_when_it_fits() {
        let mut game = started_game(&[TetrominoKind::I]);
        game.process_action(Action::Rotate);
        let piece = game.current.as_ref().unwrap();
        assert_eq!((piece.height(), piece.width()), (4, 1));
        assert_eq!(piece.x, 3);
    }

    #[test]
    fn test_rotation_kicks_off_the_right_wall() {
        let mut game = started_game(&[TetrominoKind::I]);
        game.process_action(Action::Rotate);
        for _ in 0..4 {
            game.process_action(Action::MoveRight);
        }
        assert_eq!(game.current.as_ref().unwrap().x, 7);
        // back to horizontal: x = 7 and x + 1 overflow, the kick to x = 6 fits
        game.process_action(Action::Rotate);
        let piece = game.current.as_ref().unwrap();
        assert_eq!((piece.height(), piece.width()), (1, 4));
        assert_eq!(piece.x, 6);
        assert_eq!(piece.y, 0);
    }

    #[test]
    fn test_rotation_reverts_when_all_kicks_fail() {
        let mut game = started_game(&[TetrominoKind::I]);
        game.process_action(Action::Rotate);
        for _ in 0..6 {
            game.process_action(Action::MoveRight);
        }
        assert_eq!(game.current.as_ref().unwrap().x, 9);
        // horizontal needs x <= 6; neither 9, 10 nor 8 fit
        game.process_action(Action::Rotate);
        let piece = game.current.as_ref().unwrap();
        assert_eq!((piece.height(), piece.width()), (4, 1));
        assert_eq!(piece.x, 9);
    }

    #[test]
    fn test_toggle_pause_twice_changes_nothing() {
        let mut game = started_game(&[TetrominoKind::S, TetrominoKind::Z]);
        game.process_action(Action::SoftDrop);
        let board = game.board.clone();
        let current = game.current.clone();
        let score = game.score.clone();

        game.process_action(Action::TogglePause);
        assert_eq!(game.state, GameState::Paused);
        game.process_action(Action::TogglePause);
        assert_eq!(game.state, GameState::Running);
        assert_eq!(*game.board.rows(), *board.rows());
        assert_eq!(game.current, current);
        assert_eq!(game.score, score);
    }

    #[test]
    fn test_pause_freezes_piece_and_clock() {
        let mut game = started_game(&[TetrominoKind::L]);
        game.process_action(Action::TogglePause);
        game.process_action(Action::MoveLeft);
        game.process_action(Action::SoftDrop);
        game.tick(10_000);
        let piece = game.current.as_ref().unwrap();
        assert_eq!((piece.x, piece.y), (3, 0));
    }

    #[test]
    fn test_tick_fires_at_the_level_interval() {
        let mut game = started_game(&[TetrominoKind::J]);
        game.tick(899);
        assert_eq!(game.current.as_ref().unwrap().y, 0);
        game.tick(1);
        assert_eq!(game.current.as_ref().unwrap().y, 1);
        // a huge frame still advances a single row
        game.tick(30_000);
        assert_eq!(game.current.as_ref().unwrap().y, 2);
    }

    #[test]
    fn test_restart_while_running_resets_everything() {
        let mut game = started_game(&[TetrominoKind::O]);
        game.process_action(Action::HardDrop);
        assert_eq!(filled_cells(&game), 4);
        game.process_action(Action::Restart);
        assert_eq!(game.state, GameState::Running);
        assert_eq!(filled_cells(&game), 0);
        assert_eq!(game.score, Score::new());
        assert!(game.current.is_some());
        assert!(game.next.is_some());
    }
}
