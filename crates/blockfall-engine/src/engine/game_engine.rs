use std::time::Duration;

use log::{debug, info};
use serde::Serialize;

use crate::core::{Board, Piece};

use super::{
    drop_timer::DropTimer,
    game_stats::GameStats,
    piece_generator::{PieceGenerator, PieceSeed},
    rules::Rules,
    snapshot::{GameSnapshot, PieceSnapshot},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// What happened when a piece locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockSummary {
    /// Number of rows cleared by this lock (0-4).
    pub cleared_lines: usize,
    /// Points added to the score.
    pub points: u64,
    /// New level, if the lock raised it.
    pub new_level: Option<u32>,
    /// Occupied cells that were above the board when the piece locked.
    ///
    /// These cells are discarded rather than ending the game.
    pub lost_cells: usize,
    /// Whether the promoted piece collided at spawn and ended the game.
    pub game_over: bool,
}

/// Result of a soft drop or hard drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The game is paused or over; nothing changed.
    Ignored,
    /// The piece moved down one row.
    Moved,
    /// The piece could not move down and locked.
    Locked(LockSummary),
}

/// The game-state engine.
///
/// Owns the board, the falling piece, the next piece, statistics, and the
/// drop timer. All mutation goes through the command methods, which are
/// total: a command that does not apply (a blocked move, any movement while
/// paused or after game over) leaves the state unchanged.
///
/// Time only advances through [`tick`](Self::tick); the engine has no clock
/// of its own, so a host loop or a test can feed any sequence of deltas.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{GameEngine, PieceSeed};
///
/// let seed: PieceSeed = "00000000000000000000000000000001".parse().unwrap();
/// let mut engine = GameEngine::with_seed(seed);
///
/// engine.move_left();
/// engine.rotate();
/// let outcome = engine.hard_drop();
/// assert!(outcome.is_locked());
/// assert_eq!(engine.stats().completed_pieces(), 1);
///
/// // At level 1 the piece falls one row after just over a second.
/// let y = engine.current_piece().position().y();
/// assert!(engine.tick(Duration::from_millis(1000)).is_none());
/// assert!(engine.tick(Duration::from_millis(1)).is_some());
/// assert_eq!(engine.current_piece().position().y(), y + 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine {
    rules: Rules,
    board: Board,
    current: Piece,
    next: Piece,
    stats: GameStats,
    state: SessionState,
    drop_timer: DropTimer,
    generator: PieceGenerator,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Creates an engine with the default rules and a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(Rules::default(), PieceGenerator::new())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible piece sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_rules(Rules::default(), PieceGenerator::with_seed(seed))
    }

    /// Creates an engine with custom rules and piece generator, ready to play.
    #[must_use]
    pub fn with_rules(rules: Rules, mut generator: PieceGenerator) -> Self {
        let current = generator.next_piece();
        let next = generator.next_piece();
        Self {
            board: Board::EMPTY,
            current,
            next,
            stats: GameStats::new(),
            state: SessionState::Playing,
            drop_timer: DropTimer::new(rules.drop_interval(1)),
            generator,
            rules,
        }
    }

    /// Starts a new game: empty board, zeroed statistics, two fresh pieces.
    ///
    /// Legal from any state. The piece generator keeps its stream, so the
    /// new game continues the same random sequence.
    pub fn reset(&mut self) {
        debug!(
            "reset: previous game ended with score {} at level {}",
            self.stats.score(),
            self.stats.level()
        );
        self.board = Board::EMPTY;
        self.stats = GameStats::new();
        self.state = SessionState::Playing;
        self.drop_timer = DropTimer::new(self.rules.drop_interval(1));
        self.current = self.generator.next_piece();
        self.next = self.generator.next_piece();
    }

    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.stats.level()
    }

    /// Returns the current automatic drop interval.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.drop_timer.interval()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Returns where the current piece would lock if hard-dropped now.
    #[must_use]
    pub fn drop_preview(&self) -> Piece {
        self.current.simulate_drop_position(&self.board)
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_color_ids(),
            current: PieceSnapshot::from(&self.current),
            next: PieceSnapshot::from(&self.next),
            score: self.stats.score(),
            level: self.stats.level(),
            drop_interval_ms: u64::try_from(self.drop_interval().as_millis()).unwrap_or(u64::MAX),
            paused: self.is_paused(),
            game_over: self.is_game_over(),
            lines: self.stats.total_cleared_lines(),
            pieces: self.stats.completed_pieces(),
        }
    }

    /// Advances time by `delta`.
    ///
    /// Once the accumulated time exceeds the drop interval, performs exactly
    /// one soft drop and returns its outcome. Returns `None` while no drop is
    /// due, and always while paused or after game over.
    pub fn tick(&mut self, delta: Duration) -> Option<DropOutcome> {
        if !self.state.is_playing() {
            return None;
        }
        self.stats.add_play_time(delta);
        self.drop_timer
            .advance(delta)
            .then(|| self.soft_drop())
    }

    /// Toggles between playing and paused. Has no effect after game over.
    ///
    /// Resuming restarts the drop timer from zero; progress toward the next
    /// automatic drop made before the pause is discarded.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => {
                self.drop_timer.reset();
                SessionState::Playing
            }
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    pub fn move_left(&mut self) -> bool {
        self.move_by(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_by(1)
    }

    /// Shifts the falling piece horizontally by `dx` cells.
    ///
    /// Returns `false` and leaves the piece in place if the target position
    /// collides or the game is not being played.
    pub fn move_by(&mut self, dx: i32) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        self.try_set_current(self.current.moved(dx, 0))
    }

    /// Rotates the falling piece clockwise, with wall kick.
    ///
    /// Returns `false` if every kick position collides; the piece keeps its
    /// original shape and position.
    pub fn rotate(&mut self) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        match self.current.kicked_rotation(&self.board) {
            Some(piece) => {
                self.current = piece;
                true
            }
            None => false,
        }
    }

    /// Moves the falling piece down one row, locking it if it cannot move.
    ///
    /// Resets the drop timer whether or not the piece locked.
    pub fn soft_drop(&mut self) -> DropOutcome {
        if !self.state.is_playing() {
            return DropOutcome::Ignored;
        }
        self.drop_timer.reset();
        if self.try_set_current(self.current.down()) {
            DropOutcome::Moved
        } else {
            DropOutcome::Locked(self.lock_piece())
        }
    }

    /// Drops the falling piece as far as it goes and locks it.
    ///
    /// Ends in the same state as calling [`soft_drop`](Self::soft_drop) until
    /// it locks.
    pub fn hard_drop(&mut self) -> DropOutcome {
        if !self.state.is_playing() {
            return DropOutcome::Ignored;
        }
        self.current = self.current.simulate_drop_position(&self.board);
        self.soft_drop()
    }

    fn try_set_current(&mut self, piece: Piece) -> bool {
        if self.board.is_colliding(&piece) {
            return false;
        }
        self.current = piece;
        true
    }

    /// Merges the falling piece, clears lines, scores, and promotes the next piece.
    fn lock_piece(&mut self) -> LockSummary {
        let lost_cells = self.board.fill_piece(&self.current);
        if lost_cells > 0 {
            debug!(
                "lock: {lost_cells} cell(s) of {} above the board were discarded",
                self.current.kind()
            );
        }

        let cleared_lines = self.board.clear_lines();
        let update = self.stats.complete_piece_drop(cleared_lines, &self.rules);
        if cleared_lines > 0 {
            debug!(
                "lock: cleared {cleared_lines} line(s) for {} points, score {}",
                update.points,
                self.stats.score()
            );
        }
        if let Some(level) = update.new_level {
            let interval = self.rules.drop_interval(level);
            self.drop_timer.set_interval(interval);
            info!("level up: level {level}, drop interval {interval:?}");
        }

        let next = self.generator.next_piece();
        self.current = std::mem::replace(&mut self.next, next);

        let game_over = self.board.is_colliding(&self.current);
        if game_over {
            self.state = SessionState::GameOver;
            info!(
                "game over: {} spawn blocked, final score {}",
                self.current.kind(),
                self.stats.score()
            );
        }

        LockSummary {
            cleared_lines,
            points: update.points,
            new_level: update.new_level,
            lost_cells,
            game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Block, PieceKind, PiecePosition};

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    const fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    /// Engine with the given board and falling piece; the next piece is a T.
    fn engine_with(board: &str, current: Piece) -> GameEngine {
        let mut engine = GameEngine::with_seed(SEED);
        engine.board = Board::from_ascii(board);
        engine.current = current;
        engine.next = Piece::new(PieceKind::T);
        engine
    }

    fn at(kind: PieceKind, x: i32, y: i32) -> Piece {
        Piece::new(kind).with_position(PiecePosition::new(x, y))
    }

    fn vertical_i(x: i32, y: i32) -> Piece {
        // Rotated once, the I-piece occupies column 2 of its box.
        Piece::new(PieceKind::I)
            .rotated_clockwise()
            .with_position(PiecePosition::new(x, y))
    }

    fn occupied_count(board: &Board) -> usize {
        board.rows().flatten().filter(|b| !b.is_empty()).count()
    }

    #[test]
    fn test_new_engine_state() {
        let engine = GameEngine::with_seed(SEED);
        assert_eq!(engine.board(), &Board::EMPTY);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.drop_interval(), ms(1000));
        assert_eq!(engine.state(), SessionState::Playing);
        assert_eq!(engine.current_piece().position().y(), 0);
        assert_eq!(engine.next_piece().position().y(), 0);
    }

    #[test]
    fn test_move_left_and_right() {
        let mut engine = engine_with("", at(PieceKind::O, 4, 0));
        assert!(engine.move_left());
        assert_eq!(engine.current_piece().position().x(), 3);
        assert!(engine.move_right());
        assert!(engine.move_right());
        assert_eq!(engine.current_piece().position().x(), 5);
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut engine = engine_with("", at(PieceKind::O, 0, 0));
        assert!(!engine.move_left());
        assert_eq!(engine.current_piece().position().x(), 0);

        let mut engine = engine_with("", at(PieceKind::O, 8, 0));
        assert!(!engine.move_right());
        assert_eq!(engine.current_piece().position().x(), 8);
    }

    #[test]
    fn test_move_blocked_by_locked_cells() {
        let mut engine = engine_with(
            "
            ...#......
            ",
            at(PieceKind::O, 4, 18),
        );
        assert!(!engine.move_left());
        assert_eq!(engine.current_piece().position(), PiecePosition::new(4, 18));
    }

    #[test]
    fn test_move_zero_keeps_position() {
        let mut engine = GameEngine::with_seed(SEED);
        let before = *engine.current_piece();
        engine.move_by(0);
        assert_eq!(engine.current_piece(), &before);
    }

    #[test]
    fn test_rotate_four_times_restores_piece() {
        for kind in PieceKind::ALL {
            let mut engine = engine_with("", at(kind, 3, 5));
            let before = *engine.current_piece();
            for _ in 0..4 {
                assert!(engine.rotate());
            }
            assert_eq!(engine.current_piece(), &before, "{kind}");
        }
    }

    #[test]
    fn test_rotate_kicks_left_from_right_wall() {
        // Column 9; the horizontal orientation would overhang the right wall.
        let mut engine = engine_with("", vertical_i(7, 5));
        assert!(engine.rotate());
        assert_eq!(engine.current_piece().position(), PiecePosition::new(6, 5));
        assert_eq!(
            engine.current_piece().shape().to_color_ids()[2],
            [1, 1, 1, 1]
        );
    }

    #[test]
    fn test_rotate_kicks_right_from_left_wall() {
        // Rotated three times the I-piece occupies column 1 of its box.
        let piece = Piece::new(PieceKind::I)
            .rotated_clockwise()
            .rotated_clockwise()
            .rotated_clockwise()
            .with_position(PiecePosition::new(-1, 5));
        let mut engine = engine_with("", piece);
        assert!(engine.rotate());
        assert_eq!(engine.current_piece().position(), PiecePosition::new(0, 5));
        assert_eq!(
            engine.current_piece().shape(),
            &PieceKind::I.spawn_shape()
        );
    }

    #[test]
    fn test_rotate_rejected_restores_piece() {
        let board = "
            #########.
            #########.
            #########.
            #########.
            #########.
            #########.
            #########.
            #########.
            ";
        let mut engine = engine_with(board, vertical_i(7, 14));
        let before = *engine.current_piece();
        assert!(!engine.rotate());
        assert_eq!(engine.current_piece(), &before);
    }

    #[test]
    fn test_soft_drop_moves_then_locks() {
        let mut engine = engine_with("", at(PieceKind::O, 4, 17));
        assert_eq!(engine.soft_drop(), DropOutcome::Moved);
        assert_eq!(engine.current_piece().position().y(), 18);

        let DropOutcome::Locked(summary) = engine.soft_drop() else {
            panic!("piece should lock on the floor");
        };
        assert_eq!(summary.cleared_lines, 0);
        assert!(!summary.game_over);
        assert_eq!(engine.board().get(4, 18), Block::Piece(PieceKind::O));
        assert_eq!(engine.board().get(5, 19), Block::Piece(PieceKind::O));
        assert_eq!(engine.current_piece(), &Piece::new(PieceKind::T));
        assert_eq!(engine.stats().completed_pieces(), 1);
    }

    #[test]
    fn test_lock_promotes_next_and_generates_new_next() {
        let mut engine = GameEngine::with_seed(SEED);
        let next = *engine.next_piece();
        engine.hard_drop();
        assert_eq!(engine.current_piece(), &next);

        let mut generator = PieceGenerator::with_seed(SEED);
        let expected: Vec<_> = (0..3).map(|_| generator.next_kind()).collect();
        assert_eq!(engine.next_piece().kind(), expected[2]);
    }

    #[test]
    fn test_hard_drop_equals_repeated_soft_drop() {
        let board = "
            ..........
            ...##.....
            #.######.#
            ";
        let mut soft = engine_with(board, Piece::new(PieceKind::L));
        soft.rotate();
        soft.move_right();
        let mut hard = soft.clone();

        let mut drops = 0;
        while !soft.soft_drop().is_locked() {
            drops += 1;
        }
        assert!(drops > 0);
        assert!(hard.hard_drop().is_locked());

        assert_eq!(soft.snapshot(), hard.snapshot());
        assert_eq!(soft.board(), hard.board());
    }

    #[test]
    fn test_hard_drop_lands_on_stack() {
        let mut engine = engine_with(
            "
            ....#.....
            ",
            at(PieceKind::O, 4, 0),
        );
        assert_eq!(engine.drop_preview().position(), PiecePosition::new(4, 17));
        engine.hard_drop();
        assert_eq!(engine.board().get(4, 17), Block::Piece(PieceKind::O));
        assert_eq!(engine.board().get(5, 18), Block::Piece(PieceKind::O));
        assert_eq!(engine.board().get(5, 19), Block::Empty);
    }

    #[test]
    fn test_single_line_clear_scores_100() {
        let mut engine = engine_with(
            "
            ########..
            ",
            at(PieceKind::O, 8, 0),
        );
        let DropOutcome::Locked(summary) = engine.hard_drop() else {
            panic!("hard drop should lock");
        };
        assert_eq!(summary.cleared_lines, 1);
        assert_eq!(summary.points, 100);
        assert_eq!(engine.score(), 100);
        // The O-piece's upper half remains, shifted down into the cleared row.
        assert_eq!(
            engine.board(),
            &Board::from_ascii(
                "
                ........OO
                "
            )
        );
    }

    #[test]
    fn test_four_line_clear_scores_800() {
        let board = "
            #########.
            #########.
            #########.
            #########.
            ";
        let mut engine = engine_with(board, vertical_i(7, 0));
        let DropOutcome::Locked(summary) = engine.hard_drop() else {
            panic!("hard drop should lock");
        };
        assert_eq!(summary.cleared_lines, 4);
        assert_eq!(summary.points, 800);
        assert_eq!(engine.score(), 800);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.board(), &Board::EMPTY);
        assert_eq!(engine.stats().line_cleared_counter()[4], 1);
    }

    #[test]
    fn test_level_up_speeds_up_drops() {
        let rules = Rules {
            points_per_level: 100,
            ..Rules::default()
        };
        let mut engine = GameEngine::with_rules(rules, PieceGenerator::with_seed(SEED));
        engine.board = Board::from_ascii("########..");
        engine.current = at(PieceKind::O, 8, 0);

        let DropOutcome::Locked(summary) = engine.hard_drop() else {
            panic!("hard drop should lock");
        };
        assert_eq!(summary.new_level, Some(2));
        assert_eq!(engine.level(), 2);
        assert_eq!(engine.drop_interval(), ms(950));
    }

    #[test]
    fn test_single_line_clear_at_level_3_scores_300() {
        let mut engine = engine_with(
            "
            ########..
            ",
            at(PieceKind::O, 8, 0),
        );
        // 800 + 800 reaches level 2, then two singles at 200 each reach 2000.
        for cleared_lines in [4, 4, 1, 1] {
            engine.stats.complete_piece_drop(cleared_lines, &engine.rules);
        }
        assert_eq!(engine.score(), 2000);
        assert_eq!(engine.level(), 3);

        let DropOutcome::Locked(summary) = engine.hard_drop() else {
            panic!("hard drop should lock");
        };
        assert_eq!(summary.cleared_lines, 1);
        assert_eq!(summary.points, 300);
        assert_eq!(summary.new_level, None);
        assert_eq!(engine.score(), 2300);
        assert_eq!(engine.level(), 3);
    }

    #[test]
    fn test_spawn_collision_ends_game() {
        let mut engine = engine_with("", at(PieceKind::O, 0, 0));
        // Block the top row where the next T spawns.
        for x in 3..7 {
            engine.board.set(x, 0, Block::Piece(PieceKind::J));
        }

        let DropOutcome::Locked(summary) = engine.hard_drop() else {
            panic!("hard drop should lock");
        };
        assert!(summary.game_over);
        assert!(engine.is_game_over());
        assert_eq!(engine.score(), 0);
        // Only the locked O-piece was added; the blocked spawn wrote nothing.
        assert_eq!(occupied_count(engine.board()), 4 + 4);
        assert_eq!(engine.current_piece(), &Piece::new(PieceKind::T));
    }

    #[test]
    fn test_commands_ignored_after_game_over() {
        let mut engine = GameEngine::with_seed(SEED);
        engine.state = SessionState::GameOver;
        let before = engine.snapshot();

        assert!(!engine.move_left());
        assert!(!engine.move_right());
        assert!(!engine.rotate());
        assert_eq!(engine.soft_drop(), DropOutcome::Ignored);
        assert_eq!(engine.hard_drop(), DropOutcome::Ignored);
        assert_eq!(engine.tick(ms(5000)), None);
        engine.toggle_pause();

        assert_eq!(engine.state(), SessionState::GameOver);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_tick_drops_after_interval() {
        let mut engine = engine_with("", at(PieceKind::T, 4, 0));
        assert_eq!(engine.tick(ms(600)), None);
        assert_eq!(engine.tick(ms(400)), None);
        assert_eq!(engine.tick(ms(1)), Some(DropOutcome::Moved));
        assert_eq!(engine.current_piece().position().y(), 1);
        // The accumulator restarts after each drop.
        assert_eq!(engine.tick(ms(1000)), None);
        assert_eq!(engine.stats().play_time(), ms(2001));
    }

    #[test]
    fn test_tick_drops_once_per_call() {
        let mut engine = engine_with("", at(PieceKind::T, 4, 0));
        assert_eq!(engine.tick(ms(10_000)), Some(DropOutcome::Moved));
        assert_eq!(engine.current_piece().position().y(), 1);
    }

    #[test]
    fn test_manual_soft_drop_resets_timer() {
        let mut engine = engine_with("", at(PieceKind::T, 4, 0));
        assert_eq!(engine.tick(ms(900)), None);
        engine.soft_drop();
        assert_eq!(engine.tick(ms(900)), None);
        assert_eq!(engine.current_piece().position().y(), 1);
    }

    #[test]
    fn test_pause_freezes_game() {
        let mut engine = engine_with("", at(PieceKind::T, 4, 0));
        engine.toggle_pause();
        assert!(engine.is_paused());

        let before = engine.snapshot();
        assert_eq!(engine.tick(ms(5000)), None);
        assert!(!engine.move_left());
        assert!(!engine.rotate());
        assert_eq!(engine.soft_drop(), DropOutcome::Ignored);
        assert_eq!(engine.hard_drop(), DropOutcome::Ignored);
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.stats().play_time(), Duration::ZERO);

        engine.toggle_pause();
        assert_eq!(engine.state(), SessionState::Playing);
        assert!(engine.move_left());
    }

    #[test]
    fn test_resume_discards_drop_progress() {
        let mut engine = engine_with("", at(PieceKind::T, 4, 0));
        assert_eq!(engine.tick(ms(900)), None);
        engine.toggle_pause();
        engine.toggle_pause();
        // 900 + 200 would exceed the interval, but resuming restarted the count.
        assert_eq!(engine.tick(ms(200)), None);
        assert_eq!(engine.current_piece().position().y(), 0);
    }

    #[test]
    fn test_lock_above_board_discards_cells() {
        // The stack reaches the top, so an O-piece at y = -1 locks in place
        // with its upper half above the board.
        let mut engine = engine_with("", at(PieceKind::O, 0, -1));
        for y in 1..Board::HEIGHT {
            engine.board.set(0, y, Block::Piece(PieceKind::I));
        }

        let DropOutcome::Locked(summary) = engine.soft_drop() else {
            panic!("piece should lock");
        };
        assert_eq!(summary.lost_cells, 2);
        assert!(!summary.game_over);
        assert!(!engine.is_game_over());
        assert_eq!(engine.board().get(0, 0), Block::Piece(PieceKind::O));
        assert_eq!(engine.board().get(1, 0), Block::Piece(PieceKind::O));
        assert_eq!(occupied_count(engine.board()), (Board::HEIGHT - 1) + 2);
    }

    #[test]
    fn test_spawned_pieces_are_centered() {
        let mut engine = GameEngine::with_seed(SEED);
        for _ in 0..30 {
            let piece = *engine.current_piece();
            let width = i32::try_from(piece.shape().width()).unwrap();
            assert_eq!(piece.position(), PiecePosition::new(5 - width / 2, 0));
            if engine.hard_drop().is_locked() && engine.is_game_over() {
                break;
            }
        }
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut engine = engine_with("#.#.#.#.#.", at(PieceKind::O, 0, 0));
        engine.hard_drop();
        engine.toggle_pause();
        engine.reset();
        assert_fresh(&engine);

        engine.state = SessionState::GameOver;
        engine.reset();
        assert_fresh(&engine);

        engine.hard_drop();
        engine.reset();
        assert_fresh(&engine);
    }

    fn assert_fresh(engine: &GameEngine) {
        assert_eq!(engine.board(), &Board::EMPTY);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.drop_interval(), ms(1000));
        assert!(!engine.is_game_over());
        assert!(!engine.is_paused());
        assert_eq!(engine.stats().completed_pieces(), 0);
        assert_eq!(
            engine.current_piece(),
            &Piece::new(engine.current_piece().kind())
        );
        assert_eq!(engine.next_piece(), &Piece::new(engine.next_piece().kind()));
    }

    #[test]
    fn test_snapshot_serialization() {
        let engine = engine_with("", at(PieceKind::O, 4, 0));
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.board.len(), Board::HEIGHT);
        assert_eq!(snapshot.current.shape, [[4, 4], [4, 4]]);
        assert_eq!(snapshot.next.color_id, 6);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["current"]["kind"], "O");
        assert_eq!(json["current"]["position"]["x"], 4);
        assert_eq!(json["level"], 1);
        assert_eq!(json["drop_interval_ms"], 1000);
        assert_eq!(json["game_over"], false);
    }
}
