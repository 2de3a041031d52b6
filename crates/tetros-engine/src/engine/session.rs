use log::{debug, trace};

use crate::{
    EngineError,
    config::{ConfigError, EngineConfig},
    core::{Board, Direction, Piece},
};

use super::{
    command::Command,
    piece_queue::{PieceQueue, PieceSeed},
    scoring::{GameStats, LockReport},
    snapshot::{NextPiece, PieceView, Snapshot},
};

/// Where a session is in its game cycle.
///
/// ```text
/// Spawning -> Falling -> Locking -> Spawning
///                            \
///                             -> GameOver
/// ```
///
/// `Paused` can be entered from any running phase and always resumes to
/// `Falling`. `Locking` only lasts for the tick that resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    Paused,
    GameOver,
}

/// What a single [`Session::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickEvent {
    /// Paused; nothing changed.
    Paused,
    /// The game is over and waiting for a command.
    Idle,
    /// The active piece is still falling.
    Falling,
    /// The active piece was merged into the board.
    Locked(LockReport),
    /// The active piece locked while still above the board.
    GameOver,
}

/// A running game.
///
/// A session owns the board, the piece queue and the statistics. Frontends
/// feed it [`Command`]s and call [`tick`](Self::tick) at a fixed rate;
/// commands received between two ticks should be applied before the tick.
///
/// Each tick, in order:
///
/// 1. the active piece is nudged back inside the walls and floor
/// 2. if it is grounded (a block right under it, or on the floor) it locks
/// 3. otherwise gravity advances, and the grounded check runs again
///
/// A locked piece is merged into the board, complete rows are cleared and
/// scored, and the next piece from the queue becomes active. A piece that
/// locks with any cell above the board ends the game instead.
///
/// # Example
///
/// ```
/// use tetros_engine::{Command, EngineConfig, Session};
///
/// let mut session = Session::new(EngineConfig::default()).unwrap();
/// session.apply(Command::HardDrop).unwrap();
/// while session.stats().completed_pieces() == 0 {
///     session.tick().unwrap();
/// }
/// assert_eq!(session.board().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    config: EngineConfig,
    board: Board,
    queue: PieceQueue,
    stats: GameStats,
    phase: Phase,
    quit_requested: bool,
}

impl Session {
    /// Starts a game with a random piece sequence.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let queue = PieceQueue::new(&config);
        Ok(Self::with_queue(config, queue))
    }

    /// Starts a game whose piece sequence is fixed by `seed`.
    pub fn with_seed(config: EngineConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        let queue = PieceQueue::with_seed(&config, seed);
        Ok(Self::with_queue(config, queue))
    }

    fn with_queue(config: EngineConfig, queue: PieceQueue) -> Self {
        debug!(
            "new session: board {}x{}, {} lines per level",
            config.width, config.height, config.lines_per_level
        );
        Self {
            board: Board::new(config.width, config.height),
            stats: GameStats::new(config.lines_per_level),
            config,
            queue,
            phase: Phase::Spawning,
            quit_requested: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_piece(&self) -> Result<&Piece, EngineError> {
        self.queue.active()
    }

    /// Returns `true` once the player asked to leave.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    /// Applies one player command.
    ///
    /// While paused, only [`Command::TogglePause`] and [`Command::Quit`]
    /// have an effect. After game over, those two end the session,
    /// [`Command::SoftDropOff`] is ignored and any other command starts a
    /// new game.
    pub fn apply(&mut self, command: Command) -> Result<(), EngineError> {
        trace!("command {command:?} in {:?}", self.phase);
        match (self.phase, command) {
            (_, Command::Quit) | (Phase::GameOver, Command::TogglePause) => {
                self.quit_requested = true;
            }
            // Releasing the soft drop key is not a new key press.
            (Phase::GameOver, Command::SoftDropOff) => {}
            (Phase::GameOver, _) => self.restart(),
            (Phase::Paused, Command::TogglePause) => {
                debug!("resumed");
                self.phase = Phase::Falling;
            }
            (Phase::Paused, _) => {}
            (_, Command::TogglePause) => {
                debug!("paused");
                self.phase = Phase::Paused;
            }
            (_, command) => self.steer(command)?,
        }
        Ok(())
    }

    fn steer(&mut self, command: Command) -> Result<(), EngineError> {
        let piece = self.queue.active_mut()?;
        match command {
            Command::RotateCw => piece.rotate_clockwise(),
            Command::RotateCcw => piece.rotate_counter_clockwise(),
            Command::ShiftLeft => {
                piece.shift(Direction::Left, &self.board);
            }
            Command::ShiftRight => {
                piece.shift(Direction::Right, &self.board);
            }
            Command::SoftDropOn => piece.set_falling(false),
            Command::SoftDropOff => piece.set_falling(true),
            Command::HardDrop => piece.drop(),
            Command::TogglePause | Command::Quit => {}
        }
        Ok(())
    }

    /// Advances the game by one tick.
    pub fn tick(&mut self) -> Result<TickEvent, EngineError> {
        match self.phase {
            Phase::Paused => return Ok(TickEvent::Paused),
            Phase::GameOver => return Ok(TickEvent::Idle),
            Phase::Spawning => {
                trace!("spawned {:?}", self.queue.active()?.shape());
                self.phase = Phase::Falling;
            }
            Phase::Falling | Phase::Locking => {}
        }
        self.stats.increment_tick();

        let level = self.stats.level();
        let piece = self.queue.active_mut()?;
        piece.nudge_inside(self.board.width(), self.board.height());
        if !is_grounded(piece, &self.board) {
            piece.fall(level);
            if !is_grounded(piece, &self.board) {
                return Ok(TickEvent::Falling);
            }
        }

        self.phase = Phase::Locking;
        self.lock()
    }

    fn lock(&mut self) -> Result<TickEvent, EngineError> {
        let piece = self.queue.active()?;
        if piece.is_above_board() {
            debug!(
                "game over: {:?} locked above the board, score {}, level {}",
                piece.shape(),
                self.stats.score(),
                self.stats.level()
            );
            self.phase = Phase::GameOver;
            return Ok(TickEvent::GameOver);
        }

        let piece = self.queue.pop_active()?;
        self.board.merge(&piece);
        let rows_cleared = self.board.check_lines();
        let report = self.stats.record_lock(rows_cleared)?;
        self.queue.replenish(&self.config);
        self.phase = Phase::Spawning;

        debug!(
            "locked {:?} at {}, cleared {} rows for {} points",
            piece.shape(),
            piece.origin(),
            report.rows_cleared,
            report.points
        );
        if report.leveled_up {
            debug!("level up: {}", self.stats.level());
        }
        Ok(TickEvent::Locked(report))
    }

    /// Resets board, queue and statistics and starts a new game.
    pub fn restart(&mut self) {
        debug!("restart after score {}", self.stats.score());
        self.board = Board::new(self.config.width, self.config.height);
        self.queue.reset(&self.config);
        self.stats = GameStats::new(self.config.lines_per_level);
        self.phase = Phase::Spawning;
        self.quit_requested = false;
    }

    /// Captures what a renderer needs to draw the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let active = self
            .queue
            .active()
            .ok()
            .filter(|_| !self.phase.is_game_over())
            .map(|piece| PieceView {
                shape: piece.shape(),
                color: piece.color(),
                cells: piece.cells().iter().copied().collect(),
            });
        let next = self.queue.upcoming().map(|piece| NextPiece {
            shape: piece.shape(),
            color: piece.color(),
            occupancy: piece.shape().occupancy(),
        });
        Snapshot {
            width: self.board.width(),
            height: self.board.height(),
            active,
            board: self.board.iter().collect(),
            score: self.stats.score(),
            level: self.stats.level(),
            level_progress: self.stats.level_progress(),
            lines_per_level: self.stats.lines_per_level(),
            next,
            paused: self.phase.is_paused(),
            game_over: self.phase.is_game_over(),
        }
    }
}

fn is_grounded(piece: &Piece, board: &Board) -> bool {
    piece.rests_on_blocks(board) || piece.touches_floor(board.height())
}

#[cfg(test)]
mod tests {
    use crate::core::{Cell, Shape};

    use super::*;

    const SEED: &str = "00112233445566778899aabbccddeeff";
    const MAX_TICKS: usize = 2000;

    fn session() -> Session {
        Session::with_seed(EngineConfig::default(), SEED.parse().unwrap()).unwrap()
    }

    fn run_until(session: &mut Session, done: impl Fn(&TickEvent) -> bool) -> TickEvent {
        for _ in 0..MAX_TICKS {
            let event = session.tick().unwrap();
            if done(&event) {
                return event;
            }
        }
        panic!("no matching tick event after {MAX_TICKS} ticks");
    }

    fn replace_active(session: &mut Session, shape: Shape, origin: Cell) {
        let piece = Piece::with_origin(shape, &session.config, origin);
        *session.queue.active_mut().unwrap() = piece;
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            width: 2,
            ..EngineConfig::default()
        };
        assert_eq!(
            Session::new(config).unwrap_err(),
            ConfigError::BoardTooNarrow { width: 2 }
        );
    }

    #[test]
    fn test_first_tick_leaves_spawning() {
        let mut session = session();
        assert_eq!(session.phase(), Phase::Spawning);
        assert_eq!(session.tick().unwrap(), TickEvent::Falling);
        assert_eq!(session.phase(), Phase::Falling);
        assert_eq!(session.stats().play_ticks(), 1);
    }

    #[test]
    fn test_piece_locks_on_floor() {
        let mut session = session();
        let shape = session.active_piece().unwrap().shape();
        let next = session.queue().upcoming().unwrap().shape();
        session.apply(Command::HardDrop).unwrap();

        let event = run_until(&mut session, TickEvent::is_locked);
        assert_eq!(
            event,
            TickEvent::Locked(LockReport {
                rows_cleared: 0,
                points: 0,
                leveled_up: false
            })
        );
        assert_eq!(session.phase(), Phase::Spawning);
        assert_eq!(session.board().len(), 4);
        assert!(session.board().iter().all(|(cell, _)| cell.row >= 0));
        let bottom = session.board().iter().map(|(cell, _)| cell.row).max();
        assert_eq!(bottom, Some(21));
        let color = session.config().palette.color(shape);
        assert!(session.board().iter().all(|(_, c)| c == color));
        assert_eq!(session.active_piece().unwrap().shape(), next);
        assert_eq!(session.stats().completed_pieces(), 1);
        assert!(session.queue().len() >= 2);
    }

    #[test]
    fn test_piece_locks_on_blocks() {
        let mut session = session();
        let color = session.config().palette.z;
        session.board.fill(Cell::new(5, 21), color);
        // O cells: columns 5..=6, rows 19..=20.
        replace_active(&mut session, Shape::O, Cell::new(4, 18));

        assert!(session.tick().unwrap().is_locked());
        assert_eq!(session.board().len(), 5);
        assert!(session.board().is_occupied(Cell::new(6, 20)));
        assert!(!session.board().is_occupied(Cell::new(6, 21)));
    }

    #[test]
    fn test_line_clear_is_scored() {
        let mut session = session();
        let color = session.config().palette.z;
        // Row 20 is missing columns 4..=7; row 21 supports it but is not full.
        for column in (0..12).filter(|column| !(4..=7).contains(column)) {
            session.board.fill(Cell::new(column, 20), color);
        }
        for column in 1..12 {
            session.board.fill(Cell::new(column, 21), color);
        }
        // Horizontal I on row 20, columns 4..=7.
        replace_active(&mut session, Shape::I, Cell::new(4, 19));

        let event = session.tick().unwrap();
        assert_eq!(
            event,
            TickEvent::Locked(LockReport {
                rows_cleared: 1,
                points: 100,
                leveled_up: false
            })
        );
        assert_eq!(session.stats().score(), 100);
        assert_eq!(session.stats().level_progress(), 1);
        assert_eq!(session.stats().line_cleared_counter()[1], 1);
        assert_eq!(session.board().len(), 11);
        assert!(!session.board().is_occupied(Cell::new(0, 21)));
        assert!(session.board().iter().all(|(cell, _)| cell.row == 21));
    }

    #[test]
    fn test_shift_next_to_block_locks_before_falling_into_it() {
        let mut session = session();
        let color = session.config().palette.z;
        session.board.fill(Cell::new(3, 10), color);
        // T cells: (5,8) (4,9) (5,9) (6,9). One step left puts (3,9) on top
        // of the block.
        replace_active(&mut session, Shape::T, Cell::new(4, 8));
        session.apply(Command::ShiftLeft).unwrap();

        assert!(session.tick().unwrap().is_locked());
        assert_eq!(session.board().len(), 5);
        assert!(session.board().is_occupied(Cell::new(3, 9)));
        assert!(session.board().is_occupied(Cell::new(4, 8)));
    }

    #[test]
    fn test_lock_above_board_is_game_over() {
        let mut session = session();
        let color = session.config().palette.z;
        for column in 0..12 {
            session.board.fill(Cell::new(column, 0), color);
        }
        session.apply(Command::HardDrop).unwrap();

        run_until(&mut session, TickEvent::is_game_over);
        assert!(session.phase().is_game_over());
        // Nothing was merged and the piece is still at the front.
        assert_eq!(session.board().len(), 12);
        assert_eq!(session.stats().completed_pieces(), 0);

        let snapshot = session.snapshot();
        assert!(snapshot.game_over);
        assert!(snapshot.active.is_none());
        assert_eq!(session.tick().unwrap(), TickEvent::Idle);
    }

    #[test]
    fn test_any_command_after_game_over_restarts() {
        let mut session = session();
        session.stats.record_lock(2).unwrap();
        session.board.fill(Cell::new(0, 21), session.config.palette.i);
        session.phase = Phase::GameOver;

        session.apply(Command::ShiftLeft).unwrap();
        assert_eq!(session.phase(), Phase::Spawning);
        assert!(session.board().is_empty());
        assert_eq!(session.stats().score(), 0);
        assert_eq!(session.stats().level(), 1);
        assert!(session.queue().len() >= 2);
        assert!(!session.should_quit());
    }

    #[test]
    fn test_soft_drop_release_after_game_over_is_ignored() {
        let mut session = session();
        session.board.fill(Cell::new(0, 21), session.config.palette.i);
        session.phase = Phase::GameOver;

        session.apply(Command::SoftDropOff).unwrap();
        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.board().len(), 1);
        assert!(!session.should_quit());

        session.apply(Command::SoftDropOn).unwrap();
        assert_eq!(session.phase(), Phase::Spawning);
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_quit_or_pause_after_game_over_quits() {
        for command in [Command::Quit, Command::TogglePause] {
            let mut session = session();
            session.phase = Phase::GameOver;
            session.apply(command).unwrap();
            assert!(session.should_quit());
            assert!(session.phase().is_game_over());
        }
    }

    #[test]
    fn test_quit_while_playing() {
        let mut session = session();
        session.tick().unwrap();
        session.apply(Command::Quit).unwrap();
        assert!(session.should_quit());
    }

    #[test]
    fn test_pause_freezes_the_game() {
        let mut session = session();
        session.tick().unwrap();
        session.apply(Command::TogglePause).unwrap();
        assert_eq!(session.phase(), Phase::Paused);
        assert!(session.snapshot().paused);

        let before = session.active_piece().unwrap().clone();
        for _ in 0..100 {
            assert_eq!(session.tick().unwrap(), TickEvent::Paused);
        }
        session.apply(Command::ShiftLeft).unwrap();
        session.apply(Command::HardDrop).unwrap();
        assert_eq!(session.active_piece().unwrap(), &before);
        assert_eq!(session.stats().play_ticks(), 1);

        session.apply(Command::TogglePause).unwrap();
        assert_eq!(session.phase(), Phase::Falling);
    }

    #[test]
    fn test_steering_commands() {
        let mut session = session();
        replace_active(&mut session, Shape::T, Cell::new(4, 5));

        session.apply(Command::ShiftRight).unwrap();
        assert_eq!(session.active_piece().unwrap().origin(), Cell::new(5, 5));
        session.apply(Command::ShiftLeft).unwrap();
        session.apply(Command::ShiftLeft).unwrap();
        assert_eq!(session.active_piece().unwrap().origin(), Cell::new(3, 5));

        let upright = session.active_piece().unwrap().occupancy().rotated_clockwise();
        session.apply(Command::RotateCw).unwrap();
        assert_eq!(session.active_piece().unwrap().occupancy(), &upright);
        session.apply(Command::RotateCcw).unwrap();
        assert_eq!(
            session.active_piece().unwrap().occupancy(),
            &Shape::T.occupancy()
        );

        session.apply(Command::SoftDropOn).unwrap();
        assert!(!session.active_piece().unwrap().is_falling());
        session.apply(Command::SoftDropOff).unwrap();
        assert!(session.active_piece().unwrap().is_falling());
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut session1 = session();
        let mut session2 = session();
        let commands = [
            Command::ShiftLeft,
            Command::RotateCw,
            Command::HardDrop,
            Command::ShiftRight,
        ];
        for _ in 0..4 {
            for command in commands {
                session1.apply(command).unwrap();
                session2.apply(command).unwrap();
            }
            run_until(&mut session1, TickEvent::is_locked);
            run_until(&mut session2, TickEvent::is_locked);
        }
        assert_eq!(session1.snapshot(), session2.snapshot());
    }

    #[test]
    fn test_snapshot_contents() {
        let mut session = session();
        session.tick().unwrap();
        let snapshot = session.snapshot();
        assert_eq!((snapshot.width, snapshot.height), (12, 22));
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.score, 0);
        assert!(snapshot.board.is_empty());

        let active = snapshot.active.as_ref().unwrap();
        let piece = session.active_piece().unwrap();
        assert_eq!(active.shape, piece.shape());
        assert_eq!(active.cells.as_slice(), piece.cells());

        let next = snapshot.next.unwrap();
        assert_eq!(next.shape, session.queue().upcoming().unwrap().shape());
        assert_eq!(next.occupancy, next.shape.occupancy());
        assert_eq!(next.color, session.config().palette.color(next.shape));
    }
}
