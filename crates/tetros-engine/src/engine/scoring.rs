use crate::ScoreError;

/// Base points for clearing 0-4 rows with one lock, before the level factor.
const SCORE_TABLE: [u64; 5] = [0, 100, 300, 500, 800];

/// Returns the points awarded for clearing `rows_cleared` rows at `level`.
///
/// # Example
///
/// ```
/// use tetros_engine::line_clear_score;
///
/// assert_eq!(line_clear_score(1, 1), Ok(100));
/// assert_eq!(line_clear_score(4, 2), Ok(1600));
/// assert!(line_clear_score(5, 1).is_err());
/// ```
pub fn line_clear_score(rows_cleared: usize, level: u32) -> Result<u64, ScoreError> {
    SCORE_TABLE
        .get(rows_cleared)
        .map(|base| base * u64::from(level))
        .ok_or(ScoreError::InvalidRowClearCount { rows_cleared })
}

/// Outcome of scoring one lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    pub rows_cleared: usize,
    pub points: u64,
    pub leveled_up: bool,
}

/// Score, level and counters of one game.
///
/// - **Score**: sum of [`line_clear_score`] over every lock
/// - **Level**: starts at 1 and goes up each time `lines_per_level` rows
///   have been cleared since the last level-up
/// - **Counters**: locked pieces, total rows and a histogram of clear sizes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: u64,
    level: u32,
    level_progress: u32,
    lines_per_level: u32,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    play_ticks: u64,
}

impl GameStats {
    #[must_use]
    pub const fn new(lines_per_level: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            level_progress: 0,
            lines_per_level,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
            play_ticks: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Rows cleared since the last level-up.
    #[must_use]
    pub const fn level_progress(&self) -> u32 {
        self.level_progress
    }

    #[must_use]
    pub const fn lines_per_level(&self) -> u32 {
        self.lines_per_level
    }

    /// Number of pieces merged into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Histogram of locks by rows cleared.
    ///
    /// - `[0]`: locks that cleared nothing
    /// - `[1]`..`[4]`: singles, doubles, triples, tetrises
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Ticks spent playing, paused ticks excluded.
    #[must_use]
    pub const fn play_ticks(&self) -> u64 {
        self.play_ticks
    }

    pub const fn increment_tick(&mut self) {
        self.play_ticks += 1;
    }

    /// Updates score, level and counters after a piece locks.
    ///
    /// Points use the level before any level-up caused by this lock. When the
    /// progress reaches or passes `lines_per_level`, the level goes up by one
    /// and the excess rows carry over.
    pub fn record_lock(&mut self, rows_cleared: usize) -> Result<LockReport, ScoreError> {
        let points = line_clear_score(rows_cleared, self.level)?;
        let rows = u32::try_from(rows_cleared)
            .map_err(|_| ScoreError::InvalidRowClearCount { rows_cleared })?;

        self.score += points;
        self.completed_pieces += 1;
        self.total_cleared_lines += rows_cleared;
        self.line_cleared_counter[rows_cleared] += 1;

        self.level_progress += rows;
        let leveled_up = self.level_progress >= self.lines_per_level;
        if leveled_up {
            self.level_progress -= self.lines_per_level;
            self.level += 1;
        }

        Ok(LockReport {
            rows_cleared,
            points,
            leveled_up,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(line_clear_score(1, 1), Ok(100));
        assert_eq!(line_clear_score(2, 3), Ok(900));
        assert_eq!(line_clear_score(3, 1), Ok(500));
        assert_eq!(line_clear_score(4, 2), Ok(1600));
        for level in [1, 5, 42] {
            assert_eq!(line_clear_score(0, level), Ok(0));
        }
    }

    #[test]
    fn test_score_rejects_more_than_four_rows() {
        assert_eq!(
            line_clear_score(5, 1),
            Err(ScoreError::InvalidRowClearCount { rows_cleared: 5 })
        );
    }

    #[test]
    fn test_new_stats() {
        let stats = GameStats::new(10);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.level_progress(), 0);
        assert_eq!(stats.completed_pieces(), 0);
        assert_eq!(stats.line_cleared_counter(), &[0; 5]);
    }

    #[test]
    fn test_record_lock_updates_counters() {
        let mut stats = GameStats::new(10);
        let report = stats.record_lock(0).unwrap();
        assert_eq!(report.points, 0);
        let report = stats.record_lock(4).unwrap();
        assert_eq!(
            report,
            LockReport {
                rows_cleared: 4,
                points: 800,
                leveled_up: false
            }
        );
        stats.record_lock(2).unwrap();

        assert_eq!(stats.score(), 1100);
        assert_eq!(stats.completed_pieces(), 3);
        assert_eq!(stats.total_cleared_lines(), 6);
        assert_eq!(stats.line_cleared_counter(), &[1, 0, 1, 0, 1]);
        assert_eq!(stats.level_progress(), 6);
    }

    #[test]
    fn test_level_up_at_exactly_ten_rows() {
        let mut stats = GameStats::new(10);
        for _ in 0..9 {
            assert!(!stats.record_lock(1).unwrap().leveled_up);
        }
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.level_progress(), 9);

        let report = stats.record_lock(1).unwrap();
        assert!(report.leveled_up);
        assert_eq!(report.points, 100);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.level_progress(), 0);

        // The next clear is scored at the new level.
        assert_eq!(stats.record_lock(1).unwrap().points, 200);
    }

    #[test]
    fn test_level_progress_overshoot_carries() {
        let mut stats = GameStats::new(10);
        stats.record_lock(4).unwrap();
        stats.record_lock(4).unwrap();
        let report = stats.record_lock(4).unwrap();
        assert!(report.leveled_up);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.level_progress(), 2);
    }

    #[test]
    fn test_invalid_lock_leaves_stats_untouched() {
        let mut stats = GameStats::new(10);
        stats.record_lock(1).unwrap();
        let before = stats.clone();
        assert!(stats.record_lock(7).is_err());
        assert_eq!(stats, before);
    }

    #[test]
    fn test_play_ticks() {
        let mut stats = GameStats::new(10);
        for _ in 0..3 {
            stats.increment_tick();
        }
        assert_eq!(stats.play_ticks(), 3);
    }
}
