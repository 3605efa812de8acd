use std::time::Duration;

use super::rules::Rules;

/// Result of scoring one lock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    /// Points added to the score.
    pub points: u64,
    /// New level, if the lock raised it.
    pub new_level: Option<u32>,
}

/// Game statistics tracking score, level, lines cleared, and piece count.
///
/// - **Score**: Sum of line clear points, each multiplied by the level at the time
/// - **Level**: Starts at 1 and follows the score (`score / 1000 + 1` by default);
///   it never decreases within a game
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: Count of single, double, triple, quad line clears
/// - **Play time**: Sum of tick deltas received while playing
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameStats, Rules};
///
/// let rules = Rules::default();
/// let mut stats = GameStats::new();
/// let update = stats.complete_piece_drop(4, &rules); // 4 lines at level 1
///
/// assert_eq!(update.points, 800);
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: u64,
    level: u32,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    play_time: Duration,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new tracker: score 0, level 1, all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
            play_time: Duration::ZERO,
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

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of lock events by lines cleared.
    ///
    /// Index `n` counts the locks that cleared exactly `n` lines, so `[0]`
    /// counts locks without a clear and `[4]` counts four-line clears.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Returns the accumulated play time.
    #[must_use]
    pub const fn play_time(&self) -> Duration {
        self.play_time
    }

    pub(crate) fn add_play_time(&mut self, delta: Duration) {
        self.play_time = self.play_time.saturating_add(delta);
    }

    /// Updates statistics after a piece locks.
    ///
    /// Awards `rules.line_clear_points(cleared_lines, level)` and then raises
    /// the level if the new score reaches a higher one.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize, rules: &Rules) -> ScoreUpdate {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }

        if cleared_lines == 0 {
            return ScoreUpdate {
                points: 0,
                new_level: None,
            };
        }

        let points = rules.line_clear_points(cleared_lines, self.level);
        self.score = self.score.saturating_add(points);

        let level = rules.level_for_score(self.score);
        let new_level = if level > self.level {
            self.level = level;
            Some(level)
        } else {
            None
        };
        ScoreUpdate { points, new_level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.completed_pieces(), 0);
        assert_eq!(stats.total_cleared_lines(), 0);
        assert_eq!(stats.play_time(), Duration::ZERO);
    }

    #[test]
    fn test_drop_without_clear_scores_nothing() {
        let rules = Rules::default();
        let mut stats = GameStats::new();
        let update = stats.complete_piece_drop(0, &rules);
        assert_eq!(update.points, 0);
        assert_eq!(update.new_level, None);
        assert_eq!(stats.completed_pieces(), 1);
        assert_eq!(stats.line_cleared_counter(), &[1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_points_multiplied_by_level() {
        let rules = Rules::default();
        let mut stats = GameStats::new();
        stats.complete_piece_drop(4, &rules);
        stats.complete_piece_drop(4, &rules);
        assert_eq!(stats.score(), 1600);
        assert_eq!(stats.level(), 2);

        let update = stats.complete_piece_drop(1, &rules);
        assert_eq!(update.points, 200);
        assert_eq!(stats.score(), 1800);
    }

    #[test]
    fn test_level_up_reported_once() {
        let rules = Rules::default();
        let mut stats = GameStats::new();
        assert_eq!(stats.complete_piece_drop(3, &rules).new_level, None);
        assert_eq!(stats.complete_piece_drop(3, &rules).new_level, Some(2));
        assert_eq!(stats.score(), 1000);
        // 500 * 2 = 1000 more points -> level 3
        assert_eq!(stats.complete_piece_drop(3, &rules).new_level, Some(3));
        assert_eq!(stats.complete_piece_drop(0, &rules).new_level, None);
    }

    #[test]
    fn test_level_jumps_multiple() {
        let rules = Rules {
            points_per_level: 100,
            ..Rules::default()
        };
        let mut stats = GameStats::new();
        let update = stats.complete_piece_drop(4, &rules);
        assert_eq!(update.new_level, Some(9));
        assert_eq!(stats.level(), 9);
    }

    #[test]
    fn test_huge_scores_saturate() {
        let rules = Rules {
            line_clear_scores: [0, u64::MAX / 2, 0, 0, 0],
            points_per_level: 1,
            ..Rules::default()
        };
        let mut stats = GameStats::new();
        for _ in 0..3 {
            stats.complete_piece_drop(1, &rules);
        }
        assert_eq!(stats.score(), u64::MAX);
        assert_eq!(stats.level(), u32::MAX);
        assert_eq!(stats.total_cleared_lines(), 3);
    }

    #[test]
    fn test_play_time_accumulates() {
        let mut stats = GameStats::new();
        stats.add_play_time(Duration::from_millis(16));
        stats.add_play_time(Duration::from_millis(17));
        assert_eq!(stats.play_time(), Duration::from_millis(33));
    }
}
