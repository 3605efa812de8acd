use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Scoring and speed rules.
///
/// The defaults are the standard rules:
///
/// - Line clears score `[0, 100, 300, 500, 800]` points, multiplied by the level
/// - The level is `score / 1000 + 1`
/// - The drop interval starts at 1000 ms and shrinks by 50 ms per level,
///   never going below 100 ms
///
/// Every field has a default, so a partial TOML or JSON table overrides only
/// what it names.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::Rules;
///
/// let rules = Rules::default();
/// assert_eq!(rules.line_clear_points(4, 1), 800);
/// assert_eq!(rules.level_for_score(2500), 3);
/// assert_eq!(rules.drop_interval(5), Duration::from_millis(800));
/// assert_eq!(rules.drop_interval(30), Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    /// Base points by number of lines cleared at once (index 0 to 4).
    pub line_clear_scores: [u64; 5],
    /// Score needed per level.
    pub points_per_level: u64,
    /// Drop interval at level 1, in milliseconds.
    pub base_drop_interval_ms: u64,
    /// Reduction of the drop interval per level, in milliseconds.
    pub drop_interval_step_ms: u64,
    /// Lower bound of the drop interval, in milliseconds.
    pub min_drop_interval_ms: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            line_clear_scores: [0, 100, 300, 500, 800],
            points_per_level: 1000,
            base_drop_interval_ms: 1000,
            drop_interval_step_ms: 50,
            min_drop_interval_ms: 100,
        }
    }
}

/// Invalid combination of [`Rules`] values.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RulesError {
    #[display("points_per_level must be positive")]
    ZeroPointsPerLevel,
    #[display("min_drop_interval_ms must be positive")]
    ZeroMinDropInterval,
    #[display(
        "min_drop_interval_ms ({min_ms}) must not exceed base_drop_interval_ms ({base_ms})"
    )]
    MinAboveBase { min_ms: u64, base_ms: u64 },
}

impl Rules {
    /// Checks that the rules describe a playable game.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.points_per_level == 0 {
            return Err(RulesError::ZeroPointsPerLevel);
        }
        if self.min_drop_interval_ms == 0 {
            return Err(RulesError::ZeroMinDropInterval);
        }
        if self.min_drop_interval_ms > self.base_drop_interval_ms {
            return Err(RulesError::MinAboveBase {
                min_ms: self.min_drop_interval_ms,
                base_ms: self.base_drop_interval_ms,
            });
        }
        Ok(())
    }

    /// Returns the points awarded for clearing `lines` rows at `level`.
    ///
    /// More lines than the table covers (impossible with tetrominoes) score
    /// like the largest entry.
    #[must_use]
    pub fn line_clear_points(&self, lines: usize, level: u32) -> u64 {
        let base = self
            .line_clear_scores
            .get(lines)
            .or(self.line_clear_scores.last())
            .copied()
            .unwrap_or_default();
        base.saturating_mul(u64::from(level))
    }

    /// Returns the level reached with `score` points.
    #[must_use]
    pub fn level_for_score(&self, score: u64) -> u32 {
        let level = (score / self.points_per_level.max(1)).saturating_add(1);
        u32::try_from(level).unwrap_or(u32::MAX)
    }

    /// Returns the automatic drop interval at `level`.
    #[must_use]
    pub fn drop_interval(&self, level: u32) -> Duration {
        let reduction =
            u64::from(level.saturating_sub(1)).saturating_mul(self.drop_interval_step_ms);
        let millis = self
            .base_drop_interval_ms
            .saturating_sub(reduction)
            .max(self.min_drop_interval_ms);
        Duration::from_millis(millis)
    }
}
