use tracing::debug;

use crate::models::{ScoringSettings, StatLine, WeekStats};

/// Stat key the engine writes a player's league-specific total under
pub const CUSTOM_POINTS_KEY: &str = "pts_custom";

/// Applies a league's stat weights to raw stat lines
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    settings: ScoringSettings,
}

impl ScoringEngine {
    pub fn new(settings: ScoringSettings) -> Self {
        Self { settings }
    }

    /// Sum of `value * weight` over stats present in both the line and the settings.
    ///
    /// Stats without a weight are ignored and weights without a stat add
    /// nothing. `CUSTOM_POINTS_KEY` never contributes, so scoring a line that
    /// was already scored gives the same total.
    pub fn custom_score(&self, line: &StatLine) -> f64 {
        line.iter()
            .filter(|(stat, _)| *stat != CUSTOM_POINTS_KEY)
            .filter_map(|(stat, value)| self.settings.weight(stat).map(|weight| value * weight))
            .fold(0.0, |total, points| total + points)
    }

    /// Scores one player and writes the total into their stat line under `CUSTOM_POINTS_KEY`.
    ///
    /// This mutates `week`. It takes the week by exclusive reference, so a
    /// stat line has a single writer at a time; callers sharing a week across
    /// threads must synchronize around this call.
    ///
    /// Returns `None` without touching `week` when the player has no stat
    /// line, which covers an empty week as well. `None` means "no score
    /// available" and is distinct from a score of 0.
    pub fn apply(&self, week: &mut WeekStats, player_id: &str) -> Option<f64> {
        let line = week.get_mut(player_id)?;
        let total = self.custom_score(line);
        line.insert(CUSTOM_POINTS_KEY, total);
        Some(total)
    }

    /// Scores every player in `week` in place, returning how many lines were scored.
    ///
    /// An empty week is left unchanged.
    pub fn score_week(&self, week: &mut WeekStats) -> usize {
        if week.is_empty() {
            debug!("No stat lines to score");
            return 0;
        }

        let mut scored = 0;
        for line in week.lines_mut() {
            let total = self.custom_score(line);
            line.insert(CUSTOM_POINTS_KEY, total);
            scored += 1;
        }

        debug!("Scored {} stat lines with {} weights", scored, self.settings.len());
        scored
    }
}
