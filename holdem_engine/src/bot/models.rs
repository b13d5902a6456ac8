//! Bot difficulty parameters.

use std::time::Duration;

use crate::table::config::BotDifficulty;

/// Bot difficulty parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyParams {
    /// VPIP (Voluntarily Put $ In Pot) percentage
    pub vpip: f32,

    /// PFR (Pre-Flop Raise) percentage
    pub pfr: f32,

    /// Aggression factor (ratio of bets/raises to calls)
    pub aggression_factor: f32,

    /// Whether bot bluffs
    pub bluffs: bool,

    /// Bluff frequency (0.0 to 1.0)
    pub bluff_frequency: f32,

    /// Random variance in thinking time, as a fraction of the table's
    /// think time
    pub think_time_variance: f32,
}

impl DifficultyParams {
    /// Loose-passive: plays many hands, rarely aggressive
    #[must_use]
    pub fn easy() -> Self {
        Self {
            vpip: 0.45,
            pfr: 0.10,
            aggression_factor: 0.5,
            bluffs: false,
            bluff_frequency: 0.0,
            think_time_variance: 0.7,
        }
    }

    /// Balanced TAG (Tight-Aggressive) style
    #[must_use]
    pub fn standard() -> Self {
        Self {
            vpip: 0.30,
            pfr: 0.20,
            aggression_factor: 1.5,
            bluffs: true,
            bluff_frequency: 0.15,
            think_time_variance: 0.75,
        }
    }

    /// Very tight, very aggressive when playing
    #[must_use]
    pub fn tag() -> Self {
        Self {
            vpip: 0.20,
            pfr: 0.18,
            aggression_factor: 2.5,
            bluffs: true,
            bluff_frequency: 0.25,
            think_time_variance: 0.8,
        }
    }

    /// Get parameters for a given difficulty
    #[must_use]
    pub fn from_difficulty(difficulty: BotDifficulty) -> Self {
        match difficulty {
            BotDifficulty::Easy => Self::easy(),
            BotDifficulty::Standard => Self::standard(),
            BotDifficulty::Tag => Self::tag(),
        }
    }

    /// Think time bounds around `base`.
    #[must_use]
    pub fn think_time_range(&self, base: Duration) -> (Duration, Duration) {
        let variance = self.think_time_variance.clamp(0.0, 1.0);
        let spread = Duration::from_millis((base.as_millis() as f32 * variance) as u64);
        (base - spread, base + spread)
    }
}
