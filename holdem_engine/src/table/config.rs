//! Table configuration models.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};
use thiserror::Error;

use crate::game::{
    constants::MAX_PLAYERS,
    entities::{Blinds, Chips, DEFAULT_BIG_BLIND, DEFAULT_BUY_IN, DEFAULT_SMALL_BLIND},
};

/// Table speed variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableSpeed {
    Normal,
    Turbo,
    Hyper,
}

impl TableSpeed {
    /// How long a remote seat may think before it is checked/folded.
    #[must_use]
    pub fn action_timeout(self) -> Duration {
        match self {
            TableSpeed::Normal => Duration::from_secs(30),
            TableSpeed::Turbo => Duration::from_secs(15),
            TableSpeed::Hyper => Duration::from_secs(5),
        }
    }
}

impl fmt::Display for TableSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSpeed::Normal => write!(f, "normal"),
            TableSpeed::Turbo => write!(f, "turbo"),
            TableSpeed::Hyper => write!(f, "hyper"),
        }
    }
}

impl FromStr for TableSpeed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(TableSpeed::Normal),
            "turbo" => Ok(TableSpeed::Turbo),
            "hyper" => Ok(TableSpeed::Hyper),
            other => Err(ConfigError::Invalid {
                var: "HOLDEM_SPEED".to_string(),
                reason: format!("unknown speed {other:?}"),
            }),
        }
    }
}

/// Bot difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    Easy,     // Loose-passive, rarely raises
    Standard, // Balanced
    Tag,      // Tight-aggressive
}

impl fmt::Display for BotDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotDifficulty::Easy => write!(f, "easy"),
            BotDifficulty::Standard => write!(f, "standard"),
            BotDifficulty::Tag => write!(f, "tag"),
        }
    }
}

impl FromStr for BotDifficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(BotDifficulty::Easy),
            "standard" => Ok(BotDifficulty::Standard),
            "tag" => Ok(BotDifficulty::Tag),
            other => Err(ConfigError::Invalid {
                var: "HOLDEM_BOT_DIFFICULTY".to_string(),
                reason: format!("unknown difficulty {other:?}"),
            }),
        }
    }
}

/// Configuration error types
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name, used in logs
    pub name: String,

    /// Maximum number of seats (2 to 23)
    pub max_players: usize,

    pub small_blind: Chips,

    pub big_blind: Chips,

    /// Chips each seat starts with
    pub buy_in: Chips,

    /// Remote seat pacing
    pub speed: TableSpeed,

    /// Bot difficulty preset
    pub bot_difficulty: BotDifficulty,

    /// Simulated bot think time in milliseconds (0 to act instantly)
    pub bot_think_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Default Table".to_string(),
            max_players: 9,
            small_blind: DEFAULT_SMALL_BLIND,
            big_blind: DEFAULT_BIG_BLIND,
            buy_in: DEFAULT_BUY_IN,
            speed: TableSpeed::Normal,
            bot_difficulty: BotDifficulty::Standard,
            bot_think_ms: 0,
        }
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl TableConfig {
    /// Load a configuration from `HOLDEM_*` environment variables, falling
    /// back to the defaults for anything unset or unparsable.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure of the loaded values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            name: std::env::var("HOLDEM_TABLE_NAME").unwrap_or(defaults.name),
            max_players: parse_env_or("HOLDEM_MAX_PLAYERS", defaults.max_players),
            small_blind: parse_env_or("HOLDEM_SMALL_BLIND", defaults.small_blind),
            big_blind: parse_env_or("HOLDEM_BIG_BLIND", defaults.big_blind),
            buy_in: parse_env_or("HOLDEM_BUY_IN", defaults.buy_in),
            speed: parse_env_or("HOLDEM_SPEED", defaults.speed),
            bot_difficulty: parse_env_or("HOLDEM_BOT_DIFFICULTY", defaults.bot_difficulty),
            bot_think_ms: parse_env_or("HOLDEM_BOT_THINK_MS", defaults.bot_think_ms),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Names the offending variable and why it was rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |var: &str, reason: String| {
            Err(ConfigError::Invalid {
                var: var.to_string(),
                reason,
            })
        };

        if self.small_blind == 0 {
            return invalid("HOLDEM_SMALL_BLIND", "Must be greater than 0".to_string());
        }
        if self.big_blind <= self.small_blind {
            return invalid(
                "HOLDEM_BIG_BLIND",
                format!("Must be greater than small blind ({})", self.small_blind),
            );
        }
        if self.buy_in < self.big_blind {
            return invalid(
                "HOLDEM_BUY_IN",
                format!("Must cover the big blind ({})", self.big_blind),
            );
        }
        if !(2..=MAX_PLAYERS).contains(&self.max_players) {
            return invalid(
                "HOLDEM_MAX_PLAYERS",
                format!("Must be between 2 and {MAX_PLAYERS}"),
            );
        }
        Ok(())
    }

    #[must_use]
    pub fn blinds(&self) -> Blinds {
        Blinds {
            small: self.small_blind,
            big: self.big_blind,
        }
    }

    #[must_use]
    pub fn action_timeout(&self) -> Duration {
        self.speed.action_timeout()
    }

    #[must_use]
    pub fn bot_think_time(&self) -> Duration {
        Duration::from_millis(self.bot_think_ms)
    }
}
