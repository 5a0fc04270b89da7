//! Engine and provider configuration.
//!
//! Both structs have sensible defaults, builder-style setters, and a
//! `from_env()` constructor for hosts that configure through the environment.

use std::env;
use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Round engine configuration.
///
/// Deserialization rejects a zero mistake budget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EngineConfigFields")]
pub struct EngineConfig {
    /// Incorrect guesses allowed before the round is lost.
    pub mistake_budget: u8,

    /// Pause before each category reveal after a loss (milliseconds).
    pub reveal_delay_ms: u64,

    /// Pause after the final reveal before the loss is confirmed (milliseconds).
    pub closing_delay_ms: u64,

    /// Pause before the won summary (milliseconds).
    pub win_delay_ms: u64,

    /// Board RNG seed. `None` draws one from entropy.
    pub seed: Option<u64>,
}

/// Wire shape of [`EngineConfig`], checked before conversion.
#[derive(Deserialize)]
struct EngineConfigFields {
    mistake_budget: u8,
    reveal_delay_ms: u64,
    closing_delay_ms: u64,
    win_delay_ms: u64,
    seed: Option<u64>,
}

impl TryFrom<EngineConfigFields> for EngineConfig {
    type Error = String;

    fn try_from(fields: EngineConfigFields) -> Result<Self, Self::Error> {
        if fields.mistake_budget == 0 {
            return Err("mistake_budget must be at least 1".to_string());
        }
        Ok(Self {
            mistake_budget: fields.mistake_budget,
            reveal_delay_ms: fields.reveal_delay_ms,
            closing_delay_ms: fields.closing_delay_ms,
            win_delay_ms: fields.win_delay_ms,
            seed: fields.seed,
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mistake_budget: 4,
            reveal_delay_ms: 1000,
            closing_delay_ms: 1000,
            win_delay_ms: 1000,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CONNECTIONS_MISTAKES` - Mistake budget (default: 4, minimum 1)
    /// - `CONNECTIONS_REVEAL_DELAY_MS` - Per-reveal pause (default: 1000)
    /// - `CONNECTIONS_CLOSING_DELAY_MS` - Pause after last reveal (default: 1000)
    /// - `CONNECTIONS_WIN_DELAY_MS` - Pause before win summary (default: 1000)
    /// - `CONNECTIONS_SEED` - Fixed board seed (default: random)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(budget) = read_env::<u8>("CONNECTIONS_MISTAKES") {
            config.mistake_budget = budget.max(1);
        }
        if let Some(ms) = read_env("CONNECTIONS_REVEAL_DELAY_MS") {
            config.reveal_delay_ms = ms;
        }
        if let Some(ms) = read_env("CONNECTIONS_CLOSING_DELAY_MS") {
            config.closing_delay_ms = ms;
        }
        if let Some(ms) = read_env("CONNECTIONS_WIN_DELAY_MS") {
            config.win_delay_ms = ms;
        }
        if let Some(seed) = read_env("CONNECTIONS_SEED") {
            config.seed = Some(seed);
        }

        config
    }

    /// Set the board seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the mistake budget (minimum 1).
    #[must_use]
    pub fn with_mistake_budget(mut self, budget: u8) -> Self {
        self.mistake_budget = budget.max(1);
        self
    }

    /// Mistakes a round starts with. Never zero, even if the field was set
    /// directly.
    #[must_use]
    pub fn starting_mistakes(&self) -> u8 {
        self.mistake_budget.max(1)
    }

    /// Set every sequencing delay at once.
    #[must_use]
    pub fn with_delays(mut self, reveal_ms: u64, closing_ms: u64, win_ms: u64) -> Self {
        self.reveal_delay_ms = reveal_ms;
        self.closing_delay_ms = closing_ms;
        self.win_delay_ms = win_ms;
        self
    }

    /// Pause before each reveal.
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Pause after the final reveal.
    #[must_use]
    pub fn closing_delay(&self) -> Duration {
        Duration::from_millis(self.closing_delay_ms)
    }

    /// Pause before the win summary.
    #[must_use]
    pub fn win_delay(&self) -> Duration {
        Duration::from_millis(self.win_delay_ms)
    }
}

/// Puzzle provider configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Offset of the provider's timezone from UTC, in minutes.
    pub utc_offset_minutes: i32,

    /// Fixed reference date. `None` uses the current date.
    pub today: Option<NaiveDate>,
}

impl ProviderConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CONNECTIONS_UTC_OFFSET_MINUTES` - Provider timezone offset (default: 0)
    /// - `CONNECTIONS_TODAY` - Fixed reference date, `YYYY-MM-DD`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(offset) = read_env("CONNECTIONS_UTC_OFFSET_MINUTES") {
            config.utc_offset_minutes = offset;
        }
        if let Some(today) = read_env("CONNECTIONS_TODAY") {
            config.today = Some(today);
        }

        config
    }

    /// Pin the reference date.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Set the timezone offset.
    #[must_use]
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// The provider's "today".
    ///
    /// Falls back to UTC if the configured offset is out of range.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        if let Some(today) = self.today {
            return today;
        }

        let now = Utc::now();
        match FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)) {
            Some(offset) => now.with_timezone(&offset).date_naive(),
            None => now.date_naive(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
