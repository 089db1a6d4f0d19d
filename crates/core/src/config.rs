//! Round configuration
//!
//! Defaults are the classic rules: uniform random pieces, immediate
//! lock on landing, and gravity of `max(100, 1000 - (level - 1) * 100)` ms.
//!
//! # Environment Variables
//!
//! [`RoundConfig::from_env`] reads:
//!
//! - `BLOCKFALL_SEED`: RNG seed (default: 1)
//! - `BLOCKFALL_RANDOMIZER`: `uniform` or `bag` (default: uniform)
//! - `BLOCKFALL_LOCK_DELAY_MS`: lock delay, 0 locks on landing (default: 0)
//! - `BLOCKFALL_LOCK_RESET_LIMIT`: lock timer restarts per piece (default: 15)
//!
//! Missing or unparsable values fall back to the default.

use serde::{Deserialize, Serialize};

use crate::types::{
    ContractError, BASE_GRAVITY_MS, DEFAULT_LOCK_RESET_LIMIT, GRAVITY_FLOOR_MS, GRAVITY_STEP_MS,
};

/// How the next piece is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Randomizer {
    /// Every kind equally likely on every draw
    #[default]
    Uniform,
    /// Shuffled bags of all seven kinds
    SevenBag,
}

impl Randomizer {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" | "random" => Some(Randomizer::Uniform),
            "bag" | "7bag" | "sevenbag" => Some(Randomizer::SevenBag),
            _ => None,
        }
    }
}

/// Step function from level to gravity interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravityCurve {
    /// Interval at level 1
    pub base_ms: u32,
    /// Reduction per level
    pub step_ms: u32,
    /// Lower bound
    pub floor_ms: u32,
}

impl GravityCurve {
    /// Milliseconds per row at `level` (levels start at 1); never below the floor or 1ms
    pub fn interval_ms(&self, level: u32) -> u32 {
        let speedup = level.saturating_sub(1).saturating_mul(self.step_ms);
        self.base_ms
            .saturating_sub(speedup)
            .max(self.floor_ms)
            .max(1)
    }
}

impl Default for GravityCurve {
    fn default() -> Self {
        Self {
            base_ms: BASE_GRAVITY_MS,
            step_ms: GRAVITY_STEP_MS,
            floor_ms: GRAVITY_FLOOR_MS,
        }
    }
}

/// Parameters of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub seed: u32,
    pub randomizer: Randomizer,
    /// 0 locks a piece as soon as it fails to descend
    pub lock_delay_ms: u32,
    pub lock_reset_limit: u8,
    pub gravity: GravityCurve,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            randomizer: Randomizer::Uniform,
            lock_delay_ms: 0,
            lock_reset_limit: DEFAULT_LOCK_RESET_LIMIT,
            gravity: GravityCurve::default(),
        }
    }
}

impl RoundConfig {
    /// Default configuration with a specific seed
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let seed = env::var("BLOCKFALL_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let randomizer = env::var("BLOCKFALL_RANDOMIZER")
            .ok()
            .and_then(|s| Randomizer::from_str(&s))
            .unwrap_or(defaults.randomizer);

        let lock_delay_ms = env::var("BLOCKFALL_LOCK_DELAY_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.lock_delay_ms);

        let lock_reset_limit = env::var("BLOCKFALL_LOCK_RESET_LIMIT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.lock_reset_limit);

        Self {
            seed,
            randomizer,
            lock_delay_ms,
            lock_reset_limit,
            gravity: defaults.gravity,
        }
    }

    /// Reject configurations the round controller cannot honour
    pub fn validate(&self) -> Result<(), ContractError> {
        let gravity = &self.gravity;
        if gravity.floor_ms == 0 {
            return Err(ContractError::InvalidConfig(
                "gravity floor must be at least 1ms".to_string(),
            ));
        }
        if gravity.floor_ms > gravity.base_ms {
            return Err(ContractError::InvalidConfig(format!(
                "gravity floor {}ms is above the base interval {}ms",
                gravity.floor_ms, gravity.base_ms
            )));
        }
        Ok(())
    }

    /// Whether pieces lock as soon as they land
    pub fn locks_immediately(&self) -> bool {
        self.lock_delay_ms == 0
    }
}
