//! Resolved game settings shared across crates.
//!
//! The raw TOML struct (with `Option` fields) stays private in
//! `memento-config`. The loader resolves it into [`GameSettings`] at the parse
//! boundary, so holding a `GameSettings` proves every value is usable.

use std::time::Duration;

use thiserror::Error;

use crate::slot::HALF_SIZE;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{name} must be a positive number of seconds (got {value})")]
    InvalidDuration { name: &'static str, value: f64 },
    #[error("snap threshold must be positive and finite (got {0})")]
    InvalidSnapThreshold(f32),
    #[error("object count must be between 1 and {max} (got {0})", max = HALF_SIZE)]
    InvalidObjectCount(u8),
    #[error("generator retry budget must be at least 1")]
    ZeroRetryBudget,
}

/// Validated, read-only session configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSettings {
    memorize: Duration,
    play: Duration,
    transition_overlay: Duration,
    snap_threshold: f32,
    object_count: u8,
    retry_budget: u32,
    seed: Option<u64>,
}

impl GameSettings {
    pub const DEFAULT_MEMORIZE_SECS: f64 = 10.0;
    pub const DEFAULT_PLAY_SECS: f64 = 15.0;
    pub const DEFAULT_TRANSITION_OVERLAY_SECS: f64 = 3.0;
    pub const DEFAULT_SNAP_THRESHOLD: f32 = 0.3;
    pub const DEFAULT_OBJECT_COUNT: u8 = HALF_SIZE as u8;
    pub const DEFAULT_RETRY_BUDGET: u32 = 10_000;

    pub fn new(
        memorize_secs: f64,
        play_secs: f64,
        transition_overlay_secs: f64,
        snap_threshold: f32,
        object_count: u8,
        retry_budget: u32,
    ) -> Result<Self, SettingsError> {
        let memorize = positive_duration("memorize_secs", memorize_secs)?;
        let play = positive_duration("play_secs", play_secs)?;
        let transition_overlay =
            positive_duration("transition_overlay_secs", transition_overlay_secs)?;
        if !snap_threshold.is_finite() || snap_threshold <= 0.0 {
            return Err(SettingsError::InvalidSnapThreshold(snap_threshold));
        }
        if object_count == 0 || usize::from(object_count) > HALF_SIZE {
            return Err(SettingsError::InvalidObjectCount(object_count));
        }
        if retry_budget == 0 {
            return Err(SettingsError::ZeroRetryBudget);
        }
        Ok(Self {
            memorize,
            play,
            transition_overlay,
            snap_threshold,
            object_count,
            retry_budget,
            seed: None,
        })
    }

    /// Fix the session RNG seed for reproducible arrangements.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn memorize(&self) -> Duration {
        self.memorize
    }

    #[must_use]
    pub fn play(&self) -> Duration {
        self.play
    }

    #[must_use]
    pub fn transition_overlay(&self) -> Duration {
        self.transition_overlay
    }

    #[must_use]
    pub fn snap_threshold(&self) -> f32 {
        self.snap_threshold
    }

    #[must_use]
    pub fn object_count(&self) -> u8 {
        self.object_count
    }

    #[must_use]
    pub fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            memorize: Duration::from_secs_f64(Self::DEFAULT_MEMORIZE_SECS),
            play: Duration::from_secs_f64(Self::DEFAULT_PLAY_SECS),
            transition_overlay: Duration::from_secs_f64(Self::DEFAULT_TRANSITION_OVERLAY_SECS),
            snap_threshold: Self::DEFAULT_SNAP_THRESHOLD,
            object_count: Self::DEFAULT_OBJECT_COUNT,
            retry_budget: Self::DEFAULT_RETRY_BUDGET,
            seed: None,
        }
    }
}

fn positive_duration(name: &'static str, value: f64) -> Result<Duration, SettingsError> {
    if value.is_finite() && value > 0.0 {
        Duration::try_from_secs_f64(value)
            .map_err(|_| SettingsError::InvalidDuration { name, value })
    } else {
        Err(SettingsError::InvalidDuration { name, value })
    }
}
