//! Configuration loading for Memento.
//!
//! Reads `~/.memento/config.toml` (or `$MEMENTO_CONFIG`) and resolves it into
//! [`GameSettings`]. Every key is optional; missing keys fall back to the
//! reference defaults.
//!
//! ```toml
//! [timing]
//! memorize_secs = 10
//! play_secs = 15
//! transition_overlay_secs = 3
//!
//! [board]
//! object_count = 5
//! snap_threshold = 0.3
//!
//! [generator]
//! retry_budget = 10000
//! seed = 42
//!
//! [scores]
//! path = "~/GameScores.txt"
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use memento_types::{GameSettings, SettingsError};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "MEMENTO_CONFIG";

const SCORES_FILE_NAME: &str = "GameScores.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config value: {0}")]
    Invalid(#[from] SettingsError),
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => Some(path),
            ConfigError::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MementoConfig {
    pub timing: Option<TimingConfig>,
    pub board: Option<BoardConfig>,
    pub generator: Option<GeneratorConfig>,
    pub scores: Option<ScoresConfig>,
}

/// Phase durations in seconds.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    pub memorize_secs: Option<f64>,
    pub play_secs: Option<f64>,
    /// How long the "Round 2" and return-prompt overlays stay up.
    pub transition_overlay_secs: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    pub object_count: Option<u8>,
    pub snap_threshold: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    pub retry_budget: Option<u32>,
    /// Fixed RNG seed. Omit for a fresh arrangement every session.
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoresConfig {
    /// Score file location. A leading `~/` expands to the home directory.
    pub path: Option<String>,
}

impl MementoConfig {
    /// Load from the default location. A missing file is not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), "Failed to read config: {err}");
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match Self::parse(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded config");
                Ok(config)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "Failed to parse config: {err}");
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Validate and fill defaults.
    pub fn resolve(&self) -> Result<GameSettings, ConfigError> {
        let timing = self.timing.as_ref();
        let board = self.board.as_ref();
        let generator = self.generator.as_ref();

        let settings = GameSettings::new(
            timing
                .and_then(|t| t.memorize_secs)
                .unwrap_or(GameSettings::DEFAULT_MEMORIZE_SECS),
            timing
                .and_then(|t| t.play_secs)
                .unwrap_or(GameSettings::DEFAULT_PLAY_SECS),
            timing
                .and_then(|t| t.transition_overlay_secs)
                .unwrap_or(GameSettings::DEFAULT_TRANSITION_OVERLAY_SECS),
            board
                .and_then(|b| b.snap_threshold)
                .unwrap_or(GameSettings::DEFAULT_SNAP_THRESHOLD),
            board
                .and_then(|b| b.object_count)
                .unwrap_or(GameSettings::DEFAULT_OBJECT_COUNT),
            generator
                .and_then(|g| g.retry_budget)
                .unwrap_or(GameSettings::DEFAULT_RETRY_BUDGET),
        )?;

        Ok(match generator.and_then(|g| g.seed) {
            Some(seed) => settings.with_seed(seed),
            None => settings,
        })
    }

    /// Configured score file, or `<data dir>/memento/GameScores.txt`.
    #[must_use]
    pub fn scores_path(&self) -> Option<PathBuf> {
        match self.scores.as_ref().and_then(|s| s.path.as_deref()) {
            Some(raw) => Some(expand_home(raw, dirs::home_dir())),
            None => default_scores_path(),
        }
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    resolve_config_path(env::var_os(CONFIG_ENV), dirs::home_dir())
}

#[must_use]
pub fn default_scores_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("memento").join(SCORES_FILE_NAME))
}

fn resolve_config_path(env_override: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match env_override {
        Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => home.map(|home| home.join(".memento").join("config.toml")),
    }
}

fn expand_home(raw: &str, home: Option<PathBuf>) -> PathBuf {
    match (raw.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}
