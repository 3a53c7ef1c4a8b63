//! Score persistence collaborator.
//!
//! The controller hands the final [`ScoreSheet`] to a [`ScoreSink`] exactly
//! once, at `Complete`. A failing sink is reported back but never undoes the
//! in-memory scores.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use memento_types::ScoreSheet;
use memento_utils::atomic_write;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write scores to {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("score sink unavailable: {0}")]
    Unavailable(String),
}

pub trait ScoreSink {
    fn persist(&mut self, sheet: &ScoreSheet) -> Result<(), PersistError>;
}

/// Plain-text score file, one line per scored phase.
#[must_use]
pub fn render_score_sheet(sheet: &ScoreSheet) -> String {
    let mut out = String::new();
    for (phase, score) in sheet.entries() {
        let _ = writeln!(out, "{phase}: {score}/{}", sheet.object_count);
    }
    out
}

/// Writes the sheet to a file, replacing any previous contents atomically.
#[derive(Debug, Clone)]
pub struct FileScoreSink {
    path: PathBuf,
}

impl FileScoreSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreSink for FileScoreSink {
    fn persist(&mut self, sheet: &ScoreSheet) -> Result<(), PersistError> {
        let rendered = render_score_sheet(sheet);
        match atomic_write(&self.path, rendered.as_bytes()) {
            Ok(()) => {
                info!(path = %self.path.display(), total = sheet.total(), "Scores saved");
                Ok(())
            }
            Err(source) => {
                warn!(path = %self.path.display(), "Failed to save scores: {source}");
                Err(PersistError::Write {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

/// Collects sheets in memory. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreSink {
    sheets: Arc<Mutex<Vec<ScoreSheet>>>,
}

impl MemoryScoreSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sheets(&self) -> Vec<ScoreSheet> {
        self.sheets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ScoreSink for MemoryScoreSink {
    fn persist(&mut self, sheet: &ScoreSheet) -> Result<(), PersistError> {
        self.sheets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*sheet);
        Ok(())
    }
}
