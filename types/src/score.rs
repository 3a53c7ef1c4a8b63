//! Per-phase scores.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::phase::ScoredPhase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("{phase} has not been scored yet")]
    Unscored { phase: ScoredPhase },
    #[error("{phase} was already scored")]
    AlreadyRecorded { phase: ScoredPhase },
    #[error("score {score} for {phase} exceeds object count {max}")]
    OutOfRange {
        phase: ScoredPhase,
        score: u8,
        max: u8,
    },
}

/// Write-once scores for the four scored phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    object_count: u8,
    entries: [Option<u8>; 4],
}

impl ScoreBoard {
    #[must_use]
    pub fn new(object_count: u8) -> Self {
        Self {
            object_count,
            entries: [None; 4],
        }
    }

    #[must_use]
    pub fn object_count(&self) -> u8 {
        self.object_count
    }

    /// Record a phase's score. Each phase accepts exactly one value.
    pub fn record(&mut self, phase: ScoredPhase, score: u8) -> Result<(), ScoreError> {
        if score > self.object_count {
            return Err(ScoreError::OutOfRange {
                phase,
                score,
                max: self.object_count,
            });
        }
        let entry = &mut self.entries[phase.index()];
        if entry.is_some() {
            return Err(ScoreError::AlreadyRecorded { phase });
        }
        *entry = Some(score);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, phase: ScoredPhase) -> Option<u8> {
        self.entries[phase.index()]
    }

    pub fn score(&self, phase: ScoredPhase) -> Result<u8, ScoreError> {
        self.get(phase).ok_or(ScoreError::Unscored { phase })
    }

    /// Snapshot for persistence, available once every phase is scored.
    #[must_use]
    pub fn sheet(&self) -> Option<ScoreSheet> {
        let [Some(play1), Some(play2), Some(test1), Some(test2)] = self.entries else {
            return None;
        };
        Some(ScoreSheet {
            object_count: self.object_count,
            play1,
            play2,
            test1,
            test2,
        })
    }
}

/// Final scores in fixed order: Play 1, Play 2, Test 1, Test 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub object_count: u8,
    pub play1: u8,
    pub play2: u8,
    pub test1: u8,
    pub test2: u8,
}

impl ScoreSheet {
    #[must_use]
    pub fn scores(&self) -> [u8; 4] {
        [self.play1, self.play2, self.test1, self.test2]
    }

    pub fn entries(&self) -> impl Iterator<Item = (ScoredPhase, u8)> {
        ScoredPhase::ALL.into_iter().zip(self.scores())
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.scores().iter().map(|s| u32::from(*s)).sum()
    }
}
