//! Round phases and the transition table.
//!
//! ```text
//! Ready -> Memorize(1) -> Play(1) -> Memorize(2) -> Play(2) -> Test(1) -> Test(2) -> Complete
//! ```
//!
//! Progression is strictly forward; no phase is revisited.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two memorized arrangements a phase refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Round {
    One,
    Two,
}

impl Round {
    pub const ALL: [Round; 2] = [Round::One, Round::Two];

    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Round::One => 1,
            Round::Two => 2,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Round::One => 0,
            Round::Two => 1,
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    Ready,
    Memorize(Round),
    Play(Round),
    Test(Round),
    Complete,
}

impl RoundPhase {
    /// Every phase in the order a session visits them.
    pub const SEQUENCE: [RoundPhase; 8] = [
        RoundPhase::Ready,
        RoundPhase::Memorize(Round::One),
        RoundPhase::Play(Round::One),
        RoundPhase::Memorize(Round::Two),
        RoundPhase::Play(Round::Two),
        RoundPhase::Test(Round::One),
        RoundPhase::Test(Round::Two),
        RoundPhase::Complete,
    ];

    /// The phase that follows this one, or `None` at `Complete`.
    #[must_use]
    pub const fn next(self) -> Option<RoundPhase> {
        match self {
            RoundPhase::Ready => Some(RoundPhase::Memorize(Round::One)),
            RoundPhase::Memorize(round) => Some(RoundPhase::Play(round)),
            RoundPhase::Play(Round::One) => Some(RoundPhase::Memorize(Round::Two)),
            RoundPhase::Play(Round::Two) => Some(RoundPhase::Test(Round::One)),
            RoundPhase::Test(Round::One) => Some(RoundPhase::Test(Round::Two)),
            RoundPhase::Test(Round::Two) => Some(RoundPhase::Complete),
            RoundPhase::Complete => None,
        }
    }

    #[must_use]
    pub const fn scored(self) -> Option<ScoredPhase> {
        match self {
            RoundPhase::Play(round) => Some(ScoredPhase::Play(round)),
            RoundPhase::Test(round) => Some(ScoredPhase::Test(round)),
            RoundPhase::Ready | RoundPhase::Memorize(_) | RoundPhase::Complete => None,
        }
    }

    #[must_use]
    pub const fn round(self) -> Option<Round> {
        match self {
            RoundPhase::Memorize(round) | RoundPhase::Play(round) | RoundPhase::Test(round) => {
                Some(round)
            }
            RoundPhase::Ready | RoundPhase::Complete => None,
        }
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundPhase::Ready => f.write_str("Ready"),
            RoundPhase::Memorize(round) => write!(f, "Memorize {round}"),
            RoundPhase::Play(round) => write!(f, "Play Round {round}"),
            RoundPhase::Test(round) => write!(f, "Test Round {round}"),
            RoundPhase::Complete => f.write_str("Complete"),
        }
    }
}

/// The four phases that produce a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoredPhase {
    Play(Round),
    Test(Round),
}

impl ScoredPhase {
    /// Fixed reporting order.
    pub const ALL: [ScoredPhase; 4] = [
        ScoredPhase::Play(Round::One),
        ScoredPhase::Play(Round::Two),
        ScoredPhase::Test(Round::One),
        ScoredPhase::Test(Round::Two),
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            ScoredPhase::Play(Round::One) => 0,
            ScoredPhase::Play(Round::Two) => 1,
            ScoredPhase::Test(Round::One) => 2,
            ScoredPhase::Test(Round::Two) => 3,
        }
    }

    /// The round whose solution this phase is scored against.
    #[must_use]
    pub const fn round(self) -> Round {
        match self {
            ScoredPhase::Play(round) | ScoredPhase::Test(round) => round,
        }
    }

    #[must_use]
    pub const fn phase(self) -> RoundPhase {
        match self {
            ScoredPhase::Play(round) => RoundPhase::Play(round),
            ScoredPhase::Test(round) => RoundPhase::Test(round),
        }
    }
}

impl fmt::Display for ScoredPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.phase().fmt(f)
    }
}
