//! Round state machine.
//!
//! Drives a session through the fixed phase sequence. Time moves only through
//! [`RoundController::advance`]; the memorize -> scramble -> play chain runs
//! on its own, while every scored phase waits for [`RoundController::next`].
//!
//! A phase timer that runs out while a drag is held does not score
//! immediately. Scoring is deferred until that drag is released, so the
//! arrangement is never read with an unresolved drag in flight.

use std::fmt;
use std::time::Duration;

use memento_types::{
    GameSettings, ObjectId, Placement, PlacementError, Round, RoundPhase, ScoreBoard, ScoreError,
    ScoreSheet, ScoredPhase, Slot, SlotHalf, Solution, SolutionError,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, info};

use crate::generator::{GeneratorError, PermutationGenerator};
use crate::persistence::{PersistError, ScoreSink};
use crate::placement_state::PlacementState;
use crate::snap::{DragSnapResolver, ReleaseOutcome, SlotDistances};
use crate::timer::PhaseTimer;

#[derive(Debug, Error)]
pub enum RoundError {
    #[error("cannot {action} during {phase}")]
    OutOfOrder {
        action: &'static str,
        phase: RoundPhase,
    },
    #[error("no solution recorded for round {0}")]
    MissingSolution(Round),
    #[error("score sheet incomplete at end of session")]
    IncompleteSheet,
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Solution(#[from] SolutionError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Something the driver may want to log or animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    PhaseEntered(RoundPhase),
    /// The storage arrangement replaced the memorized one.
    Scrambled { round: Round },
    /// The phase timer ran out mid-drag; scoring waits for the release.
    ScoringDeferred { phase: ScoredPhase, object: ObjectId },
    Scored { phase: ScoredPhase, score: u8 },
    Released(ReleaseOutcome),
}

/// What the rendering side should show over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    ReadyDialog,
    RoundIntro(Round),
    ReturnPrompt,
    /// Result dialog. Test phases keep their score hidden.
    Result {
        phase: ScoredPhase,
        score: Option<u8>,
    },
    GameOver,
}

/// Result of a successful [`RoundController::next`].
#[derive(Debug)]
pub enum Advanced {
    Entered {
        phase: RoundPhase,
        events: Vec<RoundEvent>,
    },
    /// The session is over. The sheet was handed to the sink exactly once;
    /// a sink failure is carried here and does not undo completion.
    Completed {
        sheet: ScoreSheet,
        persist_error: Option<PersistError>,
    },
}

#[derive(Debug)]
enum Stage {
    /// `Ready` and `Complete`.
    Idle,
    Showing {
        timer: PhaseTimer,
        intro: PhaseTimer,
        storage: Placement,
    },
    Scrambled(PhaseTimer),
    Running(PhaseTimer),
    ScoringDeferred,
    AwaitingNext {
        score: u8,
    },
}

pub struct RoundController {
    settings: GameSettings,
    generator: PermutationGenerator,
    rng: StdRng,
    phase: RoundPhase,
    stage: Stage,
    placement: PlacementState,
    resolver: DragSnapResolver,
    solutions: [Option<Solution>; 2],
    scores: ScoreBoard,
    sink: Box<dyn ScoreSink>,
}

impl RoundController {
    /// Objects start in storage, in object order, until the first round
    /// deals them out.
    pub fn new(settings: &GameSettings, sink: Box<dyn ScoreSink>) -> Result<Self, RoundError> {
        let generator =
            PermutationGenerator::new(settings.object_count(), settings.retry_budget())?;
        let seed = settings.seed().unwrap_or_else(rand::random);
        info!(seed, objects = settings.object_count(), "Session created");

        let resting = SlotHalf::Storage.slots()[..usize::from(settings.object_count())].to_vec();
        Ok(Self {
            settings: *settings,
            generator,
            rng: StdRng::seed_from_u64(seed),
            phase: RoundPhase::Ready,
            stage: Stage::Idle,
            placement: PlacementState::new(Placement::new(resting)?),
            resolver: DragSnapResolver::new(settings.snap_threshold()),
            solutions: [None, None],
            scores: ScoreBoard::new(settings.object_count()),
            sink,
        })
    }

    pub fn start(&mut self) -> Result<Vec<RoundEvent>, RoundError> {
        if self.phase != RoundPhase::Ready {
            return Err(self.out_of_order("start"));
        }
        let mut events = Vec::new();
        self.enter(RoundPhase::Memorize(Round::One), &mut events)?;
        Ok(events)
    }

    /// Advance phase time by `delta`. Time left over after an automatic
    /// transition flows into the next stage; anything past a point that
    /// waits for the driver is dropped.
    pub fn advance(&mut self, delta: Duration) -> Result<Vec<RoundEvent>, RoundError> {
        let mut events = Vec::new();
        let mut delta = delta;
        loop {
            let leftover = match &mut self.stage {
                Stage::Showing { timer, intro, .. } => {
                    intro.advance(delta);
                    let leftover = timer.advance(delta);
                    if !timer.is_finished() {
                        break;
                    }
                    leftover
                }
                Stage::Scrambled(timer) | Stage::Running(timer) => {
                    let leftover = timer.advance(delta);
                    if !timer.is_finished() {
                        break;
                    }
                    leftover
                }
                Stage::Idle | Stage::ScoringDeferred | Stage::AwaitingNext { .. } => break,
            };
            self.on_timer_elapsed(&mut events)?;
            delta = leftover;
        }
        Ok(events)
    }

    /// Leave a scored phase once its result has been acknowledged.
    pub fn next(&mut self) -> Result<Advanced, RoundError> {
        if !self.is_awaiting_next() {
            return Err(self.out_of_order("move to the next phase"));
        }
        let next = self
            .phase
            .next()
            .ok_or_else(|| self.out_of_order("move to the next phase"))?;

        if next == RoundPhase::Complete {
            return self.complete();
        }
        let mut events = Vec::new();
        self.enter(next, &mut events)?;
        Ok(Advanced::Entered {
            phase: next,
            events,
        })
    }

    /// Pick up `object`. Ignored (returns `false`) outside a running
    /// play or test phase, or while another drag is held.
    pub fn press(&mut self, object: ObjectId) -> Result<bool, RoundError> {
        if !matches!(self.stage, Stage::Running(_)) {
            debug!(object = %object, phase = %self.phase, "Press outside interactive window");
            return Ok(false);
        }
        Ok(self.resolver.press(&mut self.placement, object)?)
    }

    /// Where the held object would land if released now.
    #[must_use]
    pub fn drag_move(&self, object: ObjectId, distances: &SlotDistances) -> Option<Slot> {
        self.resolver.drag_move(&self.placement, object, distances)
    }

    /// Drop `object`. Without a matching press this is a no-op and reports
    /// no events.
    pub fn release(
        &mut self,
        object: ObjectId,
        distances: &SlotDistances,
    ) -> Result<Vec<RoundEvent>, RoundError> {
        if !matches!(self.stage, Stage::Running(_) | Stage::ScoringDeferred) {
            return Ok(Vec::new());
        }
        let outcome = self.resolver.release(&mut self.placement, object, distances)?;
        if outcome == ReleaseOutcome::Ignored {
            return Ok(Vec::new());
        }

        let mut events = vec![RoundEvent::Released(outcome)];
        if matches!(self.stage, Stage::ScoringDeferred) {
            self.score_phase(&mut events)?;
        }
        Ok(events)
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn placement(&self) -> &Placement {
        self.placement.current()
    }

    #[must_use]
    pub fn placement_state(&self) -> &PlacementState {
        &self.placement
    }

    #[must_use]
    pub fn dragging(&self) -> Option<ObjectId> {
        self.resolver.active()
    }

    #[must_use]
    pub fn solution(&self, round: Round) -> Option<&Solution> {
        self.solutions[round.index()].as_ref()
    }

    /// Recorded score for a finished phase. Asking early is an error.
    pub fn score(&self, phase: ScoredPhase) -> Result<u8, RoundError> {
        Ok(self.scores.score(phase)?)
    }

    #[must_use]
    pub fn scoreboard(&self) -> &ScoreBoard {
        &self.scores
    }

    #[must_use]
    pub fn is_awaiting_next(&self) -> bool {
        matches!(self.stage, Stage::AwaitingNext { .. })
    }

    /// Whole seconds left on the visible countdown, if one is running.
    #[must_use]
    pub fn remaining_seconds(&self) -> Option<u64> {
        match &self.stage {
            Stage::Showing { timer, .. } | Stage::Running(timer) => {
                Some(timer.remaining_seconds())
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn overlay(&self) -> Overlay {
        match (&self.stage, self.phase) {
            (_, RoundPhase::Ready) => Overlay::ReadyDialog,
            (_, RoundPhase::Complete) => Overlay::GameOver,
            (Stage::Showing { intro, .. }, RoundPhase::Memorize(round)) if !intro.is_finished() => {
                Overlay::RoundIntro(round)
            }
            (Stage::Scrambled(_), _) => Overlay::ReturnPrompt,
            (Stage::AwaitingNext { score }, phase) => match phase.scored() {
                Some(scored @ ScoredPhase::Play(_)) => Overlay::Result {
                    phase: scored,
                    score: Some(*score),
                },
                Some(scored @ ScoredPhase::Test(_)) => Overlay::Result {
                    phase: scored,
                    score: None,
                },
                None => Overlay::None,
            },
            _ => Overlay::None,
        }
    }

    fn enter(&mut self, phase: RoundPhase, events: &mut Vec<RoundEvent>) -> Result<(), RoundError> {
        match phase {
            RoundPhase::Memorize(round) => {
                let display = self.generator.generate(&mut self.rng, SlotHalf::Display, None)?;
                let storage =
                    self.generator
                        .generate(&mut self.rng, SlotHalf::Storage, Some(&display))?;
                self.placement.apply(&display)?;
                self.solutions[round.index()] = Some(Solution::new(display)?);
                self.stage = Stage::Showing {
                    timer: PhaseTimer::new(self.settings.memorize()),
                    intro: PhaseTimer::new(self.settings.transition_overlay()),
                    storage,
                };
            }
            RoundPhase::Play(_) => {
                self.stage = Stage::Running(PhaseTimer::new(self.settings.play()));
            }
            RoundPhase::Test(round) => {
                let solution = self.solutions[round.index()]
                    .as_ref()
                    .ok_or(RoundError::MissingSolution(round))?;
                let storage = self.generator.generate(
                    &mut self.rng,
                    SlotHalf::Storage,
                    Some(solution.placement()),
                )?;
                self.placement.apply(&storage)?;
                self.stage = Stage::Running(PhaseTimer::new(self.settings.play()));
            }
            RoundPhase::Ready | RoundPhase::Complete => {
                self.stage = Stage::Idle;
            }
        }
        self.phase = phase;
        info!(phase = %phase, "Entered phase");
        events.push(RoundEvent::PhaseEntered(phase));
        Ok(())
    }

    fn on_timer_elapsed(&mut self, events: &mut Vec<RoundEvent>) -> Result<(), RoundError> {
        match &self.stage {
            Stage::Showing { storage, .. } => {
                let storage = storage.clone();
                self.placement.apply(&storage)?;
                self.stage = Stage::Scrambled(PhaseTimer::new(self.settings.transition_overlay()));
                if let Some(round) = self.phase.round() {
                    info!(round = %round, "Arrangement scrambled");
                    events.push(RoundEvent::Scrambled { round });
                }
            }
            Stage::Scrambled(_) => {
                if let RoundPhase::Memorize(round) = self.phase {
                    self.enter(RoundPhase::Play(round), events)?;
                }
            }
            Stage::Running(_) => match (self.resolver.active(), self.phase.scored()) {
                (Some(object), Some(phase)) => {
                    debug!(phase = %phase, object = %object, "Scoring deferred until release");
                    self.stage = Stage::ScoringDeferred;
                    events.push(RoundEvent::ScoringDeferred { phase, object });
                }
                _ => self.score_phase(events)?,
            },
            Stage::Idle | Stage::ScoringDeferred | Stage::AwaitingNext { .. } => {}
        }
        Ok(())
    }

    fn score_phase(&mut self, events: &mut Vec<RoundEvent>) -> Result<(), RoundError> {
        let phase = self
            .phase
            .scored()
            .ok_or_else(|| self.out_of_order("score"))?;
        let solution = self
            .solution(phase.round())
            .ok_or(RoundError::MissingSolution(phase.round()))?;
        let score = solution.score(self.placement.current());
        self.scores.record(phase, score)?;
        self.stage = Stage::AwaitingNext { score };
        info!(phase = %phase, score, of = self.settings.object_count(), "Phase scored");
        events.push(RoundEvent::Scored { phase, score });
        Ok(())
    }

    fn complete(&mut self) -> Result<Advanced, RoundError> {
        let sheet = self.scores.sheet().ok_or(RoundError::IncompleteSheet)?;
        self.phase = RoundPhase::Complete;
        self.stage = Stage::Idle;
        info!(total = sheet.total(), scores = ?sheet.scores(), "Session complete");

        let persist_error = self.sink.persist(&sheet).err();
        Ok(Advanced::Completed {
            sheet,
            persist_error,
        })
    }

    fn out_of_order(&self, action: &'static str) -> RoundError {
        RoundError::OutOfOrder {
            action,
            phase: self.phase,
        }
    }
}

impl fmt::Debug for RoundController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundController")
            .field("phase", &self.phase)
            .field("stage", &self.stage)
            .field("placement", &self.placement)
            .field("scores", &self.scores)
            .finish_non_exhaustive()
    }
}
