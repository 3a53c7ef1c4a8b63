//! Scripted stand-in for a human player.
//!
//! Watches the display arrangement while it is shown, recalls each object's
//! slot with a configurable accuracy, then drags objects back one at a time:
//! press, one preview move, release near the recalled anchor on a later frame.

use std::collections::VecDeque;

use memento_engine::{
    HALF_SIZE, ObjectId, Point, Round, RoundController, RoundError, RoundEvent, RoundPhase,
    Slot, SlotHalf, SlotLayout,
};
use anyhow::{Result, bail};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerProfile {
    /// Chance of recalling an object's slot correctly, `0.0..=1.0`.
    pub accuracy: f64,
    /// Max pointer offset from the target anchor on each axis.
    pub jitter: f32,
    /// Frames to wait between drags.
    pub frames_between_drags: u32,
}

impl PlayerProfile {
    /// Reject values the random draws cannot take.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.accuracy) {
            bail!("accuracy must be between 0 and 1 (got {})", self.accuracy);
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            bail!("jitter must be a finite, non-negative distance (got {})", self.jitter);
        }
        Ok(())
    }
}

#[derive(Debug)]
struct HeldDrag {
    object: ObjectId,
    pointer: Point,
}

#[derive(Debug)]
pub struct SimulatedPlayer {
    profile: PlayerProfile,
    rng: StdRng,
    recalled: [Option<Vec<Slot>>; 2],
    phase: RoundPhase,
    queue: VecDeque<ObjectId>,
    held: Option<HeldDrag>,
    cooldown: u32,
}

impl SimulatedPlayer {
    pub fn new(profile: PlayerProfile, seed: u64) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
            recalled: [None, None],
            phase: RoundPhase::Ready,
            queue: VecDeque::new(),
            held: None,
            cooldown: 0,
        })
    }

    /// Slots the player believes each object belongs in for `round`.
    #[must_use]
    pub fn recalled(&self, round: Round) -> Option<&[Slot]> {
        self.recalled[round.index()].as_deref()
    }

    /// Act once for the current frame.
    pub fn on_frame(
        &mut self,
        controller: &mut RoundController,
        layout: &SlotLayout,
    ) -> Result<Vec<RoundEvent>, RoundError> {
        if controller.phase() != self.phase {
            self.phase = controller.phase();
            self.queue = ObjectId::all(controller.placement().len()).collect();
            self.held = None;
            self.cooldown = self.profile.frames_between_drags;
        }

        match self.phase {
            RoundPhase::Memorize(round) => {
                if self.recalled[round.index()].is_none()
                    && controller.placement().within(SlotHalf::Display)
                {
                    self.memorize(round, controller);
                }
                Ok(Vec::new())
            }
            RoundPhase::Play(round) | RoundPhase::Test(round) => {
                self.drag_step(round, controller, layout)
            }
            RoundPhase::Ready | RoundPhase::Complete => Ok(Vec::new()),
        }
    }

    fn memorize(&mut self, round: Round, controller: &RoundController) {
        let shown: Vec<Slot> = controller.placement().slots().to_vec();
        let recalled: Vec<Slot> = shown
            .into_iter()
            .map(|slot| {
                if self.rng.random_bool(self.profile.accuracy) {
                    slot
                } else {
                    SlotHalf::Display.slots()[self.rng.random_range(0..HALF_SIZE)]
                }
            })
            .collect();
        debug!(round = %round, ?recalled, "Player memorized arrangement");
        self.recalled[round.index()] = Some(recalled);
    }

    fn drag_step(
        &mut self,
        round: Round,
        controller: &mut RoundController,
        layout: &SlotLayout,
    ) -> Result<Vec<RoundEvent>, RoundError> {
        if let Some(drag) = self.held.take() {
            let distances = layout.distances_from(drag.pointer);
            return controller.release(drag.object, &distances);
        }
        if controller.remaining_seconds().is_none() {
            return Ok(Vec::new());
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Ok(Vec::new());
        }

        let Some(object) = self.queue.pop_front() else {
            return Ok(Vec::new());
        };
        let Some(target) = self.recalled[round.index()]
            .as_ref()
            .and_then(|slots| slots.get(object.index()).copied())
        else {
            return Ok(Vec::new());
        };

        if controller.press(object)? {
            let pointer = self.aim_at(layout.anchor(target));
            let preview = controller.drag_move(object, &layout.distances_from(pointer));
            debug!(object = %object, target = %target, ?preview, "Player dragging");
            self.held = Some(HeldDrag { object, pointer });
        }
        self.cooldown = self.profile.frames_between_drags;
        Ok(Vec::new())
    }

    fn aim_at(&mut self, anchor: Point) -> Point {
        let jitter = self.profile.jitter;
        if jitter == 0.0 {
            return anchor;
        }
        anchor.offset(
            self.rng.random_range(-jitter..=jitter),
            self.rng.random_range(-jitter..=jitter),
        )
    }
}
