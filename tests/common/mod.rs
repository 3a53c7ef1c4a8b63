//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use memento_engine::{
    Advanced, GameSettings, ObjectId, PersistError, Round, RoundController, ScoreSheet, ScoreSink,
    Slot, SlotDistances, SlotLayout,
};

/// Short phases so whole sessions run in a handful of steps.
pub fn settings(seed: u64) -> GameSettings {
    GameSettings::new(2.0, 3.0, 1.0, 0.3, 5, 10_000)
        .unwrap()
        .with_seed(seed)
}

pub fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

/// Sink that always fails, for exercising the persistence error path.
#[derive(Debug, Default)]
pub struct FailingSink {
    pub attempts: usize,
}

impl ScoreSink for FailingSink {
    fn persist(&mut self, _sheet: &ScoreSheet) -> Result<(), PersistError> {
        self.attempts += 1;
        Err(PersistError::Unavailable("disk unplugged".to_string()))
    }
}

/// Run the memorize and scramble hold so the next phase is interactive.
pub fn skip_to_play(controller: &mut RoundController) {
    let settings = *controller.settings();
    controller
        .advance(settings.memorize() + settings.transition_overlay())
        .unwrap();
}

/// Run out the current countdown.
pub fn run_out_clock(controller: &mut RoundController) {
    let play = controller.settings().play();
    controller.advance(play).unwrap();
}

/// Press `object` and release it right on top of `slot`'s reference anchor.
pub fn drag_to(controller: &mut RoundController, object: ObjectId, slot: Slot) {
    let layout = SlotLayout::reference();
    assert!(controller.press(object).unwrap());
    controller
        .release(object, &layout.distances_from(layout.anchor(slot)))
        .unwrap();
}

/// Drag every object onto its recorded display slot for `round`.
pub fn solve(controller: &mut RoundController, round: Round) {
    let solution = controller.solution(round).unwrap().clone();
    for (object, slot) in solution.placement().iter() {
        drag_to(controller, object, slot);
    }
}

pub fn on_top_of(slot: Slot) -> SlotDistances {
    SlotDistances::uniform(10.0).with(slot, 0.0)
}

/// Unwrap the completion outcome of `next`.
pub fn expect_completed(advanced: Advanced) -> (ScoreSheet, Option<PersistError>) {
    match advanced {
        Advanced::Completed {
            sheet,
            persist_error,
        } => (sheet, persist_error),
        Advanced::Entered { phase, .. } => panic!("expected completion, entered {phase}"),
    }
}
