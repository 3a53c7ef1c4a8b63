//! Round engine for Memento.
//!
//! Arrangement generation, placement tracking, drag resolution and the round
//! state machine. The crate owns no clock and no renderer: drivers call
//! [`RoundController::advance`] once per frame and read back placement and
//! overlay state to draw.

#![allow(clippy::missing_errors_doc)]

mod controller;
mod generator;
mod layout;
mod persistence;
mod placement_state;
mod snap;
mod timer;

pub use controller::{Advanced, Overlay, RoundController, RoundError, RoundEvent};
pub use generator::{GeneratorError, PermutationGenerator};
pub use layout::{Point, SlotLayout};
pub use persistence::{
    FileScoreSink, MemoryScoreSink, PersistError, ScoreSink, render_score_sheet,
};
pub use placement_state::PlacementState;
pub use snap::{DragSnapResolver, ReleaseOutcome, SlotDistances, nearest_free_slot};
pub use timer::PhaseTimer;

pub use memento_types::{
    GameSettings, HALF_SIZE, ObjectId, Placement, PlacementError, Round, RoundPhase, SLOT_COUNT,
    ScoreBoard, ScoreSheet, ScoredPhase, Slot, SlotHalf, Solution,
};
