//! Core domain types for Memento.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod ids;
mod phase;
mod placement;
mod score;
mod settings;
mod slot;

pub use ids::ObjectId;
pub use phase::{Round, RoundPhase, ScoredPhase};
pub use placement::{Placement, PlacementError, Solution, SolutionError};
pub use score::{ScoreBoard, ScoreError, ScoreSheet};
pub use settings::{GameSettings, SettingsError};
pub use slot::{HALF_SIZE, SLOT_COUNT, Slot, SlotError, SlotHalf, SlotMap};
