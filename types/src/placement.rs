//! Object-to-slot arrangements.
//!
//! A [`Placement`] maps every object to a distinct slot. A [`Solution`] is a
//! placement that lies entirely in the display half and serves as the answer
//! key for one round.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::ObjectId;
use crate::slot::{HALF_SIZE, Slot, SlotError, SlotHalf};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("placement must hold at least one object")]
    Empty,
    #[error(transparent)]
    InvalidSlot(#[from] SlotError),
    #[error("placement holds {count} objects, at most {max} fit in one half", max = HALF_SIZE)]
    TooManyObjects { count: usize },
    #[error("objects {first} and {second} both occupy slot {slot}")]
    DuplicateSlot {
        slot: Slot,
        first: ObjectId,
        second: ObjectId,
    },
    #[error("unknown object {object} (placement holds {count} objects)")]
    UnknownObject { object: ObjectId, count: usize },
    #[error("slot {slot} is occupied by object {occupant}")]
    Occupied { slot: Slot, occupant: ObjectId },
    #[error("expected a placement of {expected} objects, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Injective mapping `ObjectId -> Slot`, indexed by object.
///
/// # Invariants
///
/// - Holds between 1 and [`HALF_SIZE`] objects
/// - No two objects share a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Slot>", into = "Vec<Slot>")]
pub struct Placement(Vec<Slot>);

impl Placement {
    pub fn new(slots: Vec<Slot>) -> Result<Self, PlacementError> {
        if slots.is_empty() {
            return Err(PlacementError::Empty);
        }
        if slots.len() > HALF_SIZE {
            return Err(PlacementError::TooManyObjects { count: slots.len() });
        }
        for (i, slot) in slots.iter().enumerate() {
            if let Some(j) = slots[..i].iter().position(|other| other == slot) {
                return Err(PlacementError::DuplicateSlot {
                    slot: *slot,
                    first: ObjectId::new(j as u8),
                    second: ObjectId::new(i as u8),
                });
            }
        }
        Ok(Self(slots))
    }

    /// Build from raw slot indices. Convenience for fixtures and config.
    pub fn from_indices(indices: &[u8]) -> Result<Self, PlacementError> {
        let slots = indices
            .iter()
            .map(|&i| Slot::new(i))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(slots)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn slot_of(&self, object: ObjectId) -> Option<Slot> {
        self.0.get(object.index()).copied()
    }

    #[must_use]
    pub fn object_at(&self, slot: Slot) -> Option<ObjectId> {
        self.0
            .iter()
            .position(|s| *s == slot)
            .map(|i| ObjectId::new(i as u8))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, Slot)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, slot)| (ObjectId::new(i as u8), *slot))
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.0
    }

    /// Move one object, keeping the mapping injective. Moving an object onto
    /// its own slot is a no-op.
    pub fn relocate(&mut self, object: ObjectId, slot: Slot) -> Result<(), PlacementError> {
        let count = self.len();
        if object.index() >= count {
            return Err(PlacementError::UnknownObject { object, count });
        }
        if let Some(occupant) = self.object_at(slot)
            && occupant != object
        {
            return Err(PlacementError::Occupied { slot, occupant });
        }
        self.0[object.index()] = slot;
        Ok(())
    }

    /// True when every object sits in `half`.
    #[must_use]
    pub fn within(&self, half: SlotHalf) -> bool {
        self.0.iter().all(|slot| half.contains(*slot))
    }

    /// Distinctness rule used when scrambling: every object's equivalence class
    /// differs from its class in `reference`. Lengths must match.
    #[must_use]
    pub fn classes_differ_from(&self, reference: &Placement) -> bool {
        self.len() == reference.len()
            && self
                .0
                .iter()
                .zip(reference.0.iter())
                .all(|(a, b)| a.equivalence_class() != b.equivalence_class())
    }
}

impl TryFrom<Vec<Slot>> for Placement {
    type Error = PlacementError;

    fn try_from(value: Vec<Slot>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Placement> for Vec<Slot> {
    fn from(value: Placement) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("solution slot {slot} for object {object} is not a display slot")]
pub struct SolutionError {
    pub object: ObjectId,
    pub slot: Slot,
}

/// The correct display arrangement recorded for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Placement", into = "Placement")]
pub struct Solution(Placement);

impl Solution {
    pub fn new(placement: Placement) -> Result<Self, SolutionError> {
        if let Some((object, slot)) = placement.iter().find(|(_, slot)| !slot.is_display()) {
            return Err(SolutionError { object, slot });
        }
        Ok(Self(placement))
    }

    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.0
    }

    #[must_use]
    pub fn slot_of(&self, object: ObjectId) -> Option<Slot> {
        self.0.slot_of(object)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count objects whose current slot is a display slot equal to their
    /// recorded slot. Exact equality, not equivalence class.
    #[must_use]
    pub fn score(&self, current: &Placement) -> u8 {
        current
            .iter()
            .filter(|(object, slot)| slot.is_display() && self.slot_of(*object) == Some(*slot))
            .count() as u8
    }
}

impl TryFrom<Placement> for Solution {
    type Error = SolutionError;

    fn try_from(value: Placement) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Solution> for Placement {
    fn from(value: Solution) -> Self {
        value.0
    }
}
