//! Where every object currently sits.
//!
//! Mutation goes through [`PlacementState::set`] or [`PlacementState::apply`];
//! nothing normalizes positions behind the caller's back. While a drag is in
//! flight the dragged object is recorded so occupancy checks can skip it.

use memento_types::{ObjectId, Placement, PlacementError, Slot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementState {
    current: Placement,
    dragging: Option<ObjectId>,
}

impl PlacementState {
    #[must_use]
    pub fn new(initial: Placement) -> Self {
        Self {
            current: initial,
            dragging: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn get(&self, object: ObjectId) -> Result<Slot, PlacementError> {
        self.current
            .slot_of(object)
            .ok_or(PlacementError::UnknownObject {
                object,
                count: self.current.len(),
            })
    }

    /// Commit `object` to `slot`. Fails if another object holds the slot.
    pub fn set(&mut self, object: ObjectId, slot: Slot) -> Result<(), PlacementError> {
        self.current.relocate(object, slot)
    }

    /// A slot is free when nobody but `excluding` occupies it.
    #[must_use]
    pub fn is_slot_free(&self, slot: Slot, excluding: Option<ObjectId>) -> bool {
        match self.current.object_at(slot) {
            None => true,
            Some(occupant) => Some(occupant) == excluding,
        }
    }

    /// Replace the whole arrangement. The object count must not change.
    pub fn apply(&mut self, placement: &Placement) -> Result<(), PlacementError> {
        if placement.len() != self.current.len() {
            return Err(PlacementError::LengthMismatch {
                expected: self.current.len(),
                actual: placement.len(),
            });
        }
        self.current = placement.clone();
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> Placement {
        self.current.clone()
    }

    #[must_use]
    pub fn current(&self) -> &Placement {
        &self.current
    }

    pub fn begin_drag(&mut self, object: ObjectId) -> Result<(), PlacementError> {
        self.get(object)?;
        self.dragging = Some(object);
        Ok(())
    }

    /// Clear the drag marker, returning the object that was held.
    pub fn end_drag(&mut self) -> Option<ObjectId> {
        self.dragging.take()
    }

    #[must_use]
    pub fn dragging(&self) -> Option<ObjectId> {
        self.dragging
    }
}
