//! Drag gestures and snap-to-slot resolution.
//!
//! A gesture is press, any number of moves, then release. Only release
//! commits: the held object moves to the nearest free slot within the snap
//! threshold, or stays where it was. Equal distances resolve to the lowest
//! slot index.

use memento_types::{ObjectId, PlacementError, SLOT_COUNT, Slot};
use tracing::debug;

use crate::placement_state::PlacementState;

/// Pointer-to-anchor distance for every slot, indexed by slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotDistances([f32; SLOT_COUNT]);

impl SlotDistances {
    #[must_use]
    pub const fn new(distances: [f32; SLOT_COUNT]) -> Self {
        Self(distances)
    }

    /// Every slot at the same distance.
    #[must_use]
    pub const fn uniform(distance: f32) -> Self {
        Self([distance; SLOT_COUNT])
    }

    /// Overwrite one slot's distance.
    #[must_use]
    pub const fn with(mut self, slot: Slot, distance: f32) -> Self {
        self.0[slot.index()] = distance;
        self
    }

    #[must_use]
    pub fn get(&self, slot: Slot) -> f32 {
        self.0[slot.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The object moved to `slot`.
    Snapped {
        object: ObjectId,
        from: Slot,
        slot: Slot,
    },
    /// Nothing free was close enough; the object stays on its committed slot.
    Reverted { object: ObjectId, slot: Slot },
    /// No matching press; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveDrag {
    object: ObjectId,
    origin: Slot,
}

#[derive(Debug, Clone)]
pub struct DragSnapResolver {
    snap_threshold: f32,
    active: Option<ActiveDrag>,
}

impl DragSnapResolver {
    #[must_use]
    pub fn new(snap_threshold: f32) -> Self {
        Self {
            snap_threshold,
            active: None,
        }
    }

    #[must_use]
    pub fn snap_threshold(&self) -> f32 {
        self.snap_threshold
    }

    #[must_use]
    pub fn active(&self) -> Option<ObjectId> {
        self.active.map(|drag| drag.object)
    }

    /// Start dragging `object`. A second press while a drag is held is
    /// ignored and returns `false`.
    pub fn press(
        &mut self,
        state: &mut PlacementState,
        object: ObjectId,
    ) -> Result<bool, PlacementError> {
        if let Some(active) = self.active {
            debug!(held = %active.object, pressed = %object, "Press ignored, drag in flight");
            return Ok(false);
        }
        let origin = state.get(object)?;
        state.begin_drag(object)?;
        self.active = Some(ActiveDrag { object, origin });
        debug!(object = %object, origin = %origin, "Drag started");
        Ok(true)
    }

    /// Preview the slot a release at these distances would snap to.
    /// Never mutates placement.
    #[must_use]
    pub fn drag_move(
        &self,
        state: &PlacementState,
        object: ObjectId,
        distances: &SlotDistances,
    ) -> Option<Slot> {
        let active = self.active.filter(|drag| drag.object == object)?;
        self.snap_target(state, active.object, distances)
    }

    pub fn release(
        &mut self,
        state: &mut PlacementState,
        object: ObjectId,
        distances: &SlotDistances,
    ) -> Result<ReleaseOutcome, PlacementError> {
        let Some(active) = self.active.filter(|drag| drag.object == object) else {
            debug!(object = %object, "Release without matching press");
            return Ok(ReleaseOutcome::Ignored);
        };
        self.active = None;
        state.end_drag();

        match self.snap_target(state, object, distances) {
            Some(slot) => {
                state.set(object, slot)?;
                debug!(object = %object, from = %active.origin, to = %slot, "Drag committed");
                Ok(ReleaseOutcome::Snapped {
                    object,
                    from: active.origin,
                    slot,
                })
            }
            None => {
                let slot = state.get(object)?;
                debug!(object = %object, slot = %slot, "Drag reverted");
                Ok(ReleaseOutcome::Reverted { object, slot })
            }
        }
    }

    fn snap_target(
        &self,
        state: &PlacementState,
        object: ObjectId,
        distances: &SlotDistances,
    ) -> Option<Slot> {
        nearest_free_slot(state, object, distances)
            .filter(|(_, distance)| *distance <= self.snap_threshold)
            .map(|(slot, _)| slot)
    }
}

/// Closest slot that `object` could occupy. NaN distances never win.
#[must_use]
pub fn nearest_free_slot(
    state: &PlacementState,
    object: ObjectId,
    distances: &SlotDistances,
) -> Option<(Slot, f32)> {
    let mut best: Option<(Slot, f32)> = None;
    for slot in Slot::ALL {
        let distance = distances.get(slot);
        if distance.is_nan() || !state.is_slot_free(slot, Some(object)) {
            continue;
        }
        if best.is_none_or(|(_, closest)| distance < closest) {
            best = Some((slot, distance));
        }
    }
    best
}
