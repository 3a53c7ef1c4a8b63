//! Spatial anchors for the reference table arrangement.

use memento_types::{SLOT_COUNT, Slot};

use crate::snap::SlotDistances;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// One anchor per slot, indexed by slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotLayout {
    anchors: [Point; SLOT_COUNT],
}

impl SlotLayout {
    #[must_use]
    pub const fn new(anchors: [Point; SLOT_COUNT]) -> Self {
        Self { anchors }
    }

    /// Display row on top, storage row along the table edge.
    #[must_use]
    pub const fn reference() -> Self {
        Self::new([
            Point::new(0.7, 1.32),
            Point::new(0.0, 1.32),
            Point::new(-0.6, 1.32),
            Point::new(0.5, 0.8),
            Point::new(-0.5, 0.8),
            Point::new(-1.0, 0.1),
            Point::new(-0.5, 0.1),
            Point::new(0.0, 0.1),
            Point::new(0.5, 0.1),
            Point::new(1.0, 0.1),
        ])
    }

    #[must_use]
    pub fn anchor(&self, slot: Slot) -> Point {
        self.anchors[slot.index()]
    }

    #[must_use]
    pub fn distances_from(&self, pointer: Point) -> SlotDistances {
        SlotDistances::new(self.anchors.map(|anchor| anchor.distance(pointer)))
    }
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self::reference()
    }
}
