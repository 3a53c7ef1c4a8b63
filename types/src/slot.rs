//! Slot catalog.
//!
//! Ten fixed slots, split into a display half (`0..=4`) and a storage half
//! (`5..=9`). Two slots that sit at the same conceptual position in different
//! halves share an equivalence class (`index % 5`).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Total number of addressable slots.
pub const SLOT_COUNT: usize = 10;

/// Number of slots in each half.
pub const HALF_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("slot index {0} is outside 0..{max}", max = SLOT_COUNT)]
pub struct SlotError(pub u8);

/// A validated slot identity in `0..SLOT_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Slot(u8);

impl Slot {
    /// Every slot in ascending index order.
    pub const ALL: [Slot; SLOT_COUNT] = [
        Slot(0),
        Slot(1),
        Slot(2),
        Slot(3),
        Slot(4),
        Slot(5),
        Slot(6),
        Slot(7),
        Slot(8),
        Slot(9),
    ];

    pub fn new(index: u8) -> Result<Self, SlotError> {
        if usize::from(index) < SLOT_COUNT {
            Ok(Self(index))
        } else {
            Err(SlotError(index))
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn half(self) -> SlotHalf {
        if (self.0 as usize) < HALF_SIZE {
            SlotHalf::Display
        } else {
            SlotHalf::Storage
        }
    }

    #[must_use]
    pub const fn is_display(self) -> bool {
        matches!(self.half(), SlotHalf::Display)
    }

    #[must_use]
    pub const fn is_storage(self) -> bool {
        matches!(self.half(), SlotHalf::Storage)
    }

    /// Conceptual position shared by the matching display and storage slots.
    #[must_use]
    pub const fn equivalence_class(self) -> u8 {
        self.0 % HALF_SIZE as u8
    }
}

impl TryFrom<u8> for Slot {
    type Error = SlotError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One half of the slot catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotHalf {
    /// The visible answer area.
    Display,
    /// The scrambled staging area.
    Storage,
}

impl SlotHalf {
    #[must_use]
    pub const fn slots(self) -> [Slot; HALF_SIZE] {
        let base = match self {
            SlotHalf::Display => 0,
            SlotHalf::Storage => HALF_SIZE as u8,
        };
        [
            Slot(base),
            Slot(base + 1),
            Slot(base + 2),
            Slot(base + 3),
            Slot(base + 4),
        ]
    }

    #[must_use]
    pub const fn contains(self, slot: Slot) -> bool {
        matches!(
            (self, slot.half()),
            (SlotHalf::Display, SlotHalf::Display) | (SlotHalf::Storage, SlotHalf::Storage)
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SlotHalf::Display => "display",
            SlotHalf::Storage => "storage",
        }
    }
}

/// Static lookup over the slot catalog.
///
/// Spatial anchors are not part of the catalog; whoever draws the slots owns
/// their coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotMap;

impl SlotMap {
    #[must_use]
    pub const fn slots() -> [Slot; SLOT_COUNT] {
        Slot::ALL
    }

    #[must_use]
    pub const fn half(half: SlotHalf) -> [Slot; HALF_SIZE] {
        half.slots()
    }

    #[must_use]
    pub const fn is_display(slot: Slot) -> bool {
        slot.is_display()
    }

    #[must_use]
    pub const fn is_storage(slot: Slot) -> bool {
        slot.is_storage()
    }

    #[must_use]
    pub const fn equivalence_class(slot: Slot) -> u8 {
        slot.equivalence_class()
    }
}
