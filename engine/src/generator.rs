//! Random arrangements with a distinctness constraint.
//!
//! A generated placement is a uniform bijection of the objects onto slots of
//! one half. When a reference is supplied, candidates are rejection-sampled
//! until no object keeps the equivalence class it had in the reference. If the
//! retry budget runs out, a backtracking search over the last shuffle picks
//! the first valid assignment, so a well-formed reference never fails a round.

use memento_types::{HALF_SIZE, Placement, PlacementError, Slot, SlotHalf};
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("object count must be between 1 and {max} (got {0})", max = HALF_SIZE)]
    InvalidObjectCount(u8),
    #[error("generator retry budget must be at least 1")]
    ZeroRetryBudget,
    #[error("reference holds {actual} objects but the generator places {expected}")]
    ReferenceMismatch { expected: usize, actual: usize },
    #[error("no arrangement of the {half} half avoids every reference class")]
    Unsatisfiable { half: &'static str },
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermutationGenerator {
    object_count: u8,
    retry_budget: u32,
}

impl PermutationGenerator {
    /// Every injective reference of `object_count <= HALF_SIZE` objects admits
    /// at least one distinct arrangement: each object forbids one class and at
    /// most two objects share a class. `generate` therefore only fails on a
    /// reference of the wrong length.
    pub fn new(object_count: u8, retry_budget: u32) -> Result<Self, GeneratorError> {
        if object_count == 0 || usize::from(object_count) > HALF_SIZE {
            return Err(GeneratorError::InvalidObjectCount(object_count));
        }
        if retry_budget == 0 {
            return Err(GeneratorError::ZeroRetryBudget);
        }
        Ok(Self {
            object_count,
            retry_budget,
        })
    }

    #[must_use]
    pub fn object_count(&self) -> u8 {
        self.object_count
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        half: SlotHalf,
        reference: Option<&Placement>,
    ) -> Result<Placement, GeneratorError> {
        let expected = usize::from(self.object_count);
        if let Some(reference) = reference
            && reference.len() != expected
        {
            return Err(GeneratorError::ReferenceMismatch {
                expected,
                actual: reference.len(),
            });
        }

        let mut slots = half.slots();
        for attempt in 1..=self.retry_budget {
            slots.shuffle(rng);
            let candidate = Placement::new(slots[..expected].to_vec())?;
            match reference {
                Some(reference) if !candidate.classes_differ_from(reference) => {
                    debug!(attempt, half = half.as_str(), "Rejected arrangement");
                }
                _ => return Ok(candidate),
            }
        }

        let Some(reference) = reference else {
            return Ok(Placement::new(slots[..expected].to_vec())?);
        };
        let forbidden: Vec<u8> = reference
            .slots()
            .iter()
            .map(|slot| slot.equivalence_class())
            .collect();
        let mut chosen = Vec::with_capacity(expected);
        if !assign_distinct(&slots, &forbidden, &mut chosen) {
            return Err(GeneratorError::Unsatisfiable {
                half: half.as_str(),
            });
        }
        debug!(
            attempts = self.retry_budget,
            half = half.as_str(),
            "Retry budget spent, using searched arrangement"
        );
        Ok(Placement::new(chosen)?)
    }
}

/// Depth-first assignment of one unused slot per object, skipping the
/// object's forbidden class. Candidate order follows `slots`.
fn assign_distinct(slots: &[Slot], forbidden: &[u8], chosen: &mut Vec<Slot>) -> bool {
    let Some(&class) = forbidden.get(chosen.len()) else {
        return true;
    };
    for &slot in slots {
        if slot.equivalence_class() == class || chosen.contains(&slot) {
            continue;
        }
        chosen.push(slot);
        if assign_distinct(slots, forbidden, chosen) {
            return true;
        }
        chosen.pop();
    }
    false
}
