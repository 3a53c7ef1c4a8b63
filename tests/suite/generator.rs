//! Arrangement generation across many seeds.

use std::collections::HashSet;

use memento_engine::{GeneratorError, PermutationGenerator, Placement, SlotHalf};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn reference_scenario_rejects_matching_classes() {
    let solution = Placement::from_indices(&[2, 0, 4, 1, 3]).unwrap();
    let invalid = Placement::from_indices(&[7, 5, 9, 6, 8]).unwrap();
    let valid = Placement::from_indices(&[5, 9, 6, 8, 7]).unwrap();
    assert!(!invalid.classes_differ_from(&solution));
    assert!(valid.classes_differ_from(&solution));
}

#[test]
fn storage_scrambles_never_echo_the_display_answer() {
    let generator = PermutationGenerator::new(5, 10_000).unwrap();
    for seed in 0..500 {
        let mut rng = StdRng::seed_from_u64(seed);
        let display = generator.generate(&mut rng, SlotHalf::Display, None).unwrap();
        let storage = generator
            .generate(&mut rng, SlotHalf::Storage, Some(&display))
            .unwrap();

        assert!(display.within(SlotHalf::Display));
        assert!(storage.within(SlotHalf::Storage));
        for (object, slot) in storage.iter() {
            let shown = display.slot_of(object).unwrap();
            assert_ne!(slot.equivalence_class(), shown.equivalence_class());
        }
    }
}

#[test]
fn every_object_count_is_satisfiable() {
    for count in 1..=5 {
        let generator = PermutationGenerator::new(count, 10_000).unwrap();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let display = generator.generate(&mut rng, SlotHalf::Display, None).unwrap();
            assert_eq!(display.len(), usize::from(count));
            let storage = generator
                .generate(&mut rng, SlotHalf::Storage, Some(&display))
                .unwrap();
            assert!(storage.classes_differ_from(&display));
        }
    }
}

#[test]
fn all_display_permutations_are_reachable() {
    let generator = PermutationGenerator::new(3, 10).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let mut seen = HashSet::new();
    for _ in 0..5_000 {
        let placement = generator.generate(&mut rng, SlotHalf::Display, None).unwrap();
        seen.insert(placement.slots().to_vec());
    }
    // 5 * 4 * 3 ordered choices of three display slots.
    assert_eq!(seen.len(), 60);
}

#[test]
fn invalid_configuration_is_rejected_up_front() {
    assert_eq!(
        PermutationGenerator::new(6, 10),
        Err(GeneratorError::InvalidObjectCount(6))
    );
}
