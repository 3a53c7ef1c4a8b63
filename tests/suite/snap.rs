//! Drag resolution against the reference table layout.

use memento_engine::{
    DragSnapResolver, MemoryScoreSink, ObjectId, Placement, PlacementState, ReleaseOutcome, Round,
    RoundController, RoundEvent, Slot, SlotLayout,
};

use crate::common::{settings, skip_to_play};

fn slot(i: u8) -> Slot {
    Slot::new(i).unwrap()
}

#[test]
fn release_close_to_an_empty_slot_moves_the_object() {
    let mut controller =
        RoundController::new(&settings(30), Box::new(MemoryScoreSink::new())).unwrap();
    controller.start().unwrap();
    skip_to_play(&mut controller);

    let layout = SlotLayout::reference();
    let object = ObjectId::new(3);
    let pointer = layout.anchor(slot(1)).offset(0.03, 0.04);

    assert!(controller.press(object).unwrap());
    assert_eq!(
        controller.drag_move(object, &layout.distances_from(pointer)),
        Some(slot(1))
    );
    let events = controller
        .release(object, &layout.distances_from(pointer))
        .unwrap();
    assert!(matches!(
        events.as_slice(),
        [RoundEvent::Released(ReleaseOutcome::Snapped { slot: s, .. })] if *s == slot(1)
    ));
    assert_eq!(controller.placement().slot_of(object), Some(slot(1)));
}

#[test]
fn release_far_from_every_free_slot_leaves_the_object() {
    let mut controller =
        RoundController::new(&settings(31), Box::new(MemoryScoreSink::new())).unwrap();
    controller.start().unwrap();
    skip_to_play(&mut controller);

    let layout = SlotLayout::reference();
    let object = ObjectId::new(3);
    let before = controller.placement().clone();
    // Half a unit above slot 1; every other anchor is farther still.
    let pointer = layout.anchor(slot(1)).offset(0.0, 0.5);

    controller.press(object).unwrap();
    let events = controller
        .release(object, &layout.distances_from(pointer))
        .unwrap();
    assert!(matches!(
        events.as_slice(),
        [RoundEvent::Released(ReleaseOutcome::Reverted { .. })]
    ));
    assert_eq!(controller.placement(), &before);
    assert!(controller.solution(Round::One).is_some());
}

#[test]
fn occupied_nearest_slot_falls_through_to_the_next_free_one() {
    let layout = SlotLayout::reference();
    let mut state = PlacementState::new(Placement::from_indices(&[5, 6, 7]).unwrap());
    let mut resolver = DragSnapResolver::new(0.3);
    let object = ObjectId::new(0);

    // Between slots 6 and 7 (0.5 apart), but both are held by other objects.
    let pointer = layout.anchor(slot(6)).offset(0.25, 0.0);
    resolver.press(&mut state, object).unwrap();
    let outcome = resolver
        .release(&mut state, object, &layout.distances_from(pointer))
        .unwrap();
    assert_eq!(
        outcome,
        ReleaseOutcome::Reverted {
            object,
            slot: slot(5)
        }
    );

    // Slot 8 is free and 0.25 from a pointer between 7 and 8.
    let pointer = layout.anchor(slot(8)).offset(-0.25, 0.0);
    resolver.press(&mut state, object).unwrap();
    let outcome = resolver
        .release(&mut state, object, &layout.distances_from(pointer))
        .unwrap();
    assert_eq!(
        outcome,
        ReleaseOutcome::Snapped {
            object,
            from: slot(5),
            slot: slot(8)
        }
    );
}

#[test]
fn never_two_objects_on_one_slot() {
    let layout = SlotLayout::reference();
    let mut state = PlacementState::new(Placement::from_indices(&[5, 6, 7, 8, 9]).unwrap());
    let mut resolver = DragSnapResolver::new(0.3);

    // Drag everything toward slot 0 in turn; only the first can land there.
    for i in 0..5 {
        let object = ObjectId::new(i);
        resolver.press(&mut state, object).unwrap();
        resolver
            .release(&mut state, object, &layout.distances_from(layout.anchor(slot(0))))
            .unwrap();
        let mut slots = state.snapshot().slots().to_vec();
        slots.sort();
        slots.dedup();
        assert_eq!(slots.len(), 5);
    }
    assert_eq!(state.get(ObjectId::new(0)), Ok(slot(0)));
}
