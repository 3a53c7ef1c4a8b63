//! Whole-session behavior through the public controller API.

use std::fs;

use memento_engine::{
    Advanced, FileScoreSink, GameSettings, MemoryScoreSink, ObjectId, Overlay, PersistError, ReleaseOutcome,
    Round, RoundController, RoundError, RoundEvent, RoundPhase, ScoredPhase, SlotDistances, SlotHalf,
};
use tempfile::tempdir;

use crate::common::{
    FailingSink, drag_to, expect_completed, on_top_of, run_out_clock, secs, settings,
    skip_to_play, solve,
};

/// Walk a whole session, solving each scored phase when `solve_phase` says so.
fn play_session(
    controller: &mut RoundController,
    solve_phase: impl Fn(ScoredPhase) -> bool,
) -> Advanced {
    controller.start().unwrap();
    skip_to_play(controller);
    let mut advanced = None;
    for phase in ScoredPhase::ALL {
        assert_eq!(controller.phase(), phase.phase());
        if solve_phase(phase) {
            solve(controller, phase.round());
        }
        run_out_clock(controller);
        assert!(controller.is_awaiting_next());

        let next = controller.next().unwrap();
        if let Advanced::Entered {
            phase: RoundPhase::Memorize(_),
            ..
        } = next
        {
            skip_to_play(controller);
        }
        advanced = Some(next);
    }
    advanced.unwrap()
}

#[test]
fn perfect_session_scores_full_marks_and_persists_once() {
    let sink = MemoryScoreSink::new();
    let mut controller = RoundController::new(&settings(1), Box::new(sink.clone())).unwrap();

    let (sheet, persist_error) = expect_completed(play_session(&mut controller, |_| true));

    assert!(persist_error.is_none());
    assert_eq!(sheet.scores(), [5, 5, 5, 5]);
    assert_eq!(sink.sheets(), vec![sheet]);
    assert_eq!(controller.overlay(), Overlay::GameOver);
}

#[test]
fn idle_session_scores_zero_everywhere() {
    let sink = MemoryScoreSink::new();
    let mut controller = RoundController::new(&settings(2), Box::new(sink.clone())).unwrap();

    let (sheet, _) = expect_completed(play_session(&mut controller, |_| false));
    assert_eq!(sheet.scores(), [0, 0, 0, 0]);
}

#[test]
fn test_rounds_score_against_their_own_round() {
    let mut controller =
        RoundController::new(&settings(3), Box::new(MemoryScoreSink::new())).unwrap();
    let (sheet, _) = expect_completed(play_session(&mut controller, |phase| {
        phase == ScoredPhase::Test(Round::Two)
    }));
    assert_eq!(sheet.scores(), [0, 0, 0, 5]);
}

#[test]
fn phase_sequence_is_strictly_forward() {
    let mut controller =
        RoundController::new(&settings(4), Box::new(MemoryScoreSink::new())).unwrap();
    let mut seen = vec![controller.phase()];
    controller.start().unwrap();
    seen.push(controller.phase());
    while controller.phase() != RoundPhase::Complete {
        for event in controller.advance(secs(10.0)).unwrap() {
            if let RoundEvent::PhaseEntered(phase) = event {
                seen.push(phase);
            }
        }
        match controller.next().unwrap() {
            Advanced::Entered { phase, .. } => seen.push(phase),
            Advanced::Completed { .. } => seen.push(RoundPhase::Complete),
        }
    }
    assert_eq!(seen, RoundPhase::SEQUENCE.to_vec());
}

#[test]
fn solutions_live_in_the_display_half() {
    let mut controller =
        RoundController::new(&settings(5), Box::new(MemoryScoreSink::new())).unwrap();
    controller.start().unwrap();
    let first = controller.solution(Round::One).unwrap().clone();
    assert!(first.placement().within(SlotHalf::Display));
    assert!(controller.solution(Round::Two).is_none());

    controller.advance(secs(10.0)).unwrap();
    controller.next().unwrap();
    let second = controller.solution(Round::Two).unwrap();
    assert!(second.placement().within(SlotHalf::Display));
    // Round 1's answer key is untouched by round 2.
    assert_eq!(controller.solution(Round::One), Some(&first));
}

#[test]
fn scoring_waits_for_an_in_flight_drag() {
    let mut controller =
        RoundController::new(&settings(6), Box::new(MemoryScoreSink::new())).unwrap();
    controller.start().unwrap();
    skip_to_play(&mut controller);

    let object = ObjectId::new(2);
    let target = controller
        .solution(Round::One)
        .unwrap()
        .slot_of(object)
        .unwrap();
    assert!(controller.press(object).unwrap());

    let events = controller.advance(secs(60.0)).unwrap();
    assert_eq!(
        events,
        vec![RoundEvent::ScoringDeferred {
            phase: ScoredPhase::Play(Round::One),
            object,
        }]
    );
    assert!(!controller.is_awaiting_next());
    assert!(matches!(
        controller.next(),
        Err(RoundError::OutOfOrder { .. })
    ));

    let events = controller.release(object, &on_top_of(target)).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[1],
        RoundEvent::Scored {
            phase: ScoredPhase::Play(Round::One),
            score: 1
        }
    );
    assert_eq!(controller.score(ScoredPhase::Play(Round::One)).unwrap(), 1);
}

#[test]
fn deferred_scoring_counts_a_reverted_drag_where_it_started() {
    let mut controller =
        RoundController::new(&settings(7), Box::new(MemoryScoreSink::new())).unwrap();
    controller.start().unwrap();
    skip_to_play(&mut controller);

    let solution = controller.solution(Round::One).unwrap().clone();
    drag_to(
        &mut controller,
        ObjectId::new(0),
        solution.slot_of(ObjectId::new(0)).unwrap(),
    );
    let origin = controller.placement().slot_of(ObjectId::new(1)).unwrap();
    controller.press(ObjectId::new(1)).unwrap();
    run_out_clock(&mut controller);

    let events = controller
        .release(ObjectId::new(1), &SlotDistances::uniform(5.0))
        .unwrap();
    assert_eq!(
        events[0],
        RoundEvent::Released(ReleaseOutcome::Reverted {
            object: ObjectId::new(1),
            slot: origin,
        })
    );
    assert_eq!(controller.score(ScoredPhase::Play(Round::One)).unwrap(), 1);
}

#[test]
fn persistence_failure_still_completes() {
    let mut controller =
        RoundController::new(&settings(8), Box::new(FailingSink::default())).unwrap();
    let (sheet, persist_error) = expect_completed(play_session(&mut controller, |_| true));

    assert!(matches!(persist_error, Some(PersistError::Unavailable(_))));
    assert_eq!(controller.phase(), RoundPhase::Complete);
    assert_eq!(controller.scoreboard().sheet(), Some(sheet));
    assert!(controller.next().is_err());
}

#[test]
fn file_sink_writes_plain_text_scores() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("GameScores.txt");
    let mut controller =
        RoundController::new(&settings(9), Box::new(FileScoreSink::new(&path))).unwrap();

    let (_, persist_error) = expect_completed(play_session(&mut controller, |phase| {
        matches!(phase, ScoredPhase::Play(_))
    }));
    assert!(persist_error.is_none());

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "Play Round 1: 5/5\nPlay Round 2: 5/5\nTest Round 1: 0/5\nTest Round 2: 0/5\n"
    );
}

#[test]
fn overlays_follow_the_round() {
    let mut controller =
        RoundController::new(&settings(10), Box::new(MemoryScoreSink::new())).unwrap();
    assert_eq!(controller.overlay(), Overlay::ReadyDialog);
    controller.start().unwrap();
    assert_eq!(controller.overlay(), Overlay::RoundIntro(Round::One));
    controller.advance(secs(2.0)).unwrap();
    assert_eq!(controller.overlay(), Overlay::ReturnPrompt);
    controller.advance(secs(1.0)).unwrap();
    assert_eq!(controller.overlay(), Overlay::None);
    run_out_clock(&mut controller);
    assert_eq!(
        controller.overlay(),
        Overlay::Result {
            phase: ScoredPhase::Play(Round::One),
            score: Some(0)
        }
    );
    controller.next().unwrap();
    assert_eq!(controller.overlay(), Overlay::RoundIntro(Round::Two));
}

#[test]
fn single_attempt_budget_completes_every_session() {
    for seed in 0..100 {
        let settings = GameSettings::new(2.0, 3.0, 1.0, 0.3, 5, 1)
            .unwrap()
            .with_seed(seed);
        let mut controller =
            RoundController::new(&settings, Box::new(MemoryScoreSink::new())).unwrap();

        let (sheet, _) = expect_completed(play_session(&mut controller, |_| true));
        assert_eq!(sheet.scores(), [5, 5, 5, 5], "seed {seed}");
    }
}

#[test]
fn three_object_session_scores_out_of_three() {
    let settings = GameSettings::new(2.0, 3.0, 1.0, 0.3, 3, 10_000)
        .unwrap()
        .with_seed(11);

    let mut solved = RoundController::new(&settings, Box::new(MemoryScoreSink::new())).unwrap();
    let (sheet, _) = expect_completed(play_session(&mut solved, |_| true));
    assert_eq!(sheet.object_count, 3);
    assert_eq!(sheet.scores(), [3, 3, 3, 3]);

    let mut partial = RoundController::new(&settings, Box::new(MemoryScoreSink::new())).unwrap();
    let (sheet, _) = expect_completed(play_session(&mut partial, |phase| {
        matches!(phase, ScoredPhase::Play(_))
    }));
    assert!(sheet.scores().iter().all(|score| *score <= 3));
    assert_eq!(sheet.scores(), [3, 3, 0, 0]);
}
