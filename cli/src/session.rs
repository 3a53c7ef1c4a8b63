//! Frame-stepped session driver.

use std::time::Duration;

use memento_engine::{
    Advanced, PersistError, RoundController, RoundError, RoundEvent, RoundPhase, ScoreSheet,
    SlotLayout,
};
use tracing::{debug, info};

use crate::player::SimulatedPlayer;

/// How a finished session ended.
#[derive(Debug)]
pub struct SessionOutcome {
    pub sheet: ScoreSheet,
    pub persist_error: Option<PersistError>,
}

pub struct SessionDriver {
    controller: RoundController,
    player: SimulatedPlayer,
    layout: SlotLayout,
    frame: Duration,
    next_delay: Duration,
    waited: Duration,
    frames: u64,
}

impl SessionDriver {
    #[must_use]
    pub fn new(
        controller: RoundController,
        player: SimulatedPlayer,
        frame: Duration,
        next_delay: Duration,
    ) -> Self {
        Self {
            controller,
            player,
            layout: SlotLayout::reference(),
            frame,
            next_delay,
            waited: Duration::ZERO,
            frames: 0,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &RoundController {
        &self.controller
    }

    /// Run one frame. Returns the outcome once the session completes.
    pub fn step(&mut self) -> Result<Option<SessionOutcome>, RoundError> {
        self.frames += 1;
        if self.controller.phase() == RoundPhase::Ready {
            let events = self.controller.start()?;
            log_events(&events);
        }

        let events = self.controller.advance(self.frame)?;
        log_events(&events);
        let events = self.player.on_frame(&mut self.controller, &self.layout)?;
        log_events(&events);

        if !self.controller.is_awaiting_next() {
            self.waited = Duration::ZERO;
            return Ok(None);
        }
        self.waited += self.frame;
        if self.waited < self.next_delay {
            return Ok(None);
        }
        self.waited = Duration::ZERO;

        match self.controller.next()? {
            Advanced::Entered { events, .. } => {
                log_events(&events);
                Ok(None)
            }
            Advanced::Completed {
                sheet,
                persist_error,
            } => {
                info!(frames = self.frames, "Session finished");
                Ok(Some(SessionOutcome {
                    sheet,
                    persist_error,
                }))
            }
        }
    }
}

fn log_events(events: &[RoundEvent]) {
    for event in events {
        match event {
            RoundEvent::Scored { phase, score } => info!(phase = %phase, score, "Result"),
            other => debug!(event = ?other, "Round event"),
        }
    }
}
