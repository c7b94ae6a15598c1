use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::{debug, info};

use crate::constants::ui::{LOSS_TEXT, WIN_TEXT};
use crate::events::SessionEnded;
use crate::systems::components::DeltaTime;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// The banner shown once the session is over.
    pub const fn message(self) -> &'static str {
        match self {
            Outcome::Win => WIN_TEXT,
            Outcome::Loss => LOSS_TEXT,
        }
    }
}

/// A resource to track the overall stage of the session.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum GameStage {
    /// The session is live: input moves the player and per-frame logic runs.
    #[default]
    Playing,
    /// A terminal state was reached. Nothing in the scene changes afterwards.
    Ended(Outcome),
}

impl GameStage {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStage::Ended(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GameStage::Playing => None,
            GameStage::Ended(outcome) => Some(*outcome),
        }
    }
}

/// Run condition for everything that must stop at game over.
pub fn session_active(stage: Res<GameStage>) -> bool {
    !stage.is_over()
}

/// Moves the session to its terminal state.
///
/// Only the first call per session has any effect; it writes `SessionEnded` and returns true.
pub fn end_session(stage: &mut GameStage, outcome: Outcome, events: &mut EventWriter<SessionEnded>) -> bool {
    if stage.is_over() {
        return false;
    }
    *stage = GameStage::Ended(outcome);
    info!(outcome = ?outcome, message = outcome.message(), "Session ended");
    events.write(SessionEnded(outcome));
    true
}

/// Seconds left on the clock, plus the fraction of a second accumulated towards the next tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    pub remaining: u32,
    accumulated: f32,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            accumulated: 0.0,
        }
    }

    /// Accumulates `seconds` and returns how many whole-second boundaries were crossed.
    pub fn accumulate(&mut self, seconds: f32) -> u32 {
        if !seconds.is_finite() || seconds <= 0.0 {
            return 0;
        }
        self.accumulated += seconds;
        let ticks = self.accumulated.floor();
        self.accumulated -= ticks;
        // `as` saturates at u32::MAX.
        ticks as u32
    }
}

/// Drives the once-per-second clock. Reaching zero ends the session as a loss.
pub fn countdown_system(
    delta_time: Res<DeltaTime>,
    mut countdown: ResMut<Countdown>,
    mut stage: ResMut<GameStage>,
    mut events: EventWriter<SessionEnded>,
) {
    let ticks = countdown.accumulate(delta_time.seconds);
    for _ in 0..ticks {
        if stage.is_over() {
            return;
        }

        countdown.remaining = countdown.remaining.saturating_sub(1);
        debug!(remaining = countdown.remaining, "Countdown tick");

        if countdown.remaining == 0 {
            end_session(&mut stage, Outcome::Loss, &mut events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_accumulates_partial_seconds() {
        let mut countdown = Countdown::new(60);
        assert_eq!(countdown.accumulate(0.5), 0);
        assert_eq!(countdown.accumulate(0.75), 1);
        assert_eq!(countdown.accumulate(2.0), 2);
        assert_eq!(countdown.remaining, 60);
    }

    #[test]
    fn test_countdown_survives_degenerate_frames() {
        let mut countdown = Countdown::new(60);
        assert_eq!(countdown.accumulate(f32::NAN), 0);
        assert_eq!(countdown.accumulate(f32::INFINITY), 0);
        assert_eq!(countdown.accumulate(-3.0), 0);
        assert_eq!(countdown.accumulate(1.0e30), u32::MAX);
        assert_eq!(countdown.accumulate(0.5), 0);
    }

    #[test]
    fn test_stage_outcome() {
        assert_eq!(GameStage::Playing.outcome(), None);
        assert_eq!(GameStage::Ended(Outcome::Win).outcome(), Some(Outcome::Win));
        assert_eq!(Outcome::Loss.message(), "GAME OVER");
    }
}
