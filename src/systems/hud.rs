//! Text shown around the board.

use bevy_ecs::{
    change_detection::DetectChanges,
    resource::Resource,
    system::{Res, ResMut},
};

use crate::constants::ui::{SCORE_PREFIX, TIME_PREFIX};
use crate::systems::{
    components::ScoreResource,
    state::{Countdown, GameStage},
};

/// The current HUD strings, rebuilt only when their source changes.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    /// Absent in sessions without a countdown.
    pub timer: Option<String>,
    pub banner: Option<&'static str>,
}

pub fn score_text(score: u32) -> String {
    format!("{SCORE_PREFIX}{score}")
}

pub fn timer_text(remaining: u32) -> String {
    format!("{TIME_PREFIX}{remaining}")
}

pub fn hud_system(
    score: Res<ScoreResource>,
    countdown: Option<Res<Countdown>>,
    stage: Res<GameStage>,
    mut hud: ResMut<HudText>,
) {
    if score.is_changed() {
        hud.score = score_text(score.0);
    }

    if let Some(countdown) = countdown {
        if countdown.is_changed() || hud.timer.is_none() {
            let text = timer_text(countdown.remaining);
            if hud.timer.as_deref() != Some(text.as_str()) {
                hud.timer = Some(text);
            }
        }
    }

    if stage.is_changed() {
        hud.banner = stage.outcome().map(|outcome| outcome.message());
    }
}
