use crate::gesture::ThrowParams;
use crate::geometry::Point;
use crate::resolver::Landing;
use crate::scorer::ScoreDetails;
use crate::session::ParticipantId;
use serde::{Deserialize, Serialize};

/// Resolution of a single throw. Points come from `landing`, never from
/// `intended`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    pub intended: Point,
    pub forced: bool,
    pub forced_zone: Option<String>,
    pub landing: Point,
    pub score: ScoreDetails,
}

impl TrialOutcome {
    pub fn new(landing: Landing, score: ScoreDetails) -> Self {
        Self {
            intended: landing.intended,
            forced: landing.forced,
            forced_zone: landing.forced_zone,
            landing: landing.landing,
            score,
        }
    }

    pub fn total(&self) -> u32 {
        self.score.total
    }
}

/// The record handed to the session once a trial is over. Flat so that it
/// serializes straight into one CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub participant_id: ParticipantId,
    pub is_gust_trial: bool,
    pub gust_forced: bool,
    pub gust_target_zone: Option<String>,

    pub start_x: f64,
    pub start_y: f64,
    pub release_x: f64,
    pub release_y: f64,

    pub intended_x: f64,
    pub intended_y: f64,
    pub landing_x: f64,
    pub landing_y: f64,

    pub drag_dist: f64,
    pub held_ms: f64,
    pub strength_est: f64,

    pub base_points: u32,
    pub bonus_points: u32,
    pub bonus_zone_hit: Option<String>,

    pub points_earned: u32,
    pub score_total: u32,
}

impl TrialResult {
    pub fn assemble(
        participant_id: ParticipantId,
        is_gust_trial: bool,
        throw: &ThrowParams,
        outcome: &TrialOutcome,
        score_total: u32,
    ) -> Self {
        let m = &throw.metrics;
        Self {
            participant_id,
            is_gust_trial,
            gust_forced: outcome.forced,
            gust_target_zone: outcome.forced_zone.clone(),
            start_x: m.start.x,
            start_y: m.start.y,
            release_x: m.release.x,
            release_y: m.release.y,
            intended_x: outcome.intended.x,
            intended_y: outcome.intended.y,
            landing_x: outcome.landing.x,
            landing_y: outcome.landing.y,
            drag_dist: m.drag_distance,
            held_ms: m.held_ms,
            strength_est: throw.strength,
            base_points: outcome.score.base,
            bonus_points: outcome.score.bonus,
            bonus_zone_hit: outcome.score.bonus_zone.clone(),
            points_earned: outcome.score.total,
            score_total,
        }
    }

    pub fn landing(&self) -> Point {
        Point::new(self.landing_x, self.landing_y)
    }

    pub fn intended(&self) -> Point {
        Point::new(self.intended_x, self.intended_y)
    }
}
