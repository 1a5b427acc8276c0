//! Synthetic participants for dry runs of the task.
//!
//! A [`SyntheticThrower`] produces plausible pointer gestures (sometimes a
//! fumbled flick, sometimes an impatient press during the lockout) and
//! [`run_session`] pushes one through the standard timeline on a virtual
//! clock. [`run_batch`] repeats that for many independent participants in
//! parallel; each session stays single-threaded.

use crate::clock::VirtualClock;
use crate::config::Config;
use crate::driver::TrialDriver;
use crate::error::{DartError, DgResult};
use crate::geometry::{Arena, Point};
use crate::leaderboard::Leaderboard;
use crate::resolver::ForcedZone;
use crate::session::{ParticipantId, Session};
use crate::timeline::Timeline;
use crate::trial::{Phase, TrialConfig};
use clap::Args;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

const MAX_ATTEMPTS: usize = 6;
const DRAG_STEPS: usize = 4;
// Upper bound for one trial once the release is accepted
const SETTLE_BUDGET_MS: f64 = 60_000.0;

#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct ThrowerProfile {
    /// 0 scatters widely around the bullseye, 1 hits the aim point.
    #[arg(long, default_value_t = 0.7)]
    pub skill: f64,
    /// Chance that an attempt is a short flick that gets rejected.
    #[arg(long, default_value_t = 0.15)]
    pub fumble_rate: f64,
    /// Chance of pressing while input is still locked.
    #[arg(long, default_value_t = 0.1)]
    pub impatience: f64,
    /// Chance of aiming somewhere off-target out of curiosity.
    #[arg(long, default_value_t = 0.1)]
    pub curiosity: f64,
    #[arg(long, default_value_t = 350.0)]
    pub reaction_ms: f64,
}

impl Default for ThrowerProfile {
    fn default() -> Self {
        Self {
            skill: 0.7,
            fumble_rate: 0.15,
            impatience: 0.1,
            curiosity: 0.1,
            reaction_ms: 350.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedThrow {
    pub press: Point,
    pub path: Vec<Point>,
    pub hold_ms: f64,
}

pub struct SyntheticThrower {
    profile: ThrowerProfile,
    rng: fastrand::Rng,
}

impl SyntheticThrower {
    pub fn new(profile: ThrowerProfile, rng: fastrand::Rng) -> Self {
        Self { profile, rng }
    }

    pub fn profile(&self) -> &ThrowerProfile {
        &self.profile
    }

    fn jitter(&mut self, amount: f64) -> f64 {
        (self.rng.f64() * 2.0 - 1.0) * amount
    }

    pub fn wants_early_press(&mut self) -> bool {
        self.rng.f64() < self.profile.impatience
    }

    /// Plans one press-drag-release. With `must_count` set the throw is
    /// never a fumble.
    pub fn plan_throw(&mut self, arena: &Arena, must_count: bool) -> ScriptedThrow {
        let press = Point::new(
            arena.dart_start.x + self.jitter(15.0),
            arena.dart_start.y + self.jitter(10.0),
        );

        if !must_count && self.rng.f64() < self.profile.fumble_rate {
            let flick = Point::new(press.x + self.jitter(10.0), press.y - 15.0);
            return ScriptedThrow {
                press,
                path: vec![flick],
                hold_ms: 80.0 + self.rng.f64() * 100.0,
            };
        }

        let aim = if self.rng.f64() < self.profile.curiosity {
            // Anywhere in the upper half of the field
            Point::new(
                self.rng.f64() * arena.surface.width,
                self.rng.f64() * arena.surface.height * 0.5,
            )
        } else {
            let scatter = (1.0 - self.profile.skill).max(0.0) * 60.0;
            Point::new(
                arena.target.center.x + self.jitter(scatter),
                arena.target.center.y + self.jitter(scatter),
            )
        };

        let path = (1..=DRAG_STEPS)
            .map(|i| press.lerp(aim, i as f64 / DRAG_STEPS as f64))
            .collect();

        ScriptedThrow {
            press,
            path,
            hold_ms: 300.0 + self.rng.f64() * 400.0,
        }
    }
}

/// Plays one trial to completion and returns the clock time it reported at.
/// The result lands in `session`.
pub fn run_trial(
    session: &mut Session,
    config: TrialConfig,
    thrower: &mut SyntheticThrower,
    clock: VirtualClock,
    frame_interval_ms: f64,
) -> DgResult<f64> {
    let arena = config.arena().clone();
    let mut driver = TrialDriver::launch(session, config, clock, frame_interval_ms)?;
    let trial = driver.engine().id();

    if thrower.wants_early_press() {
        driver.advance_by(thrower.profile().reaction_ms.min(100.0));
        driver.press(arena.dart_start);
    }
    while driver.phase() == Phase::Locked {
        match driver.next_timer_due() {
            Some(due) => driver.advance_to(due),
            None => break,
        }
    }

    for attempt in 0..MAX_ATTEMPTS {
        driver.advance_by(thrower.profile().reaction_ms);
        let throw = thrower.plan_throw(&arena, attempt + 1 == MAX_ATTEMPTS);

        driver.press(throw.press);
        let step = throw.hold_ms / throw.path.len().max(1) as f64;
        for &p in &throw.path {
            driver.advance_by(step);
            driver.drag(p);
        }
        driver.release(None);

        if driver.phase() != Phase::Armed {
            break;
        }
        debug!(
            "Trial {}: attempt {} rejected ({:?})",
            trial,
            attempt + 1,
            driver.log().last_status()
        );
    }

    let deadline = driver.now() + SETTLE_BUDGET_MS;
    if !driver.run_until_reported(deadline) {
        return Err(DartError::Validation(format!(
            "trial {} stuck in phase {}",
            trial,
            driver.phase()
        )));
    }
    Ok(driver.now())
}

/// Runs the standard timeline for one participant and merges the final score
/// into the leaderboard.
pub fn run_session(
    config: &Config,
    arena: Arc<Arena>,
    participant: ParticipantId,
    profile: ThrowerProfile,
    seed: Option<u64>,
) -> DgResult<Session> {
    config.validate()?;
    arena.validate()?;
    let board = Leaderboard::seeded().with_capacity(config.session.leaderboard_size);
    let mut session = Session::new(seed).with_leaderboard(board);
    session.assign_participant(participant)?;

    let timeline = Timeline::standard(config);
    if timeline.gust_count() > 0 {
        ForcedZone::lookup(&arena.bonus_zones, &config.session.forced_zone)?;
    }
    let mut thrower = SyntheticThrower::new(profile, session.fork_rng());
    let mut clock = VirtualClock::default();

    for plan in timeline.plans() {
        let trial_config = plan.to_config(&arena, config)?;
        let ended = run_trial(
            &mut session,
            trial_config,
            &mut thrower,
            clock,
            config.timing.frame_interval_ms,
        )?;
        clock = VirtualClock::starting_at(ended + timeline.iti_ms());
    }

    session.finish();
    Ok(session)
}

pub fn run_batch(
    config: &Config,
    arena: Arc<Arena>,
    participants: usize,
    profile: ThrowerProfile,
    seed: Option<u64>,
) -> DgResult<Vec<Session>> {
    (0..participants)
        .into_par_iter()
        .map(|i| {
            let id = ParticipantId::parse(&(i + 1).to_string());
            run_session(config, arena.clone(), id, profile, seed.map(|s| s.wrapping_add(i as u64)))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchStats {
    pub participants: usize,
    pub mean_score: f64,
    pub best_score: u32,
    pub normal_trials: usize,
    pub normal_mean_points: f64,
    pub normal_bonus_rate: f64,
    pub gust_trials: usize,
    pub gust_mean_points: f64,
    pub gust_bonus_rate: f64,
}

pub fn summarize(sessions: &[Session]) -> BatchStats {
    let mut stats = BatchStats {
        participants: sessions.len(),
        ..Default::default()
    };
    if sessions.is_empty() {
        return stats;
    }

    let (mut normal_pts, mut normal_bonus, mut gust_pts, mut gust_bonus) = (0u64, 0usize, 0u64, 0usize);
    let mut total_score = 0u64;

    for session in sessions {
        total_score += session.score() as u64;
        stats.best_score = stats.best_score.max(session.score());
        for r in session.results() {
            if r.is_gust_trial {
                stats.gust_trials += 1;
                gust_pts += r.points_earned as u64;
                gust_bonus += usize::from(r.bonus_points > 0);
            } else {
                stats.normal_trials += 1;
                normal_pts += r.points_earned as u64;
                normal_bonus += usize::from(r.bonus_points > 0);
            }
        }
    }

    let ratio = |num: f64, den: usize| if den > 0 { num / den as f64 } else { 0.0 };
    stats.mean_score = ratio(total_score as f64, sessions.len());
    stats.normal_mean_points = ratio(normal_pts as f64, stats.normal_trials);
    stats.normal_bonus_rate = ratio(normal_bonus as f64, stats.normal_trials);
    stats.gust_mean_points = ratio(gust_pts as f64, stats.gust_trials);
    stats.gust_bonus_rate = ratio(gust_bonus as f64, stats.gust_trials);
    stats
}
