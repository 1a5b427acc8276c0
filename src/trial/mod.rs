//! The per-trial throw engine.
//!
//! A [`TrialEngine`] is a single transition function: every input, timer and
//! animation frame arrives as an [`Event`], and the engine answers with the
//! [`Effect`]s the host must carry out (draw, show status, schedule a timer,
//! request a frame, hand off the result). It never reads a clock itself, so a
//! virtual clock drives it in tests exactly like a real one would.
//!
//! Phases advance strictly in order:
//!
//! ```text
//! Locked -> Armed -> Captured -> Resolved -> Animating -> Settled -> Reported
//!             ^          |
//!             +----------+  (rejected release)
//! ```
//!
//! Once a release is accepted the trial is `finished`: further pointer events
//! are ignored and the trial always runs through to `Reported`.

pub mod config;

pub use self::config::{TrialConfig, TrialKind};

use crate::animation::{Flight, FlightPath};
use crate::geometry::Point;
use crate::gesture::{self, ThrowGesture, ThrowParams};
use crate::resolver;
use crate::result::{TrialOutcome, TrialResult};
use crate::scene::Scene;
use crate::session::{Session, TrialId};
use strum_macros::Display;
use tracing::{debug, info, warn};

pub mod status {
    pub const WAIT: &str = "Wait...";
    pub const GET_READY: &str = "Get ready...";
    pub const READY: &str = "Throw whenever you're ready.";
    pub const GRAB_FIRST: &str = "Grab the dart at the bottom first.";
    pub const DRAG_UP: &str = "Drag upward and release to throw.";
    pub const THROWING: &str = "Throwing...";
    pub const NEXT_TRIAL: &str = "Next trial...";

    pub const GUST_WARNING: &str = "Here comes a gust of wind...";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Locked,
    Armed,
    Captured,
    Resolved,
    Animating,
    Settled,
    Reported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Timer {
    Unlock,
    Feedback,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Start {
        at: f64,
    },
    Press {
        at: f64,
        point: Point,
    },
    Move {
        at: f64,
        point: Point,
    },
    /// `point`, when present, is the final pointer position.
    Release {
        at: f64,
        point: Option<Point>,
    },
    Timer {
        at: f64,
        trial: TrialId,
        timer: Timer,
    },
    Frame {
        at: f64,
    },
}

impl Event {
    pub fn at(&self) -> f64 {
        match *self {
            Self::Start { at }
            | Self::Press { at, .. }
            | Self::Move { at, .. }
            | Self::Release { at, .. }
            | Self::Timer { at, .. }
            | Self::Frame { at } => at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Render(Scene),
    Status(&'static str),
    Feedback(String),
    Schedule {
        trial: TrialId,
        timer: Timer,
        delay_ms: f64,
    },
    RequestFrame,
    ScoreChanged(u32),
    Emit(TrialResult),
}

#[derive(Debug, Clone)]
struct Resolution {
    throw: ThrowParams,
    outcome: TrialOutcome,
}

pub struct TrialEngine {
    id: TrialId,
    config: TrialConfig,
    phase: Phase,
    started: bool,
    finished: bool,
    gesture: Option<ThrowGesture>,
    resolution: Option<Resolution>,
    flight: Option<Flight>,
    score_after: u32,
    rng: fastrand::Rng,
}

impl TrialEngine {
    pub fn new(id: TrialId, config: TrialConfig, rng: fastrand::Rng) -> Self {
        Self {
            id,
            config,
            phase: Phase::Locked,
            started: false,
            finished: false,
            gesture: None,
            resolution: None,
            flight: None,
            score_after: 0,
            rng,
        }
    }

    pub fn id(&self) -> TrialId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn config(&self) -> &TrialConfig {
        &self.config
    }

    pub fn outcome(&self) -> Option<&TrialOutcome> {
        self.resolution.as_ref().map(|r| &r.outcome)
    }

    pub fn throw_params(&self) -> Option<&ThrowParams> {
        self.resolution.as_ref().map(|r| &r.throw)
    }

    pub fn handle(&mut self, session: &mut Session, event: Event) -> Vec<Effect> {
        let mut fx = Vec::new();
        match event {
            Event::Start { .. } => self.on_start(&mut fx),
            Event::Press { at, point } => self.on_press(at, point, &mut fx),
            Event::Move { point, .. } => self.on_move(point, &mut fx),
            Event::Release { at, point } => self.on_release(at, point, &mut fx),
            Event::Timer { trial, timer, .. } => {
                if trial == self.id {
                    self.on_timer(timer, session, &mut fx);
                } else {
                    warn!(
                        "Trial {}: dropping stale {} timer scheduled for {}",
                        self.id, timer, trial
                    );
                }
            }
            Event::Frame { at } => self.on_frame(at, session, &mut fx),
        }
        fx
    }

    fn idle_scene(&self) -> Scene {
        Scene::idle(self.config.arena())
    }

    fn enter(&mut self, next: Phase) {
        debug!("Trial {}: {} -> {}", self.id, self.phase, next);
        self.phase = next;
    }

    fn on_start(&mut self, fx: &mut Vec<Effect>) {
        if self.started {
            return;
        }
        self.started = true;

        if self.config.is_gust() {
            fx.push(Effect::Render(
                self.idle_scene().with_banner(Some(status::GUST_WARNING)),
            ));
            fx.push(Effect::Status(status::WAIT));
        } else {
            fx.push(Effect::Render(self.idle_scene()));
            fx.push(Effect::Status(status::GET_READY));
        }
        fx.push(Effect::Schedule {
            trial: self.id,
            timer: Timer::Unlock,
            delay_ms: self.config.unlock_delay_ms(),
        });
    }

    fn on_timer(&mut self, timer: Timer, session: &mut Session, fx: &mut Vec<Effect>) {
        match (timer, self.phase) {
            (Timer::Unlock, Phase::Locked) if self.started => {
                self.enter(Phase::Armed);
                if self.config.is_gust() {
                    fx.push(Effect::Render(self.idle_scene()));
                }
                fx.push(Effect::Status(status::READY));
            }
            (Timer::Feedback, Phase::Settled) => self.report(session, fx),
            (timer, phase) => {
                debug!("Trial {}: ignoring {} timer in {}", self.id, timer, phase);
            }
        }
    }

    fn on_press(&mut self, at: f64, point: Point, fx: &mut Vec<Effect>) {
        if self.finished {
            return;
        }
        match self.phase {
            Phase::Locked => fx.push(Effect::Status(status::WAIT)),
            Phase::Armed => {
                if !self.config.arena().grab_region.contains(point) {
                    fx.push(Effect::Status(status::GRAB_FIRST));
                    return;
                }
                self.gesture = Some(ThrowGesture::open(point, at));
                self.enter(Phase::Captured);
                fx.push(Effect::Status(status::DRAG_UP));
                fx.push(Effect::Render(self.idle_scene().with_aim(point, point)));
            }
            // A gesture is already open
            _ => {}
        }
    }

    fn on_move(&mut self, point: Point, fx: &mut Vec<Effect>) {
        if self.finished || self.phase != Phase::Captured {
            return;
        }
        if let Some(g) = self.gesture.as_mut() {
            g.drag_to(point);
            let start = g.start;
            fx.push(Effect::Render(self.idle_scene().with_aim(start, point)));
        }
    }

    fn on_release(&mut self, at: f64, point: Option<Point>, fx: &mut Vec<Effect>) {
        if self.finished || self.phase != Phase::Captured {
            return;
        }
        let Some(mut g) = self.gesture.take() else {
            return;
        };
        if let Some(p) = point {
            g.drag_to(p);
        }
        let metrics = g.close(at);

        let parameterized = gesture::parameterize(
            metrics,
            self.config.gesture(),
            &self.config.arena().surface,
            &mut self.rng,
        );
        match parameterized {
            Ok(throw) => self.resolve(throw, at, fx),
            Err(rejection) => {
                debug!(
                    "Trial {}: release rejected ({}), held {:.0}ms, dragged {:.1}px",
                    self.id, rejection, metrics.held_ms, metrics.drag_distance
                );
                self.enter(Phase::Armed);
                fx.push(Effect::Status(rejection.status()));
                fx.push(Effect::Render(self.idle_scene()));
            }
        }
    }

    fn resolve(&mut self, throw: ThrowParams, at: f64, fx: &mut Vec<Effect>) {
        self.finished = true;
        self.enter(Phase::Resolved);

        let landing = resolver::resolve(throw.intended, self.config.forced_zone());
        let score = self.config.scorer().score(landing.landing);
        let outcome = TrialOutcome::new(landing, score);
        debug!(
            "Trial {}: strength {:.2}, intended ({:.1}, {:.1}), landing ({:.1}, {:.1}), forced {}",
            self.id,
            throw.strength,
            outcome.intended.x,
            outcome.intended.y,
            outcome.landing.x,
            outcome.landing.y,
            outcome.forced
        );

        let origin = self.config.arena().dart_start;
        let path = if self.config.is_gust() {
            FlightPath::Gust {
                origin,
                intended: outcome.intended,
                landing: outcome.landing,
            }
        } else {
            FlightPath::Direct {
                origin,
                landing: outcome.landing,
            }
        };
        self.flight = Some(Flight {
            path,
            started_at: at,
            duration_ms: self.config.flight_ms(),
        });
        self.resolution = Some(Resolution { throw, outcome });

        fx.push(Effect::Status(status::THROWING));
        self.enter(Phase::Animating);
        fx.push(Effect::RequestFrame);
    }

    fn on_frame(&mut self, at: f64, session: &mut Session, fx: &mut Vec<Effect>) {
        if self.phase != Phase::Animating {
            return;
        }
        let Some(flight) = self.flight else {
            return;
        };
        let (t, frame) = flight.frame_at(at);
        if t < 1.0 {
            fx.push(Effect::Render(
                self.idle_scene()
                    .with_dart(Some(frame.position))
                    .with_banner(frame.banner),
            ));
            fx.push(Effect::RequestFrame);
        } else {
            self.settle(flight.path.landing(), session, fx);
        }
    }

    fn settle(&mut self, landing: Point, session: &mut Session, fx: &mut Vec<Effect>) {
        let points = self.outcome().map(|o| o.total()).unwrap_or(0);

        fx.push(Effect::Render(
            self.idle_scene().with_dart(None).with_marker(landing),
        ));
        self.score_after = session.add_points(points);
        fx.push(Effect::ScoreChanged(self.score_after));
        // Participant sees the points only, never why
        fx.push(Effect::Feedback(format!("+{}", points)));
        fx.push(Effect::Status(status::NEXT_TRIAL));
        self.enter(Phase::Settled);
        fx.push(Effect::Schedule {
            trial: self.id,
            timer: Timer::Feedback,
            delay_ms: self.config.feedback_ms(),
        });
    }

    fn report(&mut self, session: &mut Session, fx: &mut Vec<Effect>) {
        let Some(resolution) = self.resolution.as_ref() else {
            return;
        };
        let result = TrialResult::assemble(
            session.participant().clone(),
            self.config.is_gust(),
            &resolution.throw,
            &resolution.outcome,
            self.score_after,
        );
        info!(
            "Trial {} reported: +{} (base {}, bonus {}), total {}",
            self.id, result.points_earned, result.base_points, result.bonus_points, result.score_total
        );
        self.enter(Phase::Reported);
        fx.push(Effect::Emit(result));
    }
}
