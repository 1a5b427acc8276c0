//! Cooperative host loop for one trial.
//!
//! The driver owns the engine, a virtual clock and the pending timers and
//! frame request. Pointer input is injected at the current clock time;
//! `advance_to` fires due timers and frames in time order (a timer wins a tie
//! with a frame). Every effect is applied here and recorded in a
//! [`DriverLog`], and the emitted result is handed straight to the session.

use crate::clock::VirtualClock;
use crate::error::{DartError, DgResult};
use crate::geometry::Point;
use crate::result::TrialResult;
use crate::scene::Scene;
use crate::session::{Session, TrialId};
use crate::trial::{Effect, Event, Phase, Timer, TrialConfig, TrialEngine};

#[derive(Debug, Default, Clone)]
pub struct DriverLog {
    pub statuses: Vec<&'static str>,
    pub scenes: Vec<Scene>,
    pub feedback: Vec<String>,
    pub score_updates: Vec<u32>,
}

impl DriverLog {
    pub fn last_status(&self) -> Option<&'static str> {
        self.statuses.last().copied()
    }

    pub fn last_scene(&self) -> Option<&Scene> {
        self.scenes.last()
    }

    pub fn banners(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.scenes.iter().filter_map(|s| s.banner)
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    due: f64,
    trial: TrialId,
    timer: Timer,
}

pub struct TrialDriver<'s> {
    engine: TrialEngine,
    session: &'s mut Session,
    clock: VirtualClock,
    frame_interval_ms: f64,
    timers: Vec<PendingTimer>,
    frame_due: Option<f64>,
    reported: bool,
    log: DriverLog,
}

impl<'s> TrialDriver<'s> {
    /// Fails unless `frame_interval_ms` is positive and finite; frames at a
    /// zero interval would never let the clock move.
    pub fn new(
        engine: TrialEngine,
        session: &'s mut Session,
        clock: VirtualClock,
        frame_interval_ms: f64,
    ) -> DgResult<Self> {
        if !(frame_interval_ms > 0.0 && frame_interval_ms.is_finite()) {
            return Err(DartError::Config(format!(
                "frame interval must be positive, got {}",
                frame_interval_ms
            )));
        }
        Ok(Self {
            engine,
            session,
            clock,
            frame_interval_ms,
            timers: Vec::new(),
            frame_due: None,
            reported: false,
            log: DriverLog::default(),
        })
    }

    /// Builds the next trial of `session` and starts it at `clock`.
    pub fn launch(
        session: &'s mut Session,
        config: TrialConfig,
        clock: VirtualClock,
        frame_interval_ms: f64,
    ) -> DgResult<Self> {
        let id = session.next_trial_id();
        let rng = session.fork_rng();
        let engine = TrialEngine::new(id, config, rng);
        let mut driver = Self::new(engine, session, clock, frame_interval_ms)?;
        driver.start();
        Ok(driver)
    }

    pub fn start(&mut self) {
        let at = self.clock.now();
        self.dispatch(Event::Start { at });
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn engine(&self) -> &TrialEngine {
        &self.engine
    }

    pub fn log(&self) -> &DriverLog {
        &self.log
    }

    pub fn session(&self) -> &Session {
        &*self.session
    }

    pub fn is_reported(&self) -> bool {
        self.reported
    }

    /// The record this trial handed to the session, once reported.
    pub fn result(&self) -> Option<&TrialResult> {
        if self.reported {
            self.session.results().last()
        } else {
            None
        }
    }

    pub fn press(&mut self, point: Point) {
        let at = self.clock.now();
        self.dispatch(Event::Press { at, point });
    }

    pub fn drag(&mut self, point: Point) {
        let at = self.clock.now();
        self.dispatch(Event::Move { at, point });
    }

    pub fn release(&mut self, point: Option<Point>) {
        let at = self.clock.now();
        self.dispatch(Event::Release { at, point });
    }

    /// Feeds an arbitrary event, e.g. a timer that outlived its trial.
    pub fn inject(&mut self, event: Event) {
        self.clock.advance_to(event.at());
        self.dispatch(event);
    }

    pub fn advance_by(&mut self, ms: f64) {
        let target = self.clock.now() + ms;
        self.advance_to(target);
    }

    pub fn advance_to(&mut self, at: f64) {
        loop {
            let timer_due = self.next_timer().filter(|&(_, due)| due <= at);
            let frame_due = self.frame_due.filter(|&due| due <= at);

            match (timer_due, frame_due) {
                (Some((idx, due)), frame) if frame.map_or(true, |f| due <= f) => {
                    let pending = self.timers.remove(idx);
                    self.clock.advance_to(due);
                    self.dispatch(Event::Timer {
                        at: due,
                        trial: pending.trial,
                        timer: pending.timer,
                    });
                }
                (_, Some(due)) => {
                    self.frame_due = None;
                    self.clock.advance_to(due);
                    self.dispatch(Event::Frame { at: due });
                }
                _ => break,
            }
        }
        self.clock.advance_to(at);
    }

    /// Runs timers and frames until the trial reports or `deadline` passes.
    /// Returns false when the trial is waiting on input or out of time.
    pub fn run_until_reported(&mut self, deadline: f64) -> bool {
        while !self.reported {
            let next = match (self.next_timer().map(|(_, due)| due), self.frame_due) {
                (Some(t), Some(f)) => t.min(f),
                (Some(t), None) => t,
                (None, Some(f)) => f,
                (None, None) => return false,
            };
            if next > deadline {
                self.advance_to(deadline);
                return false;
            }
            self.advance_to(next);
        }
        true
    }

    /// Time at which the earliest pending timer fires.
    pub fn next_timer_due(&self) -> Option<f64> {
        self.next_timer().map(|(_, due)| due)
    }

    fn next_timer(&self) -> Option<(usize, f64)> {
        self.timers
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.due.total_cmp(&b.1.due))
            .map(|(idx, t)| (idx, t.due))
    }

    fn dispatch(&mut self, event: Event) {
        let effects = self.engine.handle(self.session, event);
        let now = self.clock.now();
        for effect in effects {
            match effect {
                Effect::Render(scene) => self.log.scenes.push(scene),
                Effect::Status(status) => self.log.statuses.push(status),
                Effect::Feedback(text) => self.log.feedback.push(text),
                Effect::ScoreChanged(score) => self.log.score_updates.push(score),
                Effect::Schedule {
                    trial,
                    timer,
                    delay_ms,
                } => self.timers.push(PendingTimer {
                    due: now + delay_ms,
                    trial,
                    timer,
                }),
                Effect::RequestFrame => self.frame_due = Some(now + self.frame_interval_ms),
                Effect::Emit(result) => {
                    self.session.record(result);
                    self.reported = true;
                }
            }
        }
    }
}
