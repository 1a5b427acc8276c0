#![allow(dead_code)]

use dartgust::clock::VirtualClock;
use dartgust::config::{Config, TimingParams};
use dartgust::driver::TrialDriver;
use dartgust::geometry::{Arena, Point};
use dartgust::session::Session;
use dartgust::trial::TrialConfig;
use std::sync::Arc;

pub const DART_START: Point = Point::new(350.0, 405.0);
pub const BULLSEYE: Point = Point::new(350.0, 195.0);
pub const TR50_CENTER: Point = Point::new(620.0, 70.0);
pub const FRAME_MS: f64 = 16.0;

pub fn arena() -> Arc<Arena> {
    Arc::new(Arena::standard())
}

pub fn normal_config() -> TrialConfig {
    let c = Config::default();
    TrialConfig::normal(arena(), &c.timing, &c.gesture).unwrap()
}

/// Gust trial with the main-block warning (4700ms) and flight (3400ms).
pub fn gust_config() -> TrialConfig {
    let c = Config::default();
    let timing = TimingParams {
        gust_warning_ms: c.session.main_gust_warning_ms,
        gust_flight_ms: c.session.main_gust_flight_ms,
        ..c.timing.clone()
    };
    TrialConfig::gust(arena(), &timing, &c.gesture, "TR50").unwrap()
}

pub fn launch(session: &mut Session, config: TrialConfig) -> TrialDriver<'_> {
    TrialDriver::launch(session, config, VirtualClock::default(), FRAME_MS).unwrap()
}

/// Waits out the lockout, then presses at `from`, holds for `hold_ms`
/// while dragging to `to`, and releases.
pub fn throw(driver: &mut TrialDriver<'_>, from: Point, to: Point, hold_ms: f64) {
    if let Some(due) = driver.next_timer_due() {
        driver.advance_to(due);
    }
    driver.press(from);
    driver.advance_by(hold_ms);
    driver.drag(to);
    driver.release(None);
}
