//! Gesture capture: press/drag/release to a throw parameterization.
//!
//! A [`ThrowGesture`] is opened on an accepted press, follows drag moves and is
//! consumed on release into [`GestureMetrics`]. Validation happens in a fixed
//! order: hold time and drag length first, then direction, so a throw failing
//! both always reports [`Rejection::TooShort`].

use crate::config::GestureParams;
use crate::geometry::{Point, Surface};
use strum_macros::Display;

pub const STRENGTH_FLOOR: f64 = 0.2;
pub const STRENGTH_CEIL: f64 = 1.0;

/// An open press. Only one may exist per trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowGesture {
    pub start: Point,
    pub last: Point,
    pub pressed_at: f64,
}

impl ThrowGesture {
    pub fn open(point: Point, at: f64) -> Self {
        Self {
            start: point,
            last: point,
            pressed_at: at,
        }
    }

    pub fn drag_to(&mut self, point: Point) {
        self.last = point;
    }

    pub fn close(self, released_at: f64) -> GestureMetrics {
        let dx = self.last.x - self.start.x;
        let dy = self.last.y - self.start.y;
        GestureMetrics {
            start: self.start,
            release: self.last,
            dx,
            dy,
            drag_distance: (dx * dx + dy * dy).sqrt(),
            held_ms: released_at - self.pressed_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureMetrics {
    pub start: Point,
    pub release: Point,
    pub dx: f64,
    pub dy: f64,
    pub drag_distance: f64,
    pub held_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rejection {
    #[strum(serialize = "too_short")]
    TooShort,
    #[strum(serialize = "not_upward")]
    NotUpward,
}

impl Rejection {
    pub fn status(&self) -> &'static str {
        match self {
            Self::TooShort => "Make a longer throw (hold + drag upward).",
            Self::NotUpward => "Try dragging upward to throw.",
        }
    }
}

/// Checks a closed gesture against the throw rules. Non-finite coordinates
/// count as a too-short drag.
pub fn validate(m: &GestureMetrics, rules: &GestureParams) -> Result<(), Rejection> {
    let finite = m.start.is_finite() && m.release.is_finite() && m.held_ms.is_finite();
    if !finite || m.held_ms < rules.min_hold_ms || m.drag_distance < rules.min_drag_px {
        return Err(Rejection::TooShort);
    }
    if m.dy > -rules.min_upward_px {
        return Err(Rejection::NotUpward);
    }
    Ok(())
}

/// More upward drag means a stronger, more accurate throw.
pub fn strength(dy: f64, scale_px: f64) -> f64 {
    (-dy / scale_px).clamp(STRENGTH_FLOOR, STRENGTH_CEIL)
}

/// Release point with symmetric per-axis noise of `(1 - strength) * max_noise`,
/// clamped to the surface before and after.
pub fn intended_landing(
    release: Point,
    strength: f64,
    max_noise_px: f64,
    surface: &Surface,
    rng: &mut fastrand::Rng,
) -> Point {
    let base = surface.clamp(release);
    let noise = (1.0 - strength) * max_noise_px;
    surface.clamp(Point::new(
        base.x + (rng.f64() * 2.0 - 1.0) * noise,
        base.y + (rng.f64() * 2.0 - 1.0) * noise,
    ))
}

/// A release that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowParams {
    pub metrics: GestureMetrics,
    pub strength: f64,
    pub intended: Point,
}

pub fn parameterize(
    metrics: GestureMetrics,
    rules: &GestureParams,
    surface: &Surface,
    rng: &mut fastrand::Rng,
) -> Result<ThrowParams, Rejection> {
    validate(&metrics, rules)?;
    let strength = strength(metrics.dy, rules.strength_scale_px);
    let intended = intended_landing(metrics.release, strength, rules.max_noise_px, surface, rng);
    Ok(ThrowParams {
        metrics,
        strength,
        intended,
    })
}
