//! Frame-clocked flight paths.
//!
//! Normal throws follow one parabolic arc from the dart's start to the final
//! landing. Gust throws first arc to the intended point (finishing at 45% of
//! the flight) and then drift with a half-sine veer to the forced landing
//! while the gust banner is up.

use crate::geometry::Point;

pub const ARC_HEIGHT: f64 = 130.0;
pub const GUST_SPLIT: f64 = 0.45;
pub const VEER_HEIGHT: f64 = 35.0;
pub const GUST_BANNER: &str = "Gust of wind...";

pub fn pos_along_arc(start: Point, end: Point, t: f64, height: f64) -> Point {
    let p = start.lerp(end, t);
    Point::new(p.x, p.y - height * 4.0 * t * (1.0 - t))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightPath {
    Direct {
        origin: Point,
        landing: Point,
    },
    Gust {
        origin: Point,
        intended: Point,
        landing: Point,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightFrame {
    pub position: Point,
    pub banner: Option<&'static str>,
}

impl FlightPath {
    pub fn sample(&self, t: f64) -> FlightFrame {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Self::Direct { origin, landing } => FlightFrame {
                position: pos_along_arc(origin, landing, t, ARC_HEIGHT),
                banner: None,
            },
            Self::Gust {
                origin,
                intended,
                landing,
            } => {
                if t < GUST_SPLIT {
                    FlightFrame {
                        position: pos_along_arc(origin, intended, t / GUST_SPLIT, ARC_HEIGHT),
                        banner: None,
                    }
                } else {
                    let t2 = (t - GUST_SPLIT) / (1.0 - GUST_SPLIT);
                    let p = intended.lerp(landing, t2);
                    FlightFrame {
                        position: Point::new(
                            p.x,
                            p.y - VEER_HEIGHT * (std::f64::consts::PI * t2).sin(),
                        ),
                        banner: Some(GUST_BANNER),
                    }
                }
            }
        }
    }

    pub fn landing(&self) -> Point {
        match *self {
            Self::Direct { landing, .. } | Self::Gust { landing, .. } => landing,
        }
    }
}

/// A flight in progress, anchored at the release time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flight {
    pub path: FlightPath,
    pub started_at: f64,
    pub duration_ms: f64,
}

impl Flight {
    pub fn progress(&self, now: f64) -> f64 {
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn frame_at(&self, now: f64) -> (f64, FlightFrame) {
        let t = self.progress(now);
        (t, self.path.sample(t))
    }
}
