use crate::geometry::{Arena, Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingOutline {
    pub center: Point,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Everything a renderer needs for one frame. Built only from the visible
/// parts of the arena; bonus zones never reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub rings: Vec<RingOutline>,
    pub grab_pad: Rect,
    pub aim_line: Option<Segment>,
    pub dart: Option<Point>,
    pub banner: Option<&'static str>,
    pub landing_marker: Option<Point>,
}

impl Scene {
    /// Rings, grab pad and the dart resting at its start point.
    pub fn idle(arena: &Arena) -> Self {
        Self {
            rings: arena
                .target
                .rings
                .iter()
                .rev()
                .map(|r| RingOutline {
                    center: arena.target.center,
                    radius: r.radius,
                })
                .collect(),
            grab_pad: arena.grab_pad,
            aim_line: None,
            dart: Some(arena.dart_start),
            banner: None,
            landing_marker: None,
        }
    }

    pub fn with_banner(mut self, banner: Option<&'static str>) -> Self {
        self.banner = banner;
        self
    }

    pub fn with_aim(mut self, from: Point, to: Point) -> Self {
        self.aim_line = Some(Segment { from, to });
        self
    }

    pub fn with_dart(mut self, dart: Option<Point>) -> Self {
        self.dart = dart;
        self
    }

    pub fn with_marker(mut self, at: Point) -> Self {
        self.landing_marker = Some(at);
        self
    }
}
