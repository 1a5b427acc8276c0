use crate::error::{DartError, DgResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A point in rendering-surface coordinates (pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn lerp(self, to: Point, t: f64) -> Point {
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// Axis-aligned rectangle, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn clamp(&self, p: Point) -> Point {
        Point {
            x: p.x.clamp(0.0, self.width),
            y: p.y.clamp(0.0, self.height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub radius: f64,
    pub points: u32,
}

/// Concentric scoring rings, smallest radius first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetGeometry {
    pub center: Point,
    pub rings: Vec<Ring>,
}

impl TargetGeometry {
    /// Bullseye 15px/20pts, inner 40px/10pts, outer 70px/5pts, centered
    /// horizontally and lifted 30px above the surface midline.
    pub fn standard(surface: &Surface) -> Self {
        Self {
            center: Point::new(surface.width / 2.0, surface.height / 2.0 - 30.0),
            rings: vec![
                Ring {
                    radius: 15.0,
                    points: 20,
                },
                Ring {
                    radius: 40.0,
                    points: 10,
                },
                Ring {
                    radius: 70.0,
                    points: 5,
                },
            ],
        }
    }

    pub fn outer_radius(&self) -> f64 {
        self.rings.last().map(|r| r.radius).unwrap_or(0.0)
    }

    fn validate(&self) -> DgResult<()> {
        if self.rings.is_empty() {
            return Err(DartError::Config("target needs at least one ring".into()));
        }
        let mut prev = 0.0;
        for ring in &self.rings {
            if !(ring.radius > prev) {
                return Err(DartError::Config(format!(
                    "ring radii must be positive and strictly increasing (got {} after {})",
                    ring.radius, prev
                )));
            }
            prev = ring.radius;
        }
        Ok(())
    }
}

/// Circular scoring region that is never drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusZone {
    pub id: String,
    pub center: Point,
    pub radius: f64,
    pub bonus: u32,
}

impl BonusZone {
    pub fn contains(&self, p: Point) -> bool {
        self.center.distance(p) <= self.radius
    }
}

pub fn default_bonus_zones() -> Vec<BonusZone> {
    vec![
        BonusZone {
            id: "TR50".to_string(),
            center: Point::new(620.0, 70.0),
            radius: 55.0,
            bonus: 50,
        },
        BonusZone {
            id: "BR80".to_string(),
            center: Point::new(620.0, 390.0),
            radius: 60.0,
            bonus: 80,
        },
    ]
}

/// Everything static about the throwing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub surface: Surface,
    pub target: TargetGeometry,
    pub dart_start: Point,
    pub grab_region: Rect,
    pub grab_pad: Rect,
    #[serde(default)]
    pub bonus_zones: Vec<BonusZone>,
}

impl Arena {
    /// 700x450 field with the dart resting 45px above the bottom edge.
    pub fn standard() -> Self {
        let surface = Surface {
            width: 700.0,
            height: 450.0,
        };
        let dart_start = Point::new(surface.width / 2.0, surface.height - 45.0);

        Self {
            target: TargetGeometry::standard(&surface),
            grab_region: Rect {
                min: Point::new(dart_start.x - 60.0, dart_start.y - 25.0),
                max: Point::new(dart_start.x + 60.0, dart_start.y + 55.0),
            },
            grab_pad: Rect {
                min: Point::new(dart_start.x - 70.0, dart_start.y + 18.0),
                max: Point::new(dart_start.x + 70.0, dart_start.y + 40.0),
            },
            dart_start,
            surface,
            bonus_zones: default_bonus_zones(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DgResult<Self> {
        let content = fs::read_to_string(path)?;
        let arena: Arena = serde_json::from_str(&content)?;
        arena.validate()?;
        Ok(arena)
    }

    pub fn validate(&self) -> DgResult<()> {
        if !(self.surface.width > 0.0 && self.surface.height > 0.0) {
            return Err(DartError::Config(format!(
                "surface must have positive size, got {}x{}",
                self.surface.width, self.surface.height
            )));
        }
        self.target.validate()?;
        let top_ring = self.target.rings.iter().map(|r| r.points).max().unwrap_or(0);
        for zone in &self.bonus_zones {
            if !(zone.radius > 0.0) {
                return Err(DartError::Config(format!(
                    "bonus zone '{}' has non-positive radius",
                    zone.id
                )));
            }
            if zone.bonus.checked_add(top_ring).is_none() {
                return Err(DartError::Config(format!(
                    "bonus zone '{}' is worth {} on top of a {}-point ring, which overflows",
                    zone.id, zone.bonus, top_ring
                )));
            }
        }
        if !self.grab_region.contains(self.dart_start) {
            return Err(DartError::Config(
                "grab region must contain the dart start point".into(),
            ));
        }
        Ok(())
    }

    pub fn zone(&self, id: &str) -> Option<&BonusZone> {
        self.bonus_zones.iter().find(|z| z.id == id)
    }
}
