pub mod types;

pub use self::types::ScoreDetails;
use crate::geometry::{Arena, BonusZone, Point, TargetGeometry};

/// Pure point-to-score lookup over the target rings and hidden bonus zones.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub target: TargetGeometry,
    pub zones: Vec<BonusZone>,
}

impl Scorer {
    pub fn new(target: TargetGeometry, zones: Vec<BonusZone>) -> Self {
        Self { target, zones }
    }

    pub fn from_arena(arena: &Arena) -> Self {
        Self::new(arena.target.clone(), arena.bonus_zones.clone())
    }

    /// Value of the innermost ring containing `p`; ties on the boundary go
    /// to the smaller ring.
    pub fn ring_score(&self, p: Point) -> u32 {
        ring_score(&self.target, p)
    }

    /// First zone in declaration order that contains `p`.
    pub fn bonus_hit(&self, p: Point) -> Option<&BonusZone> {
        bonus_hit(&self.zones, p)
    }

    pub fn score(&self, p: Point) -> ScoreDetails {
        score(&self.target, &self.zones, p)
    }
}

pub fn ring_score(target: &TargetGeometry, p: Point) -> u32 {
    let dist = target.center.distance(p);
    target
        .rings
        .iter()
        .find(|ring| dist <= ring.radius)
        .map(|ring| ring.points)
        .unwrap_or(0)
}

pub fn bonus_hit(zones: &[BonusZone], p: Point) -> Option<&BonusZone> {
    zones.iter().find(|z| z.contains(p))
}

pub fn score(target: &TargetGeometry, zones: &[BonusZone], p: Point) -> ScoreDetails {
    let base = ring_score(target, p);
    let hit = bonus_hit(zones, p);
    let bonus = hit.map(|z| z.bonus).unwrap_or(0);

    ScoreDetails {
        base,
        bonus,
        bonus_zone: hit.map(|z| z.id.clone()),
        total: base.saturating_add(bonus),
    }
}
