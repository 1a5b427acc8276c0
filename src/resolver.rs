use crate::error::{DartError, DgResult};
use crate::geometry::{BonusZone, Point};

/// The zone a gust trial is steered into, looked up once when the trial is
/// configured.
#[derive(Debug, Clone, PartialEq)]
pub struct ForcedZone {
    pub id: String,
    pub center: Point,
}

impl ForcedZone {
    pub fn lookup(zones: &[BonusZone], id: &str) -> DgResult<Self> {
        zones
            .iter()
            .find(|z| z.id == id)
            .map(|z| Self {
                id: z.id.clone(),
                center: z.center,
            })
            .ok_or_else(|| {
                let known: Vec<&str> = zones.iter().map(|z| z.id.as_str()).collect();
                DartError::Config(format!(
                    "forced zone '{}' is not among the configured bonus zones [{}]",
                    id,
                    known.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Landing {
    pub intended: Point,
    pub landing: Point,
    pub forced: bool,
    pub forced_zone: Option<String>,
}

/// Normal trials land where aimed; gust trials land on the forced zone's
/// center no matter the aim.
pub fn resolve(intended: Point, forced: Option<&ForcedZone>) -> Landing {
    match forced {
        Some(zone) => Landing {
            intended,
            landing: zone.center,
            forced: true,
            forced_zone: Some(zone.id.clone()),
        },
        None => Landing {
            intended,
            landing: intended,
            forced: false,
            forced_zone: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::default_bonus_zones;

    #[test]
    fn unknown_zone_fails_fast() {
        let err = ForcedZone::lookup(&default_bonus_zones(), "TL99").unwrap_err();
        assert!(err.to_string().contains("TL99"));
    }

    #[test]
    fn lookup_does_not_fall_back_to_first_zone() {
        assert!(ForcedZone::lookup(&[], "TR50").is_err());
        let zone = ForcedZone::lookup(&default_bonus_zones(), "BR80").unwrap();
        assert_eq!(zone.center, Point::new(620.0, 390.0));
    }
}
