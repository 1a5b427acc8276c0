use crate::config::{GestureParams, TimingParams};
use crate::error::{DartError, DgResult};
use crate::geometry::Arena;
use crate::resolver::ForcedZone;
use crate::scorer::Scorer;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum TrialKind {
    Normal,
    Gust {
        warning_ms: f64,
        forced_zone: ForcedZone,
    },
}

/// Immutable per-trial input. Construction validates durations and resolves
/// the forced zone, so an engine never sees a half-valid config.
#[derive(Debug, Clone)]
pub struct TrialConfig {
    kind: TrialKind,
    lockout_ms: f64,
    base_flight_ms: f64,
    gust_flight_ms: f64,
    feedback_ms: f64,
    gesture: GestureParams,
    arena: Arc<Arena>,
    scorer: Scorer,
}

impl TrialConfig {
    pub fn normal(
        arena: Arc<Arena>,
        timing: &TimingParams,
        gesture: &GestureParams,
    ) -> DgResult<Self> {
        Self::build(TrialKind::Normal, arena, timing, gesture)
    }

    pub fn gust(
        arena: Arc<Arena>,
        timing: &TimingParams,
        gesture: &GestureParams,
        forced_zone_id: &str,
    ) -> DgResult<Self> {
        let forced_zone = ForcedZone::lookup(&arena.bonus_zones, forced_zone_id)?;
        let kind = TrialKind::Gust {
            warning_ms: timing.gust_warning_ms,
            forced_zone,
        };
        Self::build(kind, arena, timing, gesture)
    }

    fn build(
        kind: TrialKind,
        arena: Arc<Arena>,
        timing: &TimingParams,
        gesture: &GestureParams,
    ) -> DgResult<Self> {
        if !(timing.base_flight_ms > 0.0 && timing.gust_flight_ms > 0.0) {
            return Err(DartError::Config(format!(
                "flight durations must be positive (base {}, gust {})",
                timing.base_flight_ms, timing.gust_flight_ms
            )));
        }
        let waits = [timing.lockout_ms, timing.gust_warning_ms, timing.feedback_ms];
        if waits.iter().any(|w| !(*w >= 0.0)) {
            return Err(DartError::Config(
                "lockout, warning and feedback delays must be non-negative".into(),
            ));
        }
        if !(gesture.strength_scale_px > 0.0) {
            return Err(DartError::Config("strength_scale_px must be positive".into()));
        }

        Ok(Self {
            kind,
            lockout_ms: timing.lockout_ms,
            base_flight_ms: timing.base_flight_ms,
            gust_flight_ms: timing.gust_flight_ms,
            feedback_ms: timing.feedback_ms,
            gesture: gesture.clone(),
            scorer: Scorer::from_arena(&arena),
            arena,
        })
    }

    pub fn kind(&self) -> &TrialKind {
        &self.kind
    }

    pub fn is_gust(&self) -> bool {
        matches!(self.kind, TrialKind::Gust { .. })
    }

    pub fn forced_zone(&self) -> Option<&ForcedZone> {
        match &self.kind {
            TrialKind::Gust { forced_zone, .. } => Some(forced_zone),
            TrialKind::Normal => None,
        }
    }

    /// How long input stays locked after the trial starts.
    pub fn unlock_delay_ms(&self) -> f64 {
        match self.kind {
            TrialKind::Gust { warning_ms, .. } => warning_ms,
            TrialKind::Normal => self.lockout_ms,
        }
    }

    pub fn flight_ms(&self) -> f64 {
        if self.is_gust() {
            self.gust_flight_ms
        } else {
            self.base_flight_ms
        }
    }

    pub fn feedback_ms(&self) -> f64 {
        self.feedback_ms
    }

    pub fn gesture(&self) -> &GestureParams {
        &self.gesture
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }
}
