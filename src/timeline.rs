use crate::config::{Config, TimingParams};
use crate::error::DgResult;
use crate::geometry::Arena;
use crate::trial::TrialConfig;
use serde::Serialize;
use std::sync::Arc;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Practice,
    Main,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrialPlan {
    pub block: Block,
    /// 1-based position inside the block.
    pub number: usize,
    pub gust: bool,
    pub timing: TimingParams,
}

impl TrialPlan {
    pub fn to_config(&self, arena: &Arc<Arena>, config: &Config) -> DgResult<TrialConfig> {
        if self.gust {
            TrialConfig::gust(
                arena.clone(),
                &self.timing,
                &config.gesture,
                &config.session.forced_zone,
            )
        } else {
            TrialConfig::normal(arena.clone(), &self.timing, &config.gesture)
        }
    }
}

/// Ordered trial plan for a whole session: a practice block without gusts,
/// then a main block where every `gust_every`-th trial is a gust trial with
/// the longer main-block warning and flight.
#[derive(Debug, Clone)]
pub struct Timeline {
    plans: Vec<TrialPlan>,
    iti_ms: f64,
}

impl Timeline {
    pub fn standard(config: &Config) -> Self {
        let s = &config.session;
        let mut plans = Vec::with_capacity(s.practice_trials + s.main_trials);

        for number in 1..=s.practice_trials {
            plans.push(TrialPlan {
                block: Block::Practice,
                number,
                gust: false,
                timing: config.timing.clone(),
            });
        }

        let main_timing = TimingParams {
            gust_warning_ms: s.main_gust_warning_ms,
            gust_flight_ms: s.main_gust_flight_ms,
            ..config.timing.clone()
        };
        for number in 1..=s.main_trials {
            let gust = s.gust_every > 0 && number % s.gust_every == 0;
            plans.push(TrialPlan {
                block: Block::Main,
                number,
                gust,
                timing: main_timing.clone(),
            });
        }

        Self {
            plans,
            iti_ms: config.timing.iti_ms,
        }
    }

    pub fn plans(&self) -> &[TrialPlan] {
        &self.plans
    }

    pub fn iti_ms(&self) -> f64 {
        self.iti_ms
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn gust_count(&self) -> usize {
        self.plans.iter().filter(|p| p.gust).count()
    }
}
