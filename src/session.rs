use crate::error::{DartError, DgResult};
use crate::leaderboard::Leaderboard;
use crate::result::TrialResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Three-digit participant number, e.g. "007".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Keeps only digits, clamps to 0..=999 and zero-pads to three places.
    /// Anything without digits becomes "000".
    pub fn parse(raw: &str) -> Self {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Self::anonymous();
        }
        // Overflowing digit strings are larger than 999 anyway
        let num = digits.parse::<u64>().unwrap_or(u64::MAX).min(999);
        Self(format!("{:03}", num))
    }

    pub fn anonymous() -> Self {
        Self("000".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monotonic per-session trial identifier. Timer events carry the id they
/// were scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrialId(pub u64);

impl fmt::Display for TrialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Session-wide state shared by consecutive trials: who is throwing, the
/// running score, the leaderboard and the collected results.
#[derive(Debug)]
pub struct Session {
    participant: ParticipantId,
    participant_assigned: bool,
    score: u32,
    leaderboard: Leaderboard,
    results: Vec<TrialResult>,
    next_trial: u64,
    rng: fastrand::Rng,
}

impl Session {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        Self {
            participant: ParticipantId::anonymous(),
            participant_assigned: false,
            score: 0,
            leaderboard: Leaderboard::seeded(),
            results: Vec::new(),
            next_trial: 1,
            rng,
        }
    }

    pub fn with_leaderboard(mut self, leaderboard: Leaderboard) -> Self {
        self.leaderboard = leaderboard;
        self
    }

    /// One-time identity assignment, before any trial has started.
    pub fn assign_participant(&mut self, id: ParticipantId) -> DgResult<()> {
        if self.participant_assigned {
            return Err(DartError::Validation(format!(
                "participant already assigned as {}",
                self.participant
            )));
        }
        if self.next_trial > 1 {
            return Err(DartError::Validation(
                "participant must be assigned before the first trial".into(),
            ));
        }
        info!("Participant {} joined", id);
        self.participant = id;
        self.participant_assigned = true;
        Ok(())
    }

    pub fn participant(&self) -> &ParticipantId {
        &self.participant
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The only place the running score changes. Returns the new total.
    pub fn add_points(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    pub fn next_trial_id(&mut self) -> TrialId {
        let id = TrialId(self.next_trial);
        self.next_trial += 1;
        id
    }

    /// Independent generator for one trial, derived from the session seed.
    pub fn fork_rng(&mut self) -> fastrand::Rng {
        self.rng.fork()
    }

    pub fn record(&mut self, result: TrialResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[TrialResult] {
        &self.results
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn leaderboard_mut(&mut self) -> &mut Leaderboard {
        &mut self.leaderboard
    }

    /// Merges the participant's final score into the leaderboard.
    pub fn finish(&mut self) -> Option<usize> {
        self.leaderboard.update(&self.participant, self.score);
        let rank = self.leaderboard.rank_of(&self.participant);
        info!(
            "Session over for {}: score {} (rank {:?})",
            self.participant, self.score, rank
        );
        rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_ids_are_normalized() {
        assert_eq!(ParticipantId::parse("7").as_str(), "007");
        assert_eq!(ParticipantId::parse(" 0-1-0 ").as_str(), "010");
        assert_eq!(ParticipantId::parse("abc").as_str(), "000");
        assert_eq!(ParticipantId::parse("").as_str(), "000");
        assert_eq!(ParticipantId::parse("1234").as_str(), "999");
        assert_eq!(
            ParticipantId::parse("123456789012345678901234567890").as_str(),
            "999"
        );
    }

    #[test]
    fn participant_can_only_be_assigned_once() {
        let mut session = Session::new(Some(1));
        session.assign_participant(ParticipantId::parse("5")).unwrap();
        assert!(session.assign_participant(ParticipantId::parse("6")).is_err());
        assert_eq!(session.participant().as_str(), "005");
    }

    #[test]
    fn trial_ids_increase() {
        let mut session = Session::new(Some(1));
        let a = session.next_trial_id();
        let b = session.next_trial_id();
        assert!(b > a);
    }
}
