use crate::session::ParticipantId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: ParticipantId,
    pub score: u32,
}

/// Fixed-size top-N list, highest score first, one entry per participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    capacity: usize,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// The standing scores participants are shown before their session.
    pub fn seeded() -> Self {
        let mut board = Self::new(DEFAULT_CAPACITY);
        board.entries = [("007", 400), ("010", 370), ("001", 360), ("023", 350), ("019", 340)]
            .into_iter()
            .map(|(id, score)| LeaderboardEntry {
                id: ParticipantId::parse(id),
                score,
            })
            .collect();
        board
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self.entries.truncate(capacity);
        self
    }

    /// Drops any previous entry for `id`, inserts the new score, re-sorts
    /// (stable, so equal scores keep insertion order) and trims to capacity.
    pub fn update(&mut self, id: &ParticipantId, score: u32) {
        self.entries.retain(|e| &e.id != id);
        self.entries.push(LeaderboardEntry {
            id: id.clone(),
            score,
        });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 1-based position of `id`, if it made the board.
    pub fn rank_of(&self, id: &ParticipantId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id).map(|i| i + 1)
    }
}
