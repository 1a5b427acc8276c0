use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetails {
    // Ring points from the visible target
    pub base: u32,

    // Hidden zone points
    pub bonus: u32,
    pub bonus_zone: Option<String>,

    pub total: u32,
}
