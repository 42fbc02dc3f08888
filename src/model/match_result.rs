use serde::Serialize;

/// A single played fixture, normalized from a raw match record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    /// Outcome code as provided by the source. Never derived from the score.
    pub result: String,
    pub season: String,
}

impl Match {
    /// Whether `team` played in this fixture, home or away.
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    pub fn total_goals(&self) -> u64 {
        u64::from(self.home_goals) + u64::from(self.away_goals)
    }

    pub fn is_draw(&self) -> bool {
        self.home_goals == self.away_goals
    }
}
