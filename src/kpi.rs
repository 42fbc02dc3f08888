//! Headline figures shown on the dashboard cards.

use serde::Serialize;

use crate::repository::StatsRepository;

/// Narrow no-break space, the French thousands separator.
const GROUP_SEPARATOR: char = '\u{202F}';

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_matches: usize,
    pub total_goals: u64,
    pub total_teams: usize,
    pub total_seasons: usize,
    /// Zero when there are no matches.
    pub goals_per_match: f64,
}

impl Kpis {
    pub fn from_repository(repo: &StatsRepository) -> Self {
        let total_matches = repo.total_matches();
        let total_goals = repo.total_goals();
        let goals_per_match = if total_matches == 0 {
            0.0
        } else {
            total_goals as f64 / total_matches as f64
        };
        Self {
            total_matches,
            total_goals,
            total_teams: repo.total_teams(),
            total_seasons: repo.total_seasons(),
            goals_per_match,
        }
    }
}

/// Format an integer with French digit grouping: `12345` → `12 345`.
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1\u{202F}000");
        assert_eq!(format_number(1234567), "1\u{202F}234\u{202F}567");
        assert_eq!(format_number(-45210), "-45\u{202F}210");
    }

    #[test]
    fn test_kpis() {
        let mut repo = StatsRepository::new();
        assert_eq!(repo.kpis().goals_per_match, 0.0);

        repo.ingest(
            &json!([
                { "home_team": "A", "away_team": "B", "home_goals": 3, "away_goals": 1, "season": "2020" },
                { "home_team": "B", "away_team": "C", "home_goals": 0, "away_goals": 0, "season": "2021" }
            ]),
            &json!([]),
        );
        let kpis = repo.kpis();
        assert_eq!(kpis.total_matches, 2);
        assert_eq!(kpis.total_goals, 4);
        assert_eq!(kpis.total_teams, 3);
        assert_eq!(kpis.total_seasons, 2);
        assert_eq!(kpis.goals_per_match, 2.0);
    }
}
