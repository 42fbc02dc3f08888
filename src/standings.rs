//! League table derivation.

use std::collections::HashMap;

use crate::collation::Collator;
use crate::config::ModeFiltering;
use crate::model::{Match, StandingsMode, StandingsRow};

/// Build a league table from `matches`.
///
/// Callers pass only the fixtures of one season. Rows are ordered by points,
/// goal difference and goals scored (all descending), then by team name.
/// Teams without a counted fixture do not appear.
pub fn compute_standings<'a>(
    matches: impl IntoIterator<Item = &'a Match>,
    mode: StandingsMode,
    filtering: ModeFiltering,
    collator: &Collator,
) -> Vec<StandingsRow> {
    let (count_home, count_away) = match (filtering, mode) {
        (ModeFiltering::Legacy, _) | (ModeFiltering::Split, StandingsMode::Global) => (true, true),
        (ModeFiltering::Split, StandingsMode::Home) => (true, false),
        (ModeFiltering::Split, StandingsMode::Away) => (false, true),
    };

    let mut table: HashMap<&str, StandingsRow> = HashMap::new();
    for m in matches {
        if count_home {
            table
                .entry(m.home_team.as_str())
                .or_insert_with(|| StandingsRow::new(&m.home_team))
                .record(m.home_goals, m.away_goals);
        }
        if count_away {
            table
                .entry(m.away_team.as_str())
                .or_insert_with(|| StandingsRow::new(&m.away_team))
                .record(m.away_goals, m.home_goals);
        }
    }

    let mut rows: Vec<StandingsRow> = table.into_values().collect();
    sort_standings(&mut rows, collator);
    rows
}

/// Sort rows into table order, as [`compute_standings`] does.
pub fn sort_standings(rows: &mut [StandingsRow], collator: &Collator) {
    rows.sort_by(|a, b| {
        b.pts
            .cmp(&a.pts)
            .then_with(|| b.diff.cmp(&a.diff))
            .then_with(|| b.gf.cmp(&a.gf))
            .then_with(|| collator.compare(&a.team, &b.team))
    });
}
