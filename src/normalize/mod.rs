//! Conversion of raw JSON payloads into [`Match`] and [`TeamSeasonStats`].
//!
//! Sources disagree on field naming (`home_team` vs `homeTeam`) and on the
//! wrapping object around the record list. Both are resolved through the
//! ordered tables below; extend them to accept a new spelling.

pub mod coerce;

use serde_json::{Map, Value};
use tracing::debug;

use crate::model::{Match, TeamSeasonStats};

/// Keys that may wrap the match list, tried in order.
pub const MATCH_WRAPPER_KEYS: &[&str] = &["matches"];

/// Keys that may wrap the stats list, tried in order.
pub const STATS_WRAPPER_KEYS: &[&str] = &["team_stats", "stats"];

/// Canonical fields of a [`Match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    HomeTeam,
    AwayTeam,
    HomeGoals,
    AwayGoals,
    Result,
    Season,
}

/// Source spellings accepted for each match field, in priority order.
pub const MATCH_FIELD_ALIASES: &[(MatchField, &[&str])] = &[
    (MatchField::HomeTeam, &["home_team", "homeTeam"]),
    (MatchField::AwayTeam, &["away_team", "awayTeam"]),
    (MatchField::HomeGoals, &["home_goals", "homeGoals"]),
    (MatchField::AwayGoals, &["away_goals", "awayGoals"]),
    (MatchField::Result, &["result"]),
    (MatchField::Season, &["season"]),
];

/// Source spellings for the team of a stats row, in priority order.
pub const STATS_TEAM_ALIASES: &[&str] = &["team", "name"];

/// Stats keys that identify the row rather than measure anything.
pub const STATS_IDENTITY_KEYS: &[&str] = &["team", "season", "name"];

/// Extract the record list from a payload.
///
/// A bare array is taken as-is; an object is searched for the first
/// `wrapper_keys` entry holding an array. Any other shape has no records.
pub fn records<'a>(payload: &'a Value, wrapper_keys: &[&str]) -> &'a [Value] {
    match payload {
        Value::Array(items) => items,
        Value::Object(map) => wrapper_keys
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    }
}

/// Normalize every object record of a match payload.
pub fn normalize_matches(payload: &Value) -> Vec<Match> {
    records(payload, MATCH_WRAPPER_KEYS)
        .iter()
        .filter_map(|record| match record.as_object() {
            Some(fields) => Some(normalize_match(fields)),
            None => {
                debug!(%record, "skipping non-object match record");
                None
            }
        })
        .collect()
}

/// Normalize every object record of a stats payload.
pub fn normalize_team_stats(payload: &Value) -> Vec<TeamSeasonStats> {
    records(payload, STATS_WRAPPER_KEYS)
        .iter()
        .filter_map(|record| match record.as_object() {
            Some(fields) => Some(normalize_stats_row(fields)),
            None => {
                debug!(%record, "skipping non-object stats record");
                None
            }
        })
        .collect()
}

/// Normalize one match record.
///
/// Text fields take the first alias with a non-empty value. Goal fields take
/// the first alias whose key is present, so `"home_goals": null` scores 0
/// even when `homeGoals` is set.
pub fn normalize_match(fields: &Map<String, Value>) -> Match {
    let text = |field| coerce::to_label(match_field(fields, field)).unwrap_or_default();
    let goals = |field| coerce::to_goals(first_key_present(fields, aliases(field)));
    Match {
        home_team: text(MatchField::HomeTeam),
        away_team: text(MatchField::AwayTeam),
        home_goals: goals(MatchField::HomeGoals),
        away_goals: goals(MatchField::AwayGoals),
        result: text(MatchField::Result),
        season: text(MatchField::Season),
    }
}

/// Normalize one stats record; every non-identity key becomes a metric.
pub fn normalize_stats_row(fields: &Map<String, Value>) -> TeamSeasonStats {
    let metrics = fields
        .iter()
        .filter(|(key, _)| !STATS_IDENTITY_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), coerce::to_number(Some(value))))
        .collect();

    TeamSeasonStats {
        team: coerce::to_label(first_present(fields, STATS_TEAM_ALIASES)).unwrap_or_default(),
        season: coerce::to_label(fields.get("season")).unwrap_or_default(),
        metrics,
    }
}

/// Aliases registered for `field`.
pub fn aliases(field: MatchField) -> &'static [&'static str] {
    MATCH_FIELD_ALIASES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, candidates)| *candidates)
        .unwrap_or_default()
}

fn match_field(fields: &Map<String, Value>, field: MatchField) -> Option<&Value> {
    first_present(fields, aliases(field))
}

/// Value of the first candidate key that exists, whatever it holds.
fn first_key_present<'a>(
    fields: &'a Map<String, Value>,
    candidates: &[&str],
) -> Option<&'a Value> {
    candidates.iter().find_map(|key| fields.get(*key))
}

/// First candidate whose value is neither `null` nor an empty string.
fn first_present<'a>(fields: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null() && value.as_str() != Some(""))
}
