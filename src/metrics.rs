//! Metric discovery over stats rows, display labels and catalog ordering.

use std::borrow::Cow;

use itertools::Itertools;
use serde_json::Value;

use crate::collation::Collator;
use crate::model::MetricOption;
use crate::normalize::coerce::is_numeric_like;

/// Keys that never become metrics, whatever their value.
pub const EXCLUDED_METRIC_KEYS: &[&str] = &[
    "team", "season", "name", "club", "id", "logo", "crest", "badge", "team_id", "club_id",
    "squad", "position", "rank",
];

/// Keys listed first in the catalog, in this order.
pub const METRIC_PRIORITY: &[&str] = &[
    "points",
    "wins",
    "draws",
    "losses",
    "goals",
    "goals_for",
    "goalsFor",
    "goals_against",
    "goalsAgainst",
    "goals_conceded",
    "goal_difference",
    "goalDifference",
];

pub const METRIC_LABELS: &[(&str, &str)] = &[
    ("points", "Points"),
    ("wins", "Victoires"),
    ("draws", "Nuls"),
    ("losses", "Défaites"),
    ("goals", "Buts marqués"),
    ("goals_for", "Buts marqués"),
    ("goalsAgainst", "Buts concédés"),
    ("goals_against", "Buts concédés"),
    ("goals_conceded", "Buts concédés"),
    ("goal_difference", "Différence de buts"),
    ("goalDifference", "Différence de buts"),
    ("total_scoring_att", "Tirs"),
    ("ontarget_scoring_att", "Tirs cadrés"),
    ("total_pass", "Passes totales"),
    ("total_tackle", "Tacles"),
    ("clean_sheet", "Clean sheets"),
    ("total_yel_card", "Cartons jaunes"),
    ("total_red_card", "Cartons rouges"),
    ("hit_woodwork", "Poteaux"),
    ("att_hd_goal", "Buts de la tête"),
    ("att_pen_goal", "Buts sur penalty"),
    ("att_freekick_goal", "Buts sur coup franc"),
    ("att_ibox_goal", "Buts dans la surface"),
    ("att_obox_goal", "Buts hors surface"),
    ("goal_fastbreak", "Buts en contre"),
    ("total_offside", "Hors-jeu"),
    ("saves", "Arrêts"),
    ("outfielder_block", "Contres"),
    ("interception", "Interceptions"),
    ("last_man_tackle", "Tacles du dernier défenseur"),
    ("total_clearance", "Dégagements"),
    ("head_clearance", "Dégagements de la tête"),
    ("own_goals", "Buts contre son camp"),
    ("penalty_conceded", "Penalties concédés"),
    ("pen_goals_conceded", "Buts encaissés sur penalty"),
    ("total_through_ball", "Passes en profondeur"),
    ("total_long_balls", "Passes longues"),
    ("backward_pass", "Passes en retrait"),
    ("total_cross", "Centres"),
    ("corner_taken", "Corners"),
    ("touches", "Touches"),
    ("big_chance_missed", "Grosses occasions manquées"),
    ("clearance_off_line", "Sauvetages sur la ligne"),
    ("dispossessed", "Ballons perdus"),
    ("penalty_save", "Penalties arrêtés"),
    ("total_high_claim", "Prises de balle en hauteur"),
    ("punches", "Dégagements au poing"),
];

/// Display label for a metric key.
///
/// Known keys use [`METRIC_LABELS`]; others are humanized.
pub fn metric_label(key: &str) -> Cow<'static, str> {
    if key.is_empty() {
        return Cow::Borrowed("");
    }
    METRIC_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| Cow::Borrowed(*label))
        .unwrap_or_else(|| Cow::Owned(humanize_metric_key(key)))
}

/// Turn `total_long_balls` or `bigChanceMissed` into `Total Long Balls` /
/// `Big Chance Missed`.
pub fn humanize_metric_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;
    for c in key.chars() {
        let c = if c == '_' || c == '-' { ' ' } else { c };
        if prev.is_some_and(|p| p.is_ascii_lowercase()) && c.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
        prev = Some(c);
    }

    let mut out = String::with_capacity(spaced.len());
    let mut at_boundary = true;
    for c in spaced.split_whitespace().join(" ").chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && at_boundary {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = !is_word;
    }
    out
}

/// Every non-excluded key that holds a numeric-like value in at least one
/// raw row. Each key is reported once.
pub fn discover_metric_keys(rows: &[Value]) -> Vec<String> {
    rows.iter()
        .filter_map(Value::as_object)
        .flat_map(|row| {
            row.iter()
                .filter(|(key, value)| {
                    !EXCLUDED_METRIC_KEYS.contains(&key.as_str()) && is_numeric_like(value)
                })
                .map(|(key, _)| key.clone())
        })
        .unique()
        .collect()
}

/// Order metric keys for display: [`METRIC_PRIORITY`] first, then the rest
/// by label under `collator`.
pub fn sort_metric_options(keys: Vec<String>, collator: &Collator) -> Vec<MetricOption> {
    keys.into_iter()
        .map(|key| MetricOption {
            label: metric_label(&key).into_owned(),
            key,
        })
        .sorted_by(|a, b| {
            priority(&a.key)
                .cmp(&priority(&b.key))
                .then_with(|| collator.compare(&a.label, &b.label))
                .then_with(|| a.key.cmp(&b.key))
        })
        .collect()
}

fn priority(key: &str) -> usize {
    METRIC_PRIORITY
        .iter()
        .position(|p| *p == key)
        .unwrap_or(usize::MAX)
}
