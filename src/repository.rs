use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::collation::Collator;
use crate::config::{DataLocations, RepositoryConfig};
use crate::error::{Result, StatsError};
use crate::kpi::Kpis;
use crate::metrics;
use crate::model::{Match, MetricOption, StandingsMode, StandingsRow, TeamSeasonStats};
use crate::normalize::{self, STATS_WRAPPER_KEYS};
use crate::source::{self, DataSource};
use crate::standings;

/// Counts reported after a successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub matches: usize,
    pub team_stats: usize,
    pub seasons: usize,
    pub teams: usize,
    pub metrics: usize,
}

/// Everything derived from one pair of payloads.
#[derive(Debug, Clone, Default)]
struct Snapshot {
    matches: Vec<Match>,
    team_stats: Vec<TeamSeasonStats>,
    seasons: BTreeSet<String>,
    teams: BTreeSet<String>,
    metric_options: Vec<MetricOption>,
}

impl Snapshot {
    fn build(raw_matches: &Value, raw_stats: &Value, collator: &Collator) -> Self {
        let matches = normalize::normalize_matches(raw_matches);
        let team_stats = normalize::normalize_team_stats(raw_stats);

        let mut seasons = BTreeSet::new();
        let mut teams = BTreeSet::new();
        for m in &matches {
            seasons.insert(m.season.clone());
            teams.insert(m.home_team.clone());
            teams.insert(m.away_team.clone());
        }
        for row in &team_stats {
            seasons.insert(row.season.clone());
            teams.insert(row.team.clone());
        }
        // unnamed teams and unlabeled seasons are not indexed
        seasons.remove("");
        teams.remove("");

        let raw_rows = normalize::records(raw_stats, STATS_WRAPPER_KEYS);
        let metric_options =
            metrics::sort_metric_options(metrics::discover_metric_keys(raw_rows), collator);

        Self {
            matches,
            team_stats,
            seasons,
            teams,
            metric_options,
        }
    }

    fn summary(&self) -> LoadSummary {
        LoadSummary {
            matches: self.matches.len(),
            team_stats: self.team_stats.len(),
            seasons: self.seasons.len(),
            teams: self.teams.len(),
            metrics: self.metric_options.len(),
        }
    }
}

/// In-memory store of normalized matches and team statistics.
///
/// A repository starts empty. [`load`](Self::load) or
/// [`ingest`](Self::ingest) replace its whole content; queries are pure
/// reads and return empty results until data is present.
///
/// # Examples
///
/// ```
/// use footstats::{StandingsMode, StatsRepository};
/// use serde_json::json;
///
/// let mut repo = StatsRepository::new();
/// repo.ingest(
///     &json!([{ "home_team": "A", "away_team": "B", "home_goals": 2, "away_goals": 1, "season": "2020" }]),
///     &json!([]),
/// );
/// let table = repo.standings("2020", StandingsMode::Global);
/// assert_eq!(table[0].team, "A");
/// assert_eq!(table[0].pts, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatsRepository {
    config: RepositoryConfig,
    collator: Collator,
    data: Snapshot,
    loaded: bool,
}

impl StatsRepository {
    /// Create an empty repository with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty repository using `config`.
    pub fn with_config(config: RepositoryConfig) -> Self {
        Self {
            collator: Collator::new(config.locale),
            config,
            data: Snapshot::default(),
            loaded: false,
        }
    }

    /// Settings this repository was built with.
    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Whether the last load or ingest completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Drop all data.
    pub fn reset(&mut self) {
        self.data = Snapshot::default();
        self.loaded = false;
    }

    /// Replace the content with already-parsed payloads.
    ///
    /// Unrecognized payload shapes count as empty; this never fails.
    pub fn ingest(&mut self, raw_matches: &Value, raw_stats: &Value) -> LoadSummary {
        self.data = Snapshot::build(raw_matches, raw_stats, &self.collator);
        self.loaded = true;
        let summary = self.data.summary();
        debug!(?summary, "ingested payloads");
        summary
    }

    /// Replace the content with payloads given as JSON text.
    ///
    /// On invalid JSON the repository is left empty.
    pub fn ingest_str(&mut self, matches_json: &str, stats_json: &str) -> Result<LoadSummary> {
        self.reset();
        let parse = |location: &str, text: &str| {
            serde_json::from_str::<Value>(text).map_err(|e| StatsError::Json {
                location: location.to_owned(),
                source: e,
            })
        };
        let raw_matches = parse("<matches>", matches_json)?;
        let raw_stats = parse("<stats>", stats_json)?;
        Ok(self.ingest(&raw_matches, &raw_stats))
    }

    /// Fetch both payloads from `source` and replace the content.
    ///
    /// The match payload is fetched first, then the stats payload; each is
    /// retried once without its leading `/`. The repository is emptied
    /// before fetching, so a failed load leaves no data behind.
    #[instrument(skip(self, source))]
    pub async fn load<S: DataSource>(
        &mut self,
        source: &S,
        matches_location: &str,
        stats_location: &str,
    ) -> Result<LoadSummary> {
        self.reset();

        let raw_matches = source::fetch_json_with_fallback(source, matches_location)
            .await
            .inspect_err(|e| warn!(error = %e, "failed to load match data"))?;
        let raw_stats = source::fetch_json_with_fallback(source, stats_location)
            .await
            .inspect_err(|e| warn!(error = %e, "failed to load stats data"))?;

        let summary = self.ingest(&raw_matches, &raw_stats);
        info!(
            matches = summary.matches,
            team_stats = summary.team_stats,
            seasons = ?self.data.seasons,
            teams = summary.teams,
            "data loaded"
        );
        Ok(summary)
    }

    /// [`load`](Self::load) from the configured default locations.
    pub async fn load_default<S: DataSource>(&mut self, source: &S) -> Result<LoadSummary> {
        let DataLocations { matches, stats } = self.config.locations.clone();
        self.load(source, &matches, &stats).await
    }

    /// Try each candidate pair in order until one loads at least one match.
    ///
    /// Returns the pair that succeeded. When every candidate fails the
    /// repository is left empty.
    #[instrument(skip(self, source, candidates), fields(candidates = candidates.len()))]
    pub async fn load_first_available<S: DataSource>(
        &mut self,
        source: &S,
        candidates: &[DataLocations],
    ) -> Result<DataLocations> {
        for candidate in candidates {
            match self
                .load(source, &candidate.matches, &candidate.stats)
                .await
            {
                Ok(summary) if summary.matches > 0 => {
                    info!(?candidate, "data located");
                    return Ok(candidate.clone());
                }
                Ok(_) => debug!(?candidate, "candidate has no matches"),
                Err(e) => debug!(?candidate, error = %e, "candidate failed"),
            }
        }
        self.reset();
        Err(StatsError::NoDataAvailable {
            attempts: candidates.len(),
        })
    }

    /// [`load_first_available`](Self::load_first_available) over the
    /// configured fallback locations.
    pub async fn load_first_available_default<S: DataSource>(
        &mut self,
        source: &S,
    ) -> Result<DataLocations> {
        let candidates = self.config.fallback_locations.clone();
        self.load_first_available(source, &candidates).await
    }

    /// Every normalized match, in source order.
    pub fn matches(&self) -> &[Match] {
        &self.data.matches
    }

    /// Every normalized stats row, in source order.
    pub fn team_stats(&self) -> &[TeamSeasonStats] {
        &self.data.team_stats
    }

    /// All season labels, ascending.
    pub fn seasons(&self) -> Vec<String> {
        self.data.seasons.iter().cloned().collect()
    }

    /// Team names, ascending. With a season, only teams that played a match
    /// in it.
    pub fn teams(&self, season: Option<&str>) -> Vec<String> {
        match season.filter(|s| !s.is_empty()) {
            None => self.data.teams.iter().cloned().collect(),
            Some(season) => self
                .matches_by_season(season)
                .flat_map(|m| [&m.home_team, &m.away_team])
                .filter(|team| !team.is_empty())
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        }
    }

    /// Seasons in which `team` played at least one match, ascending.
    pub fn team_seasons(&self, team: &str) -> Vec<String> {
        self.data
            .matches
            .iter()
            .filter(|m| m.involves(team))
            .map(|m| m.season.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Matches of `season`, in source order.
    pub fn matches_by_season<'a>(&'a self, season: &'a str) -> impl Iterator<Item = &'a Match> {
        self.data.matches.iter().filter(move |m| m.season == season)
    }

    /// Matches of `season` in which `team` played home or away.
    pub fn matches_by_team_and_season<'a>(
        &'a self,
        team: &'a str,
        season: &'a str,
    ) -> impl Iterator<Item = &'a Match> {
        self.matches_by_season(season)
            .filter(move |m| m.involves(team))
    }

    /// The stats row of `team` for `season`, if the source had one.
    pub fn stats_for(&self, team: &str, season: &str) -> Option<&TeamSeasonStats> {
        self.data
            .team_stats
            .iter()
            .find(|row| row.team == team && row.season == season)
    }

    /// League table for `season`. Computed on every call.
    pub fn standings(&self, season: &str, mode: StandingsMode) -> Vec<StandingsRow> {
        standings::compute_standings(
            self.matches_by_season(season),
            mode,
            self.config.mode_filtering,
            &self.collator,
        )
    }

    /// [`standings`](Self::standings) with the mode given by name
    /// (`global`, `home` or `away`).
    pub fn standings_by_name(&self, season: &str, mode: &str) -> Result<Vec<StandingsRow>> {
        let mode: StandingsMode = mode.parse()?;
        Ok(self.standings(season, mode))
    }

    /// Number of matches across all seasons.
    pub fn total_matches(&self) -> usize {
        self.data.matches.len()
    }

    /// Goals scored in all matches, both sides counted.
    pub fn total_goals(&self) -> u64 {
        self.data.matches.iter().map(Match::total_goals).sum()
    }

    /// Number of distinct team names.
    pub fn total_teams(&self) -> usize {
        self.data.teams.len()
    }

    /// Number of distinct seasons.
    pub fn total_seasons(&self) -> usize {
        self.data.seasons.len()
    }

    /// Goals scored in the matches of `season`.
    pub fn total_goals_by_season(&self, season: &str) -> u64 {
        self.matches_by_season(season).map(Match::total_goals).sum()
    }

    /// Matches played by `team` across all seasons.
    pub fn total_matches_by_team(&self, team: &str) -> usize {
        self.data.matches.iter().filter(|m| m.involves(team)).count()
    }

    /// Discovered metrics in display order.
    pub fn metric_options(&self) -> &[MetricOption] {
        &self.data.metric_options
    }

    /// Display label for a metric key.
    pub fn metric_label(&self, key: &str) -> Cow<'static, str> {
        metrics::metric_label(key)
    }

    /// Headline figures for the dashboard cards.
    pub fn kpis(&self) -> Kpis {
        Kpis::from_repository(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ModeFiltering;
    use crate::source::MemorySource;

    fn sample_matches() -> Value {
        json!({ "matches": [
            { "home_team": "Lyon", "away_team": "Nice", "home_goals": 2, "away_goals": 1, "result": "H", "season": "2015-2016" },
            { "homeTeam": "Nice", "awayTeam": "Lens", "homeGoals": "0", "awayGoals": "0", "result": "D", "season": "2015-2016" },
            { "home_team": "Lens", "away_team": "Lyon", "home_goals": 1, "away_goals": 3, "result": "A", "season": "2016-2017" },
            { "home_team": "Brest", "away_team": "Lens", "home_goals": "", "away_goals": "x", "season": "2016-2017" }
        ]})
    }

    fn sample_stats() -> Value {
        json!({ "team_stats": [
            { "team": "Lyon", "season": "2015-2016", "points": "10", "wins": 3, "saves": "4,5", "logo": "lyon.png" },
            { "name": "Nice", "season": "2015-2016", "points": 4, "extra_field": "N/A" },
            { "team": "Rennes", "season": "2016-2017", "total_pass": "" }
        ]})
    }

    fn loaded() -> StatsRepository {
        let mut repo = StatsRepository::new();
        repo.ingest(&sample_matches(), &sample_stats());
        repo
    }

    #[test]
    fn test_empty_repository() {
        let repo = StatsRepository::new();
        assert!(!repo.is_loaded());
        assert!(repo.seasons().is_empty());
        assert!(repo.teams(None).is_empty());
        assert!(repo.standings("2020", StandingsMode::Global).is_empty());
        assert_eq!(repo.total_goals(), 0);
        assert!(repo.metric_options().is_empty());
        assert!(repo.stats_for("A", "2020").is_none());
    }

    #[test]
    fn test_indexes() {
        let repo = loaded();
        assert!(repo.is_loaded());
        assert_eq!(repo.seasons(), vec!["2015-2016", "2016-2017"]);
        assert_eq!(repo.teams(None), vec!["Brest", "Lens", "Lyon", "Nice", "Rennes"]);
        assert_eq!(repo.teams(Some("2015-2016")), vec!["Lens", "Lyon", "Nice"]);
        assert_eq!(repo.teams(Some("")), repo.teams(None));
        assert_eq!(repo.team_seasons("Lyon"), vec!["2015-2016", "2016-2017"]);
        assert_eq!(repo.total_teams(), 5);
        assert_eq!(repo.total_seasons(), 2);
    }

    #[test]
    fn test_match_queries_and_totals() {
        let repo = loaded();
        assert_eq!(repo.total_matches(), 4);
        assert_eq!(repo.total_goals(), 7);
        assert_eq!(repo.total_goals_by_season("2016-2017"), 4);
        assert_eq!(repo.total_matches_by_team("Lens"), 3);
        assert_eq!(repo.matches_by_season("2015-2016").count(), 2);
        let lens: Vec<&Match> = repo.matches_by_team_and_season("Lens", "2016-2017").collect();
        assert_eq!(lens.len(), 2);
        assert!(repo.matches().iter().all(|m| m.home_goals < 10 && m.away_goals < 10));
        let brest = &repo.matches()[3];
        assert_eq!((brest.home_goals, brest.away_goals), (0, 0));
    }

    #[test]
    fn test_stats_lookup() {
        let repo = loaded();
        let lyon = repo.stats_for("Lyon", "2015-2016").unwrap();
        assert_eq!(lyon.metric("points"), Some(10.0));
        assert_eq!(lyon.metric("saves"), Some(4.0));
        let nice = repo.stats_for("Nice", "2015-2016").unwrap();
        assert_eq!(nice.metric("extra_field"), Some(0.0));
        assert!(repo.stats_for("Lyon", "2016-2017").is_none());
    }

    #[test]
    fn test_metric_catalog() {
        let repo = loaded();
        let keys: Vec<&str> = repo.metric_options().iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["points", "wins", "saves"]);
        assert_eq!(repo.metric_options()[2].label, "Arrêts");
        assert_eq!(repo.metric_label("shots_total"), "Shots Total");
    }

    #[test]
    fn test_catalog_lists_each_numeric_key_once() {
        let mut repo = StatsRepository::new();
        let stats = json!([
            { "team": "A", "points": 1, "a_metric": "n/a", "id": 4 },
            { "team": "B", "points": "2", "a_metric": "7" },
            { "team": "C", "points": "3", "b_metric": null }
        ]);
        repo.ingest(&json!([]), &stats);
        let keys: Vec<&str> = repo.metric_options().iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["points", "a_metric"]);
    }

    #[test]
    fn test_standings_scenario() {
        let mut repo = StatsRepository::new();
        repo.ingest(
            &json!([{ "home_team": "A", "away_team": "B", "home_goals": 2, "away_goals": 1, "season": "2020" }]),
            &json!([]),
        );
        let table = repo.standings("2020", StandingsMode::Global);
        assert_eq!(table.len(), 2);
        assert_eq!((table[0].team.as_str(), table[0].pts, table[0].diff), ("A", 3, 1));
        assert_eq!((table[1].team.as_str(), table[1].pts, table[1].diff), ("B", 0, -1));
        assert!(repo.standings("2021", StandingsMode::Global).is_empty());
    }

    #[test]
    fn test_standings_by_name() {
        let repo = loaded();
        let table = repo.standings_by_name("2015-2016", "global").unwrap();
        assert_eq!(table[0].team, "Lyon");
        assert_eq!(repo.standings_by_name("2015-2016", "home").unwrap().len(), 2);
        assert!(matches!(
            repo.standings_by_name("2015-2016", "neutral"),
            Err(StatsError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_standings_mode_filtering_follows_config() {
        let matches = json!([
            { "home_team": "A", "away_team": "B", "home_goals": 1, "away_goals": 0, "season": "s" }
        ]);
        let mut split = StatsRepository::new();
        split.ingest(&matches, &json!([]));
        assert_eq!(split.standings("s", StandingsMode::Away).len(), 1);

        let mut legacy = StatsRepository::with_config(RepositoryConfig {
            mode_filtering: ModeFiltering::Legacy,
            ..RepositoryConfig::default()
        });
        legacy.ingest(&matches, &json!([]));
        assert_eq!(legacy.standings("s", StandingsMode::Away).len(), 2);
    }

    #[test]
    fn test_malformed_stats_payload() {
        let mut repo = StatsRepository::new();
        let summary = repo.ingest(&sample_matches(), &json!({ "foo": [] }));
        assert_eq!(summary.team_stats, 0);
        assert_eq!(summary.metrics, 0);
        assert_eq!(summary.matches, 4);
        assert!(repo.metric_options().is_empty());
    }

    #[test]
    fn test_ingest_replaces_wholesale() {
        let mut repo = loaded();
        repo.ingest(&json!([]), &json!([]));
        assert_eq!(repo.total_matches(), 0);
        assert!(repo.seasons().is_empty());
        assert!(repo.is_loaded());
        repo.reset();
        assert!(!repo.is_loaded());
    }

    #[test]
    fn test_ingest_str_invalid_json_clears() {
        let mut repo = loaded();
        let err = repo.ingest_str("[]", "{ nope").unwrap_err();
        assert!(matches!(err, StatsError::Json { ref location, .. } if location == "<stats>"));
        assert_eq!(repo.total_matches(), 0);
        assert!(!repo.is_loaded());
    }

    #[tokio::test]
    async fn test_load_with_relative_fallback() {
        let source = MemorySource::new()
            .with("data/csvjson.json", sample_matches().to_string())
            .with("/data/csvjson (1).json", sample_stats().to_string());
        let mut repo = StatsRepository::new();
        let summary = repo.load_default(&source).await.unwrap();
        assert_eq!(summary.matches, 4);
        assert_eq!(summary.team_stats, 3);
        assert_eq!(
            source.requested(),
            vec!["/data/csvjson.json", "data/csvjson.json", "/data/csvjson (1).json"]
        );
    }

    #[tokio::test]
    async fn test_failed_load_leaves_repository_empty() {
        let source = MemorySource::new().with("/m.json", sample_matches().to_string());
        let mut repo = loaded();
        let err = repo.load(&source, "/m.json", "/s.json").await.unwrap_err();
        assert!(matches!(err, StatsError::SourceUnavailable { ref location, .. } if location == "/s.json"));
        assert!(!repo.is_loaded());
        assert_eq!(repo.total_matches(), 0);
        assert!(repo.teams(None).is_empty());
    }

    #[tokio::test]
    async fn test_load_first_available() {
        let source = MemorySource::new()
            .with("data/csvjson.json", "[]")
            .with("data/csvjson (1).json", "[]")
            .with("../../data/csvjson.json", sample_matches().to_string())
            .with("../../data/csvjson (1).json", sample_stats().to_string());
        let mut repo = StatsRepository::new();
        let found = repo.load_first_available_default(&source).await.unwrap();
        assert_eq!(found.matches, "../../data/csvjson.json");
        assert_eq!(repo.total_matches(), 4);
    }

    #[tokio::test]
    async fn test_load_first_available_exhausted() {
        let source = MemorySource::new();
        let mut repo = loaded();
        let err = repo
            .load_first_available(&source, &DataLocations::fallback_candidates())
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::NoDataAvailable { attempts: 4 }));
        assert_eq!(repo.total_matches(), 0);
    }
}
