use serde::{Deserialize, Serialize};

/// Which fixtures feed a league table.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StandingsMode {
    /// Every fixture of the season.
    #[default]
    Global,
    /// Only fixtures played at home.
    Home,
    /// Only fixtures played away.
    Away,
}

/// One line of a league table.
///
/// Field names follow the French table headings: `mj` matches joués,
/// `v` victoires, `n` nuls, `d` défaites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StandingsRow {
    pub team: String,
    pub mj: u32,
    pub v: u32,
    pub n: u32,
    pub d: u32,
    pub gf: u64,
    pub ga: u64,
    pub diff: i64,
    pub pts: u32,
}

impl StandingsRow {
    pub(crate) fn new(team: &str) -> Self {
        Self {
            team: team.to_owned(),
            ..Self::default()
        }
    }

    /// Account for one fixture seen from this team's side.
    pub(crate) fn record(&mut self, scored: u32, conceded: u32) {
        self.mj += 1;
        self.gf += u64::from(scored);
        self.ga += u64::from(conceded);
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => {
                self.v += 1;
                self.pts += 3;
            }
            std::cmp::Ordering::Less => self.d += 1,
            std::cmp::Ordering::Equal => {
                self.n += 1;
                self.pts += 1;
            }
        }
        self.diff = self.gf as i64 - self.ga as i64;
    }
}
