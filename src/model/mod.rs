mod match_result;
mod metric;
mod standings;
mod team_stats;

pub use match_result::*;
pub use metric::*;
pub use standings::*;
pub use team_stats::*;
