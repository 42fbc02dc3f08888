pub use collation::{Collator, Locale};
pub use config::{DataLocations, ModeFiltering, RepositoryConfig};
pub use error::{Result, StatsError};
pub use kpi::{format_number, Kpis};
pub use model::*;
pub use repository::{LoadSummary, StatsRepository};
pub use source::{DataSource, FileSource, HttpSource, MemorySource};

pub mod collation;
mod config;
mod error;
pub mod kpi;
pub mod metrics;
mod model;
pub mod normalize;
mod repository;
pub mod source;
pub mod standings;
