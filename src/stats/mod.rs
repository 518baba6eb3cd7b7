//! Statistic records, snapshots, and the delta computation between them.
mod diff;
mod record;
mod snapshot;


pub use diff::{TraceDiffer, diff_count_all, round};
pub use record::ScenarioStat;
pub use snapshot::{COUNT_KEY, TraceStats, load_snapshot};
