mod app;
mod config;
mod report;
mod snapshot;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use report::ReportError;
pub use snapshot::SnapshotError;
pub use validation::ValidationError;
