use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult, SnapshotError};

use super::record::ScenarioStat;

/// Footer key holding the grand total request count.
pub const COUNT_KEY: &str = "count";

/// One reporting period worth of statistics, in producer order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceStats {
    scenarios: Vec<ScenarioStat>,
}

impl TraceStats {
    #[must_use]
    pub const fn new(scenarios: Vec<ScenarioStat>) -> Self {
        Self { scenarios }
    }

    #[must_use]
    pub fn scenarios(&self) -> &[ScenarioStat] {
        &self.scenarios
    }

    /// Totals used for report footers, keyed by keyword.
    #[must_use]
    pub fn count_all(&self) -> BTreeMap<&'static str, u64> {
        let total = self
            .scenarios
            .iter()
            .fold(0_u64, |acc, stat| acc.saturating_add(stat.count()));
        BTreeMap::from([(COUNT_KEY, total)])
    }

    /// First record whose raw identity equals `uri_method_status`.
    #[must_use]
    pub fn find(&self, uri_method_status: &str) -> Option<&ScenarioStat> {
        self.scenarios
            .iter()
            .find(|stat| stat.uri_method_status() == uri_method_status)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    scenarios: Vec<ScenarioRecord>,
}

#[derive(Debug, Deserialize)]
struct ScenarioRecord {
    uri_method_status: String,
    #[serde(default)]
    response_times: Vec<f64>,
    #[serde(default)]
    body_bytes: Vec<f64>,
    #[serde(default)]
    trace_ids: Vec<String>,
}

/// Loads a snapshot from a `.toml` or `.json` file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed, has an
/// unsupported extension, or contains non-finite response times.
pub fn load_snapshot(path: &Path) -> AppResult<TraceStats> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::snapshot(SnapshotError::ReadSnapshot {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let file: SnapshotFile = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::snapshot(SnapshotError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::snapshot(SnapshotError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some(ext) => {
            return Err(AppError::snapshot(SnapshotError::UnsupportedExtension {
                ext: ext.to_owned(),
            }));
        }
        None => return Err(AppError::snapshot(SnapshotError::MissingExtension)),
    };

    let stats = into_trace_stats(file)?;
    tracing::debug!(
        "Loaded {} scenarios from {}",
        stats.scenarios().len(),
        path.display()
    );
    Ok(stats)
}

fn into_trace_stats(file: SnapshotFile) -> AppResult<TraceStats> {
    let mut scenarios = Vec::with_capacity(file.scenarios.len());
    for (index, record) in file.scenarios.into_iter().enumerate() {
        if record.response_times.iter().any(|value| !value.is_finite()) {
            return Err(AppError::snapshot(SnapshotError::NonFiniteResponseTime {
                index,
            }));
        }
        scenarios.push(ScenarioStat::from_samples(
            record.uri_method_status,
            record.response_times,
            &record.body_bytes,
            record.trace_ids,
        ));
    }
    Ok(TraceStats::new(scenarios))
}
