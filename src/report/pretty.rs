//! Human-oriented text report built from raw record values.
use std::fmt::{self, Write as _};

use chrono::{DateTime, Local, SecondsFormat};
use rand::Rng;

use crate::stats::{ScenarioStat, TraceDiffer, TraceStats};

use super::units::{self, Number};

/// Helper functions available while rendering the pretty report.
///
/// Built once per render so every block shares the same timestamp.
#[derive(Debug, Clone)]
pub struct TemplateFuncs {
    generated_at: String,
}

impl TemplateFuncs {
    #[must_use]
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }

    #[must_use]
    pub fn current_date(&self) -> &str {
        &self.generated_at
    }

    #[must_use]
    pub fn percent(&self, a: impl Into<Number>, b: impl Into<Number>) -> f64 {
        units::percent(a, b)
    }

    #[must_use]
    pub fn per(&self, a: impl Into<Number>, b: impl Into<Number>) -> f64 {
        units::per(a, b)
    }

    #[must_use]
    pub const fn rank(&self, index: usize) -> usize {
        index.saturating_add(1)
    }

    #[must_use]
    pub fn short_time(&self, value: impl Into<Number>) -> String {
        units::short_time(value)
    }

    #[must_use]
    pub fn short_byte_int(&self, value: impl Into<Number>) -> String {
        units::short_byte_int(value)
    }

    #[must_use]
    pub fn short_byte(&self, value: impl Into<Number>) -> String {
        units::short_byte(value)
    }

    #[must_use]
    pub fn short_int(&self, value: impl Into<Number>) -> String {
        units::short_int(value)
    }

    #[must_use]
    pub fn short(&self, value: impl Into<Number>) -> String {
        units::short(value)
    }
}

/// Render `base`, or `compare_to` annotated with its changes from `base`.
///
/// A block that fails to format is logged and skipped.
#[must_use]
pub fn render_pretty<R>(
    funcs: &TemplateFuncs,
    base: &TraceStats,
    compare_to: Option<&TraceStats>,
    percentiles: &[u32],
    decode_uri: bool,
    rng: &mut R,
) -> String
where
    R: Rng + ?Sized,
{
    let shown = compare_to.unwrap_or(base);
    let total = shown.scenarios().iter().map(ScenarioStat::count).sum::<u64>();

    let mut output = String::new();
    if let Err(err) = write_summary(&mut output, funcs, shown, total) {
        tracing::error!("Failed to render report summary: {}", err);
    }

    for (index, stat) in shown.scenarios().iter().enumerate() {
        let previous = compare_to.and_then(|_| base.find(stat.uri_method_status()));
        let block = PrettyBlock {
            funcs,
            stat,
            previous,
            index,
            total,
            percentiles,
            decode_uri,
        };
        let mut text = String::new();
        match block.write_to(&mut text, rng) {
            Ok(()) => output.push_str(&text),
            Err(err) => tracing::error!(
                "Failed to render block for '{}': {}",
                stat.uri_method_status(),
                err
            ),
        }
    }
    output
}

fn write_summary(
    out: &mut String,
    funcs: &TemplateFuncs,
    stats: &TraceStats,
    total: u64,
) -> fmt::Result {
    writeln!(out, "Generated at: {}", funcs.current_date())?;
    writeln!(out, "Scenarios:    {}", stats.scenarios().len())?;
    writeln!(out, "Requests:     {}", funcs.short_int(total))?;
    writeln!(out)
}

struct PrettyBlock<'render> {
    funcs: &'render TemplateFuncs,
    stat: &'render ScenarioStat,
    previous: Option<&'render ScenarioStat>,
    index: usize,
    total: u64,
    percentiles: &'render [u32],
    decode_uri: bool,
}

impl PrettyBlock<'_> {
    fn write_to<R>(&self, out: &mut String, rng: &mut R) -> fmt::Result
    where
        R: Rng + ?Sized,
    {
        let funcs = self.funcs;
        let stat = self.stat;

        writeln!(
            out,
            "#{} {}",
            funcs.rank(self.index),
            stat.uri_with_options(self.decode_uri)
        )?;
        writeln!(
            out,
            "  Requests:      {} ({:.2}% of total)",
            funcs.short_int(stat.count()),
            funcs.percent(stat.count(), self.total)
        )?;
        writeln!(
            out,
            "  Latency:       min {} / avg {} / max {} / stddev {}",
            funcs.short_time(stat.min_response_time()),
            funcs.short_time(stat.avg_response_time()),
            funcs.short_time(stat.max_response_time()),
            funcs.short_time(stat.stddev_response_time())
        )?;
        writeln!(
            out,
            "  Total time:    {}",
            funcs.short_time(stat.sum_response_time())
        )?;
        if !self.percentiles.is_empty() {
            write!(out, "  Percentiles:  ")?;
            for n in self.percentiles {
                write!(out, " P{} {}", n, funcs.short_time(stat.pn_response_time(*n)))?;
            }
            writeln!(out)?;
        }
        writeln!(
            out,
            "  Body:          min {} / avg {} / max {} / total {}",
            funcs.short_byte_int(stat.min_response_body_bytes()),
            funcs.short_byte(stat.avg_response_body_bytes()),
            funcs.short_byte_int(stat.max_response_body_bytes()),
            funcs.short_byte(stat.sum_response_body_bytes())
        )?;
        writeln!(
            out,
            "  Body per req:  {}",
            funcs.short(funcs.per(stat.sum_response_body_bytes(), stat.count()))
        )?;
        let trace_id = stat.random_trace_id(rng);
        if !trace_id.is_empty() {
            writeln!(out, "  Trace sample:  {}", trace_id)?;
        }
        if let Some(previous) = self.previous {
            let differ = TraceDiffer::new(previous, stat);
            writeln!(
                out,
                "  Change:        count {} / avg {} / max {} / body avg {}",
                differ.diff_count(),
                differ.diff_avg_response_time(),
                differ.diff_max_response_time(),
                differ.diff_avg_response_body_bytes()
            )?;
        }
        writeln!(out)
    }
}
