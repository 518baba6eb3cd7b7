use std::collections::BTreeMap;

use rand::Rng;

use crate::stats::{COUNT_KEY, ScenarioStat, TraceDiffer, diff_count_all, round};

use super::format::formatted_line_with_diff;
use super::keywords::Column;
use super::printer::TracePrinter;

impl TracePrinter {
    /// One row of formatted cells for `stat`, one cell per column.
    ///
    /// With `quote_uri`, an identity containing a comma is emitted raw and
    /// wrapped in double quotes so it survives comma-separated output.
    pub fn generate_trace_line<R>(
        &self,
        stat: &ScenarioStat,
        quote_uri: bool,
        rng: &mut R,
    ) -> Vec<String>
    where
        R: Rng + ?Sized,
    {
        self.columns()
            .iter()
            .map(|column| match *column {
                Column::Count => stat.str_count(),
                Column::UriMethodStatus => self.uri_cell(stat, quote_uri),
                Column::Min => round(stat.min_response_time()),
                Column::Max => round(stat.max_response_time()),
                Column::Sum => round(stat.sum_response_time()),
                Column::Avg => round(stat.avg_response_time()),
                Column::Stddev => round(stat.stddev_response_time()),
                Column::MinBody => round(stat.min_response_body_bytes()),
                Column::MaxBody => round(stat.max_response_body_bytes()),
                Column::SumBody => round(stat.sum_response_body_bytes()),
                Column::AvgBody => round(stat.avg_response_body_bytes()),
                Column::TraceIdSample => stat.random_trace_id(rng).to_owned(),
                Column::Percentile(n) => round(stat.pn_response_time(n)),
            })
            .collect()
    }

    /// Like [`TracePrinter::generate_trace_line`] for `to`, with every
    /// numeric cell annotated by its signed delta from `from`.
    pub fn generate_trace_line_with_diff<R>(
        &self,
        from: &ScenarioStat,
        to: &ScenarioStat,
        quote_uri: bool,
        rng: &mut R,
    ) -> Vec<String>
    where
        R: Rng + ?Sized,
    {
        let differ = TraceDiffer::new(from, to);
        self.columns()
            .iter()
            .map(|column| match *column {
                Column::Count => formatted_line_with_diff(&to.str_count(), &differ.diff_count()),
                Column::UriMethodStatus => self.uri_cell(to, quote_uri),
                Column::Min => formatted_line_with_diff(
                    &round(to.min_response_time()),
                    &differ.diff_min_response_time(),
                ),
                Column::Max => formatted_line_with_diff(
                    &round(to.max_response_time()),
                    &differ.diff_max_response_time(),
                ),
                Column::Sum => formatted_line_with_diff(
                    &round(to.sum_response_time()),
                    &differ.diff_sum_response_time(),
                ),
                Column::Avg => formatted_line_with_diff(
                    &round(to.avg_response_time()),
                    &differ.diff_avg_response_time(),
                ),
                Column::Stddev => formatted_line_with_diff(
                    &round(to.stddev_response_time()),
                    &differ.diff_stddev_response_time(),
                ),
                Column::MinBody => formatted_line_with_diff(
                    &round(to.min_response_body_bytes()),
                    &differ.diff_min_response_body_bytes(),
                ),
                Column::MaxBody => formatted_line_with_diff(
                    &round(to.max_response_body_bytes()),
                    &differ.diff_max_response_body_bytes(),
                ),
                Column::SumBody => formatted_line_with_diff(
                    &round(to.sum_response_body_bytes()),
                    &differ.diff_sum_response_body_bytes(),
                ),
                Column::AvgBody => formatted_line_with_diff(
                    &round(to.avg_response_body_bytes()),
                    &differ.diff_avg_response_body_bytes(),
                ),
                Column::TraceIdSample => to.random_trace_id(rng).to_owned(),
                Column::Percentile(n) => formatted_line_with_diff(
                    &round(to.pn_response_time(n)),
                    &differ.diff_pn_response_time(n),
                ),
            })
            .collect()
    }

    /// Footer row: the total request count under `count`, blanks elsewhere.
    #[must_use]
    pub fn generate_trace_footer(&self, counts: &BTreeMap<&'static str, u64>) -> Vec<String> {
        self.columns()
            .iter()
            .map(|column| match *column {
                Column::Count => counts.get(COUNT_KEY).copied().unwrap_or(0).to_string(),
                Column::UriMethodStatus
                | Column::Min
                | Column::Max
                | Column::Sum
                | Column::Avg
                | Column::Stddev
                | Column::MinBody
                | Column::MaxBody
                | Column::SumBody
                | Column::AvgBody
                | Column::TraceIdSample
                | Column::Percentile(_) => String::new(),
            })
            .collect()
    }

    #[must_use]
    pub fn generate_trace_footer_with_diff(
        &self,
        counts_from: &BTreeMap<&'static str, u64>,
        counts_to: &BTreeMap<&'static str, u64>,
    ) -> Vec<String> {
        let deltas = diff_count_all(counts_from, counts_to);
        self.columns()
            .iter()
            .map(|column| match *column {
                Column::Count => formatted_line_with_diff(
                    &counts_to.get(COUNT_KEY).copied().unwrap_or(0).to_string(),
                    deltas.get(COUNT_KEY).map_or("+0", String::as_str),
                ),
                Column::UriMethodStatus
                | Column::Min
                | Column::Max
                | Column::Sum
                | Column::Avg
                | Column::Stddev
                | Column::MinBody
                | Column::MaxBody
                | Column::SumBody
                | Column::AvgBody
                | Column::TraceIdSample
                | Column::Percentile(_) => String::new(),
            })
            .collect()
    }

    fn uri_cell(&self, stat: &ScenarioStat, quote_uri: bool) -> String {
        if quote_uri && stat.uri_method_status().contains(',') {
            return format!("\"{}\"", stat.uri_method_status());
        }
        stat.uri_with_options(self.options().decode_uri).into_owned()
    }
}
