use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use rand::Rng;
use rand::seq::SliceRandom;

/// Finished statistics for one `uri_method_status` key.
///
/// Aggregates are derived once from raw samples and never recomputed; the
/// sorted latency samples are kept so any percentile can be evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioStat {
    uri_method_status: String,
    response_times: Vec<f64>,
    response_time_sum: f64,
    response_time_stddev: f64,
    body_bytes_min: f64,
    body_bytes_max: f64,
    body_bytes_sum: f64,
    body_bytes_count: u64,
    trace_ids: Vec<String>,
}

impl ScenarioStat {
    /// Build a statistic record from raw samples.
    ///
    /// `response_times` are in seconds and become the request count;
    /// `body_bytes` may be empty, in which case body statistics are zero.
    #[must_use]
    pub fn from_samples(
        uri_method_status: impl Into<String>,
        mut response_times: Vec<f64>,
        body_bytes: &[f64],
        trace_ids: Vec<String>,
    ) -> Self {
        response_times.sort_by(f64::total_cmp);
        let response_time_sum: f64 = response_times.iter().sum();
        let response_time_stddev = population_stddev(&response_times, response_time_sum);

        let body_bytes_min = body_bytes.iter().copied().reduce(f64::min).unwrap_or(0.0);
        let body_bytes_max = body_bytes.iter().copied().reduce(f64::max).unwrap_or(0.0);
        let body_bytes_sum: f64 = body_bytes.iter().sum();

        Self {
            uri_method_status: uri_method_status.into(),
            response_times,
            response_time_sum,
            response_time_stddev,
            body_bytes_min,
            body_bytes_max,
            body_bytes_sum,
            body_bytes_count: u64::try_from(body_bytes.len()).unwrap_or(u64::MAX),
            trace_ids,
        }
    }

    /// Raw identity, exactly as produced upstream.
    #[must_use]
    pub fn uri_method_status(&self) -> &str {
        &self.uri_method_status
    }

    /// Identity for display, percent-decoded when `decode_uri` is set.
    ///
    /// Identities that do not decode to valid UTF-8 are shown raw.
    #[must_use]
    pub fn uri_with_options(&self, decode_uri: bool) -> Cow<'_, str> {
        if !decode_uri {
            return Cow::Borrowed(&self.uri_method_status);
        }
        percent_decode_str(&self.uri_method_status)
            .decode_utf8()
            .unwrap_or(Cow::Borrowed(&self.uri_method_status))
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        u64::try_from(self.response_times.len()).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn str_count(&self) -> String {
        self.count().to_string()
    }

    #[must_use]
    pub fn min_response_time(&self) -> f64 {
        self.response_times.first().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn max_response_time(&self) -> f64 {
        self.response_times.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub const fn sum_response_time(&self) -> f64 {
        self.response_time_sum
    }

    #[must_use]
    pub fn avg_response_time(&self) -> f64 {
        mean(self.response_time_sum, self.count())
    }

    #[must_use]
    pub const fn stddev_response_time(&self) -> f64 {
        self.response_time_stddev
    }

    /// Latency at the `n`-th percentile, by nearest rank.
    ///
    /// Percentiles above 100 resolve to the slowest sample.
    #[must_use]
    pub fn pn_response_time(&self, n: u32) -> f64 {
        let len = self.response_times.len();
        let Some(last) = len.checked_sub(1) else {
            return 0.0;
        };
        let rank = len
            .saturating_mul(usize::try_from(n).unwrap_or(usize::MAX))
            .checked_div(100)
            .unwrap_or(0)
            .saturating_sub(1);
        self.response_times
            .get(rank.min(last))
            .copied()
            .unwrap_or(0.0)
    }

    #[must_use]
    pub const fn min_response_body_bytes(&self) -> f64 {
        self.body_bytes_min
    }

    #[must_use]
    pub const fn max_response_body_bytes(&self) -> f64 {
        self.body_bytes_max
    }

    #[must_use]
    pub const fn sum_response_body_bytes(&self) -> f64 {
        self.body_bytes_sum
    }

    #[must_use]
    pub fn avg_response_body_bytes(&self) -> f64 {
        mean(self.body_bytes_sum, self.body_bytes_count)
    }

    #[must_use]
    pub fn trace_ids(&self) -> &[String] {
        &self.trace_ids
    }

    /// One sampled trace id, or an empty string when none were sampled.
    pub fn random_trace_id<R>(&self, rng: &mut R) -> &str
    where
        R: Rng + ?Sized,
    {
        self.trace_ids.choose(rng).map_or("", String::as_str)
    }
}

fn mean(sum: f64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

fn population_stddev(values: &[f64], sum: f64) -> f64 {
    let count = u64::try_from(values.len()).unwrap_or(u64::MAX);
    if count == 0 {
        return 0.0;
    }
    let avg = mean(sum, count);
    let variance = values
        .iter()
        .map(|value| {
            let delta = value - avg;
            delta * delta
        })
        .sum::<f64>()
        / count as f64;
    variance.sqrt()
}
