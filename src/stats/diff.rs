use std::collections::BTreeMap;

use super::record::ScenarioStat;

/// Signed field-by-field deltas between two records with the same identity.
///
/// Every delta is `to - from`, formatted with an explicit sign and the same
/// precision as the plain value.
#[derive(Debug, Clone, Copy)]
pub struct TraceDiffer<'stat> {
    from: &'stat ScenarioStat,
    to: &'stat ScenarioStat,
}

impl<'stat> TraceDiffer<'stat> {
    #[must_use]
    pub const fn new(from: &'stat ScenarioStat, to: &'stat ScenarioStat) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn diff_count(&self) -> String {
        signed_count(self.from.count(), self.to.count())
    }

    #[must_use]
    pub fn diff_min_response_time(&self) -> String {
        signed_round(self.to.min_response_time() - self.from.min_response_time())
    }

    #[must_use]
    pub fn diff_max_response_time(&self) -> String {
        signed_round(self.to.max_response_time() - self.from.max_response_time())
    }

    #[must_use]
    pub fn diff_sum_response_time(&self) -> String {
        signed_round(self.to.sum_response_time() - self.from.sum_response_time())
    }

    #[must_use]
    pub fn diff_avg_response_time(&self) -> String {
        signed_round(self.to.avg_response_time() - self.from.avg_response_time())
    }

    #[must_use]
    pub fn diff_stddev_response_time(&self) -> String {
        signed_round(self.to.stddev_response_time() - self.from.stddev_response_time())
    }

    #[must_use]
    pub fn diff_pn_response_time(&self, n: u32) -> String {
        signed_round(self.to.pn_response_time(n) - self.from.pn_response_time(n))
    }

    #[must_use]
    pub fn diff_min_response_body_bytes(&self) -> String {
        signed_round(self.to.min_response_body_bytes() - self.from.min_response_body_bytes())
    }

    #[must_use]
    pub fn diff_max_response_body_bytes(&self) -> String {
        signed_round(self.to.max_response_body_bytes() - self.from.max_response_body_bytes())
    }

    #[must_use]
    pub fn diff_sum_response_body_bytes(&self) -> String {
        signed_round(self.to.sum_response_body_bytes() - self.from.sum_response_body_bytes())
    }

    #[must_use]
    pub fn diff_avg_response_body_bytes(&self) -> String {
        signed_round(self.to.avg_response_body_bytes() - self.from.avg_response_body_bytes())
    }
}

/// Per-keyword deltas of two footer total maps; keys missing on either
/// side count as zero.
#[must_use]
pub fn diff_count_all(
    from: &BTreeMap<&'static str, u64>,
    to: &BTreeMap<&'static str, u64>,
) -> BTreeMap<&'static str, String> {
    from.keys()
        .chain(to.keys())
        .map(|key| {
            let before = from.get(key).copied().unwrap_or(0);
            let after = to.get(key).copied().unwrap_or(0);
            (*key, signed_count(before, after))
        })
        .collect()
}

/// Value rounded to three decimals, the precision of every numeric cell.
#[must_use]
pub fn round(value: f64) -> String {
    format!("{:.3}", value)
}

fn signed_round(delta: f64) -> String {
    format!("{:+.3}", delta)
}

fn signed_count(from: u64, to: u64) -> String {
    format!("{:+}", i128::from(to).saturating_sub(i128::from(from)))
}
