use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::error::ValidationError;

/// Meta keyword expanding to every column.
pub const ALL_KEYWORD: &str = "all";

/// One reportable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Count,
    UriMethodStatus,
    Min,
    Max,
    Sum,
    Avg,
    Stddev,
    MinBody,
    MaxBody,
    SumBody,
    AvgBody,
    TraceIdSample,
    Percentile(u32),
}

/// Columns listed before the percentiles in the canonical order.
const LEADING_COLUMNS: [Column; 6] = [
    Column::Count,
    Column::UriMethodStatus,
    Column::Min,
    Column::Max,
    Column::Sum,
    Column::Avg,
];

/// Columns listed after the percentiles in the canonical order.
const TRAILING_COLUMNS: [Column; 6] = [
    Column::Stddev,
    Column::MinBody,
    Column::MaxBody,
    Column::SumBody,
    Column::AvgBody,
    Column::TraceIdSample,
];

impl Column {
    #[must_use]
    pub fn keyword(self) -> Cow<'static, str> {
        match self {
            Column::Count => Cow::Borrowed("count"),
            Column::UriMethodStatus => Cow::Borrowed("uri_method_status"),
            Column::Min => Cow::Borrowed("min"),
            Column::Max => Cow::Borrowed("max"),
            Column::Sum => Cow::Borrowed("sum"),
            Column::Avg => Cow::Borrowed("avg"),
            Column::Stddev => Cow::Borrowed("stddev"),
            Column::MinBody => Cow::Borrowed("min_body"),
            Column::MaxBody => Cow::Borrowed("max_body"),
            Column::SumBody => Cow::Borrowed("sum_body"),
            Column::AvgBody => Cow::Borrowed("avg_body"),
            Column::TraceIdSample => Cow::Borrowed("trace_id_sample"),
            Column::Percentile(n) => Cow::Owned(format!("p{}", n)),
        }
    }

    #[must_use]
    pub fn header(self) -> Cow<'static, str> {
        match self {
            Column::Count => Cow::Borrowed("Count"),
            Column::UriMethodStatus => Cow::Borrowed("UriMethodStatus"),
            Column::Min => Cow::Borrowed("Min"),
            Column::Max => Cow::Borrowed("Max"),
            Column::Sum => Cow::Borrowed("Sum"),
            Column::Avg => Cow::Borrowed("Avg"),
            Column::Stddev => Cow::Borrowed("Stddev"),
            Column::MinBody => Cow::Borrowed("Min(Body)"),
            Column::MaxBody => Cow::Borrowed("Max(Body)"),
            Column::SumBody => Cow::Borrowed("Sum(Body)"),
            Column::AvgBody => Cow::Borrowed("Avg(Body)"),
            Column::TraceIdSample => Cow::Borrowed("TraceIdSample"),
            Column::Percentile(n) => Cow::Owned(format!("P{}", n)),
        }
    }
}

/// Every column in canonical order: count, identity, latency min/max/sum/avg,
/// the configured percentiles, stddev, body min/max/sum/avg, trace sample.
#[must_use]
pub fn trace_columns(percentiles: &[u32]) -> Vec<Column> {
    LEADING_COLUMNS
        .iter()
        .copied()
        .chain(percentiles.iter().map(|n| Column::Percentile(*n)))
        .chain(TRAILING_COLUMNS.iter().copied())
        .collect()
}

#[must_use]
pub fn trace_keywords(percentiles: &[u32]) -> Vec<String> {
    trace_columns(percentiles)
        .into_iter()
        .map(|column| column.keyword().into_owned())
        .collect()
}

#[must_use]
pub fn trace_default_headers(percentiles: &[u32]) -> Vec<String> {
    trace_columns(percentiles)
        .into_iter()
        .map(|column| column.header().into_owned())
        .collect()
}

/// Keyword to header mapping for the given percentile configuration.
#[must_use]
pub fn trace_headers_map(percentiles: &[u32]) -> BTreeMap<String, String> {
    trace_columns(percentiles)
        .into_iter()
        .map(|column| (column.keyword().into_owned(), column.header().into_owned()))
        .collect()
}

/// A user keyword selection resolved against the header registry.
///
/// Resolution never fails; unknown keywords get an empty header and are
/// reported together by [`KeywordSelection::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSelection {
    keywords: Vec<String>,
    headers: Vec<String>,
    percentiles: Vec<u32>,
    all: bool,
}

impl KeywordSelection {
    #[must_use]
    pub fn resolve(selection: &str, percentiles: &[u32]) -> Self {
        if selection.trim() == ALL_KEYWORD {
            return Self::all(percentiles);
        }

        let headers_map = trace_headers_map(percentiles);
        let mut keywords = Vec::new();
        let mut headers = Vec::new();
        for keyword in split_keywords(selection) {
            if keyword == ALL_KEYWORD {
                tracing::debug!("Keyword 'all' found in selection; using every column");
                return Self::all(percentiles);
            }
            headers.push(headers_map.get(keyword).cloned().unwrap_or_default());
            keywords.push(keyword.to_owned());
        }

        Self {
            keywords,
            headers,
            percentiles: percentiles.to_vec(),
            all: false,
        }
    }

    fn all(percentiles: &[u32]) -> Self {
        Self {
            keywords: trace_keywords(percentiles),
            headers: trace_default_headers(percentiles),
            percentiles: percentiles.to_vec(),
            all: true,
        }
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        self.all
    }

    /// Map every keyword to its column.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidKeywords`] naming every keyword that
    /// is not in the registry, or [`ValidationError::NoKeywords`] when the
    /// selection is empty.
    pub fn validate(&self) -> Result<Vec<Column>, ValidationError> {
        if self.all {
            return Ok(trace_columns(&self.percentiles));
        }
        if self.keywords.is_empty() {
            return Err(ValidationError::NoKeywords);
        }

        let registry = trace_columns(&self.percentiles);
        let mut columns = Vec::with_capacity(self.keywords.len());
        let mut invalids = Vec::new();
        for keyword in &self.keywords {
            match registry
                .iter()
                .find(|column| column.keyword() == keyword.as_str())
            {
                Some(column) => columns.push(*column),
                None => invalids.push(keyword.as_str()),
            }
        }

        if !invalids.is_empty() {
            return Err(ValidationError::InvalidKeywords {
                keywords: invalids.join(","),
            });
        }
        Ok(columns)
    }
}

fn split_keywords(selection: &str) -> impl Iterator<Item = &str> {
    selection
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
}
