use serde::Deserialize;

use crate::args::OutputFormat;

/// Report settings read from `tracestat.toml` / `tracestat.json`.
///
/// Every field is optional; values given on the command line win.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub format: Option<OutputFormat>,
    pub keywords: Option<KeywordsValue>,
    pub percentiles: Option<Vec<u32>>,
    pub noheaders: Option<bool>,
    pub show_footers: Option<bool>,
    pub decode_uri: Option<bool>,
    pub page: Option<usize>,
    pub output_file: Option<String>,
}

/// Keywords as a comma-separated string or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KeywordsValue {
    Joined(String),
    List(Vec<String>),
}

impl KeywordsValue {
    #[must_use]
    pub fn to_selection(&self) -> String {
        match self {
            KeywordsValue::Joined(value) => value.clone(),
            KeywordsValue::List(values) => values.join(","),
        }
    }
}
