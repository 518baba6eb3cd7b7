use clap::Parser;

use super::parsers::{parse_bool_env, parse_percentile, parse_positive_usize};
use super::types::{OutputFormat, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Render per-endpoint latency statistics as tables, delimited text, HTML, or a readable summary, optionally diffed against a previous snapshot."
)]
pub struct TraceArgs {
    /// Snapshot to report on (TOML/JSON)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: String,

    /// Previous snapshot; when set, rows show the change from it
    #[arg(long = "from", value_name = "PATH")]
    pub from: Option<String>,

    /// Output format
    #[arg(long, short = 'f', default_value = "table", ignore_case = true)]
    pub format: OutputFormat,

    /// Comma-separated columns to show, or 'all'
    #[arg(long, short = 'o', default_value = "all")]
    pub keywords: String,

    /// Comma-separated percentiles to compute (e.g. 90,95,99)
    #[arg(
        long,
        default_value = "90,95,99",
        value_delimiter = ',',
        value_parser = parse_percentile
    )]
    pub percentiles: Vec<u32>,

    /// Omit the header line in TSV/CSV output
    #[arg(long = "noheaders")]
    pub no_headers: bool,

    /// Append a totals row to table/markdown output
    #[arg(long = "show-footers")]
    pub show_footers: bool,

    /// Percent-decode URIs before display
    #[arg(long = "decode-uri")]
    pub decode_uri: bool,

    /// Rows per page in HTML output
    #[arg(long, default_value = "100", value_parser = parse_positive_usize)]
    pub page: PositiveUsize,

    /// Write the report to this file instead of stdout
    #[arg(long = "output-file")]
    pub output_file: Option<String>,

    /// Path to config file (TOML/JSON). Defaults to ./tracestat.toml or ./tracestat.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by TRACESTAT_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
