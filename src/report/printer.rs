use std::io::Write;

use chrono::Local;
use rand::Rng;

use crate::args::OutputFormat;
use crate::error::{AppError, AppResult, ReportError};
use crate::stats::TraceStats;

use super::delimited::render_delimited;
use super::html::render_table_with_grid_js;
use super::keywords::Column;
use super::options::PrintOptions;
use super::pretty::{TemplateFuncs, render_pretty};
use super::table::{render_markdown, render_table};

/// Title of the generated HTML page.
const HTML_TITLE: &str = "tracestat";

/// Headers, rows, and optional footer shared by the row-based renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub footer: Option<Vec<String>>,
}

/// Renders snapshots in one output format for a validated column set.
#[derive(Debug, Clone)]
pub struct TracePrinter {
    columns: Vec<Column>,
    headers: Vec<String>,
    percentiles: Vec<u32>,
    format: OutputFormat,
    options: PrintOptions,
}

impl TracePrinter {
    #[must_use]
    pub fn new(
        columns: Vec<Column>,
        percentiles: &[u32],
        format: OutputFormat,
        options: PrintOptions,
    ) -> Self {
        let headers = columns
            .iter()
            .map(|column| column.header().into_owned())
            .collect();
        Self {
            columns,
            headers,
            percentiles: percentiles.to_vec(),
            format,
            options,
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    #[must_use]
    pub const fn options(&self) -> &PrintOptions {
        &self.options
    }

    pub const fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    /// Render `base`, or the diff from `base` to `compare_to`, into `writer`.
    ///
    /// In diff mode rows follow `compare_to`; records only in `base` are not
    /// shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be formatted or written.
    pub fn print<W, R>(
        &self,
        writer: &mut W,
        base: &TraceStats,
        compare_to: Option<&TraceStats>,
        rng: &mut R,
    ) -> AppResult<()>
    where
        W: Write + ?Sized,
        R: Rng + ?Sized,
    {
        let output = match self.format {
            OutputFormat::Table => render_table(&self.build_report(base, compare_to, false, rng))?,
            OutputFormat::Markdown => {
                render_markdown(&self.build_report(base, compare_to, false, rng))?
            }
            OutputFormat::Tsv => render_delimited(
                &self.build_report(base, compare_to, false, rng),
                "\t",
                self.options.no_headers,
            )?,
            OutputFormat::Csv => render_delimited(
                &self.build_report(base, compare_to, true, rng),
                ",",
                self.options.no_headers,
            )?,
            OutputFormat::Html => render_table_with_grid_js(
                HTML_TITLE,
                &self.build_report(base, compare_to, true, rng),
                self.options.pagination_limit,
            )?,
            OutputFormat::Pretty => {
                let funcs = TemplateFuncs::new(Local::now());
                render_pretty(
                    &funcs,
                    base,
                    compare_to,
                    &self.percentiles,
                    self.options.decode_uri,
                    rng,
                )
            }
        };

        writer
            .write_all(output.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|err| AppError::report(ReportError::WriteOutput { source: err }))
    }

    /// Build the shared row model.
    ///
    /// Without `compare_to` every record of `base` gets a plain row. With it,
    /// each record of `compare_to` is diffed against the first `base` record
    /// sharing its raw identity, or shown plain when there is none.
    #[must_use]
    pub fn build_report<R>(
        &self,
        base: &TraceStats,
        compare_to: Option<&TraceStats>,
        quote_uri: bool,
        rng: &mut R,
    ) -> Report
    where
        R: Rng + ?Sized,
    {
        let Some(to_stats) = compare_to else {
            let rows = base
                .scenarios()
                .iter()
                .map(|stat| self.generate_trace_line(stat, quote_uri, rng))
                .collect();
            let footer = self
                .options
                .show_footers
                .then(|| self.generate_trace_footer(&base.count_all()));
            return Report {
                headers: self.headers.clone(),
                rows,
                footer,
            };
        };

        let mut rows = Vec::with_capacity(to_stats.scenarios().len());
        for to in to_stats.scenarios() {
            let row = match base.find(to.uri_method_status()) {
                Some(from) => self.generate_trace_line_with_diff(from, to, quote_uri, rng),
                None => {
                    tracing::debug!(
                        "No previous record for '{}'; rendering without diff",
                        to.uri_method_status()
                    );
                    self.generate_trace_line(to, quote_uri, rng)
                }
            };
            rows.push(row);
        }
        let footer = self.options.show_footers.then(|| {
            self.generate_trace_footer_with_diff(&base.count_all(), &to_stats.count_all())
        });
        Report {
            headers: self.headers.clone(),
            rows,
            footer,
        }
    }
}
