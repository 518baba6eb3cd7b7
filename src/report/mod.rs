//! Column selection, row generation, and the output renderers.
mod delimited;
mod format;
mod html;
mod keywords;
mod line;
mod options;
mod pretty;
mod printer;
mod table;
pub mod units;

#[cfg(test)]
mod tests;

pub use keywords::{
    ALL_KEYWORD, Column, KeywordSelection, trace_columns, trace_default_headers,
    trace_headers_map, trace_keywords,
};
pub use options::{DEFAULT_PAGINATION_LIMIT, PrintOptions};
pub use pretty::{TemplateFuncs, render_pretty};
pub use printer::{Report, TracePrinter};
