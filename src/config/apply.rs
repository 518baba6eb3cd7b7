use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveUsize, TraceArgs};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values passed explicitly on the command line are left untouched.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    args: &mut TraceArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "format")
        && let Some(format) = config.format
    {
        args.format = format;
    }

    if !is_cli(matches, "keywords")
        && let Some(keywords) = config.keywords.as_ref()
    {
        args.keywords = keywords.to_selection();
    }

    if !is_cli(matches, "percentiles")
        && let Some(percentiles) = config.percentiles.clone()
    {
        args.percentiles = percentiles;
    }

    if !is_cli(matches, "no_headers")
        && let Some(no_headers) = config.noheaders
    {
        args.no_headers = no_headers;
    }

    if !is_cli(matches, "show_footers")
        && let Some(show_footers) = config.show_footers
    {
        args.show_footers = show_footers;
    }

    if !is_cli(matches, "decode_uri")
        && let Some(decode_uri) = config.decode_uri
    {
        args.decode_uri = decode_uri;
    }

    if !is_cli(matches, "page")
        && let Some(page) = config.page
    {
        args.page = ensure_positive_usize(page, "page")?;
    }

    if !is_cli(matches, "output_file")
        && let Some(output_file) = config.output_file.clone()
    {
        args.output_file = Some(output_file);
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_usize(value: usize, field: &'static str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive { field, source: err })
    })
}
