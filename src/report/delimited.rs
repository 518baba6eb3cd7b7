use crate::error::AppResult;

use super::format::write_line;
use super::printer::Report;

/// Header line (unless suppressed) and one line per row, cells joined by
/// `separator`. Footers are not part of delimited output.
pub(super) fn render_delimited(
    report: &Report,
    separator: &str,
    no_headers: bool,
) -> AppResult<String> {
    let mut output = String::new();
    if !no_headers {
        write_line(&mut output, &report.headers.join(separator))?;
    }
    for row in &report.rows {
        write_line(&mut output, &row.join(separator))?;
    }
    Ok(output)
}
