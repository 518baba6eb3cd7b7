use std::fmt::Write as _;

use crate::error::{AppError, AppResult, ReportError};

pub(super) fn write_line(output: &mut String, line: &str) -> AppResult<()> {
    writeln!(output, "{}", line)
        .map_err(|err| AppError::report(ReportError::WriteLine { source: err }))
}

pub(super) fn formatted_line_with_diff(value: &str, diff: &str) -> String {
    format!("{} ({})", value, diff)
}
