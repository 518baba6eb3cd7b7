use crate::error::{AppError, AppResult, ReportError};

use super::format::write_line;
use super::printer::Report;

const GRID_JS_SCRIPT: &str = "https://unpkg.com/gridjs/dist/gridjs.umd.js";
const GRID_JS_THEME: &str = "https://unpkg.com/gridjs/dist/theme/mermaid.min.css";

/// Standalone HTML page rendering `report` as a sortable, searchable,
/// paginated Grid.js table. Footers are not rendered.
pub(super) fn render_table_with_grid_js(
    title: &str,
    report: &Report,
    pagination_limit: usize,
) -> AppResult<String> {
    let columns = script_json(&report.headers)?;
    let data = script_json(&report.rows)?;
    let title = escape_html(title);

    let mut output = String::new();
    write_line(&mut output, "<!DOCTYPE html>")?;
    write_line(&mut output, "<html lang=\"en\">")?;
    write_line(&mut output, "<head>")?;
    write_line(&mut output, "<meta charset=\"utf-8\">")?;
    write_line(&mut output, &format!("<title>{}</title>", title))?;
    write_line(
        &mut output,
        &format!("<link href=\"{}\" rel=\"stylesheet\">", GRID_JS_THEME),
    )?;
    write_line(&mut output, "</head>")?;
    write_line(&mut output, "<body>")?;
    write_line(&mut output, &format!("<h1>{}</h1>", title))?;
    write_line(&mut output, "<div id=\"table\"></div>")?;
    write_line(
        &mut output,
        &format!("<script src=\"{}\"></script>", GRID_JS_SCRIPT),
    )?;
    write_line(&mut output, "<script>")?;
    write_line(&mut output, "new gridjs.Grid({")?;
    write_line(&mut output, &format!("  columns: {},", columns))?;
    write_line(&mut output, &format!("  data: {},", data))?;
    write_line(&mut output, "  search: true,")?;
    write_line(&mut output, "  sort: true,")?;
    write_line(
        &mut output,
        &format!("  pagination: {{ limit: {} }}", pagination_limit),
    )?;
    write_line(
        &mut output,
        "}).render(document.getElementById(\"table\"));",
    )?;
    write_line(&mut output, "</script>")?;
    write_line(&mut output, "</body>")?;
    write_line(&mut output, "</html>")?;
    Ok(output)
}

/// JSON literal safe to embed in a `<script>` element.
fn script_json<T>(value: &T) -> AppResult<String>
where
    T: serde::Serialize + ?Sized,
{
    let json = serde_json::to_string(value)
        .map_err(|err| AppError::report(ReportError::SerializeHtml { source: err }))?;
    Ok(json.replace('<', "\\u003c"))
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
