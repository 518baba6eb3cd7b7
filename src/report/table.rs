use comfy_table::presets::{ASCII_FULL_CONDENSED, ASCII_MARKDOWN};
use comfy_table::{CellAlignment, ContentArrangement, Table};

use crate::error::AppResult;

use super::format::write_line;
use super::printer::Report;

pub(super) fn render_table(report: &Report) -> AppResult<String> {
    let mut table = new_table(&report.headers);
    table.load_preset(ASCII_FULL_CONDENSED);
    for row in &report.rows {
        table.add_row(row.clone());
    }
    if let Some(footer) = report.footer.as_ref() {
        table.add_row(footer.clone());
    }
    align_left(&mut table);

    let mut output = String::new();
    write_line(&mut output, &table.to_string())?;
    Ok(output)
}

/// Pipe table with vertically repeated cells merged into blanks.
pub(super) fn render_markdown(report: &Report) -> AppResult<String> {
    let mut table = new_table(&escape_cells(&report.headers));
    table.load_preset(ASCII_MARKDOWN);
    for row in merge_repeated_cells(&report.rows) {
        table.add_row(escape_cells(&row));
    }
    if let Some(footer) = report.footer.as_ref() {
        table.add_row(escape_cells(footer));
    }
    align_left(&mut table);

    let mut output = String::new();
    write_line(&mut output, &table.to_string())?;
    Ok(output)
}

fn new_table(headers: &[String]) -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(headers.to_vec());
    table
}

fn align_left(table: &mut Table) {
    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Left);
    }
}

/// Blank every non-empty cell equal to the cell directly above it.
pub(super) fn merge_repeated_cells(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut merged = Vec::with_capacity(rows.len());
    let mut previous: Option<&Vec<String>> = None;
    for row in rows {
        let cells = row
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let above = previous.and_then(|prev| prev.get(index));
                if !cell.is_empty() && above == Some(cell) {
                    String::new()
                } else {
                    cell.clone()
                }
            })
            .collect();
        merged.push(cells);
        previous = Some(row);
    }
    merged
}

fn escape_cells(cells: &[String]) -> Vec<String> {
    cells.iter().map(|cell| cell.replace('|', "\\|")).collect()
}
