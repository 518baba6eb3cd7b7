use super::*;
use crate::args::OutputFormat;
use crate::error::{AppError, AppResult, ValidationError};
use crate::stats::{ScenarioStat, TraceStats};
use chrono::Local;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn stat(identity: &str, count: usize, response_time: f64) -> ScenarioStat {
    ScenarioStat::from_samples(
        identity,
        vec![response_time; count],
        &[128.0],
        vec!["trace-1".to_owned()],
    )
}

fn printer(selection: &str, percentiles: &[u32], format: OutputFormat) -> AppResult<TracePrinter> {
    printer_with(selection, percentiles, format, PrintOptions::default())
}

fn printer_with(
    selection: &str,
    percentiles: &[u32],
    format: OutputFormat,
    options: PrintOptions,
) -> AppResult<TracePrinter> {
    let columns = KeywordSelection::resolve(selection, percentiles)
        .validate()
        .map_err(AppError::validation)?;
    Ok(TracePrinter::new(columns, percentiles, format, options))
}

fn render(
    printer: &TracePrinter,
    base: &TraceStats,
    compare_to: Option<&TraceStats>,
) -> AppResult<String> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut output = Vec::new();
    printer.print(&mut output, base, compare_to, &mut rng)?;
    String::from_utf8(output).map_err(|err| AppError::report(err.to_string()))
}

#[test]
fn keywords_and_headers_stay_aligned() -> AppResult<()> {
    for selection in ["all", "count,avg,p99", "count,bogus", "avg, ,max", ""] {
        let resolved = KeywordSelection::resolve(selection, &[90, 95, 99]);
        if resolved.keywords().len() != resolved.headers().len() {
            return Err(AppError::validation(format!(
                "Length mismatch for '{}'",
                selection
            )));
        }
    }
    Ok(())
}

#[test]
fn all_anywhere_selects_every_column() -> AppResult<()> {
    let percentiles = [50, 99];
    let resolved = KeywordSelection::resolve("count,all,bogus", &percentiles);
    if !resolved.is_all() || resolved.keywords() != trace_keywords(&percentiles).as_slice() {
        return Err(AppError::validation("Expected canonical keyword list"));
    }
    if resolved.headers() != trace_default_headers(&percentiles).as_slice() {
        return Err(AppError::validation("Expected canonical header list"));
    }
    let columns = resolved.validate().map_err(AppError::validation)?;
    if columns != trace_columns(&percentiles) {
        return Err(AppError::validation("Expected every column"));
    }
    Ok(())
}

#[test]
fn canonical_order_places_percentiles_after_avg() -> AppResult<()> {
    let keywords = trace_keywords(&[90, 95]);
    let expected = [
        "count",
        "uri_method_status",
        "min",
        "max",
        "sum",
        "avg",
        "p90",
        "p95",
        "stddev",
        "min_body",
        "max_body",
        "sum_body",
        "avg_body",
        "trace_id_sample",
    ];
    if keywords != expected {
        return Err(AppError::validation(format!(
            "Unexpected keywords {:?}",
            keywords
        )));
    }
    let headers = trace_headers_map(&[90]);
    if headers.get("p90").map(String::as_str) != Some("P90") {
        return Err(AppError::validation("Missing P90 header"));
    }
    Ok(())
}

#[test]
fn invalid_keywords_are_reported_together() -> AppResult<()> {
    let resolved = KeywordSelection::resolve("count,foo,avg,p42,bar", &[90]);
    match resolved.validate() {
        Err(err @ ValidationError::InvalidKeywords { .. }) => {
            if err.to_string() != "invalid keywords: foo,p42,bar" {
                return Err(AppError::validation(format!(
                    "Unexpected message '{}'",
                    err
                )));
            }
            Ok(())
        }
        Err(err) => Err(AppError::validation(format!("Unexpected error {}", err))),
        Ok(_) => Err(AppError::validation("Expected invalid keywords")),
    }
}

#[test]
fn empty_selection_is_rejected() -> AppResult<()> {
    match KeywordSelection::resolve(" , ", &[90]).validate() {
        Err(ValidationError::NoKeywords) => Ok(()),
        Err(err) => Err(AppError::validation(format!("Unexpected error {}", err))),
        Ok(_) => Err(AppError::validation("Expected empty selection error")),
    }
}

#[test]
fn selected_columns_render_in_selection_order() -> AppResult<()> {
    let mut samples = vec![0.034_64; 100];
    samples.extend(vec![0.098; 20]);
    let record = ScenarioStat::from_samples("GET /api/items 200", samples, &[], vec![]);
    let printer = printer("count,avg,p99", &[50, 99], OutputFormat::Csv)?;

    if printer.headers() != ["Count", "Avg", "P99"] {
        return Err(AppError::validation(format!(
            "Unexpected headers {:?}",
            printer.headers()
        )));
    }
    let mut rng = StdRng::seed_from_u64(1);
    let line = printer.generate_trace_line(&record, false, &mut rng);
    if line != ["120", "0.045", "0.098"] {
        return Err(AppError::validation(format!("Unexpected line {:?}", line)));
    }
    Ok(())
}

#[test]
fn csv_quotes_identities_containing_commas() -> AppResult<()> {
    let base = TraceStats::new(vec![
        stat("GET /search?q=a,b 200", 2, 0.1),
        stat("GET /plain 200", 1, 0.2),
    ]);
    let printer = printer("uri_method_status,count", &[], OutputFormat::Csv)?;
    let output = render(&printer, &base, None)?;
    let expected = "UriMethodStatus,Count\n\"GET /search?q=a,b 200\",2\nGET /plain 200,1\n";
    if output != expected {
        return Err(AppError::validation(format!("Unexpected csv '{}'", output)));
    }
    Ok(())
}

#[test]
fn tsv_leaves_identities_unquoted_and_honors_no_headers() -> AppResult<()> {
    let base = TraceStats::new(vec![stat("GET /search?q=a,b 200", 2, 0.1)]);
    let options = PrintOptions::new(true, true, false, DEFAULT_PAGINATION_LIMIT);
    let printer = printer_with("uri_method_status,count,min", &[], OutputFormat::Tsv, options)?;
    let output = render(&printer, &base, None)?;
    if output != "GET /search?q=a,b 200\t2\t0.100\n" {
        return Err(AppError::validation(format!("Unexpected tsv '{}'", output)));
    }
    Ok(())
}

#[test]
fn delimited_lines_have_one_cell_per_header() -> AppResult<()> {
    let base = TraceStats::new(vec![stat("GET /a 200", 3, 0.1), stat("POST /b 201", 1, 0.5)]);
    let printer = printer("all", &[90, 99], OutputFormat::Tsv)?;
    let output = render(&printer, &base, None)?;
    let width = printer.headers().len();
    for line in output.lines() {
        if line.split('\t').count() != width {
            return Err(AppError::validation(format!("Ragged line '{}'", line)));
        }
    }
    Ok(())
}

#[test]
fn diff_rows_annotate_numeric_cells() -> AppResult<()> {
    let from = TraceStats::new(vec![stat("GET /a 200", 100, 0.1)]);
    let to = TraceStats::new(vec![stat("GET /a 200", 150, 0.05), stat("GET /new 200", 3, 0.2)]);
    let printer = printer("uri_method_status,count,avg,trace_id_sample", &[], OutputFormat::Csv)?;
    let output = render(&printer, &from, Some(&to))?;
    let expected = concat!(
        "UriMethodStatus,Count,Avg,TraceIdSample\n",
        "GET /a 200,150 (+50),0.050 (-0.050),trace-1\n",
        "GET /new 200,3,0.200,trace-1\n",
    );
    if output != expected {
        return Err(AppError::validation(format!("Unexpected diff '{}'", output)));
    }
    Ok(())
}

#[test]
fn self_diff_reports_zero_deltas() -> AppResult<()> {
    let base = TraceStats::new(vec![stat("GET /a 200", 4, 0.25)]);
    let printer = printer("count,max,p90", &[90], OutputFormat::Csv)?;
    let mut rng = StdRng::seed_from_u64(3);
    let record = base
        .find("GET /a 200")
        .ok_or_else(|| AppError::validation("Missing record"))?;
    let line = printer.generate_trace_line_with_diff(record, record, false, &mut rng);
    if line != ["4 (+0)", "0.250 (+0.000)", "0.250 (+0.000)"] {
        return Err(AppError::validation(format!("Unexpected line {:?}", line)));
    }
    Ok(())
}

#[test]
fn seeded_rendering_is_repeatable() -> AppResult<()> {
    let record = ScenarioStat::from_samples(
        "GET /a 200",
        vec![0.1, 0.2],
        &[],
        vec!["t1".to_owned(), "t2".to_owned(), "t3".to_owned()],
    );
    let base = TraceStats::new(vec![record]);
    let printer = printer("all", &[90], OutputFormat::Csv)?;
    let first = render(&printer, &base, None)?;
    let second = render(&printer, &base, None)?;
    if first != second {
        return Err(AppError::validation("Rendering differs between runs"));
    }
    Ok(())
}

#[test]
fn footers_carry_only_the_total_count() -> AppResult<()> {
    let from = TraceStats::new(vec![stat("GET /a 200", 2, 0.1)]);
    let to = TraceStats::new(vec![stat("GET /a 200", 5, 0.1), stat("GET /b 200", 1, 0.1)]);
    let options = PrintOptions::new(false, true, false, DEFAULT_PAGINATION_LIMIT);
    let printer = printer_with("count,uri_method_status,avg", &[], OutputFormat::Table, options)?;

    let footer = printer.generate_trace_footer(&to.count_all());
    if footer != ["6", "", ""] {
        return Err(AppError::validation(format!("Unexpected footer {:?}", footer)));
    }
    let footer = printer.generate_trace_footer_with_diff(&from.count_all(), &to.count_all());
    if footer != ["6 (+4)", "", ""] {
        return Err(AppError::validation(format!("Unexpected footer {:?}", footer)));
    }

    let mut rng = StdRng::seed_from_u64(5);
    let report = printer.build_report(&from, Some(&to), false, &mut rng);
    if report.footer.as_deref() != Some(["6 (+4)".to_owned(), String::new(), String::new()].as_slice()) {
        return Err(AppError::validation("Report footer missing"));
    }
    let output = render(&printer, &from, Some(&to))?;
    let last_row = output
        .lines()
        .rev()
        .find(|line| line.starts_with('|'))
        .unwrap_or_default();
    if !last_row.contains("6 (+4)") {
        return Err(AppError::validation(format!("Footer not last row in '{}'", output)));
    }
    Ok(())
}

#[test]
fn markdown_blanks_repeated_cells_and_escapes_pipes() -> AppResult<()> {
    let base = TraceStats::new(vec![
        stat("GET /a|b 200", 1, 0.1),
        stat("GET /c 200", 1, 0.1),
    ]);
    let printer = printer("count,uri_method_status", &[], OutputFormat::Markdown)?;
    let output = render(&printer, &base, None)?;
    if !output.contains("GET /a\\|b 200") {
        return Err(AppError::validation(format!("Pipe not escaped in '{}'", output)));
    }
    let rows = output
        .lines()
        .filter(|line| line.contains("GET /"))
        .collect::<Vec<_>>();
    let [first, second] = rows.as_slice() else {
        return Err(AppError::validation(format!("Unexpected rows {:?}", rows)));
    };
    if !first.contains(" 1 ") || second.contains(" 1 ") {
        return Err(AppError::validation(format!(
            "Repeated count not merged in '{}'",
            output
        )));
    }
    Ok(())
}

#[test]
fn markdown_alias_parses_to_markdown() -> AppResult<()> {
    use clap::ValueEnum;
    let format = OutputFormat::from_str("md", true).map_err(AppError::validation)?;
    if format != OutputFormat::Markdown {
        return Err(AppError::validation("md should alias markdown"));
    }
    Ok(())
}

#[test]
fn html_embeds_rows_and_page_size() -> AppResult<()> {
    let base = TraceStats::new(vec![stat("GET /a,b 200", 1, 0.1)]);
    let options = PrintOptions::new(false, false, false, 25);
    let printer = printer_with("uri_method_status,count", &[], OutputFormat::Html, options)?;
    let output = render(&printer, &base, None)?;
    if !output.contains("pagination: { limit: 25 }") {
        return Err(AppError::validation("Missing pagination limit"));
    }
    if !output.contains(r#"["UriMethodStatus","Count"]"#)
        || !output.contains(r#"[["\"GET /a,b 200\"","1"]]"#)
    {
        return Err(AppError::validation(format!("Missing table data in '{}'", output)));
    }
    Ok(())
}

#[test]
fn decode_uri_applies_to_rendered_identity() -> AppResult<()> {
    let base = TraceStats::new(vec![stat("GET /caf%C3%A9 200", 1, 0.1)]);
    let options = PrintOptions::new(true, false, true, DEFAULT_PAGINATION_LIMIT);
    let printer = printer_with("uri_method_status", &[], OutputFormat::Tsv, options)?;
    let output = render(&printer, &base, None)?;
    if output != "GET /café 200\n" {
        return Err(AppError::validation(format!("Unexpected output '{}'", output)));
    }
    Ok(())
}

#[test]
fn pretty_output_goes_to_the_writer() -> AppResult<()> {
    let from = TraceStats::new(vec![stat("GET /a 200", 2, 0.1)]);
    let to = TraceStats::new(vec![stat("GET /a 200", 3, 0.0452), stat("GET /b 200", 1, 2.5)]);
    let printer = printer("all", &[90], OutputFormat::Pretty)?;

    let plain = render(&printer, &from, None)?;
    if !plain.contains("#1 GET /a 200") || !plain.contains("P90 100.0ms") {
        return Err(AppError::validation(format!("Unexpected pretty '{}'", plain)));
    }
    if plain.contains("Change:") {
        return Err(AppError::validation("Plain pretty output has changes"));
    }

    let diff = render(&printer, &from, Some(&to))?;
    if !diff.contains("#2 GET /b 200") || !diff.contains("45.2ms") || !diff.contains("2.50s") {
        return Err(AppError::validation(format!("Unexpected pretty '{}'", diff)));
    }
    if diff.matches("Change:").count() != 1 || !diff.contains("count +1") {
        return Err(AppError::validation(format!("Unexpected changes in '{}'", diff)));
    }
    Ok(())
}

#[test]
fn template_funcs_share_one_timestamp() -> AppResult<()> {
    let funcs = TemplateFuncs::new(Local::now());
    if funcs.current_date().is_empty() || funcs.rank(0) != 1 {
        return Err(AppError::validation("Unexpected template helpers"));
    }
    let base = TraceStats::new(vec![stat("GET /a 200", 1, 0.1)]);
    let mut rng = StdRng::seed_from_u64(9);
    let output = render_pretty(&funcs, &base, None, &[], false, &mut rng);
    if !output.contains(funcs.current_date()) {
        return Err(AppError::validation("Timestamp missing from report"));
    }
    Ok(())
}
