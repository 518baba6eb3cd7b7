use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use rand::thread_rng;

use tracestat::args::TraceArgs;
use tracestat::config::{apply_config, load_config};
use tracestat::error::{AppError, AppResult, ReportError};
use tracestat::report::{KeywordSelection, PrintOptions, TracePrinter};
use tracestat::stats::{TraceStats, load_snapshot};

/// Snapshot to render plus the optional snapshot it is compared against.
struct SnapshotPair {
    base: TraceStats,
    compare_to: Option<TraceStats>,
}

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose, args.no_color);

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    let printer = build_printer(&args)?;
    let snapshots = load_snapshots(&args)?;
    let mut rng = thread_rng();

    let Some(path) = args.output_file.as_deref() else {
        let stdout = std::io::stdout();
        let mut writer = stdout.lock();
        return render(&printer, &mut writer, &snapshots, &mut rng);
    };

    let file = File::create(path).map_err(|err| {
        AppError::report(ReportError::CreateOutput {
            path: Path::new(path).to_path_buf(),
            source: err,
        })
    })?;
    let mut writer = BufWriter::new(file);
    render(&printer, &mut writer, &snapshots, &mut rng)?;
    tracing::info!("Report written to {}", path);
    Ok(())
}

fn parse_args() -> AppResult<Option<(TraceArgs, ArgMatches)>> {
    let mut cmd = TraceArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = TraceArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--")
}

fn build_printer(args: &TraceArgs) -> AppResult<TracePrinter> {
    let selection = KeywordSelection::resolve(&args.keywords, &args.percentiles);
    let columns = selection.validate().map_err(|err| {
        tracing::error!("{}", err);
        AppError::validation(err)
    })?;
    tracing::debug!(
        "Rendering {} columns as {}",
        columns.len(),
        args.format.as_str()
    );

    let options = PrintOptions::new(
        args.no_headers,
        args.show_footers,
        args.decode_uri,
        args.page.get(),
    );
    Ok(TracePrinter::new(
        columns,
        &args.percentiles,
        args.format,
        options,
    ))
}

fn load_snapshots(args: &TraceArgs) -> AppResult<SnapshotPair> {
    let current = load_snapshot(Path::new(&args.snapshot))?;
    let Some(from) = args.from.as_deref() else {
        return Ok(SnapshotPair {
            base: current,
            compare_to: None,
        });
    };
    Ok(SnapshotPair {
        base: load_snapshot(Path::new(from))?,
        compare_to: Some(current),
    })
}

fn render<W, R>(
    printer: &TracePrinter,
    writer: &mut W,
    snapshots: &SnapshotPair,
    rng: &mut R,
) -> AppResult<()>
where
    W: Write + ?Sized,
    R: rand::Rng + ?Sized,
{
    printer.print(
        writer,
        &snapshots.base,
        snapshots.compare_to.as_ref(),
        rng,
    )
}
