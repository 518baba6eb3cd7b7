use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

/// Run the `tracestat` binary from `dir` so no stray config file is picked up.
///
/// # Errors
///
/// Returns an error if the binary is missing or cannot be spawned.
pub fn run_tracestat<I, S>(dir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = tracestat_bin()?;
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "error")
        .env_remove("TRACESTAT_LOG")
        .env_remove("NO_COLOR")
        .output()
        .map_err(|err| format!("run tracestat failed: {}", err))
}

fn tracestat_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_tracestat").map_or_else(
        || Err("CARGO_BIN_EXE_tracestat missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

pub fn stdout_of(output: &Output) -> Result<String, String> {
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    String::from_utf8(output.stdout.clone()).map_err(|err| format!("stdout not utf-8: {}", err))
}
