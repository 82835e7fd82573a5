use crate::error::CliError;
use arith_codec_common::grid::GridLayout;
use bytesize::ByteSize;
use lightweight_mmap::handles::*;
use lightweight_mmap::mmap::*;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs a stderr logger; `RUST_LOG` overrides the default level.
///
/// The default level is `warn`, or `debug` when `verbose` is set. Logs never go to stdout,
/// which may carry image data.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    // A second initialisation (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Parses a `--layout` value.
pub fn parse_layout(value: &str) -> Result<GridLayout, String> {
    match value.to_lowercase().as_str() {
        "plain" => Ok(GridLayout::Plain),
        "blocked" => Ok(GridLayout::Blocked),
        _ => Err(format!(
            "Unknown layout: {value}. Valid options: plain, blocked"
        )),
    }
}

/// Treats a literal `-` as "no path", i.e. standard input or output.
pub fn path_or_std(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|path| path.as_os_str() != "-")
}

/// Calls `process` with the whole input.
///
/// Files are memory mapped; without a path, standard input is read to its end.
pub fn with_input<T>(
    input: Option<&Path>,
    process: impl FnOnce(&[u8]) -> Result<T, CliError>,
) -> Result<T, CliError> {
    let Some(path) = input else {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        return process(&buffer);
    };

    let handle = ReadOnlyFileHandle::open(path).map_err(|e| CliError::Mmap(e.to_string()))?;
    let size = handle.size().map_err(|e| CliError::Mmap(e.to_string()))? as usize;

    // Zero length mappings are rejected by the OS.
    if size == 0 {
        return process(&[]);
    }

    let mapping = ReadOnlyMmap::new(&handle, 0, size).map_err(|e| CliError::Mmap(e.to_string()))?;
    process(mapping.as_slice())
}

/// Writes `bytes` to the file at `output`, or to standard output without a path.
pub fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<(), CliError> {
    match output {
        Some(path) => fs::write(path, bytes)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Logs the sizes and duration of one conversion.
pub fn log_summary(operation: &str, input_len: usize, output_len: usize, elapsed: Duration) {
    info!(
        "{operation}: {} -> {} in {elapsed:.2?}",
        ByteSize(input_len as u64),
        ByteSize(output_len as u64),
    );
}
