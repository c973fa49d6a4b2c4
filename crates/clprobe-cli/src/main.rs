//! `clprobe`: enumerate OpenCL platforms and devices.
//!
//! ```text
//! USAGE:
//!   clprobe        Print every platform and device with its capabilities
//! ```
//!
//! The report goes to standard output, diagnostics to standard error
//! (verbosity via `RUST_LOG`, default `warn`). Exit codes: 0 success,
//! 1 platform enumeration failure, 2 device enumeration failure,
//! 3 attribute-query failure.

use clap::Parser;
use clprobe_driver::{probe, ProbeError, SystemRuntime};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "clprobe",
    about = "OpenCL platform and device inspector",
    version
)]
struct Cli {}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let Cli {} = Cli::parse();

    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<u8, ProbeError> {
    let runtime = SystemRuntime::load()?;

    let stdout = io::stdout();
    let summary = probe(&runtime, &mut stdout.lock())?;

    if !summary.is_clean() {
        tracing::warn!(
            "{} of the queries failed; report is incomplete",
            summary.failures.len()
        );
    }

    Ok(summary.exit_code())
}
