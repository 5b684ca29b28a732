pub mod cli;
pub mod config;
pub mod logging;

use acr_nema::{render, DecodeOutcome, Source, Status};
use anyhow::Context;
use std::io::Write;

use crate::cli::Cli;
use crate::config::Config;

/// Decode the input named on the command line and dump it to `out`.
///
/// A non-quiet decode status is reported on `err` after the dump, even when the
/// dump itself could not be written. Only operational failures (opening the input,
/// writing output) come back as errors; a decode that ended badly still returns
/// its status.
pub fn run<W: Write, E: Write>(
    cli: &Cli,
    config: &Config,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<Status> {
    let decode_options = cli.decode_options(&config.decode);
    let dump_options = cli.dump_options(&config.dump);
    decode_options.validate()?;
    dump_options.validate()?;

    let source = Source::open(cli.file.as_deref())?;

    // The source is consumed here and closed before rendering
    let outcome: DecodeOutcome = acr_nema::decode(source, &decode_options);
    if outcome.skipped > 0 {
        tracing::warn!("Skipped {} malformed records", outcome.skipped);
    }

    let rendered = render(&outcome.groups, out, &dump_options);

    if !outcome.status.is_quiet() {
        writeln!(err, "Finished with status '{}'", outcome.status)?;
    }

    rendered.context("Failed to write dump")?;
    Ok(outcome.status)
}
