use acr_dump::cli::Cli;
use acr_dump::config::Config;
use clap::Parser;
use std::io::BufWriter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    acr_dump::logging::init(&config.logging, cli.verbose)?;

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = BufWriter::new(stdout.lock());
    acr_dump::run(&cli, &config, &mut out, &mut stderr.lock())?;
    Ok(())
}
