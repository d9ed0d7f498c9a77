/**
 * A personal expense tracker backed by a single CSV file.
 *
 * Every invocation loads the whole file, runs one command and, for the
 * mutating commands, rewrites the file in place before exiting.
 */
mod cli;
mod record;
mod storage;
mod tracker;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Quiet unless RUST_LOG says otherwise. Logs go to stderr so they never
    // mix with command output.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    cli::run(cli, std::io::stdout())?;
    Ok(())
}
