mod commands;
mod logging;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::logging::init_logging;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Debug, Parser)]
#[command(version, about)]
/// mafdb, turn annotation files into database rows.
///
/// mafdb reads tab separated records, such as Mutation Annotation Format (MAF) files,
/// and writes bulk `INSERT` statements for a root table and every table decomposed
/// from its list and key/value columns.
pub struct Args {
    #[arg(long, env = "MAFDB_LOG_LEVEL", default_value = "info")]
    /// Set the log level.
    ///
    /// A bare level such as `debug` applies to the mafdb crates only, other
    /// crates log warnings. Full filter directives are also accepted, for example
    /// `info,mafdb_table=debug` will display all logs at `info` level severity and
    /// above, and the per-table decomposition logs of the table engine.
    log_level: String,
    #[arg(long, env = "MAFDB_LOG_JSON")]
    /// Emit logs in JSON format rather than as plain text.
    log_json: bool,
    #[arg(long, env = "MAFDB_LOG_NO_ANSI")]
    /// Disable ANSI colour codes being present in the logs.
    ///
    /// ANSI codes can cause rendering issues on various observability platforms
    /// or text file logging due to its escape sequences.
    log_no_ansi: bool,
    #[command(subcommand)]
    command: commands::Commands,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args).context("Init logging")?;

    info!("mafdb v{}", env!("CARGO_PKG_VERSION"));

    args.command.display_startup_message();
    args.command.execute()
}
