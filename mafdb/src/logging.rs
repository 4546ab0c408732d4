use std::str::FromStr;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::Args;

/// The workspace crates a bare log level applies to.
const MAFDB_TARGETS: [&str; 3] = ["mafdb", "mafdb_reader", "mafdb_table"];

/// Initialises the global subscriber.
///
/// Logs are always written to stderr as stdout may carry the statements.
pub fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::from_str(&filter_directives(&args.log_level))
        .context("Parse log level")?;

    let builder = tracing_subscriber::fmt::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(args.log_level.contains('='))
        .with_ansi(!args.log_no_ansi);

    if args.log_json {
        builder.json().init();
    } else {
        builder.compact().init();
    }

    Ok(())
}

/// Scopes a bare level such as `debug` to the mafdb crates, every other
/// crate only logs warnings. Full directives are passed through unchanged.
fn filter_directives(log_level: &str) -> String {
    let log_level = log_level.trim();
    if log_level.contains(['=', ',']) {
        return log_level.to_string();
    }

    let scoped: Vec<String> = MAFDB_TARGETS
        .iter()
        .map(|target| format!("{target}={log_level}"))
        .collect();
    format!("warn,{}", scoped.join(","))
}
