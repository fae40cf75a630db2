//! Entry point of the `arbor` binary.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use arbor::ArborError;
use arbor_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);

    info!(input = args.input, output:? = args.output; "Arbor mind-map export");
    debug!(args:?; "Command line");

    match arbor_cli::run(&args) {
        Ok(()) => info!(input = args.input; "Mind map written"),
        Err(err) => {
            report(&err);
            process::exit(1);
        }
    }
}

/// Unknown level names fall back to `warn`.
fn init_logger(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level `{level}`, falling back to `warn`");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
}

/// Logs one report per outline diagnostic, or a single one for any other failure.
fn report(err: &ArborError) {
    let handler = miette::GraphicalReportHandler::new();
    let reportables = to_reportables(err);
    let count = reportables.len();

    for reportable in reportables {
        let mut rendered = String::new();
        if handler.render_report(&mut rendered, &reportable).is_err() {
            rendered = reportable.to_string();
        }
        error!("{rendered}");
    }
    debug!(reports = count; "Export aborted");
}
