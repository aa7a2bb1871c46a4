//! Callback Kit CLI Application
//!
//! Command-line demo runner for the callback-core library. It loads a TOML
//! configuration (or a built-in default) and runs:
//! - A gated action with declarative success/error callbacks
//! - Closure factories and a stateful counter callback
//! - Delegated iteration over a timeline of tweets

use anyhow::Result;
use callback_core::sink;
use clap::Parser;
use std::path::PathBuf;
use std::rc::Rc;

mod callbacks;
mod config;
mod scenarios;

use scenarios::{Runner, Scenario};

/// Callback Kit - run callback, closure and delegation demos
#[derive(Parser, Debug)]
#[command(name = "callback-cli")]
#[command(about = "Run gated-action, closure and iteration-delegate demos", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (demo.toml); built-in defaults if omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scenario to run
    #[arg(short, long, value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,

    /// Identity presented to the gate (overrides the configuration)
    #[arg(long)]
    identity: Option<String>,

    /// Credential presented to the gate (overrides the configuration)
    #[arg(long)]
    credential: Option<String>,

    /// Prefix output lines with a UTC timestamp
    #[arg(long)]
    timestamps: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Callback Kit CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using callback-core library v{}", callback_core::VERSION);

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => {
            log::debug!("No configuration given, using built-in defaults");
            config::default_config()?
        }
    };

    if let Some(identity) = args.identity {
        config.gate.identity = identity;
    }
    if let Some(credential) = args.credential {
        config.gate.credential = credential;
    }
    if args.timestamps {
        config.output.timestamps = true;
    }

    let output = sink::from_config(&config.output);
    let runner = Runner::new(&config, Rc::clone(&output))?;
    runner.run(args.scenario)?;

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
