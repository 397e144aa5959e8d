//! format-dispatch command-line tool
//!
//! Encodes JSON input as JSON, XML or base64 BSON, and decodes any of those
//! back into JSON.
//!
//! # Usage
//!
//! ```bash
//! echo '{"x":1,"y":2}' | format-dispatch encode --format bson
//! format-dispatch decode --format xml --input point.xml --pretty
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod cli;

use cli::CliInterface;
use format_dispatch::error::Result;

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Run the selected subcommand
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    cli.run()
}

/// Initialize logging system based on configuration and verbosity flags
///
/// `RUST_LOG` takes precedence over the configured level when set. Logs go
/// to stderr so they never mix with encoded output.
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
