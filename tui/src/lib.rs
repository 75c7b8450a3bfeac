// The banner is painted through crossterm commands on the stdout handle;
// stray println!/eprintln! would tear the raw-mode display.
#![deny(clippy::print_stdout, clippy::print_stderr)]

use std::io::IsTerminal;

use anyhow::Result;
use teletype_core::Typewriter;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;

pub use cli::Cli;

const LOG_FILE: &str = "teletype.log";

pub async fn run_main(cli: Cli) -> Result<()> {
    let _log_guard = init_logging()?;

    if !std::io::stdout().is_terminal() {
        // Precondition miss: the effect is decorative, so skip rather than
        // fail when there is no terminal to animate.
        info!("stdout is not a terminal; nothing to animate");
        return Ok(());
    }

    let Some(typewriter) = Typewriter::new(cli.messages(), cli.typewriter_config()) else {
        info!("no messages configured; nothing to animate");
        return Ok(());
    };

    app::run(typewriter).await
}

/// Route tracing output to a file when `RUST_LOG` is set; stdout is the
/// display surface and must stay clean.
fn init_logging() -> Result<Option<WorkerGuard>> {
    if std::env::var(EnvFilter::DEFAULT_ENV).is_err() {
        return Ok(None);
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}
