use clap::Parser;
use mazeway::{
    app::{App, RunOutcome},
    config::{self, Config},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    let level = config::log_level(std::env::var(config::LOG_LEVEL_ENV).ok().as_deref())?;

    // Log to a file so that output does not interfere with the terminal animation
    let file_appender = tracing_appender::rolling::never(".", "mazeway.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    tracing::info!(?config, "starting mazeway");

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = App::new(config).run(std::io::stdout());
    App::restore_terminal(&mut stdout)?;

    match result? {
        RunOutcome::PathFound(len) => println!("Path found in {len} steps."),
        RunOutcome::NoPath => println!("No path found."),
        RunOutcome::Cancelled => println!("Cancelled."),
    }
    Ok(())
}
