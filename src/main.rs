mod cli;
use cli::{parse_cli_args, run_agenda_mode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let args = match parse_cli_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("Usage: crewcal [--agenda [YYYY/MM/DD]] [--demo]");
            return Ok(());
        }
    };

    run_agenda_mode(args).await
}

fn setup_logging() {
    let log_dir = dirs::config_dir()
        .map(|d| d.join("crewcal"))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "crewcal.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("crewcal started");
}
