mod config;
mod formatters;
mod poller;

use config::Config;
use dotenv::dotenv;
use hwbot_rust_core::clients::{PracticumClient, TelegramClient};
use poller::StatusPoller;
use std::env;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Structured logging to stdout and a daily-rolling file: timestamp, level,
/// source location, message. The returned guard must stay alive for the
/// process lifetime or buffered file output is lost.
fn init_logging(log_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(log_dir, "status_poller.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    let guard = init_logging(Path::new(&log_dir));

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("configuration error: {err:#}");
            drop(guard);
            std::process::exit(1);
        }
    };

    info!("Starting homework status poller...");
    info!(
        "Config: endpoint={} interval={}s chat_id={}",
        cfg.endpoint,
        cfg.poll_interval.as_secs(),
        cfg.telegram_chat_id,
    );

    let practicum = PracticumClient::new(cfg.endpoint.clone(), cfg.practicum_token.clone());
    let telegram = TelegramClient::new(cfg.telegram_token.clone(), cfg.telegram_chat_id.clone());

    StatusPoller::new(practicum, telegram, cfg.poll_interval)
        .run()
        .await;
}
