use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use homework_bot::{
    get_bot_version, Config, Poller, PollerSettings, RecordingLogger, ReviewApiClient,
    TelegramClient, TelegramNotifier,
};

/// Watches a homework submission and reports review status changes to Telegram
#[derive(Parser, Debug)]
#[command(name = "homework-bot")]
#[command(about = "Reports homework review status changes to Telegram", long_about = None)]
struct Cli {
    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,

    /// Initial from_date cursor in unix seconds (defaults to now)
    #[arg(long)]
    from_date: Option<i64>,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C, running until killed: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,homework_bot=debug,homework_core=debug".into()),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    info!("Starting homework status bot {}", get_bot_version());

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(severity = "critical", "{}. Bot stopped.", e);
            return Ok(ExitCode::SUCCESS);
        }
    };

    let recording_logger = if config.recording_enabled {
        match RecordingLogger::new(PathBuf::from(&config.recording_log_path)) {
            Ok(logger) => {
                info!(
                    "Recording enabled, logging to: {}",
                    config.recording_log_path
                );
                Some(logger)
            }
            Err(e) => {
                error!("Failed to initialize recording logger: {}", e);
                None
            }
        }
    } else {
        None
    };

    let review_client = ReviewApiClient::new_with_recording(
        config.practicum_endpoint.clone(),
        config.practicum_token.clone(),
        recording_logger.as_ref().map(|l| l.clone_for_middleware()),
    )?;

    let telegram_client = TelegramClient::new_with_recording(
        config.telegram_api_url.clone(),
        config.telegram_token.clone(),
        recording_logger.as_ref().map(|l| l.clone_for_middleware()),
    )?;
    let notifier = TelegramNotifier::new(telegram_client, config.telegram_chat_id.clone());

    let from_date = cli
        .from_date
        .unwrap_or_else(|| chrono::Utc::now().timestamp());
    let settings = PollerSettings::from_config(&config, from_date);

    info!(
        "Polling from_date={} every {}s ({:?} cursor)",
        from_date,
        settings.retry_period.as_secs(),
        settings.cursor_policy
    );

    let mut poller = Poller::new(review_client, notifier, settings);

    if cli.once {
        poller.poll_once().await;
    } else {
        poller.run_until(shutdown_signal()).await;
    }

    Ok(ExitCode::SUCCESS)
}
