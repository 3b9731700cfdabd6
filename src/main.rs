use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};
mod app;
mod config;
mod error;
mod model;
mod services;
mod tui;
mod utils;

use app::App;
use config::Config;
use services::create_device_source;

#[derive(Parser, Debug)]
#[command(name = "xinput-tui")]
#[command(version, about = "Inspect and edit input device properties via xinput")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "xinput-tui.toml")]
    config: String,

    /// Dry run: demo devices instead of xinput
    #[arg(long)]
    dry_run: bool,

    /// Log level (defaults to the configured one)
    #[arg(long)]
    log_level: Option<String>,

    /// Path to the xinput binary
    #[arg(long)]
    xinput: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let mut config = Config::load(&args.config)?;
    config.override_binary(args.xinput.as_deref());

    // Инициализация системы логирования
    let level = args.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    init_tracing(&level, &config.log_file())?;

    info!("Запуск xinput-tui v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - вместо xinput используются демонстрационные устройства");
    } else {
        utils::environment::check_environment(&config.xinput.binary)?;
    }

    let source = create_device_source(&config, args.dry_run);
    let mut app = App::new(source, config, &args.config);

    tui::run(&mut app).await?;

    info!("xinput-tui завершил работу");
    Ok(())
}

fn init_tracing(level: &str, log_file: &Path) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Не удалось открыть файл журнала {:?}", log_file))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}
