use {
    crate::config::LoggingConfig,
    chrono::Local,
    std::{
        fs::{self, OpenOptions},
        path::PathBuf,
        sync::Mutex,
    },
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

/// Installs the global subscriber: compact console output plus a daily file
/// under `config.directory`. `RUST_LOG` takes precedence over `debug`.
pub fn init_logging(config: &LoggingConfig, debug: bool) -> std::io::Result<PathBuf> {
    let log_dir = PathBuf::from(&config.directory);
    fs::create_dir_all(&log_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d");
    let log_file = log_dir.join(format!("{}.log", timestamp));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    let filter_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true)
        .compact();

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(false)
        .with_ansi(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::debug!("Logging to: {}", log_file.display());

    Ok(log_file)
}
