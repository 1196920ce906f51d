use {
    crate::{latency::Latency, report::DEFAULT_ROWS_PER_PAGE},
    config::{Config, ConfigError, Environment, File, FileFormat},
    std::time::Duration,
};

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct WafrConfig {
    pub debug: bool,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
    pub latency: LatencyConfig,
    pub auth: AuthConfig,
    pub report: ReportConfig,
}

impl WafrConfig {
    /// Loads `config_path` if it exists, then applies `WAFR__*` environment
    /// overrides (e.g. `WAFR__SESSION__DB_PATH`).
    pub fn from_file(config_path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::new(config_path, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("WAFR").prefix_separator("__").separator("__"));

        let config: WafrConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            directory: "logs".to_string(),
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub db_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            db_path: "wafr-session.db".to_string(),
        }
    }
}

/// The single accepted credential pair.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub email: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            email: "admin@wafr.com".to_string(),
            password: "password123".to_string(),
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub rows_per_page: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

/// Simulated latency per operation, in milliseconds.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub enabled: bool,
    pub search_ms: u64,
    pub get_ms: u64,
    pub list_ms: u64,
    pub create_ms: u64,
    pub update_ms: u64,
    pub toggle_ms: u64,
    pub stats_ms: u64,
    pub sign_in_ms: u64,
    pub sign_in_federated_ms: u64,
    pub sign_out_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        let latency = Latency::default();
        let ms = |duration: Duration| duration.as_millis() as u64;

        LatencyConfig {
            enabled: true,
            search_ms: ms(latency.search),
            get_ms: ms(latency.get),
            list_ms: ms(latency.list),
            create_ms: ms(latency.create),
            update_ms: ms(latency.update),
            toggle_ms: ms(latency.toggle),
            stats_ms: ms(latency.stats),
            sign_in_ms: ms(latency.sign_in),
            sign_in_federated_ms: ms(latency.sign_in_federated),
            sign_out_ms: ms(latency.sign_out),
        }
    }
}

impl LatencyConfig {
    pub fn to_latency(&self) -> Latency {
        let ms = Duration::from_millis;

        Latency {
            search: ms(self.search_ms),
            get: ms(self.get_ms),
            list: ms(self.list_ms),
            create: ms(self.create_ms),
            update: ms(self.update_ms),
            toggle: ms(self.toggle_ms),
            stats: ms(self.stats_ms),
            sign_in: ms(self.sign_in_ms),
            sign_in_federated: ms(self.sign_in_federated_ms),
            sign_out: ms(self.sign_out_ms),
        }
    }
}
