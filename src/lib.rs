use {
    crate::{
        auth::AuthService,
        config::{SessionConfig, WafrConfig},
        directory::{UserDirectory, seed::seed_users},
        latency::{Clock, Delay, NoDelay, SystemClock, TokioDelay},
        report::ReportGenerator,
        session::{
            SessionStore,
            persistence::SqliteKeyValueStore,
            storage::{KeyValueStore, MemoryKeyValueStore},
        },
        store::{InMemoryUserStore, interface::UserStore},
    },
    std::sync::Arc,
    tracing::{error, info},
};

pub mod macros;

pub mod auth;
pub mod config;
pub mod directory;
pub mod latency;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod report;
pub mod session;
pub mod store;

/// The console's services, wired together.
pub struct Wafr {
    pub config: WafrConfig,
    pub directory: Arc<UserDirectory>,
    pub auth: Arc<AuthService>,
    pub reports: ReportGenerator,
}

impl Wafr {
    pub fn new(config: WafrConfig) -> Self {
        let delay: Arc<dyn Delay> = if config.latency.enabled {
            Arc::new(TokioDelay)
        } else {
            Arc::new(NoDelay)
        };
        let session_backend = open_session_backend(&config.session);

        Self::with_parts(config, delay, Arc::new(SystemClock), session_backend)
    }

    pub fn with_parts(
        config: WafrConfig,
        delay: Arc<dyn Delay>,
        clock: Arc<dyn Clock>,
        session_backend: Arc<dyn KeyValueStore>,
    ) -> Self {
        let latency = config.latency.to_latency();

        let store = Arc::new(InMemoryUserStore::new(seed_users()));
        let user_count = store.len();
        let directory = Arc::new(UserDirectory::new(
            store,
            delay.clone(),
            clock.clone(),
            latency,
        ));

        let auth = Arc::new(AuthService::new(
            config.auth.clone(),
            SessionStore::new(session_backend),
            delay,
            latency,
        ));

        let reports = ReportGenerator::new(clock, config.report.rows_per_page);

        info!(
            "Initializing with {} users, session {}",
            user_count,
            if auth.current().is_authenticated() {
                "restored"
            } else {
                "anonymous"
            }
        );

        Wafr {
            config,
            directory,
            auth,
            reports,
        }
    }
}

/// Opens the SQLite session file, falling back to a process-local store.
fn open_session_backend(config: &SessionConfig) -> Arc<dyn KeyValueStore> {
    match SqliteKeyValueStore::new(&config.db_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(
                "Failed to open session store at {}: {e}; session will not persist",
                config.db_path
            );
            Arc::new(MemoryKeyValueStore::default())
        }
    }
}
