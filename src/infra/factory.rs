use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::LedgerRepository;
use crate::domain::services::{
    admission::AdmissionCalculator, auth_service::AuthService, rate_table::VenueRateTable,
};
use crate::infra::repositories::{
    postgres_ledger_repo::PostgresLedgerRepo, sqlite_ledger_repo::SqliteLedgerRepo,
};

pub fn load_rate_table(config: &Config) -> VenueRateTable {
    match &config.venue_table_path {
        Some(path) => {
            info!("Loading venue rate table from {}", path);
            let json = std::fs::read_to_string(path).expect("Failed to read VENUE_TABLE_PATH");
            VenueRateTable::from_json(&json).expect("Invalid venue rate table JSON")
        }
        None => VenueRateTable::default(),
    }
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let ledger_repo: Arc<dyn LedgerRepository> =
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            info!("Initializing PostgreSQL connection...");

            let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
            opts = opts.log_statements(LevelFilter::Debug)
                .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect_with(opts)
                .await
                .expect("Failed to connect to Postgres");

            run_postgres_migrations(&pool).await;
            Arc::new(PostgresLedgerRepo::new(pool))
        } else {
            info!("Initializing SQLite connection with WAL Mode...");

            let opts = SqliteConnectOptions::from_str(database_url)
                .expect("Invalid SQLite connection string")
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(5))
                .log_statements(LevelFilter::Debug)
                .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

            let pool = SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(opts)
                .await
                .expect("Failed to connect to SQLite");

            run_sqlite_migrations(&pool).await;
            Arc::new(SqliteLedgerRepo::new(pool))
        };

    let rates = Arc::new(load_rate_table(config));
    info!("Venue rate table ready: {} venues", rates.definition().venues.len());

    AppState {
        config: config.clone(),
        ledger_repo,
        admission: AdmissionCalculator::new(rates),
        auth_service: Arc::new(AuthService::new(config)),
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
