use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::AvailabilityStore;
use crate::domain::services::availability::AvailabilityService;
use crate::infra::repositories::{
    postgres_availability_store::PostgresAvailabilityStore, postgres_booking_repo::PostgresBookingRepo,
    postgres_exception_date_repo::PostgresExceptionDateRepo, postgres_restaurant_repo::PostgresRestaurantRepo,
    postgres_schedule_rule_repo::PostgresScheduleRuleRepo, postgres_season_repo::PostgresSeasonRepo,
    sqlite_availability_store::SqliteAvailabilityStore, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_exception_date_repo::SqliteExceptionDateRepo, sqlite_restaurant_repo::SqliteRestaurantRepo,
    sqlite_schedule_rule_repo::SqliteScheduleRuleRepo, sqlite_season_repo::SqliteSeasonRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections.unwrap_or(10))
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        postgres_state(config, pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections.unwrap_or(5))
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        sqlite_state(config, pool)
    }
}

pub fn sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    let store: Arc<dyn AvailabilityStore> = Arc::new(SqliteAvailabilityStore::new(pool.clone()));
    AppState {
        config: config.clone(),
        restaurant_repo: Arc::new(SqliteRestaurantRepo::new(pool.clone())),
        rule_repo: Arc::new(SqliteScheduleRuleRepo::new(pool.clone())),
        season_repo: Arc::new(SqliteSeasonRepo::new(pool.clone())),
        exception_repo: Arc::new(SqliteExceptionDateRepo::new(pool.clone())),
        booking_repo: Arc::new(SqliteBookingRepo::new(pool)),
        availability: Arc::new(availability_service(config, store)),
    }
}

pub fn postgres_state(config: &Config, pool: PgPool) -> AppState {
    let store: Arc<dyn AvailabilityStore> = Arc::new(PostgresAvailabilityStore::new(pool.clone()));
    AppState {
        config: config.clone(),
        restaurant_repo: Arc::new(PostgresRestaurantRepo::new(pool.clone())),
        rule_repo: Arc::new(PostgresScheduleRuleRepo::new(pool.clone())),
        season_repo: Arc::new(PostgresSeasonRepo::new(pool.clone())),
        exception_repo: Arc::new(PostgresExceptionDateRepo::new(pool.clone())),
        booking_repo: Arc::new(PostgresBookingRepo::new(pool)),
        availability: Arc::new(availability_service(config, store)),
    }
}

fn availability_service(config: &Config, store: Arc<dyn AvailabilityStore>) -> AvailabilityService {
    AvailabilityService::new(store, config.slot_interval_min, config.reference_party_size)
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
