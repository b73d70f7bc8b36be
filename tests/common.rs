use class_booking::{
    api::router::create_router,
    state::AppState,
    config::Config,
    domain::ports::LedgerRepository,
    domain::services::{
        admission::AdmissionCalculator, auth_service::AuthService, rate_table::VenueRateTable,
    },
    infra::repositories::sqlite_ledger_repo::SqliteLedgerRepo,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::Value;

#[allow(dead_code)]
pub const ADMIN_PASSWORD: &str = "studio-admin";
#[allow(dead_code)]
pub const USER_PASSWORD: &str = "lets-dance";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            admin_password: ADMIN_PASSWORD.to_string(),
            user_password: USER_PASSWORD.to_string(),
            studio_timezone: "Asia/Tokyo".to_string(),
            venue_table_path: None,
        };

        let ledger_repo: Arc<dyn LedgerRepository> = Arc::new(SqliteLedgerRepo::new(pool.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            ledger_repo,
            admission: AdmissionCalculator::new(Arc::new(VenueRateTable::default())),
            auth_service: Arc::new(AuthService::new(&config)),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn book(&self, payload: Value) -> Response {
        self.send("POST", "/api/v1/bookings", Some(payload)).await
    }

    pub async fn list(&self, query: &str) -> Value {
        let response = self.send("GET", &format!("/api/v1/bookings{}", query), None).await;
        assert!(response.status().is_success(), "list failed: {}", response.status());
        parse_body(response).await
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A complete booking body for the PARK studio, room D, 90 minutes.
#[allow(dead_code)]
pub fn booking_payload(event: &str, date: &str, nick_name: &str) -> Value {
    serde_json::json!({
        "event": event,
        "date": date,
        "startTime": "07:00 PM",
        "endTime": "08:30 PM",
        "nickName": nick_name,
        "studio": "BUZZ池袋西口PARK",
        "room": "D",
        "note": "",
        "introducer": ""
    })
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
