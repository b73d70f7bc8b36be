use crate::domain::{
    models::booking::{BookingRecord, BookingRequest, LedgerField, LedgerRow, RowKey},
    ports::LedgerRepository,
    services::admission::{event_id, Admission, AdmissionCalculator},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

pub struct SqliteLedgerRepo {
    pool: SqlitePool,
}

impl SqliteLedgerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn insert_row(conn: &mut SqliteConnection, record: &BookingRecord) -> Result<i64, AppError> {
    let result = sqlx::query(
        r#"INSERT INTO ledger (date, event_title, start_time, end_time, max_participants, participant_name, class_category, status,
                               attended, cancelled, venue, room, price_per_seat, venue_cost, event_id, note, introducer)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#
    )
        .bind(&record.date).bind(&record.event_title).bind(&record.start_time).bind(&record.end_time)
        .bind(record.max_participants).bind(&record.participant_name)
        .bind(record.class_category.as_str()).bind(record.status.as_str())
        .bind(record.attended).bind(record.cancelled)
        .bind(&record.venue).bind(&record.room)
        .bind(record.price_per_seat).bind(record.venue_cost)
        .bind(&record.event_id).bind(&record.note).bind(&record.introducer)
        .execute(conn)
        .await?;
    Ok(result.last_insert_rowid())
}

#[async_trait]
impl LedgerRepository for SqliteLedgerRepo {
    async fn list_all(&self) -> Result<Vec<BookingRecord>, AppError> {
        let rows = sqlx::query_as::<_, LedgerRow>("SELECT * FROM ledger ORDER BY row_index ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(BookingRecord::from).collect())
    }

    async fn append(&self, record: &BookingRecord) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;
        let row_index = insert_row(&mut *conn, record).await?;
        debug!("Ledger row {} appended for {}", row_index, record.event_id);
        Ok(())
    }

    async fn admit(&self, request: &BookingRequest, calculator: &AdmissionCalculator) -> Result<Admission, AppError> {
        let event_id = event_id(&request.date, &request.event_title);
        let mut tx = self.pool.begin().await?;

        // Writing first takes SQLite's write lock, so concurrent admissions
        // queue here instead of reading a stale occurrence.
        sqlx::query(
            "INSERT INTO occurrence_locks (event_id, admissions) VALUES (?, 1)
             ON CONFLICT(event_id) DO UPDATE SET admissions = occurrence_locks.admissions + 1"
        )
            .bind(&event_id)
            .execute(&mut *tx)
            .await?;

        let snapshot: Vec<BookingRecord> = sqlx::query_as::<_, LedgerRow>("SELECT * FROM ledger WHERE event_id = ? ORDER BY row_index ASC")
            .bind(&event_id)
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .map(BookingRecord::from)
            .collect();

        let admission = calculator.admit(request, &snapshot)?;
        let row_index = insert_row(&mut *tx, &admission.record).await?;
        tx.commit().await?;

        info!("Ledger row {} admitted as #{} of {}", row_index, admission.ordinal, event_id);
        Ok(admission)
    }

    async fn set_flag(&self, key: &RowKey, field: LedgerField, value: bool) -> Result<(), AppError> {
        let sql = format!(
            "UPDATE ledger SET {} = ? WHERE row_index = (
                SELECT row_index FROM ledger
                WHERE date = ? AND event_title = ? AND start_time = ? AND participant_name = ?
                ORDER BY row_index ASC LIMIT 1)",
            field.column()
        );
        let result = sqlx::query(&sql)
            .bind(value)
            .bind(&key.date).bind(&key.event_title).bind(&key.start_time).bind(&key.participant_name)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }
        Ok(())
    }

    async fn set_flag_at(&self, position: i64, field: LedgerField, value: bool) -> Result<(), AppError> {
        if position < 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }
        let sql = format!(
            "UPDATE ledger SET {} = ? WHERE row_index = (
                SELECT row_index FROM ledger ORDER BY row_index ASC LIMIT 1 OFFSET ?)",
            field.column()
        );
        let result = sqlx::query(&sql)
            .bind(value)
            .bind(position)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }
        Ok(())
    }
}
