use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, WeightEntry};

const DUPLICATE_DATE: &str = "Weight entry already exists for this date";

#[derive(Clone)]
pub struct WeightRepository {
    pool: DbPool,
}

impl WeightRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All entries for a user, newest date first, optionally restricted to an
    /// inclusive date range.
    pub async fn find_all(
        &self,
        user_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<WeightEntry>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT * FROM weight_tracking
                 WHERE user_id = ?1
                   AND (?2 IS NULL OR weight_date >= ?2)
                   AND (?3 IS NULL OR weight_date <= ?3)
                 ORDER BY weight_date DESC",
            )?;
            let entries = stmt
                .query_map(
                    rusqlite::params![user_id, start_date, end_date],
                    WeightEntry::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Option<WeightEntry>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT * FROM weight_tracking WHERE id = ? AND user_id = ?")?;
            let result = stmt
                .query_row([id, user_id], WeightEntry::from_row)
                .optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Insert an entry; the `(user_id, weight_date)` unique constraint
    /// surfaces as a conflict.
    pub async fn create(
        &self,
        user_id: i64,
        weight: f64,
        weight_date: NaiveDate,
        notes: &str,
    ) -> Result<WeightEntry> {
        let pool = self.pool.clone();
        let notes = notes.to_string();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let result = conn.execute(
                "INSERT INTO weight_tracking (user_id, weight, weight_date, notes, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![user_id, weight, weight_date, notes, now, now],
            );
            match result {
                Ok(_) => Ok(WeightEntry {
                    id: conn.last_insert_rowid(),
                    user_id,
                    weight,
                    weight_date,
                    notes,
                    created_at: now,
                    updated_at: now,
                }),
                Err(ref e) if AppError::is_unique_violation(e) => {
                    Err(AppError::Conflict(DUPLICATE_DATE.to_string()))
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Partial update: `None` fields keep their current value. Returns false
    /// when no owned row matched; a date collision surfaces as a conflict.
    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        weight: Option<f64>,
        weight_date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> Result<bool> {
        let pool = self.pool.clone();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let result = conn.execute(
                "UPDATE weight_tracking
                 SET weight = COALESCE(?1, weight),
                     weight_date = COALESCE(?2, weight_date),
                     notes = COALESCE(?3, notes),
                     updated_at = ?4
                 WHERE id = ?5 AND user_id = ?6",
                rusqlite::params![weight, weight_date, notes, now, id, user_id],
            );
            match result {
                Ok(rows) => Ok(rows > 0),
                Err(ref e) if AppError::is_unique_violation(e) => {
                    Err(AppError::Conflict(DUPLICATE_DATE.to_string()))
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, id: i64, user_id: i64) -> Result<bool> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM weight_tracking WHERE id = ? AND user_id = ?",
                [id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
