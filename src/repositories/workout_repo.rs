use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, Workout};

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, user_id: i64) -> Result<Vec<Workout>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT * FROM workouts WHERE user_id = ? ORDER BY name ASC")?;
            let workouts = stmt
                .query_map([user_id], Workout::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(workouts)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Ownership and existence are checked together: a workout owned by
    /// another user is indistinguishable from a missing one.
    pub async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Option<Workout>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM workouts WHERE id = ? AND user_id = ?")?;
            let result = stmt
                .query_row([id, user_id], Workout::from_row)
                .optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, user_id: i64, name: &str, description: &str) -> Result<Workout> {
        let pool = self.pool.clone();
        let name = name.to_string();
        let description = description.to_string();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO workouts (user_id, name, description, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![user_id, name, description, now, now],
            )?;
            Ok(Workout {
                id: conn.last_insert_rowid(),
                user_id,
                name,
                description,
                created_at: now,
                updated_at: now,
            })
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Partial update: `None` fields keep their current value. Returns false
    /// when no owned row matched.
    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<bool> {
        let pool = self.pool.clone();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE workouts
                 SET name = COALESCE(?1, name),
                     description = COALESCE(?2, description),
                     updated_at = ?3
                 WHERE id = ?4 AND user_id = ?5",
                rusqlite::params![name, description, now, id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Dependent sessions and their sets are removed by schema-level cascade.
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<bool> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM workouts WHERE id = ? AND user_id = ?",
                [id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
