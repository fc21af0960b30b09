use chrono::NaiveDate;
use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, SessionDetail, SessionSet, SessionSummary};

#[derive(Clone)]
pub struct SessionRepository {
    pool: DbPool,
}

impl SessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(
        &self,
        user_id: i64,
        workout_id: Option<i64>,
    ) -> Result<Vec<SessionSummary>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT ws.id, ws.workout_id, w.name AS workout_name,
                        ws.session_date, ws.notes,
                        COUNT(ss.id) AS total_sets,
                        COALESCE(SUM(ss.reps), 0) AS total_reps
                 FROM workout_sessions ws
                 JOIN workouts w ON w.id = ws.workout_id
                 LEFT JOIN session_sets ss ON ss.session_id = ws.id
                 WHERE ws.user_id = ?1 AND (?2 IS NULL OR ws.workout_id = ?2)
                 GROUP BY ws.id
                 ORDER BY ws.session_date DESC",
            )?;
            let sessions = stmt
                .query_map(
                    rusqlite::params![user_id, workout_id],
                    SessionSummary::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(sessions)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_detail(&self, id: i64, user_id: i64) -> Result<Option<SessionDetail>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let session: Option<(i64, String, NaiveDate, String)> = conn
                .query_row(
                    "SELECT ws.workout_id, w.name, ws.session_date, ws.notes
                     FROM workout_sessions ws
                     JOIN workouts w ON w.id = ws.workout_id
                     WHERE ws.id = ? AND ws.user_id = ?",
                    [id, user_id],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
                )
                .optional()?;

            let Some((workout_id, workout_name, session_date, notes)) = session else {
                return Ok(None);
            };

            let mut stmt = conn.prepare(
                "SELECT * FROM session_sets WHERE session_id = ? ORDER BY set_number ASC",
            )?;
            let sets = stmt
                .query_map([id], SessionSet::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(Some(SessionDetail {
                id,
                workout_id,
                workout_name,
                session_date,
                notes,
                sets,
            }))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Insert the session row and its sets in one transaction; a failure on
    /// any set leaves no partial session behind.
    pub async fn create(
        &self,
        user_id: i64,
        workout_id: i64,
        session_date: NaiveDate,
        notes: &str,
        sets: Vec<(i32, i32, f64)>,
    ) -> Result<SessionDetail> {
        let pool = self.pool.clone();
        let notes = notes.to_string();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            let workout_name: String = tx.query_row(
                "SELECT name FROM workouts WHERE id = ?",
                [workout_id],
                |row| row.get(0),
            )?;

            tx.execute(
                "INSERT INTO workout_sessions (workout_id, user_id, session_date, notes)
                 VALUES (?, ?, ?, ?)",
                rusqlite::params![workout_id, user_id, session_date, notes],
            )?;
            let session_id = tx.last_insert_rowid();

            let mut created = Vec::with_capacity(sets.len());
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO session_sets (session_id, set_number, reps, weight)
                     VALUES (?, ?, ?, ?)",
                )?;
                for (set_number, reps, weight) in sets {
                    stmt.execute(rusqlite::params![session_id, set_number, reps, weight])?;
                    created.push(SessionSet {
                        id: tx.last_insert_rowid(),
                        session_id,
                        set_number,
                        reps,
                        weight,
                    });
                }
            }

            tx.commit()?;

            Ok(SessionDetail {
                id: session_id,
                workout_id,
                workout_name,
                session_date,
                notes,
                sets: created,
            })
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Partial update of the session row; a supplied set list replaces all
    /// existing sets atomically with the row update. Returns false when no
    /// owned row matched.
    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        session_date: Option<NaiveDate>,
        notes: Option<String>,
        sets: Option<Vec<(i32, i32, f64)>>,
    ) -> Result<bool> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            let rows = tx.execute(
                "UPDATE workout_sessions
                 SET session_date = COALESCE(?1, session_date),
                     notes = COALESCE(?2, notes)
                 WHERE id = ?3 AND user_id = ?4",
                rusqlite::params![session_date, notes, id, user_id],
            )?;
            if rows == 0 {
                return Ok(false);
            }

            if let Some(sets) = sets {
                tx.execute("DELETE FROM session_sets WHERE session_id = ?", [id])?;
                let mut stmt = tx.prepare(
                    "INSERT INTO session_sets (session_id, set_number, reps, weight)
                     VALUES (?, ?, ?, ?)",
                )?;
                for (set_number, reps, weight) in sets {
                    stmt.execute(rusqlite::params![id, set_number, reps, weight])?;
                }
            }

            tx.commit()?;
            Ok(true)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Dependent sets are removed by schema-level cascade.
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<bool> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM workout_sessions WHERE id = ? AND user_id = ?",
                [id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
