use chrono::NaiveDate;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

/// One logged set within a session, ordered by `set_number`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSet {
    pub id: i64,
    pub session_id: i64,
    pub set_number: i32,
    pub reps: i32,
    pub weight: f64,
}

impl FromSqliteRow for SessionSet {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            session_id: row.get("session_id")?,
            set_number: row.get("set_number")?,
            reps: row.get("reps")?,
            weight: row.get("weight")?,
        })
    }
}

/// List-view row: session joined with its workout name plus set aggregates.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: i64,
    pub workout_id: i64,
    pub workout_name: String,
    pub session_date: NaiveDate,
    pub notes: String,
    pub total_sets: i64,
    pub total_reps: i64,
}

impl FromSqliteRow for SessionSummary {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            workout_id: row.get("workout_id")?,
            workout_name: row.get("workout_name")?,
            session_date: row.get("session_date")?,
            notes: row.get("notes")?,
            total_sets: row.get("total_sets")?,
            total_reps: row.get("total_reps")?,
        })
    }
}

/// Detail view: session with its full set list.
#[derive(Debug, Serialize)]
pub struct SessionDetail {
    pub id: i64,
    pub workout_id: i64,
    pub workout_name: String,
    pub session_date: NaiveDate,
    pub notes: String,
    pub sets: Vec<SessionSet>,
}

#[derive(Debug, Deserialize)]
pub struct SetInput {
    pub set_number: Option<i32>,
    pub reps: Option<i32>,
    pub weight: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSession {
    pub workout_id: Option<i64>,
    pub session_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub sets: Option<Vec<SetInput>>,
}

/// Partial update; a present `sets` list replaces all existing sets.
#[derive(Debug, Deserialize)]
pub struct UpdateSession {
    pub id: Option<i64>,
    pub session_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub sets: Option<Vec<SetInput>>,
}

/// Fill in defaults for incoming sets: `set_number` falls back to the
/// position index + 1, reps and weight to zero.
pub fn resolve_sets(sets: &[SetInput]) -> Vec<(i32, i32, f64)> {
    sets.iter()
        .enumerate()
        .map(|(idx, set)| {
            (
                set.set_number.unwrap_or(idx as i32 + 1),
                set.reps.unwrap_or(0),
                set.weight.unwrap_or(0.0),
            )
        })
        .collect()
}
