use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

/// A named exercise-routine template.
#[derive(Debug, Clone, Serialize)]
pub struct Workout {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromSqliteRow for Workout {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkout {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Partial update; only supplied fields are written.
#[derive(Debug, Deserialize)]
pub struct UpdateWorkout {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
}
