use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

/// A single body-weight measurement; at most one per user per date.
#[derive(Debug, Clone, Serialize)]
pub struct WeightEntry {
    pub id: i64,
    pub user_id: i64,
    pub weight: f64,
    pub weight_date: NaiveDate,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromSqliteRow for WeightEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            weight: row.get("weight")?,
            weight_date: row.get("weight_date")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateWeightEntry {
    pub weight: Option<f64>,
    pub weight_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update; only supplied fields are written.
#[derive(Debug, Deserialize)]
pub struct UpdateWeightEntry {
    pub id: Option<i64>,
    pub weight: Option<f64>,
    pub weight_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
