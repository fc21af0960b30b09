use chrono::{DateTime, Duration, Utc};
use rand_core::{OsRng, RngCore};
use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct TokenRepository {
    pool: DbPool,
    ttl: Duration,
}

impl TokenRepository {
    pub fn new(pool: DbPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    /// Issue a fresh bearer token for a user. Existing tokens stay valid;
    /// one user may hold any number of concurrent tokens.
    pub async fn create(&self, user_id: i64) -> Result<String> {
        let pool = self.pool.clone();
        let token = generate_token();
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let token_clone = token.clone();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO auth_tokens (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
                rusqlite::params![token_clone, user_id, now, expires_at],
            )?;
            Ok(token_clone)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Resolve a token to its owner's (id, email). Returns `None` when the
    /// token is unknown or expired. Expired tokens are left in place; expiry
    /// is never extended by resolution.
    pub async fn find_valid(&self, token: &str) -> Result<Option<(i64, String)>> {
        let pool = self.pool.clone();
        let token = token.to_string();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let result: Option<(i64, String, DateTime<Utc>)> = conn
                .query_row(
                    "SELECT at.user_id, u.email, at.expires_at
                     FROM auth_tokens at
                     JOIN users u ON u.id = at.user_id
                     WHERE at.token = ?",
                    [&token],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
                )
                .optional()?;

            match result {
                Some((user_id, email, expires_at)) if expires_at > now => {
                    Ok(Some((user_id, email)))
                }
                _ => Ok(None),
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete a single token (logout). Deleting an absent token is a no-op.
    pub async fn delete(&self, token: &str) -> Result<()> {
        let pool = self.pool.clone();
        let token = token.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute("DELETE FROM auth_tokens WHERE token = ?", [&token])?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

/// 32 bytes of OS randomness, hex-encoded. Opaque bearer credential; validity
/// is purely a database lookup, so logout revokes immediately.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
