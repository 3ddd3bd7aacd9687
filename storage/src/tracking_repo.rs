//! Tracking repository: persistence and queries for tracked messages and opens.
//!
//! Uses SqlitePoolManager and the models (TrackedMessage, OpenEvent, PurgeOutcome).
//! External: SQLite via sqlx; callers go through the [`TrackingStore`] trait.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, Row, SqlitePool};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{OpenEvent, PurgeOutcome, TrackedMessage};
use crate::repository::TrackingStore;
use crate::sqlite_pool::SqlitePoolManager;

/// Ids per `IN (...)` lookup; stays under SQLite's bound-parameter limit.
const OPENS_BATCH_SIZE: usize = 500;

const MESSAGE_COLUMNS: &str = "tracking_id, subject, recipient, sent_at, sender_ip";

#[derive(Clone)]
pub struct TrackingRepository {
    pool_manager: SqlitePoolManager,
}

impl TrackingRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tracked_messages (
                tracking_id TEXT PRIMARY KEY,
                subject TEXT NOT NULL,
                recipient TEXT NOT NULL,
                sent_at TEXT NOT NULL,
                sender_ip TEXT
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS open_events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tracking_id TEXT NOT NULL
                    REFERENCES tracked_messages(tracking_id) ON DELETE CASCADE,
                opened_at TEXT NOT NULL,
                user_agent TEXT NOT NULL,
                ip TEXT NOT NULL,
                is_self INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_tracked_messages_sent_at ON tracked_messages(sent_at);
            CREATE INDEX IF NOT EXISTS idx_open_events_tracking_id ON open_events(tracking_id);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    /// Returns the underlying pool (used by tests and maintenance commands).
    pub fn pool(&self) -> &SqlitePool {
        self.pool_manager.pool()
    }

    async fn load_opens(&self, tracking_id: &str) -> Result<Vec<OpenEvent>, sqlx::Error> {
        sqlx::query_as::<_, OpenEvent>(
            "SELECT opened_at, user_agent, ip, is_self FROM open_events WHERE tracking_id = ? ORDER BY id ASC",
        )
        .bind(tracking_id)
        .fetch_all(self.pool())
        .await
    }

    /// Fills `opens` for every message with one query per batch of ids.
    async fn attach_opens(&self, messages: &mut [TrackedMessage]) -> Result<(), sqlx::Error> {
        let mut by_id: HashMap<String, Vec<OpenEvent>> = HashMap::new();

        for chunk in messages.chunks(OPENS_BATCH_SIZE) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "SELECT tracking_id, opened_at, user_agent, ip, is_self FROM open_events \
                 WHERE tracking_id IN ({}) ORDER BY id ASC",
                placeholders
            );
            let mut query = sqlx::query(&sql);
            for message in chunk {
                query = query.bind(&message.tracking_id);
            }

            for row in query.fetch_all(self.pool()).await? {
                let tracking_id: String = row.try_get("tracking_id")?;
                by_id
                    .entry(tracking_id)
                    .or_default()
                    .push(OpenEvent::from_row(&row)?);
            }
        }

        for message in messages.iter_mut() {
            message.opens = by_id.remove(&message.tracking_id).unwrap_or_default();
        }
        Ok(())
    }
}

#[async_trait]
impl TrackingStore for TrackingRepository {
    async fn create(&self, message: &TrackedMessage) -> Result<(), StorageError> {
        let mut tx = self.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO tracked_messages (tracking_id, subject, recipient, sent_at, sender_ip)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.tracking_id)
        .bind(&message.subject)
        .bind(&message.recipient)
        .bind(message.sent_at)
        .bind(&message.sender_ip)
        .execute(&mut *tx)
        .await?;

        for event in &message.opens {
            sqlx::query(
                "INSERT INTO open_events (tracking_id, opened_at, user_agent, ip, is_self) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&message.tracking_id)
            .bind(event.opened_at)
            .bind(&event.user_agent)
            .bind(&event.ip)
            .bind(event.is_self)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            tracking_id = %message.tracking_id,
            recipient = %message.recipient,
            "Saved tracked message"
        );
        Ok(())
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &str,
    ) -> Result<Option<TrackedMessage>, StorageError> {
        let sql = format!(
            "SELECT {} FROM tracked_messages WHERE tracking_id = ?",
            MESSAGE_COLUMNS
        );
        let message = sqlx::query_as::<_, TrackedMessage>(&sql)
            .bind(tracking_id)
            .fetch_optional(self.pool())
            .await?;

        match message {
            Some(mut message) => {
                message.opens = self.load_opens(tracking_id).await?;
                Ok(Some(message))
            }
            None => Ok(None),
        }
    }

    async fn append_open(
        &self,
        tracking_id: &str,
        event: &OpenEvent,
    ) -> Result<bool, StorageError> {
        // Single statement: the event lands only if the message exists.
        let result = sqlx::query(
            r#"
            INSERT INTO open_events (tracking_id, opened_at, user_agent, ip, is_self)
            SELECT tracking_id, ?, ?, ?, ? FROM tracked_messages WHERE tracking_id = ?
            "#,
        )
        .bind(event.opened_at)
        .bind(&event.user_agent)
        .bind(&event.ip)
        .bind(event.is_self)
        .bind(tracking_id)
        .execute(self.pool())
        .await?;

        let appended = result.rows_affected() > 0;
        debug!(tracking_id = %tracking_id, appended, "Append open event");
        Ok(appended)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<TrackedMessage>, StorageError> {
        let sql = format!(
            "SELECT {} FROM tracked_messages ORDER BY sent_at DESC, rowid DESC LIMIT ?",
            MESSAGE_COLUMNS
        );
        let mut messages = sqlx::query_as::<_, TrackedMessage>(&sql)
            .bind(i64::from(limit))
            .fetch_all(self.pool())
            .await?;

        self.attach_opens(&mut messages).await?;

        info!("Retrieved {} tracked messages", messages.len());
        Ok(messages)
    }

    async fn delete(&self, tracking_id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM tracked_messages WHERE tracking_id = ?")
            .bind(tracking_id)
            .execute(self.pool())
            .await?;

        let deleted = result.rows_affected() > 0;
        info!(tracking_id = %tracking_id, deleted, "Delete tracked message");
        Ok(deleted)
    }

    async fn remove_self_opens(&self, tracking_id: &str) -> Result<PurgeOutcome, StorageError> {
        let mut tx = self.pool().begin().await?;

        let exists: Option<(String,)> =
            sqlx::query_as("SELECT tracking_id FROM tracked_messages WHERE tracking_id = ?")
                .bind(tracking_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Err(StorageError::NotFound(tracking_id.to_string()));
        }

        let removed = sqlx::query("DELETE FROM open_events WHERE tracking_id = ? AND is_self = 1")
            .bind(tracking_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let remaining: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM open_events WHERE tracking_id = ?")
                .bind(tracking_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        info!(
            tracking_id = %tracking_id,
            removed,
            remaining = remaining.0,
            "Removed self-opens"
        );
        Ok(PurgeOutcome {
            removed,
            remaining: remaining.0.max(0) as u64,
        })
    }
}
