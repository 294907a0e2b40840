//! Message repository: SQLite-backed [`MessageStore`].
//!
//! Uses SqlitePoolManager and the models (MessageRecord, MessageQuery, SearchQuery).
//! `message_id` is the primary key, so duplicate inserts are rejected by SQLite
//! itself. Rows are returned in rowid order, which is insertion order.

use async_trait::async_trait;
use message_core::Message;
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::models::{MessageQuery, MessageRecord, SearchQuery};
use crate::sqlite_pool::SqlitePoolManager;
use crate::store::{fold_case, MessageStore};

const SELECT_COLUMNS: &str =
    "SELECT message_id, session_id, content, sender, processed_at FROM messages";

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
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
            CREATE TABLE IF NOT EXISTS messages (
                message_id TEXT PRIMARY KEY,
                session_id TEXT NOT NULL,
                content TEXT NOT NULL,
                content_folded TEXT NOT NULL,
                sender TEXT NOT NULL,
                processed_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_session_id ON messages(session_id)")
            .execute(pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_messages_session_sender ON messages(session_id, sender)",
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    pub async fn get_by_id(&self, message_id: &str) -> Result<Option<Message>, StorageError> {
        let pool = self.pool_manager.pool();

        let record = sqlx::query_as::<_, MessageRecord>(&format!(
            "{} WHERE message_id = ?",
            SELECT_COLUMNS
        ))
        .bind(message_id)
        .fetch_optional(pool)
        .await?;

        record.map(Message::try_from).transpose()
    }

    pub async fn count_by_session(&self, session_id: &str) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE session_id = ?")
            .bind(session_id)
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }

    pub async fn count(&self) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    fn into_messages(records: Vec<MessageRecord>) -> Result<Vec<Message>, StorageError> {
        records.into_iter().map(Message::try_from).collect()
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn insert(&self, message: Message) -> Result<Message, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query(
            r#"
            INSERT INTO messages (message_id, session_id, content, content_folded, sender, processed_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.message_id)
        .bind(&message.session_id)
        .bind(&message.content)
        .bind(fold_case(&message.content))
        .bind(message.sender.as_str())
        .bind(message.processed_at)
        .execute(pool)
        .await;

        match result {
            Ok(_) => {
                info!(
                    message_id = %message.message_id,
                    session_id = %message.session_id,
                    "Saved message"
                );
                Ok(message)
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                warn!(message_id = %message.message_id, "Duplicate message_id rejected");
                Err(StorageError::Duplicate(message.message_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_by_session(&self, query: &MessageQuery) -> Result<Vec<Message>, StorageError> {
        let pool = self.pool_manager.pool();
        let mut sql = format!("{} WHERE session_id = ?", SELECT_COLUMNS);

        if query.sender.is_some() {
            sql.push_str(" AND sender = ?");
        }

        sql.push_str(" ORDER BY rowid ASC LIMIT ? OFFSET ?");

        let mut query_builder = sqlx::query_as::<_, MessageRecord>(&sql).bind(&query.session_id);
        if let Some(sender) = query.sender {
            query_builder = query_builder.bind(sender.as_str());
        }
        let records = query_builder
            .bind(i64::from(query.limit))
            .bind(i64::from(query.offset))
            .fetch_all(pool)
            .await?;

        debug!(
            session_id = %query.session_id,
            count = records.len(),
            "Retrieved messages"
        );
        Self::into_messages(records)
    }

    async fn search_by_session(&self, query: &SearchQuery) -> Result<Vec<Message>, StorageError> {
        let pool = self.pool_manager.pool();
        let sql = format!(
            "{} WHERE session_id = ? AND instr(content_folded, ?) > 0 ORDER BY rowid ASC LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        );

        let records = sqlx::query_as::<_, MessageRecord>(&sql)
            .bind(&query.session_id)
            .bind(fold_case(&query.text))
            .bind(i64::from(query.limit))
            .bind(i64::from(query.offset))
            .fetch_all(pool)
            .await?;

        debug!(
            session_id = %query.session_id,
            count = records.len(),
            "Found messages matching '{}'",
            query.text
        );
        Self::into_messages(records)
    }
}
