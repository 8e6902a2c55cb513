use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::{ConversationRepository, ConversationWithUnread};
use crate::domain::{Conversation, ConversationStatus, Message};
use crate::error::{AppError, AppResult};

const CONVERSATION_COLUMNS: &str = "id, item_id, item_name, owner_id, owner_name, \
     borrower_id, borrower_name, status, last_message, created_at, updated_at";

pub struct ConversationRepositoryImpl {
    pool: PgPool,
}

impl ConversationRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for ConversationRepositoryImpl {
    async fn create_or_get(
        &self,
        conversation: &Conversation,
    ) -> AppResult<(Conversation, bool)> {
        let (party_lo, party_hi) = conversation.party_pair();

        // The unique index over (item_id, party_lo, party_hi) is the dedup
        // authority: concurrent calls race to the same key and exactly one
        // insert wins, the rest fall through to the fetch below.
        let inserted = sqlx::query_as::<_, Conversation>(&format!(
            r#"
            INSERT INTO conversations
                (id, item_id, item_name, owner_id, owner_name, borrower_id, borrower_name,
                 party_lo, party_hi, status, last_message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NULL, $11, $12)
            ON CONFLICT (item_id, party_lo, party_hi) DO NOTHING
            RETURNING {CONVERSATION_COLUMNS}
            "#
        ))
        .bind(conversation.id)
        .bind(conversation.item_id)
        .bind(&conversation.item_name)
        .bind(conversation.owner_id)
        .bind(&conversation.owner_name)
        .bind(conversation.borrower_id)
        .bind(&conversation.borrower_name)
        .bind(party_lo)
        .bind(party_hi)
        .bind(conversation.status)
        .bind(conversation.created_at)
        .bind(conversation.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(created) = inserted {
            return Ok((created, true));
        }

        let existing = sqlx::query_as::<_, Conversation>(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations \
             WHERE item_id = $1 AND party_lo = $2 AND party_hi = $3"
        ))
        .bind(conversation.item_id)
        .bind(party_lo)
        .bind(party_hi)
        .fetch_one(&self.pool)
        .await?;

        Ok((existing, false))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Conversation>> {
        let conversation = sqlx::query_as::<_, Conversation>(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(conversation)
    }

    async fn find_for_user(&self, user_id: Uuid) -> AppResult<Vec<ConversationWithUnread>> {
        let conversations = sqlx::query_as::<_, ConversationWithUnread>(&format!(
            r#"
            SELECT {CONVERSATION_COLUMNS},
                   (SELECT COUNT(*) FROM messages m
                     WHERE m.conversation_id = conversations.id
                       AND m.sender_id <> $1
                       AND NOT m.is_read) AS unread_count
            FROM conversations
            WHERE owner_id = $1 OR borrower_id = $1
            ORDER BY updated_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(conversations)
    }

    async fn find_for_item_and_party(
        &self,
        item_id: Uuid,
        party_id: Uuid,
    ) -> AppResult<Option<Conversation>> {
        let conversation = sqlx::query_as::<_, Conversation>(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations \
             WHERE item_id = $1 AND (owner_id = $2 OR borrower_id = $2)"
        ))
        .bind(item_id)
        .bind(party_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(conversation)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ConversationStatus,
    ) -> AppResult<Option<Conversation>> {
        let conversation = sqlx::query_as::<_, Conversation>(&format!(
            "UPDATE conversations SET status = $2, updated_at = $3 WHERE id = $1 \
             RETURNING {CONVERSATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(conversation)
    }

    async fn append_message(&self, message: &Message) -> AppResult<Message> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages
                (id, conversation_id, sender_id, sender_name, content, kind, metadata,
                 is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, conversation_id, sender_id, sender_name, content, kind, metadata,
                      is_read, created_at
            "#,
        )
        .bind(message.id)
        .bind(message.conversation_id)
        .bind(message.sender_id)
        .bind(&message.sender_name)
        .bind(&message.content)
        .bind(message.kind)
        .bind(&message.metadata)
        .bind(message.is_read)
        .bind(message.created_at)
        .fetch_one(&mut *tx)
        .await?;

        let summary = sqlx::query(
            "UPDATE conversations SET last_message = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(created.conversation_id)
        .bind(Json(&created))
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if summary.rows_affected() == 0 {
            // Parent vanished between the service check and this write;
            // dropping the transaction rolls the insert back.
            return Err(AppError::NotFound("conversation not found".to_string()));
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn list_messages(&self, conversation_id: Uuid) -> AppResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, conversation_id, sender_id, sender_name, content, kind, metadata,
                   is_read, created_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    async fn mark_read(&self, conversation_id: Uuid, reader_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = TRUE \
             WHERE conversation_id = $1 AND sender_id <> $2 AND NOT is_read",
        )
        .bind(conversation_id)
        .bind(reader_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
