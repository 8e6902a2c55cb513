use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::api::dtos::{
    ConversationResponse, CreateConversationRequest, MessageResponse, SendMessageRequest,
};
use crate::domain::{Conversation, ConversationStatus, Message};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::ConversationRepository;

#[derive(Clone)]
pub struct MessagingService {
    conversation_repo: Arc<dyn ConversationRepository>,
}

impl MessagingService {
    pub fn new(conversation_repo: Arc<dyn ConversationRepository>) -> Self {
        Self { conversation_repo }
    }

    /// Finds the thread for this item and party pair, creating it if absent.
    /// Pair-symmetric: swapping owner and borrower matches the same thread.
    /// Returns whether this call created the conversation.
    pub async fn create_or_get(
        &self,
        request: CreateConversationRequest,
    ) -> AppResult<(ConversationResponse, bool)> {
        request.validate()?;

        let now = Utc::now();
        let candidate = Conversation {
            id: Uuid::new_v4(),
            item_id: request.item_id,
            item_name: request.item_name,
            owner_id: request.owner_id,
            owner_name: request.owner_name,
            borrower_id: request.borrower_id,
            borrower_name: request.borrower_name,
            status: ConversationStatus::Active,
            last_message: None,
            created_at: now,
            updated_at: now,
        };

        let (conversation, created) = self.conversation_repo.create_or_get(&candidate).await?;
        if created {
            info!(
                conversation_id = %conversation.id,
                item_id = %conversation.item_id,
                owner_id = %conversation.owner_id,
                borrower_id = %conversation.borrower_id,
                "conversation created"
            );
        } else {
            debug!(conversation_id = %conversation.id, "existing conversation returned");
        }

        Ok((conversation.into(), created))
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<ConversationResponse>> {
        let conversations = self.conversation_repo.find_for_user(user_id).await?;
        Ok(conversations
            .into_iter()
            .map(|row| ConversationResponse::from_domain(row.conversation, Some(row.unread_count)))
            .collect())
    }

    pub async fn get(&self, conversation_id: Uuid) -> AppResult<ConversationResponse> {
        let conversation = self
            .conversation_repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("conversation not found".to_string()))?;
        Ok(conversation.into())
    }

    pub async fn update_status(
        &self,
        conversation_id: Uuid,
        status: ConversationStatus,
    ) -> AppResult<ConversationResponse> {
        let conversation = self
            .conversation_repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("conversation not found".to_string()))?;

        // Re-asserting the current status is a no-op refresh; everything
        // else has to be a legal transition.
        if conversation.status != status && !conversation.status.can_transition_to(status) {
            return Err(AppError::Conflict(format!(
                "conversation cannot move from {} to {}",
                status_name(conversation.status),
                status_name(status)
            )));
        }

        let updated = self
            .conversation_repo
            .set_status(conversation_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("conversation not found".to_string()))?;
        Ok(updated.into())
    }

    /// Thread lookup for an item where the supplied id matches either role.
    /// A client uses this to find "my thread about this item" without
    /// knowing which side of it it is on.
    pub async fn find_for_item(
        &self,
        item_id: Uuid,
        party_id: Uuid,
    ) -> AppResult<Option<ConversationResponse>> {
        let conversation = self
            .conversation_repo
            .find_for_item_and_party(item_id, party_id)
            .await?;
        Ok(conversation.map(ConversationResponse::from))
    }

    pub async fn send_message(
        &self,
        conversation_id: Uuid,
        request: SendMessageRequest,
    ) -> AppResult<MessageResponse> {
        request.validate()?;

        // The parent must exist before anything is written; the append
        // itself re-checks inside its transaction.
        self.conversation_repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("conversation not found".to_string()))?;

        let message = Message {
            id: Uuid::new_v4(),
            conversation_id,
            sender_id: request.sender_id,
            sender_name: request.sender_name,
            content: request.content,
            kind: request.kind,
            metadata: request.metadata,
            is_read: false,
            created_at: Utc::now(),
        };

        let created = self.conversation_repo.append_message(&message).await?;
        info!(
            message_id = %created.id,
            conversation_id = %conversation_id,
            sender_id = %created.sender_id,
            "message sent"
        );
        Ok(created.into())
    }

    pub async fn list_messages(&self, conversation_id: Uuid) -> AppResult<Vec<MessageResponse>> {
        self.conversation_repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("conversation not found".to_string()))?;

        let messages = self.conversation_repo.list_messages(conversation_id).await?;
        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }

    /// Marks every message sent by the other party as read. Idempotent; the
    /// reader's own messages are never touched.
    pub async fn mark_read(&self, conversation_id: Uuid, reader_id: Uuid) -> AppResult<()> {
        self.conversation_repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("conversation not found".to_string()))?;

        let flipped = self
            .conversation_repo
            .mark_read(conversation_id, reader_id)
            .await?;
        debug!(
            conversation_id = %conversation_id,
            reader_id = %reader_id,
            flipped,
            "messages marked read"
        );
        Ok(())
    }
}

fn status_name(status: ConversationStatus) -> &'static str {
    match status {
        ConversationStatus::Active => "active",
        ConversationStatus::Completed => "completed",
        ConversationStatus::Cancelled => "cancelled",
        ConversationStatus::Archived => "archived",
    }
}
