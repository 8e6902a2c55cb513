#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use hippo_backend::domain::{Conversation, ConversationStatus, Message};
use hippo_backend::error::{AppError, AppResult};
use hippo_backend::infrastructure::repositories::{ConversationRepository, ConversationWithUnread};
use sqlx::types::Json;
use uuid::Uuid;

/// In-memory stand-in for the Postgres conversation store. Mirrors the
/// storage-layer behavior the services rely on: unordered-pair dedup,
/// summary refresh on append, counterparty-only read flips.
#[derive(Default)]
pub struct MockConversationRepo {
    pub conversations: Mutex<Vec<Conversation>>,
    pub messages: Mutex<Vec<Message>>,
}

impl MockConversationRepo {
    pub fn conversation_count(&self) -> usize {
        self.conversations
            .lock()
            .expect("conversations mutex poisoned")
            .len()
    }

    pub fn add_conversation(&self, conversation: Conversation) {
        self.conversations
            .lock()
            .expect("conversations mutex poisoned")
            .push(conversation);
    }

    pub fn add_message(&self, message: Message) {
        self.messages
            .lock()
            .expect("messages mutex poisoned")
            .push(message);
    }

    pub fn message_snapshot(&self) -> Vec<Message> {
        self.messages
            .lock()
            .expect("messages mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl ConversationRepository for MockConversationRepo {
    async fn create_or_get(
        &self,
        conversation: &Conversation,
    ) -> AppResult<(Conversation, bool)> {
        let mut conversations = self
            .conversations
            .lock()
            .expect("conversations mutex poisoned");

        if let Some(existing) = conversations.iter().find(|c| {
            c.item_id == conversation.item_id && c.party_pair() == conversation.party_pair()
        }) {
            return Ok((existing.clone(), false));
        }

        conversations.push(conversation.clone());
        Ok((conversation.clone(), true))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Conversation>> {
        Ok(self
            .conversations
            .lock()
            .expect("conversations mutex poisoned")
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_for_user(&self, user_id: Uuid) -> AppResult<Vec<ConversationWithUnread>> {
        let messages = self.messages.lock().expect("messages mutex poisoned");
        let mut rows: Vec<ConversationWithUnread> = self
            .conversations
            .lock()
            .expect("conversations mutex poisoned")
            .iter()
            .filter(|c| c.involves(user_id))
            .map(|c| ConversationWithUnread {
                conversation: c.clone(),
                unread_count: messages
                    .iter()
                    .filter(|m| {
                        m.conversation_id == c.id && m.sender_id != user_id && !m.is_read
                    })
                    .count() as i64,
            })
            .collect();

        rows.sort_by(|a, b| b.conversation.updated_at.cmp(&a.conversation.updated_at));
        Ok(rows)
    }

    async fn find_for_item_and_party(
        &self,
        item_id: Uuid,
        party_id: Uuid,
    ) -> AppResult<Option<Conversation>> {
        Ok(self
            .conversations
            .lock()
            .expect("conversations mutex poisoned")
            .iter()
            .find(|c| {
                c.item_id == item_id && (c.owner_id == party_id || c.borrower_id == party_id)
            })
            .cloned())
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ConversationStatus,
    ) -> AppResult<Option<Conversation>> {
        let mut conversations = self
            .conversations
            .lock()
            .expect("conversations mutex poisoned");
        match conversations.iter_mut().find(|c| c.id == id) {
            Some(conversation) => {
                conversation.status = status;
                conversation.updated_at = Utc::now();
                Ok(Some(conversation.clone()))
            }
            None => Ok(None),
        }
    }

    async fn append_message(&self, message: &Message) -> AppResult<Message> {
        let mut conversations = self
            .conversations
            .lock()
            .expect("conversations mutex poisoned");
        let conversation = conversations
            .iter_mut()
            .find(|c| c.id == message.conversation_id)
            .ok_or_else(|| AppError::NotFound("conversation not found".to_string()))?;

        self.messages
            .lock()
            .expect("messages mutex poisoned")
            .push(message.clone());
        conversation.last_message = Some(Json(message.clone()));
        conversation.updated_at = Utc::now();
        Ok(message.clone())
    }

    async fn list_messages(&self, conversation_id: Uuid) -> AppResult<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .messages
            .lock()
            .expect("messages mutex poisoned")
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();

        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn mark_read(&self, conversation_id: Uuid, reader_id: Uuid) -> AppResult<u64> {
        let mut messages = self.messages.lock().expect("messages mutex poisoned");
        let mut flipped = 0;
        for message in messages
            .iter_mut()
            .filter(|m| m.conversation_id == conversation_id && m.sender_id != reader_id)
        {
            if !message.is_read {
                message.is_read = true;
                flipped += 1;
            }
        }
        Ok(flipped)
    }
}
