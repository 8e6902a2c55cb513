use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Conversation, ConversationStatus, Message, MessageKind};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    pub item_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "itemName is required"))]
    pub item_name: String,
    pub owner_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "ownerName is required"))]
    pub owner_name: String,
    pub borrower_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "borrowerName is required"))]
    pub borrower_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub sender_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "senderName is required"))]
    pub sender_name: String,
    #[validate(length(min = 1, max = 5000, message = "content must be 1-5000 characters"))]
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConversationStatusRequest {
    pub status: ConversationStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FindConversationQuery {
    pub item_id: Uuid,
    pub borrower_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            conversation_id: message.conversation_id,
            sender_id: message.sender_id,
            sender_name: message.sender_name,
            content: message.content,
            kind: message.kind,
            metadata: message.metadata,
            is_read: message.is_read,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub borrower_id: Uuid,
    pub borrower_name: String,
    pub status: ConversationStatus,
    pub last_message: Option<MessageResponse>,
    /// Unread counterparty messages for the requesting user. Only a
    /// per-user listing has a viewer to count for; null elsewhere.
    pub unread_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationResponse {
    pub fn from_domain(conversation: Conversation, unread_count: Option<i64>) -> Self {
        Self {
            id: conversation.id,
            item_id: conversation.item_id,
            item_name: conversation.item_name,
            owner_id: conversation.owner_id,
            owner_name: conversation.owner_name,
            borrower_id: conversation.borrower_id,
            borrower_name: conversation.borrower_name,
            status: conversation.status,
            last_message: conversation
                .last_message
                .map(|snapshot| MessageResponse::from(snapshot.0)),
            unread_count,
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        }
    }
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self::from_domain(conversation, None)
    }
}
