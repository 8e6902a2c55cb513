use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, utoipa::ToSchema,
)]
#[sqlx(type_name = "conversation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Active,
    Completed,
    Cancelled,
    Archived,
}

impl ConversationStatus {
    /// Transition table: an active thread can complete, cancel or archive;
    /// closed threads can still be archived; archived is terminal.
    pub fn can_transition_to(self, next: ConversationStatus) -> bool {
        use ConversationStatus::*;
        matches!(
            (self, next),
            (Active, Completed | Cancelled | Archived) | (Completed | Cancelled, Archived)
        )
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
    utoipa::ToSchema,
)]
#[sqlx(type_name = "message_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    System,
    Request,
    Approval,
    Rejection,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub content: String,
    pub kind: MessageKind,
    /// Kind-specific payload, e.g. structured fields on request/approval
    /// messages. Opaque to this subsystem.
    pub metadata: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A messaging thread between an item's owner and a prospective borrower.
/// `last_message` is a denormalized snapshot of the most recent message,
/// refreshed in the same transaction as each append.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Conversation {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub borrower_id: Uuid,
    pub borrower_name: String,
    pub status: ConversationStatus,
    pub last_message: Option<Json<Message>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Ordered (min, max) form of the party pair, so (A,B) and (B,A) map to
    /// the same dedup key.
    pub fn party_pair(&self) -> (Uuid, Uuid) {
        if self.owner_id <= self.borrower_id {
            (self.owner_id, self.borrower_id)
        } else {
            (self.borrower_id, self.owner_id)
        }
    }

    pub fn involves(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id || self.borrower_id == user_id
    }
}
