use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::{Asset, Conversation, ConversationStatus, Loan, LoanStatus, Message, User};
use crate::error::AppResult;

/// A conversation joined with the viewer-specific count of unread
/// counterparty messages. Unread counts are derived from the message log on
/// read; there is no stored counter to go stale.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationWithUnread {
    #[sqlx(flatten)]
    pub conversation: Conversation,
    pub unread_count: i64,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn list_all(&self) -> AppResult<Vec<User>>;
    async fn create(&self, user: &User) -> AppResult<User>;
    async fn update(&self, user: &User) -> AppResult<User>;
    /// Applies `delta_cents` in a single atomic statement. Returns the new
    /// balance, or `None` when the user is missing or the adjustment would
    /// overdraw the account.
    async fn adjust_balance(&self, id: Uuid, delta_cents: i64) -> AppResult<Option<i64>>;
}

#[async_trait]
pub trait AssetRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Asset>>;
    async fn find_all(&self) -> AppResult<Vec<Asset>>;
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Asset>>;
    async fn create(&self, asset: &Asset) -> AppResult<Asset>;
    async fn update(&self, asset: &Asset) -> AppResult<Asset>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Inserts the conversation unless one already exists for the same item
    /// and unordered party pair (the storage-layer dedup key). Returns the
    /// surviving row and whether this call created it.
    async fn create_or_get(&self, conversation: &Conversation)
        -> AppResult<(Conversation, bool)>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Conversation>>;
    /// Threads the user participates in (either role), most recently
    /// updated first.
    async fn find_for_user(&self, user_id: Uuid) -> AppResult<Vec<ConversationWithUnread>>;
    /// Thread for an item where `party_id` appears as owner or borrower.
    async fn find_for_item_and_party(
        &self,
        item_id: Uuid,
        party_id: Uuid,
    ) -> AppResult<Option<Conversation>>;
    async fn set_status(
        &self,
        id: Uuid,
        status: ConversationStatus,
    ) -> AppResult<Option<Conversation>>;
    /// Appends the message and refreshes the parent conversation's
    /// `last_message`/`updated_at` in one transaction.
    async fn append_message(&self, message: &Message) -> AppResult<Message>;
    async fn list_messages(&self, conversation_id: Uuid) -> AppResult<Vec<Message>>;
    /// Flips `is_read` on every message in the conversation not sent by
    /// `reader_id`. Returns the number of newly flipped rows.
    async fn mark_read(&self, conversation_id: Uuid, reader_id: Uuid) -> AppResult<u64>;
}

#[async_trait]
pub trait LoanRepository: Send + Sync {
    async fn create(&self, loan: &Loan) -> AppResult<Loan>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Loan>>;
    async fn list_by_borrower(&self, user_id: Uuid) -> AppResult<Vec<Loan>>;
    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Loan>>;
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Loan>>;
    async fn set_status(
        &self,
        id: Uuid,
        status: LoanStatus,
        notes: Option<String>,
    ) -> AppResult<Option<Loan>>;
    /// The only write path that stamps `end_date`.
    async fn mark_returned(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Option<Loan>>;
    /// Currently open loan (status active or completed) for the exact
    /// (item, borrower) pair.
    async fn find_open(&self, item_id: Uuid, borrower_id: Uuid) -> AppResult<Option<Loan>>;
}
