use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, utoipa::ToSchema,
)]
#[sqlx(type_name = "loan_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Completed,
    Cancelled,
    Returned,
}

impl LoanStatus {
    /// Only an active loan moves; completed/cancelled/returned are terminal.
    pub fn can_transition_to(self, next: LoanStatus) -> bool {
        matches!(
            (self, next),
            (
                LoanStatus::Active,
                LoanStatus::Completed | LoanStatus::Cancelled | LoanStatus::Returned
            )
        )
    }

    /// Whether a loan in this status counts as a currently open borrowing
    /// relationship. Returned/cancelled loans don't, which is what allows
    /// re-borrowing the same item after closure.
    pub fn is_open(self) -> bool {
        matches!(self, LoanStatus::Active | LoanStatus::Completed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Loan {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub item_description: String,
    pub item_image_path: Option<String>,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub borrower_id: Uuid,
    pub borrower_name: String,
    pub item_value: Decimal,
    pub start_date: DateTime<Utc>,
    /// Set exactly once, when the loan is marked returned.
    pub end_date: Option<DateTime<Utc>>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub status: LoanStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
