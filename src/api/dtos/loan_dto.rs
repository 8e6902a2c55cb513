use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Loan, LoanStatus};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanRequest {
    pub item_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "itemName is required"))]
    pub item_name: String,
    #[validate(length(min = 1, max = 2000, message = "itemDescription is required"))]
    pub item_description: String,
    pub item_image_path: Option<String>,
    pub owner_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "ownerName is required"))]
    pub owner_name: String,
    pub borrower_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "borrowerName is required"))]
    pub borrower_name: String,
    pub item_value: Decimal,
    pub expected_return_date: Option<DateTime<Utc>>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoanStatusRequest {
    pub status: LoanStatus,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FindLoanQuery {
    pub item_id: Uuid,
    pub borrower_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
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
    pub end_date: Option<DateTime<Utc>>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub status: LoanStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        Self {
            id: loan.id,
            item_id: loan.item_id,
            item_name: loan.item_name,
            item_description: loan.item_description,
            item_image_path: loan.item_image_path,
            owner_id: loan.owner_id,
            owner_name: loan.owner_name,
            borrower_id: loan.borrower_id,
            borrower_name: loan.borrower_name,
            item_value: loan.item_value,
            start_date: loan.start_date,
            end_date: loan.end_date,
            expected_return_date: loan.expected_return_date,
            status: loan.status,
            notes: loan.notes,
            created_at: loan.created_at,
            updated_at: loan.updated_at,
        }
    }
}
