use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api::dtos::{CreateLoanRequest, LoanResponse, UpdateLoanStatusRequest};
use crate::domain::{Loan, LoanStatus};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::LoanRepository;

#[derive(Clone)]
pub struct LoanService {
    loan_repo: Arc<dyn LoanRepository>,
}

impl LoanService {
    pub fn new(loan_repo: Arc<dyn LoanRepository>) -> Self {
        Self { loan_repo }
    }

    /// Records a new lending agreement. No open-loan pre-check happens
    /// here: callers that want dedup query `find_open` first.
    pub async fn create(&self, request: CreateLoanRequest) -> AppResult<LoanResponse> {
        request.validate()?;

        let now = Utc::now();
        let loan = Loan {
            id: Uuid::new_v4(),
            item_id: request.item_id,
            item_name: request.item_name,
            item_description: request.item_description,
            item_image_path: request.item_image_path,
            owner_id: request.owner_id,
            owner_name: request.owner_name,
            borrower_id: request.borrower_id,
            borrower_name: request.borrower_name,
            item_value: request.item_value,
            start_date: now,
            end_date: None,
            expected_return_date: request.expected_return_date,
            status: LoanStatus::Active,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        let created = self.loan_repo.create(&loan).await?;
        info!(
            loan_id = %created.id,
            item_id = %created.item_id,
            owner_id = %created.owner_id,
            borrower_id = %created.borrower_id,
            "loan created"
        );
        Ok(created.into())
    }

    pub async fn get(&self, loan_id: Uuid) -> AppResult<LoanResponse> {
        let loan = self
            .loan_repo
            .find_by_id(loan_id)
            .await?
            .ok_or_else(|| AppError::NotFound("loan not found".to_string()))?;
        Ok(loan.into())
    }

    pub async fn list_by_borrower(&self, user_id: Uuid) -> AppResult<Vec<LoanResponse>> {
        let loans = self.loan_repo.list_by_borrower(user_id).await?;
        Ok(loans.into_iter().map(LoanResponse::from).collect())
    }

    pub async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<LoanResponse>> {
        let loans = self.loan_repo.list_by_owner(user_id).await?;
        Ok(loans.into_iter().map(LoanResponse::from).collect())
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<LoanResponse>> {
        let loans = self.loan_repo.list_by_user(user_id).await?;
        Ok(loans.into_iter().map(LoanResponse::from).collect())
    }

    /// Generic status update. The return transition is deliberately not
    /// reachable from here: only `mark_returned` stamps `end_date`.
    pub async fn set_status(
        &self,
        loan_id: Uuid,
        request: UpdateLoanStatusRequest,
    ) -> AppResult<LoanResponse> {
        request.validate()?;

        if request.status == LoanStatus::Returned {
            return Err(AppError::BadRequest(
                "use the return operation to mark a loan returned".to_string(),
            ));
        }

        let loan = self
            .loan_repo
            .find_by_id(loan_id)
            .await?
            .ok_or_else(|| AppError::NotFound("loan not found".to_string()))?;

        if loan.status != request.status && !loan.status.can_transition_to(request.status) {
            return Err(AppError::Conflict(format!(
                "loan cannot move from {} to {}",
                status_name(loan.status),
                status_name(request.status)
            )));
        }

        let updated = self
            .loan_repo
            .set_status(loan_id, request.status, request.notes)
            .await?
            .ok_or_else(|| AppError::NotFound("loan not found".to_string()))?;
        Ok(updated.into())
    }

    /// active -> returned, stamping `end_date`. Re-invoking on an already
    /// returned loan is a no-op.
    pub async fn mark_returned(&self, loan_id: Uuid) -> AppResult<LoanResponse> {
        let loan = self
            .loan_repo
            .find_by_id(loan_id)
            .await?
            .ok_or_else(|| AppError::NotFound("loan not found".to_string()))?;

        if loan.status == LoanStatus::Returned {
            return Ok(loan.into());
        }
        if !loan.status.can_transition_to(LoanStatus::Returned) {
            return Err(AppError::Conflict(format!(
                "loan cannot move from {} to returned",
                status_name(loan.status)
            )));
        }

        let returned = self
            .loan_repo
            .mark_returned(loan_id, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound("loan not found".to_string()))?;
        info!(loan_id = %returned.id, "loan returned");
        Ok(returned.into())
    }

    /// Open borrowing relationship (active or completed) for the exact
    /// (item, borrower) pair, if any. Cancelled and returned loans don't
    /// block re-borrowing.
    pub async fn find_open(
        &self,
        item_id: Uuid,
        borrower_id: Uuid,
    ) -> AppResult<Option<LoanResponse>> {
        let loan = self.loan_repo.find_open(item_id, borrower_id).await?;
        Ok(loan.map(LoanResponse::from))
    }
}

fn status_name(status: LoanStatus) -> &'static str {
    match status {
        LoanStatus::Active => "active",
        LoanStatus::Completed => "completed",
        LoanStatus::Cancelled => "cancelled",
        LoanStatus::Returned => "returned",
    }
}
