use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::LoanRepository;
use crate::domain::{Loan, LoanStatus};
use crate::error::AppResult;

const LOAN_COLUMNS: &str = "id, item_id, item_name, item_description, item_image_path, \
     owner_id, owner_name, borrower_id, borrower_name, item_value, start_date, end_date, \
     expected_return_date, status, notes, created_at, updated_at";

pub struct LoanRepositoryImpl {
    pool: PgPool,
}

impl LoanRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(&self, predicate: &str, user_id: Uuid) -> AppResult<Vec<Loan>> {
        // Listing views never include cancelled loans.
        let loans = sqlx::query_as::<_, Loan>(&format!(
            "SELECT {LOAN_COLUMNS} FROM loans \
             WHERE {predicate} AND status IN ('active', 'completed', 'returned') \
             ORDER BY start_date DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }
}

#[async_trait]
impl LoanRepository for LoanRepositoryImpl {
    async fn create(&self, loan: &Loan) -> AppResult<Loan> {
        let created = sqlx::query_as::<_, Loan>(&format!(
            r#"
            INSERT INTO loans
                (id, item_id, item_name, item_description, item_image_path,
                 owner_id, owner_name, borrower_id, borrower_name, item_value,
                 start_date, end_date, expected_return_date, status, notes,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {LOAN_COLUMNS}
            "#
        ))
        .bind(loan.id)
        .bind(loan.item_id)
        .bind(&loan.item_name)
        .bind(&loan.item_description)
        .bind(&loan.item_image_path)
        .bind(loan.owner_id)
        .bind(&loan.owner_name)
        .bind(loan.borrower_id)
        .bind(&loan.borrower_name)
        .bind(loan.item_value)
        .bind(loan.start_date)
        .bind(loan.end_date)
        .bind(loan.expected_return_date)
        .bind(loan.status)
        .bind(&loan.notes)
        .bind(loan.created_at)
        .bind(loan.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Loan>> {
        let loan =
            sqlx::query_as::<_, Loan>(&format!("SELECT {LOAN_COLUMNS} FROM loans WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(loan)
    }

    async fn list_by_borrower(&self, user_id: Uuid) -> AppResult<Vec<Loan>> {
        self.list_where("borrower_id = $1", user_id).await
    }

    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Loan>> {
        self.list_where("owner_id = $1", user_id).await
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Loan>> {
        self.list_where("(borrower_id = $1 OR owner_id = $1)", user_id)
            .await
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: LoanStatus,
        notes: Option<String>,
    ) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(&format!(
            "UPDATE loans SET status = $2, notes = COALESCE($3, notes), updated_at = $4 \
             WHERE id = $1 RETURNING {LOAN_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .bind(notes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(loan)
    }

    async fn mark_returned(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(&format!(
            "UPDATE loans SET status = 'returned', end_date = $2, updated_at = $2 \
             WHERE id = $1 RETURNING {LOAN_COLUMNS}"
        ))
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await?;
        Ok(loan)
    }

    async fn find_open(&self, item_id: Uuid, borrower_id: Uuid) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(&format!(
            "SELECT {LOAN_COLUMNS} FROM loans \
             WHERE item_id = $1 AND borrower_id = $2 AND status IN ('active', 'completed') \
             ORDER BY start_date DESC LIMIT 1"
        ))
        .bind(item_id)
        .bind(borrower_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(loan)
    }
}
