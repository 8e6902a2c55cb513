#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hippo_backend::domain::{Loan, LoanStatus};
use hippo_backend::error::AppResult;
use hippo_backend::infrastructure::repositories::LoanRepository;
use uuid::Uuid;

#[derive(Default)]
pub struct MockLoanRepo {
    pub loans: Mutex<Vec<Loan>>,
}

impl MockLoanRepo {
    pub fn add_loan(&self, loan: Loan) {
        self.loans.lock().expect("loans mutex poisoned").push(loan);
    }

    fn list_filtered(&self, predicate: impl Fn(&Loan) -> bool) -> Vec<Loan> {
        let mut loans: Vec<Loan> = self
            .loans
            .lock()
            .expect("loans mutex poisoned")
            .iter()
            .filter(|loan| predicate(loan) && loan.status != LoanStatus::Cancelled)
            .cloned()
            .collect();
        loans.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        loans
    }
}

#[async_trait]
impl LoanRepository for MockLoanRepo {
    async fn create(&self, loan: &Loan) -> AppResult<Loan> {
        self.loans
            .lock()
            .expect("loans mutex poisoned")
            .push(loan.clone());
        Ok(loan.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Loan>> {
        Ok(self
            .loans
            .lock()
            .expect("loans mutex poisoned")
            .iter()
            .find(|loan| loan.id == id)
            .cloned())
    }

    async fn list_by_borrower(&self, user_id: Uuid) -> AppResult<Vec<Loan>> {
        Ok(self.list_filtered(|loan| loan.borrower_id == user_id))
    }

    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Loan>> {
        Ok(self.list_filtered(|loan| loan.owner_id == user_id))
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Loan>> {
        Ok(self.list_filtered(|loan| loan.borrower_id == user_id || loan.owner_id == user_id))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: LoanStatus,
        notes: Option<String>,
    ) -> AppResult<Option<Loan>> {
        let mut loans = self.loans.lock().expect("loans mutex poisoned");
        match loans.iter_mut().find(|loan| loan.id == id) {
            Some(loan) => {
                loan.status = status;
                if let Some(notes) = notes {
                    loan.notes = Some(notes);
                }
                loan.updated_at = Utc::now();
                Ok(Some(loan.clone()))
            }
            None => Ok(None),
        }
    }

    async fn mark_returned(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Option<Loan>> {
        let mut loans = self.loans.lock().expect("loans mutex poisoned");
        match loans.iter_mut().find(|loan| loan.id == id) {
            Some(loan) => {
                loan.status = LoanStatus::Returned;
                loan.end_date = Some(at);
                loan.updated_at = at;
                Ok(Some(loan.clone()))
            }
            None => Ok(None),
        }
    }

    async fn find_open(&self, item_id: Uuid, borrower_id: Uuid) -> AppResult<Option<Loan>> {
        Ok(self
            .loans
            .lock()
            .expect("loans mutex poisoned")
            .iter()
            .filter(|loan| {
                loan.item_id == item_id
                    && loan.borrower_id == borrower_id
                    && loan.status.is_open()
            })
            .max_by_key(|loan| loan.start_date)
            .cloned())
    }
}
