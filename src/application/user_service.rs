use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api::dtos::{
    BalanceResponse, LoginRequest, RegisterUserRequest, UpdateUserRequest, UserResponse,
};
use crate::domain::User;
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::UserRepository;

#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn register(&self, request: RegisterUserRequest) -> AppResult<UserResponse> {
        request.validate()?;

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("password hashing failed: {e}")))?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: normalize_email(&request.email),
            password_hash,
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            balance_cents: 0,
            created_at: now,
            updated_at: now,
        };

        // A duplicate email trips the unique constraint and surfaces as 409.
        let created = self.user_repo.create(&user).await?;
        info!(user_id = %created.id, "user registered");
        Ok(created.into())
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<UserResponse> {
        request.validate()?;

        let user = self
            .user_repo
            .find_by_email(&normalize_email(&request.email))
            .await?
            .ok_or(AppError::Unauthorized)?;

        let matches = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("password check failed: {e}")))?;
        if !matches {
            return Err(AppError::Unauthorized);
        }

        Ok(user.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<UserResponse> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
        Ok(user.into())
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<UserResponse> {
        let user = self
            .user_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
        Ok(user.into())
    }

    pub async fn list(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.user_repo.list_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> AppResult<UserResponse> {
        request.validate()?;

        let mut user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(phone) = request.phone {
            user.phone = Some(phone);
        }

        let updated = self.user_repo.update(&user).await?;
        Ok(updated.into())
    }

    pub async fn deposit(&self, id: Uuid, amount_cents: i64) -> AppResult<BalanceResponse> {
        match self.user_repo.adjust_balance(id, amount_cents).await? {
            Some(balance) => Ok(BalanceResponse { balance }),
            None => Err(AppError::NotFound("user not found".to_string())),
        }
    }

    pub async fn withdraw(&self, id: Uuid, amount_cents: i64) -> AppResult<BalanceResponse> {
        match self.user_repo.adjust_balance(id, -amount_cents).await? {
            Some(balance) => Ok(BalanceResponse { balance }),
            // The guarded update rejects both unknown users and overdraws;
            // a second lookup tells the two apart.
            None => match self.user_repo.find_by_id(id).await? {
                Some(_) => Err(AppError::BadRequest("insufficient funds".to_string())),
                None => Err(AppError::NotFound("user not found".to_string())),
            },
        }
    }

    pub async fn balance(&self, id: Uuid) -> AppResult<BalanceResponse> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
        Ok(BalanceResponse {
            balance: user.balance_cents,
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
