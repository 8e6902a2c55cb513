use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::UserRepository;
use crate::domain::User;
use crate::error::AppResult;

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, phone, \
     balance_cents, created_at, updated_at";

pub struct UserRepositoryImpl {
    pool: PgPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users
                (id, email, password_hash, first_name, last_name, phone, balance_cents,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(user.balance_cents)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let updated = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, phone = $4, updated_at = $5
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn adjust_balance(&self, id: Uuid, delta_cents: i64) -> AppResult<Option<i64>> {
        // Single-statement adjustment; the WHERE guard rejects overdraws so
        // concurrent withdrawals cannot drive the balance negative.
        let balance = sqlx::query_scalar::<_, i64>(
            "UPDATE users SET balance_cents = balance_cents + $2, updated_at = $3 \
             WHERE id = $1 AND balance_cents + $2 >= 0 \
             RETURNING balance_cents",
        )
        .bind(id)
        .bind(delta_cents)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(balance)
    }
}
