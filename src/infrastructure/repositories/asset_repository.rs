use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::AssetRepository;
use crate::domain::Asset;
use crate::error::AppResult;

const ASSET_COLUMNS: &str =
    "id, owner_id, name, description, value, image_paths, created_at, updated_at";

pub struct AssetRepositoryImpl {
    pool: PgPool,
}

impl AssetRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetRepository for AssetRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Asset>> {
        let asset =
            sqlx::query_as::<_, Asset>(&format!("SELECT {ASSET_COLUMNS} FROM assets WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(asset)
    }

    async fn find_all(&self) -> AppResult<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(assets)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(assets)
    }

    async fn create(&self, asset: &Asset) -> AppResult<Asset> {
        let created = sqlx::query_as::<_, Asset>(&format!(
            r#"
            INSERT INTO assets
                (id, owner_id, name, description, value, image_paths, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ASSET_COLUMNS}
            "#
        ))
        .bind(asset.id)
        .bind(asset.owner_id)
        .bind(&asset.name)
        .bind(&asset.description)
        .bind(asset.value)
        .bind(&asset.image_paths)
        .bind(asset.created_at)
        .bind(asset.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, asset: &Asset) -> AppResult<Asset> {
        let updated = sqlx::query_as::<_, Asset>(&format!(
            r#"
            UPDATE assets
            SET name = $2, description = $3, value = $4, image_paths = $5, updated_at = $6
            WHERE id = $1
            RETURNING {ASSET_COLUMNS}
            "#
        ))
        .bind(asset.id)
        .bind(&asset.name)
        .bind(&asset.description)
        .bind(asset.value)
        .bind(&asset.image_paths)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
