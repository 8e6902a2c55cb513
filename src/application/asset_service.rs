use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api::dtos::{AssetResponse, CreateAssetRequest, UpdateAssetRequest};
use crate::domain::Asset;
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::{AssetRepository, UserRepository};

#[derive(Clone)]
pub struct AssetService {
    user_repo: Arc<dyn UserRepository>,
    asset_repo: Arc<dyn AssetRepository>,
}

impl AssetService {
    pub fn new(user_repo: Arc<dyn UserRepository>, asset_repo: Arc<dyn AssetRepository>) -> Self {
        Self {
            user_repo,
            asset_repo,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<AssetResponse>> {
        let assets = self.asset_repo.find_all().await?;
        Ok(assets.into_iter().map(AssetResponse::from).collect())
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<AssetResponse>> {
        let assets = self.asset_repo.find_by_owner(owner_id).await?;
        Ok(assets.into_iter().map(AssetResponse::from).collect())
    }

    pub async fn create(&self, request: CreateAssetRequest) -> AppResult<AssetResponse> {
        request.validate()?;

        self.user_repo
            .find_by_id(request.owner_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("owner does not exist".to_string()))?;

        let now = Utc::now();
        let asset = Asset {
            id: Uuid::new_v4(),
            owner_id: request.owner_id,
            name: request.name,
            description: request.description,
            value: request.value,
            image_paths: request.image_paths,
            created_at: now,
            updated_at: now,
        };

        let created = self.asset_repo.create(&asset).await?;
        info!(asset_id = %created.id, owner_id = %created.owner_id, "asset created");
        Ok(created.into())
    }

    pub async fn update(&self, id: Uuid, request: UpdateAssetRequest) -> AppResult<AssetResponse> {
        request.validate()?;

        let mut asset = self
            .asset_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("asset not found".to_string()))?;

        if let Some(name) = request.name {
            asset.name = name;
        }
        if let Some(description) = request.description {
            asset.description = Some(description);
        }
        if let Some(value) = request.value {
            asset.value = value;
        }
        if let Some(image_paths) = request.image_paths {
            asset.image_paths = image_paths;
        }

        let updated = self.asset_repo.update(&asset).await?;
        Ok(updated.into())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.asset_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("asset not found".to_string()))?;
        self.asset_repo.delete(id).await
    }
}
