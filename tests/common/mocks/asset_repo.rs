#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use hippo_backend::domain::Asset;
use hippo_backend::error::{AppError, AppResult};
use hippo_backend::infrastructure::repositories::AssetRepository;
use uuid::Uuid;

#[derive(Default)]
pub struct MockAssetRepo {
    pub assets: Mutex<Vec<Asset>>,
}

#[async_trait]
impl AssetRepository for MockAssetRepo {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Asset>> {
        Ok(self
            .assets
            .lock()
            .expect("assets mutex poisoned")
            .iter()
            .find(|asset| asset.id == id)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Asset>> {
        let mut assets = self.assets.lock().expect("assets mutex poisoned").clone();
        assets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(assets)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Asset>> {
        let mut assets: Vec<Asset> = self
            .assets
            .lock()
            .expect("assets mutex poisoned")
            .iter()
            .filter(|asset| asset.owner_id == owner_id)
            .cloned()
            .collect();
        assets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(assets)
    }

    async fn create(&self, asset: &Asset) -> AppResult<Asset> {
        self.assets
            .lock()
            .expect("assets mutex poisoned")
            .push(asset.clone());
        Ok(asset.clone())
    }

    async fn update(&self, asset: &Asset) -> AppResult<Asset> {
        let mut assets = self.assets.lock().expect("assets mutex poisoned");
        match assets.iter_mut().find(|existing| existing.id == asset.id) {
            Some(existing) => {
                existing.name = asset.name.clone();
                existing.description = asset.description.clone();
                existing.value = asset.value;
                existing.image_paths = asset.image_paths.clone();
                existing.updated_at = Utc::now();
                Ok(existing.clone())
            }
            None => Err(AppError::DatabaseError(sqlx::Error::RowNotFound)),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.assets
            .lock()
            .expect("assets mutex poisoned")
            .retain(|asset| asset.id != id);
        Ok(())
    }
}
