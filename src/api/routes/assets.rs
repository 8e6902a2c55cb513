use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::api::dtos::{CreateAssetRequest, UpdateAssetRequest};
use crate::api::routes::AppState;
use crate::error::AppResult;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/assets")
            .route("", web::get().to(list_assets))
            .route("", web::post().to(create_asset))
            .route("/owner/{owner_id}", web::get().to(list_owner_assets))
            .route("/{id}", web::put().to(update_asset))
            .route("/{id}", web::delete().to(delete_asset)),
    );
}

async fn list_assets(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let result = state.asset_service.list().await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn list_owner_assets(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state.asset_service.list_by_owner(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn create_asset(
    state: web::Data<AppState>,
    payload: web::Json<CreateAssetRequest>,
) -> AppResult<HttpResponse> {
    let result = state.asset_service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(result))
}

async fn update_asset(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateAssetRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .asset_service
        .update(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn delete_asset(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    state.asset_service.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
