use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::api::dtos::{AmountRequest, LoginRequest, RegisterUserRequest, UpdateUserRequest};
use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};
use crate::security::LoginThrottle;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(register))
            .route("/id/{id}", web::get().to(get_user_by_id))
            .route("/{id}/deposit", web::post().to(deposit))
            .route("/{id}/withdraw", web::post().to(withdraw))
            .route("/{id}/balance", web::get().to(balance))
            .route("/{id}", web::put().to(update_user))
            .route("/{email}", web::get().to(get_user_by_email)),
    )
    .service(web::scope("/auth").route("/login", web::post().to(login)));
}

async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let result = state.user_service.list().await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let result = state.user_service.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(result))
}

async fn login(
    state: web::Data<AppState>,
    request: HttpRequest,
    payload: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let payload = payload.into_inner();
    let ip = request.peer_addr().map(|addr| addr.ip().to_string());
    let key = LoginThrottle::key(&payload.email, ip.as_deref());

    state.login_throttle.ensure_allowed(&key)?;

    match state.user_service.login(payload).await {
        Ok(user) => {
            state.login_throttle.record_success(&key);
            Ok(HttpResponse::Ok().json(user))
        }
        Err(AppError::Unauthorized) => {
            state.metrics.record_auth_failure();
            Err(state.login_throttle.record_failure(&key))
        }
        Err(other) => Err(other),
    }
}

async fn get_user_by_id(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state.user_service.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn get_user_by_email(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let result = state.user_service.get_by_email(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .user_service
        .update_profile(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn deposit(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<AmountRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;
    let result = state
        .user_service
        .deposit(path.into_inner(), payload.amount)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn withdraw(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<AmountRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;
    let result = state
        .user_service
        .withdraw(path.into_inner(), payload.amount)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn balance(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let result = state.user_service.balance(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}
