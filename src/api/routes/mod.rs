use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};
use sqlx::PgPool;

use crate::application::{AssetService, LoanService, MessagingService, UserService};
use crate::config::SecurityConfig;
use crate::error::{AppError, AppResult};
use crate::observability::AppMetrics;
use crate::security::LoginThrottle;

pub mod assets;
pub mod conversations;
pub mod loans;
pub mod users;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub asset_service: Arc<AssetService>,
    pub messaging_service: Arc<MessagingService>,
    pub loan_service: Arc<LoanService>,
    pub security: SecurityConfig,
    pub login_throttle: Arc<LoginThrottle>,
    pub app_environment: String,
    pub metrics: Arc<AppMetrics>,
    /// Absent in unit-level test harnesses that run against mock
    /// repositories; the readiness probe reports 503 in that case.
    pub db_pool: Option<PgPool>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(users::configure)
            .configure(assets::configure)
            .configure(conversations::configure)
            .configure(loans::configure),
    )
    .route("/health", web::get().to(health))
    .route("/ready", web::get().to(ready))
    .route("/metrics", web::get().to(metrics));
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check passed")
    ),
    tag = "health"
)]
pub async fn health() -> &'static str {
    "ok"
}

async fn ready(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let pool = state.db_pool.as_ref().ok_or(AppError::ServiceUnavailable {
        service: "database".to_string(),
        message: "Service not ready: no database pool".to_string(),
    })?;

    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::ServiceUnavailable {
            service: "database".to_string(),
            message: format!("Service not ready: {e}"),
        })?;
    Ok(HttpResponse::Ok().body("ready"))
}

async fn metrics(state: web::Data<AppState>, request: HttpRequest) -> AppResult<HttpResponse> {
    if let Some(token) = state
        .security
        .metrics_admin_token
        .as_deref()
        .filter(|token| !token.is_empty())
    {
        let admin_header = request
            .headers()
            .get("x-admin-token")
            .and_then(|value| value.to_str().ok());
        if admin_header == Some(token) {
            return Ok(render_metrics(&state));
        }
    }

    if state.security.metrics_allow_private_only {
        let ip = request
            .peer_addr()
            .map(|addr| addr.ip())
            .ok_or(AppError::Unauthorized)?;

        if !is_private_or_loopback(ip) {
            return Err(AppError::Unauthorized);
        }
    }

    Ok(render_metrics(&state))
}

fn render_metrics(state: &web::Data<AppState>) -> HttpResponse {
    let (db_size, db_idle) = state
        .db_pool
        .as_ref()
        .map(|pool| (pool.size(), pool.num_idle()))
        .unwrap_or((0, 0));
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(state.metrics.render_prometheus(db_size, db_idle))
}

fn is_private_or_loopback(ip: std::net::IpAddr) -> bool {
    match ip {
        std::net::IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        std::net::IpAddr::V6(v6) => v6.is_loopback() || v6.is_unique_local(),
    }
}
