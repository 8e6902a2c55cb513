use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::api::dtos::{
    CreateLoanRequest, ErrorResponse, FindLoanQuery, LoanResponse, UpdateLoanStatusRequest,
};
use crate::api::routes::AppState;
use crate::error::AppResult;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Literal segments first, {id} last.
    cfg.service(
        web::scope("/loans")
            .route("", web::post().to(create_loan))
            .route("/find", web::get().to(find_open_loan))
            .route("/borrower/{user_id}", web::get().to(list_borrower_loans))
            .route("/owner/{user_id}", web::get().to(list_owner_loans))
            .route("/user/{user_id}", web::get().to(list_user_loans))
            .route("/{id}", web::get().to(get_loan))
            .route("/{id}/status", web::put().to(update_loan_status))
            .route("/{id}/return", web::put().to(mark_loan_returned)),
    );
}

#[utoipa::path(
    post,
    path = "/api/loans",
    request_body = CreateLoanRequest,
    responses(
        (status = 201, description = "Loan created with status active", body = LoanResponse),
    ),
    tag = "loans"
)]
pub async fn create_loan(
    state: web::Data<AppState>,
    payload: web::Json<CreateLoanRequest>,
) -> AppResult<HttpResponse> {
    let result = state.loan_service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(result))
}

#[utoipa::path(
    get,
    path = "/api/loans/find",
    params(FindLoanQuery),
    responses(
        (status = 200, description = "Open loan for the item and borrower, or a null body", body = LoanResponse),
    ),
    tag = "loans"
)]
pub async fn find_open_loan(
    state: web::Data<AppState>,
    query: web::Query<FindLoanQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let result = state
        .loan_service
        .find_open(query.item_id, query.borrower_id)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/loans/borrower/{user_id}",
    responses(
        (status = 200, description = "Loans borrowed by the user, newest first; cancelled loans excluded", body = [LoanResponse]),
    ),
    tag = "loans"
)]
pub async fn list_borrower_loans(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state.loan_service.list_by_borrower(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/loans/owner/{user_id}",
    responses(
        (status = 200, description = "Loans of items the user owns, newest first; cancelled loans excluded", body = [LoanResponse]),
    ),
    tag = "loans"
)]
pub async fn list_owner_loans(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state.loan_service.list_by_owner(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/loans/user/{user_id}",
    responses(
        (status = 200, description = "Loans where the user is owner or borrower, newest first; cancelled loans excluded", body = [LoanResponse]),
    ),
    tag = "loans"
)]
pub async fn list_user_loans(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state.loan_service.list_by_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/loans/{id}",
    responses(
        (status = 200, description = "Loan", body = LoanResponse),
        (status = 404, description = "Loan not found", body = ErrorResponse),
    ),
    tag = "loans"
)]
pub async fn get_loan(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let result = state.loan_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    put,
    path = "/api/loans/{id}/status",
    request_body = UpdateLoanStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = LoanResponse),
        (status = 400, description = "Returned status requires the return operation", body = ErrorResponse),
        (status = 404, description = "Loan not found", body = ErrorResponse),
        (status = 409, description = "Illegal status transition", body = ErrorResponse),
    ),
    tag = "loans"
)]
pub async fn update_loan_status(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateLoanStatusRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .loan_service
        .set_status(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    put,
    path = "/api/loans/{id}/return",
    responses(
        (status = 200, description = "Loan marked returned with end date stamped", body = LoanResponse),
        (status = 404, description = "Loan not found", body = ErrorResponse),
        (status = 409, description = "Loan is not active", body = ErrorResponse),
    ),
    tag = "loans"
)]
pub async fn mark_loan_returned(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state.loan_service.mark_returned(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}
