use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::api::dtos::{
    ConversationResponse, CreateConversationRequest, ErrorResponse, FindConversationQuery,
    MarkReadRequest, MessageResponse, SendMessageRequest, SuccessResponse,
    UpdateConversationStatusRequest,
};
use crate::api::routes::AppState;
use crate::error::AppResult;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // The literal /user and /find segments must precede the {id} routes.
    cfg.service(
        web::scope("/conversations")
            .route("", web::post().to(create_conversation))
            .route("/user/{user_id}", web::get().to(list_user_conversations))
            .route("/find", web::get().to(find_conversation))
            .route("/{id}", web::get().to(get_conversation))
            .route("/{id}/messages", web::get().to(list_messages))
            .route("/{id}/messages", web::post().to(send_message))
            .route("/{id}/read", web::put().to(mark_read))
            .route("/{id}/status", web::put().to(update_status)),
    );
}

#[utoipa::path(
    post,
    path = "/api/conversations",
    request_body = CreateConversationRequest,
    responses(
        (status = 201, description = "Conversation created", body = ConversationResponse),
        (status = 200, description = "Existing conversation for this item and party pair", body = ConversationResponse),
    ),
    tag = "conversations"
)]
pub async fn create_conversation(
    state: web::Data<AppState>,
    payload: web::Json<CreateConversationRequest>,
) -> AppResult<HttpResponse> {
    let (conversation, created) = state
        .messaging_service
        .create_or_get(payload.into_inner())
        .await?;
    if created {
        Ok(HttpResponse::Created().json(conversation))
    } else {
        Ok(HttpResponse::Ok().json(conversation))
    }
}

#[utoipa::path(
    get,
    path = "/api/conversations/user/{user_id}",
    responses(
        (status = 200, description = "Conversations the user participates in, most recently updated first", body = [ConversationResponse]),
    ),
    tag = "conversations"
)]
pub async fn list_user_conversations(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state
        .messaging_service
        .list_for_user(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/conversations/find",
    params(FindConversationQuery),
    responses(
        (status = 200, description = "Matching conversation, or a null body", body = ConversationResponse),
    ),
    tag = "conversations"
)]
pub async fn find_conversation(
    state: web::Data<AppState>,
    query: web::Query<FindConversationQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let result = state
        .messaging_service
        .find_for_item(query.item_id, query.borrower_id)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/conversations/{id}",
    responses(
        (status = 200, description = "Conversation", body = ConversationResponse),
        (status = 404, description = "Conversation not found", body = ErrorResponse),
    ),
    tag = "conversations"
)]
pub async fn get_conversation(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state.messaging_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/conversations/{id}/messages",
    responses(
        (status = 200, description = "Messages in chat order (oldest first)", body = [MessageResponse]),
        (status = 404, description = "Conversation not found", body = ErrorResponse),
    ),
    tag = "conversations"
)]
pub async fn list_messages(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state
        .messaging_service
        .list_messages(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/api/conversations/{id}/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message appended", body = MessageResponse),
        (status = 404, description = "Conversation not found", body = ErrorResponse),
    ),
    tag = "conversations"
)]
pub async fn send_message(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<SendMessageRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .messaging_service
        .send_message(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[utoipa::path(
    put,
    path = "/api/conversations/{id}/read",
    request_body = MarkReadRequest,
    responses(
        (status = 200, description = "Counterparty messages marked read", body = SuccessResponse),
        (status = 404, description = "Conversation not found", body = ErrorResponse),
    ),
    tag = "conversations"
)]
pub async fn mark_read(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<MarkReadRequest>,
) -> AppResult<HttpResponse> {
    state
        .messaging_service
        .mark_read(path.into_inner(), payload.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

#[utoipa::path(
    put,
    path = "/api/conversations/{id}/status",
    request_body = UpdateConversationStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ConversationResponse),
        (status = 404, description = "Conversation not found", body = ErrorResponse),
        (status = 409, description = "Illegal status transition", body = ErrorResponse),
    ),
    tag = "conversations"
)]
pub async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateConversationStatusRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .messaging_service
        .update_status(path.into_inner(), payload.status)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
