use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Conversation endpoints
        crate::api::routes::conversations::create_conversation,
        crate::api::routes::conversations::list_user_conversations,
        crate::api::routes::conversations::find_conversation,
        crate::api::routes::conversations::get_conversation,
        crate::api::routes::conversations::list_messages,
        crate::api::routes::conversations::send_message,
        crate::api::routes::conversations::mark_read,
        crate::api::routes::conversations::update_status,
        // Loan endpoints
        crate::api::routes::loans::create_loan,
        crate::api::routes::loans::find_open_loan,
        crate::api::routes::loans::list_borrower_loans,
        crate::api::routes::loans::list_owner_loans,
        crate::api::routes::loans::list_user_loans,
        crate::api::routes::loans::get_loan,
        crate::api::routes::loans::update_loan_status,
        crate::api::routes::loans::mark_loan_returned,
        // Health check
        crate::api::routes::health,
    ),
    components(
        schemas(
            crate::api::dtos::conversation_dto::CreateConversationRequest,
            crate::api::dtos::conversation_dto::SendMessageRequest,
            crate::api::dtos::conversation_dto::MarkReadRequest,
            crate::api::dtos::conversation_dto::UpdateConversationStatusRequest,
            crate::api::dtos::conversation_dto::ConversationResponse,
            crate::api::dtos::conversation_dto::MessageResponse,
            crate::api::dtos::loan_dto::CreateLoanRequest,
            crate::api::dtos::loan_dto::UpdateLoanStatusRequest,
            crate::api::dtos::loan_dto::LoanResponse,
            crate::api::dtos::common::ErrorResponse,
            crate::api::dtos::common::SuccessResponse,
            crate::domain::messaging::ConversationStatus,
            crate::domain::messaging::MessageKind,
            crate::domain::loan::LoanStatus,
        )
    ),
    tags(
        (name = "conversations", description = "Conversation threads and messaging"),
        (name = "loans", description = "Loan lifecycle tracking"),
        (name = "health", description = "Health check endpoints"),
    ),
    info(
        title = "Hippo Backend API",
        version = "0.1.0",
        description = "Peer-to-peer asset lending backend API",
    )
)]
pub struct ApiDoc;

pub fn configure_swagger_ui(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
