use actix_rt::test;
use actix_web::{test as actix_test, web, App};
use hippo_backend::api::routes;
use serde_json::json;
use uuid::Uuid;

use crate::common;

macro_rules! spawn_app {
    () => {{
        let harness = common::test_state();
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(harness.state.clone()))
                .configure(routes::configure),
        )
        .await
    }};
}

fn conversation_body(item_id: Uuid, owner_id: Uuid, borrower_id: Uuid) -> serde_json::Value {
    json!({
        "itemId": item_id,
        "itemName": "Cordless Drill",
        "ownerId": owner_id,
        "ownerName": "Alice Owner",
        "borrowerId": borrower_id,
        "borrowerName": "Bob Borrower",
    })
}

#[test]
async fn create_conversation_reports_created_then_existing() {
    let app = spawn_app!();
    let body = conversation_body(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/conversations")
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), 201);
    let first_body: serde_json::Value = actix_test::read_body_json(first).await;

    let second = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/conversations")
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), 200);
    let second_body: serde_json::Value = actix_test::read_body_json(second).await;

    assert_eq!(first_body["id"], second_body["id"]);
    assert_eq!(first_body["status"], "active");
}

#[test]
async fn get_unknown_conversation_is_404_with_error_code() {
    let app = spawn_app!();

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/conversations/{}", Uuid::new_v4()))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[test]
async fn find_returns_null_for_an_unknown_pair() {
    let app = spawn_app!();

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!(
                "/api/conversations/find?itemId={}&borrowerId={}",
                Uuid::new_v4(),
                Uuid::new_v4()
            ))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = actix_test::read_body_json(response).await;
    assert!(body.is_null());
}

#[test]
async fn find_matches_the_existing_thread() {
    let app = spawn_app!();
    let (item, owner, borrower) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/conversations")
            .set_json(conversation_body(item, owner, borrower))
            .to_request(),
    )
    .await;
    let created_body: serde_json::Value = actix_test::read_body_json(created).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!(
                "/api/conversations/find?itemId={item}&borrowerId={borrower}"
            ))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"], created_body["id"]);
}

#[test]
async fn message_exchange_over_http() {
    let app = spawn_app!();
    let (item, owner, borrower) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/conversations")
            .set_json(conversation_body(item, owner, borrower))
            .to_request(),
    )
    .await;
    let conversation: serde_json::Value = actix_test::read_body_json(created).await;
    let conversation_id = conversation["id"].as_str().unwrap().to_string();

    let sent = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/conversations/{conversation_id}/messages"))
            .set_json(json!({
                "senderId": borrower,
                "senderName": "Bob Borrower",
                "content": "hi",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(sent.status(), 201);
    let message: serde_json::Value = actix_test::read_body_json(sent).await;
    assert_eq!(message["type"], "text");
    assert_eq!(message["isRead"], false);

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/conversations/{conversation_id}/messages"))
            .to_request(),
    )
    .await;
    assert_eq!(listed.status(), 200);
    let messages: serde_json::Value = actix_test::read_body_json(listed).await;
    assert_eq!(messages.as_array().unwrap().len(), 1);
    assert_eq!(messages[0]["content"], "hi");

    let read = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/conversations/{conversation_id}/read"))
            .set_json(json!({ "userId": owner }))
            .to_request(),
    )
    .await;
    assert_eq!(read.status(), 200);
    let read_body: serde_json::Value = actix_test::read_body_json(read).await;
    assert_eq!(read_body["success"], true);

    let relisted = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/conversations/{conversation_id}/messages"))
            .to_request(),
    )
    .await;
    let messages: serde_json::Value = actix_test::read_body_json(relisted).await;
    assert_eq!(messages[0]["isRead"], true);
}

#[test]
async fn send_message_with_empty_content_is_400() {
    let app = spawn_app!();
    let (item, owner, borrower) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/conversations")
            .set_json(conversation_body(item, owner, borrower))
            .to_request(),
    )
    .await;
    let conversation: serde_json::Value = actix_test::read_body_json(created).await;
    let conversation_id = conversation["id"].as_str().unwrap().to_string();

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/conversations/{conversation_id}/messages"))
            .set_json(json!({
                "senderId": borrower,
                "senderName": "Bob Borrower",
                "content": "",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[test]
async fn illegal_status_transition_is_409() {
    let app = spawn_app!();

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/conversations")
            .set_json(conversation_body(
                Uuid::new_v4(),
                Uuid::new_v4(),
                Uuid::new_v4(),
            ))
            .to_request(),
    )
    .await;
    let conversation: serde_json::Value = actix_test::read_body_json(created).await;
    let conversation_id = conversation["id"].as_str().unwrap().to_string();

    let archived = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/conversations/{conversation_id}/status"))
            .set_json(json!({ "status": "archived" }))
            .to_request(),
    )
    .await;
    assert_eq!(archived.status(), 200);

    let reopened = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/conversations/{conversation_id}/status"))
            .set_json(json!({ "status": "active" }))
            .to_request(),
    )
    .await;
    assert_eq!(reopened.status(), 409);
}

#[test]
async fn health_endpoint_reports_ok() {
    let app = spawn_app!();

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/health").to_request(),
    )
    .await;

    assert_eq!(response.status(), 200);
    let body = actix_test::read_body(response).await;
    assert_eq!(body, "ok");
}
