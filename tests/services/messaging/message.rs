use actix_rt::test;
use chrono::{Duration, Utc};
use hippo_backend::domain::{Message, MessageKind};
use hippo_backend::error::AppError;
use uuid::Uuid;

use crate::messaging::helpers::{conversation_request, message_request, service};

#[test]
async fn send_message_appends_and_refreshes_the_summary() {
    let (repo, service) = service();
    let borrower = Uuid::new_v4();

    let (conversation, _) = service
        .create_or_get(conversation_request(Uuid::new_v4(), Uuid::new_v4(), borrower))
        .await
        .unwrap();

    let mut last_id = None;
    for content in ["one", "two", "three"] {
        let sent = service
            .send_message(conversation.id, message_request(borrower, content))
            .await
            .unwrap();
        last_id = Some(sent.id);
    }

    let messages = service.list_messages(conversation.id).await.unwrap();
    assert_eq!(messages.len(), 3);
    assert!(messages
        .windows(2)
        .all(|pair| pair[0].created_at <= pair[1].created_at));
    assert_eq!(
        messages.iter().map(|m| m.content.as_str()).collect::<Vec<_>>(),
        vec!["one", "two", "three"]
    );

    // The conversation summary tracks the newest append.
    let refreshed = service.get(conversation.id).await.unwrap();
    let last_message = refreshed.last_message.expect("summary should be set");
    assert_eq!(Some(last_message.id), last_id);
    assert_eq!(last_message.content, "three");
    assert_eq!(repo.message_snapshot().len(), 3);
}

#[test]
async fn send_message_to_unknown_conversation_is_not_found() {
    let (repo, service) = service();

    let result = service
        .send_message(Uuid::new_v4(), message_request(Uuid::new_v4(), "hi"))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(repo.message_snapshot().is_empty());
}

#[test]
async fn send_message_rejects_empty_and_oversized_content() {
    let (_, service) = service();
    let borrower = Uuid::new_v4();

    let (conversation, _) = service
        .create_or_get(conversation_request(Uuid::new_v4(), Uuid::new_v4(), borrower))
        .await
        .unwrap();

    let empty = service
        .send_message(conversation.id, message_request(borrower, ""))
        .await;
    assert!(matches!(empty, Err(AppError::ValidationError { .. })));

    let oversized = "x".repeat(5001);
    let too_long = service
        .send_message(conversation.id, message_request(borrower, &oversized))
        .await;
    assert!(matches!(too_long, Err(AppError::ValidationError { .. })));
}

#[test]
async fn send_message_starts_unread_with_text_kind() {
    let (_, service) = service();
    let borrower = Uuid::new_v4();

    let (conversation, _) = service
        .create_or_get(conversation_request(Uuid::new_v4(), Uuid::new_v4(), borrower))
        .await
        .unwrap();

    let sent = service
        .send_message(conversation.id, message_request(borrower, "hello"))
        .await
        .unwrap();

    assert!(!sent.is_read);
    assert_eq!(sent.kind, MessageKind::Text);
    assert_eq!(sent.sender_id, borrower);
}

#[test]
async fn send_message_preserves_kind_and_metadata() {
    let (_, service) = service();
    let borrower = Uuid::new_v4();

    let (conversation, _) = service
        .create_or_get(conversation_request(Uuid::new_v4(), Uuid::new_v4(), borrower))
        .await
        .unwrap();

    let mut request = message_request(borrower, "May I borrow this for a week?");
    request.kind = MessageKind::Request;
    request.metadata = Some(serde_json::json!({"requestedDays": 7}));

    let sent = service.send_message(conversation.id, request).await.unwrap();
    assert_eq!(sent.kind, MessageKind::Request);
    assert_eq!(sent.metadata.unwrap()["requestedDays"], 7);
}

#[test]
async fn list_messages_for_unknown_conversation_is_not_found() {
    let (_, service) = service();

    let result = service.list_messages(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
async fn list_messages_orders_by_created_at_ascending() {
    let (repo, service) = service();
    let borrower = Uuid::new_v4();

    let (conversation, _) = service
        .create_or_get(conversation_request(Uuid::new_v4(), Uuid::new_v4(), borrower))
        .await
        .unwrap();

    // Seed the log out of order; retrieval must still be chat order.
    let base = Utc::now();
    for (content, offset_secs) in [("newest", 30), ("oldest", 0), ("middle", 15)] {
        repo.add_message(Message {
            id: Uuid::new_v4(),
            conversation_id: conversation.id,
            sender_id: borrower,
            sender_name: "Bob Borrower".to_string(),
            content: content.to_string(),
            kind: MessageKind::Text,
            metadata: None,
            is_read: false,
            created_at: base + Duration::seconds(offset_secs),
        });
    }

    let messages = service.list_messages(conversation.id).await.unwrap();
    assert_eq!(
        messages.iter().map(|m| m.content.as_str()).collect::<Vec<_>>(),
        vec!["oldest", "middle", "newest"]
    );
}
