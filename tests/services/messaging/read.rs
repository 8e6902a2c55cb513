use actix_rt::test;
use hippo_backend::error::AppError;
use uuid::Uuid;

use crate::messaging::helpers::{conversation_request, message_request, service};

#[test]
async fn mark_read_flips_only_counterparty_messages() {
    let (repo, service) = service();
    let owner = Uuid::new_v4();
    let borrower = Uuid::new_v4();

    let (conversation, _) = service
        .create_or_get(conversation_request(Uuid::new_v4(), owner, borrower))
        .await
        .unwrap();

    service
        .send_message(conversation.id, message_request(borrower, "from borrower"))
        .await
        .unwrap();
    service
        .send_message(conversation.id, message_request(owner, "from owner"))
        .await
        .unwrap();

    service.mark_read(conversation.id, owner).await.unwrap();

    for message in repo.message_snapshot() {
        if message.sender_id == borrower {
            assert!(message.is_read, "counterparty message should be read");
        } else {
            assert!(!message.is_read, "reader's own message must stay unread");
        }
    }
}

#[test]
async fn mark_read_is_idempotent() {
    let (repo, service) = service();
    let owner = Uuid::new_v4();
    let borrower = Uuid::new_v4();

    let (conversation, _) = service
        .create_or_get(conversation_request(Uuid::new_v4(), owner, borrower))
        .await
        .unwrap();
    service
        .send_message(conversation.id, message_request(borrower, "hi"))
        .await
        .unwrap();

    service.mark_read(conversation.id, owner).await.unwrap();
    let after_first = repo.message_snapshot();

    service.mark_read(conversation.id, owner).await.unwrap();
    let after_second = repo.message_snapshot();

    assert_eq!(after_first.len(), after_second.len());
    for (first, second) in after_first.iter().zip(after_second.iter()) {
        assert_eq!(first.id, second.id);
        assert_eq!(first.is_read, second.is_read);
    }
}

#[test]
async fn mark_read_on_unknown_conversation_is_not_found() {
    let (_, service) = service();

    let result = service.mark_read(Uuid::new_v4(), Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
async fn mark_read_leaves_other_conversations_alone() {
    let (repo, service) = service();
    let owner = Uuid::new_v4();
    let borrower = Uuid::new_v4();

    let (first, _) = service
        .create_or_get(conversation_request(Uuid::new_v4(), owner, borrower))
        .await
        .unwrap();
    let (second, _) = service
        .create_or_get(conversation_request(Uuid::new_v4(), owner, borrower))
        .await
        .unwrap();

    service
        .send_message(first.id, message_request(borrower, "thread one"))
        .await
        .unwrap();
    service
        .send_message(second.id, message_request(borrower, "thread two"))
        .await
        .unwrap();

    service.mark_read(first.id, owner).await.unwrap();

    for message in repo.message_snapshot() {
        if message.conversation_id == first.id {
            assert!(message.is_read);
        } else {
            assert!(!message.is_read);
        }
    }
}

/// The full exchange from the client's point of view: find-or-create a
/// thread, the borrower says hi, the owner reads it, a second read is a
/// no-op.
#[test]
async fn conversation_exchange_end_to_end() {
    let (repo, service) = service();
    let owner = Uuid::new_v4();
    let borrower = Uuid::new_v4();

    let (conversation, created) = service
        .create_or_get(conversation_request(Uuid::new_v4(), owner, borrower))
        .await
        .unwrap();
    assert!(created);

    service
        .send_message(conversation.id, message_request(borrower, "hi"))
        .await
        .unwrap();

    let messages = service.list_messages(conversation.id).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "hi");
    assert!(!messages[0].is_read);

    service.mark_read(conversation.id, owner).await.unwrap();
    let flipped = repo.message_snapshot();
    assert!(flipped[0].is_read);

    service.mark_read(conversation.id, owner).await.unwrap();
    let unchanged = repo.message_snapshot();
    assert_eq!(unchanged.len(), 1);
    assert!(unchanged[0].is_read);
}
