//! Unit tests for MessageService::create.

use std::sync::Arc;

use chrono::Duration;
use message_core::{Sender, ServiceError};
use storage::{InMemoryMessageStore, MessageQuery, MessageStore};

use super::support::{input, services, services_with, start_time, FailingStore};

#[tokio::test]
async fn test_create_masks_and_stamps() {
    let (messages, _) = services();

    let stored = messages
        .create(input("m1", "s1", "Eres un tonto", "user"))
        .await
        .expect("create should succeed");

    assert_eq!(stored.message_id, "m1");
    assert_eq!(stored.session_id, "s1");
    assert_eq!(stored.content, "Eres un ***");
    assert_eq!(stored.sender, Sender::User);
    assert_eq!(stored.processed_at, start_time());
}

#[tokio::test]
async fn test_sequential_creates_have_non_decreasing_timestamps() {
    let (messages, _) = services();

    let first = messages.create(input("a", "s1", "uno", "user")).await.unwrap();
    let second = messages.create(input("b", "s1", "dos", "system")).await.unwrap();

    assert!(second.processed_at >= first.processed_at);
    assert_eq!(second.processed_at - first.processed_at, Duration::milliseconds(1));
}

#[tokio::test]
async fn test_duplicate_id_is_conflict() {
    let (messages, _) = services();

    messages.create(input("dup", "s1", "Hola", "user")).await.unwrap();
    let err = messages
        .create(input("dup", "s1", "Hola otra vez", "user"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict { ref message_id } if message_id == "dup"));
}

#[tokio::test]
async fn test_invalid_sender_is_rejected_without_persisting() {
    let store = Arc::new(InMemoryMessageStore::new());
    let (messages, _) = services_with(store.clone());

    let err = messages
        .create(input("m1", "s1", "Hola", "robot"))
        .await
        .unwrap_err();

    match err {
        ServiceError::Validation(errors) => {
            assert!(errors.contains("sender"));
            assert_eq!(errors.fields().len(), 1);
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_empty_fields_are_named() {
    let store = Arc::new(InMemoryMessageStore::new());
    let (messages, _) = services_with(store.clone());

    let err = messages.create(input("", "s1", "", "user")).await.unwrap_err();
    match err {
        ServiceError::Validation(errors) => {
            assert!(errors.contains("message_id"));
            assert!(errors.contains("content"));
            assert!(!errors.contains("session_id"));
            assert!(!errors.contains("sender"));
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_content_made_only_of_forbidden_words_is_stored_masked() {
    let store = Arc::new(InMemoryMessageStore::new());
    let (messages, _) = services_with(store.clone());

    let stored = messages.create(input("m1", "s1", "IDIOTA", "system")).await.unwrap();
    assert_eq!(stored.content, "***");

    let listed = store.list_by_session(&MessageQuery::new("s1", 10, 0)).await.unwrap();
    assert_eq!(listed, vec![stored]);
}

#[tokio::test]
async fn test_storage_failure_is_internal() {
    let (messages, _) = services_with(Arc::new(FailingStore));

    let err = messages.create(input("m1", "s1", "Hola", "user")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Internal(_)));
}

#[tokio::test]
async fn test_whitespace_only_content_is_stored_as_given() {
    let (messages, queries) = services();

    let stored = messages.create(input("m2", "s1", "   ", "user")).await.unwrap();
    assert_eq!(stored.content, "   ");

    let listed = queries.get_messages("s1", None, None, None).await.unwrap();
    assert_eq!(listed, vec![stored]);
}
