//! Unit tests for QueryService listing and search.

use std::sync::Arc;

use message_core::{Sender, ServiceError};
use storage::{InMemoryMessageStore, MessageStore};

use super::support::{input, services, services_with, FailingStore};
use crate::{QueryConfig, QueryService};

fn validation_fields(err: ServiceError) -> Vec<String> {
    match err {
        ServiceError::Validation(errors) => errors.fields().iter().map(|e| e.field.clone()).collect(),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_created_message_is_listed_with_filtered_content() {
    let (messages, queries) = services();

    messages.create(input("m1", "s1", "Eres un tonto", "user")).await.unwrap();

    let listed = queries.get_messages("s1", None, None, None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].message_id, "m1");
    assert_eq!(listed[0].content, "Eres un ***");
    assert_eq!(listed[0].sender, Sender::User);
}

#[tokio::test]
async fn test_default_limit_is_ten() {
    let (messages, queries) = services();
    for i in 0..15 {
        messages
            .create(input(&format!("m{}", i), "s1", "hola", "user"))
            .await
            .unwrap();
    }

    let listed = queries.get_messages("s1", None, None, None).await.unwrap();
    assert_eq!(listed.len(), 10);
    assert_eq!(listed[0].message_id, "m0");

    let rest = queries.get_messages("s1", None, None, Some(10)).await.unwrap();
    assert_eq!(rest.len(), 5);
    assert_eq!(rest[0].message_id, "m10");
}

#[tokio::test]
async fn test_limit_zero_and_large_offset_are_empty() {
    let (messages, queries) = services();
    for i in 0..3 {
        messages
            .create(input(&format!("m{}", i), "s1", "hola", "user"))
            .await
            .unwrap();
    }

    assert!(queries.get_messages("s1", None, Some(0), None).await.unwrap().is_empty());
    assert!(queries.get_messages("s1", None, None, Some(3)).await.unwrap().is_empty());
    assert!(queries.get_messages("s1", None, Some(5), Some(100)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_session_is_empty_success() {
    let (_, queries) = services();
    assert!(queries.get_messages("nope", None, None, None).await.unwrap().is_empty());
    assert!(queries.search_messages("nope", "hola", None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sender_filter() {
    let (messages, queries) = services();
    messages.create(input("u1", "s1", "mensaje user", "user")).await.unwrap();
    messages.create(input("y1", "s1", "mensaje system", "system")).await.unwrap();

    let users = queries.get_messages("s1", Some("user"), None, None).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].message_id, "u1");

    let systems = queries.get_messages("s1", Some("system"), None, None).await.unwrap();
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[0].message_id, "y1");

    let all = queries.get_messages("s1", Some(""), None, None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_list_validation_errors() {
    let (_, queries) = services();

    let fields = validation_fields(queries.get_messages("s1", None, Some(-1), None).await.unwrap_err());
    assert_eq!(fields, vec!["limit"]);

    let fields = validation_fields(queries.get_messages("s1", None, None, Some(-5)).await.unwrap_err());
    assert_eq!(fields, vec!["offset"]);

    let fields = validation_fields(
        queries
            .get_messages("s1", Some("robot"), Some(-1), Some(-1))
            .await
            .unwrap_err(),
    );
    assert_eq!(fields, vec!["sender", "limit", "offset"]);

    let fields = validation_fields(queries.get_messages("", None, None, None).await.unwrap_err());
    assert_eq!(fields, vec!["session_id"]);
}

#[tokio::test]
async fn test_search_finds_substring() {
    let (messages, queries) = services();
    messages.create(input("m1", "s1", "Hola mundo", "user")).await.unwrap();
    messages.create(input("m2", "s1", "Adiós", "system")).await.unwrap();

    let found = queries.search_messages("s1", "mundo", None, None).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].content, "Hola mundo");

    let upper = queries.search_messages("s1", "MUNDO", None, None).await.unwrap();
    assert_eq!(upper, found);

    let none = queries.search_messages("s1", "planeta", None, None).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_search_keeps_surrounding_spaces_of_query() {
    let (messages, queries) = services();
    messages.create(input("m1", "s1", "submundo", "user")).await.unwrap();
    messages.create(input("m2", "s1", "Hola mundo", "user")).await.unwrap();

    let found = queries.search_messages("s1", " mundo", None, None).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message_id, "m2");

    assert!(queries.search_messages("s1", "mundo ", None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_does_not_see_masked_words() {
    let (messages, queries) = services();
    messages.create(input("m1", "s1", "Eres un tonto", "user")).await.unwrap();

    assert!(queries.search_messages("s1", "tonto", None, None).await.unwrap().is_empty());
    assert_eq!(queries.search_messages("s1", "***", None, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_validation_errors() {
    let (_, queries) = services();

    let fields = validation_fields(queries.search_messages("s1", "", None, None).await.unwrap_err());
    assert_eq!(fields, vec!["q"]);

    let fields = validation_fields(queries.search_messages("s1", "   ", None, None).await.unwrap_err());
    assert_eq!(fields, vec!["q"]);

    let fields = validation_fields(
        queries
            .search_messages("s1", "hola", Some(-1), None)
            .await
            .unwrap_err(),
    );
    assert_eq!(fields, vec!["limit"]);
}

#[tokio::test]
async fn test_search_minimum_length_is_configurable() {
    let store: Arc<dyn MessageStore> = Arc::new(InMemoryMessageStore::new());
    let (messages, _) = services_with(Arc::clone(&store));
    messages.create(input("m1", "s1", "a b c", "user")).await.unwrap();

    let default = QueryService::new(Arc::clone(&store), QueryConfig::default());
    assert_eq!(default.search_messages("s1", "a", None, None).await.unwrap().len(), 1);

    let strict = QueryService::new(store, QueryConfig { search_min_chars: 2 });
    let fields = validation_fields(strict.search_messages("s1", "a", None, None).await.unwrap_err());
    assert_eq!(fields, vec!["q"]);
}

#[tokio::test]
async fn test_storage_failure_is_internal() {
    let (_, queries) = services_with(Arc::new(FailingStore));

    let err = queries.get_messages("s1", None, None, None).await.unwrap_err();
    assert!(matches!(err, ServiceError::Internal(_)));

    let err = queries.search_messages("s1", "hola", None, None).await.unwrap_err();
    assert!(matches!(err, ServiceError::Internal(_)));
}
