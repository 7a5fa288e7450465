//! Integration tests for `TodoClient` against a live server.
//!
//! Each test binds its own server on an ephemeral port.

mod common;

use std::sync::Arc;

use reqwest::StatusCode;
use rstest::rstest;

use common::{create_test_app_state, create_test_app_state_with, sample_todos, spawn_server};
use todo_feed::client::{ClientError, TodoClient};
use todo_feed::domain::TodoId;
use todo_feed::filter_todos_by_content;
use todo_feed::infrastructure::InMemoryTodoStore;

async fn spawn_client() -> TodoClient {
    TodoClient::new(spawn_server(create_test_app_state()).await)
}

#[rstest]
#[tokio::test]
async fn test_create_then_get() {
    let client = spawn_client().await;

    let created = client.create("Correr").await.unwrap();
    let page = client.get(1).await.unwrap();

    assert_eq!(created.content, "Correr");
    assert!(!created.done);
    assert_eq!(page.total, 1);
    assert_eq!(page.pages, 1);
    assert_eq!(page.todos, vec![created]);
}

#[rstest]
#[tokio::test]
async fn test_get_with_limit_pages_through_collection() {
    let store = Arc::new(InMemoryTodoStore::with_todos(sample_todos(5)));
    let client = TodoClient::new(spawn_server(create_test_app_state_with(store, 10)).await);

    let first = client.get_with_limit(1, 2).await.unwrap();
    let last = client.get_with_limit(3, 2).await.unwrap();
    let beyond = client.get_with_limit(4, 2).await.unwrap();

    assert_eq!(first.pages, 3);
    assert_eq!(first.todos.len(), 2);
    assert_eq!(last.todos.len(), 1);
    assert_eq!(last.todos[0].content, "Todo 4");
    assert!(beyond.todos.is_empty());
    assert_eq!(beyond.total, 5);
}

#[rstest]
#[tokio::test]
async fn test_toggle_done_round_trip() {
    let client = spawn_client().await;
    let created = client.create("Estudar").await.unwrap();

    let toggled = client.toggle_done(&created.id).await.unwrap();
    let restored = client.toggle_done(&created.id).await.unwrap();

    assert!(toggled.done);
    assert!(!restored.done);
    assert_eq!(restored.content, "Estudar");
}

#[rstest]
#[tokio::test]
async fn test_update_content() {
    let client = spawn_client().await;
    let created = client.create("Old").await.unwrap();

    let updated = client.update_content(&created.id, "New").await.unwrap();
    let page = client.get(1).await.unwrap();

    assert_eq!(updated.content, "New");
    assert_eq!(updated.id, created.id);
    assert_eq!(page.todos[0].content, "New");
}

#[rstest]
#[tokio::test]
async fn test_delete_by_id_removes_todo() {
    let client = spawn_client().await;
    let keep = client.create("Keep").await.unwrap();
    let remove = client.create("Remove").await.unwrap();

    client.delete_by_id(&remove.id).await.unwrap();
    let page = client.get(1).await.unwrap();

    assert_eq!(page.todos, vec![keep]);
}

#[rstest]
#[tokio::test]
async fn test_unknown_id_surfaces_404() {
    let client = spawn_client().await;
    let missing = TodoId::generate();

    let toggle = client.toggle_done(&missing).await.unwrap_err();
    let delete = client.delete_by_id(&missing).await.unwrap_err();

    assert_eq!(toggle.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(delete.status(), Some(StatusCode::NOT_FOUND));
}

#[rstest]
#[tokio::test]
async fn test_delete_with_non_uuid_id_surfaces_400_message() {
    let client = spawn_client().await;

    let error = client
        .delete_by_id(&TodoId::new("not-a-uuid"))
        .await
        .unwrap_err();

    match error {
        ClientError::Api { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "You must to provide a valid id");
        }
        other => panic!("Expected API error, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn test_empty_content_never_reaches_server() {
    let client = spawn_client().await;

    let error = client.create("  ").await.unwrap_err();
    let page = client.get(1).await.unwrap();

    assert!(matches!(error, ClientError::EmptyContent));
    assert_eq!(page.total, 0);
}

#[rstest]
#[tokio::test]
async fn test_search_over_loaded_page() {
    let client = spawn_client().await;
    for content in ["Correr no parque", "Estudar Rust", "Correr de novo"] {
        client.create(content).await.unwrap();
    }

    let page = client.get(1).await.unwrap();
    let matches = filter_todos_by_content("correr", &page.todos);

    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|todo| todo.content.starts_with("Correr")));
}
