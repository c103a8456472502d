//! The task list against a mocked Supabase REST API

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use serde_json::json;
use std::time::Duration;
use supatodo::{
    Operation, SupabaseTaskRepository, Task, TaskAction, TaskEnvironment, TaskId, TaskReducer,
    TaskRepository, TaskState,
};
use supatodo_runtime::Store;
use supatodo_supabase::{SupabaseClient, SupabaseConfig};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

type BackendStore = Store<
    TaskState,
    TaskAction,
    TaskEnvironment<SupabaseTaskRepository>,
    TaskReducer<SupabaseTaskRepository>,
>;

fn repository_for(server: &MockServer) -> SupabaseTaskRepository {
    let client = SupabaseClient::new(SupabaseConfig::new(server.uri(), "anon-key")).unwrap();
    SupabaseTaskRepository::new(&client, "todos")
}

fn store_for(server: &MockServer) -> BackendStore {
    Store::new(
        TaskState::new(),
        TaskReducer::new(),
        TaskEnvironment::new(repository_for(server)),
    )
}

async fn settle(store: &BackendStore, action: TaskAction) {
    store
        .send(action)
        .await
        .unwrap()
        .wait_with_timeout(WAIT)
        .await
        .unwrap();
}

#[tokio::test]
async fn repository_maps_rows_and_payloads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/todos"))
        .and(body_json(json!([{"task": "clean house", "is_completed": false}])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {"id": 2, "task": "clean house", "is_completed": false}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/todos"))
        .and(query_param("id", "eq.2"))
        .and(body_json(json!({"is_completed": true})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let repository = repository_for(&server);
    let created = repository.insert("clean house").await.unwrap();
    assert_eq!(created, Task::new(TaskId::new(2), "clean house", false));
    repository.update(created.id, true).await.unwrap();
}

#[tokio::test]
async fn full_scenario_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/todos"))
        .and(query_param("order", "id.asc"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "task": "buy milk", "is_completed": false}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/todos"))
        .and(body_json(json!([{"task": "clean house", "is_completed": false}])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {"id": 2, "task": "clean house", "is_completed": false}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/todos"))
        .and(query_param("id", "eq.1"))
        .and(body_json(json!({"is_completed": true})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/todos"))
        .and(query_param("id", "eq.2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    settle(&store, TaskAction::Mount).await;
    settle(
        &store,
        TaskAction::InputChanged {
            text: "  clean house ".to_string(),
        },
    )
    .await;
    settle(&store, TaskAction::AddTask).await;
    settle(
        &store,
        TaskAction::ToggleTask {
            id: TaskId::new(1),
            completed: false,
        },
    )
    .await;
    settle(&store, TaskAction::DeleteTask { id: TaskId::new(2) }).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.tasks, vec![Task::new(TaskId::new(1), "buy milk", true)]);
    assert!(state.input.is_empty());
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn rejected_insert_surfaces_store_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "42501",
            "message": "new row violates row-level security policy for table \"todos\""
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    settle(&store, TaskAction::Mount).await;
    settle(
        &store,
        TaskAction::InputChanged {
            text: "secret".to_string(),
        },
    )
    .await;

    let failure = store
        .send_and_wait_for(
            TaskAction::AddTask,
            |action| matches!(action, TaskAction::OperationFailed { .. }),
            WAIT,
        )
        .await
        .unwrap();

    let TaskAction::OperationFailed { operation, error } = failure else {
        panic!("expected a failure event");
    };
    assert_eq!(operation, Operation::Insert);
    assert!(error.contains("row-level security"), "{error}");
    assert!(error.contains("401"), "{error}");

    let state = store.state(Clone::clone).await;
    assert!(state.tasks.is_empty());
    assert_eq!(state.input, "secret");
}

#[tokio::test]
async fn fetch_error_keeps_list_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let store = store_for(&server);
    settle(&store, TaskAction::Mount).await;

    let state = store.state(Clone::clone).await;
    assert!(state.tasks.is_empty());
    assert!(!state.loaded);
    assert!(state.last_error.unwrap().contains("upstream unavailable"));
}

#[tokio::test]
async fn reload_racing_add_keeps_one_row_per_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "task": "a", "is_completed": false},
            {"id": 2, "task": "b", "is_completed": false}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/todos"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([{"id": 2, "task": "b", "is_completed": false}]))
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    settle(
        &store,
        TaskAction::InputChanged {
            text: "b".to_string(),
        },
    )
    .await;

    // The fetch already sees the new row and lands before the insert response
    let mut add = store.send(TaskAction::AddTask).await.unwrap();
    let mut reload = store.send(TaskAction::Reload).await.unwrap();
    reload.wait_with_timeout(WAIT).await.unwrap();
    add.wait_with_timeout(WAIT).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.ids(), vec![TaskId::new(1), TaskId::new(2)]);
    assert!(state.input.is_empty());
    assert!(state.last_error.is_none());
}
