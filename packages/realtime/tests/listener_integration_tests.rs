// ABOUTME: Integration tests for the change listener against a mocked event feed
// ABOUTME: A pushed change must trigger a full-collection refetch, not a delta apply

use crewboard_gateway::Gateway;
use crewboard_realtime::ChangeListener;
use crewboard_store::{AppState, Mutation, Store};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn change_event_triggers_collection_refetch() {
    let server = MockServer::start().await;

    // One opaque change event on the projects channel; the payload body
    // is deliberately meaningless
    Mock::given(method("GET"))
        .and(path("/realtime/v1/changes"))
        .and(query_param("table", "projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string("data: {\"op\":\"UPDATE\",\"row\":\"whatever\"}\n\n"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "p1",
            "name": "Pushed Project",
            "description": null,
            "manager_id": null,
            "deadline": null,
            "progress": 10,
            "status": "active"
        }])))
        .mount(&server)
        .await;

    let store = Arc::new(Store::new(AppState::default()));
    store.dispatch(Mutation::SetConnected(true));
    let gateway = Arc::new(Gateway::new(server.uri(), "test-anon-key").unwrap());

    let mut revisions = store.subscribe();
    let _listener = ChangeListener::spawn(store.clone(), gateway);

    // Wait until the refetched collection lands
    let deadline = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if store.read(|s| s.project("p1").is_some()) {
                break;
            }
            revisions.changed().await.unwrap();
        }
    })
    .await;

    assert!(deadline.is_ok(), "refetch never reached the store");
    assert_eq!(store.snapshot().projects[0].name, "Pushed Project");

    store.dispatch(Mutation::SetConnected(false));
}

#[tokio::test]
async fn listener_stops_cleanly_when_disconnected() {
    let server = MockServer::start().await;

    // No feed mocks mounted: every connect attempt fails and the loop
    // only keeps retrying while the store stays connected
    let store = Arc::new(Store::new(AppState::default()));
    store.dispatch(Mutation::SetConnected(true));
    let gateway = Arc::new(Gateway::new(server.uri(), "test-anon-key").unwrap());

    let mut listener = ChangeListener::spawn(store.clone(), gateway);
    store.dispatch(Mutation::SetConnected(false));
    listener.stop();

    // Stopping twice (and dropping after) is a no-op
    listener.stop();
}
