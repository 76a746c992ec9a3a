// ABOUTME: Integration tests for the action layer over a mocked backend
// ABOUTME: Covers the loading/notification lifecycle and fail-fast preconditions

use crewboard_actions::{ActionError, Dispatcher};
use crewboard_core::{
    Member, ProjectCreateInput, Role, Severity, TaskCreateInput,
};
use crewboard_gateway::Gateway;
use crewboard_store::{AppState, Mutation, Store};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn member(id: &str, name: &str, role: Role) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        email: None,
        role,
        team_id: None,
        tasks: vec![],
        personal_todos: vec![],
    }
}

async fn dispatcher_for(server: &MockServer, role: Role, members: Vec<Member>) -> Dispatcher {
    let store = Arc::new(Store::new(AppState::new("light", "en", role)));
    store.dispatch(Mutation::SetMembers(members));
    let gateway = Arc::new(Gateway::new(server.uri(), "test-anon-key").unwrap());
    Dispatcher::new(store, gateway)
}

#[tokio::test]
async fn create_project_without_any_manager_fails_before_network() {
    let server = MockServer::start().await;
    // Intentionally no mocks mounted: any request would 404 and, more to
    // the point, show up in the received-request log
    let dispatcher = dispatcher_for(&server, Role::TeamLead, vec![
        member("m1", "Alice", Role::Member),
    ])
    .await;

    let result = dispatcher
        .create_project(ProjectCreateInput {
            name: "Orphan Project".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(ActionError::NoManagerAvailable)));
    assert!(server.received_requests().await.unwrap().is_empty());

    let snapshot = dispatcher.store().snapshot();
    assert!(snapshot.projects.is_empty());
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(snapshot.notifications[0].severity, Severity::Error);
}

#[tokio::test]
async fn create_project_falls_back_to_first_manager() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/projects"))
        .and(body_partial_json(json!({ "manager_id": "m2" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "p1",
            "name": "Storefront",
            "description": null,
            "manager_id": "m2",
            "deadline": null,
            "progress": 0,
            "status": "active"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    // Current role is teamLead with no matching member, so resolution
    // falls through to the first member with the manager role
    let dispatcher = dispatcher_for(&server, Role::TeamLead, vec![
        member("m1", "Alice", Role::Member),
        member("m2", "Mike", Role::Manager),
    ])
    .await;

    let project = dispatcher
        .create_project(ProjectCreateInput {
            name: "Storefront".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(project.id, "p1");
    let snapshot = dispatcher.store().snapshot();
    assert_eq!(snapshot.projects.len(), 1);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(snapshot.notifications[0].severity, Severity::Success);
}

#[tokio::test]
async fn create_project_prefers_current_role_match() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/projects"))
        .and(body_partial_json(json!({ "manager_id": "m3" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "p1",
            "name": "Storefront",
            "description": null,
            "manager_id": "m3",
            "deadline": null,
            "progress": 0,
            "status": "active"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server, Role::TeamLead, vec![
        member("m2", "Mike", Role::Manager),
        member("m3", "Lisa", Role::TeamLead),
    ])
    .await;

    dispatcher
        .create_project(ProjectCreateInput {
            name: "Storefront".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn task_create_with_out_of_range_estimate_never_hits_network() {
    let server = MockServer::start().await;
    let dispatcher = dispatcher_for(&server, Role::Manager, vec![
        member("m1", "Mike", Role::Manager),
    ])
    .await;

    let result = dispatcher
        .create_task(TaskCreateInput {
            title: "Overscoped".to_string(),
            description: None,
            project_id: "p1".to_string(),
            project_part_id: None,
            assigned_to: "m1".to_string(),
            assigned_by: "m1".to_string(),
            priority: Default::default(),
            category: Default::default(),
            deadline: None,
            estimated_hours: Some(250),
            tags: vec![],
        })
        .await;

    match result {
        Err(ActionError::Validation(errors)) => {
            assert_eq!(errors[0].field, "estimatedHours");
        }
        other => panic!("expected validation error, got {:?}", other.map(|t| t.id)),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
    // Field-level failures annotate the form; no toast is raised
    assert!(dispatcher.store().snapshot().notifications.is_empty());
}

#[tokio::test]
async fn gateway_failure_notifies_and_rethrows_without_store_change() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/projects"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server, Role::Manager, vec![
        member("m1", "Mike", Role::Manager),
    ])
    .await;

    let result = dispatcher
        .create_project(ProjectCreateInput {
            name: "Doomed".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(ActionError::Gateway(_))));
    let snapshot = dispatcher.store().snapshot();
    assert!(snapshot.projects.is_empty());
    assert!(!snapshot.loading);
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(snapshot.notifications[0].severity, Severity::Error);
    assert!(snapshot.last_error.is_some());
}

#[tokio::test]
async fn assign_task_updates_member_task_lists_and_history() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "k1",
            "title": "Ship login",
            "description": null,
            "project_id": "p1",
            "project_part_id": null,
            "assigned_to": "m2",
            "assigned_by": "m1",
            "priority": "high",
            "category": "development",
            "deadline": null,
            "estimated_hours": null,
            "tags": [],
            "status": "in_progress",
            "progress": 25,
            "created_at": "2026-08-01T10:00:00Z",
            "updated_at": "2026-08-02T10:00:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/task_history"))
        .and(body_partial_json(json!({
            "task_id": "k1",
            "user_id": "m1",
            "action": "assigned",
            "old_value": "m1",
            "new_value": "m2"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server, Role::Manager, vec![
        member("m1", "Mike", Role::Manager),
        member("m2", "Alice", Role::Member),
    ])
    .await;

    // Seed the task as currently assigned to m1
    let mut seeded = member("m1", "Mike", Role::Manager);
    seeded.tasks.push("k1".to_string());
    dispatcher.store().dispatch(Mutation::UpdateMember(seeded));
    dispatcher.store().dispatch(Mutation::SetTasks(vec![crewboard_core::Task {
        id: "k1".to_string(),
        title: "Ship login".to_string(),
        description: None,
        project_id: "p1".to_string(),
        project_part_id: None,
        assigned_to: "m1".to_string(),
        assigned_by: "m1".to_string(),
        priority: crewboard_core::TaskPriority::High,
        category: crewboard_core::TaskCategory::Development,
        deadline: None,
        estimated_hours: None,
        tags: vec![],
        status: crewboard_core::TaskStatus::InProgress,
        progress: 25,
        created_at: "2026-08-01T10:00:00Z".parse().unwrap(),
        updated_at: "2026-08-01T10:00:00Z".parse().unwrap(),
    }]));

    let task = dispatcher
        .assign_task(&"k1".to_string(), &"m2".to_string(), &"m1".to_string())
        .await
        .unwrap();
    assert_eq!(task.assigned_to, "m2");

    let snapshot = dispatcher.store().snapshot();
    assert_eq!(snapshot.task("k1").unwrap().assigned_to, "m2");
    assert!(snapshot.member("m1").unwrap().tasks.is_empty());
    assert_eq!(snapshot.member("m2").unwrap().tasks, vec!["k1".to_string()]);
}

#[tokio::test]
async fn failed_history_write_does_not_fail_progress_update() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/tasks"))
        .and(body_partial_json(json!({ "progress": 100 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "k1",
            "title": "Ship login",
            "description": null,
            "project_id": "p1",
            "project_part_id": null,
            "assigned_to": "m1",
            "assigned_by": "m1",
            "priority": "medium",
            "category": "general",
            "deadline": null,
            "estimated_hours": null,
            "tags": [],
            "status": "in_progress",
            "progress": 100,
            "created_at": "2026-08-01T10:00:00Z",
            "updated_at": "2026-08-02T10:00:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/task_history"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server, Role::Manager, vec![
        member("m1", "Mike", Role::Manager),
    ])
    .await;

    // 125 steps past the end of the scale and clamps to 100
    let task = dispatcher
        .update_task_progress(&"k1".to_string(), 125, &"m1".to_string())
        .await
        .unwrap();

    assert_eq!(task.progress, 100);
    let snapshot = dispatcher.store().snapshot();
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(snapshot.notifications[0].severity, Severity::Success);
}

#[tokio::test]
async fn load_all_replaces_collections_and_connects() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "m1", "name": "Mike", "email": null, "role": "manager",
            "team_id": null, "tasks": [], "todos": []
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server, Role::Manager, vec![]).await;
    dispatcher.load_all().await.unwrap();

    let snapshot = dispatcher.store().snapshot();
    assert_eq!(snapshot.members.len(), 1);
    assert!(snapshot.connected);
    assert!(!snapshot.loading);
}
