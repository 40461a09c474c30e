mod common;

use candidate_console::dto::auth_dto::RegisterUserPayload;
use candidate_console::models::{EntityId, Role};
use candidate_console::state::Tab;
use candidate_console::Error;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn admin_tab_loads_users_and_recent_audit_logs() {
    let (stub, app, _) = common::signed_in().await;

    assert_ok!(app.set_tab(Tab::Admin).await);

    let logs = stub.requests_to("GET", "/admin/audit-logs");
    assert_eq!(logs[0].query.as_deref(), Some("limit=50"));
    let snap = app.snapshot();
    assert_eq!(snap.users.len(), 2);
    assert_eq!(snap.users[1].last_login, None);
    assert_eq!(snap.audit_logs[0].target(), "candidate #1");
}

#[tokio::test]
async fn recruiters_cannot_open_the_admin_panel() {
    let stub = common::Stub::new();
    stub.respond(
        "POST /auth/login",
        200,
        json!({"token": "t2", "user": {"username": "sam", "fullName": "Sam", "role": "recruiter"}}),
    );
    let base_url = stub.serve().await;
    let app = common::app(&base_url, Default::default());
    assert_ok!(app.login(common::credentials()).await);

    let err = assert_err!(app.set_tab(Tab::Admin).await);

    assert!(matches!(err, Error::Forbidden(_)));
    assert!(stub.requests_to("GET", "/admin/users").is_empty());
}

#[tokio::test]
async fn create_user_requires_every_field() {
    let (stub, app, _) = common::signed_in().await;

    let err = assert_err!(
        app.create_user(RegisterUserPayload {
            username: "lee".into(),
            password: "pw".into(),
            full_name: "Lee".into(),
            ..Default::default()
        })
        .await
    );

    assert!(err.is_validation());
    assert!(stub.requests_to("POST", "/auth/register").is_empty());
}

#[tokio::test]
async fn create_user_posts_and_reloads_the_panel() {
    let (stub, app, _) = common::signed_in().await;

    assert_ok!(
        app.create_user(RegisterUserPayload {
            username: "lee".into(),
            email: "lee@acme.io".into(),
            password: "pw".into(),
            full_name: "Lee Park".into(),
            role: Role::Viewer,
        })
        .await
    );

    let posted = stub.requests_to("POST", "/auth/register");
    let body = posted[0].body.clone().unwrap();
    assert_eq!(body["fullName"], json!("Lee Park"));
    assert_eq!(body["role"], json!("viewer"));
    assert_eq!(stub.requests_to("GET", "/admin/users").len(), 1);
    assert_eq!(app.snapshot().notice.as_deref(), Some("User created successfully!"));
}

#[tokio::test]
async fn deactivating_sends_is_active_flag() {
    let (stub, app, _) = common::signed_in().await;

    assert_ok!(app.set_user_active(&EntityId::from(2), false).await);

    let patched = stub.requests_to("PATCH", "/admin/users/2/status");
    assert_eq!(patched[0].body, Some(json!({"isActive": false})));
    assert_eq!(app.snapshot().notice.as_deref(), Some("User deactivated."));
}
