mod common;

use candidate_console::dto::candidate_dto::CandidatePayload;
use candidate_console::models::{CandidateStatus, EntityId};
use candidate_console::workflow::CandidateAction;
use candidate_console::ActionOutcome;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn status_change_sends_patch_then_reloads() {
    let (stub, app, _) = common::signed_in().await;
    let id = EntityId::from(1);

    let outcome = assert_ok!(app.change_status(&id, CandidateStatus::Interviewed).await);

    assert_eq!(outcome, ActionOutcome::Completed);
    let requests = stub.requests();
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[0].path, "/candidates/1/status");
    assert_eq!(requests[0].body, Some(json!({"status": "interviewed"})));
    assert!(requests[1..]
        .iter()
        .any(|r| r.method == "GET" && r.path == "/candidates"));
    assert_eq!(
        app.snapshot().notice.as_deref(),
        Some("Status changed to interviewed!")
    );
}

#[tokio::test]
async fn refused_transition_changes_nothing() {
    let (stub, app, _) = common::signed_in().await;
    stub.respond(
        "PATCH /candidates/1/status",
        409,
        json!({"error": "Invalid status transition"}),
    );

    assert_err!(app.change_status(&EntityId::from(1), CandidateStatus::Offered).await);

    let snap = app.snapshot();
    assert_eq!(snap.error.as_deref(), Some("Invalid status transition"));
    assert_eq!(snap.candidates[0].status, CandidateStatus::Pending);
    assert_ne!(snap.notice.as_deref(), Some("Status changed to offered!"));
    assert!(stub.requests_to("GET", "/candidates").is_empty());
}

#[tokio::test]
async fn actions_follow_status_and_role() {
    let (_stub, app, _) = common::signed_in().await;
    let snap = app.snapshot();

    let pending = snap.actions_for(&EntityId::from(1));
    assert!(pending.contains(&CandidateAction::ChangeStatus(CandidateStatus::Interviewed)));
    assert!(pending.contains(&CandidateAction::ChangeStatus(CandidateStatus::Approved)));
    assert!(pending.contains(&CandidateAction::ChangeStatus(CandidateStatus::Rejected)));
    assert!(pending.contains(&CandidateAction::Delete));

    let interviewed = snap.actions_for(&EntityId::from(2));
    assert!(interviewed.contains(&CandidateAction::ChangeStatus(CandidateStatus::Offered)));
    assert!(!interviewed.contains(&CandidateAction::ChangeStatus(CandidateStatus::Approved)));
}

#[tokio::test]
async fn create_posts_camel_case_payload() {
    let (stub, app, _) = common::signed_in().await;

    assert_ok!(
        app.create_candidate(CandidatePayload {
            name: "Cara Diaz".into(),
            email: "cara@x.com".into(),
            phone: "555-0103".into(),
            position: "Backend Engineer".into(),
            resume: String::new(),
            cover_letter: "Hi there".into(),
        })
        .await
    );

    let posted = stub.requests_to("POST", "/candidates");
    assert_eq!(posted.len(), 1);
    assert_eq!(
        posted[0].body.as_ref().and_then(|b| b.get("coverLetter")),
        Some(&json!("Hi there"))
    );
    assert_eq!(
        app.snapshot().notice.as_deref(),
        Some("Candidate registered successfully!")
    );
}

#[tokio::test]
async fn incomplete_form_is_never_sent() {
    let (stub, app, _) = common::signed_in().await;

    let err = assert_err!(
        app.create_candidate(CandidatePayload {
            name: "Cara".into(),
            ..Default::default()
        })
        .await
    );

    assert!(err.is_validation());
    assert_eq!(
        app.snapshot().error.as_deref(),
        Some("Please fill in all required fields")
    );
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn edit_starts_from_the_cached_record() {
    let (stub, app, _) = common::signed_in().await;
    let id = EntityId::from(1);

    let mut form = assert_ok!(app.edit_form(&id));
    assert_eq!(form.name, "Ann Lee");
    form.phone = "555-9999".into();
    assert_ok!(app.update_candidate(&id, form).await);

    let put = stub.requests_to("PUT", "/candidates/1");
    let body = put[0].body.clone().unwrap();
    assert_eq!(body["phone"], json!("555-9999"));
    assert_eq!(body["email"], json!("ann@x.com"));
    assert_eq!(
        app.snapshot().notice.as_deref(),
        Some("Candidate updated successfully!")
    );
}

#[tokio::test]
async fn delete_accepts_an_empty_response() {
    let (stub, app, _) = common::signed_in().await;

    let outcome = assert_ok!(app.delete_candidate(&EntityId::from(1)).await);

    assert_eq!(outcome, ActionOutcome::Completed);
    assert_eq!(stub.requests_to("DELETE", "/candidates/1").len(), 1);
    assert_eq!(
        app.snapshot().notice.as_deref(),
        Some("Candidate deleted successfully!")
    );
}
