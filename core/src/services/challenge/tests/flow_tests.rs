//! Scenario tests driving the flow end to end against mocks

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::audit::AuditAction;
use crate::domain::entities::user_ref::UserRef;
use crate::repositories::audit::MockAuditSink;
use crate::repositories::credential::MockCredentialStore;
use crate::services::challenge::flow::{
    ChallengeFlow, FlowState, Signal, MSG_CODE_EXPIRED, MSG_CODE_RESENT, MSG_INVALID_CODE,
};
use crate::services::challenge::renderer::PlainTextRenderer;
use crate::services::otp::tests::mocks::MockMailer;
use crate::services::otp::{OtpConfig, OtpCredentialManager};

const EMAIL: &str = "alice@example.com";

struct Harness {
    store: Arc<MockCredentialStore>,
    mailer: Arc<MockMailer>,
    audit: Arc<MockAuditSink>,
    flow: ChallengeFlow<MockCredentialStore, MockMailer, PlainTextRenderer, MockAuditSink>,
}

fn harness_for(user: UserRef, mailer_fails: bool) -> Harness {
    let store = Arc::new(MockCredentialStore::new());
    let mailer = Arc::new(MockMailer::new(mailer_fails));
    let audit = Arc::new(MockAuditSink::new());
    let manager = OtpCredentialManager::new(store.clone(), mailer.clone(), OtpConfig::default());
    let flow = ChallengeFlow::new(manager, Arc::new(PlainTextRenderer), audit.clone(), user);
    Harness {
        store,
        mailer,
        audit,
        flow,
    }
}

fn harness() -> Harness {
    harness_for(UserRef::new("acme", "42", EMAIL, true), false)
}

#[tokio::test]
async fn test_scenario_submit_correct_code_succeeds() {
    let mut h = harness();

    let response = h.flow.begin().await.unwrap();
    assert_eq!(response.state, FlowState::AwaitingInput);
    assert!(response.page.is_some());

    let code = h.mailer.last_code(EMAIL).expect("code delivered");
    let response = h.flow.handle(Signal::Submit(Some(code))).await.unwrap();
    assert_eq!(response.state, FlowState::Succeeded);
    assert!(h.audit.events().is_empty());
}

#[tokio::test]
async fn test_scenario_wrong_then_right() {
    let mut h = harness();
    h.flow.begin().await.unwrap();
    let code = h.mailer.last_code(EMAIL).unwrap();

    let response = h
        .flow
        .handle(Signal::Submit(Some("00000000".to_string())))
        .await
        .unwrap();
    assert_eq!(response.state, FlowState::AwaitingInput);
    assert!(response.page.unwrap().contains(MSG_INVALID_CODE));
    assert_eq!(h.audit.count(AuditAction::InvalidAttempt), 1);

    // the same code is still valid; no reissue happened in between
    assert_eq!(h.mailer.delivery_count(EMAIL), 1);
    let response = h.flow.handle(Signal::Submit(Some(code))).await.unwrap();
    assert_eq!(response.state, FlowState::Succeeded);
}

#[tokio::test]
async fn test_scenario_expired_code_reissues_despite_match() {
    let mut h = harness();
    h.flow.begin().await.unwrap();
    let code = h.mailer.last_code(EMAIL).unwrap();

    // age the stored record past its window
    let mut stale = h.store.stored("acme", "42").unwrap();
    stale.issued_at = Utc::now() - Duration::seconds(400);
    h.store.insert("acme", "42", stale);

    let response = h.flow.handle(Signal::Submit(Some(code.clone()))).await.unwrap();
    assert_eq!(response.state, FlowState::AwaitingInput);
    assert!(response.page.unwrap().contains(MSG_CODE_EXPIRED));
    assert_eq!(h.mailer.delivery_count(EMAIL), 2);

    // not an invalid attempt, just a stale one
    assert_eq!(h.audit.count(AuditAction::InvalidAttempt), 0);

    let fresh_code = h.mailer.last_code(EMAIL).unwrap();
    assert_ne!(fresh_code, code);
    let response = h.flow.handle(Signal::Submit(Some(fresh_code))).await.unwrap();
    assert_eq!(response.state, FlowState::Succeeded);
}

#[tokio::test]
async fn test_scenario_resend_supersedes_old_code() {
    let mut h = harness();
    h.flow.begin().await.unwrap();
    let old_code = h.mailer.last_code(EMAIL).unwrap();

    let response = h.flow.handle(Signal::Resend).await.unwrap();
    assert_eq!(response.state, FlowState::AwaitingInput);
    assert!(response.page.unwrap().contains(MSG_CODE_RESENT));
    assert_eq!(h.audit.count(AuditAction::CodeResent), 1);
    assert_eq!(h.mailer.delivery_count(EMAIL), 2);

    // old code is dead even though its original window has not elapsed
    let response = h.flow.handle(Signal::Submit(Some(old_code))).await.unwrap();
    assert_eq!(response.state, FlowState::AwaitingInput);
    assert!(response.page.unwrap().contains(MSG_INVALID_CODE));

    let new_code = h.mailer.last_code(EMAIL).unwrap();
    let response = h.flow.handle(Signal::Submit(Some(new_code))).await.unwrap();
    assert_eq!(response.state, FlowState::Succeeded);
}

#[tokio::test]
async fn test_scenario_cancel_aborts_and_ignores_further_signals() {
    let mut h = harness();
    h.flow.begin().await.unwrap();
    let code = h.mailer.last_code(EMAIL).unwrap();

    let response = h.flow.handle(Signal::Cancel).await.unwrap();
    assert_eq!(response.state, FlowState::Aborted);
    assert!(response.page.is_none());

    // cancel does not invalidate the record server-side
    assert!(h.store.stored("acme", "42").is_some());

    // terminal: the correct code no longer moves the flow
    let response = h.flow.handle(Signal::Submit(Some(code))).await.unwrap();
    assert_eq!(response.state, FlowState::Aborted);
    assert!(response.page.is_none());
    assert_eq!(h.flow.state(), FlowState::Aborted);
}

#[tokio::test]
async fn test_empty_submission_reprompts_without_audit() {
    let mut h = harness();
    h.flow.begin().await.unwrap();

    let response = h.flow.handle(Signal::Submit(None)).await.unwrap();
    assert_eq!(response.state, FlowState::AwaitingInput);
    assert!(response.page.is_some());

    let response = h
        .flow
        .handle(Signal::Submit(Some("  ".to_string())))
        .await
        .unwrap();
    assert_eq!(response.state, FlowState::AwaitingInput);

    assert!(h.audit.events().is_empty());
    // no reissue either
    assert_eq!(h.mailer.delivery_count(EMAIL), 1);
}

#[tokio::test]
async fn test_plain_page_request_does_not_reissue_fresh_code() {
    let mut h = harness();
    h.flow.begin().await.unwrap();

    let response = h.flow.handle(Signal::None).await.unwrap();
    assert_eq!(response.state, FlowState::AwaitingInput);
    assert_eq!(h.mailer.delivery_count(EMAIL), 1);
}

#[tokio::test]
async fn test_plain_page_request_reissues_after_expiry() {
    let mut h = harness();
    h.flow.begin().await.unwrap();

    let mut stale = h.store.stored("acme", "42").unwrap();
    stale.issued_at = Utc::now() - Duration::seconds(301);
    h.store.insert("acme", "42", stale);

    let response = h.flow.handle(Signal::None).await.unwrap();
    assert_eq!(response.state, FlowState::AwaitingInput);
    assert!(response.page.unwrap().contains(MSG_CODE_EXPIRED));
    assert_eq!(h.mailer.delivery_count(EMAIL), 2);
}

#[tokio::test]
async fn test_begin_issues_exactly_once() {
    let mut h = harness();
    let first = h.flow.begin().await.unwrap();
    assert!(first.page.is_some());

    // begin is idempotent once the flow is underway
    let second = h.flow.begin().await.unwrap();
    assert_eq!(second.state, FlowState::AwaitingInput);
    assert!(second.page.is_none());
    assert_eq!(h.mailer.delivery_count(EMAIL), 1);
}

#[tokio::test]
async fn test_factor_not_offered_without_verified_email() {
    let user = UserRef::new("acme", "43", "bob@example.com", false);
    let mut h = harness_for(user, false);

    assert!(!h.flow.offered());
    let response = h.flow.begin().await.unwrap();
    assert_eq!(response.state, FlowState::Aborted);
    assert_eq!(h.mailer.delivery_count("bob@example.com"), 0);
    assert!(h.store.stored("acme", "43").is_none());
}

#[tokio::test]
async fn test_delivery_failure_surfaces_warning_but_flow_continues() {
    let mut h = harness_for(UserRef::new("acme", "42", EMAIL, true), true);

    let response = h.flow.begin().await.unwrap();
    assert_eq!(response.state, FlowState::AwaitingInput);
    let warning = response.delivery_warning.expect("warning reported");
    assert!(response.page.unwrap().contains(&warning));

    // the stored code still validates (fail open on delivery)
    let code = h.store.stored("acme", "42").unwrap().value;
    let response = h.flow.handle(Signal::Submit(Some(code))).await.unwrap();
    assert_eq!(response.state, FlowState::Succeeded);
}

#[tokio::test]
async fn test_failing_audit_sink_never_blocks_the_flow() {
    let store = Arc::new(MockCredentialStore::new());
    let mailer = Arc::new(MockMailer::new(false));
    let audit = Arc::new(MockAuditSink::failing());
    let manager = OtpCredentialManager::new(store, mailer.clone(), OtpConfig::default());
    let user = UserRef::new("acme", "42", EMAIL, true);
    let mut flow = ChallengeFlow::new(manager, Arc::new(PlainTextRenderer), audit, user);

    flow.begin().await.unwrap();
    let response = flow.handle(Signal::Resend).await.unwrap();
    assert_eq!(response.state, FlowState::AwaitingInput);

    let response = flow
        .handle(Signal::Submit(Some("00000000".to_string())))
        .await
        .unwrap();
    assert_eq!(response.state, FlowState::AwaitingInput);

    let code = mailer.last_code(EMAIL).unwrap();
    let response = flow.handle(Signal::Submit(Some(code))).await.unwrap();
    assert_eq!(response.state, FlowState::Succeeded);
}
