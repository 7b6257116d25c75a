//! Integration tests for role resolution and visibility gating.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use till_auth::{ContentReason, GateDecision, VisibilityGate};
use till_core::config::AccessConfig;
use till_entity::role::Role;
use till_entity::session::{RoleOrigin, Session};
use uuid::Uuid;

fn origin(session: &Session) -> Option<RoleOrigin> {
    match session {
        Session::User(user) => Some(user.origin),
        _ => None,
    }
}

#[tokio::test]
async fn test_cashier_sees_fallback_for_worker_steps() {
    let app = helpers::TestApp::new().await;
    let user = Uuid::new_v4();
    app.store.insert("profiles", user, "cashier");

    let session = app.context.sign_in(helpers::token_for(user)).await;
    assert_eq!(session.role(), Some(Role::Cashier));
    assert_eq!(origin(&session), Some(RoleOrigin::Legacy));

    let snapshot = app.context.session().snapshot();
    let gate = VisibilityGate::named("worker.steps.update");
    assert_eq!(gate.render(&snapshot, || "edit", || "read-only"), "read-only");
    assert!(VisibilityGate::named("sales.create").decide(&snapshot).shows_content());
}

#[tokio::test]
async fn test_primary_role_overrides_legacy() {
    let app = helpers::TestApp::new().await;
    let user = Uuid::new_v4();
    app.store.insert("user_roles", user, "Admin");
    app.store.insert("profiles", user, "cashier");

    let session = app.context.sign_in(helpers::token_for(user)).await;
    assert_eq!(session.role(), Some(Role::Admin));
    assert!(
        VisibilityGate::admin_only()
            .decide(&app.context.session().snapshot())
            .shows_content()
    );
}

#[tokio::test]
async fn test_user_without_rows_gets_default_role() {
    let app = helpers::TestApp::new().await;
    let session = app.context.sign_in(helpers::token_for(Uuid::new_v4())).await;
    assert_eq!(session.role(), Some(Role::Cashier));
    assert_eq!(origin(&session), Some(RoleOrigin::Default));
    assert!(!app.context.session().snapshot().is_manager_or_above());
}

#[tokio::test]
async fn test_primary_outage_never_fails_open() {
    let app = helpers::TestApp::new().await;
    let user = Uuid::new_v4();
    app.store.insert("profiles", user, "admin");
    app.store.break_table("user_roles");

    let session = app.context.sign_in(helpers::token_for(user)).await;
    assert_eq!(session.role(), Some(Role::Cashier));
    assert_eq!(app.store.calls(), 1);
}

#[tokio::test]
async fn test_rejected_token_is_signed_out() {
    let app = helpers::TestApp::new().await;
    let user = Uuid::new_v4();
    app.store.insert("user_roles", user, "admin");

    let forged = helpers::sign(user, 600, "someone-else");
    assert_eq!(app.context.sign_in(forged).await, Session::Anonymous);

    let expired = helpers::sign(user, -3600, helpers::SECRET);
    assert_eq!(app.context.sign_in(expired).await, Session::Anonymous);
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn test_view_sees_loading_then_role_then_sign_out() {
    let app = helpers::TestApp::new().await;
    let user = Uuid::new_v4();
    app.store.insert("user_roles", user, "manager");

    let mut view = app.context.session().subscribe();
    let gate = VisibilityGate::manager_or_above();
    assert_eq!(
        gate.decide(&view.snapshot()),
        GateDecision::Content(ContentReason::Loading)
    );

    app.context.sign_in(helpers::token_for(user)).await;
    let ready = view.ready().await;
    assert_eq!(gate.decide(&ready), GateDecision::Content(ContentReason::Granted));

    app.context.sign_out().await;
    let after = view.snapshot();
    assert!(!after.is_authenticated());
    assert_eq!(gate.decide(&after), GateDecision::Fallback);
}

#[tokio::test]
async fn test_second_sign_in_discards_previous_lookup() {
    let store = helpers::TestRoleStore::default().with_delay(Duration::from_millis(100));
    let app = Arc::new(helpers::TestApp::with_store(AccessConfig::default(), store).await);
    let admin = Uuid::new_v4();
    let cashier = Uuid::new_v4();
    app.store.insert("user_roles", admin, "admin");
    app.store.insert("user_roles", cashier, "cashier");

    let first = {
        let app = Arc::clone(&app);
        tokio::spawn(async move { app.context.sign_in(helpers::token_for(admin)).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    let second = app.context.sign_in(helpers::token_for(cashier)).await;
    assert_eq!(second.user_id(), Some(cashier));
    assert_eq!(second.role(), Some(Role::Cashier));

    let snapshot = app.context.session().snapshot();
    assert_eq!(snapshot.role(), Some(Role::Cashier));
    assert!(!snapshot.is_admin());

    // The admin lookup never reaches the views.
    assert_ne!(first.await.unwrap().role(), Some(Role::Admin));
    assert!(!app.context.session().snapshot().is_admin());
}

#[tokio::test]
async fn test_demo_mode_bypasses_without_backend() {
    let app = helpers::TestApp::with_access(AccessConfig {
        demo_mode: true,
        demo_label: "trade-show".to_string(),
        ..AccessConfig::default()
    })
    .await;

    let session = app.context.sign_in(helpers::token_for(Uuid::new_v4())).await;
    assert!(session.is_demo());

    let snapshot = app.context.session().snapshot();
    assert!(snapshot.is_bypass());
    assert_eq!(snapshot.role(), None);
    assert_eq!(
        VisibilityGate::admin_only().decide(&snapshot),
        GateDecision::Content(ContentReason::Bypass)
    );
    assert_eq!(app.store.calls(), 0);
}
