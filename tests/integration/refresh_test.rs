//! Integration tests for post-mutation cache refresh.

mod helpers;

use till_core::traits::{Notice, NoticeLevel};
use till_entity::module::ModuleName;

#[tokio::test]
async fn test_product_save_refreshes_products_and_inventory() {
    let app = helpers::TestApp::new().await;
    app.seed_query("products", "page=1").await;
    app.seed_query("inventory", "all").await;
    app.seed_query("stock_movements", "today").await;
    app.seed_query("customers", "all").await;
    let mut notices = app.notifier.subscribe();

    let outcome = app
        .context
        .coordinator()
        .handle_success(&ModuleName::Products, "Saved", &[ModuleName::Inventory])
        .await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.report.keys_removed, 3);
    assert!(!app.is_cached("products", "page=1").await);
    assert!(!app.is_cached("inventory", "all").await);
    assert!(!app.is_cached("stock_movements", "today").await);
    assert!(app.is_cached("customers", "all").await);

    assert_eq!(notices.try_recv().unwrap(), Notice::success("Saved"));
    assert!(notices.try_recv().is_err());
}

#[tokio::test]
async fn test_unknown_module_still_confirms() {
    let app = helpers::TestApp::new().await;
    app.seed_query("sales", "page=1").await;
    let mut notices = app.notifier.subscribe();

    let outcome = app
        .context
        .coordinator()
        .handle_success(&ModuleName::from("zzz"), "Done", &[])
        .await;

    assert!(outcome.is_complete());
    assert!(outcome.report.groups.is_empty());
    assert!(app.is_cached("sales", "page=1").await);

    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert!(notices.try_recv().is_err());
}

#[tokio::test]
async fn test_shared_groups_are_invalidated_once() {
    let app = helpers::TestApp::new().await;
    app.seed_query("dashboard", "summary").await;

    let report = app
        .context
        .coordinator()
        .invalidate(&[ModuleName::Sales, ModuleName::Expenses, ModuleName::Reports])
        .await
        .unwrap();

    let dashboards = report.groups.iter().filter(|g| *g == "dashboard").count();
    assert_eq!(dashboards, 1);
    assert_eq!(report.keys_removed, 1);
}
