//! Integration tests for the dashboard load path: three concurrent fetches
//! with the partner-requests call fatal and the other two degrading to
//! empty collections.

use neurolab_admin::ConsoleError;
use neurolab_integration_tests::MockBackend;

#[tokio::test]
async fn loads_all_three_collections() {
    let backend = MockBackend::spawn().await;
    backend.push_partner_request("r1", "Acme Corp", "pending");
    backend.push_partner_request("r2", "Other Co", "approved");
    backend.push_contact("c1", "Sam Lee", "Support");
    backend.push_whitelist("admin@neurolab.app", true);

    let mut console = backend.console();
    console.load_all().await.expect("load should succeed");

    let store = console.store();
    assert_eq!(store.partner_requests().len(), 2);
    assert_eq!(store.contacts().len(), 1);
    assert_eq!(store.whitelist().len(), 1);

    let stats = store.stats();
    assert_eq!(stats.total_requests, 2);
    assert_eq!(stats.pending_requests, 1);
    assert_eq!(stats.approved_requests, 1);
    assert_eq!(stats.rejected_requests, 0);
    assert_eq!(stats.total_contacts, 1);
}

#[tokio::test]
async fn contacts_failure_is_non_fatal() {
    let backend = MockBackend::spawn().await;
    backend.push_partner_request("r1", "Acme Corp", "pending");
    backend.push_whitelist("admin@neurolab.app", false);
    backend.fail_contacts();

    let mut console = backend.console();
    console.load_all().await.expect("load should still succeed");

    let store = console.store();
    assert_eq!(store.partner_requests().len(), 1);
    assert!(store.contacts().is_empty());
    assert_eq!(store.whitelist().len(), 1);
}

#[tokio::test]
async fn whitelist_failure_is_non_fatal() {
    let backend = MockBackend::spawn().await;
    backend.push_partner_request("r1", "Acme Corp", "pending");
    backend.push_contact("c1", "Sam Lee", "Support");
    backend.fail_whitelist();

    let mut console = backend.console();
    console.load_all().await.expect("load should still succeed");

    let store = console.store();
    assert_eq!(store.contacts().len(), 1);
    assert!(store.whitelist().is_empty());
}

#[tokio::test]
async fn partner_requests_failure_is_fatal() {
    let backend = MockBackend::spawn().await;
    backend.push_contact("c1", "Sam Lee", "Support");
    backend.fail_partner_requests();

    let mut console = backend.console();
    let err = console.load_all().await.expect_err("load must fail");
    assert!(matches!(err, ConsoleError::LoadFailed(_)));

    // Nothing was committed to the store.
    assert!(console.store().partner_requests().is_empty());
    assert!(console.store().contacts().is_empty());
}

#[tokio::test]
async fn rejected_token_clears_the_session() {
    let backend = MockBackend::spawn().await;
    backend.push_partner_request("r1", "Acme Corp", "pending");
    backend.revoke_sessions();

    let mut console = backend.console();
    assert!(console.is_authorized());

    let err = console.load_all().await.expect_err("load must fail");
    assert!(matches!(err, ConsoleError::Unauthorized));

    // The token is gone; further authorized work fails before any request.
    assert!(!console.is_authorized());
    let err = console.load_all().await.expect_err("no session left");
    assert!(matches!(err, ConsoleError::NotSignedIn));
}

#[tokio::test]
async fn load_without_session_is_refused() {
    let backend = MockBackend::spawn().await;

    let mut console = backend.console_signed_out();
    let err = console.load_all().await.expect_err("must be refused");
    assert!(matches!(err, ConsoleError::NotSignedIn));
}

#[tokio::test]
async fn refresh_pulls_server_changes_and_keeps_ui_state() {
    let backend = MockBackend::spawn().await;
    backend.push_partner_request("r1", "Acme Corp", "pending");

    let mut console = backend.console();
    console.load_all().await.expect("initial load");

    console.store_mut().set_search_term("acme");
    backend.push_partner_request("r2", "Beta LLC", "pending");

    console.refresh().await.expect("refresh");

    let store = console.store();
    assert_eq!(store.partner_requests().len(), 2);
    assert_eq!(store.search_term(), "acme");
    assert!(!store.is_refreshing());

    // The search term still narrows the visible set after the refresh.
    assert_eq!(store.visible_partner_requests().len(), 1);
}
