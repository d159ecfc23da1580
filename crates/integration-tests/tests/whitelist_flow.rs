//! Integration tests for whitelist management: validated adds, confirmed
//! removals, and the no-silent-mutation guarantees on failure.

use neurolab_admin::ConsoleError;
use neurolab_core::Email;
use neurolab_integration_tests::MockBackend;

#[tokio::test]
async fn add_prepends_entry_and_clears_draft() {
    let backend = MockBackend::spawn().await;
    backend.push_whitelist("existing@neurolab.app", true);

    let mut console = backend.console();
    console.load_all().await.expect("load");

    console.store_mut().set_new_email_draft("new-admin@neurolab.app");
    console.add_to_whitelist().await.expect("add");

    let store = console.store();
    assert_eq!(store.whitelist().len(), 2);
    // The created entry goes to the front of the cached collection.
    assert_eq!(store.whitelist()[0].email.as_str(), "new-admin@neurolab.app");
    assert!(!store.whitelist()[0].is_registered);
    assert_eq!(store.new_email_draft(), "");
    assert!(store.email_error().is_none());

    assert!(
        backend
            .whitelist_emails()
            .contains(&"new-admin@neurolab.app".to_owned())
    );
}

#[tokio::test]
async fn empty_draft_fails_validation_without_a_network_call() {
    let backend = MockBackend::spawn().await;
    backend.push_whitelist("existing@neurolab.app", false);

    let mut console = backend.console();
    console.load_all().await.expect("load");

    let err = console
        .add_to_whitelist()
        .await
        .expect_err("empty draft must fail");
    assert!(matches!(err, ConsoleError::InvalidEmail(_)));

    let store = console.store();
    assert!(store.email_error().is_some());
    assert_eq!(store.whitelist().len(), 1);
    assert_eq!(backend.whitelist_emails().len(), 1);
}

#[tokio::test]
async fn duplicate_add_surfaces_the_server_message_on_the_draft() {
    let backend = MockBackend::spawn().await;
    backend.push_whitelist("existing@neurolab.app", false);

    let mut console = backend.console();
    console.load_all().await.expect("load");

    console.store_mut().set_new_email_draft("existing@neurolab.app");
    let err = console
        .add_to_whitelist()
        .await
        .expect_err("duplicate must fail");
    assert!(matches!(err, ConsoleError::Api(_)));

    let store = console.store();
    assert_eq!(store.email_error(), Some("Email is already whitelisted"));
    // The draft survives a failed submit so the admin can correct it.
    assert_eq!(store.new_email_draft(), "existing@neurolab.app");
    assert_eq!(store.whitelist().len(), 1);
}

#[tokio::test]
async fn remove_deletes_locally_after_confirmation() {
    let backend = MockBackend::spawn().await;
    backend.push_whitelist("keep@neurolab.app", true);
    backend.push_whitelist("drop@neurolab.app", false);

    let mut console = backend.console();
    console.load_all().await.expect("load");

    let email = Email::parse("drop@neurolab.app").expect("valid email");
    console.remove_from_whitelist(&email).await.expect("remove");

    assert_eq!(console.store().whitelist().len(), 1);
    assert_eq!(backend.whitelist_emails(), vec!["keep@neurolab.app"]);
}

#[tokio::test]
async fn failed_remove_keeps_the_entry_visible() {
    let backend = MockBackend::spawn().await;
    backend.push_whitelist("a@b.com", false);
    backend.fail_whitelist_removals();

    let mut console = backend.console();
    console.load_all().await.expect("load");

    let email = Email::parse("a@b.com").expect("valid email");
    let err = console
        .remove_from_whitelist(&email)
        .await
        .expect_err("remove must fail");
    assert!(matches!(err, ConsoleError::Api(_)));

    // The entry is still present in the visible selection.
    let store = console.store();
    assert!(
        store
            .visible_whitelist()
            .iter()
            .any(|e| e.email.as_str() == "a@b.com")
    );
}

#[tokio::test]
async fn removing_an_unknown_email_reports_the_server_error() {
    let backend = MockBackend::spawn().await;

    let mut console = backend.console();
    console.load_all().await.expect("load");

    let email = Email::parse("ghost@neurolab.app").expect("valid email");
    let err = console
        .remove_from_whitelist(&email)
        .await
        .expect_err("must fail");
    assert!(matches!(err, ConsoleError::Api(_)));
}
