//! Integration tests for the login/logout session lifecycle.

use neurolab_admin::ConsoleError;
use neurolab_core::Email;
use neurolab_integration_tests::{ADMIN_EMAIL, ADMIN_PASSWORD, MockBackend};
use secrecy::SecretString;

#[tokio::test]
async fn login_stores_the_token_and_unlocks_the_dashboard() {
    let backend = MockBackend::spawn().await;
    backend.push_partner_request("r1", "Acme Corp", "pending");

    let mut console = backend.console_signed_out();
    assert!(!console.is_authorized());

    let email = Email::parse(ADMIN_EMAIL).expect("valid email");
    console
        .login(&email, &SecretString::from(ADMIN_PASSWORD))
        .await
        .expect("login");

    assert!(console.is_authorized());
    console.load_all().await.expect("load after login");
    assert_eq!(console.store().partner_requests().len(), 1);
}

#[tokio::test]
async fn rejected_credentials_store_nothing() {
    let backend = MockBackend::spawn().await;

    let mut console = backend.console_signed_out();
    let email = Email::parse(ADMIN_EMAIL).expect("valid email");
    let err = console
        .login(&email, &SecretString::from("wrong-password"))
        .await
        .expect_err("login must fail");
    assert!(matches!(err, ConsoleError::InvalidCredentials));
    assert!(!console.is_authorized());
}

#[tokio::test]
async fn logout_clears_the_session_locally() {
    let backend = MockBackend::spawn().await;

    let mut console = backend.console();
    assert!(console.is_authorized());

    console.logout().expect("logout");
    assert!(!console.is_authorized());

    let err = console.load_all().await.expect_err("session is gone");
    assert!(matches!(err, ConsoleError::NotSignedIn));
}

#[tokio::test]
async fn logout_needs_no_backend() {
    // Point the console at a port nothing listens on: logout is local-only
    // and must still succeed.
    let backend = MockBackend::spawn().await;
    let mut config = backend.config();
    config.api_url = url::Url::parse("http://127.0.0.1:9/api").expect("valid url");

    let mut console = neurolab_admin::AdminConsole::new(
        &config,
        neurolab_admin::MemorySessionStore::with_token("stale-token"),
    )
    .expect("console");

    console.logout().expect("logout without a reachable backend");
    assert!(!console.is_authorized());
}
