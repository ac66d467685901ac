//! Demo session persistence over real file storage.

use kopiku_integration_tests::TestContext;
use kopiku_storefront::auth::{AUTH_STORAGE_KEY, AuthError, AuthSession};
use kopiku_storefront::storage::KeyValueStorage;

#[tokio::test]
async fn session_persists_across_restarts() {
    let ctx = TestContext::new();

    let mut session = AuthSession::open(ctx.storage()).await;
    assert!(session.user().is_none());

    session
        .login("user@gmail.com", "password")
        .await
        .expect("demo credential accepted");
    drop(session);

    let restored = AuthSession::open(ctx.storage()).await;
    assert!(restored.is_ready());
    let user = restored.user().expect("signed in after restart");
    assert_eq!(user.name, "Bakti");
    assert_eq!(user.email, "user@gmail.com");
}

#[tokio::test]
async fn wrong_credentials_leave_nothing_behind() {
    let ctx = TestContext::new();

    let mut session = AuthSession::open(ctx.storage()).await;
    let result = session.login("user@gmail.com", "hunter2").await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));

    assert!(
        ctx.storage()
            .get(AUTH_STORAGE_KEY)
            .await
            .expect("read")
            .is_none()
    );
}

#[tokio::test]
async fn logout_removes_the_stored_profile() {
    let ctx = TestContext::new();

    let mut session = AuthSession::open(ctx.storage()).await;
    session
        .login("user@gmail.com", "password")
        .await
        .expect("demo credential accepted");
    session.logout().await;
    drop(session);

    assert!(
        ctx.storage()
            .get(AUTH_STORAGE_KEY)
            .await
            .expect("read")
            .is_none()
    );
    let restored = AuthSession::open(ctx.storage()).await;
    assert!(restored.user().is_none());
}
