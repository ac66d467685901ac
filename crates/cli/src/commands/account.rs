//! Demo session commands.

use kopiku_storefront::auth::{AuthError, AuthSession};

use super::bootstrap;

/// Sign in with the demo account.
#[allow(clippy::print_stdout)]
pub async fn login(email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, storage) = bootstrap()?;
    let mut session = AuthSession::open(storage).await;

    match session.login(email, password).await {
        Ok(user) => {
            println!("Signed in as {} <{}>.", user.name, user.email);
            Ok(())
        }
        Err(AuthError::InvalidCredentials) => {
            println!("Invalid email or password.");
            Ok(())
        }
    }
}

/// Sign out.
#[allow(clippy::print_stdout)]
pub async fn logout() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, storage) = bootstrap()?;
    let mut session = AuthSession::open(storage).await;

    session.logout().await;
    println!("Signed out.");
    Ok(())
}

/// Show the signed-in profile.
#[allow(clippy::print_stdout)]
pub async fn profile() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, storage) = bootstrap()?;
    let session = AuthSession::open(storage).await;

    match session.user() {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not signed in."),
    }
    Ok(())
}
