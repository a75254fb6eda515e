//! Session commands over the mocked authentication service.

use clementine_storefront::config::StorefrontConfig;
use clementine_storefront::services::auth::{AuthService, Credentials, Registration};
use clementine_storefront::storage::JsonFileStore;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn open_auth(config: &StorefrontConfig) -> Result<AuthService, Box<dyn std::error::Error>> {
    let store = JsonFileStore::open(&config.data_dir)?;
    Ok(AuthService::new(Box::new(store), config.mock_latency()))
}

/// Sign in and persist the session.
pub async fn login(config: &StorefrontConfig, email: String, password: String) -> CommandResult {
    let mut auth = open_auth(config)?;
    let outcome = auth.login(Credentials { email, password }).await?;
    println!("Signed in as {} <{}>.", outcome.user.name, outcome.user.email);
    Ok(())
}

/// Register a new account and persist the session.
pub async fn register(
    config: &StorefrontConfig,
    name: String,
    email: String,
    password: String,
) -> CommandResult {
    let mut auth = open_auth(config)?;
    let outcome = auth
        .register(Registration {
            name,
            email,
            confirm_password: password.clone(),
            password,
        })
        .await?;
    println!(
        "Welcome, {}! You are signed in as {}.",
        outcome.user.name, outcome.user.email
    );
    Ok(())
}

/// Sign out, clearing the persisted session.
pub fn logout(config: &StorefrontConfig) -> CommandResult {
    let mut auth = open_auth(config)?;
    if auth.is_logged_in() {
        auth.logout();
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

/// Print the current session.
pub fn status(config: &StorefrontConfig) -> CommandResult {
    let auth = open_auth(config)?;
    match auth.current_user() {
        Some(user) => println!("Signed in as {} <{}>.", user.name, user.email),
        None => println!("Not signed in."),
    }
    Ok(())
}
