//! Login, registration, and logout commands.

use anyhow::Result;
use qotd_core::config::Config;
use qotd_core::session::SessionController;

/// Exchanges credentials for a token and persists the session.
pub async fn login(
    config: &Config,
    mut session: SessionController,
    username: &str,
    password: &str,
) -> Result<()> {
    let api = super::api_client(config)?;

    match api.login(username, password).await {
        Ok(token) => {
            session.complete_login(token);
            println!("Logged in as {username}.");
            Ok(())
        }
        Err(e) => anyhow::bail!("{e}"),
    }
}

/// Registers a new account. Never authenticates.
pub async fn register(config: &Config, username: &str, password: &str) -> Result<()> {
    let api = super::api_client(config)?;

    match api.register(username, password).await {
        Ok(()) => {
            println!("Registered {username}. Sign in with `qotd login`.");
            Ok(())
        }
        Err(e) => anyhow::bail!("{e}"),
    }
}

/// Clears the persisted session token. Local only, idempotent.
pub fn logout(mut session: SessionController) -> Result<()> {
    session.logout();
    println!("Logged out.");
    Ok(())
}
