//! One-shot quote fetch.

use anyhow::Result;
use qotd_core::config::Config;
use qotd_core::session::SessionController;

/// Fetches a quote with the persisted credential and prints it.
pub async fn run(config: &Config, session: &SessionController) -> Result<()> {
    let Some(token) = session.credential() else {
        anyhow::bail!("not logged in, run `qotd login` first");
    };

    let api = super::api_client(config)?;
    match api.fetch_quote(token).await {
        Ok(quote) => {
            println!("{quote}");
            Ok(())
        }
        Err(e) => anyhow::bail!("{}", e.quote_message()),
    }
}
