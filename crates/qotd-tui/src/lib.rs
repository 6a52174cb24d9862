//! Full-screen TUI for the QOTD client.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use qotd_core::api::ApiClient;
use qotd_core::config::Config;
use qotd_core::session::SessionController;
pub use runtime::TuiRuntime;

/// Runs the interactive client.
pub async fn run(config: &Config, session: SessionController) -> Result<()> {
    // The TUI requires a terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `qotd quote` for non-interactive fetching."
        );
    }

    let base_url = config.resolve_base_url()?;
    let api = ApiClient::new(&base_url, config.request_timeout())?;

    let mut runtime = TuiRuntime::new(api, session)?;
    runtime.run()?;

    // Print goodbye after the TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
