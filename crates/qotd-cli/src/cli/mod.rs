//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use qotd_core::config::{self, Config};
use qotd_core::credentials::CredentialStore;
use qotd_core::session::SessionController;

mod commands;

#[derive(Parser)]
#[command(name = "qotd")]
#[command(version)]
#[command(about = "Quote-of-the-day terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and persist the session token
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Register a new account (does not log in)
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Log out (clear the persisted token)
    Logout,

    /// Fetch a quote and print it
    Quote,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    let session = SessionController::new(CredentialStore::new());

    // default to interactive mode
    let Some(command) = cli.command else {
        return qotd_tui::run(&config, session).await;
    };

    match command {
        Commands::Login { username, password } => {
            commands::auth::login(&config, session, &username, &password).await
        }
        Commands::Register { username, password } => {
            commands::auth::register(&config, &username, &password).await
        }
        Commands::Logout => commands::auth::logout(session),
        Commands::Quote => commands::quote::run(&config, &session).await,

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

/// Sets up file-based logging under `${QOTD_HOME}/logs`.
///
/// The TUI owns the terminal, so logs never go to stdout/stderr. Filter via
/// the `QOTD_LOG` env var (defaults to `info`). Returns the appender guard
/// that must stay alive for the process.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = config::paths::logs_dir();
    std::fs::create_dir_all(&logs_dir).ok()?;

    let appender = tracing_appender::rolling::daily(logs_dir, "qotd.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = tracing_subscriber::EnvFilter::try_from_env("QOTD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}
