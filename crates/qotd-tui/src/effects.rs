//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer itself never
//! performs network calls or spawns tasks.
//!
//! Each spawn effect carries the session generation captured at issue time.
//! The runtime threads it through to the completion event unchanged.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Spawn the login exchange.
    SpawnLogin {
        generation: u64,
        username: String,
        password: String,
    },

    /// Spawn the registration exchange.
    SpawnRegister {
        generation: u64,
        username: String,
        password: String,
    },

    /// Spawn the authenticated quote fetch.
    SpawnFetchQuote { generation: u64, token: String },
}
