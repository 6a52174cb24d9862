//! UI event types.
//!
//! All external inputs (terminal, async completions) are converted to
//! `UiEvent` before being processed by the reducer. Completion events carry
//! the session generation captured when the request was issued; the reducer
//! drops completions whose generation no longer matches the live session,
//! so a response landing after logout never renders stale content.

use crossterm::event::Event as CrosstermEvent;
use qotd_core::api::ApiError;

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Raw terminal event (keys, resize).
    Terminal(CrosstermEvent),

    /// Periodic tick (drives the spinner, caps render cadence).
    Tick,

    /// Login exchange finished; `Ok` carries the issued token.
    LoginCompleted {
        generation: u64,
        result: Result<String, ApiError>,
    },

    /// Registration exchange finished. Success never carries a credential.
    RegisterCompleted {
        generation: u64,
        result: Result<(), ApiError>,
    },

    /// Quote fetch finished; `Ok` carries the quote text.
    QuoteCompleted {
        generation: u64,
        result: Result<String, ApiError>,
    },
}
