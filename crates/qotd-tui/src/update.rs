//! Reducer: routes events to state transitions and effects.
//!
//! Pure with respect to I/O: mutates `TuiState` and returns effects for the
//! runtime to execute. The per-slot busy flags provide single-flight
//! discipline (a pending slot ignores its triggering key), and completion
//! events are applied only when their captured session generation still
//! matches the live session.

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use qotd_core::api::ApiError;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{FormMode, FormState, Pending, TuiState};

/// Notice shown after a successful registration.
const REGISTERED_NOTICE: &str = "registered, sign in with your new account";

/// Main reducer entry point.
pub fn update(state: &mut TuiState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Terminal(CrosstermEvent::Key(key)) => handle_key(state, key),
        UiEvent::Terminal(_) => vec![],

        UiEvent::Tick => {
            if state.pending.any() {
                state.spinner_frame = state.spinner_frame.wrapping_add(1);
            }
            vec![]
        }

        UiEvent::LoginCompleted { generation, result } => {
            apply_login_result(state, generation, result)
        }
        UiEvent::RegisterCompleted { generation, result } => {
            apply_register_result(state, generation, result)
        }
        UiEvent::QuoteCompleted { generation, result } => {
            apply_quote_result(state, generation, result)
        }
    }
}

// ============================================================================
// Key routing
// ============================================================================

fn handle_key(state: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    // UI mode is derived from credential presence, nothing else.
    if state.session.authenticated() {
        handle_authenticated_key(state, key)
    } else {
        handle_form_key(state, key, ctrl)
    }
}

fn handle_form_key(state: &mut TuiState, key: KeyEvent, ctrl: bool) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            state.form.focus_next();
            vec![]
        }
        KeyCode::Char('t') if ctrl => {
            state.form.toggle_mode();
            state.error.clear();
            state.notice.clear();
            vec![]
        }
        KeyCode::Enter => submit_form(state),
        KeyCode::Backspace => {
            state.form.focused_field_mut().pop();
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            state.form.focused_field_mut().push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_authenticated_key(state: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Enter | KeyCode::Char('n') => request_quote(state),
        KeyCode::Char('l') => {
            logout(state);
            vec![]
        }
        _ => vec![],
    }
}

// ============================================================================
// Submissions
// ============================================================================

/// Submits the active form if its slot is free and both fields are filled.
fn submit_form(state: &mut TuiState) -> Vec<UiEffect> {
    if !state.form.submittable() {
        return vec![];
    }

    let generation = state.session.generation();
    let username = state.form.username.trim().to_string();
    let password = state.form.password.clone();

    match state.form.mode {
        FormMode::Login => {
            // Single-flight: the control is disabled while busy.
            if state.pending.login {
                return vec![];
            }
            state.pending.login = true;
            state.error.clear();
            state.notice.clear();
            vec![UiEffect::SpawnLogin {
                generation,
                username,
                password,
            }]
        }
        FormMode::Register => {
            if state.pending.register {
                return vec![];
            }
            state.pending.register = true;
            state.error.clear();
            state.notice.clear();
            vec![UiEffect::SpawnRegister {
                generation,
                username,
                password,
            }]
        }
    }
}

/// Issues a quote fetch if none is in flight.
fn request_quote(state: &mut TuiState) -> Vec<UiEffect> {
    if state.pending.fetch {
        return vec![];
    }
    let Some(token) = state.session.credential() else {
        return vec![];
    };
    let token = token.to_string();

    state.pending.fetch = true;
    state.error.clear();
    vec![UiEffect::SpawnFetchQuote {
        generation: state.session.generation(),
        token,
    }]
}

/// Logout: one atomic state update, no network call. Clears the persisted
/// credential, drops all session-derived view state, and resets the form.
fn logout(state: &mut TuiState) {
    state.session.logout();
    state.quote.clear();
    state.error.clear();
    state.notice.clear();
    state.pending = Pending::default();
    state.form = FormState::new();
}

// ============================================================================
// Completions
// ============================================================================

/// True when a completion belongs to a session that is no longer live.
fn stale(state: &TuiState, generation: u64) -> bool {
    generation != state.session.generation()
}

fn apply_login_result(
    state: &mut TuiState,
    generation: u64,
    result: Result<String, ApiError>,
) -> Vec<UiEffect> {
    // The slot is single-flight, so this completion is the one the flag
    // belongs to; resolve the flag even when the result itself is stale.
    state.pending.login = false;
    if stale(state, generation) {
        tracing::debug!("discarding stale login result");
        return vec![];
    }

    match result {
        Ok(token) => {
            state.session.complete_login(token);
            state.error.clear();
            state.notice.clear();
            state.form = FormState::new();
        }
        Err(e) => {
            // Session state is untouched by a failed login.
            state.set_error(e.to_string());
        }
    }
    vec![]
}

fn apply_register_result(
    state: &mut TuiState,
    generation: u64,
    result: Result<(), ApiError>,
) -> Vec<UiEffect> {
    state.pending.register = false;
    if stale(state, generation) {
        tracing::debug!("discarding stale register result");
        return vec![];
    }

    match result {
        Ok(()) => {
            // Registration never authenticates; flip back to the login form.
            state.form.mode = FormMode::Login;
            state.form.password.clear();
            state.error.clear();
            state.notice = REGISTERED_NOTICE.to_string();
        }
        Err(e) => {
            state.set_error(e.to_string());
        }
    }
    vec![]
}

fn apply_quote_result(
    state: &mut TuiState,
    generation: u64,
    result: Result<String, ApiError>,
) -> Vec<UiEffect> {
    state.pending.fetch = false;
    if stale(state, generation) {
        tracing::debug!("discarding stale quote result");
        return vec![];
    }

    match result {
        Ok(quote) => state.set_quote(quote),
        Err(e) => state.set_error(e.quote_message()),
    }
    vec![]
}
