//! Application state for the TUI.
//!
//! `TuiState` owns the session controller and all transient view state.
//! UI mode (form vs. quote view) is derived purely from
//! `session.authenticated()`; nothing else may fork the view.
//!
//! Mutation happens only in the reducer (`update`), in response to key
//! events and completion events; the runtime never touches state directly.

use qotd_core::session::SessionController;

/// Which form the anonymous view is showing.
///
/// Toggled only by explicit user action, plus the automatic switch back to
/// `Login` after a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Login,
    Register,
}

/// Which input field has focus in the anonymous view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    Username,
    Password,
}

/// Credential form state (anonymous view).
#[derive(Debug, Clone)]
pub struct FormState {
    pub mode: FormMode,
    pub username: String,
    pub password: String,
    pub focus: FocusField,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Login,
            username: String::new(),
            password: String::new(),
            focus: FocusField::Username,
        }
    }

    /// Switches between the login and register forms.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            FormMode::Login => FormMode::Register,
            FormMode::Register => FormMode::Login,
        };
    }

    /// Moves focus to the other field.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FocusField::Username => FocusField::Password,
            FocusField::Password => FocusField::Username,
        };
    }

    /// The field currently accepting keystrokes.
    pub fn focused_field_mut(&mut self) -> &mut String {
        match self.focus {
            FocusField::Username => &mut self.username,
            FocusField::Password => &mut self.password,
        }
    }

    /// Both fields non-empty, the precondition for submitting.
    pub fn submittable(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

/// One busy flag per user-triggered action slot.
///
/// A slot with its flag set must not issue a second exchange; the reducer
/// ignores the triggering key while the flag is up. Every completion path
/// resets its flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pending {
    pub login: bool,
    pub register: bool,
    pub fetch: bool,
}

impl Pending {
    pub fn any(self) -> bool {
        self.login || self.register || self.fetch
    }
}

/// TUI application state.
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Session controller (credential ownership, generation counter).
    pub session: SessionController,
    /// Credential form (anonymous view).
    pub form: FormState,
    /// Per-slot busy flags.
    pub pending: Pending,
    /// Last fetched quote; empty when none. Never non-empty together with
    /// `error`.
    pub quote: String,
    /// User-facing error message from the last completed exchange; empty
    /// when none.
    pub error: String,
    /// Informational message (e.g. registration confirmation); empty when
    /// none.
    pub notice: String,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(session: SessionController) -> Self {
        Self {
            should_quit: false,
            session,
            form: FormState::new(),
            pending: Pending::default(),
            quote: String::new(),
            error: String::new(),
            notice: String::new(),
            spinner_frame: 0,
        }
    }

    /// Sets the error message, clearing the quote and notice (error and
    /// success are mutually exclusive in the rendered view).
    pub fn set_error(&mut self, message: String) {
        self.error = message;
        self.quote.clear();
        self.notice.clear();
    }

    /// Sets the quote, clearing any prior error and notice.
    pub fn set_quote(&mut self, quote: String) {
        self.quote = quote;
        self.error.clear();
        self.notice.clear();
    }
}
