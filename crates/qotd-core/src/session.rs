//! Session state.
//!
//! Owns the bearer credential and derives the authenticated/anonymous mode
//! from its presence. Constructed once per process with the credential store
//! injected; the store is only ever touched through this controller.

use crate::credentials::{CredentialStore, mask_token};

/// Session controller.
///
/// Two states, derived from credential presence: anonymous (no credential)
/// and authenticated. The only transitions are `complete_login` (anonymous →
/// authenticated) and `logout` (authenticated → anonymous); failed exchanges
/// never change session state.
///
/// Each transition bumps a generation counter. In-flight requests capture the
/// generation at issue time so their completions can be discarded when the
/// session they belong to is gone.
pub struct SessionController {
    store: CredentialStore,
    credential: Option<String>,
    generation: u64,
}

impl SessionController {
    /// Creates a controller seeded from the persisted credential, if any.
    pub fn new(store: CredentialStore) -> Self {
        let credential = store.get();
        if let Some(token) = &credential {
            tracing::debug!(token = %mask_token(token), "restored persisted session");
        }
        Self {
            store,
            credential,
            generation: 0,
        }
    }

    /// Whether a credential is present.
    pub fn authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// The current credential, if any.
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// The current session generation.
    ///
    /// Capture this when issuing a request; a completion whose captured
    /// generation no longer matches belongs to a dead session.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Completes a successful login: persists the token, then adopts it.
    ///
    /// If persistence fails the in-memory credential is still set and the
    /// session stays usable for the rest of the process; the failure is
    /// only logged.
    pub fn complete_login(&mut self, token: String) {
        if let Err(e) = self.store.set(&token) {
            tracing::warn!(error = %e, "failed to persist credential; session is memory-only");
        }
        tracing::debug!(token = %mask_token(&token), "session authenticated");
        self.credential = Some(token);
        self.generation += 1;
    }

    /// Logs out: clears the store and the in-memory credential. Local only,
    /// no network call.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear persisted credential");
        }
        self.credential = None;
        self.generation += 1;
    }
}
