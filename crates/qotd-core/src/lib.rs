//! Core QOTD library (config, credentials, session, API client).

pub mod api;
pub mod config;
pub mod credentials;
pub mod session;
