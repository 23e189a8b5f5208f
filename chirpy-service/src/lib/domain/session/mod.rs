//! Login, refresh and revocation of sessions.
//!
//! Failures use the shared `auth::AuthError` taxonomy directly.

pub mod models;
pub mod ports;
pub mod service;
