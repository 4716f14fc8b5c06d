//! Shared application state for the draftwise server.

use draftwise_core::advisor::Advisor;

/// Shared application state accessible by all route handlers.
pub struct AppState {
    /// Draft advisor over the fingerprint-cached knowledge base.
    pub advisor: Advisor,
}
