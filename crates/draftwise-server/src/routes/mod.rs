//! Route modules for the draftwise API server.

pub mod draft;
pub mod health;
