//! Error types for the Draftwise core library.
//!
//! Configuration problems and malformed requests are separate enums so the
//! HTTP layer can map them to distinct status codes. The library uses
//! `thiserror` for structured, typed errors.

/// Errors raised while loading or validating the knowledge-base documents.
///
/// These are fatal to the request that triggered the (re)build and are never
/// retried by the library itself.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required configuration file does not exist in the data directory.
    #[error("missing required file: {name}")]
    MissingFile {
        /// File name relative to the data directory.
        name: String,
    },

    /// A configuration file could not be read or parsed as JSON.
    #[error("failed reading JSON file '{name}': {message}")]
    Read {
        /// File name relative to the data directory.
        name: String,
        /// Description of the underlying I/O or parse failure.
        message: String,
    },

    /// Schema validation failed. Carries the first 20 accumulated messages.
    #[error("invalid {name}: {}", .messages.join("; "))]
    Validation {
        /// File name the messages refer to.
        name: String,
        /// Flat list of validation failures, capped at 20.
        messages: Vec<String>,
    },
}

impl ConfigError {
    /// Build a validation error, capping the message list at 20 entries.
    pub fn validation(name: &str, mut messages: Vec<String>) -> Self {
        messages.truncate(20);
        Self::Validation {
            name: name.to_string(),
            messages,
        }
    }
}

/// Errors raised by request-shape or draft-state invariant violations.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// `picks` or `bans` was present but not an object with ally/enemy keys.
    #[error("field '{field}' must be an object with ally/enemy")]
    FieldShape {
        /// The offending top-level field.
        field: &'static str,
    },

    /// A side's hero list was neither an array nor a legacy role->hero object.
    #[error("side picks/bans must be an array (or object for legacy picks)")]
    SideShape,

    /// A side carries more than five picks.
    #[error("each side can have max 5 picks")]
    TooManyPicks,

    /// A side carries more than five bans.
    #[error("each side can have max 5 bans")]
    TooManyBans,

    /// The same hero appears in both sides' pick lists.
    #[error("a hero cannot be picked by both teams")]
    PickOverlap,

    /// The same hero appears in both sides' ban lists.
    #[error("a hero cannot be banned by both teams")]
    BanOverlap,

    /// A hero appears in a pick list and a ban list.
    #[error("a hero cannot be both picked and banned")]
    PickBanOverlap,

    /// An assign request names more than five heroes.
    #[error("heroes length cannot exceed 5")]
    TooManyHeroes,
}

/// Union of the two request-facing error kinds, as surfaced by the advisor.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// Knowledge-base loading or validation failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Request-shape or state-invariant violation.
    #[error(transparent)]
    Request(#[from] RequestError),
}
