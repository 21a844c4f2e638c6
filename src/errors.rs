use thiserror::Error;

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Represents a member name that is empty after trimming.
    #[error("Name must not be blank")]
    BlankName,

    /// Represents a group name that is empty after trimming.
    #[error("Group name must not be blank")]
    BlankGroupName,

    /// Represents a date that isn't in `YYYY-MM-DD` form.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// Represents an unknown availability slot.
    #[error("Invalid slot: {0:?}")]
    InvalidSlot(String),

    /// Represents a path segment that can't be used as a group slug.
    #[error("Invalid group: {0:?}")]
    InvalidSlug(String),

    /// Represents an availability change from someone who hasn't
    /// joined the group.
    #[error("Join the group first")]
    NotJoined,

    /// Represents an error generating a join link.
    #[error("Failed to generate URL")]
    FailedToGenerateUrl { source: url::ParseError },

    /// Represents an error reading or writing the store.
    #[error("Store error")]
    Store {
        #[from]
        source: StoreError,
    },
}

/// Enumerates errors returned by the store subsystem.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents an error reading or writing a value on disk.
    #[error("I/O error")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Represents a persisted value that couldn't be parsed.
    #[error("Corrupt record under {key:?}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    /// Represents a value that couldn't be serialized.
    #[error("Serialization error")]
    Serialize { source: serde_json::Error },

    /// Represents a blocking task that panicked or was cancelled.
    #[error("Background task failed")]
    Task { source: tokio::task::JoinError },
}
