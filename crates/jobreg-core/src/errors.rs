use thiserror::Error;

use crate::model::EntityKind;

/// Result type alias using RegistryError
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Canonical error classification
///
/// Every [`RegistryError`] variant maps onto exactly one kind. The kinds are
/// stable and intended for programmatic handling by the request layer
/// (e.g. mapping to HTTP status families) and for test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required argument is missing/blank/malformed, or a protected
    /// invariant would be violated. Raised before any store access.
    Validation,
    /// The referenced entity (or a referenced related entity) does not exist.
    NotFound,
    /// Creating a duplicate id, or updating with a mismatched id.
    Conflict,
    /// The backing store failed.
    Store,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ERR_VALIDATION",
            ErrorKind::NotFound => "ERR_NOT_FOUND",
            ErrorKind::Conflict => "ERR_CONFLICT",
            ErrorKind::Store => "ERR_STORE",
        }
    }
}

/// Canonical error type for all registry operations
///
/// Variants carry enough context (entity kind plus id) for a caller to act
/// without parsing the message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    // ===== Validation =====
    /// No id supplied where one is required
    #[error("No id entered for {kind}")]
    MissingId { kind: EntityKind },

    /// A required field is missing or blank
    #[error("No {field} entered for {kind}")]
    BlankField {
        kind: EntityKind,
        field: &'static str,
    },

    /// Attempt to remove a permanent tag (the entity's id or name)
    #[error("Cannot remove protected tag '{tag}' from {kind} {id}")]
    ProtectedTag {
        kind: EntityKind,
        id: String,
        tag: String,
    },

    // ===== Not Found =====
    /// Entity not found in the registry
    #[error("No {kind} with id {id} exists")]
    EntityNotFound { kind: EntityKind, id: String },

    /// Command has no application set
    #[error("No application set for command {command_id}")]
    NoApplicationSet { command_id: String },

    // ===== Conflict =====
    /// Entity with this id already exists
    #[error("A {kind} with id {id} already exists")]
    AlreadyExists { kind: EntityKind, id: String },

    /// Update payload id does not match the target id
    #[error("{kind} id {payload_id} in payload does not match target id {target_id}")]
    IdMismatch {
        kind: EntityKind,
        target_id: String,
        payload_id: String,
    },

    // ===== Store =====
    /// The backing store failed
    #[error("Store failure: {message}")]
    Persistence { message: String },

    /// A whole-store integrity audit found an invariant violation
    #[error("Registry inconsistent: {message}")]
    Inconsistent { message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl RegistryError {
    /// Classify this error into the stable four-kind taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::MissingId { .. }
            | RegistryError::BlankField { .. }
            | RegistryError::ProtectedTag { .. } => ErrorKind::Validation,

            RegistryError::EntityNotFound { .. } | RegistryError::NoApplicationSet { .. } => {
                ErrorKind::NotFound
            }

            RegistryError::AlreadyExists { .. } | RegistryError::IdMismatch { .. } => {
                ErrorKind::Conflict
            }

            RegistryError::Persistence { .. }
            | RegistryError::Inconsistent { .. }
            | RegistryError::Serialization { .. } => ErrorKind::Store,
        }
    }

    /// Get the stable error code for this error's kind
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Shorthand for the common not-found case
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        RegistryError::EntityNotFound {
            kind,
            id: id.into(),
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Serialization {
            message: err.to_string(),
        }
    }
}
