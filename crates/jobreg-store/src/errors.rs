//! Error handling for jobreg-store
//!
//! Wraps jobreg-core's RegistryError with store-specific helpers

use jobreg_core::errors::RegistryError;

/// Result type alias using RegistryError
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> RegistryError {
    RegistryError::Persistence {
        message: format!("Migration {} failed: {}", migration_id, reason),
    }
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> RegistryError {
    RegistryError::Persistence {
        message: format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ),
    }
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> RegistryError {
    RegistryError::Persistence {
        message: err.to_string(),
    }
}
